//! solid-acl CLI
//!
//! Compiles rule files into access control documents and applies them to a server

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use solid_acl::{
    AccessControlFactory, AccessControlMode, AccessDataset, AccessDatasetBuilder, ReqwestClient, RuleSet,
    TestSubjectConfig,
};

#[derive(Parser)]
#[command(name = "solid-acl")]
#[command(version)]
#[command(about = "Build and apply Solid access control documents", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a rule file and print the result
    Compile {
        /// Access control dialect (wac, acp, acp-legacy)
        #[arg(long)]
        mode: AccessControlMode,
        /// Rule file (YAML, or JSON by extension)
        #[arg(long)]
        rules: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Turtle)]
        format: Format,
    },
    /// Compile a rule file with the configured dialect and send it to the server
    Apply {
        /// Test subject config (YAML)
        #[arg(long)]
        config: PathBuf,
        /// Rule file (YAML, or JSON by extension)
        #[arg(long)]
        rules: PathBuf,
        /// ACL document URI (defaults to the rule file's baseUri)
        #[arg(long)]
        acl: Option<String>,
        /// Bearer token sent with the request
        #[arg(long, env = "SOLID_ACL_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Turtle,
    Sparql,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "solid_acl=debug" } else { "solid_acl=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compile { mode, rules, format } => {
            let rule_set = RuleSet::load(&rules).with_context(|| format!("reading {}", rules.display()))?;
            let factory = AccessControlFactory::new(Some(mode));
            let dataset = build(&factory, rule_set)?;
            let output = match format {
                Format::Turtle => dataset.as_turtle()?,
                Format::Sparql => dataset.as_sparql_insert()?,
            };
            println!("{}", output);
        }
        Commands::Apply { config, rules, acl, token } => {
            let config = TestSubjectConfig::load(&config)?.with_env_overrides()?;
            let factory = AccessControlFactory::from_config(&config);
            let rule_set = RuleSet::load(&rules).with_context(|| format!("reading {}", rules.display()))?;
            let acl_uri = acl.unwrap_or_else(|| rule_set.base_uri.clone());

            let dataset = build(&factory, rule_set)?;
            let mut client = ReqwestClient::new();
            if let Some(token) = token {
                client = client.with_auth(token);
            }
            dataset.apply(&client, &acl_uri)?;
            info!(uri = %acl_uri, mode = %dataset.mode(), "applied access dataset");
        }
    }

    Ok(())
}

fn build(factory: &AccessControlFactory, rule_set: RuleSet) -> Result<Box<dyn AccessDataset>> {
    let Some(builder) = factory.access_dataset_builder(&rule_set.base_uri) else {
        bail!("no access control mode configured");
    };
    let builder: AccessDatasetBuilder = rule_set.rules.into_iter().fold(builder, AccessDatasetBuilder::add_rule);
    Ok(builder.build()?)
}
