//! Configuration files
//!
//! `TestSubjectConfig` describes the server under test:
//! ```yaml
//! serverRoot: https://pod.example.org/
//! accessControlMode: wac   # wac | acp | acp-legacy
//! ```
//!
//! `RuleSet` is the rule file consumed by the CLI, in YAML or JSON:
//! ```yaml
//! baseUri: https://pod.example.org/test.acl
//! rules:
//!   - target: https://pod.example.org/test
//!     agentKind: AGENT
//!     agent: https://pod.example.org/alice#me
//!     access: [read, write]
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::dataset::AccessControlMode;
use crate::errors::{AclError, Result};
use crate::rule::AccessRule;

/// Overrides `accessControlMode` from the config file
pub const ACCESS_CONTROL_MODE_ENV: &str = "SOLID_ACCESS_CONTROL_MODE";

/// Server under test
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestSubjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_root: Option<String>,
    #[serde(default, deserialize_with = "deserialize_mode", skip_serializing_if = "Option::is_none")]
    pub access_control_mode: Option<AccessControlMode>,
}

impl TestSubjectConfig {
    /// Read a YAML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AclError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_yaml_str(&content)?;
        debug!(path = %path.display(), mode = ?config.access_control_mode, "loaded test subject config");
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply `SOLID_ACCESS_CONTROL_MODE` when set
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(value) = env::var(ACCESS_CONTROL_MODE_ENV) {
            self.apply_mode_override(&value)?;
        }
        Ok(self)
    }

    fn apply_mode_override(&mut self, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Ok(());
        }
        self.access_control_mode = Some(value.parse()?);
        Ok(())
    }
}

fn deserialize_mode<'de, D>(deserializer: D) -> std::result::Result<Option<AccessControlMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    value
        .map(|token| token.parse::<AccessControlMode>().map_err(<D::Error as serde::de::Error>::custom))
        .transpose()
}

/// Rules for one ACL document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub base_uri: String,
    #[serde(default)]
    pub rules: Vec<AccessRule>,
}

impl RuleSet {
    /// Read a rule file; `.json` is parsed as JSON, anything else as YAML
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        let set: RuleSet = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(set.normalized())
    }

    fn normalized(self) -> Self {
        Self {
            base_uri: self.base_uri,
            rules: self.rules.into_iter().map(AccessRule::normalized).collect(),
        }
    }
}
