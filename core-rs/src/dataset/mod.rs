//! Access datasets
//!
//! One [`AccessDataset`] implementation per access control dialect:
//! - [`WacDataset`]: Web Access Control authorizations (replaced with PUT)
//! - [`AcpDataset`]: Access Control Policy, current draft (patched with SPARQL)
//! - [`AcpLegacyDataset`]: Access Control Policy, legacy draft (patched with SPARQL)
//!
//! Each dialect also provides a [`DatasetCompiler`] that turns a list of
//! [`AccessRule`]s into that dialect's graph shape.

pub mod acp;
pub mod acp_legacy;
pub mod wac;

pub use acp::{AcpCompiler, AcpDataset};
pub use acp_legacy::{AcpLegacyCompiler, AcpLegacyDataset};
pub use wac::{WacCompiler, WacDataset};

use oxigraph::model::{Graph, NamedNode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::errors::{AclError, Result};
use crate::graph::{self, Namespaces};
use crate::http::{self, HttpClient, MEDIA_TYPE_SPARQL_UPDATE, MEDIA_TYPE_TEXT_TURTLE};
use crate::rule::{AccessMode, AccessRule};

/// Access control dialect implemented by a server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessControlMode {
    Wac,
    Acp,
    AcpLegacy,
}

impl fmt::Display for AccessControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessControlMode::Wac => write!(f, "wac"),
            AccessControlMode::Acp => write!(f, "acp"),
            AccessControlMode::AcpLegacy => write!(f, "acp-legacy"),
        }
    }
}

impl FromStr for AccessControlMode {
    type Err = AclError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wac" => Ok(AccessControlMode::Wac),
            "acp" => Ok(AccessControlMode::Acp),
            "acp-legacy" | "acp_legacy" => Ok(AccessControlMode::AcpLegacy),
            other => Err(AclError::Config(format!(
                "Unknown access control mode: {} (expected wac, acp or acp-legacy)",
                other
            ))),
        }
    }
}

/// How a dataset is sent to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMethod {
    /// Replace the whole ACL document with Turtle
    Put,
    /// Add statements with a SPARQL `INSERT DATA` update
    Patch,
}

/// Capability set shared by all dialects
///
/// A dataset wraps at most one graph. The graph is absent when no rules were
/// supplied; it is only ever replaced as a whole.
pub trait AccessDataset: fmt::Debug + Send + Sync {
    /// Dialect of this dataset
    fn mode(&self) -> AccessControlMode;

    /// Wrapped graph, if any
    fn graph(&self) -> Option<&Graph>;

    /// Replace the wrapped graph
    fn set_graph(&mut self, graph: Option<Graph>);

    /// Prefixes declared when serializing
    fn namespaces(&self) -> &Namespaces;

    /// HTTP method used by [`AccessDataset::apply`]
    fn apply_method(&self) -> ApplyMethod;

    /// Render as Turtle; empty string when there is no graph
    fn as_turtle(&self) -> Result<String> {
        match self.graph() {
            Some(graph) => {
                let turtle = graph::serialize_turtle(graph, self.namespaces())?;
                debug!(mode = %self.mode(), statements = graph.len(), "serialized access dataset");
                Ok(turtle)
            }
            None => Ok(String::new()),
        }
    }

    /// Render as a SPARQL `INSERT DATA` update; empty string when there is no graph
    fn as_sparql_insert(&self) -> Result<String> {
        if self.graph().is_none() {
            return Ok(String::new());
        }
        Ok(graph::turtle_to_sparql_insert(&self.as_turtle()?))
    }

    /// Replace the graph with the result of parsing Turtle relative to `base_uri`
    fn parse_turtle(&mut self, data: &str, base_uri: &str) -> Result<()> {
        let parsed = graph::parse_turtle(data, base_uri)?;
        self.set_graph(Some(parsed));
        Ok(())
    }

    /// True iff every statement here is also in `other`
    ///
    /// Absent or empty graphs are never a subset; this never fails.
    fn is_subset_of(&self, other: &dyn AccessDataset) -> bool {
        match (self.graph(), other.graph()) {
            (Some(mine), Some(theirs)) if !mine.is_empty() => graph::is_subset(mine, theirs),
            _ => false,
        }
    }

    /// Send the dataset to `uri` with the dialect's method
    ///
    /// Does nothing when there is no graph. Any non-2xx status is an error.
    fn apply(&self, client: &dyn HttpClient, uri: &str) -> Result<()> {
        if self.graph().is_none() {
            debug!(uri, "no access dataset to apply");
            return Ok(());
        }

        let response = match self.apply_method() {
            ApplyMethod::Put => {
                let body = self.as_turtle()?;
                info!(mode = %self.mode(), uri, bytes = body.len(), "PUT access dataset");
                client.put(uri, &body, MEDIA_TYPE_TEXT_TURTLE)?
            }
            ApplyMethod::Patch => {
                let body = self.as_sparql_insert()?;
                info!(mode = %self.mode(), uri, bytes = body.len(), "PATCH access dataset");
                client.patch(uri, &body, MEDIA_TYPE_SPARQL_UPDATE)?
            }
        };

        if !http::is_successful(response.status) {
            warn!(mode = %self.mode(), uri, status = response.status, "server rejected access dataset");
            return Err(AclError::Apply {
                status: response.status,
                uri: uri.to_string(),
            });
        }
        Ok(())
    }
}

/// Compile step plugged into the shared builder
pub trait DatasetCompiler: fmt::Debug + Send + Sync {
    /// Dialect produced by this compiler
    fn mode(&self) -> AccessControlMode;

    /// Compile `rules` into a dataset, naming document-scoped nodes under `base_uri`
    ///
    /// An empty rule list yields a dataset with no graph.
    fn compile(&self, rules: &[AccessRule], base_uri: &str) -> Result<Box<dyn AccessDataset>>;

    /// Rules granting `owner` full access to `target`
    ///
    /// Empty for dialects where ownership is managed by the server.
    fn owner_rules(&self, target: &str, owner: &str) -> Vec<AccessRule>;
}

/// Parse an absolute IRI, reporting which field was wrong
pub(crate) fn named_node(iri: &str, what: &str) -> Result<NamedNode> {
    NamedNode::new(iri).map_err(|e| AclError::InvalidIri(format!("{} <{}>: {}", what, iri, e)))
}

/// IRI for a custom mode token
pub(crate) fn custom_mode(mode: &AccessMode) -> Result<NamedNode> {
    named_node(mode.as_token(), "access mode")
}

pub(crate) fn namespace(prefix: &str, iri: &str) -> (String, String) {
    (prefix.to_string(), iri.to_string())
}
