//! # solid-acl - Access control datasets for Solid servers
//!
//! Builds, serializes, parses, compares and applies the access control
//! documents a Solid server stores next to each resource, in any of the
//! three dialects servers implement:
//!
//! - **WAC**: Web Access Control authorizations, replaced with `PUT`
//! - **ACP**: Access Control Policy access controls, patched with SPARQL
//! - **ACP legacy**: the earlier ACP draft, patched with SPARQL
//!
//! ## Flow
//!
//! ```text
//!   AccessControlFactory ──► AccessDatasetBuilder ──► DatasetCompiler
//!   (picks the dialect)      (collects rules)         (wac | acp | acp-legacy)
//!                                                           │
//!                                                           ▼
//!                              HttpClient ◄── apply ── AccessDataset
//!                                                      (turtle, sparql, subset)
//! ```
//!
//! ## Example
//!
//! ```
//! use solid_acl::{AccessControlFactory, AccessControlMode, AccessDataset};
//!
//! let factory = AccessControlFactory::new(Some(AccessControlMode::Acp));
//! let dataset = factory
//!     .access_dataset_builder("https://pod.example.org/test.acl")
//!     .unwrap()
//!     .set_agent_access("https://pod.example.org/test", "https://pod.example.org/alice#me", ["read", "control"])
//!     .build()
//!     .unwrap();
//! assert!(dataset.as_sparql_insert().unwrap().contains("INSERT DATA"));
//! ```

pub mod builder;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod factory;
pub mod graph;
pub mod http;
pub mod rule;
pub mod vocab;

pub use builder::AccessDatasetBuilder;
pub use config::{RuleSet, TestSubjectConfig};
pub use dataset::{
    AccessControlMode, AccessDataset, AcpCompiler, AcpDataset, AcpLegacyCompiler, AcpLegacyDataset, ApplyMethod,
    DatasetCompiler, WacCompiler, WacDataset,
};
pub use errors::{AclError, Result};
pub use factory::AccessControlFactory;
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use rule::{AccessMode, AccessRule, AgentKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
