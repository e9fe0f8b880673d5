//! Fluent accumulation of access rules
//!
//! The builder only collects rules; the dialect's [`DatasetCompiler`]
//! validates and compiles them in [`AccessDatasetBuilder::build`].

use tracing::debug;

use crate::dataset::{AccessControlMode, AccessDataset, DatasetCompiler};
use crate::errors::Result;
use crate::rule::{AccessMode, AccessRule, AgentKind};

/// Collects [`AccessRule`]s for one ACL document
///
/// # Example
///
/// ```
/// use solid_acl::{AccessDataset, AccessDatasetBuilder, WacCompiler};
///
/// let dataset = AccessDatasetBuilder::new(Box::new(WacCompiler))
///     .set_base_uri("https://example.org/test.acl")
///     .set_agent_access("https://example.org/test", "https://example.org/alice#me", ["read"])
///     .build()
///     .unwrap();
/// assert!(dataset.graph().is_some());
/// ```
#[derive(Debug)]
pub struct AccessDatasetBuilder {
    compiler: Box<dyn DatasetCompiler>,
    base_uri: String,
    rules: Vec<AccessRule>,
}

impl AccessDatasetBuilder {
    pub fn new(compiler: Box<dyn DatasetCompiler>) -> Self {
        Self {
            compiler,
            base_uri: String::new(),
            rules: Vec::new(),
        }
    }

    /// URI of the ACL document; policy dialects mint node names under it
    pub fn set_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = uri.into();
        self
    }

    /// Give `owner` full access to `target`, as the dialect defines it
    ///
    /// WAC grants read, write and control, inheritably too on containers.
    /// Policy dialects leave ownership to the server and add nothing.
    pub fn set_owner_access(mut self, target: &str, owner: &str) -> Self {
        let rules = self.compiler.owner_rules(target, owner);
        debug!(target, owner, rules = rules.len(), "owner access");
        self.rules.extend(rules);
        self
    }

    pub fn set_agent_access<M>(self, target: &str, web_id: &str, access: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        self.set_access_for(target, AgentKind::Agent, Some(web_id), access, Vec::new())
    }

    pub fn set_group_access<M>(self, target: &str, members: Vec<String>, access: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        self.set_access_for(target, AgentKind::Group, None, access, members)
    }

    pub fn set_public_access<M>(self, target: &str, access: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        self.set_access_for(target, AgentKind::Public, None, access, Vec::new())
    }

    pub fn set_authenticated_access<M>(self, target: &str, access: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        self.set_access_for(target, AgentKind::AuthenticatedUser, None, access, Vec::new())
    }

    /// Append a non-inheritable rule
    pub fn set_access_for<M>(
        self,
        target: &str,
        kind: AgentKind,
        agent: Option<&str>,
        access: M,
        members: Vec<String>,
    ) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        self.push(target, false, kind, agent, access, members)
    }

    pub fn set_inheritable_agent_access<M>(self, target: &str, web_id: &str, access: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        self.set_inheritable_access_for(target, AgentKind::Agent, Some(web_id), access, Vec::new())
    }

    pub fn set_inheritable_group_access<M>(self, target: &str, members: Vec<String>, access: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        self.set_inheritable_access_for(target, AgentKind::Group, None, access, members)
    }

    pub fn set_inheritable_public_access<M>(self, target: &str, access: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        self.set_inheritable_access_for(target, AgentKind::Public, None, access, Vec::new())
    }

    pub fn set_inheritable_authenticated_access<M>(self, target: &str, access: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        self.set_inheritable_access_for(target, AgentKind::AuthenticatedUser, None, access, Vec::new())
    }

    /// Append an inheritable rule
    pub fn set_inheritable_access_for<M>(
        self,
        target: &str,
        kind: AgentKind,
        agent: Option<&str>,
        access: M,
        members: Vec<String>,
    ) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        self.push(target, true, kind, agent, access, members)
    }

    /// Append an already constructed rule
    pub fn add_rule(mut self, rule: AccessRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn mode(&self) -> AccessControlMode {
        self.compiler.mode()
    }

    /// Compile the collected rules
    pub fn build(self) -> Result<Box<dyn AccessDataset>> {
        debug!(mode = %self.compiler.mode(), rules = self.rules.len(), base = %self.base_uri, "building access dataset");
        self.compiler.compile(&self.rules, &self.base_uri)
    }

    fn push<M>(
        mut self,
        target: &str,
        inheritable: bool,
        kind: AgentKind,
        agent: Option<&str>,
        access: M,
        members: Vec<String>,
    ) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        self.rules.push(AccessRule::new(
            target,
            inheritable,
            kind,
            agent.map(str::to_string),
            access,
            members,
        ));
        self
    }
}
