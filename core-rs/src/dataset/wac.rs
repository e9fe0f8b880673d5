//! Web Access Control datasets
//!
//! Every rule becomes one `acl:Authorization` node:
//!
//! ```text
//! _:auth1 a acl:Authorization ;
//!     acl:accessTo <target> ;          # acl:default when inheritable
//!     acl:agent <webid> ;              # or acl:agentClass / acl:agentGroup
//!     acl:mode acl:Read, acl:Control .
//! ```
//!
//! WAC has a single `acl:Control` mode, so `controlRead` and `controlWrite`
//! can only be requested together.

use oxigraph::model::{BlankNode, Graph, NamedNode, NamedNodeRef, TripleRef};
use tracing::debug;

use super::{custom_mode, named_node, namespace, AccessControlMode, AccessDataset, ApplyMethod, DatasetCompiler};
use crate::errors::{AclError, Result};
use crate::graph::Namespaces;
use crate::rule::{AccessMode, AccessRule, AgentKind};
use crate::vocab::{acl, foaf, rdf, vcard};

/// WAC access dataset, applied by replacing the ACL document
#[derive(Debug, Clone, Default)]
pub struct WacDataset {
    graph: Option<Graph>,
    namespaces: Namespaces,
}

impl WacDataset {
    /// Compile rules into authorizations
    pub fn from_rules(rules: &[AccessRule]) -> Result<Self> {
        if rules.is_empty() {
            return Ok(Self::default());
        }

        let mut graph = Graph::new();
        for (index, rule) in rules.iter().enumerate() {
            add_authorization(&mut graph, rule, index + 1)?;
        }
        debug!(rules = rules.len(), statements = graph.len(), "compiled WAC dataset");

        Ok(Self {
            graph: Some(graph),
            namespaces: namespaces_for(rules),
        })
    }

    /// Parse an existing ACL document
    pub fn from_turtle(acl: &str, base_uri: &str) -> Result<Self> {
        let mut dataset = Self {
            graph: None,
            namespaces: standard_namespaces(),
        };
        dataset.parse_turtle(acl, base_uri)?;
        Ok(dataset)
    }
}

impl AccessDataset for WacDataset {
    fn mode(&self) -> AccessControlMode {
        AccessControlMode::Wac
    }

    fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    fn set_graph(&mut self, graph: Option<Graph>) {
        self.graph = graph;
    }

    fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    fn apply_method(&self) -> ApplyMethod {
        ApplyMethod::Put
    }
}

/// Compile step for WAC builders
#[derive(Debug, Clone, Copy, Default)]
pub struct WacCompiler;

impl DatasetCompiler for WacCompiler {
    fn mode(&self) -> AccessControlMode {
        AccessControlMode::Wac
    }

    fn compile(&self, rules: &[AccessRule], _base_uri: &str) -> Result<Box<dyn AccessDataset>> {
        Ok(Box::new(WacDataset::from_rules(rules)?))
    }

    /// Read, write and control on `target`; containers also get the inheritable grant
    fn owner_rules(&self, target: &str, owner: &str) -> Vec<AccessRule> {
        let grant = |inheritable| {
            AccessRule::new(
                target,
                inheritable,
                AgentKind::Agent,
                Some(owner.to_string()),
                OWNER_ACCESS.iter().cloned(),
                Vec::new(),
            )
        };
        if target.ends_with('/') {
            vec![grant(false), grant(true)]
        } else {
            vec![grant(false)]
        }
    }
}

/// Modes the WAC owner grant carries
pub const OWNER_ACCESS: [AccessMode; 3] = [AccessMode::Read, AccessMode::Write, AccessMode::Control];

fn add_authorization(graph: &mut Graph, rule: &AccessRule, index: usize) -> Result<()> {
    if rule.has_mode(&AccessMode::ControlRead) != rule.has_mode(&AccessMode::ControlWrite) {
        return Err(AclError::InvalidControlModes {
            dialect: AccessControlMode::Wac.to_string(),
            reason: "use control, or request controlRead and controlWrite together".to_string(),
        });
    }

    let target = named_node(rule.target(), "target")?;
    let authorization = BlankNode::new_unchecked(format!("auth{}", index));
    let link = if rule.is_inheritable() { acl::DEFAULT } else { acl::ACCESS_TO };

    let subject = authorization.as_ref();
    graph.insert(TripleRef::new(subject, rdf::TYPE, acl::AUTHORIZATION));
    graph.insert(TripleRef::new(subject, link, target.as_ref()));

    match rule.agent_kind() {
        AgentKind::Agent => {
            let agent = rule
                .agent()
                .ok_or_else(|| AclError::InvalidRule(format!("AGENT rule for {} has no agent", rule.target())))?;
            let agent = named_node(agent, "agent")?;
            graph.insert(TripleRef::new(subject, acl::AGENT, agent.as_ref()));
        }
        AgentKind::Public => {
            graph.insert(TripleRef::new(subject, acl::AGENT_CLASS, foaf::AGENT));
        }
        AgentKind::AuthenticatedUser => {
            graph.insert(TripleRef::new(subject, acl::AGENT_CLASS, acl::AUTHENTICATED_AGENT));
        }
        AgentKind::Group => {
            if rule.members().is_empty() {
                return Err(AclError::InvalidRule(format!("GROUP rule for {} has no members", rule.target())));
            }
            let group = BlankNode::new_unchecked(format!("group{}", index));
            graph.insert(TripleRef::new(subject, acl::AGENT_GROUP, group.as_ref()));
            graph.insert(TripleRef::new(group.as_ref(), rdf::TYPE, vcard::GROUP));
            for member in rule.members() {
                let member = named_node(member, "member")?;
                graph.insert(TripleRef::new(group.as_ref(), vcard::HAS_MEMBER, member.as_ref()));
            }
        }
    }

    // the graph collapses repeats, e.g. control + controlRead + controlWrite
    for mode in rule.access() {
        let mode = mode_iri(mode)?;
        graph.insert(TripleRef::new(subject, acl::MODE, mode.as_ref()));
    }
    Ok(())
}

fn mode_iri(mode: &AccessMode) -> Result<NamedNode> {
    let standard: NamedNodeRef<'static> = match mode {
        AccessMode::Read => acl::READ,
        AccessMode::Write => acl::WRITE,
        AccessMode::Append => acl::APPEND,
        AccessMode::Control | AccessMode::ControlRead | AccessMode::ControlWrite => acl::CONTROL,
        AccessMode::Custom(_) => return custom_mode(mode),
    };
    Ok(standard.into_owned())
}

fn namespaces_for(rules: &[AccessRule]) -> Namespaces {
    let mut namespaces = vec![namespace(acl::PREFIX, acl::NAMESPACE)];
    if rules.iter().any(|r| r.agent_kind() == AgentKind::Public) {
        namespaces.push(namespace(foaf::PREFIX, foaf::NAMESPACE));
    }
    if rules.iter().any(|r| r.agent_kind() == AgentKind::Group) {
        namespaces.push(namespace(vcard::PREFIX, vcard::NAMESPACE));
    }
    namespaces
}

fn standard_namespaces() -> Namespaces {
    vec![
        namespace(acl::PREFIX, acl::NAMESPACE),
        namespace(foaf::PREFIX, foaf::NAMESPACE),
        namespace(vcard::PREFIX, vcard::NAMESPACE),
    ]
}
