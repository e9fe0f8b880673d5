//! Access Control Policy datasets (current draft)
//!
//! Every rule becomes an access control linked from the ACR document, with
//! a content policy and, when control modes are requested, an access policy.
//! Both policies share one matcher:
//!
//! ```text
//! <acr> acp:accessControl acr:accessControl1 .      # acp:memberAccessControl when inheritable
//! acr:accessControl1 a acp:AccessControl ;
//!     acp:apply acr:policy1 ;
//!     acp:access acr:accessPolicy1 .
//! acr:policy1 a acp:Policy ; acp:allOf acr:rule1 ; acp:allow acl:Read .
//! acr:accessPolicy1 a acp:Policy ; acp:allOf acr:rule1 ; acp:allow acl:Read, acl:Write .
//! acr:rule1 a acp:Matcher ; acp:agent <webid> .
//! ```
//!
//! Node names come from the base URI and the rule's position, so compiling
//! the same rules twice gives the same graph.

use oxigraph::model::{BlankNode, Graph, NamedNode, NamedNodeRef, TripleRef};
use tracing::debug;

use super::{custom_mode, named_node, namespace, AccessControlMode, AccessDataset, ApplyMethod, DatasetCompiler};
use crate::errors::{AclError, Result};
use crate::graph::Namespaces;
use crate::rule::{AccessMode, AccessRule, AgentKind};
use crate::vocab::{acl, acp, rdf, vcard};

/// Prefix bound to the ACR document namespace
pub const DOCUMENT_PREFIX: &str = "acr";

/// ACP access dataset, applied with a SPARQL patch
#[derive(Debug, Clone, Default)]
pub struct AcpDataset {
    graph: Option<Graph>,
    namespaces: Namespaces,
}

impl AcpDataset {
    /// Compile rules into access controls rooted at `acr_uri`
    pub fn from_rules(rules: &[AccessRule], acr_uri: &str) -> Result<Self> {
        if rules.is_empty() {
            return Ok(Self::default());
        }

        let document = DocumentNodes::new(acr_uri)?;
        let mut graph = Graph::new();
        for (index, rule) in rules.iter().enumerate() {
            add_access_control(&mut graph, &document, rule, index + 1)?;
        }
        debug!(rules = rules.len(), statements = graph.len(), acr = acr_uri, "compiled ACP dataset");

        let mut namespaces = vec![
            namespace(DOCUMENT_PREFIX, &document.namespace),
            namespace(acp::PREFIX, acp::NAMESPACE),
            namespace(acl::PREFIX, acl::NAMESPACE),
        ];
        if rules.iter().any(|r| r.agent_kind() == AgentKind::Group) {
            namespaces.push(namespace(vcard::PREFIX, vcard::NAMESPACE));
        }

        Ok(Self {
            graph: Some(graph),
            namespaces,
        })
    }

    /// Parse an existing ACR document
    pub fn from_turtle(acr: &str, base_uri: &str) -> Result<Self> {
        let mut dataset = Self {
            graph: None,
            namespaces: vec![
                namespace(DOCUMENT_PREFIX, &format!("{}#", base_uri)),
                namespace(acp::PREFIX, acp::NAMESPACE),
                namespace(acl::PREFIX, acl::NAMESPACE),
                namespace(vcard::PREFIX, vcard::NAMESPACE),
            ],
        };
        dataset.parse_turtle(acr, base_uri)?;
        Ok(dataset)
    }
}

impl AccessDataset for AcpDataset {
    fn mode(&self) -> AccessControlMode {
        AccessControlMode::Acp
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
        ApplyMethod::Patch
    }
}

/// Compile step for ACP builders
#[derive(Debug, Clone, Copy, Default)]
pub struct AcpCompiler;

impl DatasetCompiler for AcpCompiler {
    fn mode(&self) -> AccessControlMode {
        AccessControlMode::Acp
    }

    fn compile(&self, rules: &[AccessRule], base_uri: &str) -> Result<Box<dyn AccessDataset>> {
        Ok(Box::new(AcpDataset::from_rules(rules, base_uri)?))
    }

    fn owner_rules(&self, _target: &str, _owner: &str) -> Vec<AccessRule> {
        Vec::new()
    }
}

/// The ACR document and the namespace its nodes are minted in
pub(crate) struct DocumentNodes {
    pub resource: NamedNode,
    pub namespace: String,
}

impl DocumentNodes {
    pub fn new(acr_uri: &str) -> Result<Self> {
        Ok(Self {
            resource: named_node(acr_uri, "access control resource")?,
            namespace: format!("{}#", acr_uri),
        })
    }

    /// `<acr>#{name}{index}`
    pub fn node(&self, name: &str, index: usize) -> Result<NamedNode> {
        named_node(&format!("{}{}{}", self.namespace, name, index), "policy node")
    }
}

/// Modes granted by the access policy of a rule
///
/// | requested                      | granted      |
/// |--------------------------------|--------------|
/// | `control`                      | read, write  |
/// | `controlRead`                  | read         |
/// | `controlWrite`                 | write        |
/// | `controlRead` + `controlWrite` | read, write  |
/// | `control` + either of the above| error        |
pub(crate) fn access_policy_modes(rule: &AccessRule, mode: AccessControlMode) -> Result<Vec<AccessMode>> {
    let control_read = rule.has_mode(&AccessMode::ControlRead);
    let control_write = rule.has_mode(&AccessMode::ControlWrite);

    if rule.has_mode(&AccessMode::Control) {
        if control_read || control_write {
            return Err(AclError::InvalidControlModes {
                dialect: mode.to_string(),
                reason: "control cannot be combined with controlRead or controlWrite".to_string(),
            });
        }
        return Ok(vec![AccessMode::Read, AccessMode::Write]);
    }

    let mut modes = Vec::new();
    if control_read {
        modes.push(AccessMode::Read);
    }
    if control_write {
        modes.push(AccessMode::Write);
    }
    Ok(modes)
}

/// Add `policy acp:allow <mode>` for each mode
pub(crate) fn add_allows<'m>(
    graph: &mut Graph,
    policy: NamedNodeRef<'_>,
    modes: impl IntoIterator<Item = &'m AccessMode>,
    mode_iri: fn(&AccessMode) -> Result<NamedNode>,
) -> Result<()> {
    for mode in modes {
        let mode = mode_iri(mode)?;
        graph.insert(TripleRef::new(policy, acp::ALLOW, mode.as_ref()));
    }
    Ok(())
}

/// Add `policy a acp:Policy ; acp:allOf matcher`
pub(crate) fn add_policy(graph: &mut Graph, policy: NamedNodeRef<'_>, matcher: NamedNodeRef<'_>) {
    graph.insert(TripleRef::new(policy, rdf::TYPE, acp::POLICY));
    graph.insert(TripleRef::new(policy, acp::ALL_OF, matcher));
}

/// Attach the rule's agent selector to its matcher
pub(crate) fn add_matcher_agent(graph: &mut Graph, matcher: NamedNodeRef<'_>, rule: &AccessRule, index: usize) -> Result<()> {
    match rule.agent_kind() {
        AgentKind::Agent => {
            let agent = rule
                .agent()
                .ok_or_else(|| AclError::InvalidRule(format!("AGENT rule for {} has no agent", rule.target())))?;
            let agent = named_node(agent, "agent")?;
            graph.insert(TripleRef::new(matcher, acp::AGENT, agent.as_ref()));
        }
        AgentKind::Public => {
            graph.insert(TripleRef::new(matcher, acp::AGENT, acp::PUBLIC_AGENT));
        }
        AgentKind::AuthenticatedUser => {
            graph.insert(TripleRef::new(matcher, acp::AGENT, acp::AUTHENTICATED_AGENT));
        }
        AgentKind::Group => {
            if rule.members().is_empty() {
                return Err(AclError::InvalidRule(format!("GROUP rule for {} has no members", rule.target())));
            }
            let group = BlankNode::new_unchecked(format!("group{}", index));
            graph.insert(TripleRef::new(matcher, acp::GROUP, group.as_ref()));
            graph.insert(TripleRef::new(group.as_ref(), rdf::TYPE, vcard::GROUP));
            for member in rule.members() {
                let member = named_node(member, "member")?;
                graph.insert(TripleRef::new(group.as_ref(), vcard::HAS_MEMBER, member.as_ref()));
            }
        }
    }
    Ok(())
}

fn add_access_control(graph: &mut Graph, document: &DocumentNodes, rule: &AccessRule, index: usize) -> Result<()> {
    // fail before touching the graph
    let control_modes = access_policy_modes(rule, AccessControlMode::Acp)?;

    let access_control = document.node("accessControl", index)?;
    let policy = document.node("policy", index)?;
    let matcher = document.node("rule", index)?;
    let link = if rule.is_inheritable() {
        acp::MEMBER_ACCESS_CONTROL
    } else {
        acp::ACCESS_CONTROL_PROP
    };

    graph.insert(TripleRef::new(document.resource.as_ref(), link, access_control.as_ref()));
    graph.insert(TripleRef::new(access_control.as_ref(), rdf::TYPE, acp::ACCESS_CONTROL));
    graph.insert(TripleRef::new(access_control.as_ref(), acp::APPLY, policy.as_ref()));
    add_policy(graph, policy.as_ref(), matcher.as_ref());
    graph.insert(TripleRef::new(matcher.as_ref(), rdf::TYPE, acp::MATCHER));
    add_allows(graph, policy.as_ref(), rule.content_modes(), mode_iri)?;

    if !control_modes.is_empty() {
        let access_policy = document.node("accessPolicy", index)?;
        graph.insert(TripleRef::new(access_control.as_ref(), acp::ACCESS, access_policy.as_ref()));
        add_policy(graph, access_policy.as_ref(), matcher.as_ref());
        add_allows(graph, access_policy.as_ref(), &control_modes, mode_iri)?;
    }

    add_matcher_agent(graph, matcher.as_ref(), rule, index)
}

fn mode_iri(mode: &AccessMode) -> Result<NamedNode> {
    let standard: NamedNodeRef<'static> = match mode {
        AccessMode::Read => acl::READ,
        AccessMode::Write => acl::WRITE,
        AccessMode::Append => acl::APPEND,
        _ => return custom_mode(mode),
    };
    Ok(standard.into_owned())
}
