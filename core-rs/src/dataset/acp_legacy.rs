//! Access Control Policy datasets (legacy draft)
//!
//! Older ACP servers link policies straight from the ACR document and name
//! matchers `acp:Rule`:
//!
//! ```text
//! <acr> acp:apply acr:policy1 .                     # acp:applyMembers when inheritable
//! <acr> acp:access acr:accessPolicy1 .              # acp:accessMembers when inheritable
//! acr:policy1 a acp:Policy ; acp:allOf acr:rule1 ; acp:allow acp:Read .
//! acr:accessPolicy1 a acp:Policy ; acp:allOf acr:rule1 ; acp:allow acp:Read, acp:Write .
//! acr:rule1 a acp:Rule ; acp:agent <webid> .
//! ```

use oxigraph::model::{Graph, NamedNode, NamedNodeRef, TripleRef};
use tracing::debug;

use super::acp::{access_policy_modes, add_allows, add_matcher_agent, add_policy, DocumentNodes, DOCUMENT_PREFIX};
use super::{custom_mode, namespace, AccessControlMode, AccessDataset, ApplyMethod, DatasetCompiler};
use crate::errors::Result;
use crate::graph::Namespaces;
use crate::rule::{AccessMode, AccessRule, AgentKind};
use crate::vocab::{acp, rdf, vcard};

/// Legacy ACP access dataset, applied with a SPARQL patch
#[derive(Debug, Clone, Default)]
pub struct AcpLegacyDataset {
    graph: Option<Graph>,
    namespaces: Namespaces,
}

impl AcpLegacyDataset {
    pub fn from_rules(rules: &[AccessRule], acr_uri: &str) -> Result<Self> {
        if rules.is_empty() {
            return Ok(Self::default());
        }

        let document = DocumentNodes::new(acr_uri)?;
        let mut graph = Graph::new();
        for (index, rule) in rules.iter().enumerate() {
            add_policies(&mut graph, &document, rule, index + 1)?;
        }
        debug!(rules = rules.len(), statements = graph.len(), acr = acr_uri, "compiled legacy ACP dataset");

        let mut namespaces = vec![
            namespace(DOCUMENT_PREFIX, &document.namespace),
            namespace(acp::PREFIX, acp::NAMESPACE),
        ];
        if rules.iter().any(|r| r.agent_kind() == AgentKind::Group) {
            namespaces.push(namespace(vcard::PREFIX, vcard::NAMESPACE));
        }

        Ok(Self {
            graph: Some(graph),
            namespaces,
        })
    }

    pub fn from_turtle(acr: &str, base_uri: &str) -> Result<Self> {
        let mut dataset = Self {
            graph: None,
            namespaces: vec![
                namespace(DOCUMENT_PREFIX, &format!("{}#", base_uri)),
                namespace(acp::PREFIX, acp::NAMESPACE),
                namespace(vcard::PREFIX, vcard::NAMESPACE),
            ],
        };
        dataset.parse_turtle(acr, base_uri)?;
        Ok(dataset)
    }
}

impl AccessDataset for AcpLegacyDataset {
    fn mode(&self) -> AccessControlMode {
        AccessControlMode::AcpLegacy
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

/// Compile step for legacy ACP builders
#[derive(Debug, Clone, Copy, Default)]
pub struct AcpLegacyCompiler;

impl DatasetCompiler for AcpLegacyCompiler {
    fn mode(&self) -> AccessControlMode {
        AccessControlMode::AcpLegacy
    }

    fn compile(&self, rules: &[AccessRule], base_uri: &str) -> Result<Box<dyn AccessDataset>> {
        Ok(Box::new(AcpLegacyDataset::from_rules(rules, base_uri)?))
    }

    fn owner_rules(&self, _target: &str, _owner: &str) -> Vec<AccessRule> {
        Vec::new()
    }
}

fn add_policies(graph: &mut Graph, document: &DocumentNodes, rule: &AccessRule, index: usize) -> Result<()> {
    let control_modes = access_policy_modes(rule, AccessControlMode::AcpLegacy)?;

    let policy = document.node("policy", index)?;
    let matcher = document.node("rule", index)?;
    let (apply, access) = if rule.is_inheritable() {
        (acp::APPLY_MEMBERS, acp::ACCESS_MEMBERS)
    } else {
        (acp::APPLY, acp::ACCESS)
    };

    graph.insert(TripleRef::new(document.resource.as_ref(), apply, policy.as_ref()));
    add_policy(graph, policy.as_ref(), matcher.as_ref());
    graph.insert(TripleRef::new(matcher.as_ref(), rdf::TYPE, acp::RULE));
    add_allows(graph, policy.as_ref(), rule.content_modes(), mode_iri)?;

    if !control_modes.is_empty() {
        let access_policy = document.node("accessPolicy", index)?;
        graph.insert(TripleRef::new(document.resource.as_ref(), access, access_policy.as_ref()));
        add_policy(graph, access_policy.as_ref(), matcher.as_ref());
        add_allows(graph, access_policy.as_ref(), &control_modes, mode_iri)?;
    }

    add_matcher_agent(graph, matcher.as_ref(), rule, index)
}

fn mode_iri(mode: &AccessMode) -> Result<NamedNode> {
    let standard: NamedNodeRef<'static> = match mode {
        AccessMode::Read => acp::READ,
        AccessMode::Write => acp::WRITE,
        AccessMode::Append => acp::APPEND,
        _ => return custom_mode(mode),
    };
    Ok(standard.into_owned())
}
