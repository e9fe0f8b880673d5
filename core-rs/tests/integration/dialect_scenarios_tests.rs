//! Integration tests for the three access control dialects
//!
//! Drives the public surface end to end:
//! - Factory selects the dialect
//! - Builder accumulates rules
//! - Compiled datasets have the expected shape
//! - Serialized documents parse back into equivalent datasets

use oxigraph::model::{NamedNode, TripleRef};
use solid_acl::graph;
use solid_acl::vocab::{acl, acp, rdf, vcard};
use solid_acl::{AccessControlFactory, AccessControlMode, AccessDataset, AccessDatasetBuilder};

const ACL: &str = "https://pod.example.org/r.acl";
const RESOURCE: &str = "https://pod.example.org/r";
const ALICE: &str = "https://pod.example.org/alice#me";
const BOB: &str = "https://pod.example.org/bob#me";

fn builder(mode: AccessControlMode) -> AccessDatasetBuilder {
    AccessControlFactory::new(Some(mode))
        .access_dataset_builder(ACL)
        .expect("mode is configured")
}

fn scenario(mode: AccessControlMode) -> Box<dyn AccessDataset> {
    builder(mode)
        .set_agent_access(RESOURCE, ALICE, ["read", "write", "control"])
        .set_inheritable_group_access(RESOURCE, vec![ALICE.to_string(), BOB.to_string()], ["read"])
        .set_public_access(RESOURCE, ["write"])
        .build()
        .unwrap()
}

fn acr_node(name: &str) -> NamedNode {
    NamedNode::new(format!("{}#{}", ACL, name)).unwrap()
}

/// Test: WAC scenario yields three authorizations and one two-member group
#[test]
fn test_wac_scenario_shape() {
    let dataset = scenario(AccessControlMode::Wac);
    let g = dataset.graph().unwrap();

    assert_eq!(graph::count_matching(g, Some(rdf::TYPE), Some(acl::AUTHORIZATION.into())), 3);
    assert_eq!(graph::count_matching(g, Some(rdf::TYPE), Some(vcard::GROUP.into())), 1);
    assert_eq!(graph::count_matching(g, Some(vcard::HAS_MEMBER), None), 2);

    assert_eq!(graph::count_matching(g, Some(acl::MODE), None), 5);
    assert_eq!(graph::count_matching(g, Some(acl::MODE), Some(acl::READ.into())), 2);
    assert_eq!(graph::count_matching(g, Some(acl::MODE), Some(acl::WRITE.into())), 2);
    assert_eq!(graph::count_matching(g, Some(acl::MODE), Some(acl::CONTROL.into())), 1);

    // the group rule is the only inheritable one
    assert_eq!(graph::count_matching(g, Some(acl::DEFAULT), None), 1);
    assert_eq!(graph::count_matching(g, Some(acl::ACCESS_TO), None), 2);
}

/// Test: current ACP keeps control out of the content policy
#[test]
fn test_acp_scenario_control_policy() {
    let dataset = scenario(AccessControlMode::Acp);
    let g = dataset.graph().unwrap();

    let access_policy = acr_node("accessPolicy1");
    assert!(g.contains(TripleRef::new(access_policy.as_ref(), acp::ALLOW, acl::READ)));
    assert!(g.contains(TripleRef::new(access_policy.as_ref(), acp::ALLOW, acl::WRITE)));
    assert_eq!(graph::count_matching(g, Some(acp::ACCESS), None), 1);
    assert!(!graph::contains_matching(g, Some(acp::ALLOW), Some(acl::CONTROL.into())));

    // the group rule links through memberAccessControl
    let access_control2 = acr_node("accessControl2");
    let acr = NamedNode::new(ACL).unwrap();
    assert!(g.contains(TripleRef::new(acr.as_ref(), acp::MEMBER_ACCESS_CONTROL, access_control2.as_ref())));
}

/// Test: legacy ACP links both policies from the ACR itself
#[test]
fn test_acp_legacy_scenario_control_policy() {
    let dataset = scenario(AccessControlMode::AcpLegacy);
    let g = dataset.graph().unwrap();
    let acr = NamedNode::new(ACL).unwrap();

    let access_policy = acr_node("accessPolicy1");
    assert!(g.contains(TripleRef::new(acr.as_ref(), acp::ACCESS, access_policy.as_ref())));
    assert!(g.contains(TripleRef::new(access_policy.as_ref(), acp::ALLOW, acp::READ)));
    assert!(g.contains(TripleRef::new(access_policy.as_ref(), acp::ALLOW, acp::WRITE)));
    assert!(g.contains(TripleRef::new(acr.as_ref(), acp::APPLY_MEMBERS, acr_node("policy2").as_ref())));
}

/// Test: serialized Turtle parses back to an isomorphic dataset in every dialect
#[test]
fn test_turtle_round_trip_all_dialects() {
    for mode in [AccessControlMode::Wac, AccessControlMode::Acp, AccessControlMode::AcpLegacy] {
        let dataset = scenario(mode);
        let turtle = dataset.as_turtle().unwrap();

        let parsed = AccessControlFactory::new(Some(mode))
            .create_access_dataset(&turtle, ACL)
            .unwrap()
            .unwrap();
        assert!(
            graph::is_isomorphic(dataset.graph().unwrap(), parsed.graph().unwrap()),
            "{} round trip changed the graph:\n{}",
            mode,
            turtle
        );
        assert!(dataset.is_subset_of(parsed.as_ref()));
        assert!(parsed.is_subset_of(dataset.as_ref()));
    }
}

/// Test: recompiling the same rules gives an isomorphic graph
#[test]
fn test_recompile_is_isomorphic() {
    for mode in [AccessControlMode::Wac, AccessControlMode::Acp, AccessControlMode::AcpLegacy] {
        let first = scenario(mode);
        let second = scenario(mode);
        assert!(graph::is_isomorphic(first.graph().unwrap(), second.graph().unwrap()));
    }
}

/// Test: SPARQL rendering carries every prefix and no Turtle directives
#[test]
fn test_sparql_insert_for_policy_dialects() {
    for mode in [AccessControlMode::Acp, AccessControlMode::AcpLegacy] {
        let insert = scenario(mode).as_sparql_insert().unwrap();
        assert!(insert.contains("PREFIX acr: <https://pod.example.org/r.acl#>"));
        assert!(insert.contains("PREFIX vcard: <http://www.w3.org/2006/vcard/ns#>"));
        assert!(insert.contains("INSERT DATA {"));
        assert!(!insert.contains("@prefix"));
    }
}

/// Test: a server document holding extra grants still contains ours
#[test]
fn test_server_document_superset() {
    let ours = builder(AccessControlMode::Wac)
        .set_public_access(RESOURCE, ["read"])
        .build()
        .unwrap();

    let server_doc = format!(
        r#"@prefix acl: <http://www.w3.org/ns/auth/acl#> .
@prefix foaf: <http://xmlns.com/foaf/0.1/> .
_:owner a acl:Authorization ; acl:accessTo <{r}> ; acl:agent <{alice}> ; acl:mode acl:Read, acl:Write, acl:Control .
_:public a acl:Authorization ; acl:accessTo <{r}> ; acl:agentClass foaf:Agent ; acl:mode acl:Read .
"#,
        r = RESOURCE,
        alice = ALICE
    );
    let theirs = AccessControlFactory::new(Some(AccessControlMode::Wac))
        .create_access_dataset(&server_doc, ACL)
        .unwrap()
        .unwrap();

    assert!(ours.is_subset_of(theirs.as_ref()));
    assert!(!theirs.is_subset_of(ours.as_ref()));
}
