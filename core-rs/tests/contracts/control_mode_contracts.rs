//! Control Mode Contract Tests
//!
//! The control family (`control`, `controlRead`, `controlWrite`) is where
//! the dialects disagree. These tests pin how each dialect expresses, or
//! refuses, every combination.

use oxigraph::model::{NamedNode, SubjectRef, TermRef};
use solid_acl::graph;
use solid_acl::vocab::{acl, acp};
use solid_acl::{AccessControlFactory, AccessControlMode, AccessDataset, AclError};

const ACL: &str = "https://pod.example.org/r.acl";
const RESOURCE: &str = "https://pod.example.org/r";
const ALICE: &str = "https://pod.example.org/alice#me";

fn compile(mode: AccessControlMode, access: &[&str]) -> solid_acl::Result<Box<dyn AccessDataset>> {
    AccessControlFactory::new(Some(mode))
        .access_dataset_builder(ACL)
        .unwrap()
        .set_agent_access(RESOURCE, ALICE, access.iter().copied())
        .build()
}

fn access_policy_allows(dataset: &dyn AccessDataset, read: TermRef<'_>, write: TermRef<'_>) -> (bool, bool) {
    let g = dataset.graph().unwrap();
    let access_policy = NamedNode::new(format!("{}#accessPolicy1", ACL)).unwrap();
    let allows = |mode: TermRef<'_>| {
        g.iter()
            .any(|t| t.subject == SubjectRef::from(access_policy.as_ref()) && t.predicate == acp::ALLOW && t.object == mode)
    };
    (allows(read), allows(write))
}

/// WHY: WAC has one combined Control mode
/// REASON: controlRead without controlWrite (or the reverse) cannot be expressed
/// BREAKS: Tests would silently grant more than they asked for
#[test]
fn wac_rejects_half_control() {
    for access in [&["controlRead"][..], &["controlWrite"][..], &["read", "controlRead"][..]] {
        assert!(
            matches!(compile(AccessControlMode::Wac, access), Err(AclError::InvalidControlModes { .. })),
            "WAC accepted {:?}",
            access
        );
    }
}

/// WHY: In WAC every control token collapses to a single acl:Control
/// REASON: control, controlRead and controlWrite all mean acl:Control there
#[test]
fn wac_control_family_collapses() {
    for access in [&["control"][..], &["controlRead", "controlWrite"][..], &["control", "controlRead", "controlWrite"][..]] {
        let dataset = compile(AccessControlMode::Wac, access).unwrap();
        let g = dataset.graph().unwrap();
        assert_eq!(graph::count_matching(g, Some(acl::MODE), Some(acl::CONTROL.into())), 1);
        assert_eq!(graph::count_matching(g, Some(acl::MODE), None), 1);
    }
}

/// WHY: Policy dialects refuse control combined with controlRead/controlWrite
/// REASON: The intent is ambiguous; no graph may be produced
/// SACRIFICES: If this fails, the compiler is guessing what the caller meant
#[test]
fn policy_dialects_reject_ambiguous_control() {
    for mode in [AccessControlMode::Acp, AccessControlMode::AcpLegacy] {
        for access in [&["control", "controlRead"][..], &["control", "controlWrite"][..]] {
            assert!(
                matches!(compile(mode, access), Err(AclError::InvalidControlModes { .. })),
                "{} accepted {:?}",
                mode,
                access
            );
        }
    }
}

/// WHY: Policy dialects derive access policy modes from the control family
/// REASON: control = read+write on the ACR, controlRead = read, controlWrite = write
/// BREAKS: Owners locking themselves out of their own ACR
#[test]
fn policy_dialects_derive_access_policy() {
    let cases: [(&[&str], bool, bool); 4] = [
        (&["control"], true, true),
        (&["controlRead"], true, false),
        (&["controlWrite"], false, true),
        (&["controlRead", "controlWrite"], true, true),
    ];

    for (access, read, write) in cases {
        let current = compile(AccessControlMode::Acp, access).unwrap();
        assert_eq!(
            access_policy_allows(current.as_ref(), acl::READ.into(), acl::WRITE.into()),
            (read, write),
            "acp {:?}",
            access
        );

        let legacy = compile(AccessControlMode::AcpLegacy, access).unwrap();
        assert_eq!(
            access_policy_allows(legacy.as_ref(), acp::READ.into(), acp::WRITE.into()),
            (read, write),
            "acp-legacy {:?}",
            access
        );
    }
}

/// WHY: Without control modes there is no access policy at all
/// REASON: An empty access policy would still be linked and evaluated
#[test]
fn no_control_means_no_access_policy() {
    let current = compile(AccessControlMode::Acp, &["read", "write"]).unwrap();
    assert!(!graph::contains_matching(current.graph().unwrap(), Some(acp::ACCESS), None));

    let legacy = compile(AccessControlMode::AcpLegacy, &["read", "write"]).unwrap();
    let g = legacy.graph().unwrap();
    assert!(!graph::contains_matching(g, Some(acp::ACCESS), None));
    assert!(!graph::contains_matching(g, Some(acp::ACCESS_MEMBERS), None));
}

/// WHY: Control never appears as a content mode
/// REASON: Content policies govern the resource, access policies the ACR
#[test]
fn control_is_never_allowed_on_content() {
    for mode in [AccessControlMode::Acp, AccessControlMode::AcpLegacy] {
        let dataset = compile(mode, &["control"]).unwrap();
        let g = dataset.graph().unwrap();
        let policy = NamedNode::new(format!("{}#policy1", ACL)).unwrap();
        assert!(!g.iter().any(|t| t.subject == SubjectRef::from(policy.as_ref()) && t.predicate == acp::ALLOW));
        assert!(!graph::contains_matching(g, None, Some(acl::CONTROL.into())));
    }
}
