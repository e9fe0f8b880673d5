//! Graph Law Contract Tests
//!
//! These tests pin the comparison and compilation laws conformance checks
//! rely on. A server's ACL is judged by `is_subset_of`; if these laws drift,
//! every access control test downstream gives the wrong verdict.

use solid_acl::graph;
use solid_acl::{AccessControlFactory, AccessControlMode, AccessDataset, WacDataset};

const ACL: &str = "https://pod.example.org/r.acl";
const RESOURCE: &str = "https://pod.example.org/r";
const ALICE: &str = "https://pod.example.org/alice#me";

const MODES: [AccessControlMode; 3] = [AccessControlMode::Wac, AccessControlMode::Acp, AccessControlMode::AcpLegacy];

fn compile(mode: AccessControlMode, agent: &str, access: &[&str]) -> Box<dyn AccessDataset> {
    AccessControlFactory::new(Some(mode))
        .access_dataset_builder(ACL)
        .unwrap()
        .set_agent_access(RESOURCE, agent, access.iter().copied())
        .build()
        .unwrap()
}

/// WHY: Every non-empty dataset is a subset of itself
/// REASON: Applying grants then reading them back unchanged must pass
/// BREAKS: Every "server kept our ACL" assertion if this fails
#[test]
fn subset_is_reflexive() {
    for mode in MODES {
        let dataset = compile(mode, ALICE, &["read", "write"]);
        assert!(dataset.is_subset_of(dataset.as_ref()), "{} is not reflexive", mode);
    }
}

/// WHY: Disjoint datasets are never subsets of each other
/// REASON: Grants for one agent must not satisfy a check for another
/// BREAKS: Tests would pass against servers that dropped our grants
#[test]
fn disjoint_datasets_are_not_subsets() {
    let alice = WacDataset::from_turtle(
        "<https://pod.example.org/a> <https://pod.example.org/p> <https://pod.example.org/b> .",
        ACL,
    )
    .unwrap();
    let bob = WacDataset::from_turtle(
        "<https://pod.example.org/c> <https://pod.example.org/p> <https://pod.example.org/d> .",
        ACL,
    )
    .unwrap();
    assert!(!alice.is_subset_of(&bob));
    assert!(!bob.is_subset_of(&alice));
}

/// WHY: Empty and absent graphs are never subsets, of anything
/// REASON: "No grants" must not vacuously pass a presence check
/// SACRIFICES: If this fails, an empty ACL would satisfy every assertion
#[test]
fn empty_and_absent_are_never_subsets() {
    let full = compile(AccessControlMode::Wac, ALICE, &["read"]);
    let empty = WacDataset::from_turtle("", ACL).unwrap();
    let absent = WacDataset::from_rules(&[]).unwrap();

    assert!(empty.graph().is_some());
    assert!(absent.graph().is_none());

    assert!(!empty.is_subset_of(full.as_ref()));
    assert!(!empty.is_subset_of(&empty));
    assert!(!absent.is_subset_of(full.as_ref()));
    assert!(!absent.is_subset_of(&absent));
    assert!(!full.is_subset_of(&empty));
    assert!(!full.is_subset_of(&absent));
}

/// WHY: Compiling the same rules twice yields isomorphic graphs
/// REASON: Node names derive from base URI and rule position only
/// BREAKS: Reproducible comparisons between compiled and stored documents
#[test]
fn compilation_is_idempotent() {
    for mode in MODES {
        let first = compile(mode, ALICE, &["read", "append", "control"]);
        let second = compile(mode, ALICE, &["read", "append", "control"]);
        assert!(graph::is_isomorphic(first.graph().unwrap(), second.graph().unwrap()));
        assert!(first.is_subset_of(second.as_ref()));
    }
}

/// WHY: Blank node labels do not matter for subset checks
/// REASON: Servers relabel blank nodes when they store a document
/// BREAKS: WAC conformance checks after any server round trip
#[test]
fn subset_ignores_blank_node_labels() {
    let ours = compile(AccessControlMode::Wac, ALICE, &["read"]);
    let relabelled = ours.as_turtle().unwrap().replace("_:auth1", "_:serverLabel");
    let theirs = WacDataset::from_turtle(&relabelled, ACL).unwrap();
    assert!(ours.is_subset_of(&theirs));
    assert!(theirs.is_subset_of(ours.as_ref()));
}

/// WHY: Different grants are distinguishable
/// REASON: Read-only must not satisfy a read-write check
#[test]
fn fewer_modes_are_a_strict_subset() {
    let read = compile(AccessControlMode::Wac, ALICE, &["read"]);
    let read_write = compile(AccessControlMode::Wac, ALICE, &["read", "write"]);
    assert!(read.is_subset_of(read_write.as_ref()));
    assert!(!read_write.is_subset_of(read.as_ref()));
}

/// WHY: Repeated identical grants are compared in bounded time
/// REASON: Their blank nodes are interchangeable; a search over every pairing is factorial
/// BREAKS: Conformance runs against servers that changed one of many grants would hang
#[test]
fn identical_grants_compare_without_exhaustive_search() {
    let grants = |count: usize, last: &str| {
        let builder = AccessControlFactory::new(Some(AccessControlMode::Wac))
            .access_dataset_builder(ACL)
            .unwrap();
        (0..count)
            .fold(builder, |builder, i| {
                let mode = if i + 1 == count { last } else { "read" };
                builder.set_authenticated_access(RESOURCE, [mode])
            })
            .build()
            .unwrap()
    };

    let ours = grants(16, "read");
    let changed = grants(16, "write");
    assert!(!ours.is_subset_of(changed.as_ref()));
    assert!(ours.is_subset_of(grants(17, "write").as_ref()));
}
