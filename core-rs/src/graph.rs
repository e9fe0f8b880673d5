//! RDF graph helpers
//!
//! Thin layer over Oxigraph's in-memory [`Graph`]:
//! - Turtle parsing relative to a base IRI
//! - Turtle serialization with namespace prefixes
//! - SPARQL `INSERT DATA` rendering of the same statements
//! - subset and isomorphism checks that map blank nodes

use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model::{BlankNodeRef, Graph, GraphNameRef, NamedNodeRef, SubjectRef, TermRef, Triple, TripleRef};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::errors::{AclError, Result};

/// Ordered `(prefix, namespace IRI)` declarations used when serializing
pub type Namespaces = Vec<(String, String)>;

static PREFIX_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:@prefix|PREFIX)\s+([^:\s]*):\s*<([^>]*)>\s*\.?\s*$")
        .expect("prefix pattern is valid")
});

/// Parse Turtle text relative to `base_iri`
pub fn parse_turtle(text: &str, base_iri: &str) -> Result<Graph> {
    let parser = RdfParser::from_format(RdfFormat::Turtle)
        .with_base_iri(base_iri)
        .map_err(|e| AclError::InvalidIri(format!("{}: {}", base_iri, e)))?;

    let mut graph = Graph::new();
    for quad in parser.for_reader(text.as_bytes()) {
        let quad = quad.map_err(|e| AclError::Parse {
            message: e.to_string(),
            content: text.to_string(),
        })?;
        graph.insert(&Triple::new(quad.subject, quad.predicate, quad.object));
    }
    Ok(graph)
}

/// Serialize a graph as Turtle, declaring `namespaces` as prefixes
pub fn serialize_turtle(graph: &Graph, namespaces: &[(String, String)]) -> Result<String> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::Turtle);
    for (prefix, iri) in namespaces {
        serializer = serializer
            .with_prefix(prefix.as_str(), iri.as_str())
            .map_err(|e| AclError::InvalidIri(format!("{}: {}", iri, e)))?;
    }

    let mut writer = serializer.for_writer(Vec::new());
    for triple in graph.iter() {
        writer
            .serialize_quad(triple.in_graph(GraphNameRef::DefaultGraph))
            .map_err(|e| AclError::Serialization(e.to_string()))?;
    }
    let bytes = writer
        .finish()
        .map_err(|e| AclError::Serialization(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| AclError::Serialization(e.to_string()))
}

/// Turn Turtle text into a SPARQL `INSERT DATA` update
///
/// Prefix declarations become `PREFIX p: <iri>` lines ahead of the update;
/// every other line is carried into the `INSERT DATA { ... }` block.
pub fn turtle_to_sparql_insert(turtle: &str) -> String {
    let mut prefixes = String::new();
    let mut body = String::new();

    for line in turtle.lines() {
        if let Some(caps) = PREFIX_LINE.captures(line) {
            prefixes.push_str(&format!("PREFIX {}: <{}>\n", &caps[1], &caps[2]));
        } else if !line.trim().is_empty() {
            body.push_str(line);
            body.push('\n');
        }
    }

    format!("{}INSERT DATA {{\n{}}}", prefixes, body)
}

/// True when every statement of `sub` appears in `sup`
///
/// Blank nodes of `sub` may be renamed: the check succeeds if some
/// injective mapping of them onto blank nodes of `sup` makes `sub` a plain
/// subset.
///
/// Each blank node is first narrowed to the `sup` nodes that carry all of
/// its ground statements, and a bipartite matching must cover every node.
/// Only statements linking two blank nodes need a search.
pub fn is_subset(sub: &Graph, sup: &Graph) -> bool {
    let mut sub_nodes = BlankNodes::default();
    let mut links: Vec<TripleRef<'_>> = Vec::new();
    for triple in sub.iter() {
        match (subject_blank(triple.subject), term_blank(triple.object)) {
            (None, None) => {
                if !sup.contains(triple) {
                    return false;
                }
            }
            (Some(subject), Some(object)) => {
                sub_nodes.touch(subject);
                sub_nodes.touch(object);
                links.push(triple);
            }
            (Some(subject), None) => sub_nodes.add(subject, Edge::Out(triple.predicate, triple.object)),
            (None, Some(object)) => sub_nodes.add(object, Edge::In(triple.subject, triple.predicate)),
        }
    }
    if sub_nodes.order.is_empty() {
        return true;
    }

    let sup_nodes = BlankNodes::from_graph(sup);
    let order = search_order(&sub_nodes.order, &links);
    let candidates: Vec<Vec<usize>> = order
        .iter()
        .map(|node| sup_nodes.compatible_with(sub_nodes.edges(*node)))
        .collect();

    if !has_complete_matching(&candidates, sup_nodes.order.len()) {
        return false;
    }
    if links.is_empty() {
        return true;
    }

    let position: HashMap<BlankNodeRef<'_>, usize> = order.iter().enumerate().map(|(i, node)| (*node, i)).collect();
    let mut checks: Vec<Vec<TripleRef<'_>>> = vec![Vec::new(); order.len()];
    for triple in &links {
        if let (Some(subject), Some(object)) = (subject_blank(triple.subject), term_blank(triple.object)) {
            checks[position[&subject].max(position[&object])].push(*triple);
        }
    }

    let mut search = LinkSearch {
        sup,
        order: &order,
        candidates: &candidates,
        checks: &checks,
        targets: &sup_nodes.order,
        mapping: HashMap::new(),
        used: vec![false; sup_nodes.order.len()],
    };
    search.assign(0)
}

/// True when `a` and `b` are equal up to blank node renaming
pub fn is_isomorphic(a: &Graph, b: &Graph) -> bool {
    a.len() == b.len() && is_subset(a, b)
}

/// Number of statements matching `predicate` and `object` (`None` matches anything)
pub fn count_matching(graph: &Graph, predicate: Option<NamedNodeRef<'_>>, object: Option<TermRef<'_>>) -> usize {
    graph
        .iter()
        .filter(|t| predicate.map_or(true, |p| t.predicate == p))
        .filter(|t| object.map_or(true, |o| t.object == o))
        .count()
}

pub fn contains_matching(graph: &Graph, predicate: Option<NamedNodeRef<'_>>, object: Option<TermRef<'_>>) -> bool {
    count_matching(graph, predicate, object) > 0
}

/// Statement linking a blank node to a ground term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Edge<'a> {
    Out(NamedNodeRef<'a>, TermRef<'a>),
    In(SubjectRef<'a>, NamedNodeRef<'a>),
}

/// Blank nodes in first-seen order with their ground statements
#[derive(Default)]
struct BlankNodes<'a> {
    order: Vec<BlankNodeRef<'a>>,
    edges: HashMap<BlankNodeRef<'a>, HashSet<Edge<'a>>>,
}

impl<'a> BlankNodes<'a> {
    fn from_graph(graph: &'a Graph) -> Self {
        let mut nodes = Self::default();
        for triple in graph.iter() {
            match (subject_blank(triple.subject), term_blank(triple.object)) {
                (None, None) => {}
                (Some(subject), Some(object)) => {
                    nodes.touch(subject);
                    nodes.touch(object);
                }
                (Some(subject), None) => nodes.add(subject, Edge::Out(triple.predicate, triple.object)),
                (None, Some(object)) => nodes.add(object, Edge::In(triple.subject, triple.predicate)),
            }
        }
        nodes
    }

    fn touch(&mut self, node: BlankNodeRef<'a>) -> &mut HashSet<Edge<'a>> {
        if !self.edges.contains_key(&node) {
            self.order.push(node);
        }
        self.edges.entry(node).or_default()
    }

    fn add(&mut self, node: BlankNodeRef<'a>, edge: Edge<'a>) {
        self.touch(node).insert(edge);
    }

    fn edges(&self, node: BlankNodeRef<'a>) -> Option<&HashSet<Edge<'a>>> {
        self.edges.get(&node)
    }

    /// Indexes of nodes carrying every edge in `required`
    fn compatible_with(&self, required: Option<&HashSet<Edge<'_>>>) -> Vec<usize> {
        self.order
            .iter()
            .enumerate()
            .filter(|(_, node)| match (required, self.edges.get(*node)) {
                (None, _) => true,
                (Some(required), Some(edges)) => required.iter().all(|edge| edges.contains(edge)),
                (Some(required), None) => required.is_empty(),
            })
            .map(|(index, _)| index)
            .collect()
    }
}

/// Blank nodes ordered so linked nodes follow each other
fn search_order<'a>(nodes: &[BlankNodeRef<'a>], links: &[TripleRef<'a>]) -> Vec<BlankNodeRef<'a>> {
    let mut order = Vec::with_capacity(nodes.len());
    let mut placed = HashSet::new();
    for start in nodes {
        if !placed.insert(*start) {
            continue;
        }
        let mut queue = VecDeque::from([*start]);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for triple in links {
                let (subject, object) = (subject_blank(triple.subject), term_blank(triple.object));
                let neighbour = if subject == Some(node) {
                    object
                } else if object == Some(node) {
                    subject
                } else {
                    None
                };
                if let Some(neighbour) = neighbour {
                    if placed.insert(neighbour) {
                        queue.push_back(neighbour);
                    }
                }
            }
        }
    }
    order
}

/// Kuhn's augmenting paths: can every node get a distinct candidate
fn has_complete_matching(candidates: &[Vec<usize>], targets: usize) -> bool {
    let mut owner: Vec<Option<usize>> = vec![None; targets];
    (0..candidates.len()).all(|node| {
        let mut seen = vec![false; targets];
        augment(node, candidates, &mut owner, &mut seen)
    })
}

fn augment(node: usize, candidates: &[Vec<usize>], owner: &mut [Option<usize>], seen: &mut [bool]) -> bool {
    for &target in &candidates[node] {
        if seen[target] {
            continue;
        }
        seen[target] = true;
        let free = match owner[target] {
            None => true,
            Some(other) => augment(other, candidates, owner, seen),
        };
        if free {
            owner[target] = Some(node);
            return true;
        }
    }
    false
}

/// Backtracking over candidates, checking blank-to-blank statements as both ends bind
struct LinkSearch<'s, 'a> {
    sup: &'s Graph,
    order: &'s [BlankNodeRef<'a>],
    candidates: &'s [Vec<usize>],
    checks: &'s [Vec<TripleRef<'a>>],
    targets: &'s [BlankNodeRef<'a>],
    mapping: HashMap<BlankNodeRef<'a>, BlankNodeRef<'a>>,
    used: Vec<bool>,
}

impl<'s, 'a> LinkSearch<'s, 'a> {
    fn assign(&mut self, position: usize) -> bool {
        let Some(node) = self.order.get(position).copied() else {
            return true;
        };

        let candidates = self.candidates;
        for &target in &candidates[position] {
            if self.used[target] {
                continue;
            }
            self.used[target] = true;
            self.mapping.insert(node, self.targets[target]);

            if self.links_hold(position) && self.assign(position + 1) {
                return true;
            }

            self.mapping.remove(&node);
            self.used[target] = false;
        }
        false
    }

    fn links_hold(&self, position: usize) -> bool {
        self.checks[position].iter().all(|triple| {
            let subject = subject_blank(triple.subject).and_then(|node| self.mapping.get(&node));
            let object = term_blank(triple.object).and_then(|node| self.mapping.get(&node));
            match (subject, object) {
                (Some(subject), Some(object)) => self.sup.contains(TripleRef::new(*subject, triple.predicate, *object)),
                _ => false,
            }
        })
    }
}

fn subject_blank(subject: SubjectRef<'_>) -> Option<BlankNodeRef<'_>> {
    match subject {
        SubjectRef::BlankNode(node) => Some(node),
        _ => None,
    }
}

fn term_blank(term: TermRef<'_>) -> Option<BlankNodeRef<'_>> {
    match term {
        TermRef::BlankNode(node) => Some(node),
        _ => None,
    }
}
