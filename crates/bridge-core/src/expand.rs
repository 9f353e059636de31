//! Confirmed-group expansion.
//!
//! The agency crosswalk is ground truth: two records the agency places in the
//! same confirmed group must share a bridge even when their heuristic keys
//! differ. Expansion rewrites heuristic keys observed inside a confirmed
//! group to that group's id, for every record carrying the key.
//!
//! Only heuristic keys are ever rewritten. A key already resolved to a
//! confirmed id is left alone, which makes a second pass a no-op.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use bridge_model::{BridgeKey, ExpansionMode, NarrowKey};
use tracing::debug;

use crate::key::KeyedRecord;

/// Mapping from heuristic key to the confirmed id that claimed it.
pub type KeyMapping = BTreeMap<NarrowKey, String>;

/// Counters describing one expansion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Distinct confirmed ids seen on records with a heuristic key.
    pub confirmed_groups: usize,
    /// Heuristic keys mapped to a confirmed id.
    pub mapped_keys: usize,
    /// Later claims on an already mapped key that were dropped.
    pub dropped_claims: usize,
    /// Records whose key was rewritten.
    pub rewritten_records: usize,
}

/// Distinct heuristic keys observed under each confirmed id, in id order.
fn keys_by_group(records: &[KeyedRecord]) -> BTreeMap<&str, BTreeSet<&NarrowKey>> {
    let mut groups: BTreeMap<&str, BTreeSet<&NarrowKey>> = BTreeMap::new();
    for record in records {
        if !record.source.has_confirmed() {
            continue;
        }
        if let Some(key) = record.key.as_heuristic() {
            groups
                .entry(record.source.cross_year_confirmed.as_str())
                .or_default()
                .insert(key);
        }
    }
    groups
}

/// Single-pass mapping: groups are processed in id order and the first group
/// to claim a key keeps it. Returns the mapping and the dropped claim count.
pub fn first_claim_mapping(records: &[KeyedRecord]) -> (KeyMapping, usize) {
    let mut mapping = KeyMapping::new();
    let mut dropped = 0usize;
    for (confirmed_id, keys) in keys_by_group(records) {
        for key in keys {
            match mapping.entry(key.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(confirmed_id.to_string());
                }
                Entry::Occupied(existing) => {
                    if existing.get() != confirmed_id {
                        debug!(
                            key = %key,
                            kept = %existing.get(),
                            dropped = %confirmed_id,
                            "key already claimed by another confirmed group"
                        );
                        dropped += 1;
                    }
                }
            }
        }
    }
    (mapping, dropped)
}

/// Closure mapping: keys and confirmed ids linked through any chain of
/// shared membership form one component; every key in a component with a
/// confirmed id maps to the smallest id in it.
pub fn transitive_mapping(records: &[KeyedRecord]) -> KeyMapping {
    let groups = keys_by_group(records);
    let mut nodes: BTreeMap<Node<'_>, usize> = BTreeMap::new();
    let mut sets = DisjointSet::default();
    for (confirmed_id, keys) in &groups {
        let group_node = node_index(&mut nodes, &mut sets, Node::Group(*confirmed_id));
        for key in keys {
            let key_node = node_index(&mut nodes, &mut sets, Node::Key(*key));
            sets.union(group_node, key_node);
        }
    }

    // Node order puts every group before every key, and groups are visited
    // in id order, so the first group seen per root is the smallest.
    let mut root_target: BTreeMap<usize, &str> = BTreeMap::new();
    let mut mapping = KeyMapping::new();
    for (node, index) in &nodes {
        let root = sets.find(*index);
        match node {
            Node::Group(id) => {
                root_target.entry(root).or_insert(*id);
            }
            Node::Key(key) => {
                if let Some(target) = root_target.get(&root) {
                    mapping.insert((*key).clone(), (*target).to_string());
                }
            }
        }
    }
    mapping
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Node<'a> {
    Group(&'a str),
    Key(&'a NarrowKey),
}

fn node_index<'a>(
    nodes: &mut BTreeMap<Node<'a>, usize>,
    sets: &mut DisjointSet,
    node: Node<'a>,
) -> usize {
    *nodes.entry(node).or_insert_with(|| sets.make_set())
}

/// Union-find with path compression and union by rank.
#[derive(Debug, Default)]
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn make_set(&mut self) -> usize {
        let index = self.parent.len();
        self.parent.push(index);
        self.rank.push(0);
        index
    }

    fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = index;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
    }
}

/// Rewrite every record's heuristic key that a confirmed group claims.
///
/// Records whose key no group claims keep their heuristic key.
pub fn expand_keys(records: &mut [KeyedRecord], mode: ExpansionMode) -> ExpansionStats {
    let confirmed_groups = keys_by_group(records).len();
    let (mapping, dropped_claims) = match mode {
        ExpansionMode::FirstClaim => first_claim_mapping(records),
        ExpansionMode::Transitive => (transitive_mapping(records), 0),
    };

    let mut rewritten_records = 0usize;
    for record in records.iter_mut() {
        let target = match &record.key {
            BridgeKey::Heuristic(key) => mapping.get(key),
            BridgeKey::Confirmed(_) => None,
        };
        if let Some(confirmed_id) = target {
            record.key = BridgeKey::Confirmed(confirmed_id.clone());
            rewritten_records += 1;
        }
    }

    ExpansionStats {
        confirmed_groups,
        mapped_keys: mapping.len(),
        dropped_claims,
        rewritten_records,
    }
}
