//! Flat record to forest linking.
//!
//! # Responsibility
//! - Link `CategoryRecord`s into a `Forest` by their `parent` ids.
//! - Order roots and every child list by name.
//!
//! # Invariants
//! - Orphans (parent id absent from the input) never appear in the output,
//!   nor does anything hanging below them.
//! - Duplicate ids resolve last-write-wins: every position referencing the
//!   id materializes the node built from the last record carrying it.
//! - Name order is byte-wise and case-sensitive; equal names keep input order.
//! - Linking always terminates; a child already on the current root path is
//!   skipped instead of re-entered.
//! - No node is built deeper than `MAX_TREE_DEPTH` levels, so every later
//!   walk over the forest stays within a bounded stack.

use crate::model::category::{CategoryId, CategoryNode, CategoryRecord, Forest};
use std::collections::HashMap;

/// Deepest level materialized; roots are level `0`, so a forest is at most
/// this many levels tall.
pub const MAX_TREE_DEPTH: usize = 64;

/// Data-integrity counters collected while building a forest.
///
/// The counters never change the built forest; they exist so callers can log
/// backend data issues that the build absorbs silently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Input records seen.
    pub records: usize,
    /// Root-level nodes in the forest.
    pub roots: usize,
    /// Nodes reachable from the roots, repeats included.
    pub reachable_nodes: usize,
    /// Records whose parent id matched no record.
    pub orphans_dropped: usize,
    /// Records whose id was already seen earlier in the input.
    pub duplicate_ids: usize,
    /// Distinct ids that no root path reaches.
    pub unreachable_ids: usize,
    /// Child links skipped because they would re-enter an ancestor.
    pub cyclic_links_skipped: usize,
    /// Child links cut because they would exceed `MAX_TREE_DEPTH`.
    pub depth_links_cut: usize,
}

impl BuildReport {
    /// Returns `true` when the input linked without any absorbed anomaly.
    pub fn is_clean(&self) -> bool {
        self.orphans_dropped == 0
            && self.duplicate_ids == 0
            && self.unreachable_ids == 0
            && self.cyclic_links_skipped == 0
            && self.depth_links_cut == 0
    }
}

/// Builds an alphabetically ordered forest from flat records.
pub fn build_forest(records: &[CategoryRecord]) -> Forest {
    build_forest_with_report(records).0
}

/// Builds the forest and reports the anomalies absorbed on the way.
pub fn build_forest_with_report(records: &[CategoryRecord]) -> (Forest, BuildReport) {
    let mut report = BuildReport {
        records: records.len(),
        ..BuildReport::default()
    };

    let mut slots: HashMap<CategoryId, usize> = HashMap::with_capacity(records.len());
    let mut arena = Arena::default();
    for record in records {
        match slots.get(&record.id) {
            Some(&slot) => {
                arena.names[slot] = record.name.as_str();
                report.duplicate_ids += 1;
            }
            None => {
                slots.insert(record.id, arena.ids.len());
                arena.ids.push(record.id);
                arena.names.push(record.name.as_str());
            }
        }
    }

    arena.children = vec![Vec::new(); arena.ids.len()];
    let mut roots = Vec::new();
    for record in records {
        let slot = slots[&record.id];
        match record.parent {
            None => roots.push(slot),
            Some(parent_id) => match slots.get(&parent_id) {
                Some(&parent_slot) => arena.children[parent_slot].push(slot),
                None => report.orphans_dropped += 1,
            },
        }
    }

    // One stable sort per list once every link is in place.
    let names = &arena.names;
    for list in &mut arena.children {
        list.sort_by(|a, b| names[*a].cmp(names[*b]));
    }
    roots.sort_by(|a, b| names[*a].cmp(names[*b]));

    let mut walk = Walk {
        arena: &arena,
        on_path: vec![false; arena.ids.len()],
        reached: vec![false; arena.ids.len()],
        cyclic_links_skipped: 0,
        depth_links_cut: 0,
    };
    let nodes = roots
        .iter()
        .map(|&slot| walk.materialize(slot, 0))
        .collect::<Vec<_>>();

    report.cyclic_links_skipped = walk.cyclic_links_skipped;
    report.depth_links_cut = walk.depth_links_cut;
    report.unreachable_ids = walk.reached.iter().filter(|reached| !**reached).count();

    let forest = Forest::new(nodes);
    report.roots = forest.len();
    report.reachable_nodes = forest.node_count();
    (forest, report)
}

#[derive(Default)]
struct Arena<'a> {
    ids: Vec<CategoryId>,
    names: Vec<&'a str>,
    children: Vec<Vec<usize>>,
}

struct Walk<'r, 'a> {
    arena: &'r Arena<'a>,
    on_path: Vec<bool>,
    reached: Vec<bool>,
    cyclic_links_skipped: usize,
    depth_links_cut: usize,
}

impl Walk<'_, '_> {
    fn materialize(&mut self, slot: usize, depth: usize) -> CategoryNode {
        self.on_path[slot] = true;
        self.reached[slot] = true;

        let mut node = CategoryNode::new(self.arena.ids[slot], self.arena.names[slot]);
        for &child in &self.arena.children[slot] {
            if self.on_path[child] {
                self.cyclic_links_skipped += 1;
                continue;
            }
            if depth + 1 >= MAX_TREE_DEPTH {
                self.depth_links_cut += 1;
                continue;
            }
            node.children.push(self.materialize(child, depth + 1));
        }

        self.on_path[slot] = false;
        node
    }
}

#[cfg(test)]
mod tests {
    use super::{build_forest, build_forest_with_report, MAX_TREE_DEPTH};
    use crate::model::category::CategoryRecord;

    #[test]
    fn equal_names_keep_input_order() {
        let forest = build_forest(&[
            CategoryRecord::root(2, "Same"),
            CategoryRecord::root(1, "Same"),
        ]);
        let ids: Vec<i64> = forest.roots().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn ordering_is_case_sensitive_bytewise() {
        let forest = build_forest(&[
            CategoryRecord::root(1, "apple"),
            CategoryRecord::root(2, "Zebra"),
            CategoryRecord::root(3, "Apple"),
        ]);
        let names: Vec<&str> = forest.roots().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Zebra", "apple"]);
    }

    #[test]
    fn self_parent_is_unreachable() {
        let (forest, report) = build_forest_with_report(&[
            CategoryRecord::root(1, "Root"),
            CategoryRecord::child(2, "Loop", 2),
        ]);
        assert_eq!(forest.node_count(), 1);
        assert_eq!(report.unreachable_ids, 1);
        assert_eq!(report.orphans_dropped, 0);
    }

    #[test]
    fn duplicate_id_cycle_through_root_terminates() {
        // id 1 is both a root and a child of 2, which itself hangs off 1.
        let (forest, report) = build_forest_with_report(&[
            CategoryRecord::root(1, "One"),
            CategoryRecord::child(2, "Two", 1),
            CategoryRecord::child(1, "One again", 2),
        ]);
        assert_eq!(report.duplicate_ids, 1);
        assert_eq!(report.cyclic_links_skipped, 1);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.roots()[0].name, "One again");
        assert_eq!(forest.roots()[0].children.len(), 1);
        assert!(forest.roots()[0].children[0].is_leaf());
    }

    #[test]
    fn chain_is_cut_at_max_depth() {
        let mut records = vec![CategoryRecord::root(1, "L0")];
        records.extend((2..=MAX_TREE_DEPTH as i64 + 1).map(|id| {
            CategoryRecord::child(id, format!("L{}", id - 1), id - 1)
        }));

        let (forest, report) = build_forest_with_report(&records);
        assert_eq!(forest.depth(), MAX_TREE_DEPTH);
        assert_eq!(report.depth_links_cut, 1);
        assert_eq!(report.unreachable_ids, 1);
        assert!(!report.is_clean());
    }
}
