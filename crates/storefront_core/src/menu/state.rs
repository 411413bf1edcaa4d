//! Category menu view state.
//!
//! # Responsibility
//! - Track the fetch phase driving the menu body.
//! - Own the expand/collapse flags of every node in one map.
//! - Resolve a click on a node into either a toggle or a navigation.
//!
//! # Invariants
//! - Expansion flags never alter the forest.
//! - Nodes at `depth >= max_depth` are inert: never expandable, their
//!   subtrees are never listed.
//! - Opening the menu resets every expansion flag.
//! - The latest `finish_loading` wins; earlier responses are not discarded
//!   when they arrive late.

use super::{category_route, DEFAULT_INDENT_WIDTH, DEFAULT_MAX_DEPTH};
use crate::model::category::{CategoryId, CategoryNode, Forest};
use std::collections::HashMap;

/// Presentation knobs for a [`CategoryMenu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOptions {
    /// First depth (roots are depth `0`) rendered inert.
    pub max_depth: usize,
    /// Indentation columns per depth level.
    pub indent_width: usize,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// Fetch lifecycle of the menu contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuPhase {
    /// Nothing requested yet.
    Idle,
    /// A category fetch is in flight.
    Loading,
    /// Forest built from the latest snapshot.
    Ready(Forest),
    /// Latest fetch failed; holds the user-facing message.
    Failed(String),
}

/// Outcome of selecting one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Node was expandable; its flag now equals `expanded`.
    Toggled { id: CategoryId, expanded: bool },
    /// Leaf or inert node; the menu closed and the host should navigate.
    Navigate { id: CategoryId, route: String },
    /// Unknown id, or no forest to select from.
    Ignored,
}

/// One visible line of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub id: CategoryId,
    pub name: String,
    pub depth: usize,
    /// Indentation in columns, proportional to `depth`.
    pub indent: usize,
    pub has_children: bool,
    pub expandable: bool,
    pub expanded: bool,
    /// At or beyond the depth cap; rendered with a distinct marker.
    pub inert: bool,
    /// Navigation target for this category.
    pub route: String,
}

/// What the menu body shows right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuBody {
    NotLoaded,
    Loading,
    /// The whole node list is replaced by this message.
    Error(String),
    /// Forest loaded but holds no categories.
    Empty,
    Rows(Vec<MenuRow>),
}

/// Transient state of one top-level category menu.
#[derive(Debug, Clone)]
pub struct CategoryMenu {
    phase: MenuPhase,
    open: bool,
    expanded: HashMap<CategoryId, bool>,
    options: MenuOptions,
}

impl Default for CategoryMenu {
    fn default() -> Self {
        Self::new(MenuOptions::default())
    }
}

impl CategoryMenu {
    pub fn new(options: MenuOptions) -> Self {
        Self {
            phase: MenuPhase::Idle,
            open: false,
            expanded: HashMap::new(),
            options,
        }
    }

    pub fn options(&self) -> MenuOptions {
        self.options
    }

    pub fn phase(&self) -> &MenuPhase {
        &self.phase
    }

    /// Forest of the latest successful load, if any.
    pub fn forest(&self) -> Option<&Forest> {
        match &self.phase {
            MenuPhase::Ready(forest) => Some(forest),
            _ => None,
        }
    }

    /// Enters the loading phase; the menu control is disabled until the
    /// load finishes.
    pub fn begin_loading(&mut self) {
        self.phase = MenuPhase::Loading;
    }

    /// Stores the outcome of a fetch, replacing whatever was shown.
    pub fn finish_loading(&mut self, outcome: Result<Forest, String>) {
        self.phase = match outcome {
            Ok(forest) => MenuPhase::Ready(forest),
            Err(message) => MenuPhase::Failed(message),
        };
    }

    /// Whether the control that opens the menu accepts input.
    pub fn is_control_enabled(&self) -> bool {
        !matches!(self.phase, MenuPhase::Loading)
    }

    /// Opens the menu with every node collapsed.
    pub fn open(&mut self) {
        self.expanded.clear();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_expanded(&self, id: CategoryId) -> bool {
        self.expanded.get(&id).copied().unwrap_or(false)
    }

    /// Flips the expansion flag of an expandable node.
    ///
    /// Returns `false` and changes nothing for leaves, inert nodes and
    /// unknown ids. An id listed at several positions is judged by its first
    /// pre-order position, and its one flag applies to all of them.
    pub fn toggle(&mut self, id: CategoryId) -> bool {
        if !self.is_expandable(id) {
            return false;
        }
        let flag = self.expanded.entry(id).or_insert(false);
        *flag = !*flag;
        true
    }

    /// Resolves a click on node `id`.
    ///
    /// Expandable nodes toggle; leaves and inert nodes close the menu and
    /// yield a navigation target.
    pub fn select(&mut self, id: CategoryId) -> MenuAction {
        let Some((depth, has_children)) = self.locate(id) else {
            return MenuAction::Ignored;
        };
        if has_children && depth < self.options.max_depth {
            self.toggle(id);
            return MenuAction::Toggled {
                id,
                expanded: self.is_expanded(id),
            };
        }
        self.close();
        MenuAction::Navigate {
            id,
            route: category_route(id),
        }
    }

    /// Expands every expandable node.
    pub fn expand_all(&mut self) {
        let max_depth = self.options.max_depth;
        let ids = self
            .forest()
            .map(|forest| {
                forest
                    .iter()
                    .filter(|(depth, node)| !node.is_leaf() && *depth < max_depth)
                    .map(|(_, node)| node.id)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        for id in ids {
            self.expanded.insert(id, true);
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Current menu body: status, or the visible rows in display order.
    pub fn body(&self) -> MenuBody {
        match &self.phase {
            MenuPhase::Idle => MenuBody::NotLoaded,
            MenuPhase::Loading => MenuBody::Loading,
            MenuPhase::Failed(message) => MenuBody::Error(message.clone()),
            MenuPhase::Ready(forest) if forest.is_empty() => MenuBody::Empty,
            MenuPhase::Ready(forest) => {
                let mut rows = Vec::new();
                self.push_rows(forest.roots(), 0, &mut rows);
                MenuBody::Rows(rows)
            }
        }
    }

    fn push_rows(&self, nodes: &[CategoryNode], depth: usize, rows: &mut Vec<MenuRow>) {
        for node in nodes {
            let has_children = !node.is_leaf();
            let inert = depth >= self.options.max_depth;
            let expandable = has_children && !inert;
            let expanded = expandable && self.is_expanded(node.id);
            rows.push(MenuRow {
                id: node.id,
                name: node.name.clone(),
                depth,
                indent: depth * self.options.indent_width,
                has_children,
                expandable,
                expanded,
                inert,
                route: category_route(node.id),
            });
            if expanded {
                self.push_rows(&node.children, depth + 1, rows);
            }
        }
    }

    fn is_expandable(&self, id: CategoryId) -> bool {
        matches!(
            self.locate(id),
            Some((depth, true)) if depth < self.options.max_depth
        )
    }

    /// Depth and child presence of the first pre-order match for `id`.
    fn locate(&self, id: CategoryId) -> Option<(usize, bool)> {
        self.forest()?
            .iter()
            .find(|(_, node)| node.id == id)
            .map(|(depth, node)| (depth, !node.is_leaf()))
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryMenu, MenuAction, MenuBody, MenuOptions};
    use crate::model::category::CategoryRecord;
    use crate::tree::build_forest;

    fn chain(len: i64) -> Vec<CategoryRecord> {
        (1..=len)
            .map(|id| match id {
                1 => CategoryRecord::root(1, "L0"),
                _ => CategoryRecord::child(id, format!("L{}", id - 1), id - 1),
            })
            .collect()
    }

    #[test]
    fn inert_depth_starts_at_max_depth() {
        let mut menu = CategoryMenu::new(MenuOptions {
            max_depth: 2,
            indent_width: 3,
        });
        menu.finish_loading(Ok(build_forest(&chain(4))));
        menu.expand_all();

        let MenuBody::Rows(rows) = menu.body() else {
            panic!("expected rows");
        };
        let summary: Vec<(i64, usize, bool, bool)> = rows
            .iter()
            .map(|row| (row.id, row.indent, row.expandable, row.inert))
            .collect();
        assert_eq!(
            summary,
            vec![(1, 0, true, false), (2, 3, true, false), (3, 6, false, true)]
        );
        assert!(!menu.toggle(3));
        assert_eq!(
            menu.select(3),
            MenuAction::Navigate {
                id: 3,
                route: "/products/category/3".to_string()
            }
        );
    }

    #[test]
    fn select_without_forest_is_ignored() {
        let mut menu = CategoryMenu::default();
        assert_eq!(menu.select(1), MenuAction::Ignored);
        assert_eq!(menu.body(), MenuBody::NotLoaded);
    }
}
