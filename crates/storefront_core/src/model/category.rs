//! Category domain model.
//!
//! # Responsibility
//! - Define the flat `CategoryRecord` shape returned by the backend.
//! - Define the linked `CategoryNode`/`Forest` read model.
//!
//! # Invariants
//! - Records are decoded leniently; the nested `children` array the backend
//!   also sends is ignored and never trusted.
//! - A `Forest` is immutable once built and owned by the view that built it.

use serde::{Deserialize, Serialize};

/// Backend primary key of one category.
pub type CategoryId = i64;

/// Flat category row as served by `GET /products/categories/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    /// Missing names decode as empty strings; they are not validated.
    #[serde(default)]
    pub name: String,
    /// `None` marks a root category.
    #[serde(default)]
    pub parent: Option<CategoryId>,
}

impl CategoryRecord {
    /// Creates a root-level record.
    pub fn root(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
        }
    }

    /// Creates a record attached to `parent`.
    pub fn child(id: CategoryId, name: impl Into<String>, parent: CategoryId) -> Self {
        Self {
            id,
            name: name.into(),
            parent: Some(parent),
        }
    }
}

/// Linked category with its alphabetically ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub name: String,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Ordered root-level categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<CategoryNode>,
}

impl Forest {
    pub fn new(roots: Vec<CategoryNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[CategoryNode] {
        &self.roots
    }

    /// Number of root nodes.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of reachable nodes at every level.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Longest root-to-leaf path counted in levels; `0` for an empty forest.
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    /// Returns the first node with `id` in pre-order.
    pub fn find(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.iter().find(|(_, node)| node.id == id).map(|(_, node)| node)
    }

    /// Pre-order traversal yielding `(depth, node)`, roots at depth `0`.
    pub fn iter(&self) -> ForestIter<'_> {
        ForestIter {
            stack: self.roots.iter().rev().map(|node| (0, node)).collect(),
        }
    }
}

/// Pre-order iterator over a [`Forest`].
pub struct ForestIter<'a> {
    stack: Vec<(usize, &'a CategoryNode)>,
}

impl<'a> Iterator for ForestIter<'a> {
    type Item = (usize, &'a CategoryNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryNode, CategoryRecord, Forest};

    fn sample() -> Forest {
        let mut books = CategoryNode::new(1, "Books");
        let mut fiction = CategoryNode::new(2, "Fiction");
        fiction.children.push(CategoryNode::new(5, "Fantasy"));
        books.children.push(CategoryNode::new(4, "Comics"));
        books.children.push(fiction);
        Forest::new(vec![books, CategoryNode::new(3, "Electronics")])
    }

    #[test]
    fn record_decodes_without_name_or_parent_and_ignores_children() {
        let record: CategoryRecord =
            serde_json::from_str(r#"{"id": 7, "children": [{"id": 8}]}"#).unwrap();
        assert_eq!(record, CategoryRecord::root(7, ""));
    }

    #[test]
    fn iter_is_preorder_with_depth() {
        let forest = sample();
        let visited: Vec<(usize, i64)> = forest.iter().map(|(d, n)| (d, n.id)).collect();
        assert_eq!(visited, vec![(0, 1), (1, 4), (1, 2), (2, 5), (0, 3)]);
    }

    #[test]
    fn counts_and_depth() {
        let forest = sample();
        assert_eq!(forest.len(), 2);
        assert_eq!(forest.node_count(), 5);
        assert_eq!(forest.depth(), 3);
        assert_eq!(Forest::default().depth(), 0);
        assert_eq!(forest.find(5).map(|n| n.name.as_str()), Some("Fantasy"));
        assert!(forest.find(42).is_none());
    }
}
