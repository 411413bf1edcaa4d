//! Category tree construction.
//!
//! # Responsibility
//! - Turn one fetched snapshot of flat records into an ordered forest.
//!
//! # Invariants
//! - Building is pure: no I/O, no logging, same input gives an equal forest.
//! - Construction depth is capped at `MAX_TREE_DEPTH` levels; the lower
//!   interactivity cap belongs to menu presentation.

pub mod builder;

pub use builder::{build_forest, build_forest_with_report, BuildReport, MAX_TREE_DEPTH};
