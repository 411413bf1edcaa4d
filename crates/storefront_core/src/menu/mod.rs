//! Category navigation menu.
//!
//! # Responsibility
//! - Drive an expand/collapse menu from a built forest.
//! - Produce navigation routes for selected categories.
//! - Render the visible menu body as indented text.
//!
//! # Invariants
//! - Menu state is transient and owned by one top-level menu; nothing here
//!   is persisted or shared across menus.

use crate::model::category::CategoryId;

pub mod render;
pub mod state;

pub use render::{render_body, RenderStyle};
pub use state::{CategoryMenu, MenuAction, MenuBody, MenuOptions, MenuPhase, MenuRow};

/// Depth at which nodes stop being expandable.
pub const DEFAULT_MAX_DEPTH: usize = 4;
/// Indentation columns per depth level.
pub const DEFAULT_INDENT_WIDTH: usize = 2;
/// Route of the unscoped product listing.
pub const ALL_PRODUCTS_ROUTE: &str = "/products";

/// Route of the product listing scoped to `id`.
pub fn category_route(id: CategoryId) -> String {
    format!("{ALL_PRODUCTS_ROUTE}/category/{id}")
}
