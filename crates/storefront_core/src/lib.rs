//! Core category navigation logic for the storefront client.
//! This crate owns the tree-building and menu invariants; front ends only
//! forward events and render what it returns.

pub mod config;
pub mod logging;
pub mod menu;
pub mod model;
pub mod net;
pub mod repo;
pub mod service;
pub mod tree;

pub use logging::{init_logging, init_stderr_logging, logging_status, LogSink};
pub use menu::{
    category_route, render_body, CategoryMenu, MenuAction, MenuBody, MenuOptions, MenuPhase,
    MenuRow, RenderStyle, ALL_PRODUCTS_ROUTE,
};
pub use model::category::{CategoryId, CategoryNode, CategoryRecord, Forest};
pub use model::product::{CategoryRef, ProductId, ProductSummary};
pub use net::{ApiClient, Credential, NetError, NetResult};
pub use repo::category_repo::{
    CategoryRepository, HttpCategoryRepository, InMemoryCategoryRepository,
};
pub use repo::product_repo::{
    HttpProductRepository, InMemoryProductRepository, ProductRepository,
};
pub use repo::{RepoError, RepoResult};
pub use service::category_service::{
    CategoryService, CategoryServiceError, LOAD_FAILED_MESSAGE,
};
pub use service::product_service::ProductService;
pub use tree::{build_forest, build_forest_with_report, BuildReport, MAX_TREE_DEPTH};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
