//! Category-scoped product listing service.
//!
//! # Responsibility
//! - List the products a category navigation lands on.
//!
//! # Invariants
//! - Listings are passed through in backend order.

use crate::model::category::CategoryId;
use crate::model::product::ProductSummary;
use crate::repo::product_repo::ProductRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case wrapper for product listings.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists available products in `category`, or every available product.
    pub fn list_for_category(
        &self,
        category: Option<CategoryId>,
    ) -> RepoResult<Vec<ProductSummary>> {
        let products = self.repo.list_products(category)?;
        info!(
            "event=product_list module=service status=ok scoped={} count={}",
            category.is_some(),
            products.len()
        );
        Ok(products)
    }
}
