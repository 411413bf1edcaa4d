//! Product listing repository for category-scoped navigation targets.

use super::RepoResult;
use crate::model::category::CategoryId;
use crate::model::product::ProductSummary;
use crate::net::{ApiClient, Credential};

/// Product list endpoint, relative to the backend base URL.
pub const PRODUCTS_PATH: &str = "/products/products/";

/// Repository interface for product listing reads.
pub trait ProductRepository {
    /// Lists available products, optionally scoped to one category.
    fn list_products(&self, category: Option<CategoryId>) -> RepoResult<Vec<ProductSummary>>;
}

/// REST-backed product repository.
pub struct HttpProductRepository<'client> {
    client: &'client ApiClient,
    credential: Option<Credential>,
}

impl<'client> HttpProductRepository<'client> {
    pub fn new(client: &'client ApiClient, credential: Option<Credential>) -> Self {
        Self { client, credential }
    }
}

impl ProductRepository for HttpProductRepository<'_> {
    fn list_products(&self, category: Option<CategoryId>) -> RepoResult<Vec<ProductSummary>> {
        let query = category
            .map(|id| vec![("category", id.to_string())])
            .unwrap_or_default();
        self.client
            .get_json(PRODUCTS_PATH, &query, self.credential.as_ref())
            .map_err(Into::into)
    }
}

/// Snapshot-backed product repository.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Vec<ProductSummary>,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<ProductSummary>) -> Self {
        Self { products }
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn list_products(&self, category: Option<CategoryId>) -> RepoResult<Vec<ProductSummary>> {
        // Mirrors the backend: only available products are listed.
        Ok(self
            .products
            .iter()
            .filter(|product| product.available)
            .filter(|product| category.map_or(true, |id| product.belongs_to(id)))
            .cloned()
            .collect())
    }
}
