//! Category repository contracts and implementations.
//!
//! # Responsibility
//! - Fetch flat category records from the backend collaborator.
//! - Offer an in-memory implementation for tests and offline snapshots.
//!
//! # Invariants
//! - Records are returned as served: unordered, unvalidated, possibly with
//!   orphans or duplicate ids.
//! - The bearer credential is supplied at construction, never looked up.

use super::{RepoError, RepoResult};
use crate::model::category::{CategoryId, CategoryRecord};
use crate::net::{ApiClient, Credential};
use std::cell::Cell;

/// Category list endpoint, relative to the backend base URL.
pub const CATEGORIES_PATH: &str = "/products/categories/";

/// Repository interface for category reads.
pub trait CategoryRepository {
    /// Loads the full flat category list.
    fn list_categories(&self) -> RepoResult<Vec<CategoryRecord>>;
    /// Loads one category by id; `None` when the backend has no such row.
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<CategoryRecord>>;
}

impl<R: CategoryRepository + ?Sized> CategoryRepository for &R {
    fn list_categories(&self) -> RepoResult<Vec<CategoryRecord>> {
        (**self).list_categories()
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<CategoryRecord>> {
        (**self).get_category(id)
    }
}

/// REST-backed category repository.
pub struct HttpCategoryRepository<'client> {
    client: &'client ApiClient,
    credential: Option<Credential>,
}

impl<'client> HttpCategoryRepository<'client> {
    /// Creates a repository over `client`, forwarding `credential` when set.
    pub fn new(client: &'client ApiClient, credential: Option<Credential>) -> Self {
        Self { client, credential }
    }
}

impl CategoryRepository for HttpCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<CategoryRecord>> {
        self.client
            .get_json(CATEGORIES_PATH, &[], self.credential.as_ref())
            .map_err(Into::into)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<CategoryRecord>> {
        let path = format!("{CATEGORIES_PATH}{id}/");
        let record: Option<CategoryRecord> = self
            .client
            .get_json_optional(&path, self.credential.as_ref())?;
        match record {
            Some(record) if record.id != id => Err(RepoError::InvalidData(format!(
                "requested category {id}, backend returned {}",
                record.id
            ))),
            other => Ok(other),
        }
    }
}

/// Snapshot-backed category repository.
#[derive(Debug)]
pub struct InMemoryCategoryRepository {
    outcome: Result<Vec<CategoryRecord>, RepoError>,
    calls: Cell<usize>,
}

impl InMemoryCategoryRepository {
    /// Serves `records` on every call.
    pub fn new(records: Vec<CategoryRecord>) -> Self {
        Self {
            outcome: Ok(records),
            calls: Cell::new(0),
        }
    }

    /// Fails every call with `error`.
    pub fn failing(error: RepoError) -> Self {
        Self {
            outcome: Err(error),
            calls: Cell::new(0),
        }
    }

    /// Number of list/get calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn snapshot(&self) -> RepoResult<&[CategoryRecord]> {
        self.calls.set(self.calls.get() + 1);
        match &self.outcome {
            Ok(records) => Ok(records.as_slice()),
            Err(err) => Err(err.clone()),
        }
    }
}

impl CategoryRepository for InMemoryCategoryRepository {
    fn list_categories(&self) -> RepoResult<Vec<CategoryRecord>> {
        self.snapshot().map(<[CategoryRecord]>::to_vec)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<CategoryRecord>> {
        Ok(self
            .snapshot()?
            .iter()
            .rev()
            .find(|record| record.id == id)
            .cloned())
    }
}
