//! Category navigation use-case service.
//!
//! # Responsibility
//! - Fetch one category snapshot and build the forest from it.
//! - Drive a `CategoryMenu` through its loading lifecycle.
//! - Collapse every fetch failure into one user-facing message.
//!
//! # Invariants
//! - No automatic retry; callers re-trigger loads explicitly.
//! - Either the full forest is delivered or the failure message replaces it.
//! - Absorbed data anomalies are logged as counts only, never names.

use crate::menu::CategoryMenu;
use crate::model::category::{CategoryId, CategoryRecord, Forest};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::RepoError;
use crate::tree::{build_forest_with_report, BuildReport};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Message shown in place of the menu body when a category fetch fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load categories. Please try again later.";

/// Errors from category service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryServiceError {
    /// Fetch from the backend collaborator failed.
    Fetch(RepoError),
}

impl CategoryServiceError {
    /// Text safe to show to shoppers; transport details stay in logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Fetch(_) => LOAD_FAILED_MESSAGE,
        }
    }
}

impl Display for CategoryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(err) => write!(f, "category fetch failed: {err}"),
        }
    }
}

impl Error for CategoryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch(err) => Some(err),
        }
    }
}

impl From<RepoError> for CategoryServiceError {
    fn from(value: RepoError) -> Self {
        Self::Fetch(value)
    }
}

/// Category service facade.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Fetches one snapshot and builds its forest.
    pub fn load_forest(&self) -> Result<Forest, CategoryServiceError> {
        self.load_forest_with_report().map(|(forest, _)| forest)
    }

    /// Fetches one snapshot and returns the forest with its build report.
    ///
    /// # Side effects
    /// - Emits `category_load` events; a `warn` event when the build absorbed
    ///   orphans, duplicates or cycles.
    pub fn load_forest_with_report(
        &self,
    ) -> Result<(Forest, BuildReport), CategoryServiceError> {
        let started_at = Instant::now();
        info!("event=category_load module=service status=start");

        let records = match self.repo.list_categories() {
            Ok(records) => records,
            Err(err) => {
                error!(
                    "event=category_load module=service status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        let (forest, report) = build_forest_with_report(&records);
        if !report.is_clean() {
            warn!(
                "event=category_tree_anomaly module=service records={} orphans_dropped={} duplicate_ids={} unreachable_ids={} cyclic_links_skipped={} depth_links_cut={}",
                report.records,
                report.orphans_dropped,
                report.duplicate_ids,
                report.unreachable_ids,
                report.cyclic_links_skipped,
                report.depth_links_cut
            );
        }
        info!(
            "event=category_load module=service status=ok duration_ms={} records={} roots={} nodes={}",
            started_at.elapsed().as_millis(),
            report.records,
            report.roots,
            report.reachable_nodes
        );
        Ok((forest, report))
    }

    /// Runs one full load cycle on `menu`.
    ///
    /// The menu passes through `Loading` and ends `Ready` or `Failed` with
    /// [`LOAD_FAILED_MESSAGE`]. The error is also returned for callers that
    /// log or exit on it.
    pub fn refresh_menu(&self, menu: &mut CategoryMenu) -> Result<(), CategoryServiceError> {
        menu.begin_loading();
        match self.load_forest() {
            Ok(forest) => {
                menu.finish_loading(Ok(forest));
                Ok(())
            }
            Err(err) => {
                menu.finish_loading(Err(err.user_message().to_string()));
                Err(err)
            }
        }
    }

    /// Loads one category by id.
    pub fn get_category(
        &self,
        id: CategoryId,
    ) -> Result<Option<CategoryRecord>, CategoryServiceError> {
        self.repo.get_category(id).map_err(Into::into)
    }
}
