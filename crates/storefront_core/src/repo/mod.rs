//! Repository layer over the storefront REST backend.
//!
//! # Responsibility
//! - Define read contracts for categories and products.
//! - Isolate HTTP details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return transport errors unchanged inside `RepoError::Net`.
//! - Repositories never repair category data.

use crate::net::NetError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_repo;
pub mod product_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for backend reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Transport, status or decode failure.
    Net(NetError),
    /// Backend data contradicts the request that produced it.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Net(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid backend data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Net(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<NetError> for RepoError {
    fn from(value: NetError) -> Self {
        Self::Net(value)
    }
}
