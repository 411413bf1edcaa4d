//! Storefront domain model for category navigation.
//!
//! # Responsibility
//! - Define the flat wire records received from the backend.
//! - Define the derived tree shape consumed by menu views.
//!
//! # Invariants
//! - Every category is identified by a backend-assigned `CategoryId`.
//! - Derived nodes are rebuilt from records, never mutated in place.

pub mod category;
pub mod product;
