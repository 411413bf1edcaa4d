//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep CLI/FFI layers decoupled from HTTP details.

pub mod category_service;
pub mod product_service;
