//! UI-host bindings for the storefront category menu.

pub mod api;
