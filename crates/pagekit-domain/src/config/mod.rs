//! Domain configuration module
//!
//! Contains the defaults table and the per-endpoint pagination policy.
//! These are independent of any transport or storage concern.

pub mod defaults;
mod policy;

pub use policy::{DefaultSort, PaginationConfig, PaginationPolicy};
