//! Core types shared across dbenum facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Schema constants**: Canonical field keys and event names
//! - **Comment hints**: The marker written into column comments so that
//!   schema introspection can recover which registered type a column encodes

pub mod hint;
pub mod schema;

pub use hint::{format_type_hint, parse_type_hint, TYPE_HINT_PREFIX};
