//! dbenum Store - SQLite binding for enum columns
//!
//! Provides:
//! - Connection helpers for file-backed and in-memory databases
//! - `EnumColumn`, converting between SQLite values and codec members
//! - `EnumCell`, a `ToSql`/`FromSql` wrapper for typed members
//! - Table creation from mappings and recovery of enum columns from the
//!   stored schema

pub mod column;
pub mod db;
pub mod errors;
pub mod schema;

// Re-export key types
pub use column::{EnumCell, EnumColumn};
pub use errors::Result;
pub use schema::EnumColumnInfo;
