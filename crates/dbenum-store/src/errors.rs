//! Error handling for dbenum-store
//!
//! Wraps dbenum-core ExError with store-specific helpers

use dbenum_core::errors::{DbEnumError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an error for a stored value the codec under `type_key` rejects
pub fn decode_error(type_key: &str, err: DbEnumError) -> ExError {
    ExError::from(err).with_key(type_key.to_string())
}

/// Create an error for a stored value of a storage class no codec reads
pub fn unsupported_value(type_name: &str, storage_class: &str) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("decode")
        .with_key(type_name.to_string())
        .with_message(format!("Cannot decode a {} value as an enum", storage_class))
}

/// Create an error for DDL SQLite refused, keeping the driver error as source
pub fn ddl_error(table: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("create_table")
        .with_message(format!("Cannot create table {}", table))
        .with_source(from_rusqlite(err))
}

/// Create an error for a table missing from the schema
pub fn table_not_found(table: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("introspect_enum_columns")
        .with_message(format!("Table {} not found", table))
}
