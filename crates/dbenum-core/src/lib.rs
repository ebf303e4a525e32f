//! dbenum Core - Enum column codec and type registry
//!
//! This crate maps closed sets of named constants to and from scalar
//! database column values, including:
//! - The `Enumerated` capability and the `enumerated!` declaration macro
//! - Type-erased enum classes and instances for registry storage
//! - SQL dialect descriptors (`Platform`) and column declaration strategies
//! - The `EnumType` codec (encode, decode, declaration, comment hint)
//! - An explicitly passed `TypeRegistry` with enum registration
//! - TOML-driven registry bootstrap
//! - `CREATE TABLE` generation for mapped tables

pub mod codec;
pub mod config;
pub mod declaration;
pub mod enumeration;
pub mod errors;
pub mod logging_facility;
pub mod platform;
pub mod registry;
pub mod schema;
pub mod value;

pub use dbenum_core_types as core_types;

// Re-export commonly used types
pub use codec::EnumType;
pub use config::{bootstrap, EnumCatalog, RegistryConfig, TypeEntryConfig};
pub use declaration::{
    ColumnDeclaration, DeclarationKind, InlineEnumDeclaration, VarcharDeclaration,
};
pub use enumeration::{
    class_of, EnumClass, EnumInstance, Enumerated, TypeDescriptor, ENUMERATED_CAPABILITY,
};
pub use errors::{DbEnumError, ExError, ExErrorKind, Result};
pub use platform::{
    ColumnComment, ColumnSpec, MySqlPlatform, Platform, PostgreSqlPlatform, SqlitePlatform,
};
pub use registry::{EnumTypeRegistrar, TypeRegistry};
pub use schema::{ColumnMapping, SchemaGenerator, TableMapping};
pub use value::{EnumValue, ScalarValue};
