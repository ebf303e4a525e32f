#![allow(dead_code)]

use dbenum_core::{enumerated, ColumnMapping, ColumnSpec, TableMapping, TypeRegistry};
use dbenum_store::db;
use rusqlite::Connection;

enumerated! {
    pub enum Gender: str {
        Male = "male",
        Female = "female",
    }
}

enumerated! {
    /// Integer-backed access level
    pub enum Level: int {
        Guest = 1,
        Member = 2,
        Admin = 10,
    }
}

/// Frozen registry with `gender` and `Level`
pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.enum_types().register_as::<Gender>("gender").unwrap();
    registry.enum_types().register::<Level>().unwrap();
    registry.freeze();
    registry
}

pub fn users() -> TableMapping {
    TableMapping::new("users")
        .column(ColumnMapping::string(ColumnSpec::new("id").with_length(36)))
        .column(ColumnMapping::enumerated(ColumnSpec::new("gender"), "gender"))
        .column(ColumnMapping::enumerated(
            ColumnSpec::new("level").nullable(),
            "Level",
        ))
}

/// In-memory database with the `users` table created
pub fn setup_test_db(registry: &TypeRegistry) -> Connection {
    let conn = db::open_in_memory().unwrap();
    db::configure(&conn).unwrap();
    dbenum_store::schema::create_table(&conn, &users(), registry).unwrap();
    conn
}
