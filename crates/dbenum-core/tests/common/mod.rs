#![allow(dead_code)]

use dbenum_core::{enumerated, SqlitePlatform, TypeRegistry};

enumerated! {
    /// CRUD actions
    pub enum Action: str {
        Create = "create",
        Read = "read",
        Update = "update",
        Delete = "delete",
    }
}

enumerated! {
    pub enum Gender: str {
        Male = "male",
        Female = "female",
    }
}

enumerated! {
    pub enum IntegerValues: int {
        One = 1,
        Two = 2,
    }
}

/// A type with no enumerated capability
pub struct NotAnEnum;

/// Create a new empty registry for one test case
pub fn new_registry() -> TypeRegistry {
    TypeRegistry::new()
}

/// Platform used where the dialect does not matter
pub fn platform() -> SqlitePlatform {
    SqlitePlatform
}

/// Register `E` under its identifier and return a copy of the codec
pub fn registered<E: dbenum_core::Enumerated>(
    registry: &mut TypeRegistry,
) -> dbenum_core::EnumType {
    registry.enum_types().register::<E>().unwrap();
    registry.get_type(E::NAME).unwrap().clone()
}
