//! Type registry
//!
//! `TypeRegistry` maps lookup keys to configured codecs. Application
//! bootstrap creates one, registers its enum types through
//! [`TypeRegistry::enum_types`], optionally freezes it, and hands it to the
//! schema mapping layer.
//!
//! Registration needs `&mut TypeRegistry`; once frozen, the registry is
//! read-only and can be shared freely.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::codec::EnumType;
use crate::declaration::{ColumnDeclaration, VarcharDeclaration};
use crate::enumeration::{Enumerated, TypeDescriptor};
use crate::errors::{DbEnumError, Result};
use crate::{log_op_end, log_op_error, log_op_start};

/// Registry of named column types
///
/// Not thread-safe for writes; designed for single-threaded bootstrap.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, EnumType>,
    frozen: bool,
}

impl TypeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a codec under `name`
    ///
    /// # Errors
    ///
    /// Returns `RegistrationFailure` if the registry is frozen, `name` is
    /// empty, or `name` is already registered.
    pub fn add_type(&mut self, name: impl Into<String>, codec: EnumType) -> Result<()> {
        let name = name.into();
        self.ensure_writable(&name)?;
        if self.types.contains_key(&name) {
            return Err(DbEnumError::RegistrationFailure {
                key: name,
                reason: "type already exists".to_string(),
            });
        }
        self.types.insert(name, codec);
        Ok(())
    }

    /// Get the codec registered under `name`
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` if nothing is registered under `name`.
    pub fn get_type(&self, name: &str) -> Result<&EnumType> {
        self.types.get(name).ok_or_else(|| DbEnumError::UnknownType {
            name: name.to_string(),
        })
    }

    /// Get a mutable codec slot
    ///
    /// # Errors
    ///
    /// Returns `RegistrationFailure` if the registry is frozen, or
    /// `UnknownType` if nothing is registered under `name`.
    pub fn get_type_mut(&mut self, name: &str) -> Result<&mut EnumType> {
        self.ensure_writable(name)?;
        self.types
            .get_mut(name)
            .ok_or_else(|| DbEnumError::UnknownType {
                name: name.to_string(),
            })
    }

    /// Check whether `name` is registered
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Reject all further registration
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Enum registration using the default string-column declaration
    pub fn enum_types(&mut self) -> EnumTypeRegistrar<'_> {
        EnumTypeRegistrar {
            registry: self,
            declaration: Arc::new(VarcharDeclaration),
        }
    }

    /// Enum registration with a custom declaration strategy
    pub fn enum_types_with(
        &mut self,
        declaration: Arc<dyn ColumnDeclaration>,
    ) -> EnumTypeRegistrar<'_> {
        EnumTypeRegistrar {
            registry: self,
            declaration,
        }
    }

    fn ensure_writable(&self, name: &str) -> Result<()> {
        if self.frozen {
            return Err(DbEnumError::RegistrationFailure {
                key: name.to_string(),
                reason: "registry is frozen".to_string(),
            });
        }
        if name.is_empty() {
            return Err(DbEnumError::RegistrationFailure {
                key: String::new(),
                reason: "type name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Registers enum codecs into a [`TypeRegistry`]
///
/// Every codec registered through one registrar shares its declaration
/// strategy.
#[derive(Debug)]
pub struct EnumTypeRegistrar<'r> {
    registry: &'r mut TypeRegistry,
    declaration: Arc<dyn ColumnDeclaration>,
}

impl EnumTypeRegistrar<'_> {
    /// Register `E` under its own type identifier
    ///
    /// # Errors
    ///
    /// Returns `RegistrationFailure` if the registry refuses the key.
    pub fn register<E: Enumerated>(&mut self) -> Result<()> {
        self.register_descriptor(E::NAME, TypeDescriptor::of::<E>())
    }

    /// Register `E` under `key`
    ///
    /// # Errors
    ///
    /// Returns `RegistrationFailure` if the registry refuses the key.
    pub fn register_as<E: Enumerated>(&mut self, key: &str) -> Result<()> {
        self.register_descriptor(key, TypeDescriptor::of::<E>())
    }

    /// Register a type known only at runtime
    ///
    /// An existing entry under `key` is rebound in place to the new type and
    /// this registrar's declaration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnumType` when `descriptor` lacks the enumerated
    /// capability, or `RegistrationFailure` if the registry refuses the key.
    pub fn register_descriptor(&mut self, key: &str, descriptor: TypeDescriptor) -> Result<()> {
        let started = Instant::now();
        log_op_start!(
            "register_enum_type",
            type_key = key,
            enum_name = descriptor.name(),
            declaration = self.declaration.kind().as_str()
        );

        match self.bind(key, &descriptor) {
            Ok(()) => {
                log_op_end!(
                    "register_enum_type",
                    duration_ms = started.elapsed().as_millis() as u64,
                    type_key = key
                );
                Ok(())
            }
            Err(err) => {
                log_op_error!(
                    "register_enum_type",
                    err.clone(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    type_key = key
                );
                Err(err)
            }
        }
    }

    /// Register a batch of `(key, type)` entries in order
    ///
    /// A missing key defaults to the type's identifier. Stops at the first
    /// failure; entries registered before it stay registered.
    ///
    /// # Errors
    ///
    /// Returns the first entry's error.
    pub fn register_many<I, K>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (Option<K>, TypeDescriptor)>,
        K: AsRef<str>,
    {
        for (key, descriptor) in entries {
            let key = match &key {
                Some(key) => key.as_ref().to_string(),
                None => descriptor.name().to_string(),
            };
            self.register_descriptor(&key, descriptor)?;
        }
        Ok(())
    }

    fn bind(&mut self, key: &str, descriptor: &TypeDescriptor) -> Result<()> {
        let class = descriptor.require_enumerated()?;

        if self.registry.has_type(key) {
            let slot = self.registry.get_type_mut(key)?;
            slot.configure(key, class, Arc::clone(&self.declaration));
            return Ok(());
        }

        let mut codec = EnumType::new(class.clone());
        codec.configure(key, class, Arc::clone(&self.declaration));
        self.registry.add_type(key, codec)
    }
}
