//! Registry configuration
//!
//! Enum registrations can be declared in TOML and applied at bootstrap:
//!
//! ```toml
//! declaration = "varchar"   # default strategy for all entries
//! freeze = true             # reject registration after bootstrap
//!
//! [[types]]
//! key = "gender"            # optional, defaults to the enum identifier
//! enum = "Gender"
//!
//! [[types]]
//! enum = "Action"
//! declaration = "inline_enum"
//! ```
//!
//! Enum identifiers are resolved through an [`EnumCatalog`] the application
//! fills with the Rust types it knows about.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use crate::declaration::DeclarationKind;
use crate::enumeration::{Enumerated, TypeDescriptor};
use crate::errors::{DbEnumError, Result};
use crate::registry::TypeRegistry;
use crate::{log_op_end, log_op_error, log_op_start};

fn default_freeze() -> bool {
    true
}

/// Registry bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Strategy for entries that do not pick one
    #[serde(default)]
    pub declaration: DeclarationKind,
    /// Freeze the registry once every entry is registered
    #[serde(default = "default_freeze")]
    pub freeze: bool,
    /// Entries, registered in order
    #[serde(default)]
    pub types: Vec<TypeEntryConfig>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            declaration: DeclarationKind::default(),
            freeze: default_freeze(),
            types: Vec::new(),
        }
    }
}

/// One `[[types]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntryConfig {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(rename = "enum")]
    pub enum_name: String,
    #[serde(default)]
    pub declaration: Option<DeclarationKind>,
}

impl TypeEntryConfig {
    /// Registry key: the explicit key, or the enum identifier
    pub fn effective_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.enum_name)
    }
}

impl RegistryConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML or unknown fields.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DbEnumError::InvalidConfig {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    /// Register every entry into `registry`, in order
    ///
    /// Stops at the first failing entry; earlier entries stay registered.
    /// Does not freeze.
    ///
    /// # Errors
    ///
    /// Returns the first entry's error: `InvalidEnumType` for identifiers
    /// the catalog does not know as enums, `RegistrationFailure` for keys
    /// the registry refuses.
    pub fn apply(&self, registry: &mut TypeRegistry, catalog: &EnumCatalog) -> Result<()> {
        for entry in &self.types {
            let declaration = entry.declaration.unwrap_or(self.declaration);
            registry
                .enum_types_with(declaration.strategy())
                .register_descriptor(entry.effective_key(), catalog.resolve(&entry.enum_name))?;
        }
        Ok(())
    }
}

/// Enum types known to the application, by identifier
#[derive(Debug, Clone, Default)]
pub struct EnumCatalog {
    types: HashMap<String, TypeDescriptor>,
}

impl EnumCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `E` under its identifier
    pub fn add<E: Enumerated>(&mut self) -> &mut Self {
        self.add_descriptor(TypeDescriptor::of::<E>())
    }

    /// Builder form of [`EnumCatalog::add`]
    pub fn with<E: Enumerated>(mut self) -> Self {
        self.add::<E>();
        self
    }

    pub fn add_descriptor(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types.insert(descriptor.name().to_string(), descriptor);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Descriptor for `name`
    ///
    /// Unknown names resolve to an opaque descriptor, which registration
    /// rejects with the capability error.
    pub fn resolve(&self, name: &str) -> TypeDescriptor {
        self.types
            .get(name)
            .cloned()
            .unwrap_or_else(|| TypeDescriptor::opaque(name))
    }
}

/// Build a registry from configuration
///
/// # Errors
///
/// Returns the first registration error; see [`RegistryConfig::apply`].
pub fn bootstrap(config: &RegistryConfig, catalog: &EnumCatalog) -> Result<TypeRegistry> {
    let started = Instant::now();
    log_op_start!("bootstrap", entry_count = config.types.len() as u64);

    let mut registry = TypeRegistry::new();
    if let Err(err) = config.apply(&mut registry, catalog) {
        log_op_error!(
            "bootstrap",
            err.clone(),
            duration_ms = started.elapsed().as_millis() as u64
        );
        return Err(err);
    }
    if config.freeze {
        registry.freeze();
    }

    log_op_end!(
        "bootstrap",
        duration_ms = started.elapsed().as_millis() as u64,
        entry_count = registry.len() as u64
    );
    Ok(registry)
}
