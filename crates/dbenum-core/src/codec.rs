//! Enum column codec
//!
//! `EnumType` converts between a column's scalar value and a member of the
//! enum type it is bound to, and describes the column for schema generation.

use std::fmt;
use std::sync::Arc;

use dbenum_core_types::format_type_hint;

use crate::declaration::{ColumnDeclaration, VarcharDeclaration};
use crate::enumeration::{class_of, EnumClass, EnumInstance, Enumerated};
use crate::errors::{DbEnumError, Result};
use crate::platform::{ColumnSpec, Platform};
use crate::value::ScalarValue;

/// Name reported by a codec that never went through registration
pub const DEFAULT_TYPE_NAME: &str = "enum";

/// Codec bound to one enum type
#[derive(Clone)]
pub struct EnumType {
    name: Option<String>,
    class: Arc<dyn EnumClass>,
    declaration: Arc<dyn ColumnDeclaration>,
}

impl EnumType {
    /// Unnamed codec for `class`, declared as a generic string column
    pub fn new(class: Arc<dyn EnumClass>) -> Self {
        Self {
            name: None,
            class,
            declaration: Arc::new(VarcharDeclaration),
        }
    }

    /// Unnamed codec for the enumerated type `E`
    pub fn of<E: Enumerated>() -> Self {
        Self::new(class_of::<E>())
    }

    /// Replace the declaration strategy
    pub fn with_declaration(mut self, declaration: Arc<dyn ColumnDeclaration>) -> Self {
        self.declaration = declaration;
        self
    }

    /// Rebind this codec in place
    pub(crate) fn configure(
        &mut self,
        name: impl Into<String>,
        class: Arc<dyn EnumClass>,
        declaration: Arc<dyn ColumnDeclaration>,
    ) {
        self.name = Some(name.into());
        self.class = class;
        self.declaration = declaration;
    }

    /// Display name: the registry key, or `"enum"` when unregistered
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_TYPE_NAME)
    }

    /// The enum type this codec is bound to
    pub fn enum_class(&self) -> &dyn EnumClass {
        self.class.as_ref()
    }

    pub fn declaration(&self) -> &dyn ColumnDeclaration {
        self.declaration.as_ref()
    }

    /// SQL type declaration for `column`
    pub fn sql_declaration(&self, column: &ColumnSpec, platform: &dyn Platform) -> String {
        self.declaration.sql_declaration(self, column, platform)
    }

    /// Enum columns are not self-describing and always need a comment hint
    pub fn requires_comment_hint(&self, _platform: &dyn Platform) -> bool {
        true
    }

    /// The comment hint identifying this codec's registered name
    pub fn comment_hint(&self) -> String {
        format_type_hint(self.name())
    }

    /// Column value to enum member
    ///
    /// `None` passes through unvalidated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnumValue` listing every accepted value in declaration
    /// order when `raw` denotes no member.
    pub fn decode(
        &self,
        raw: Option<&ScalarValue>,
        platform: &dyn Platform,
    ) -> Result<Option<EnumInstance>> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        match self.class.of(raw) {
            Some(instance) => Ok(Some(instance)),
            None => {
                let expected: Vec<String> = self
                    .class
                    .values()
                    .iter()
                    .map(|v| v.to_string())
                    .collect();
                tracing::debug!(
                    component = module_path!(),
                    op = "decode",
                    type_key = self.name(),
                    enum_name = self.class.name(),
                    platform = platform.name(),
                    value = %raw,
                    "rejected column value"
                );
                Err(DbEnumError::InvalidEnumValue {
                    value: raw.to_text(),
                    enum_name: self.class.name().to_string(),
                    expected,
                })
            }
        }
    }

    /// Decode straight to the typed member
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnumValue` as [`EnumType::decode`] does, or `Internal`
    /// when this codec is bound to a type other than `E`.
    pub fn decode_as<E: Enumerated>(
        &self,
        raw: Option<&ScalarValue>,
        platform: &dyn Platform,
    ) -> Result<Option<&'static E>> {
        match self.decode(raw, platform)? {
            None => Ok(None),
            Some(instance) => instance.downcast::<E>().map(Some).ok_or_else(|| {
                DbEnumError::Internal {
                    message: format!(
                        "codec \"{}\" is bound to \"{}\", not \"{}\"",
                        self.name(),
                        self.class.name(),
                        E::NAME
                    ),
                }
            }),
        }
    }

    /// Enum member to column value
    ///
    /// The caller is trusted to pass members of the bound type.
    pub fn encode(&self, value: Option<&EnumInstance>, _platform: &dyn Platform) -> Option<String> {
        value.map(|instance| instance.value().to_string())
    }
}

impl fmt::Debug for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumType")
            .field("name", &self.name())
            .field("enum", &self.class.name())
            .field("declaration", &self.declaration.kind())
            .finish()
    }
}
