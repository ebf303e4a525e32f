//! Column declaration strategies
//!
//! How an enum column is declared in DDL is chosen per registry entry. The
//! default stores enums in a generic string column; the inline variant lists
//! the accepted values in the column type itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::codec::EnumType;
use crate::errors::quote_list;
use crate::platform::{ColumnSpec, Platform};

/// Produces the SQL type declaration for an enum column
pub trait ColumnDeclaration: fmt::Debug + Send + Sync {
    /// Which configured variant this strategy is
    fn kind(&self) -> DeclarationKind;

    /// SQL declaration for `column` coded by `codec`
    fn sql_declaration(&self, codec: &EnumType, column: &ColumnSpec, platform: &dyn Platform)
        -> String;
}

/// Generic variable-length string column
#[derive(Debug, Clone, Copy, Default)]
pub struct VarcharDeclaration;

impl ColumnDeclaration for VarcharDeclaration {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Varchar
    }

    fn sql_declaration(
        &self,
        _codec: &EnumType,
        column: &ColumnSpec,
        platform: &dyn Platform,
    ) -> String {
        platform.varchar_type_declaration(column)
    }
}

/// `ENUM("a", "b") COMMENT "<name>"`, for dialects with a native enum type
///
/// On platforms without one the column falls back to the platform's
/// varchar declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineEnumDeclaration;

impl ColumnDeclaration for InlineEnumDeclaration {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::InlineEnum
    }

    fn sql_declaration(
        &self,
        codec: &EnumType,
        column: &ColumnSpec,
        platform: &dyn Platform,
    ) -> String {
        if !platform.supports_native_enum() {
            return platform.varchar_type_declaration(column);
        }
        let values: Vec<String> = codec
            .enum_class()
            .values()
            .iter()
            .map(|v| v.to_string())
            .collect();
        format!("ENUM({}) COMMENT \"{}\"", quote_list(&values), codec.name())
    }
}

/// Configuration name of a declaration strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    #[default]
    Varchar,
    InlineEnum,
}

impl DeclarationKind {
    /// The strategy this name selects
    pub fn strategy(self) -> Arc<dyn ColumnDeclaration> {
        match self {
            DeclarationKind::Varchar => Arc::new(VarcharDeclaration),
            DeclarationKind::InlineEnum => Arc::new(InlineEnumDeclaration),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Varchar => "varchar",
            DeclarationKind::InlineEnum => "inline_enum",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
