//! SQL dialect descriptors
//!
//! A `Platform` knows how to declare a generic string column and where a
//! column comment goes in its dialect. Codecs and the schema generator only
//! ever see `&dyn Platform`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column metadata handed to declaration generators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    pub name: String,
    pub length: Option<u32>,
    pub fixed: bool,
    pub nullable: bool,
    pub comment: Option<String>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Where a column comment is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnComment {
    /// Part of the column definition, after the type
    Inline(String),
    /// After the column definition and its separator, up to end of line
    Trailing(String),
    /// A separate statement following `CREATE TABLE`
    Statement(String),
}

/// Abstract SQL dialect descriptor
pub trait Platform: fmt::Debug + Send + Sync {
    /// Dialect name
    fn name(&self) -> &'static str;

    /// Whether column types may be declared as `ENUM(...)`
    fn supports_native_enum(&self) -> bool {
        false
    }

    /// Length used when a string column does not specify one
    fn default_varchar_length(&self) -> u32 {
        255
    }

    /// Generic variable-length string column declaration
    fn varchar_type_declaration(&self, column: &ColumnSpec) -> String {
        let length = column
            .length
            .unwrap_or_else(|| self.default_varchar_length());
        if column.fixed {
            format!("CHAR({})", length)
        } else {
            format!("VARCHAR({})", length)
        }
    }

    /// Quote a string literal for this dialect
    fn quote_string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Render a column comment
    fn column_comment(&self, table: &str, column: &str, comment: &str) -> ColumnComment;
}

/// MySQL / MariaDB
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlPlatform;

impl Platform for MySqlPlatform {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn supports_native_enum(&self) -> bool {
        true
    }

    fn quote_string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn column_comment(&self, _table: &str, _column: &str, comment: &str) -> ColumnComment {
        ColumnComment::Inline(format!("COMMENT {}", self.quote_string_literal(comment)))
    }
}

/// PostgreSQL
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgreSqlPlatform;

impl Platform for PostgreSqlPlatform {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn column_comment(&self, table: &str, column: &str, comment: &str) -> ColumnComment {
        ColumnComment::Statement(format!(
            "COMMENT ON COLUMN {}.{} IS {}",
            table,
            column,
            self.quote_string_literal(comment)
        ))
    }
}

/// SQLite
///
/// SQLite has no column comments, but keeps the original `CREATE TABLE`
/// text in `sqlite_master`, so a trailing `--` comment survives and can be
/// read back.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlitePlatform;

impl Platform for SqlitePlatform {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn column_comment(&self, _table: &str, _column: &str, comment: &str) -> ColumnComment {
        let single_line = comment.replace(['\r', '\n'], " ");
        ColumnComment::Trailing(format!("-- {}", single_line))
    }
}
