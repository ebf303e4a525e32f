//! Schema generation for mapped tables
//!
//! Enum columns are declared through their registered codec; plain string
//! columns use the platform's varchar declaration. Every codec that asks for
//! a comment hint gets one, placed where the dialect wants it.

use crate::errors::Result;
use crate::platform::{ColumnComment, ColumnSpec, Platform};
use crate::registry::TypeRegistry;

/// A column and the registered type that codes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub column: ColumnSpec,
    /// Registry key; `None` maps the column as a plain string
    pub type_name: Option<String>,
}

impl ColumnMapping {
    pub fn enumerated(column: ColumnSpec, type_name: impl Into<String>) -> Self {
        Self {
            column,
            type_name: Some(type_name.into()),
        }
    }

    pub fn string(column: ColumnSpec) -> Self {
        Self {
            column,
            type_name: None,
        }
    }
}

/// A table and its mapped columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMapping {
    pub name: String,
    pub columns: Vec<ColumnMapping>,
}

impl TableMapping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, mapping: ColumnMapping) -> Self {
        self.columns.push(mapping);
        self
    }
}

/// Generates DDL from table mappings
pub struct SchemaGenerator<'a> {
    registry: &'a TypeRegistry,
    platform: &'a dyn Platform,
}

struct ColumnLine {
    definition: String,
    trailing: Option<String>,
}

impl<'a> SchemaGenerator<'a> {
    pub fn new(registry: &'a TypeRegistry, platform: &'a dyn Platform) -> Self {
        Self { registry, platform }
    }

    /// DDL statements creating `table`
    ///
    /// The first statement is `CREATE TABLE`; dialects that comment columns
    /// out of line append one statement per comment.
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` when a column names an unregistered type.
    pub fn create_table(&self, table: &TableMapping) -> Result<Vec<String>> {
        let mut lines = Vec::with_capacity(table.columns.len());
        let mut statements = Vec::new();

        for mapping in &table.columns {
            let column = &mapping.column;
            let (declaration, hint) = match &mapping.type_name {
                Some(type_name) => {
                    let codec = self.registry.get_type(type_name)?;
                    let hint = codec
                        .requires_comment_hint(self.platform)
                        .then(|| codec.comment_hint());
                    (codec.sql_declaration(column, self.platform), hint)
                }
                None => (self.platform.varchar_type_declaration(column), None),
            };

            let comment = match (&column.comment, hint) {
                (Some(text), Some(hint)) => Some(format!("{} {}", text, hint)),
                (Some(text), None) => Some(text.clone()),
                (None, hint) => hint,
            };

            let mut definition = format!("{} {}", column.name, declaration);
            if !column.nullable {
                definition.push_str(" NOT NULL");
            }

            let mut trailing = None;
            if let Some(comment) = comment {
                match self
                    .platform
                    .column_comment(&table.name, &column.name, &comment)
                {
                    ColumnComment::Inline(sql) => {
                        definition.push(' ');
                        definition.push_str(&sql);
                    }
                    ColumnComment::Trailing(sql) => trailing = Some(sql),
                    ColumnComment::Statement(sql) => statements.push(sql),
                }
            }
            lines.push(ColumnLine {
                definition,
                trailing,
            });
        }

        let mut create = format!("CREATE TABLE {} (\n", table.name);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            create.push_str("    ");
            create.push_str(&line.definition);
            if i != last {
                create.push(',');
            }
            if let Some(trailing) = &line.trailing {
                create.push(' ');
                create.push_str(trailing);
            }
            create.push('\n');
        }
        create.push(')');

        statements.insert(0, create);
        Ok(statements)
    }
}
