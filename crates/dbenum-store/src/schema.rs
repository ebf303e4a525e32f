//! Enum-mapped tables in SQLite
//!
//! SQLite keeps the `CREATE TABLE` text verbatim in `sqlite_master`, so the
//! trailing `-- (EnumType:<name>)` comments written at creation can be read
//! back to find which registered codec owns each column.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use dbenum_core::{
    log_op_end, log_op_error, log_op_start, EnumType, ExError, SchemaGenerator, SqlitePlatform,
    TableMapping, TypeRegistry,
};
use dbenum_core_types::parse_type_hint;
use rusqlite::{Connection, OptionalExtension};

use crate::errors::{ddl_error, from_rusqlite, table_not_found, Result};

/// An enum column recovered from the stored schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumColumnInfo {
    pub column: String,
    pub type_name: String,
}

/// Create `table` with its enum columns declared by their codecs
///
/// # Errors
///
/// Returns `NotFound` when a column names an unregistered type, or
/// `Persistence` when SQLite refuses the DDL. The SQLite error is kept as
/// the source.
pub fn create_table(
    conn: &Connection,
    table: &TableMapping,
    registry: &TypeRegistry,
) -> Result<()> {
    let started = Instant::now();
    log_op_start!("create_table", table = table.name.as_str());

    let result = SchemaGenerator::new(registry, &SqlitePlatform)
        .create_table(table)
        .map_err(ExError::from)
        .and_then(|statements| {
            statements
                .iter()
                .try_for_each(|sql| {
                    conn.execute_batch(sql)
                        .map_err(|err| ddl_error(&table.name, err))
                })
        });

    match result {
        Ok(()) => {
            log_op_end!(
                "create_table",
                duration_ms = started.elapsed().as_millis() as u64,
                table = table.name.as_str()
            );
            Ok(())
        }
        Err(err) => {
            log_op_error!(
                "create_table",
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64,
                table = table.name.as_str()
            );
            Err(err)
        }
    }
}

/// Enum columns of `table`, in column order
///
/// # Errors
///
/// Returns `NotFound` when the table does not exist.
pub fn introspect_enum_columns(conn: &Connection, table: &str) -> Result<Vec<EnumColumnInfo>> {
    let sql: Option<String> = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;
    let sql = sql.ok_or_else(|| table_not_found(table))?;

    Ok(sql.lines().filter_map(enum_column_of_line).collect())
}

/// Registered codecs for the enum columns of `table`
///
/// # Errors
///
/// Returns `NotFound` when the table does not exist or a hint names a type
/// the registry does not know.
pub fn column_codecs<'r>(
    conn: &Connection,
    table: &str,
    registry: &'r TypeRegistry,
) -> Result<Vec<(String, &'r EnumType)>> {
    introspect_enum_columns(conn, table)?
        .into_iter()
        .map(|info| -> Result<(String, &'r EnumType)> {
            let codec = registry.get_type(&info.type_name)?;
            Ok((info.column, codec))
        })
        .collect()
}

fn enum_column_of_line(line: &str) -> Option<EnumColumnInfo> {
    let (definition, comment) = line.split_once("--")?;
    let type_name = parse_type_hint(comment)?;
    let column = definition.split_whitespace().next()?;
    Some(EnumColumnInfo {
        column: column.trim_matches(|c| c == '"' || c == '`').to_string(),
        type_name,
    })
}
