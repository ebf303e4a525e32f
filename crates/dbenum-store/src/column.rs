//! Enum columns over SQLite values
//!
//! `EnumColumn` runs a registered codec against rusqlite's value types.
//! `EnumCell` binds a typed member directly as a statement parameter or
//! reads one from a row.

#![allow(clippy::result_large_err)]

use std::fmt;

use dbenum_core::{EnumInstance, EnumType, Enumerated, ScalarValue, SqlitePlatform};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use rusqlite::Row;

use crate::errors::{decode_error, from_rusqlite, unsupported_value, Result};

/// A registered codec applied to SQLite values
#[derive(Debug, Clone, Copy)]
pub struct EnumColumn<'a> {
    codec: &'a EnumType,
}

impl<'a> EnumColumn<'a> {
    pub fn new(codec: &'a EnumType) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &'a EnumType {
        self.codec
    }

    /// Value to bind for `member`; `None` binds NULL
    pub fn to_sql(&self, member: Option<&EnumInstance>) -> Value {
        match self.codec.encode(member, &SqlitePlatform) {
            Some(text) => Value::Text(text),
            None => Value::Null,
        }
    }

    /// Member stored in `value`; NULL reads as `None`
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfiguration` error listing the accepted values
    /// when the stored value denotes no member, or `Serialization` for BLOBs
    /// and non-UTF-8 text.
    pub fn from_sql(&self, value: ValueRef<'_>) -> Result<Option<EnumInstance>> {
        let raw = match scalar_of(value) {
            Ok(raw) => raw,
            Err(storage_class) => return Err(unsupported_value(self.codec.name(), storage_class)),
        };
        self.codec
            .decode(raw.as_ref(), &SqlitePlatform)
            .map_err(|err| decode_error(self.codec.name(), err))
    }

    /// Read column `idx` of `row`
    ///
    /// # Errors
    ///
    /// Returns `Persistence` when `idx` is out of range, otherwise as
    /// [`EnumColumn::from_sql`].
    pub fn get(&self, row: &Row<'_>, idx: usize) -> Result<Option<EnumInstance>> {
        let value = row.get_ref(idx).map_err(from_rusqlite)?;
        self.from_sql(value)
    }
}

/// The codec input for a stored value, or the storage class name when none
/// applies
fn scalar_of(value: ValueRef<'_>) -> std::result::Result<Option<ScalarValue>, &'static str> {
    match value {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(n) => Ok(Some(ScalarValue::Integer(n))),
        ValueRef::Real(r) => Ok(Some(ScalarValue::Real(r))),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|text| Some(ScalarValue::from(text)))
            .map_err(|_| "non-UTF-8 TEXT"),
        ValueRef::Blob(_) => Err("BLOB"),
    }
}

/// A typed enum member as a SQL parameter or row value
///
/// Nullable columns read as `Option<EnumCell<E>>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumCell<E: Enumerated>(pub &'static E);

impl<E: Enumerated> EnumCell<E> {
    pub fn new(member: &E) -> Self {
        Self(member.member())
    }

    pub fn get(self) -> &'static E {
        self.0
    }
}

impl<E: Enumerated> fmt::Display for EnumCell<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.value(), f)
    }
}

impl<E: Enumerated> ToSql for EnumCell<E> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(Value::Text(self.0.value().to_string())))
    }
}

impl<E: Enumerated> FromSql for EnumCell<E> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match scalar_of(value) {
            Ok(Some(raw)) => E::try_of(&raw)
                .map(EnumCell)
                .map_err(|err| FromSqlError::Other(Box::new(err))),
            Ok(None) | Err(_) => Err(FromSqlError::InvalidType),
        }
    }
}
