//! Raw table metadata as supplied by an external metadata source.
//!
//! Nothing in here has behavior beyond construction and display; the
//! introspection crate turns these values into resolved models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::naming::compose_qualified_name;

/// A column exactly as the metadata source described it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawColumn {
    /// Column name as stored in the database.
    pub name: String,
    /// `java.sql.Types` style type code.
    pub data_type: i32,
    /// Column size (characters or precision).
    pub size: u32,
    /// Digits after the decimal point.
    pub decimal_digits: u32,
    /// `Some(true)` nullable, `Some(false)` not nullable, `None` unknown.
    pub nullable: Option<bool>,
    /// Default value expression text.
    pub default_value: Option<String>,
    /// Column comment.
    pub remarks: Option<String>,
    /// Database computes the value (GENERATED ALWAYS / computed column).
    pub generated_column: bool,
    /// Database auto-increments the value.
    pub auto_increment: bool,
    /// 1-based position in the primary key, 0 when not a key column.
    pub key_seq: u16,
}

impl RawColumn {
    /// Create a column with a name and type code; everything else empty.
    pub fn new(name: impl Into<String>, data_type: i32) -> Self {
        Self {
            name: name.into(),
            data_type,
            ..Self::default()
        }
    }

    /// Set the column size.
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set decimal digits.
    pub fn decimal_digits(mut self, digits: u32) -> Self {
        self.decimal_digits = digits;
        self
    }

    /// Set tri-state nullability.
    pub fn nullable(mut self, nullable: Option<bool>) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set the default value text.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the column comment.
    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Mark as a database-generated column.
    pub fn generated_column(mut self, value: bool) -> Self {
        self.generated_column = value;
        self
    }

    /// Mark as auto-increment.
    pub fn auto_increment(mut self, value: bool) -> Self {
        self.auto_increment = value;
        self
    }

    /// Set the primary key sequence number (0 = not a key).
    pub fn key_seq(mut self, seq: u16) -> Self {
        self.key_seq = seq;
        self
    }

    /// Whether the column takes part in the primary key.
    pub fn is_key(&self) -> bool {
        self.key_seq != 0
    }
}

/// Physical identity of a table: catalog, schema and table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ActualTableName {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table: String,
}

impl ActualTableName {
    pub fn new(catalog: Option<String>, schema: Option<String>, table: impl Into<String>) -> Self {
        Self {
            catalog,
            schema,
            table: table.into(),
        }
    }
}

impl fmt::Display for ActualTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compose_qualified_name(
            self.catalog.as_deref(),
            self.schema.as_deref(),
            &self.table,
        ))
    }
}

/// One physical table and its columns, in source order.
///
/// A metadata source may return several entries for the same physical
/// table; introspection groups their columns by [`ActualTableName`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableMetadata {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
    /// Database product label, e.g. `MySQL`.
    pub database_type: Option<String>,
    pub remarks: Option<String>,
    /// Table type label, e.g. `TABLE` or `VIEW`.
    pub table_type: Option<String>,
    pub columns: Vec<RawColumn>,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn database_type(mut self, label: impl Into<String>) -> Self {
        self.database_type = Some(label.into());
        self
    }

    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    pub fn table_type(mut self, label: impl Into<String>) -> Self {
        self.table_type = Some(label.into());
        self
    }

    pub fn column(mut self, column: RawColumn) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = RawColumn>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// The physical identity used for grouping.
    pub fn actual_name(&self) -> ActualTableName {
        ActualTableName::new(self.catalog.clone(), self.schema.clone(), self.name.clone())
    }

    /// Columns carrying a non-zero key sequence, in source order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &RawColumn> {
        self.columns.iter().filter(|c| c.is_key())
    }
}
