//! JDBC type codes and their mapping onto target-language types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metadata::RawColumn;

/// `java.sql.Types` constants.
pub mod jdbc {
    pub const ARRAY: i32 = 2003;
    pub const BIGINT: i32 = -5;
    pub const BINARY: i32 = -2;
    pub const BIT: i32 = -7;
    pub const BLOB: i32 = 2004;
    pub const BOOLEAN: i32 = 16;
    pub const CHAR: i32 = 1;
    pub const CLOB: i32 = 2005;
    pub const DATALINK: i32 = 70;
    pub const DATE: i32 = 91;
    pub const DECIMAL: i32 = 3;
    pub const DISTINCT: i32 = 2001;
    pub const DOUBLE: i32 = 8;
    pub const FLOAT: i32 = 6;
    pub const INTEGER: i32 = 4;
    pub const JAVA_OBJECT: i32 = 2000;
    pub const LONGNVARCHAR: i32 = -16;
    pub const LONGVARBINARY: i32 = -4;
    pub const LONGVARCHAR: i32 = -1;
    pub const NCHAR: i32 = -15;
    pub const NCLOB: i32 = 2011;
    pub const NULL: i32 = 0;
    pub const NUMERIC: i32 = 2;
    pub const NVARCHAR: i32 = -9;
    pub const OTHER: i32 = 1111;
    pub const REAL: i32 = 7;
    pub const REF: i32 = 2006;
    pub const SMALLINT: i32 = 5;
    pub const STRUCT: i32 = 2002;
    pub const TIME: i32 = 92;
    pub const TIME_WITH_TIMEZONE: i32 = 2013;
    pub const TIMESTAMP: i32 = 93;
    pub const TIMESTAMP_WITH_TIMEZONE: i32 = 2014;
    pub const TINYINT: i32 = -6;
    pub const VARBINARY: i32 = -3;
    pub const VARCHAR: i32 = 12;
}

/// JDBC type names whose columns are treated as large objects.
const BLOB_TYPE_NAMES: &[&str] = &[
    "BINARY",
    "BLOB",
    "CLOB",
    "LONGNVARCHAR",
    "LONGVARBINARY",
    "LONGVARCHAR",
    "NCLOB",
    "VARBINARY",
];

/// Whether a JDBC type name denotes a BLOB-style column.
pub fn is_blob_type_name(name: &str) -> bool {
    BLOB_TYPE_NAMES.contains(&name)
}

/// A fully qualified target-language type, e.g. `java.lang.Integer`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageType(String);

impl LanguageType {
    pub fn new(fully_qualified: impl Into<String>) -> Self {
        Self(fully_qualified.into())
    }

    /// The generic fallback used when a type code cannot be resolved.
    pub fn object() -> Self {
        Self::new("java.lang.Object")
    }

    pub fn fully_qualified_name(&self) -> &str {
        &self.0
    }

    /// Name without its package, e.g. `Integer`.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for LanguageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output of a [`TypeResolver`]: the language type and the JDBC type label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub language_type: LanguageType,
    pub jdbc_type_name: String,
}

/// Maps a raw column's type code onto a language type.
pub trait TypeResolver {
    /// `None` when the type code is not understood.
    fn resolve(&self, column: &RawColumn) -> Option<ResolvedType>;
}

/// Default resolver following the standard JDBC to Java mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct JdbcTypeResolver {
    /// Always map DECIMAL/NUMERIC to `BigDecimal` instead of narrowing.
    pub force_big_decimals: bool,
}

impl JdbcTypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force_big_decimals(mut self, value: bool) -> Self {
        self.force_big_decimals = value;
        self
    }

    fn decimal_type(&self, column: &RawColumn) -> &'static str {
        if self.force_big_decimals || column.decimal_digits > 0 || column.size > 18 {
            "java.math.BigDecimal"
        } else if column.size > 9 {
            "java.lang.Long"
        } else if column.size > 4 {
            "java.lang.Integer"
        } else {
            "java.lang.Short"
        }
    }
}

impl TypeResolver for JdbcTypeResolver {
    fn resolve(&self, column: &RawColumn) -> Option<ResolvedType> {
        let (name, java) = match column.data_type {
            jdbc::ARRAY => ("ARRAY", "java.lang.Object"),
            jdbc::BIGINT => ("BIGINT", "java.lang.Long"),
            jdbc::BINARY => ("BINARY", "byte[]"),
            jdbc::BIT => ("BIT", "java.lang.Boolean"),
            jdbc::BLOB => ("BLOB", "byte[]"),
            jdbc::BOOLEAN => ("BOOLEAN", "java.lang.Boolean"),
            jdbc::CHAR => ("CHAR", "java.lang.String"),
            jdbc::CLOB => ("CLOB", "java.lang.String"),
            jdbc::DATALINK => ("DATALINK", "java.lang.Object"),
            jdbc::DATE => ("DATE", "java.util.Date"),
            jdbc::DECIMAL => ("DECIMAL", self.decimal_type(column)),
            jdbc::DISTINCT => ("DISTINCT", "java.lang.Object"),
            jdbc::DOUBLE => ("DOUBLE", "java.lang.Double"),
            jdbc::FLOAT => ("FLOAT", "java.lang.Double"),
            jdbc::INTEGER => ("INTEGER", "java.lang.Integer"),
            jdbc::JAVA_OBJECT => ("JAVA_OBJECT", "java.lang.Object"),
            jdbc::LONGNVARCHAR => ("LONGNVARCHAR", "java.lang.String"),
            jdbc::LONGVARBINARY => ("LONGVARBINARY", "byte[]"),
            jdbc::LONGVARCHAR => ("LONGVARCHAR", "java.lang.String"),
            jdbc::NCHAR => ("NCHAR", "java.lang.String"),
            jdbc::NCLOB => ("NCLOB", "java.lang.String"),
            jdbc::NVARCHAR => ("NVARCHAR", "java.lang.String"),
            jdbc::NULL => ("NULL", "java.lang.Object"),
            jdbc::NUMERIC => ("NUMERIC", self.decimal_type(column)),
            jdbc::OTHER => ("OTHER", "java.lang.Object"),
            jdbc::REAL => ("REAL", "java.lang.Float"),
            jdbc::REF => ("REF", "java.lang.Object"),
            jdbc::SMALLINT => ("SMALLINT", "java.lang.Short"),
            jdbc::STRUCT => ("STRUCT", "java.lang.Object"),
            jdbc::TIME => ("TIME", "java.util.Date"),
            jdbc::TIME_WITH_TIMEZONE => ("TIME_WITH_TIMEZONE", "java.time.OffsetTime"),
            jdbc::TIMESTAMP => ("TIMESTAMP", "java.util.Date"),
            jdbc::TIMESTAMP_WITH_TIMEZONE => ("TIMESTAMP_WITH_TIMEZONE", "java.time.OffsetDateTime"),
            jdbc::TINYINT => ("TINYINT", "java.lang.Byte"),
            jdbc::VARBINARY => ("VARBINARY", "byte[]"),
            jdbc::VARCHAR => ("VARCHAR", "java.lang.String"),
            _ => return None,
        };

        Some(ResolvedType {
            language_type: LanguageType::new(java),
            jdbc_type_name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(column: &RawColumn) -> Option<ResolvedType> {
        JdbcTypeResolver::new().resolve(column)
    }

    #[test]
    fn test_resolve_common_types() {
        let int = resolve(&RawColumn::new("id", jdbc::INTEGER)).unwrap();
        assert_eq!(int.language_type.fully_qualified_name(), "java.lang.Integer");
        assert_eq!(int.jdbc_type_name, "INTEGER");

        let text = resolve(&RawColumn::new("name", jdbc::VARCHAR)).unwrap();
        assert_eq!(text.language_type.short_name(), "String");
    }

    #[test]
    fn test_decimal_narrowing() {
        let small = RawColumn::new("qty", jdbc::DECIMAL).size(4);
        let int = RawColumn::new("qty", jdbc::DECIMAL).size(9);
        let long = RawColumn::new("qty", jdbc::NUMERIC).size(18);
        let big = RawColumn::new("qty", jdbc::NUMERIC).size(19);
        let scaled = RawColumn::new("price", jdbc::DECIMAL).size(10).decimal_digits(2);

        assert_eq!(resolve(&small).unwrap().language_type.short_name(), "Short");
        assert_eq!(resolve(&int).unwrap().language_type.short_name(), "Integer");
        assert_eq!(resolve(&long).unwrap().language_type.short_name(), "Long");
        assert_eq!(resolve(&big).unwrap().language_type.short_name(), "BigDecimal");
        assert_eq!(resolve(&scaled).unwrap().language_type.short_name(), "BigDecimal");
    }

    #[test]
    fn test_force_big_decimals() {
        let resolver = JdbcTypeResolver::new().force_big_decimals(true);
        let col = RawColumn::new("qty", jdbc::DECIMAL).size(4);
        assert_eq!(
            resolver.resolve(&col).unwrap().language_type.short_name(),
            "BigDecimal"
        );
    }

    #[test]
    fn test_unknown_code_is_unresolved() {
        assert!(resolve(&RawColumn::new("geom", -155)).is_none());
    }

    #[test]
    fn test_blob_type_names() {
        assert!(is_blob_type_name("LONGVARCHAR"));
        assert!(is_blob_type_name("BLOB"));
        assert!(!is_blob_type_name("VARCHAR"));
    }
}
