//! Resolved column model.

use crate::types::{LanguageType, is_blob_type_name};

/// A column after name, type and key resolution.
///
/// Built once by the column resolver and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// Column name as stored in the database.
    pub actual_name: String,
    /// Derived property name in generated code.
    pub property_name: String,
    /// Raw `java.sql.Types` code.
    pub jdbc_type: i32,
    /// JDBC type label, e.g. `VARCHAR`; `OTHER` when unresolved.
    pub jdbc_type_name: String,
    /// Target-language type.
    pub language_type: LanguageType,
    pub nullable: bool,
    /// Column length or numeric precision.
    pub length: u32,
    /// Digits after the decimal point.
    pub scale: u32,
    pub remarks: Option<String>,
    pub default_value: Option<String>,
    /// Value comes from an identity / auto-increment generated key.
    pub identity: bool,
    /// Value comes from a sequence generated key.
    pub sequence_column: bool,
    /// Column must never appear in insert or update statements.
    pub generated_always: bool,
    /// Database reported a computed column.
    pub generated_column: bool,
    /// Database reported auto-increment.
    pub auto_increment: bool,
    /// Column name must be quoted in SQL.
    pub delimited: bool,
    /// Custom type handler class.
    pub type_handler: Option<String>,
    /// Alias of the owning table, for qualified column references.
    pub table_alias: Option<String>,
}

impl ResolvedColumn {
    /// Create a column with the given name and type; every flag off.
    pub fn new(actual_name: impl Into<String>, jdbc_type: i32, language_type: LanguageType) -> Self {
        let actual_name = actual_name.into();
        Self {
            property_name: actual_name.clone(),
            actual_name,
            jdbc_type,
            jdbc_type_name: "OTHER".to_string(),
            language_type,
            nullable: false,
            length: 0,
            scale: 0,
            remarks: None,
            default_value: None,
            identity: false,
            sequence_column: false,
            generated_always: false,
            generated_column: false,
            auto_increment: false,
            delimited: false,
            type_handler: None,
            table_alias: None,
        }
    }

    /// Set the property name.
    pub fn property_name(mut self, name: impl Into<String>) -> Self {
        self.property_name = name.into();
        self
    }

    /// Set the JDBC type label.
    pub fn jdbc_type_name(mut self, name: impl Into<String>) -> Self {
        self.jdbc_type_name = name.into();
        self
    }

    /// Set nullable flag.
    pub fn nullable(mut self, value: bool) -> Self {
        self.nullable = value;
        self
    }

    /// Set identity flag.
    pub fn identity(mut self, value: bool) -> Self {
        self.identity = value;
        self
    }

    /// Set generated-always flag.
    pub fn generated_always(mut self, value: bool) -> Self {
        self.generated_always = value;
        self
    }

    /// Set delimited flag.
    pub fn delimited(mut self, value: bool) -> Self {
        self.delimited = value;
        self
    }

    /// Whether the column holds large objects and belongs to the BLOB partition.
    pub fn is_blob(&self) -> bool {
        is_blob_type_name(&self.jdbc_type_name)
    }

    /// Whether the generated key declaration `name` refers to this column.
    ///
    /// Delimited columns compare case-sensitively.
    pub fn matches_name(&self, name: &str) -> bool {
        if self.delimited {
            self.actual_name == name
        } else {
            self.actual_name.eq_ignore_ascii_case(name)
        }
    }

    /// The column name as it should appear in SQL text.
    pub fn escaped_name(&self, begin_delimiter: &str, end_delimiter: &str) -> String {
        if self.delimited {
            format!("{}{}{}", begin_delimiter, self.actual_name, end_delimiter)
        } else {
            self.actual_name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::jdbc;

    fn column(name: &str) -> ResolvedColumn {
        ResolvedColumn::new(name, jdbc::VARCHAR, LanguageType::new("java.lang.String"))
            .jdbc_type_name("VARCHAR")
    }

    #[test]
    fn test_new_defaults_property_to_column_name() {
        let col = column("email");
        assert_eq!(col.property_name, "email");
        assert!(!col.identity);
        assert!(!col.delimited);
    }

    #[test]
    fn test_matches_name_respects_delimiting() {
        let col = column("UserId");
        assert!(col.matches_name("USERID"));

        let col = col.delimited(true);
        assert!(!col.matches_name("USERID"));
        assert!(col.matches_name("UserId"));
    }

    #[test]
    fn test_is_blob() {
        assert!(!column("email").is_blob());
        assert!(column("body").jdbc_type_name("LONGVARCHAR").is_blob());
    }

    #[test]
    fn test_escaped_name() {
        assert_eq!(column("order").escaped_name("`", "`"), "order");
        assert_eq!(column("order").delimited(true).escaped_name("`", "`"), "`order`");
    }
}
