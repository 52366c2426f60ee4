//! Table metadata sources.

use regex::{Regex, RegexBuilder};
use tablegen_core::naming::has_value;
use tablegen_core::{Error, Result, TableMetadata};

/// Supplies table metadata for a table configuration pattern.
///
/// Patterns use SQL `LIKE` wildcards: `%` for any run of characters and
/// `_` for one character. A `None` or blank catalog / schema matches any.
/// Failing to supply metadata is fatal for the run.
pub trait TableMetadataSource {
    fn tables(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table_pattern: &str,
    ) -> Result<Vec<TableMetadata>>;
}

/// Metadata source backed by an in-memory list of tables.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataSource {
    tables: Vec<TableMetadata>,
}

impl StaticMetadataSource {
    pub fn new(tables: impl IntoIterator<Item = TableMetadata>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    pub fn push(&mut self, table: TableMetadata) {
        self.tables.push(table);
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableMetadataSource for StaticMetadataSource {
    fn tables(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table_pattern: &str,
    ) -> Result<Vec<TableMetadata>> {
        let catalog = optional_pattern(catalog)?;
        let schema = optional_pattern(schema)?;
        let table = like_pattern(table_pattern)?;

        Ok(self
            .tables
            .iter()
            .filter(|t| matches_part(catalog.as_ref(), t.catalog.as_deref()))
            .filter(|t| matches_part(schema.as_ref(), t.schema.as_deref()))
            .filter(|t| table.is_match(&t.name))
            .cloned()
            .collect())
    }
}

fn optional_pattern(pattern: Option<&str>) -> Result<Option<Regex>> {
    match pattern {
        Some(p) if has_value(Some(p)) => like_pattern(p).map(Some),
        _ => Ok(None),
    }
}

fn matches_part(pattern: Option<&Regex>, value: Option<&str>) -> bool {
    match pattern {
        None => true,
        Some(regex) => value.is_some_and(|v| regex.is_match(v)),
    }
}

/// Compile a SQL `LIKE` pattern into an anchored, case-insensitive regex.
pub fn like_pattern(pattern: &str) -> Result<Regex> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    let mut literal = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            _ => source.push_str(&regex::escape(c.encode_utf8(&mut literal))),
        }
    }
    source.push('$');

    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::metadata(format!("invalid table pattern {}: {}", pattern, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablegen_core::{RawColumn, jdbc};

    fn source() -> StaticMetadataSource {
        StaticMetadataSource::new([
            TableMetadata::new("users").schema("public").column(RawColumn::new("id", jdbc::INTEGER)),
            TableMetadata::new("user_roles").schema("public"),
            TableMetadata::new("users").schema("audit"),
            TableMetadata::new("orders"),
        ])
    }

    fn names(tables: &[TableMetadata]) -> Vec<String> {
        tables.iter().map(|t| t.actual_name().to_string()).collect()
    }

    #[test]
    fn test_like_pattern() {
        let p = like_pattern("user_").unwrap();
        assert!(p.is_match("users"));
        assert!(p.is_match("USERX"));
        assert!(!p.is_match("user"));

        let p = like_pattern("a.b%").unwrap();
        assert!(p.is_match("a.bc"));
        assert!(!p.is_match("axbc"));
    }

    #[test]
    fn test_unqualified_pattern_matches_every_schema() {
        let tables = source().tables(None, None, "users").unwrap();
        assert_eq!(names(&tables), vec!["public.users", "audit.users"]);
    }

    #[test]
    fn test_schema_restricts_matches() {
        let tables = source().tables(None, Some("public"), "user%").unwrap();
        assert_eq!(names(&tables), vec!["public.users", "public.user_roles"]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        assert!(source().tables(None, None, "missing").unwrap().is_empty());
    }
}
