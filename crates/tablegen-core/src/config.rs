//! Generation configuration.
//!
//! Loading configuration from disk belongs to the caller. These types are
//! what the core reads: one [`Configuration`] holding logical contexts, each
//! holding table configurations with naming rules and column overrides.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::naming::{compose_qualified_name, has_value};

/// How a declared generated key obtains its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedKeyKind {
    /// Database identity / auto-increment column.
    #[default]
    Identity,
    /// Retrieved through the driver's standard generated-keys support.
    JdbcStandard,
    /// Produced by a sequence before insert.
    Sequence,
}

/// Declaration that one column's value is produced by the database.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedKey {
    pub column: String,
    pub kind: GeneratedKeyKind,
    /// Statement used to fetch the key, when the dialect needs one.
    pub sql_statement: Option<String>,
}

impl GeneratedKey {
    pub fn identity(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: GeneratedKeyKind::Identity,
            sql_statement: None,
        }
    }

    pub fn sequence(column: impl Into<String>, sql_statement: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: GeneratedKeyKind::Sequence,
            sql_statement: Some(sql_statement.into()),
        }
    }

    pub fn jdbc_standard(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: GeneratedKeyKind::JdbcStandard,
            sql_statement: None,
        }
    }

    /// Identity and JDBC-standard keys mark the column as identity.
    pub fn is_identity(&self) -> bool {
        matches!(
            self.kind,
            GeneratedKeyKind::Identity | GeneratedKeyKind::JdbcStandard
        )
    }
}

/// Regex search/replace applied to column names before property derivation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRenamingRule {
    pub search: String,
    /// Replacement text; `None` removes matches.
    pub replace: Option<String>,
}

impl ColumnRenamingRule {
    pub fn new(search: impl Into<String>, replace: Option<&str>) -> Self {
        Self {
            search: search.into(),
            replace: replace.map(str::to_string),
        }
    }
}

/// Per-column settings that win over introspected values.
///
/// Unset fields leave the introspected value alone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOverride {
    pub column_name: String,
    pub property_name: Option<String>,
    pub language_type: Option<String>,
    pub jdbc_type: Option<String>,
    pub type_handler: Option<String>,
    pub delimited: bool,
    pub generated_always: Option<bool>,
}

impl ColumnOverride {
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            ..Self::default()
        }
    }

    pub fn property_name(mut self, name: impl Into<String>) -> Self {
        self.property_name = Some(name.into());
        self
    }

    pub fn language_type(mut self, fully_qualified: impl Into<String>) -> Self {
        self.language_type = Some(fully_qualified.into());
        self
    }

    pub fn jdbc_type(mut self, name: impl Into<String>) -> Self {
        self.jdbc_type = Some(name.into());
        self
    }

    pub fn type_handler(mut self, handler: impl Into<String>) -> Self {
        self.type_handler = Some(handler.into());
        self
    }

    pub fn delimited(mut self, value: bool) -> Self {
        self.delimited = value;
        self
    }

    pub fn generated_always(mut self, value: bool) -> Self {
        self.generated_always = Some(value);
        self
    }

    /// Whether this override supplies an explicit language type.
    pub fn has_language_type(&self) -> bool {
        has_value(self.language_type.as_deref())
    }
}

/// A column excluded from introspection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoredColumn {
    pub column: String,
    /// Delimited names match case-sensitively.
    pub delimited: bool,
}

impl IgnoredColumn {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            delimited: false,
        }
    }

    pub fn matches(&self, column_name: &str) -> bool {
        if self.delimited {
            self.column == column_name
        } else {
            self.column.eq_ignore_ascii_case(column_name)
        }
    }
}

/// Naming flags and runtime qualifiers of a table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableProperties {
    pub use_actual_column_names: bool,
    pub use_compound_property_names: bool,
    pub ignore_qualifiers_at_runtime: bool,
    pub runtime_catalog: Option<String>,
    pub runtime_schema: Option<String>,
    pub runtime_table_name: Option<String>,
}

/// Configuration for one table name pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    /// Table name; may contain `%` / `_` wildcards.
    pub table_name: String,
    pub domain_object_name: Option<String>,
    pub alias: Option<String>,
    pub ignored_columns: Vec<IgnoredColumn>,
    pub column_overrides: Vec<ColumnOverride>,
    pub column_renaming_rule: Option<ColumnRenamingRule>,
    pub generated_key: Option<GeneratedKey>,
    pub properties: TableProperties,
    /// Delimit every column name.
    pub all_column_delimiting: bool,
    /// Delimit catalog, schema and table identifiers.
    pub delimit_identifiers: bool,
}

impl TableConfig {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
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

    pub fn domain_object_name(mut self, name: impl Into<String>) -> Self {
        self.domain_object_name = Some(name.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn ignore_column(mut self, column: impl Into<String>) -> Self {
        self.ignored_columns.push(IgnoredColumn::new(column));
        self
    }

    pub fn column_override(mut self, co: ColumnOverride) -> Self {
        self.column_overrides.push(co);
        self
    }

    pub fn column_renaming_rule(mut self, rule: ColumnRenamingRule) -> Self {
        self.column_renaming_rule = Some(rule);
        self
    }

    pub fn generated_key(mut self, key: GeneratedKey) -> Self {
        self.generated_key = Some(key);
        self
    }

    pub fn use_actual_column_names(mut self, value: bool) -> Self {
        self.properties.use_actual_column_names = value;
        self
    }

    pub fn use_compound_property_names(mut self, value: bool) -> Self {
        self.properties.use_compound_property_names = value;
        self
    }

    pub fn ignore_qualifiers_at_runtime(mut self, value: bool) -> Self {
        self.properties.ignore_qualifiers_at_runtime = value;
        self
    }

    pub fn all_column_delimiting(mut self, value: bool) -> Self {
        self.all_column_delimiting = value;
        self
    }

    pub fn delimit_identifiers(mut self, value: bool) -> Self {
        self.delimit_identifiers = value;
        self
    }

    /// Whether `column_name` is on the ignore list.
    pub fn is_column_ignored(&self, column_name: &str) -> bool {
        self.ignored_columns.iter().any(|ic| ic.matches(column_name))
    }

    /// The override for a column, matched on the exact actual name.
    pub fn column_override_for(&self, column_name: &str) -> Option<&ColumnOverride> {
        self.column_overrides
            .iter()
            .find(|co| co.column_name == column_name)
    }

    /// The configured pattern as `catalog.schema.table`.
    pub fn pattern_name(&self) -> String {
        compose_qualified_name(
            self.catalog.as_deref(),
            self.schema.as_deref(),
            &self.table_name,
        )
    }

    fn validate_into(&self, context_id: &str, errors: &mut Vec<String>) {
        if !has_value(Some(&self.table_name)) {
            errors.push(format!(
                "context {}: table configuration is missing a table name",
                context_id
            ));
            return;
        }
        let table = self.pattern_name();

        if let Some(gk) = &self.generated_key {
            if !has_value(Some(&gk.column)) {
                errors.push(format!("table {}: generated key has no column", table));
            }
        }
        if let Some(rule) = &self.column_renaming_rule {
            if !has_value(Some(&rule.search)) {
                errors.push(format!("table {}: column renaming rule has no search string", table));
            } else if let Err(e) = Regex::new(&rule.search) {
                errors.push(format!(
                    "table {}: invalid column renaming pattern {}: {}",
                    table, rule.search, e
                ));
            }
        }
        for co in &self.column_overrides {
            if !has_value(Some(&co.column_name)) {
                errors.push(format!("table {}: column override has no column name", table));
            }
        }
        for ic in &self.ignored_columns {
            if !has_value(Some(&ic.column)) {
                errors.push(format!("table {}: ignored column has no name", table));
            }
        }
    }
}

/// How to read a column whose nullability the metadata source left unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nullability {
    Nullable,
    #[default]
    NotNullable,
}

impl Nullability {
    pub fn resolve(self, reported: Option<bool>) -> bool {
        reported.unwrap_or(self == Nullability::Nullable)
    }
}

/// One logical configuration unit: a set of tables generated together.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub id: String,
    /// Delimit column names that collide with SQL reserved words.
    pub auto_delimit_keywords: bool,
    pub unknown_nullability: Nullability,
    pub force_big_decimals: bool,
    pub tables: Vec<TableConfig>,
}

impl ContextConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn auto_delimit_keywords(mut self, value: bool) -> Self {
        self.auto_delimit_keywords = value;
        self
    }

    pub fn unknown_nullability(mut self, value: Nullability) -> Self {
        self.unknown_nullability = value;
        self
    }

    pub fn force_big_decimals(mut self, value: bool) -> Self {
        self.force_big_decimals = value;
        self
    }

    pub fn table(mut self, table: TableConfig) -> Self {
        self.tables.push(table);
        self
    }

    /// One introspection step per table configuration.
    pub fn introspection_steps(&self) -> usize {
        self.tables.len()
    }
}

/// Top-level configuration of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub contexts: Vec<ContextConfig>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(mut self, context: ContextConfig) -> Self {
        self.contexts.push(context);
        self
    }

    /// Parse a JSON configuration document. Does not validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        if self.contexts.is_empty() {
            errors.push("configuration has no contexts".to_string());
        }

        let mut seen = HashSet::new();
        for ctx in &self.contexts {
            if !has_value(Some(&ctx.id)) {
                errors.push("context is missing an id".to_string());
            } else if !seen.insert(ctx.id.as_str()) {
                errors.push(format!("duplicate context id {}", ctx.id));
            }
            if ctx.tables.is_empty() {
                errors.push(format!("context {} has no table configurations", ctx.id));
            }
            for table in &ctx.tables {
                table.validate_into(&ctx.id, &mut errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError { errors })
        }
    }
}
