//! Introspected table model.

use std::fmt;

use crate::column::ResolvedColumn;
use crate::config::TableConfig;
use crate::metadata::ActualTableName;
use crate::naming::{camel_case, compose_qualified_name, has_value};

/// Audit columns maintained by the database rather than by generated code.
const AUDIT_TIMESTAMP_COLUMNS: &[&str] = &["gmt_created", "gmt_modified"];
const SOFT_DELETE_COLUMN: &str = "deleted";

/// Identity of an introspected table as generated code sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullyQualifiedTable {
    pub introspected_catalog: Option<String>,
    pub introspected_schema: Option<String>,
    pub introspected_table_name: String,
    pub domain_object_name: String,
    pub alias: Option<String>,
    pub ignore_qualifiers_at_runtime: bool,
    pub runtime_catalog: Option<String>,
    pub runtime_schema: Option<String>,
    pub runtime_table_name: Option<String>,
    pub delimit_identifiers: bool,
}

impl FullyQualifiedTable {
    /// Bind a physical table to its configuration.
    ///
    /// Catalog and schema are only kept when the configuration names them,
    /// so a pattern without a schema yields unqualified SQL.
    pub fn new(actual: &ActualTableName, config: &TableConfig, delimit_identifiers: bool) -> Self {
        let catalog = if has_value(config.catalog.as_deref()) {
            actual.catalog.clone()
        } else {
            None
        };
        let schema = if has_value(config.schema.as_deref()) {
            actual.schema.clone()
        } else {
            None
        };
        let domain_object_name = match config.domain_object_name.as_deref() {
            Some(name) if has_value(Some(name)) => name.to_string(),
            _ => camel_case(&actual.table, true),
        };
        let props = &config.properties;

        Self {
            introspected_catalog: catalog,
            introspected_schema: schema,
            introspected_table_name: actual.table.clone(),
            domain_object_name,
            alias: config.alias.clone(),
            ignore_qualifiers_at_runtime: props.ignore_qualifiers_at_runtime,
            runtime_catalog: props.runtime_catalog.clone(),
            runtime_schema: props.runtime_schema.clone(),
            runtime_table_name: props.runtime_table_name.clone(),
            delimit_identifiers,
        }
    }

    /// Table name used in generated SQL, honouring runtime overrides.
    pub fn runtime_name(&self) -> String {
        let table = self
            .runtime_table_name
            .as_deref()
            .filter(|t| has_value(Some(t)))
            .unwrap_or(&self.introspected_table_name);
        if self.ignore_qualifiers_at_runtime {
            return table.to_string();
        }
        let catalog = self
            .runtime_catalog
            .as_deref()
            .or(self.introspected_catalog.as_deref());
        let schema = self
            .runtime_schema
            .as_deref()
            .or(self.introspected_schema.as_deref());
        compose_qualified_name(catalog, schema, table)
    }
}

impl fmt::Display for FullyQualifiedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compose_qualified_name(
            self.introspected_catalog.as_deref(),
            self.introspected_schema.as_deref(),
            &self.introspected_table_name,
        ))
    }
}

/// A physical table bound to one table configuration.
///
/// Columns are partitioned into primary key, base and BLOB columns. A table
/// handed to code generation always has primary key or base columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectedTable {
    pub context_id: String,
    pub table: FullyQualifiedTable,
    pub remarks: Option<String>,
    pub table_type: Option<String>,
    primary_key_columns: Vec<ResolvedColumn>,
    base_columns: Vec<ResolvedColumn>,
    blob_columns: Vec<ResolvedColumn>,
}

impl IntrospectedTable {
    pub fn new(context_id: impl Into<String>, table: FullyQualifiedTable) -> Self {
        Self {
            context_id: context_id.into(),
            table,
            remarks: None,
            table_type: None,
            primary_key_columns: Vec::new(),
            base_columns: Vec::new(),
            blob_columns: Vec::new(),
        }
    }

    /// Add a column to the BLOB or base partition.
    pub fn add_column(&mut self, column: ResolvedColumn) {
        if column.is_blob() {
            self.blob_columns.push(column);
        } else {
            self.base_columns.push(column);
        }
    }

    /// Move the named column into the primary key partition.
    ///
    /// Returns `false` if no base or BLOB column has that exact name.
    pub fn add_primary_key_column(&mut self, column_name: &str) -> bool {
        for partition in [&mut self.base_columns, &mut self.blob_columns] {
            if let Some(pos) = partition.iter().position(|c| c.actual_name == column_name) {
                let column = partition.remove(pos);
                self.primary_key_columns.push(column);
                return true;
            }
        }
        false
    }

    pub fn primary_key_columns(&self) -> &[ResolvedColumn] {
        &self.primary_key_columns
    }

    pub fn base_columns(&self) -> &[ResolvedColumn] {
        &self.base_columns
    }

    pub fn blob_columns(&self) -> &[ResolvedColumn] {
        &self.blob_columns
    }

    /// Primary key, then base, then BLOB columns.
    pub fn all_columns(&self) -> impl Iterator<Item = &ResolvedColumn> {
        self.primary_key_columns
            .iter()
            .chain(&self.base_columns)
            .chain(&self.blob_columns)
    }

    /// Look a column up by name (case-insensitive unless delimited).
    pub fn column(&self, name: &str) -> Option<&ResolvedColumn> {
        self.all_columns().find(|c| c.matches_name(name))
    }

    pub fn has_any_columns(&self) -> bool {
        self.has_primary_key_columns() || self.has_base_columns() || self.has_blob_columns()
    }

    pub fn has_primary_key_columns(&self) -> bool {
        !self.primary_key_columns.is_empty()
    }

    pub fn has_base_columns(&self) -> bool {
        !self.base_columns.is_empty()
    }

    pub fn has_blob_columns(&self) -> bool {
        !self.blob_columns.is_empty()
    }

    /// Columns to bind in an insert statement.
    pub fn insertable_columns(&self) -> Vec<&ResolvedColumn> {
        self.all_columns()
            .filter(|c| !c.generated_always && !c.identity)
            .filter(|c| !AUDIT_TIMESTAMP_COLUMNS.contains(&c.actual_name.as_str()))
            .filter(|c| c.actual_name != SOFT_DELETE_COLUMN)
            .collect()
    }

    /// Columns to bind in an update statement.
    pub fn updatable_columns(&self) -> Vec<&ResolvedColumn> {
        self.all_columns()
            .filter(|c| !c.generated_always)
            .filter(|c| !AUDIT_TIMESTAMP_COLUMNS.contains(&c.actual_name.as_str()))
            .collect()
    }
}
