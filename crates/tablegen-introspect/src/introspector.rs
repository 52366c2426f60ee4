//! Table introspection: metadata for one table configuration to
//! introspected tables.

use std::collections::HashSet;

use tablegen_core::naming::{contains_sql_wildcard, is_java_reserved_word};
use tablegen_core::{
    ActualTableName, ConfigError, ContextConfig, FullyQualifiedTable, IntrospectedTable,
    RawColumn, TableConfig, TableMetadata, TypeResolver, Warning, Warnings,
};

use crate::primary_key::attach_primary_key;
use crate::regex_cache::RegexCache;
use crate::resolver::{ColumnResolver, ResolveOptions};

/// Columns of one physical table gathered from the metadata source.
#[derive(Debug)]
struct ColumnGroup {
    name: ActualTableName,
    remarks: Option<String>,
    table_type: Option<String>,
    columns: Vec<RawColumn>,
}

/// Introspects the tables of one context.
///
/// Holds the per-run regex cache; build a new introspector for every run.
pub struct TableIntrospector<'a> {
    context: &'a ContextConfig,
    type_resolver: &'a dyn TypeResolver,
    regex_cache: RegexCache,
}

impl<'a> TableIntrospector<'a> {
    pub fn new(context: &'a ContextConfig, type_resolver: &'a dyn TypeResolver) -> Self {
        Self {
            context,
            type_resolver,
            regex_cache: RegexCache::new(),
        }
    }

    /// Introspect every physical table in `metadata` against `config`.
    ///
    /// Tables without usable columns are dropped with a warning. All other
    /// problems are pushed to `warnings` as well; the only error is a
    /// renaming rule that does not compile.
    #[tracing::instrument(
        level = "debug",
        skip(self, config, metadata, warnings),
        fields(context = %self.context.id, table = %config.pattern_name())
    )]
    pub fn introspect(
        &mut self,
        config: &TableConfig,
        metadata: &[TableMetadata],
        warnings: &mut Warnings,
    ) -> Result<Vec<IntrospectedTable>, ConfigError> {
        let mut groups = group_columns(metadata);
        if groups.is_empty() {
            warnings.push(format!(
                "Table configuration with catalog {}, schema {}, and table {} did not resolve to any tables",
                config.catalog.as_deref().unwrap_or("null"),
                config.schema.as_deref().unwrap_or("null"),
                config.table_name
            ));
            return Ok(Vec::new());
        }

        if groups.len() > 1
            && !contains_sql_wildcard(config.schema.as_deref())
            && !contains_sql_wildcard(Some(&config.table_name))
        {
            let matched: Vec<String> = groups.iter().map(|g| g.name.to_string()).collect();
            warnings.push(format!(
                "Table Configuration {} matched more than one table ({})",
                config.pattern_name(),
                matched.join(",")
            ));
        }

        let ignored_in_error = remove_ignored_columns(config, &mut groups);

        let options = ResolveOptions::from(self.context);
        let resolver =
            ColumnResolver::new(config, options, self.type_resolver, &mut self.regex_cache)?;

        let mut tables = Vec::with_capacity(groups.len());
        for group in &groups {
            let fqt = FullyQualifiedTable::new(&group.name, config, config.delimit_identifiers);
            let mut table = IntrospectedTable::new(&self.context.id, fqt);
            table.remarks = group.remarks.clone();
            table.table_type = group.table_type.clone();

            for raw in &group.columns {
                let (column, warning) = resolver.resolve(raw, &group.name);
                if let Some(warning) = warning {
                    warnings.push(warning);
                }
                table.add_column(column);
            }
            attach_primary_key(&mut table, &group.columns);
            tables.push(table);
        }

        tables.retain(|table| {
            if !table.has_any_columns() {
                warnings.push(format!(
                    "Table {} does not exist",
                    table.table
                ));
                false
            } else if !table.has_primary_key_columns() && !table.has_base_columns() {
                warnings.push(format!(
                    "Table {} contains only LOB fields, this table will be ignored",
                    table.table
                ));
                false
            } else {
                true
            }
        });

        for table in &tables {
            report_table_warnings(table, config, &ignored_in_error, warnings);
        }

        tracing::debug!(tables = tables.len(), "Introspection finished");
        Ok(tables)
    }
}

/// Group columns by physical table, keeping first-seen table order.
fn group_columns(metadata: &[TableMetadata]) -> Vec<ColumnGroup> {
    let mut groups: Vec<ColumnGroup> = Vec::new();

    for table in metadata {
        let name = table.actual_name();
        let index = match groups.iter().position(|g| g.name == name) {
            Some(index) => index,
            None => {
                tracing::debug!(table = %name, "Introspecting table");
                groups.push(ColumnGroup {
                    name,
                    remarks: table.remarks.clone(),
                    table_type: table.table_type.clone(),
                    columns: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        for column in &table.columns {
            tracing::debug!(
                column = %column.name,
                data_type = column.data_type,
                table = %group.name,
                "Found column"
            );
            group.columns.push(column.clone());
        }
        if group.remarks.is_none() {
            group.remarks.clone_from(&table.remarks);
        }
    }

    groups.retain(|g| !g.columns.is_empty());
    groups
}

/// Drop ignored columns; returns ignore entries that matched nothing.
fn remove_ignored_columns(config: &TableConfig, groups: &mut [ColumnGroup]) -> Vec<String> {
    let mut matched = HashSet::new();

    for group in groups.iter_mut() {
        group.columns.retain(|column| {
            let hit = config
                .ignored_columns
                .iter()
                .position(|ic| ic.matches(&column.name));
            match hit {
                Some(index) => {
                    tracing::debug!(column = %column.name, table = %group.name, "Removing ignored column");
                    matched.insert(index);
                    false
                }
                None => true,
            }
        });
    }

    config
        .ignored_columns
        .iter()
        .enumerate()
        .filter(|(index, _)| !matched.contains(index))
        .map(|(_, ic)| ic.column.clone())
        .collect()
}

fn report_table_warnings(
    table: &IntrospectedTable,
    config: &TableConfig,
    ignored_in_error: &[String],
    warnings: &mut Warnings,
) {
    let name = &table.table;

    for co in &config.column_overrides {
        // Overrides apply on the exact actual name, so existence is checked the same way.
        if !table.all_columns().any(|c| c.actual_name == co.column_name) {
            warnings.push(format!(
                "Column {}, specified as an override column in table {}, does not exist",
                co.column_name, name
            ));
        }
    }

    for column in ignored_in_error {
        warnings.push(format!(
            "Column {}, specified as ignored in table {}, does not exist",
            column, name
        ));
    }

    if let Some(gk) = &config.generated_key {
        if table.column(&gk.column).is_none() {
            let kind = if gk.is_identity() { "an identity" } else { "a sequence" };
            warnings.push(format!(
                "Column {}, specified as {} column in table {}, does not exist",
                gk.column, kind, name
            ));
        }
    }

    for column in table.all_columns() {
        if is_java_reserved_word(&column.property_name) {
            warnings.push(Warning::new(format!(
                "Column {} in table {} resolves to reserved word property name {}",
                column.actual_name, name, column.property_name
            )));
        }
    }
}
