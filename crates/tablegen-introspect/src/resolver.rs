//! Column resolution: raw column metadata to a resolved column.
//!
//! Resolution is a pure function of the raw column, the table configuration
//! and the context options. Steps run in a fixed order:
//!
//! 1. apply the column renaming rule to get the calculated name
//! 2. derive the property name (actual names, compound names, or camel case)
//! 3. resolve the language type, falling back to `Object` with a warning
//! 4. delimit names with spaces, reserved words, or every column
//! 5. apply the column override
//! 6. mark identity or sequence columns from the generated key

use regex::Regex;
use tablegen_core::naming::{camel_case, contains_space, is_sql_reserved_word, valid_property_name};
use tablegen_core::{
    ActualTableName, ConfigError, ContextConfig, LanguageType, Nullability, RawColumn,
    ResolvedColumn, TableConfig, TypeResolver, Warning,
};

use crate::regex_cache::RegexCache;

/// Context-wide switches that affect column resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    pub auto_delimit_keywords: bool,
    pub unknown_nullability: Nullability,
}

impl From<&ContextConfig> for ResolveOptions {
    fn from(ctx: &ContextConfig) -> Self {
        Self {
            auto_delimit_keywords: ctx.auto_delimit_keywords,
            unknown_nullability: ctx.unknown_nullability,
        }
    }
}

/// Resolves raw columns for one table configuration.
pub struct ColumnResolver<'a> {
    config: &'a TableConfig,
    options: ResolveOptions,
    type_resolver: &'a dyn TypeResolver,
    renaming: Option<(Regex, String)>,
}

impl<'a> ColumnResolver<'a> {
    /// Prepare a resolver, compiling the renaming rule through `cache`.
    pub fn new(
        config: &'a TableConfig,
        options: ResolveOptions,
        type_resolver: &'a dyn TypeResolver,
        cache: &mut RegexCache,
    ) -> Result<Self, ConfigError> {
        let renaming = match &config.column_renaming_rule {
            Some(rule) => {
                let regex = cache.get_or_compile(&rule.search).map_err(|e| {
                    ConfigError::single(format!(
                        "invalid column renaming pattern {}: {}",
                        rule.search, e
                    ))
                })?;
                Some((regex.clone(), rule.replace.clone().unwrap_or_default()))
            }
            None => None,
        };

        Ok(Self {
            config,
            options,
            type_resolver,
            renaming,
        })
    }

    /// Name used for property derivation after the renaming rule.
    pub fn calculated_name(&self, actual_name: &str) -> String {
        match &self.renaming {
            Some((regex, replace)) => regex.replace_all(actual_name, replace.as_str()).into_owned(),
            None => actual_name.to_string(),
        }
    }

    /// Derive the property name for a column.
    ///
    /// Exactly one mode applies, checked in order: actual column names,
    /// compound names (`<name>_<CamelRemarks>`), then camel case.
    pub fn property_name(&self, raw: &RawColumn) -> String {
        let calculated = self.calculated_name(&raw.name);
        let props = &self.config.properties;

        if props.use_actual_column_names {
            valid_property_name(&calculated)
        } else if props.use_compound_property_names {
            let remarks = raw.remarks.as_deref().unwrap_or_default();
            let compound = format!("{}_{}", calculated, camel_case(remarks, true));
            valid_property_name(&compound)
        } else {
            camel_case(&calculated, false)
        }
    }

    /// Resolve one raw column belonging to `table`.
    pub fn resolve(&self, raw: &RawColumn, table: &ActualTableName) -> (ResolvedColumn, Option<Warning>) {
        let mut warning = None;
        let mut column = ResolvedColumn::new(&raw.name, raw.data_type, LanguageType::object())
            .property_name(self.property_name(raw))
            .nullable(self.options.unknown_nullability.resolve(raw.nullable));
        column.length = raw.size;
        column.scale = raw.decimal_digits;
        column.remarks = raw.remarks.clone();
        column.default_value = raw.default_value.clone();
        column.generated_column = raw.generated_column;
        column.auto_increment = raw.auto_increment;
        column.table_alias = self.config.alias.clone();

        if let Some(resolved) = self.type_resolver.resolve(raw) {
            column.language_type = resolved.language_type;
            column.jdbc_type_name = resolved.jdbc_type_name;
        } else if !self.unresolved_type_expected(&raw.name) {
            warning = Some(Warning::new(format!(
                "Unsupported data type {} in table {}, column: {}, property defaults to Object type.",
                raw.data_type, table, raw.name
            )));
        }

        if contains_space(Some(&raw.name))
            || (self.options.auto_delimit_keywords && is_sql_reserved_word(&raw.name))
            || self.config.all_column_delimiting
        {
            column.delimited = true;
        }

        self.apply_override(&mut column, table);
        self.apply_generated_key(&mut column);

        (column, warning)
    }

    /// An unresolvable type is fine when the column is ignored or an override
    /// supplies the language type.
    fn unresolved_type_expected(&self, column_name: &str) -> bool {
        self.config.is_column_ignored(column_name)
            || self
                .config
                .column_override_for(column_name)
                .is_some_and(|co| co.has_language_type())
    }

    fn apply_override(&self, column: &mut ResolvedColumn, table: &ActualTableName) {
        let Some(co) = self.config.column_override_for(&column.actual_name) else {
            return;
        };
        tracing::debug!(column = %column.actual_name, table = %table, "Applying column override");

        if let Some(name) = non_blank(co.property_name.as_deref()) {
            column.property_name = name.to_string();
        }
        if let Some(ty) = non_blank(co.language_type.as_deref()) {
            column.language_type = LanguageType::new(ty);
        }
        if let Some(jdbc) = non_blank(co.jdbc_type.as_deref()) {
            column.jdbc_type_name = jdbc.to_string();
        }
        if let Some(handler) = non_blank(co.type_handler.as_deref()) {
            column.type_handler = Some(handler.to_string());
        }
        if co.delimited {
            column.delimited = true;
        }
        if let Some(generated_always) = co.generated_always {
            column.generated_always = generated_always;
        }
    }

    fn apply_generated_key(&self, column: &mut ResolvedColumn) {
        let Some(gk) = &self.config.generated_key else {
            return;
        };
        if !column.matches_name(&gk.column) {
            return;
        }
        if gk.is_identity() {
            column.identity = true;
            column.sequence_column = false;
        } else {
            column.identity = false;
            column.sequence_column = true;
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablegen_core::{
        ColumnOverride, ColumnRenamingRule, GeneratedKey, JdbcTypeResolver, jdbc,
    };

    fn atn() -> ActualTableName {
        ActualTableName::new(None, None, "users")
    }

    fn resolve_with(
        config: &TableConfig,
        options: ResolveOptions,
        raw: &RawColumn,
    ) -> (ResolvedColumn, Option<Warning>) {
        let types = JdbcTypeResolver::new();
        let mut cache = RegexCache::new();
        let resolver = ColumnResolver::new(config, options, &types, &mut cache).unwrap();
        resolver.resolve(raw, &atn())
    }

    fn resolve(config: &TableConfig, raw: &RawColumn) -> ResolvedColumn {
        resolve_with(config, ResolveOptions::default(), raw).0
    }

    // ========================================================================
    // Property names
    // ========================================================================

    #[test]
    fn test_default_mode_camel_cases() {
        let col = resolve(&TableConfig::new("users"), &RawColumn::new("user_name", jdbc::VARCHAR));
        assert_eq!(col.property_name, "userName");
        assert_eq!(col.actual_name, "user_name");
    }

    #[test]
    fn test_actual_column_names_mode() {
        let config = TableConfig::new("users").use_actual_column_names(true);
        let col = resolve(&config, &RawColumn::new("User_Name", jdbc::VARCHAR));
        assert_eq!(col.property_name, "user_Name");
    }

    #[test]
    fn test_compound_mode_joins_remarks() {
        let config = TableConfig::new("users").use_compound_property_names(true);
        let raw = RawColumn::new("addr", jdbc::VARCHAR).remarks("Street Address");
        assert_eq!(resolve(&config, &raw).property_name, "addr_StreetAddress");
    }

    #[test]
    fn test_actual_names_win_over_compound() {
        let config = TableConfig::new("users")
            .use_actual_column_names(true)
            .use_compound_property_names(true);
        let raw = RawColumn::new("addr", jdbc::VARCHAR).remarks("Street Address");
        assert_eq!(resolve(&config, &raw).property_name, "addr");
    }

    #[test]
    fn test_renaming_rule_feeds_property_only() {
        let config = TableConfig::new("users")
            .column_renaming_rule(ColumnRenamingRule::new("^usr_", None));
        let col = resolve(&config, &RawColumn::new("usr_email", jdbc::VARCHAR));
        assert_eq!(col.property_name, "email");
        assert_eq!(col.actual_name, "usr_email");
    }

    #[test]
    fn test_renaming_rule_with_replacement() {
        let config = TableConfig::new("users")
            .column_renaming_rule(ColumnRenamingRule::new("^c_(\\w+)$", Some("col_$1")));
        let col = resolve(&config, &RawColumn::new("c_total", jdbc::INTEGER));
        assert_eq!(col.property_name, "colTotal");
    }

    #[test]
    fn test_invalid_renaming_rule_is_config_error() {
        let config = TableConfig::new("users").column_renaming_rule(ColumnRenamingRule::new("(", None));
        let types = JdbcTypeResolver::new();
        let mut cache = RegexCache::new();
        let err = ColumnResolver::new(&config, ResolveOptions::default(), &types, &mut cache)
            .err()
            .unwrap();
        assert!(err.errors[0].contains("invalid column renaming pattern"));
    }

    // ========================================================================
    // Types
    // ========================================================================

    #[test]
    fn test_unknown_type_falls_back_with_warning() {
        let (col, warning) = resolve_with(
            &TableConfig::new("users"),
            ResolveOptions::default(),
            &RawColumn::new("shape", -155),
        );
        assert_eq!(col.language_type, LanguageType::object());
        assert_eq!(col.jdbc_type_name, "OTHER");
        let warning = warning.unwrap();
        assert!(warning.message().contains("-155"));
        assert!(warning.message().contains("users"));
        assert!(warning.message().contains("shape"));
    }

    #[test]
    fn test_unknown_type_with_typed_override_is_silent() {
        let config = TableConfig::new("users").column_override(
            ColumnOverride::new("shape").language_type("org.postgis.Geometry"),
        );
        let (col, warning) =
            resolve_with(&config, ResolveOptions::default(), &RawColumn::new("shape", -155));
        assert!(warning.is_none());
        assert_eq!(col.language_type.fully_qualified_name(), "org.postgis.Geometry");
    }

    #[test]
    fn test_unknown_type_on_ignored_column_is_silent() {
        let config = TableConfig::new("users").ignore_column("shape");
        let (_, warning) =
            resolve_with(&config, ResolveOptions::default(), &RawColumn::new("shape", -155));
        assert!(warning.is_none());
    }

    #[test]
    fn test_unknown_nullability_uses_context_default() {
        let raw = RawColumn::new("x", jdbc::INTEGER);
        let config = TableConfig::new("users");
        let strict = resolve_with(&config, ResolveOptions::default(), &raw).0;
        assert!(!strict.nullable);

        let lenient = ResolveOptions {
            unknown_nullability: Nullability::Nullable,
            ..ResolveOptions::default()
        };
        assert!(resolve_with(&config, lenient, &raw).0.nullable);
    }

    // ========================================================================
    // Delimiting and overrides
    // ========================================================================

    #[test]
    fn test_reserved_word_delimited_only_when_enabled() {
        let raw = RawColumn::new("order", jdbc::INTEGER);
        let config = TableConfig::new("users");
        assert!(!resolve(&config, &raw).delimited);

        let options = ResolveOptions {
            auto_delimit_keywords: true,
            ..ResolveOptions::default()
        };
        assert!(resolve_with(&config, options, &raw).0.delimited);
    }

    #[test]
    fn test_names_with_spaces_are_delimited() {
        let col = resolve(&TableConfig::new("users"), &RawColumn::new("first name", jdbc::VARCHAR));
        assert!(col.delimited);
        assert_eq!(col.property_name, "firstName");
    }

    #[test]
    fn test_all_column_delimiting() {
        let config = TableConfig::new("users").all_column_delimiting(true);
        assert!(resolve(&config, &RawColumn::new("name", jdbc::VARCHAR)).delimited);
    }

    #[test]
    fn test_override_fields_apply_independently() {
        let config = TableConfig::new("users").column_override(
            ColumnOverride::new("user_name")
                .property_name("login")
                .type_handler("com.example.TrimHandler")
                .generated_always(true),
        );
        let col = resolve(&config, &RawColumn::new("user_name", jdbc::VARCHAR));
        assert_eq!(col.property_name, "login");
        assert_eq!(col.language_type.fully_qualified_name(), "java.lang.String");
        assert_eq!(col.jdbc_type_name, "VARCHAR");
        assert_eq!(col.type_handler.as_deref(), Some("com.example.TrimHandler"));
        assert!(col.generated_always);
        assert!(!col.delimited);
    }

    #[test]
    fn test_override_without_generated_always_keeps_prior_value() {
        let config = TableConfig::new("users")
            .column_override(ColumnOverride::new("user_name").jdbc_type("NVARCHAR").delimited(true));
        let col = resolve(&config, &RawColumn::new("user_name", jdbc::VARCHAR));
        assert_eq!(col.jdbc_type_name, "NVARCHAR");
        assert!(col.delimited);
        assert!(!col.generated_always);
    }

    // ========================================================================
    // Generated keys
    // ========================================================================

    #[test]
    fn test_identity_key_matches_case_insensitively() {
        let config = TableConfig::new("users").generated_key(GeneratedKey::identity("ID"));
        let col = resolve(&config, &RawColumn::new("id", jdbc::INTEGER));
        assert!(col.identity);
        assert!(!col.sequence_column);
    }

    #[test]
    fn test_delimited_key_matches_case_sensitively() {
        let config = TableConfig::new("users")
            .all_column_delimiting(true)
            .generated_key(GeneratedKey::identity("ID"));
        let col = resolve(&config, &RawColumn::new("id", jdbc::INTEGER));
        assert!(!col.identity);
    }

    #[test]
    fn test_sequence_key_marks_sequence_column() {
        let config = TableConfig::new("users")
            .generated_key(GeneratedKey::sequence("id", "select nextval('users_seq')"));
        let col = resolve(&config, &RawColumn::new("id", jdbc::BIGINT));
        assert!(!col.identity);
        assert!(col.sequence_column);
    }

    #[test]
    fn test_jdbc_standard_key_is_identity() {
        let config = TableConfig::new("users").generated_key(GeneratedKey::jdbc_standard("id"));
        assert!(resolve(&config, &RawColumn::new("id", jdbc::BIGINT)).identity);
    }
}
