use tablegen_core::{
    ColumnOverride, ContextConfig, GeneratedKey, JdbcTypeResolver, Nullability, RawColumn,
    TableConfig, TableMetadata, Warnings, jdbc,
};
use tablegen_introspect::TableIntrospector;

fn introspect(
    context: &ContextConfig,
    config: &TableConfig,
    metadata: &[TableMetadata],
) -> (Vec<tablegen_core::IntrospectedTable>, Warnings) {
    let types = JdbcTypeResolver::new().force_big_decimals(context.force_big_decimals);
    let mut introspector = TableIntrospector::new(context, &types);
    let mut warnings = Warnings::new();
    let tables = introspector
        .introspect(config, metadata, &mut warnings)
        .expect("introspect");
    (tables, warnings)
}

#[test]
fn identity_key_and_camel_case_property() {
    let context = ContextConfig::new("main");
    let config = TableConfig::new("users").generated_key(GeneratedKey::identity("id"));
    let metadata = TableMetadata::new("users")
        .column(
            RawColumn::new("id", jdbc::INTEGER)
                .key_seq(1)
                .auto_increment(true),
        )
        .column(RawColumn::new("user_name", jdbc::VARCHAR).size(64));

    let (tables, warnings) = introspect(&context, &config, &[metadata]);
    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(tables.len(), 1);

    let table = &tables[0];
    let keys: Vec<_> = table
        .primary_key_columns()
        .iter()
        .map(|c| c.actual_name.as_str())
        .collect();
    assert_eq!(keys, vec!["id"]);
    assert!(table.primary_key_columns()[0].identity);

    let name = table.column("user_name").expect("user_name column");
    assert_eq!(name.property_name, "userName");
    assert_eq!(name.length, 64);
    assert!(!name.identity);
}

#[test]
fn compound_property_name_from_remarks() {
    let context = ContextConfig::new("main");
    let config = TableConfig::new("customer").use_compound_property_names(true);
    let metadata = TableMetadata::new("customer")
        .column(RawColumn::new("id", jdbc::BIGINT).key_seq(1))
        .column(RawColumn::new("addr", jdbc::VARCHAR).remarks("Street Address"));

    let (tables, _) = introspect(&context, &config, &[metadata]);
    let addr = tables[0].column("addr").expect("addr column");
    assert_eq!(addr.property_name, "addr_StreetAddress");
}

#[test]
fn unqualified_pattern_matching_several_tables_warns_once_and_keeps_all() {
    let context = ContextConfig::new("main");
    let config = TableConfig::new("orders");
    let metadata = [
        TableMetadata::new("orders")
            .schema("sales")
            .column(RawColumn::new("id", jdbc::INTEGER).key_seq(1)),
        TableMetadata::new("orders")
            .schema("archive")
            .column(RawColumn::new("id", jdbc::INTEGER).key_seq(1)),
        TableMetadata::new("orders")
            .schema("staging")
            .column(RawColumn::new("id", jdbc::INTEGER)),
    ];

    let (tables, warnings) = introspect(&context, &config, &metadata);
    assert_eq!(tables.len(), 3);

    let multiple: Vec<_> = warnings
        .iter()
        .filter(|w| w.message().contains("matched more than one table"))
        .collect();
    assert_eq!(multiple.len(), 1);
    let message = multiple[0].message();
    assert!(message.contains("sales.orders"));
    assert!(message.contains("archive.orders"));
    assert!(message.contains("staging.orders"));
}

#[test]
fn blob_only_and_fully_ignored_tables_are_dropped_with_distinct_warnings() {
    let context = ContextConfig::new("main");
    let config = TableConfig::new("doc%").ignore_column("secret");
    let metadata = [
        TableMetadata::new("doc_bodies").column(RawColumn::new("body", jdbc::CLOB)),
        TableMetadata::new("doc_secrets").column(RawColumn::new("secret", jdbc::VARCHAR)),
        TableMetadata::new("doc_index")
            .column(RawColumn::new("id", jdbc::INTEGER).key_seq(1))
            .column(RawColumn::new("body", jdbc::CLOB)),
    ];

    let (tables, warnings) = introspect(&context, &config, &metadata);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].table.introspected_table_name, "doc_index");
    assert!(tables[0].has_blob_columns());

    let lob_only: Vec<_> = warnings
        .iter()
        .filter(|w| w.message().contains("doc_bodies contains only LOB fields"))
        .collect();
    assert_eq!(lob_only.len(), 1);
    let missing: Vec<_> = warnings
        .iter()
        .filter(|w| w.message().contains("doc_secrets does not exist"))
        .collect();
    assert_eq!(missing.len(), 1);
    for table in &tables {
        assert!(table.has_primary_key_columns() || table.has_base_columns());
    }
}

#[test]
fn naming_is_stable_across_runs() {
    let context = ContextConfig::new("main")
        .auto_delimit_keywords(true)
        .unknown_nullability(Nullability::Nullable);
    let config = TableConfig::new("audit_log")
        .column_override(ColumnOverride::new("ts").property_name("recordedAt"));
    let metadata = TableMetadata::new("audit_log")
        .column(RawColumn::new("LOG_ID", jdbc::BIGINT).key_seq(1))
        .column(RawColumn::new("ts", jdbc::TIMESTAMP))
        .column(RawColumn::new("order", jdbc::INTEGER).nullable(Some(false)));

    let (first, first_warnings) = introspect(&context, &config, std::slice::from_ref(&metadata));
    let (second, second_warnings) = introspect(&context, &config, std::slice::from_ref(&metadata));
    assert_eq!(first, second);
    assert_eq!(first_warnings, second_warnings);

    let table = &first[0];
    assert_eq!(table.column("log_id").expect("key").property_name, "logId");
    assert_eq!(table.column("ts").expect("ts").property_name, "recordedAt");
    assert!(table.column("ts").expect("ts").nullable);

    let order = table.column("order").expect("order");
    assert!(order.delimited);
    assert!(!order.nullable);
}
