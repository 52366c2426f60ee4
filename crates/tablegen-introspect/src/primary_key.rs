//! Primary key ordering.

use std::collections::BTreeMap;

use tablegen_core::{IntrospectedTable, RawColumn};

/// Names of the key columns in ascending key-sequence order.
///
/// Columns with key sequence 0 are skipped. When two columns declare the
/// same sequence number the later one replaces the earlier, so the result
/// depends on the order the metadata source reported them in. This is a
/// known limitation of sources that report duplicate positions.
pub fn compute_key_order<'a, I>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a RawColumn>,
{
    let mut keys: BTreeMap<u16, &str> = BTreeMap::new();
    for column in columns {
        if column.is_key() {
            if let Some(previous) = keys.insert(column.key_seq, &column.name) {
                tracing::debug!(
                    key_seq = column.key_seq,
                    replaced = previous,
                    column = %column.name,
                    "Duplicate primary key sequence number"
                );
            }
        }
    }
    keys.into_values().map(str::to_string).collect()
}

/// Move the key columns of `table` into its primary key partition.
///
/// Key names that match no surviving column (e.g. an ignored key column)
/// are skipped.
pub fn attach_primary_key<'a, I>(table: &mut IntrospectedTable, columns: I)
where
    I: IntoIterator<Item = &'a RawColumn>,
{
    for name in compute_key_order(columns) {
        if !table.add_primary_key_column(&name) {
            tracing::debug!(column = %name, table = %table.table, "Primary key column not present");
        }
    }
}
