//! Introspection pipeline for tablegen.
//!
//! Turns [`TableMetadata`](tablegen_core::TableMetadata) reported by a
//! metadata source into [`IntrospectedTable`](tablegen_core::IntrospectedTable)
//! values ready for rendering.
//!
//! - [`ColumnResolver`] derives property names, language types, delimiting,
//!   overrides and generated-key flags for single columns.
//! - [`compute_key_order`] orders primary key columns by key sequence.
//! - [`TableIntrospector`] runs both across every physical table a table
//!   configuration matches and reports problems as warnings.

pub mod introspector;
pub mod primary_key;
pub mod regex_cache;
pub mod resolver;

pub use introspector::TableIntrospector;
pub use primary_key::{attach_primary_key, compute_key_order};
pub use regex_cache::RegexCache;
pub use resolver::{ColumnResolver, ResolveOptions};
