//! Core types for tablegen.
//!
//! `tablegen-core` is the **leaf layer** of the workspace. It holds the value
//! types every other crate passes around and has no pipeline behavior of its own.
//!
//! # Role In The Architecture
//!
//! - **Input**: `TableMetadata` / `RawColumn` describe tables exactly as an external
//!   metadata source reports them; `Configuration` describes what to generate.
//! - **Model**: `ResolvedColumn` and `IntrospectedTable` are the typed, renamed
//!   table model that feeds code generation.
//! - **Output**: `GeneratedArtifact` is rendered text waiting to be written.
//! - **Diagnostics**: `Warnings` collects non-fatal problems; `Error` aborts a run.
//! - **Control**: `ProgressCallback` observes a run and can cancel it.
//!
//! # Who Uses This Crate
//!
//! - `tablegen-introspect` turns metadata plus configuration into introspected tables.
//! - `tablegen-materialize` writes artifacts under the merge/overwrite/rename policy.
//! - `tablegen` orchestrates both across configuration contexts.

pub mod artifact;
pub mod column;
pub mod config;
pub mod error;
pub mod metadata;
pub mod naming;
pub mod progress;
pub mod table;
pub mod types;
pub mod warning;

pub use artifact::{ArtifactKind, GeneratedArtifact, MAPPING_DOCUMENT_ENCODING, package_path};
pub use column::ResolvedColumn;
pub use config::{
    ColumnOverride, ColumnRenamingRule, Configuration, ContextConfig, GeneratedKey,
    GeneratedKeyKind, IgnoredColumn, Nullability, TableConfig, TableProperties,
};
pub use error::{ConfigError, Error, Result};
pub use metadata::{ActualTableName, RawColumn, TableMetadata};
pub use progress::{CancellationFlag, NullProgressCallback, ProgressCallback};
pub use table::{FullyQualifiedTable, IntrospectedTable};
pub use types::{JdbcTypeResolver, LanguageType, ResolvedType, TypeResolver, jdbc};
pub use warning::{Warning, Warnings};
