//! tablegen: generate mapper sources from relational table metadata.
//!
//! This is the facade crate. It re-exports the value types of
//! `tablegen-core`, the introspection pipeline of `tablegen-introspect` and
//! the writer of `tablegen-materialize`, and adds the [`Generator`] that
//! drives a complete run.
//!
//! # Example
//!
//! ```ignore
//! use tablegen::prelude::*;
//!
//! let config = Configuration::from_json(&std::fs::read_to_string("tablegen.json")?)?;
//! let source = StaticMetadataSource::new(tables_from_driver());
//! let mut shell = DefaultShellCallback::new(false);
//!
//! let result = Generator::new(config).generate(
//!     &source,
//!     &mut my_renderer,
//!     &mut shell,
//!     &mut NullProgressCallback,
//!     &GenerateOptions::new(),
//! )?;
//! for warning in &result.warnings {
//!     eprintln!("{warning}");
//! }
//! ```

pub mod generator;
pub mod render;
pub mod source;

pub use generator::{GenerateOptions, GenerationResult, Generator};
pub use render::{ArtifactRenderer, RenderError};
pub use source::{StaticMetadataSource, TableMetadataSource, like_pattern};

pub use tablegen_core::{
    ActualTableName, ArtifactKind, CancellationFlag, ColumnOverride, ColumnRenamingRule,
    ConfigError, Configuration, ContextConfig, Error, FullyQualifiedTable, GeneratedArtifact,
    GeneratedKey, GeneratedKeyKind, IgnoredColumn, IntrospectedTable, JdbcTypeResolver,
    LanguageType, NullProgressCallback, Nullability, ProgressCallback, RawColumn, ResolvedColumn,
    ResolvedType, Result, TableConfig, TableMetadata, TableProperties, TypeResolver, Warning,
    Warnings, jdbc,
};
pub use tablegen_introspect::{ColumnResolver, TableIntrospector, compute_key_order};
pub use tablegen_materialize::{
    DefaultShellCallback, MergeError, Materialized, Materializer, ShellCallback, ShellError,
};

/// Commonly used items.
pub mod prelude {
    pub use crate::{
        ArtifactRenderer, CancellationFlag, Configuration, ContextConfig, DefaultShellCallback,
        Error, GenerateOptions, GeneratedArtifact, GenerationResult, Generator,
        IntrospectedTable, NullProgressCallback, ProgressCallback, RawColumn, RenderError,
        Result, ShellCallback, StaticMetadataSource, TableConfig, TableMetadata,
        TableMetadataSource, Warnings,
    };
}
