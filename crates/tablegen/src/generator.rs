//! Generation orchestrator.
//!
//! One call to [`Generator::generate`] is one run: validate the
//! configuration, introspect every selected context, render, and write
//! (unless it is a dry run). Nothing is carried over between runs.

use std::collections::HashSet;
use std::path::PathBuf;

use tablegen_core::{
    Configuration, ContextConfig, GeneratedArtifact, IntrospectedTable, JdbcTypeResolver,
    ProgressCallback, Result, TypeResolver, Warnings,
};
use tablegen_introspect::TableIntrospector;
use tablegen_materialize::{Materializer, ShellCallback};

use crate::render::{ArtifactRenderer, RenderError};
use crate::source::TableMetadataSource;

// ============================================================================
// Options and result
// ============================================================================

/// Per-run options.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Context ids to run; empty runs every context.
    pub context_ids: HashSet<String>,
    /// Fully qualified table patterns to introspect; empty introspects all.
    pub table_names: HashSet<String>,
    /// When false nothing touches the filesystem.
    pub write_files: bool,
}

impl GenerateOptions {
    /// Options for a run that writes files.
    pub fn new() -> Self {
        Self {
            write_files: true,
            ..Self::default()
        }
    }

    /// Options for a run that only returns artifacts.
    pub fn dry_run() -> Self {
        Self::default()
    }

    pub fn context(mut self, id: impl Into<String>) -> Self {
        self.context_ids.insert(id.into());
        self
    }

    pub fn table(mut self, fully_qualified_name: impl Into<String>) -> Self {
        self.table_names.insert(fully_qualified_name.into());
        self
    }

    pub fn write_files(mut self, value: bool) -> Self {
        self.write_files = value;
        self
    }

    fn runs_context(&self, id: &str) -> bool {
        self.context_ids.is_empty() || self.context_ids.contains(id)
    }

    fn runs_table(&self, fully_qualified_name: &str) -> bool {
        self.table_names.is_empty() || self.table_names.contains(fully_qualified_name)
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    /// Rendered artifacts, in context then table order.
    pub artifacts: Vec<GeneratedArtifact>,
    /// Non-fatal problems, in the order they were found.
    pub warnings: Vec<String>,
    /// Paths written; empty for a dry run.
    pub written: Vec<PathBuf>,
    /// Projects refreshed after writing; empty for a dry run.
    pub refreshed_projects: Vec<String>,
}

// ============================================================================
// Generator
// ============================================================================

/// Runs introspection, rendering and materialization for a configuration.
pub struct Generator {
    configuration: Configuration,
    type_resolver: Option<Box<dyn TypeResolver>>,
}

impl Generator {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            type_resolver: None,
        }
    }

    /// Use `resolver` for every context instead of the JDBC default.
    pub fn type_resolver(mut self, resolver: Box<dyn TypeResolver>) -> Self {
        self.type_resolver = Some(resolver);
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Run one generation.
    ///
    /// Fails before any side effect when the configuration is invalid.
    /// Metadata-source failures, an exhausted alternate file name range and
    /// cancellation also abort; everything else becomes a warning.
    #[tracing::instrument(level = "debug", skip_all, fields(write_files = options.write_files))]
    pub fn generate(
        &self,
        source: &dyn TableMetadataSource,
        renderer: &mut dyn ArtifactRenderer,
        shell: &mut dyn ShellCallback,
        progress: &mut dyn ProgressCallback,
        options: &GenerateOptions,
    ) -> Result<GenerationResult> {
        self.configuration.validate()?;

        let contexts: Vec<&ContextConfig> = self
            .configuration
            .contexts
            .iter()
            .filter(|ctx| options.runs_context(&ctx.id))
            .collect();
        let mut warnings = Warnings::new();

        let steps: usize = contexts.iter().map(|ctx| ctx.introspection_steps()).sum();
        tracing::info!(contexts = contexts.len(), steps, "Introspection started");
        progress.introspection_started(steps);

        let mut introspected = Vec::with_capacity(contexts.len());
        for ctx in &contexts {
            let tables = self.introspect_context(ctx, source, progress, options, &mut warnings)?;
            introspected.push((*ctx, tables));
        }

        let steps: usize = introspected
            .iter()
            .flat_map(|(_, tables)| tables)
            .map(|table| renderer.generation_steps(table))
            .sum();
        tracing::info!(steps, "Generation started");
        progress.generation_started(steps);

        let mut artifacts = Vec::new();
        for (ctx, tables) in &introspected {
            match render_context(tables, renderer, progress, &mut warnings)? {
                Ok(rendered) => artifacts.extend(rendered),
                Err(err) => warnings.push(format!(
                    "Context {} was not generated: {}",
                    ctx.id, err
                )),
            }
        }

        let mut result = GenerationResult::default();
        if options.write_files {
            tracing::info!(files = artifacts.len(), "Save started");
            let written = Materializer::new(shell).materialize_all(&artifacts, progress, &mut warnings)?;
            result.written = written.written;
            result.refreshed_projects = written.refreshed_projects;
        }

        progress.done();
        tracing::info!(
            artifacts = artifacts.len(),
            warnings = warnings.len(),
            "Generation done"
        );
        result.artifacts = artifacts;
        result.warnings = warnings.into_messages();
        Ok(result)
    }

    fn introspect_context(
        &self,
        ctx: &ContextConfig,
        source: &dyn TableMetadataSource,
        progress: &mut dyn ProgressCallback,
        options: &GenerateOptions,
        warnings: &mut Warnings,
    ) -> Result<Vec<IntrospectedTable>> {
        let default_resolver = JdbcTypeResolver::new().force_big_decimals(ctx.force_big_decimals);
        let resolver: &dyn TypeResolver = match &self.type_resolver {
            Some(custom) => custom.as_ref(),
            None => &default_resolver,
        };
        let mut introspector = TableIntrospector::new(ctx, resolver);
        let mut tables = Vec::new();

        for config in &ctx.tables {
            let name = config.pattern_name();
            if !options.runs_table(&name) {
                continue;
            }
            progress.check_cancel()?;
            progress.start_task(&format!("Introspecting table {}", name));

            let metadata = source.tables(
                config.catalog.as_deref(),
                config.schema.as_deref(),
                &config.table_name,
            )?;
            tables.extend(introspector.introspect(config, &metadata, warnings)?);
        }

        tracing::debug!(context = %ctx.id, tables = tables.len(), "Context introspected");
        Ok(tables)
    }
}

/// Render one context's tables.
///
/// The outer result carries cancellation; the inner one a renderer failure,
/// which discards what the context rendered so far.
fn render_context(
    tables: &[IntrospectedTable],
    renderer: &mut dyn ArtifactRenderer,
    progress: &mut dyn ProgressCallback,
    warnings: &mut Warnings,
) -> Result<std::result::Result<Vec<GeneratedArtifact>, RenderError>> {
    let mut artifacts = Vec::new();
    for table in tables {
        progress.check_cancel()?;
        progress.start_task(&format!("Generating files for table {}", table.table));
        match renderer.render(table, warnings) {
            Ok(rendered) => artifacts.extend(rendered),
            Err(err) => return Ok(Err(err)),
        }
    }
    Ok(Ok(artifacts))
}
