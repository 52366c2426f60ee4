//! Rendering seam between introspected tables and generated artifacts.

use std::error::Error as StdError;
use std::fmt;

use tablegen_core::{GeneratedArtifact, IntrospectedTable, Warnings};

/// A renderer could not produce artifacts for a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for RenderError {}

/// Turns introspected tables into generated artifacts.
///
/// Template engines and code-generation plugins live behind this trait.
pub trait ArtifactRenderer {
    /// Progress steps rendering `table` will take.
    fn generation_steps(&self, _table: &IntrospectedTable) -> usize {
        1
    }

    /// Render every artifact for `table`.
    fn render(
        &mut self,
        table: &IntrospectedTable,
        warnings: &mut Warnings,
    ) -> Result<Vec<GeneratedArtifact>, RenderError>;
}
