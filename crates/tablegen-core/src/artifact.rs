//! Rendered output waiting to be written.

use std::path::PathBuf;

/// Encoding label written for mapping documents regardless of declaration.
pub const MAPPING_DOCUMENT_ENCODING: &str = "UTF-8";

/// What kind of file an artifact is, which decides how it may be merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Structured source file (interfaces, model classes).
    Source,
    /// Mapping document; `mergeable` when it carries generated-region markers.
    Mapping { mergeable: bool },
    /// Plain text file; never merged.
    PlainText,
}

impl ArtifactKind {
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Source => "source",
            ArtifactKind::Mapping { .. } => "mapping",
            ArtifactKind::PlainText => "text",
        }
    }
}

/// One generated file, produced by a renderer and consumed once by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    /// Target project directory.
    pub target_project: String,
    /// Dotted package / namespace, e.g. `com.example.mapper`.
    pub target_package: String,
    pub file_name: String,
    pub content: String,
    /// Declared encoding; `None` means the platform default.
    pub encoding: Option<String>,
}

impl GeneratedArtifact {
    pub fn new(
        kind: ArtifactKind,
        target_project: impl Into<String>,
        target_package: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            target_project: target_project.into(),
            target_package: target_package.into(),
            file_name: file_name.into(),
            content: content.into(),
            encoding: None,
        }
    }

    /// A source file.
    pub fn source(
        target_project: impl Into<String>,
        target_package: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(ArtifactKind::Source, target_project, target_package, file_name, content)
    }

    /// A mapping document.
    pub fn mapping(
        target_project: impl Into<String>,
        target_package: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<String>,
        mergeable: bool,
    ) -> Self {
        Self::new(
            ArtifactKind::Mapping { mergeable },
            target_project,
            target_package,
            file_name,
            content,
        )
    }

    /// A plain text file.
    pub fn plain_text(
        target_project: impl Into<String>,
        target_package: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(ArtifactKind::PlainText, target_project, target_package, file_name, content)
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Encoding actually used when writing: mapping documents are always UTF-8.
    pub fn effective_encoding(&self) -> Option<&str> {
        match self.kind {
            ArtifactKind::Mapping { .. } => Some(MAPPING_DOCUMENT_ENCODING),
            _ => self.encoding.as_deref(),
        }
    }

    /// Package path relative to the project, e.g. `com/example/mapper`.
    pub fn package_path(&self) -> PathBuf {
        package_path(&self.target_package)
    }
}

/// Directory path for a dotted package name; empty for the default package.
pub fn package_path(package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}
