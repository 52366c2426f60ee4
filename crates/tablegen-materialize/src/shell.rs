//! Filesystem collaborator used by the writer.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tablegen_core::package_path;

use crate::merge::{self, MergeError};

/// A problem confined to one file. Converted to a warning by the writer.
#[derive(Debug)]
pub enum ShellError {
    /// The target project directory does not exist.
    ProjectNotFound { project: String },
    /// The package directory could not be created.
    CreateDirectory { path: PathBuf, source: io::Error },
    /// The declared encoding is not one the writer can produce.
    UnsupportedEncoding { encoding: String, path: PathBuf },
    /// The shell cannot merge this file.
    MergeUnsupported { path: PathBuf },
    /// Existing content could not be merged.
    Merge { path: PathBuf, source: MergeError },
    /// Existing file could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The file could not be written.
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::ProjectNotFound { project } => write!(
                f,
                "The specified target project directory {} does not exist",
                project
            ),
            ShellError::CreateDirectory { path, source } => write!(
                f,
                "Cannot create directory {}: {}",
                path.display(),
                source
            ),
            ShellError::UnsupportedEncoding { encoding, path } => write!(
                f,
                "Unsupported encoding {} for file {}",
                encoding,
                path.display()
            ),
            ShellError::MergeUnsupported { path } => {
                write!(f, "Merge is not supported for file {}", path.display())
            }
            ShellError::Merge { path, source } => {
                write!(f, "Cannot merge file {}: {}", path.display(), source)
            }
            ShellError::Read { path, source } => {
                write!(f, "Cannot read file {}: {}", path.display(), source)
            }
            ShellError::Write { path, source } => {
                write!(f, "Cannot write file {}: {}", path.display(), source)
            }
        }
    }
}

impl StdError for ShellError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ShellError::CreateDirectory { source, .. }
            | ShellError::Read { source, .. }
            | ShellError::Write { source, .. } => Some(source),
            ShellError::Merge { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Host-environment hooks for writing generated files.
pub trait ShellCallback {
    /// Directory for `package` inside `project`, created if needed.
    fn directory(&mut self, project: &str, package: &str) -> Result<PathBuf, ShellError>;

    /// Whether source files may be merged with existing files.
    fn is_merge_supported(&self) -> bool;

    /// Whether existing files may be replaced when they cannot be merged.
    fn is_overwrite_enabled(&self) -> bool;

    /// Merge new source content into the existing file at `existing`.
    fn merge(&mut self, new_content: &str, existing: &Path) -> Result<String, ShellError> {
        let _ = new_content;
        Err(ShellError::MergeUnsupported {
            path: existing.to_path_buf(),
        })
    }

    /// A project received new or changed files.
    fn refresh_project(&mut self, project: &str);
}

/// Plain filesystem shell.
///
/// Project names are directories, resolved against `root` when relative.
/// The project directory must exist; package directories are created.
#[derive(Debug, Clone, Default)]
pub struct DefaultShellCallback {
    root: Option<PathBuf>,
    overwrite: bool,
    merge_supported: bool,
    refreshed: Vec<String>,
}

impl DefaultShellCallback {
    pub fn new(overwrite: bool) -> Self {
        Self {
            overwrite,
            ..Self::default()
        }
    }

    /// Resolve relative project paths against `root`.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Merge source files using generated-region markers.
    pub fn merge_supported(mut self, value: bool) -> Self {
        self.merge_supported = value;
        self
    }

    /// Projects refreshed so far, in notification order.
    pub fn refreshed_projects(&self) -> &[String] {
        &self.refreshed
    }

    fn project_dir(&self, project: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(project),
            None => PathBuf::from(project),
        }
    }
}

impl ShellCallback for DefaultShellCallback {
    fn directory(&mut self, project: &str, package: &str) -> Result<PathBuf, ShellError> {
        let project_dir = self.project_dir(project);
        if !project_dir.is_dir() {
            return Err(ShellError::ProjectNotFound {
                project: project.to_string(),
            });
        }

        let dir = project_dir.join(package_path(package));
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|source| ShellError::CreateDirectory {
                path: dir.clone(),
                source,
            })?;
            tracing::debug!(path = %dir.display(), "Created package directory");
        }
        Ok(dir)
    }

    fn is_merge_supported(&self) -> bool {
        self.merge_supported
    }

    fn is_overwrite_enabled(&self) -> bool {
        self.overwrite
    }

    fn merge(&mut self, new_content: &str, existing: &Path) -> Result<String, ShellError> {
        if !self.merge_supported {
            return Err(ShellError::MergeUnsupported {
                path: existing.to_path_buf(),
            });
        }
        merge_file(new_content, existing)
    }

    fn refresh_project(&mut self, project: &str) {
        tracing::debug!(project = project, "Refreshing project");
        self.refreshed.push(project.to_string());
    }
}

/// Merge `new_content` into the file at `existing` using region markers.
pub fn merge_file(new_content: &str, existing: &Path) -> Result<String, ShellError> {
    let old = fs::read_to_string(existing).map_err(|source| ShellError::Read {
        path: existing.to_path_buf(),
        source,
    })?;
    merge::merge(new_content, &old).map_err(|source| ShellError::Merge {
        path: existing.to_path_buf(),
        source,
    })
}
