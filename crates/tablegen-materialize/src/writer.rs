//! Writes generated artifacts under the merge / overwrite / rename policy.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use tablegen_core::{
    ArtifactKind, Error, GeneratedArtifact, ProgressCallback, Result, Warnings,
};

use crate::shell::{ShellCallback, ShellError, merge_file};

/// Highest numeric suffix tried for an alternate file name.
pub const MAX_UNIQUE_SUFFIX: u32 = 999;

/// Files written and projects refreshed by one materialization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Materialized {
    pub written: Vec<PathBuf>,
    pub refreshed_projects: Vec<String>,
}

/// Failure while writing one artifact.
enum FileError {
    /// Recoverable; becomes a warning.
    Shell(ShellError),
    /// Aborts the run.
    Fatal(Error),
}

impl From<ShellError> for FileError {
    fn from(err: ShellError) -> Self {
        FileError::Shell(err)
    }
}

impl From<Error> for FileError {
    fn from(err: Error) -> Self {
        FileError::Fatal(err)
    }
}

/// Writes artifacts through a [`ShellCallback`].
pub struct Materializer<'a> {
    shell: &'a mut dyn ShellCallback,
}

impl<'a> Materializer<'a> {
    pub fn new(shell: &'a mut dyn ShellCallback) -> Self {
        Self { shell }
    }

    /// Write every artifact, then refresh each touched project once.
    ///
    /// Mapping documents are written first, then source files, then plain
    /// text files. Per-file problems become warnings; an exhausted alternate
    /// name range or cancellation aborts.
    #[tracing::instrument(level = "debug", skip_all, fields(files = artifacts.len()))]
    pub fn materialize_all(
        &mut self,
        artifacts: &[GeneratedArtifact],
        progress: &mut dyn ProgressCallback,
        warnings: &mut Warnings,
    ) -> Result<Materialized> {
        let mut result = Materialized::default();
        let mut projects = BTreeSet::new();

        progress.save_started(artifacts.len());
        for artifact in ordered_for_write(artifacts) {
            projects.insert(artifact.target_project.as_str());
            if let Some(path) = self.materialize(artifact, progress, warnings)? {
                result.written.push(path);
            }
        }

        for project in projects {
            self.shell.refresh_project(project);
            result.refreshed_projects.push(project.to_string());
        }

        tracing::info!(
            written = result.written.len(),
            projects = result.refreshed_projects.len(),
            "Artifacts written"
        );
        Ok(result)
    }

    /// Write one artifact. Returns the path written, or `None` when a
    /// per-file problem was turned into a warning.
    pub fn materialize(
        &mut self,
        artifact: &GeneratedArtifact,
        progress: &mut dyn ProgressCallback,
        warnings: &mut Warnings,
    ) -> Result<Option<PathBuf>> {
        match self.write_artifact(artifact, progress, warnings) {
            Ok(path) => Ok(Some(path)),
            Err(FileError::Shell(err)) => {
                warnings.push(err.to_string());
                Ok(None)
            }
            Err(FileError::Fatal(err)) => Err(err),
        }
    }

    fn write_artifact(
        &mut self,
        artifact: &GeneratedArtifact,
        progress: &mut dyn ProgressCallback,
        warnings: &mut Warnings,
    ) -> std::result::Result<PathBuf, FileError> {
        let directory = self
            .shell
            .directory(&artifact.target_project, &artifact.target_package)?;
        let target = directory.join(&artifact.file_name);
        check_encoding(artifact, &target)?;
        progress.check_cancel()?;

        let (path, content) = if target.exists() {
            self.resolve_existing(artifact, &directory, target, warnings)?
        } else {
            (target, Cow::Borrowed(artifact.content.as_str()))
        };

        progress.start_task(&format!("Saving file {}", artifact.file_name));
        write_atomic(&path, &content)?;
        tracing::debug!(path = %path.display(), kind = artifact.kind.label(), "Wrote file");
        Ok(path)
    }

    /// Decide where and what to write when `target` already exists.
    fn resolve_existing<'c>(
        &mut self,
        artifact: &'c GeneratedArtifact,
        directory: &Path,
        target: PathBuf,
        warnings: &mut Warnings,
    ) -> std::result::Result<(PathBuf, Cow<'c, str>), FileError> {
        let merged = match artifact.kind {
            ArtifactKind::Mapping { mergeable: true } => Some(merge_file(&artifact.content, &target)),
            ArtifactKind::Source if self.shell.is_merge_supported() => {
                Some(self.shell.merge(&artifact.content, &target))
            }
            _ => None,
        };
        match merged {
            Some(Ok(content)) => {
                tracing::debug!(path = %target.display(), "Merged existing file");
                return Ok((target, Cow::Owned(content)));
            }
            Some(Err(err)) => warnings.push(err.to_string()),
            None => {}
        }

        let content = Cow::Borrowed(artifact.content.as_str());
        if self.shell.is_overwrite_enabled() {
            warnings.push(format!("Existing file {} was overwritten", target.display()));
            Ok((target, content))
        } else {
            let alternate = unique_file_name(directory, &artifact.file_name)?;
            warnings.push(format!(
                "Existing file {} was not overwritten, the generated file was saved as {}",
                target.display(),
                alternate.display()
            ));
            Ok((alternate, content))
        }
    }
}

/// Mapping documents, then source files, then plain text, each in input order.
fn ordered_for_write(artifacts: &[GeneratedArtifact]) -> impl Iterator<Item = &GeneratedArtifact> {
    let rank = |artifact: &GeneratedArtifact| match artifact.kind {
        ArtifactKind::Mapping { .. } => 0,
        ArtifactKind::Source => 1,
        ArtifactKind::PlainText => 2,
    };
    let mut ordered: Vec<&GeneratedArtifact> = artifacts.iter().collect();
    ordered.sort_by_key(|artifact| rank(*artifact));
    ordered.into_iter()
}

fn check_encoding(artifact: &GeneratedArtifact, path: &Path) -> std::result::Result<(), ShellError> {
    match artifact.effective_encoding() {
        None => Ok(()),
        Some(encoding)
            if encoding.eq_ignore_ascii_case("UTF-8") || encoding.eq_ignore_ascii_case("UTF8") =>
        {
            Ok(())
        }
        Some(encoding) => Err(ShellError::UnsupportedEncoding {
            encoding: encoding.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

/// First unused `<file_name>.<n>` in `directory` for `n` in 1..=999.
pub fn unique_file_name(directory: &Path, file_name: &str) -> Result<PathBuf> {
    (1..=MAX_UNIQUE_SUFFIX)
        .map(|n| directory.join(format!("{}.{}", file_name, n)))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| Error::UniqueFileName {
            directory: directory.to_path_buf(),
        })
}

/// Write `content` to a fresh temp file in the target directory, then move
/// it over `path`.
///
/// The temp name is chosen by `tempfile` and never collides with an existing
/// file; on failure the temp file is removed when it is dropped.
pub fn write_atomic(path: &Path, content: &str) -> std::result::Result<(), ShellError> {
    let write_error = |source: io::Error| ShellError::Write {
        path: path.to_path_buf(),
        source,
    };
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(directory).map_err(write_error)?;
    temp.write_all(content.as_bytes()).map_err(write_error)?;
    temp.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}
