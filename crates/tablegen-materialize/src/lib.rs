//! Materialization of generated artifacts for tablegen.
//!
//! For every [`GeneratedArtifact`](tablegen_core::GeneratedArtifact) the
//! [`Materializer`] resolves `<project>/<package path>/<file name>` through a
//! [`ShellCallback`] and, when the file already exists, picks one of:
//!
//! 1. merge, for mergeable mapping documents or for source files when the
//!    shell supports merging ([`merge`](merge::merge));
//! 2. overwrite, with a warning, when the shell allows it;
//! 3. write to the first free `<name>.1` .. `<name>.999`, with a warning.
//!
//! Files are written whole to a fresh temporary file in the target directory
//! and renamed into place.
//! Problems confined to one file become warnings; only an exhausted
//! alternate-name range or cancellation aborts the run.

pub mod merge;
pub mod shell;
pub mod writer;

pub use merge::{MERGE_TAGS, MergeError, has_merge_markers};
pub use shell::{DefaultShellCallback, ShellCallback, ShellError};
pub use writer::{MAX_UNIQUE_SUFFIX, Materialized, Materializer, unique_file_name, write_atomic};
