//! Error types for external mount processing.

use std::path::PathBuf;

/// Error type for external mount processing.
///
/// Every variant aborts the whole navigation pass when it propagates; the
/// only non-fatal degradation is the preview-mode placeholder, which is
/// produced before a [`MissingSource`](ExternalsError::MissingSource) error
/// would ever be constructed.
#[derive(Debug, thiserror::Error)]
pub enum ExternalsError {
    /// Repository URL does not have the shape of a GitHub repository URL.
    #[error("{label}: `{url}` is not a GitHub repository URL")]
    RepoUrl {
        /// Identifies the mount the URL came from.
        label: String,
        /// The offending URL string.
        url: String,
    },

    /// The `external` mapping could not be deserialized into a mount spec.
    #[error("Invalid external mount specification: {0}")]
    Spec(#[source] serde_yaml::Error),

    /// Nav manifest missing for a mount in build mode.
    #[error(
        "File {} is not found, clone {repo} to {}",
        .nav_file.display(),
        .source_dir.display()
    )]
    MissingSource {
        /// Expected nav manifest location.
        nav_file: PathBuf,
        /// Repository that has to be checked out.
        repo: String,
        /// Directory the checkout must land in.
        source_dir: PathBuf,
    },

    /// Manifest entry path with the wrong extension.
    #[error("{field} path `{value}` must have `{expected}` extension")]
    InvalidEntry {
        /// Manifest field name (`md` or `url`).
        field: &'static str,
        /// The offending path value.
        value: String,
        /// Required extension.
        expected: &'static str,
    },

    /// A markdown file listed in the nav manifest is missing on disk.
    #[error("Source file {} listed in the nav manifest is missing", .path.display())]
    SourceNotFound {
        /// Resolved absolute path of the missing file.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: std::io::Error,
    },

    /// Nav manifest could not be parsed as an ordered entry list.
    #[error("Failed to parse nav manifest {}: {source}", .path.display())]
    Manifest {
        /// Manifest file path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Uncategorized I/O failure (directory creation, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
