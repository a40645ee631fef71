//! CLI error types.

use quay_externals::ExternalsError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Externals(#[from] ExternalsError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid navigation tree: {0}")]
    Nav(#[from] serde_yaml::Error),
}
