//! GitHub repository URL validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExternalsError;

/// Shape of a GitHub repository URL: scheme, host, owner and repo segments.
static GITHUB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+/?$")
        .expect("invalid GitHub URL regex")
});

/// Check that `url` has the shape of a GitHub repository URL.
///
/// Pure check, run once per mount before any filesystem access so that
/// malformed configuration is reported before partial work occurs. `label`
/// identifies the offending mount in the error message.
///
/// # Errors
///
/// Returns [`ExternalsError::RepoUrl`] if the URL does not match.
pub fn validate_repo_url(url: &str, label: &str) -> Result<(), ExternalsError> {
    if GITHUB_URL.is_match(url) {
        return Ok(());
    }
    Err(ExternalsError::RepoUrl {
        label: label.to_owned(),
        url: url.to_owned(),
    })
}
