//! Mount specification and filesystem resolution.
//!
//! A mount references documentation that lives in another repository. The
//! checkout itself happens before this code runs; resolution only derives
//! the local paths from an injected project root and confirms the nav
//! manifest is present.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ExternalsError;
use crate::nav::NavEntry;
use crate::repo::validate_repo_url;

/// Directory under the project root holding external checkouts.
const EXTERNAL_DIR: &str = "external";
/// Directory under the project root holding site content pages.
const PAGES_DIR: &str = "pages";

/// One external mount specification, as found in the navigation tree.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct MountSpec {
    /// Site-relative target directory for the published pages.
    pub base: String,
    /// Subdirectory of the checkout tree the sources live in.
    pub path: String,
    /// Nav-manifest filename, relative to the source subdirectory.
    pub nav: String,
    /// URL of the repository the sources come from.
    pub repo: String,
    /// Branch the sources are checked out from.
    pub branch: String,
}

/// A mount with its derived filesystem locations.
///
/// Lives only for the duration of processing one mount.
#[derive(Clone, Debug)]
pub struct Mount {
    /// The originating specification.
    pub spec: MountSpec,
    /// Absolute directory holding the external checkout.
    pub source_dir: PathBuf,
    /// Absolute directory the transformed pages are written into.
    pub target_dir: PathBuf,
    /// Absolute path of the nav manifest inside the checkout.
    pub nav_file: PathBuf,
}

/// Outcome of resolving a mount spec against the local filesystem.
#[derive(Debug)]
pub enum Resolution {
    /// Nav manifest found; the mount is ready for processing.
    Ready(Mount),
    /// Nav manifest missing in preview mode; publish this placeholder
    /// entry instead of processing the mount.
    Missing(NavEntry),
}

impl Mount {
    /// Resolve a mount spec against the project root.
    ///
    /// Validates the repository URL first, then derives the source
    /// directory (`<root>/external/<path>`), target directory
    /// (`<root>/pages/<base>`) and nav manifest path, and checks that the
    /// manifest exists. A missing manifest is fatal in `strict` (build)
    /// mode; otherwise it degrades to a warning and a placeholder entry so
    /// a preview build survives an unchecked-out dependency.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalsError::RepoUrl`] for a malformed repository URL
    /// and [`ExternalsError::MissingSource`] when the nav manifest is
    /// absent in strict mode.
    pub fn resolve(root: &Path, spec: MountSpec, strict: bool) -> Result<Resolution, ExternalsError> {
        let label = format!("external module `{}`", spec.path);
        validate_repo_url(&spec.repo, &label)?;

        let source_dir = root.join(EXTERNAL_DIR).join(spec.path.trim_start_matches('/'));
        let target_dir = root.join(PAGES_DIR).join(spec.base.trim_start_matches('/'));
        let nav_file = source_dir.join(spec.nav.trim_start_matches('/'));

        tracing::debug!(
            repo = %spec.repo,
            branch = %spec.branch,
            source_dir = %source_dir.display(),
            target_dir = %target_dir.display(),
            nav_file = %nav_file.display(),
            "Detected external mount"
        );

        if nav_file.is_file() {
            return Ok(Resolution::Ready(Mount {
                spec,
                source_dir,
                target_dir,
                nav_file,
            }));
        }

        if strict {
            return Err(ExternalsError::MissingSource {
                nav_file,
                repo: spec.repo,
                source_dir,
            });
        }

        tracing::warn!(
            path = %spec.path,
            repo = %spec.repo,
            source_dir = %source_dir.display(),
            "Cannot locate external sources; check out the external repository"
        );

        Ok(Resolution::Missing(NavEntry {
            url: "/".to_owned(),
            title: format!("external \"{}\" is it included", spec.path),
        }))
    }
}
