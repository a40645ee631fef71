//! Nav manifest loading and validation.
//!
//! The nav manifest is an ordered YAML list defining what an external mount
//! publishes. Order matters twice: pages are transformed in manifest order,
//! and link substitution rules are applied in that same order.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ExternalsError;

/// One entry of an external mount's nav manifest.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Display title for navigation.
    pub title: String,
    /// Site-relative route of the published page. Must end in `.html`.
    pub url: String,
    /// Source-relative markdown path inside the checkout. Must end in `.md`.
    pub md: String,
}

impl ManifestEntry {
    /// Check the extension invariants: `md` ends in `.md`, `url` in `.html`.
    fn validate(&self) -> Result<(), ExternalsError> {
        if !self.md.ends_with(".md") {
            return Err(ExternalsError::InvalidEntry {
                field: "md",
                value: self.md.clone(),
                expected: ".md",
            });
        }
        if !self.url.ends_with(".html") {
            return Err(ExternalsError::InvalidEntry {
                field: "url",
                value: self.url.clone(),
                expected: ".html",
            });
        }
        Ok(())
    }
}

/// Load and validate the ordered nav manifest at `path`.
///
/// Every entry is validated up front, before any page I/O happens, so a
/// broken manifest aborts the mount without touching the target tree.
///
/// # Errors
///
/// Returns [`ExternalsError::Manifest`] if the file is not a YAML list of
/// entries, [`ExternalsError::InvalidEntry`] on an extension violation, and
/// [`ExternalsError::Io`] if the file cannot be read.
pub fn load_manifest(path: &Path) -> Result<Vec<ManifestEntry>, ExternalsError> {
    let raw = fs::read_to_string(path)?;
    let entries: Vec<ManifestEntry> =
        serde_yaml::from_str(&raw).map_err(|source| ExternalsError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
    for entry in &entries {
        entry.validate()?;
    }
    Ok(entries)
}
