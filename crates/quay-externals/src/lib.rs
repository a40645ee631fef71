//! External documentation mounts for the Quay documentation engine.
//!
//! A navigation tree may declare that part of the site's documentation is
//! hosted in another repository. For every such mount this crate locates
//! the already-checked-out source tree, reads its nav manifest, rewrites
//! cross-document markdown links to the published routes, prepends a
//! generated front-matter header to each page, copies the result into the
//! site's content tree and splices the resulting navigation entries back
//! into the tree in place.
//!
//! Cloning the external repository is out of scope: only the URL shape is
//! validated and the local checkout's presence confirmed. Processing is
//! single-threaded and synchronous; pages are published in the exact order
//! the nav manifest lists them.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), quay_externals::ExternalsError> {
//! use std::path::Path;
//!
//! use quay_externals::process_nav_tree;
//!
//! let raw = std::fs::read_to_string("nav.yml")?;
//! let mut nav: serde_yaml::Value =
//!     serde_yaml::from_str(&raw).expect("navigation tree must be YAML");
//!
//! // Build mode: missing external checkouts abort the pass.
//! process_nav_tree(Path::new("."), &mut nav, true)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod manifest;
mod mount;
mod nav;
mod page;
mod repo;
mod rewrite;

pub use error::ExternalsError;
pub use manifest::{ManifestEntry, load_manifest};
pub use mount::{Mount, MountSpec, Resolution};
pub use nav::{CONTENT_KEY, MOUNT_KEY, NavEntry, process_nav_tree};
pub use page::{Page, publish_page};
pub use repo::validate_repo_url;
pub use rewrite::LinkRewriter;
