//! Per-page transformation and publishing.
//!
//! For each nav manifest entry, the source markdown is read from the
//! checkout, its cross-document links are rewritten, a generated header is
//! prepended and the result is written into the site's content tree.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ExternalsError;
use crate::manifest::ManifestEntry;
use crate::mount::Mount;
use crate::nav::NavEntry;
use crate::rewrite::LinkRewriter;

/// Filesystem and URL locations derived for one manifest entry.
#[derive(Debug)]
pub struct Page {
    /// Final site route: mount base joined with the entry url.
    pub route: String,
    /// Display title from the manifest.
    pub title: String,
    /// Absolute path of the source markdown in the checkout.
    pub source_file: PathBuf,
    /// Absolute path the transformed markdown is written to.
    pub target_file: PathBuf,
    /// Directory containing `target_file`.
    pub target_dir: PathBuf,
    /// Deep link to the repository's edit page for the source file.
    pub edit_url: String,
    /// Manifest `md` path as written, kept for the generated header.
    md: String,
    repo: String,
    branch: String,
}

impl Page {
    /// Derive the page locations for one manifest entry.
    ///
    /// The target file is the entry url with its `.html` suffix replaced by
    /// `.md`, joined under the mount's target directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalsError::InvalidEntry`] if the entry violates the
    /// `.md`/`.html` extension invariants.
    pub fn from_entry(mount: &Mount, entry: &ManifestEntry) -> Result<Self, ExternalsError> {
        let url_rel = entry.url.trim_start_matches('/');
        let Some(stem) = url_rel.strip_suffix(".html") else {
            return Err(ExternalsError::InvalidEntry {
                field: "url",
                value: entry.url.clone(),
                expected: ".html",
            });
        };
        if !entry.md.ends_with(".md") {
            return Err(ExternalsError::InvalidEntry {
                field: "md",
                value: entry.md.clone(),
                expected: ".md",
            });
        }
        let md_rel = entry.md.trim_start_matches('/');

        let target_file = mount.target_dir.join(format!("{stem}.md"));
        let target_dir = target_file
            .parent()
            .map_or_else(|| mount.target_dir.clone(), Path::to_path_buf);

        Ok(Self {
            route: format!("{}/{url_rel}", mount.spec.base.trim_end_matches('/')),
            title: entry.title.clone(),
            source_file: mount.source_dir.join(md_rel),
            target_file,
            target_dir,
            edit_url: format!(
                "{}/edit/{}/{md_rel}",
                mount.spec.repo.trim_end_matches('/'),
                mount.spec.branch
            ),
            md: entry.md.clone(),
            repo: mount.spec.repo.clone(),
            branch: mount.spec.branch.clone(),
        })
    }

    /// Header block prepended to every published page.
    ///
    /// The downstream renderer keys on this exact block: the bytes,
    /// including the trailing spaces on four of the lines, must not change.
    fn header(&self) -> String {
        format!(
            concat!(
                "##################################################\n",
                "#### THIS FILE WAS AUTOGENERATED FROM\n",
                "#### {repo}\n",
                "#### branch {branch}\n",
                "#### file   {md}\n",
                "#### links were in the file! \n",
                "#### HEADER below IS GENERATED! \n",
                "##################################################\n",
                "\n",
                "---\n",
                "type: doc \n",
                "layout: reference \n",
                "title: \"{title}\"\n",
                "github_edit_url: {edit_url}\n",
                "---\n",
                "\n",
            ),
            repo = self.repo,
            branch = self.branch,
            md = self.md,
            title = self.title,
            edit_url = self.edit_url,
        )
    }
}

/// Transform one manifest entry and write the result into the site tree.
///
/// Creates the target directory if needed, reads the source markdown,
/// applies the mount's link substitutions in manifest order, prepends the
/// generated header and overwrites the target file. There is no
/// partial-write protection: a failure mid-write leaves the target file in
/// an undefined state and propagates.
///
/// # Errors
///
/// Returns [`ExternalsError::SourceNotFound`] if the listed markdown file
/// is absent (always fatal, the manifest promised it exists) and
/// [`ExternalsError::Io`] on directory-creation or write failures.
pub fn publish_page(
    mount: &Mount,
    rewriter: &LinkRewriter,
    entry: &ManifestEntry,
) -> Result<NavEntry, ExternalsError> {
    let page = Page::from_entry(mount, entry)?;

    fs::create_dir_all(&page.target_dir)?;

    let source_text = fs::read_to_string(&page.source_file).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ExternalsError::SourceNotFound {
                path: page.source_file.clone(),
                source,
            }
        } else {
            ExternalsError::Io(source)
        }
    })?;

    // TODO: detect a leading `---` front-matter block in the source and
    // warn or merge instead of stacking a second block on top of it.
    let rewritten = rewriter.apply(&source_text);
    fs::write(&page.target_file, format!("{}{rewritten}", page.header()))?;

    tracing::debug!(
        source = %page.source_file.display(),
        target = %page.target_file.display(),
        route = %page.route,
        "Published external page"
    );

    Ok(NavEntry {
        url: page.route,
        title: page.title,
    })
}
