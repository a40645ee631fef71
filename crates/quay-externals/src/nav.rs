//! Navigation tree walking and mount splicing.
//!
//! The navigation tree is an arbitrary nesting of YAML sequences and
//! mappings. The walker visits every node depth-first and, when a mapping
//! carries the [`MOUNT_KEY`], resolves the mount and replaces the key in
//! place with a [`CONTENT_KEY`] list of published navigation entries.

use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::ExternalsError;
use crate::manifest::load_manifest;
use crate::mount::{Mount, MountSpec, Resolution};
use crate::page::publish_page;
use crate::rewrite::LinkRewriter;

/// Mapping key that marks an external mount specification.
pub const MOUNT_KEY: &str = "external";
/// Mapping key the published entries are spliced back under.
pub const CONTENT_KEY: &str = "content";

/// Navigation entry published for one external page.
///
/// The only value that outlives a mount's processing: it replaces the mount
/// specification in the navigation tree.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NavEntry {
    /// Site route of the published page.
    pub url: String,
    /// Display title.
    pub title: String,
}

/// Walk the navigation tree, resolving every external mount in place.
///
/// Sequences are visited element by element, mappings value by value. A
/// mapping's own mount key is resolved before its values are descended
/// into, and the freshly spliced `content` value is visited like any other.
/// Scalars terminate the recursion. `root` is the project root that the
/// `external/` checkouts and `pages/` content directories hang off; in
/// `strict` (build) mode missing external sources abort the pass.
///
/// # Errors
///
/// Propagates every fatal [`ExternalsError`]; the tree may already have
/// been partially mutated when an error surfaces.
pub fn process_nav_tree(root: &Path, node: &mut Value, strict: bool) -> Result<(), ExternalsError> {
    match node {
        Value::Sequence(items) => {
            for item in items {
                process_nav_tree(root, item, strict)?;
            }
        }
        Value::Mapping(mapping) => {
            process_mount_key(root, mapping, strict)?;
            for (_, value) in mapping.iter_mut() {
                process_nav_tree(root, value, strict)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Resolve and splice the mount carried by `mapping`, if any.
///
/// Removes the mount key with shift semantics so sibling keys keep their
/// relative order; the `content` key lands at the end of the mapping.
fn process_mount_key(
    root: &Path,
    mapping: &mut Mapping,
    strict: bool,
) -> Result<(), ExternalsError> {
    let Some(spec_value) = mapping.get(MOUNT_KEY) else {
        return Ok(());
    };
    let spec: MountSpec =
        serde_yaml::from_value(spec_value.clone()).map_err(ExternalsError::Spec)?;
    mapping.shift_remove(MOUNT_KEY);

    let entries = match Mount::resolve(root, spec, strict)? {
        Resolution::Ready(mount) => process_mount(&mount)?,
        Resolution::Missing(placeholder) => vec![placeholder],
    };

    let items = entries.into_iter().map(nav_entry_value).collect();
    mapping.insert(Value::from(CONTENT_KEY), Value::Sequence(items));
    Ok(())
}

/// Publish every manifest entry of a ready mount, in manifest order.
fn process_mount(mount: &Mount) -> Result<Vec<NavEntry>, ExternalsError> {
    let manifest = load_manifest(&mount.nav_file)?;
    let rewriter = LinkRewriter::from_manifest(&manifest);

    let mut entries = Vec::with_capacity(manifest.len());
    for entry in &manifest {
        entries.push(publish_page(mount, &rewriter, entry)?);
    }

    tracing::info!(
        base = %mount.spec.base,
        repo = %mount.spec.repo,
        page_count = entries.len(),
        "Published external mount"
    );
    Ok(entries)
}

/// Build the `{url, title}` mapping for one published entry.
fn nav_entry_value(entry: NavEntry) -> Value {
    let mut mapping = Mapping::new();
    mapping.insert(Value::from("url"), Value::from(entry.url));
    mapping.insert(Value::from("title"), Value::from(entry.title));
    Value::Mapping(mapping)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    /// Lay out a checked-out external repo under `<root>/external/lib`.
    fn write_external_sources(root: &Path, manifest: &str, files: &[(&str, &str)]) {
        let source_dir = root.join("external/lib");
        fs::create_dir_all(&source_dir).unwrap();
        fs::write(source_dir.join("nav.yml"), manifest).unwrap();
        for (name, content) in files {
            let path = source_dir.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    fn mount_spec_yaml() -> &'static str {
        concat!(
            "external:\n",
            "  base: /docs\n",
            "  path: lib\n",
            "  nav: nav.yml\n",
            "  repo: https://github.com/org/lib\n",
            "  branch: main\n",
        )
    }

    #[test]
    fn test_walker_splices_content_and_keeps_siblings() {
        let root = tempfile::tempdir().unwrap();
        write_external_sources(
            root.path(),
            "- title: Intro\n  url: intro.html\n  md: intro.md\n",
            &[("intro.md", "hello")],
        );

        let indented = mount_spec_yaml().replace('\n', "\n      ");
        let tree = format!("- section: A\n  items:\n    - {}", indented.trim_end());
        let mut nav: Value = serde_yaml::from_str(&tree).unwrap();

        process_nav_tree(root.path(), &mut nav, true).unwrap();

        let item = &nav[0]["items"][0];
        assert!(item.get(MOUNT_KEY).is_none());
        assert_eq!(item[CONTENT_KEY][0]["url"], Value::from("/docs/intro.html"));
        assert_eq!(item[CONTENT_KEY][0]["title"], Value::from("Intro"));
        assert_eq!(nav[0]["section"], Value::from("A"));
    }

    #[test]
    fn test_end_to_end_published_file_and_entry() {
        let root = tempfile::tempdir().unwrap();
        write_external_sources(
            root.path(),
            "- title: Intro\n  url: intro.html\n  md: intro.md\n",
            &[("intro.md", "hello")],
        );

        let mut nav: Value = serde_yaml::from_str(mount_spec_yaml()).unwrap();
        process_nav_tree(root.path(), &mut nav, true).unwrap();

        let written = fs::read_to_string(root.path().join("pages/docs/intro.md")).unwrap();
        assert!(written.starts_with("##################################################\n"));
        assert!(written.contains("#### https://github.com/org/lib\n"));
        assert!(written.contains("#### branch main\n"));
        assert!(written.contains("#### file   intro.md\n"));
        assert!(written.contains("title: \"Intro\"\n"));
        assert!(
            written.contains("github_edit_url: https://github.com/org/lib/edit/main/intro.md\n")
        );
        assert!(written.ends_with("hello"));

        assert_eq!(
            nav[CONTENT_KEY],
            serde_yaml::from_str::<Value>("- url: /docs/intro.html\n  title: Intro\n").unwrap()
        );
    }

    #[test]
    fn test_pages_published_in_manifest_order_with_links_rewritten() {
        let root = tempfile::tempdir().unwrap();
        write_external_sources(
            root.path(),
            "- title: Intro\n  url: intro.html\n  md: intro.md\n\
             - title: Guide\n  url: guide.html\n  md: guide.md\n",
            &[
                ("intro.md", "see [guide](guide.md#setup)"),
                ("guide.md", "back to [intro](intro.md)"),
            ],
        );

        let mut nav: Value = serde_yaml::from_str(mount_spec_yaml()).unwrap();
        process_nav_tree(root.path(), &mut nav, true).unwrap();

        let content = nav[CONTENT_KEY].as_sequence().unwrap();
        assert_eq!(content[0]["title"], Value::from("Intro"));
        assert_eq!(content[1]["title"], Value::from("Guide"));

        let intro = fs::read_to_string(root.path().join("pages/docs/intro.md")).unwrap();
        assert!(intro.ends_with("see [guide](guide.html#setup)"));
        let guide = fs::read_to_string(root.path().join("pages/docs/guide.md")).unwrap();
        assert!(guide.ends_with("back to [intro](intro.html)"));
    }

    #[test]
    fn test_missing_sources_in_preview_mode_splice_placeholder() {
        let root = tempfile::tempdir().unwrap();

        let mut nav: Value = serde_yaml::from_str(mount_spec_yaml()).unwrap();
        process_nav_tree(root.path(), &mut nav, false).unwrap();

        assert!(nav.get(MOUNT_KEY).is_none());
        let content = nav[CONTENT_KEY].as_sequence().unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0]["url"], Value::from("/"));
        assert_eq!(
            content[0]["title"],
            Value::from("external \"lib\" is it included")
        );
    }

    #[test]
    fn test_missing_sources_in_build_mode_abort() {
        let root = tempfile::tempdir().unwrap();

        let mut nav: Value = serde_yaml::from_str(mount_spec_yaml()).unwrap();
        let err = process_nav_tree(root.path(), &mut nav, true).unwrap_err();

        assert!(matches!(err, ExternalsError::MissingSource { .. }));
    }

    #[test]
    fn test_malformed_mount_spec_is_fatal() {
        let root = tempfile::tempdir().unwrap();

        let mut nav: Value = serde_yaml::from_str("external:\n  base: /docs\n").unwrap();
        let err = process_nav_tree(root.path(), &mut nav, false).unwrap_err();

        assert!(matches!(err, ExternalsError::Spec(_)));
    }

    #[test]
    fn test_scalars_and_mountless_mappings_are_untouched() {
        let root = tempfile::tempdir().unwrap();

        let text = "- plain string\n- section: A\n  items:\n    - title: Local\n      url: /local\n";
        let mut nav: Value = serde_yaml::from_str(text).unwrap();
        let before = nav.clone();

        process_nav_tree(root.path(), &mut nav, true).unwrap();

        assert_eq!(nav, before);
    }

    #[test]
    fn test_multiple_mounts_resolve_independently() {
        let root = tempfile::tempdir().unwrap();
        write_external_sources(
            root.path(),
            "- title: Intro\n  url: intro.html\n  md: intro.md\n",
            &[("intro.md", "hello")],
        );

        // Second mount points at a checkout that is not there; preview mode
        // degrades it while the first still publishes.
        let indented = mount_spec_yaml().replace('\n', "\n  ");
        let tree = format!(
            "- {first}\n- external:\n    base: /other\n    path: other\n    nav: nav.yml\n    \
             repo: https://github.com/org/other\n    branch: main\n",
            first = indented.trim_end()
        );
        let mut nav: Value = serde_yaml::from_str(&tree).unwrap();

        process_nav_tree(root.path(), &mut nav, false).unwrap();

        assert_eq!(nav[0][CONTENT_KEY][0]["url"], Value::from("/docs/intro.html"));
        assert_eq!(
            nav[1][CONTENT_KEY][0]["title"],
            Value::from("external \"other\" is it included")
        );
    }
}
