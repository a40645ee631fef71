//! Manifest-driven link rewriting.
//!
//! External pages link to each other by their original markdown paths.
//! Published pages live under different routes, so every markdown-style
//! link whose destination is a manifest `md` path gets rewritten to that
//! entry's published `url`. The match is textual over the raw file content,
//! not a markdown-aware parse: the destination must appear verbatim as
//! `](<md-path>`, optionally followed by a `#fragment`, then `)`.

use regex::{Captures, Regex};

use crate::manifest::ManifestEntry;

/// One substitution: a link to the entry's `md` path becomes a link to its
/// published `url`, with any `#fragment` preserved.
struct Rule {
    pattern: Regex,
    target: String,
}

/// Ordered set of link substitutions for one mount.
pub struct LinkRewriter {
    rules: Vec<Rule>,
}

impl LinkRewriter {
    /// Build one rule per manifest entry, in manifest order.
    ///
    /// Rules run sequentially, each over the previous rule's output, and no
    /// rule may assume whether an earlier one matched. Manifest order is a
    /// documented tie-break for entries sharing an `md` path, so the rules
    /// must not be fused into a single combined pass.
    #[must_use]
    pub fn from_manifest(entries: &[ManifestEntry]) -> Self {
        let rules = entries
            .iter()
            .map(|entry| {
                let pattern = format!(r"\]\({}(#[^)]+)?\)", regex::escape(&entry.md));
                Rule {
                    pattern: Regex::new(&pattern).expect("escaped link pattern is valid"),
                    target: entry.url.clone(),
                }
            })
            .collect();
        Self { rules }
    }

    /// Apply every rule in order to `text`.
    ///
    /// The replacement is built in a closure so `$` in a target URL is
    /// always literal, never a capture reference.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let mut text = text.to_owned();
        for rule in &self.rules {
            text = rule
                .pattern
                .replace_all(&text, |caps: &Captures<'_>| {
                    let fragment = caps.get(1).map_or("", |m| m.as_str());
                    format!("]({}{fragment})", rule.target)
                })
                .into_owned();
        }
        text
    }
}
