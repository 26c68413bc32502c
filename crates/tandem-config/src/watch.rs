//! Watch policy: which project paths the file-watcher treats as invisible.
//!
//! Patterns are globs relative to the project root. `*` and `?` never cross a
//! `/`, while a whole `**` component matches any number of directories. A path
//! is ignored when it, or any of its ancestors, matches a pattern, so
//! `src-tauri`, `src-tauri/**` and `**/src-tauri/**` all hide the whole tree.

use std::fmt;
use std::path::Path;

use glob::{MatchOptions, Pattern};
use indexmap::IndexSet;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{ConfigError, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A single validated exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IgnorePattern {
    raw: String,
    glob: Pattern,
}

impl IgnorePattern {
    /// Compile a pattern, rejecting empty, unsupported or root-matching input.
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::invalid_pattern(raw, "pattern is empty"));
        }
        if trimmed.starts_with('!') {
            return Err(ConfigError::invalid_pattern(
                raw,
                "negated patterns are not supported",
            ));
        }
        if trimmed.contains('{') || trimmed.contains('}') {
            return Err(ConfigError::invalid_pattern(
                raw,
                "brace expansion is not supported; list each alternative separately",
            ));
        }

        let normalized = normalize(trimmed);
        let body = strip_recursive_tail(&normalized);
        if covers_root(body) {
            return Err(ConfigError::invalid_pattern(
                raw,
                "pattern matches the project root and would hide every change",
            ));
        }

        let glob = Pattern::new(body)
            .map_err(|err| ConfigError::invalid_pattern(raw, err.to_string()))?;
        if glob.matches_with("", MATCH_OPTIONS) {
            return Err(ConfigError::invalid_pattern(
                raw,
                "pattern matches the project root and would hide every change",
            ));
        }

        debug!(pattern = trimmed, glob = body, "compiled ignore pattern");
        Ok(Self {
            raw: trimmed.to_string(),
            glob,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a normalized relative path, checking every ancestor as well.
    fn matches_relative(&self, rel: &str) -> bool {
        rel.match_indices('/')
            .map(|(idx, _)| &rel[..idx])
            .chain(std::iter::once(rel))
            .any(|candidate| self.glob.matches_with(candidate, MATCH_OPTIONS))
    }
}

impl fmt::Display for IgnorePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for IgnorePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Ordered set of exclusions handed to the file-watcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WatchPolicy {
    ignored: IndexSet<IgnorePattern>,
}

impl WatchPolicy {
    /// Compile every pattern; the first invalid one fails the whole policy.
    ///
    /// Repeated patterns collapse onto their first occurrence.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ignored = patterns
            .into_iter()
            .map(|p| IgnorePattern::new(p.as_ref()))
            .collect::<Result<IndexSet<_>>>()?;
        Ok(Self { ignored })
    }

    pub fn patterns(&self) -> impl Iterator<Item = &IgnorePattern> {
        self.ignored.iter()
    }

    pub fn len(&self) -> usize {
        self.ignored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty()
    }

    /// Whether a change at `rel_path` (relative to the project root) is invisible.
    ///
    /// The root itself is never ignored.
    pub fn is_ignored(&self, rel_path: impl AsRef<Path>) -> bool {
        let rel = normalize(&rel_path.as_ref().to_string_lossy());
        if rel.is_empty() {
            return false;
        }
        self.ignored.iter().any(|p| p.matches_relative(&rel))
    }

    /// Classify an absolute path observed by the watcher.
    ///
    /// Paths outside `root` are always ignored.
    pub fn is_ignored_abs(&self, root: &Path, path: &Path) -> bool {
        match path.strip_prefix(root) {
            Ok(rel) => self.is_ignored(rel),
            Err(_) => true,
        }
    }
}

/// Normalize separators and strip root anchors (`/`, `./`) and trailing slashes.
fn normalize(input: &str) -> String {
    let mut s = input.trim().replace('\\', "/");
    loop {
        if let Some(rest) = s.strip_prefix("./") {
            s = rest.to_string();
        } else if let Some(rest) = s.strip_prefix('/') {
            s = rest.to_string();
        } else {
            break;
        }
    }
    while s.ends_with('/') {
        s.pop();
    }
    if s == "." {
        s.clear();
    }
    s
}

/// `a/**` and `a` hide the same tree, so the trailing component is dropped.
fn strip_recursive_tail(pattern: &str) -> &str {
    let mut body = pattern;
    while let Some(rest) = body.strip_suffix("/**") {
        body = rest;
    }
    body
}

/// A body covers the root when it can match the root or every entry directly
/// below it, such as `**`, `?*` or `**/[!.]*`.
fn covers_root(body: &str) -> bool {
    body.split('/').all(|component| {
        component.is_empty() || component == "." || component == "**" || matches_any_name(component)
    })
}

/// Whether a component has no literal character outside `[...]` classes and a
/// `*` that lets it match names of any length.
fn matches_any_name(component: &str) -> bool {
    let mut has_star = false;
    let mut in_class = false;
    let mut class_len = 0;
    for ch in component.chars() {
        if in_class {
            // `]` directly after `[` or `[!` is a member, not the end.
            if ch == ']' && class_len > 0 {
                in_class = false;
            } else if !(class_len == 0 && ch == '!') {
                class_len += 1;
            }
            continue;
        }
        match ch {
            '[' => {
                in_class = true;
                class_len = 0;
            }
            '*' => has_star = true,
            '?' => {}
            _ => return false,
        }
    }
    has_star
}
