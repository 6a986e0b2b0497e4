//! Resource Path Value Object
//!
//! A lexically normalized, `/`-separated path used to key local documents
//! and to resolve `$ref` pointers between them:
//! - `.` segments are dropped
//! - `..` pops the previous segment (or is kept when nothing is left to pop
//!   on a relative path)
//! - repeated separators collapse
//!
//! No filesystem access happens here; files that do not exist still
//! normalize.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A normalized document path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize(raw.as_ref()))
    }

    pub fn from_path(path: &Path) -> Self {
        Self::new(path.to_string_lossy().replace('\\', "/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Directory containing this path (`.` for a bare file name)
    pub fn parent(&self) -> ResourcePath {
        match self.0.rfind('/') {
            Some(0) => Self("/".to_string()),
            Some(idx) => Self(self.0[..idx].to_string()),
            None => Self(".".to_string()),
        }
    }

    /// Resolve `reference` relative to this path's directory
    pub fn resolve_sibling(&self, reference: &str) -> ResourcePath {
        if reference.starts_with('/') {
            return Self::new(reference);
        }
        Self::new(format!("{}/{}", self.parent().0, reference))
    }

    /// Express this path relative to `base` (a directory)
    pub fn relative_to(&self, base: &ResourcePath) -> String {
        let target = segments(&self.0);
        let base_segments = segments(&base.0);

        let common = target
            .iter()
            .zip(base_segments.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = vec![".."; base_segments.len() - common];
        parts.extend(target[common..].iter().copied());

        if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join("/")
        }
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourcePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

fn normalize(raw: &str) -> String {
    let absolute = raw.starts_with('/');
    let mut out: Vec<&str> = Vec::new();

    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => match out.last() {
                Some(&last) if last != ".." => {
                    out.pop();
                }
                _ if absolute => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }

    let joined = out.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === TDD: normalize ===

    #[test]
    fn new_drops_dot_and_resolves_parent_segments() {
        assert_eq!(ResourcePath::new("a/./b/../c.yml").as_str(), "a/c.yml");
        assert_eq!(ResourcePath::new("a//b").as_str(), "a/b");
    }

    #[test]
    fn new_keeps_leading_parent_on_relative_paths() {
        assert_eq!(ResourcePath::new("../x/y").as_str(), "../x/y");
        assert_eq!(ResourcePath::new("a/../../y").as_str(), "../y");
    }

    #[test]
    fn new_clamps_parent_at_root() {
        assert_eq!(ResourcePath::new("/../a").as_str(), "/a");
        assert_eq!(ResourcePath::new("/").as_str(), "/");
    }

    #[test]
    fn empty_normalizes_to_dot() {
        assert_eq!(ResourcePath::new("").as_str(), ".");
        assert_eq!(ResourcePath::new("./").as_str(), ".");
    }

    // === TDD: parent / resolve_sibling ===

    #[test]
    fn parent_of_nested_file() {
        assert_eq!(ResourcePath::new("dp/shop.yml").parent().as_str(), "dp");
        assert_eq!(ResourcePath::new("shop.yml").parent().as_str(), ".");
        assert_eq!(ResourcePath::new("/shop.yml").parent().as_str(), "/");
    }

    #[test]
    fn resolve_sibling_is_relative_to_directory() {
        let dp = ResourcePath::new("data-products/shop.yml");
        assert_eq!(
            dp.resolve_sibling("./source-apps/web.yml").as_str(),
            "data-products/source-apps/web.yml"
        );
        assert_eq!(
            dp.resolve_sibling("../apps/web.yml").as_str(),
            "apps/web.yml"
        );
    }

    // === TDD: relative_to ===

    #[test]
    fn relative_to_descendant_and_sibling() {
        let base = ResourcePath::new("data-products");
        assert_eq!(
            ResourcePath::new("data-products/source-apps/web.yml").relative_to(&base),
            "source-apps/web.yml"
        );
        assert_eq!(
            ResourcePath::new("apps/web.yml").relative_to(&base),
            "../apps/web.yml"
        );
    }

    #[test]
    fn relative_to_self_is_dot() {
        let base = ResourcePath::new("a/b");
        assert_eq!(ResourcePath::new("a/b").relative_to(&base), ".");
    }
}
