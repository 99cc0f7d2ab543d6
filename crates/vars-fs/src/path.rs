//! Normalized path handling for inventory roots and vars files

use std::path::{Path, PathBuf};

/// A path normalized to forward slashes with empty and `.` segments removed.
///
/// Two spellings of the same inventory root (`inv`, `inv/`, `./inv/.`) compare
/// equal, which makes the type usable as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        Self {
            inner: clean(&raw),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        if self.inner == "." {
            return Self { inner: clean(&segment) };
        }
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment)),
        }
    }

    /// Append `.ext` to the final component.
    pub fn with_extension(&self, ext: &str) -> Self {
        Self {
            inner: format!("{}.{}", self.inner, ext),
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        match self.inner.rsplit('/').next() {
            Some("") | Some(".") | None => None,
            Some(name) => Some(name),
        }
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Drop empty and `.` segments, keeping a leading `/` for absolute paths.
fn clean(raw: &str) -> String {
    let absolute = raw.starts_with('/');
    let segments: Vec<&str> = raw
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    match (absolute, segments.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{}", segments.join("/")),
        (false, true) => ".".to_string(),
        (false, false) => segments.join("/"),
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_and_dot_segments_are_equivalent() {
        assert_eq!(NormalizedPath::new("inv/"), NormalizedPath::new("./inv/."));
        assert_eq!(NormalizedPath::new("inv").as_str(), "inv");
    }

    #[test]
    fn join_then_extension() {
        let root = NormalizedPath::new("/srv/inventory");
        let file = root.join("group_vars").join("web").with_extension("yml");
        assert_eq!(file.as_str(), "/srv/inventory/group_vars/web.yml");
        assert_eq!(file.file_name(), Some("web.yml"));
    }

    #[test]
    fn join_on_current_dir_drops_dot() {
        let root = NormalizedPath::new(".");
        assert_eq!(root.join("host_vars").as_str(), "host_vars");
    }

    #[test]
    fn root_stays_absolute() {
        assert_eq!(NormalizedPath::new("/").as_str(), "/");
        assert_eq!(NormalizedPath::new("//a//b").as_str(), "/a/b");
    }
}
