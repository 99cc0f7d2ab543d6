//! [`TestTree`] builder for inventory root scenarios.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use vars_fs::NormalizedPath;

/// A temporary inventory root with helpers to lay out vars files.
///
/// # Example
///
/// ```rust,no_run
/// use vars_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.group_vars("web", "port: 80\n");
/// tree.host_vars("h1", "port: 8080\n");
/// tree.assert_file_exists("host_vars/h1.yml");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary inventory root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Return the root as a [`NormalizedPath`].
    pub fn normalized_root(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    /// Write `content` to `path` (relative to the root), creating parents.
    pub fn write(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    /// Write `group_vars/<group>.yml`.
    pub fn group_vars(&self, group: &str, content: &str) {
        self.write(&format!("group_vars/{group}.yml"), content);
    }

    /// Write `host_vars/<host>.yml`.
    pub fn host_vars(&self, host: &str, content: &str) {
        self.write(&format!("host_vars/{host}.yml"), content);
    }

    /// Write `hosts.yml` and return its path.
    pub fn inventory(&self, content: &str) -> NormalizedPath {
        self.write("hosts.yml", content);
        self.normalized_root().join("hosts.yml")
    }

    /// Delete the `group_vars/` and `host_vars/` directories.
    pub fn remove_vars(&self) {
        for dir in ["group_vars", "host_vars"] {
            let full_path = self.root().join(dir);
            if full_path.exists() {
                fs::remove_dir_all(full_path).unwrap();
            }
        }
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
