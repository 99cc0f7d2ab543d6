//! Directory names and file extensions of the vars layout.

/// Extensions tried, in order, when looking up a vars file.
pub const VARS_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// The two vars directories found under an inventory root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VarsDir {
    /// `group_vars/`, one file per group
    GroupVars,
    /// `host_vars/`, one file per host
    HostVars,
}

impl VarsDir {
    /// Get the string representation of the directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GroupVars => "group_vars",
            Self::HostVars => "host_vars",
        }
    }
}

impl std::fmt::Display for VarsDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
