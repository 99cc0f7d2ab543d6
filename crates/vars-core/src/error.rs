//! Error types for vars-core

/// Result type for vars-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving variables
///
/// Vars files never produce errors here; unreadable files are logged and
/// contribute nothing. Every variant describes a fault in the inventory
/// handed to the resolver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A group was passed where a host is required
    #[error("Group `{name}` cannot be resolved directly; resolve its hosts instead")]
    UnsupportedTarget { name: String },

    /// The inventory document has an unexpected shape
    #[error("Invalid inventory: {message}")]
    InvalidInventory { message: String },

    /// A group is declared as a descendant of itself
    #[error("Inventory group `{group}` is its own ancestor")]
    InventoryCycle { group: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from vars-fs
    #[error(transparent)]
    Fs(#[from] vars_fs::Error),

    /// YAML deserialization error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn invalid_inventory(message: impl Into<String>) -> Self {
        Self::InvalidInventory {
            message: message.into(),
        }
    }
}
