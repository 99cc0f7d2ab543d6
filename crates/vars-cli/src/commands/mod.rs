//! Command implementations for vars-cli

pub mod inspect;
pub mod resolve;

pub use inspect::{run_chain, run_list};
pub use resolve::{run_each, run_resolve};

use std::path::Path;

use vars_core::{Inventory, Resolver, Target};
use vars_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// An inventory, the root its vars live under, and one resolver session.
pub struct Session {
    pub inventory: Inventory,
    pub root: NormalizedPath,
    pub resolver: Resolver,
}

impl Session {
    /// Load `inventory`; the vars root defaults to the inventory's directory.
    pub fn open(inventory: &Path, root: Option<&Path>) -> Result<Self> {
        let inventory_path = NormalizedPath::new(inventory);
        if !inventory_path.is_file() {
            return Err(CliError::user(format!(
                "Inventory file not found: {}",
                inventory_path
            )));
        }

        let root = match root {
            Some(root) => NormalizedPath::new(root),
            None => NormalizedPath::new(inventory.parent().unwrap_or(Path::new("."))),
        };
        tracing::debug!(inventory = %inventory_path, %root, "Opening session");

        Ok(Self {
            inventory: Inventory::load(&inventory_path)?,
            root,
            resolver: Resolver::new(),
        })
    }

    /// Look up `name`, failing with a user error when it is unknown.
    pub fn target(&self, name: &str) -> Result<Target> {
        self.inventory
            .target(name)
            .ok_or_else(|| CliError::user(format!("Unknown host '{}'", name)))
    }

    /// Log cache counters at debug level.
    pub fn log_stats(&self) {
        let stats = self.resolver.stats();
        tracing::debug!(
            scope_hits = stats.scope_hits,
            scope_misses = stats.scope_misses,
            result_hits = stats.result_hits,
            result_misses = stats.result_misses,
            "Session cache statistics"
        );
    }
}
