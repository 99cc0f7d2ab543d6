//! Layered host variable resolution
//!
//! This crate computes the effective variables of inventory hosts from the
//! `group_vars/` and `host_vars/` files under an inventory root:
//!
//! - **Inventory**: hosts, groups and group depths parsed from YAML
//! - **Scope chain**: the precedence order of a host's scopes
//! - **Deep merge**: key-wise merge of nested mappings, everything else replaced
//! - **Session caches**: per-scope reads and per-resolution results
//! - **Resolver**: the orchestration of all of the above
//!
//! # Architecture
//!
//! ```text
//!        CLI
//!         |
//!     vars-core   (inventory, scope, merge, cache, resolver)
//!         |
//!      vars-fs    (paths, vars file reader)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use vars_core::{Inventory, Resolver};
//! use vars_fs::NormalizedPath;
//!
//! let root = NormalizedPath::new("/srv/inventory");
//! let inventory = Inventory::load(&root.join("hosts.yml"))?;
//! let mut resolver = Resolver::new();
//! let vars = resolver.resolve(&root, inventory.hosts())?;
//! ```

pub mod cache;
pub mod error;
pub mod inventory;
pub mod merge;
pub mod resolver;
pub mod scope;

pub use cache::{CacheStats, ResolutionCache, ResolutionKey, ScopeKey, ScopeVarsCache};
pub use error::{Error, Result};
pub use inventory::{Group, Host, Inventory, ROOT_GROUP, Target, Targets, UNGROUPED_GROUP};
pub use merge::{merge, merge_all, merge_into};
pub use resolver::Resolver;
pub use scope::{Scope, ScopeChain, ScopeKind};
