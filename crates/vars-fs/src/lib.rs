//! Filesystem access for host and group variable files
//!
//! Provides path handling for the `group_vars/` and `host_vars/` layout and a
//! tolerant YAML reader that turns every vars file into a mapping.

pub mod constants;
pub mod error;
pub mod path;
pub mod reader;

pub use constants::{VARS_EXTENSIONS, VarsDir};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use reader::{ScopeFileReader, VarsMapping, VarsSource};
