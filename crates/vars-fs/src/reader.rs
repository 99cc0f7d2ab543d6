//! Tolerant loading of `<name>.yml` / `<name>.yaml` vars files

use std::fs;

use serde_yaml::Value;

use crate::{Error, NormalizedPath, Result, VARS_EXTENSIONS};

/// Variables declared by one scope, in declaration order.
pub type VarsMapping = serde_yaml::Mapping;

/// A source of per-scope variables.
///
/// `read` never fails: absent or broken sources contribute an empty mapping.
/// Implementations must be idempotent for the same arguments, since callers
/// memoize the result.
pub trait VarsSource {
    /// Read the variables stored under `base` for the logical name `name`.
    fn read(&self, base: &NormalizedPath, name: &str) -> VarsMapping;
}

/// Reads vars files from disk, trying each of [`VARS_EXTENSIONS`] in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScopeFileReader;

impl ScopeFileReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single vars file.
    ///
    /// A file that is empty or holds a null document yields an empty
    /// mapping. Any other non-mapping document is an error. Merge keys
    /// (`<<: *anchor`) are expanded.
    pub fn load(&self, path: &NormalizedPath) -> Result<VarsMapping> {
        let native = path.to_native();
        let content = fs::read_to_string(&native).map_err(|e| Error::io(&native, e))?;

        if is_blank_document(&content) {
            return Ok(VarsMapping::new());
        }

        let parse_error = |e: serde_yaml::Error| Error::Parse {
            path: native.clone(),
            message: e.to_string(),
        };
        let mut document: Value = serde_yaml::from_str(&content).map_err(parse_error)?;
        document.apply_merge().map_err(parse_error)?;

        match document {
            Value::Null => Ok(VarsMapping::new()),
            Value::Mapping(mapping) => Ok(mapping),
            other => Err(Error::NotAMapping {
                path: native,
                found: kind_of(&other),
            }),
        }
    }
}

impl VarsSource for ScopeFileReader {
    fn read(&self, base: &NormalizedPath, name: &str) -> VarsMapping {
        // Joining would drop these and escape `base`.
        if name.is_empty() || name == "." {
            tracing::debug!(%base, name, "Skipping scope without a file name");
            return VarsMapping::new();
        }
        let stem = base.join(name);

        for ext in VARS_EXTENSIONS {
            let candidate = stem.with_extension(ext);
            if !candidate.exists() {
                continue;
            }
            if !candidate.is_file() {
                tracing::warn!(path = %candidate, "Ignoring vars path that is not a regular file");
                continue;
            }
            match self.load(&candidate) {
                Ok(mapping) => {
                    tracing::debug!(path = %candidate, keys = mapping.len(), "Loaded vars file");
                    return mapping;
                }
                Err(error) => {
                    tracing::warn!(path = %candidate, %error, "Ignoring unreadable vars file");
                }
            }
        }

        tracing::debug!(path = %stem, "No usable vars file");
        VarsMapping::new()
    }
}

/// Only whitespace and comments.
fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
