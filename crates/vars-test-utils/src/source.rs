//! [`CountingReader`], a disk reader that records how often it is used.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use vars_fs::{NormalizedPath, ScopeFileReader, VarsMapping, VarsSource};

/// Delegates to [`ScopeFileReader`] and counts every `read`.
///
/// Clones share the counter, so a test can keep one clone while the
/// resolver owns another.
#[derive(Debug, Clone, Default)]
pub struct CountingReader {
    inner: ScopeFileReader,
    reads: Arc<AtomicUsize>,
}

impl CountingReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reads performed so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl VarsSource for CountingReader {
    fn read(&self, base: &NormalizedPath, name: &str) -> VarsMapping {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(base, name)
    }
}
