//! Host variable resolution with hierarchical merge
//!
//! The `Resolver` computes the effective variables of one or more hosts under
//! an inventory root. For every host the scopes are merged in this order,
//! later scopes overriding earlier ones:
//!
//! 1. Group vars (`group_vars/<group>.yml`), shallowest group first
//! 2. Host vars (`host_vars/<host>.yml`)
//!
//! The per-host results are then merged, in target order, into one aggregate.

use vars_fs::{NormalizedPath, ScopeFileReader, VarsMapping, VarsSource};

use crate::Result;
use crate::cache::{CacheStats, ResolutionCache, ResolutionKey, ScopeVarsCache};
use crate::inventory::{Host, Targets};
use crate::merge::merge_into;
use crate::scope::ScopeChain;

/// Resolves host variables and memoizes both file reads and results.
///
/// A resolver is one session: its caches start empty, are never
/// invalidated, and are dropped with it. Resolution takes `&mut self`, so a
/// resolver shared between threads has to sit behind a single owner.
#[derive(Debug)]
pub struct Resolver<S = ScopeFileReader> {
    scopes: ScopeVarsCache<S>,
    results: ResolutionCache,
}

impl Resolver<ScopeFileReader> {
    /// Create a resolver reading vars files from disk.
    pub fn new() -> Self {
        Self::with_source(ScopeFileReader::new())
    }
}

impl Default for Resolver<ScopeFileReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: VarsSource> Resolver<S> {
    /// Create a resolver reading vars through a custom source.
    pub fn with_source(source: S) -> Self {
        Self {
            scopes: ScopeVarsCache::new(source),
            results: ResolutionCache::new(),
        }
    }

    /// Resolve the merged variables of `targets` under `root`.
    ///
    /// Missing or unreadable vars files contribute nothing. The result is
    /// cached per `(root, set of host names)`; a repeated call returns the
    /// stored mapping without touching the source.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedTarget`](crate::Error::UnsupportedTarget) if any
    /// target is a group. Nothing is merged or cached in that case.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use vars_core::{Host, Resolver};
    /// use vars_fs::NormalizedPath;
    ///
    /// let mut resolver = Resolver::new();
    /// let host = Host::new("h1").with_group("all", 0).with_group("web", 1);
    /// let vars = resolver.resolve(&NormalizedPath::new("/srv/inventory"), host)?;
    /// ```
    pub fn resolve(
        &mut self,
        root: &NormalizedPath,
        targets: impl Into<Targets>,
    ) -> Result<VarsMapping> {
        let targets = targets.into();
        let hosts = targets.hosts()?;
        let key = ResolutionKey::new(root, hosts.iter().map(|&host| host.name.as_str()));

        if let Some(cached) = self.results.get(&key) {
            tracing::debug!(%root, hosts = ?key.targets, "Resolution cache hit");
            return Ok(cached.clone());
        }

        let mut aggregate = VarsMapping::new();
        for host in hosts {
            let host_vars = self.resolve_host(root, host);
            merge_into(&mut aggregate, &host_vars);
        }

        tracing::debug!(%root, hosts = ?key.targets, keys = aggregate.len(), "Resolved vars");
        Ok(self.results.put(key, aggregate).clone())
    }

    /// Entry point matching the vars plugin calling convention.
    ///
    /// `loader` is passed through untouched. Results are cached whatever
    /// `cache` says; the flag exists so callers written against the plugin
    /// interface keep working.
    pub fn get_vars<L: ?Sized>(
        &mut self,
        _loader: &L,
        path: impl Into<NormalizedPath>,
        targets: impl Into<Targets>,
        cache: bool,
    ) -> Result<VarsMapping> {
        if !cache {
            tracing::debug!("Uncached resolution requested; serving from session cache");
        }
        self.resolve(&path.into(), targets)
    }

    /// The order in which `host`'s scopes are merged.
    pub fn scope_chain(&self, host: &Host) -> ScopeChain {
        ScopeChain::for_host(host)
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats::collect(&self.scopes, &self.results)
    }

    pub fn source(&self) -> &S {
        self.scopes.source()
    }

    /// Group vars from shallow to deep, then the host's own vars.
    fn resolve_host(&mut self, root: &NormalizedPath, host: &Host) -> VarsMapping {
        let chain = ScopeChain::for_host(host);
        let mut merged = VarsMapping::new();

        for scope in &chain {
            let vars = self.scopes.get(scope, root);
            if !vars.is_empty() {
                merge_into(&mut merged, vars);
            }
        }

        tracing::debug!(
            host = %host.name,
            scopes = chain.len(),
            keys = merged.len(),
            "Merged host vars"
        );
        merged
    }
}
