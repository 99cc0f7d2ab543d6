//! Session caches for scope vars and resolved results
//!
//! Both tiers live as long as the [`Resolver`](crate::Resolver) that owns
//! them. Entries are never evicted: the first value stored for a key is the
//! value returned for the rest of the session.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use vars_fs::{NormalizedPath, VarsMapping, VarsSource};

use crate::scope::{Scope, ScopeKind};

/// Identifies one vars file lookup.
///
/// The kind and root are part of the key, so a group and a host sharing a
/// name, or the same group under two inventory roots, never alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeKey {
    pub kind: ScopeKind,
    pub root: NormalizedPath,
    pub name: String,
}

impl ScopeKey {
    pub fn new(scope: &Scope, root: &NormalizedPath) -> Self {
        Self {
            kind: scope.kind(),
            root: root.clone(),
            name: scope.name().to_string(),
        }
    }
}

/// Memoizes per-scope reads from a [`VarsSource`].
#[derive(Debug)]
pub struct ScopeVarsCache<S> {
    source: S,
    entries: HashMap<ScopeKey, VarsMapping>,
    hits: u64,
    misses: u64,
}

impl<S: VarsSource> ScopeVarsCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Vars of `scope` under `root`, reading the source only on first use.
    pub fn get(&mut self, scope: &Scope, root: &NormalizedPath) -> &VarsMapping {
        match self.entries.entry(ScopeKey::new(scope, root)) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                tracing::debug!(scope = %scope, %root, "Scope cache hit");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                let base = root.join(scope.kind().vars_dir().as_str());
                let vars = self.source.read(&base, scope.name());
                tracing::debug!(scope = %scope, %root, keys = vars.len(), "Scope cache miss");
                entry.insert(vars)
            }
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Identifies one resolution: an inventory root plus the set of host names.
///
/// Host order and duplicates do not matter; merging distinct hosts in
/// another order can only differ where hosts disagree, and the first
/// aggregate computed for a set is the one kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionKey {
    pub root: NormalizedPath,
    pub targets: BTreeSet<String>,
}

impl ResolutionKey {
    pub fn new<'a>(root: &NormalizedPath, targets: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            root: root.clone(),
            targets: targets.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Memoizes fully merged results.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<ResolutionKey, VarsMapping>,
    hits: u64,
    misses: u64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &ResolutionKey) -> Option<&VarsMapping> {
        let found = self.entries.get(key);
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Store `result` unless the key is already present; returns the kept value.
    pub fn put(&mut self, key: ResolutionKey, result: VarsMapping) -> &VarsMapping {
        self.entries.entry(key).or_insert(result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counters for both cache tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub scope_hits: u64,
    pub scope_misses: u64,
    pub scope_entries: usize,
    pub result_hits: u64,
    pub result_misses: u64,
    pub result_entries: usize,
}

impl CacheStats {
    pub(crate) fn collect<S: VarsSource>(
        scopes: &ScopeVarsCache<S>,
        results: &ResolutionCache,
    ) -> Self {
        Self {
            scope_hits: scopes.hits,
            scope_misses: scopes.misses,
            scope_entries: scopes.len(),
            result_hits: results.hits,
            result_misses: results.misses,
            result_entries: results.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;
    use std::cell::RefCell;

    /// Records every read and answers with a mapping naming the file.
    #[derive(Default)]
    struct Recorder {
        reads: RefCell<Vec<String>>,
    }

    impl VarsSource for Recorder {
        fn read(&self, base: &NormalizedPath, name: &str) -> VarsMapping {
            let path = base.join(name).to_string();
            self.reads.borrow_mut().push(path.clone());
            let mut vars = VarsMapping::new();
            vars.insert("from".into(), path.into());
            vars
        }
    }

    fn group(name: &str) -> Scope {
        Scope::Group {
            name: name.into(),
            depth: 1,
        }
    }

    #[test]
    fn test_second_lookup_is_served_from_cache() {
        let mut cache = ScopeVarsCache::new(Recorder::default());
        let root = NormalizedPath::new("/inv");

        let first = cache.get(&group("web"), &root).clone();
        let second = cache.get(&group("web"), &root).clone();

        assert_eq!(first, second);
        assert_eq!(*cache.source().reads.borrow(), ["/inv/group_vars/web"]);
    }

    #[test]
    fn test_kind_is_part_of_key() {
        let mut cache = ScopeVarsCache::new(Recorder::default());
        let root = NormalizedPath::new("/inv");

        cache.get(&group("web"), &root);
        cache.get(&Scope::Host { name: "web".into() }, &root);

        assert_eq!(
            *cache.source().reads.borrow(),
            ["/inv/group_vars/web", "/inv/host_vars/web"]
        );
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_root_is_part_of_key() {
        let mut cache = ScopeVarsCache::new(Recorder::default());

        cache.get(&group("web"), &NormalizedPath::new("/a"));
        cache.get(&group("web"), &NormalizedPath::new("/b"));
        cache.get(&group("web"), &NormalizedPath::new("/a/"));

        assert_eq!(cache.source().reads.borrow().len(), 2);
    }

    #[test]
    fn test_resolution_key_ignores_order_and_duplicates() {
        let root = NormalizedPath::new("/inv");
        let a = ResolutionKey::new(&root, ["h2", "h1", "h1"]);
        let b = ResolutionKey::new(&root, ["h1", "h2"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_put_wins() {
        let mut cache = ResolutionCache::new();
        let key = ResolutionKey::new(&NormalizedPath::new("/inv"), ["h1"]);
        let mut first = VarsMapping::new();
        first.insert("n".into(), Value::from(1_i64));
        let mut second = VarsMapping::new();
        second.insert("n".into(), Value::from(2_i64));

        cache.put(key.clone(), first.clone());
        cache.put(key.clone(), second);

        assert_eq!(cache.get(&key), Some(&first));
        assert_eq!(cache.len(), 1);
    }
}
