//! Scopes and the precedence order in which they are merged

use vars_fs::VarsDir;

use crate::inventory::Host;

/// Whether a scope is a group or the host itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScopeKind {
    Group,
    Host,
}

impl ScopeKind {
    /// Directory holding the vars files of this kind of scope.
    pub fn vars_dir(self) -> VarsDir {
        match self {
            Self::Group => VarsDir::GroupVars,
            Self::Host => VarsDir::HostVars,
        }
    }
}

/// A named source of variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A group membership; lower depth merges first
    Group { name: String, depth: u32 },
    /// The host's own vars; always merged last
    Host { name: String },
}

impl Scope {
    pub fn name(&self) -> &str {
        match self {
            Self::Group { name, .. } | Self::Host { name } => name,
        }
    }

    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Group { .. } => ScopeKind::Group,
            Self::Host { .. } => ScopeKind::Host,
        }
    }

    pub fn depth(&self) -> Option<u32> {
        match self {
            Self::Group { depth, .. } => Some(*depth),
            Self::Host { .. } => None,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Group { name, depth } => {
                write!(f, "{}/{} (depth {})", VarsDir::GroupVars, name, depth)
            }
            Self::Host { name } => write!(f, "{}/{}", VarsDir::HostVars, name),
        }
    }
}

/// The scopes of one host, least specific first.
///
/// Groups are ordered by `(depth, declaration index)`, so groups at equal
/// depth keep the order in which the host lists them. The host scope closes
/// the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeChain {
    scopes: Vec<Scope>,
}

impl ScopeChain {
    pub fn for_host(host: &Host) -> Self {
        let mut groups: Vec<_> = host.groups().iter().enumerate().collect();
        groups.sort_by_key(|(declared, group)| (group.depth, *declared));

        let scopes = groups
            .into_iter()
            .map(|(_, group)| Scope::Group {
                name: group.name.clone(),
                depth: group.depth,
            })
            .chain(std::iter::once(Scope::Host {
                name: host.name.clone(),
            }))
            .collect();

        Self { scopes }
    }

    /// Scopes in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl<'a> IntoIterator for &'a ScopeChain {
    type Item = &'a Scope;
    type IntoIter = std::slice::Iter<'a, Scope>;

    fn into_iter(self) -> Self::IntoIter {
        self.scopes.iter()
    }
}
