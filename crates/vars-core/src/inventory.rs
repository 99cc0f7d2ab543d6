//! Inventory model: hosts, groups and their depths
//!
//! An inventory is a YAML document in the conventional layout:
//!
//! ```text
//! all:
//!   hosts:
//!     bastion:
//!   children:
//!     web:
//!       hosts:
//!         h1:
//!       children:
//!         prod:
//!           hosts:
//!             h1:
//! ```
//!
//! `all` is the root group with depth 0. Every other group sits one level
//! below its deepest parent. A host belongs to the groups that list it and to
//! every ancestor of those groups. A host listed only under `all` is placed in
//! the implicit `ungrouped` group (depth 1).

use std::collections::HashMap;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use vars_fs::NormalizedPath;

use crate::{Error, Result};

/// Name of the implicit root group.
pub const ROOT_GROUP: &str = "all";

/// Implicit group of hosts that no other group lists.
pub const UNGROUPED_GROUP: &str = "ungrouped";

/// A group membership as seen from a host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Group {
    pub name: String,
    /// Distance from the root group
    pub depth: u32,
}

impl Group {
    pub fn new(name: impl Into<String>, depth: u32) -> Self {
        Self {
            name: name.into(),
            depth,
        }
    }
}

/// A host together with every group it belongs to, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub name: String,
    groups: Vec<Group>,
}

impl Host {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    /// Add a membership. Groups added earlier count as declared earlier.
    pub fn with_group(mut self, name: impl Into<String>, depth: u32) -> Self {
        self.groups.push(Group::new(name, depth));
        self
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }
}

/// Something handed to the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Host(Host),
    Group(Group),
}

impl From<Host> for Target {
    fn from(host: Host) -> Self {
        Self::Host(host)
    }
}

impl From<Group> for Target {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

/// One or many targets; a single target is a one-element sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets(Vec<Target>);

impl Targets {
    /// All targets as hosts, or an error naming the first group found.
    pub fn hosts(&self) -> Result<Vec<&Host>> {
        self.0
            .iter()
            .map(|target| match target {
                Target::Host(host) => Ok(host),
                Target::Group(group) => Err(Error::UnsupportedTarget {
                    name: group.name.clone(),
                }),
            })
            .collect()
    }
}

impl From<Target> for Targets {
    fn from(target: Target) -> Self {
        Self(vec![target])
    }
}

impl From<Host> for Targets {
    fn from(host: Host) -> Self {
        Self(vec![Target::Host(host)])
    }
}

impl From<Group> for Targets {
    fn from(group: Group) -> Self {
        Self(vec![Target::Group(group)])
    }
}

impl From<Vec<Target>> for Targets {
    fn from(targets: Vec<Target>) -> Self {
        Self(targets)
    }
}

impl From<Vec<Host>> for Targets {
    fn from(hosts: Vec<Host>) -> Self {
        Self(hosts.into_iter().map(Target::Host).collect())
    }
}

impl From<&[Host]> for Targets {
    fn from(hosts: &[Host]) -> Self {
        Self(hosts.iter().cloned().map(Target::Host).collect())
    }
}

/// Hosts and groups parsed from an inventory document.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    groups: Vec<Group>,
    hosts: Vec<Host>,
}

impl Inventory {
    /// Load an inventory file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let native = path.to_native();
        let content =
            std::fs::read_to_string(&native).map_err(|e| vars_fs::Error::io(&native, e))?;
        tracing::debug!(%path, "Loading inventory");
        Self::from_yaml(&content)
    }

    /// Parse an inventory document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: Option<Mapping> = serde_yaml::from_str(content)?;
        let mut builder = Builder::new();

        for (key, value) in document.unwrap_or_default() {
            let name = key_name(&key, "group")?;
            let node = GroupNode::parse(&name, value)?;
            let parent = if name == ROOT_GROUP { None } else { Some(0) };
            builder.walk(&name, node, parent, &mut Vec::new())?;
        }

        builder.finish()
    }

    /// Groups in declaration order, `all` first.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Hosts in declaration order.
    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn host(&self, name: &str) -> Option<&Host> {
        self.hosts.iter().find(|host| host.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Look up a target by name, preferring a host over a group.
    pub fn target(&self, name: &str) -> Option<Target> {
        self.host(name)
            .cloned()
            .map(Target::Host)
            .or_else(|| self.group(name).cloned().map(Target::Group))
    }
}

/// One group entry of the document.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupNode {
    #[serde(default)]
    hosts: Option<Mapping>,
    #[serde(default)]
    children: Option<Mapping>,
    #[serde(default)]
    vars: Option<Mapping>,
}

impl GroupNode {
    fn parse(name: &str, value: Value) -> Result<Self> {
        let node: Option<Self> = serde_yaml::from_value(value).map_err(|e| {
            Error::invalid_inventory(format!("group `{}`: {}", name, e))
        })?;
        Ok(node.unwrap_or_default())
    }
}

#[derive(Debug)]
struct GroupEntry {
    name: String,
    parents: Vec<usize>,
}

#[derive(Debug)]
struct HostEntry {
    name: String,
    direct: Vec<usize>,
}

/// Collects groups and hosts while walking the document depth-first.
struct Builder {
    groups: Vec<GroupEntry>,
    group_index: HashMap<String, usize>,
    hosts: Vec<HostEntry>,
    host_index: HashMap<String, usize>,
}

impl Builder {
    fn new() -> Self {
        let mut builder = Self {
            groups: Vec::new(),
            group_index: HashMap::new(),
            hosts: Vec::new(),
            host_index: HashMap::new(),
        };
        builder.intern_group(ROOT_GROUP);
        builder
    }

    fn intern_group(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.group_index.get(name) {
            return idx;
        }
        let idx = self.groups.len();
        self.groups.push(GroupEntry {
            name: name.to_string(),
            parents: Vec::new(),
        });
        self.group_index.insert(name.to_string(), idx);
        idx
    }

    fn intern_host(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.host_index.get(name) {
            return idx;
        }
        let idx = self.hosts.len();
        self.hosts.push(HostEntry {
            name: name.to_string(),
            direct: Vec::new(),
        });
        self.host_index.insert(name.to_string(), idx);
        idx
    }

    fn walk(
        &mut self,
        name: &str,
        node: GroupNode,
        parent: Option<usize>,
        stack: &mut Vec<usize>,
    ) -> Result<()> {
        let idx = self.intern_group(name);
        if stack.contains(&idx) || (idx == 0 && parent.is_some()) {
            return Err(Error::InventoryCycle {
                group: name.to_string(),
            });
        }
        if let Some(parent) = parent {
            if !self.groups[idx].parents.contains(&parent) {
                self.groups[idx].parents.push(parent);
            }
        }

        if node.vars.is_some() {
            tracing::debug!(group = name, "Ignoring inline vars; use group_vars/ instead");
        }

        for (key, _) in node.hosts.unwrap_or_default() {
            let host = key_name(&key, "host")?;
            let host_idx = self.intern_host(&host);
            if !self.hosts[host_idx].direct.contains(&idx) {
                self.hosts[host_idx].direct.push(idx);
            }
        }

        stack.push(idx);
        for (key, value) in node.children.unwrap_or_default() {
            let child = key_name(&key, "group")?;
            let child_node = GroupNode::parse(&child, value)?;
            self.walk(&child, child_node, Some(idx), stack)?;
        }
        stack.pop();

        Ok(())
    }

    /// Move hosts listed only under `all` into `ungrouped`.
    fn assign_ungrouped(&mut self) {
        let lonely: Vec<usize> = self
            .hosts
            .iter()
            .enumerate()
            .filter(|(_, host)| host.direct == [0])
            .map(|(idx, _)| idx)
            .collect();
        if lonely.is_empty() {
            return;
        }

        let idx = self.intern_group(UNGROUPED_GROUP);
        if !self.groups[idx].parents.contains(&0) {
            self.groups[idx].parents.push(0);
        }
        for host in lonely {
            self.hosts[host].direct = vec![idx];
        }
    }

    fn finish(mut self) -> Result<Inventory> {
        self.assign_ungrouped();

        let mut depths: Vec<Option<u32>> = vec![None; self.groups.len()];
        let mut visiting = vec![false; self.groups.len()];
        for idx in 0..self.groups.len() {
            depth_of(idx, &self.groups, &mut depths, &mut visiting)?;
        }
        let depth = |idx: usize| depths[idx].unwrap_or_default();

        let groups = self
            .groups
            .iter()
            .enumerate()
            .map(|(idx, entry)| Group::new(&entry.name, depth(idx)))
            .collect();

        let hosts = self
            .hosts
            .iter()
            .map(|entry| {
                let mut member = vec![false; self.groups.len()];
                let mut pending = entry.direct.clone();
                while let Some(idx) = pending.pop() {
                    if !member[idx] {
                        member[idx] = true;
                        pending.extend(&self.groups[idx].parents);
                    }
                }

                let mut host = Host::new(&entry.name);
                for (idx, _) in member.iter().enumerate().filter(|(_, m)| **m) {
                    host = host.with_group(&self.groups[idx].name, depth(idx));
                }
                host
            })
            .collect();

        Ok(Inventory { groups, hosts })
    }
}

/// Depth of a group: 0 without parents, else one below its deepest parent.
fn depth_of(
    idx: usize,
    groups: &[GroupEntry],
    depths: &mut [Option<u32>],
    visiting: &mut [bool],
) -> Result<u32> {
    if let Some(depth) = depths[idx] {
        return Ok(depth);
    }
    if visiting[idx] {
        return Err(Error::InventoryCycle {
            group: groups[idx].name.clone(),
        });
    }

    visiting[idx] = true;
    let mut depth = 0;
    for &parent in &groups[idx].parents {
        depth = depth.max(depth_of(parent, groups, depths, visiting)? + 1);
    }
    visiting[idx] = false;

    depths[idx] = Some(depth);
    Ok(depth)
}

fn key_name(key: &Value, what: &str) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::invalid_inventory(format!(
            "{} name must be a string, found {:?}",
            what, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
all:
  hosts:
    bastion:
  children:
    web:
      hosts:
        h1:
        h2:
      children:
        prod:
          hosts:
            h1:
    db:
      hosts:
        h3:
"#;

    #[test]
    fn test_depths_follow_nesting() {
        let inventory = Inventory::from_yaml(SAMPLE).unwrap();
        let depths: Vec<_> = inventory
            .groups()
            .iter()
            .map(|g| (g.name.as_str(), g.depth))
            .collect();
        assert_eq!(
            depths,
            [("all", 0), ("web", 1), ("prod", 2), ("db", 1), ("ungrouped", 1)]
        );
    }

    #[test]
    fn test_host_inherits_ancestors() {
        let inventory = Inventory::from_yaml(SAMPLE).unwrap();
        let h1 = inventory.host("h1").unwrap();
        let names: Vec<_> = h1.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["all", "web", "prod"]);
    }

    #[test]
    fn test_ungrouped_host_belongs_to_all() {
        let inventory = Inventory::from_yaml(SAMPLE).unwrap();
        let bastion = inventory.host("bastion").unwrap();
        assert_eq!(
            bastion.groups(),
            [Group::new("all", 0), Group::new("ungrouped", 1)]
        );
    }

    #[test]
    fn test_host_in_all_and_another_group_is_not_ungrouped() {
        let yaml = "all:\n  hosts:\n    h1:\n  children:\n    web:\n      hosts:\n        h1:\n";
        let inventory = Inventory::from_yaml(yaml).unwrap();
        let names: Vec<_> = inventory
            .host("h1")
            .unwrap()
            .groups()
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, ["all", "web"]);
        assert!(inventory.group(UNGROUPED_GROUP).is_none());
    }

    #[test]
    fn test_declared_ungrouped_group_is_reused() {
        let yaml = "all:\n  hosts:\n    bastion:\n  children:\n    ungrouped:\n      hosts:\n        lone:\n";
        let inventory = Inventory::from_yaml(yaml).unwrap();
        let ungrouped: Vec<_> = inventory
            .groups()
            .iter()
            .filter(|g| g.name == UNGROUPED_GROUP)
            .collect();
        assert_eq!(ungrouped, [&Group::new("ungrouped", 1)]);
        assert_eq!(
            inventory.host("bastion").unwrap().groups(),
            inventory.host("lone").unwrap().groups()
        );
    }

    #[test]
    fn test_deepest_parent_sets_depth() {
        let yaml = r#"
all:
  children:
    a:
      children:
        b:
          children:
            shared:
    c:
      children:
        shared:
"#;
        let inventory = Inventory::from_yaml(yaml).unwrap();
        assert_eq!(inventory.group("shared").unwrap().depth, 3);
    }

    #[test]
    fn test_top_level_groups_hang_off_all() {
        let yaml = "web:\n  hosts:\n    h1:\n";
        let inventory = Inventory::from_yaml(yaml).unwrap();
        assert_eq!(inventory.group("web").unwrap().depth, 1);
        assert_eq!(inventory.host("h1").unwrap().groups().len(), 2);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let yaml = "all:\n  children:\n    a:\n      children:\n        b:\n          children:\n            a:\n";
        let err = Inventory::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InventoryCycle { ref group } if group == "a"));
    }

    #[test]
    fn test_cycle_across_declarations_is_rejected() {
        let yaml = "all:\n  children:\n    a:\n      children:\n        b:\nb:\n  children:\n    a:\n";
        let err = Inventory::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InventoryCycle { .. }));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let yaml = "all:\n  members:\n    h1:\n";
        let err = Inventory::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidInventory { .. }));
    }

    #[test]
    fn test_target_prefers_host() {
        let yaml = "all:\n  children:\n    web:\n      hosts:\n        web:\n";
        let inventory = Inventory::from_yaml(yaml).unwrap();
        assert!(matches!(inventory.target("web"), Some(Target::Host(_))));
        assert!(matches!(inventory.target("all"), Some(Target::Group(_))));
        assert!(inventory.target("nope").is_none());
    }

    #[test]
    fn test_group_targets_are_rejected() {
        let targets = Targets::from(vec![
            Target::Host(Host::new("h1")),
            Target::Group(Group::new("web", 1)),
        ]);
        let err = targets.hosts().unwrap_err();
        assert!(matches!(err, Error::UnsupportedTarget { ref name } if name == "web"));
    }
}
