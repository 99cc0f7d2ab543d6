//! Inventory inspection commands

use colored::Colorize;
use std::fmt::Write;

use vars_core::Target;

use crate::error::{CliError, Result};

use super::Session;

/// Run the chain command: show a host's scopes in merge order
pub fn run_chain(session: &Session, host: &str) -> Result<String> {
    let host = match session.target(host)? {
        Target::Host(host) => host,
        Target::Group(group) => {
            return Err(CliError::user(format!(
                "'{}' is a group; chain works on hosts",
                group.name
            )));
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Scope chain for".bold(), host.name.green());
    for (position, scope) in session.resolver.scope_chain(&host).iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", position + 1, scope);
    }
    let _ = writeln!(out, "{}", "(later entries take precedence)".dimmed());
    Ok(out)
}

/// Run the list command: groups with depths, hosts with memberships
pub fn run_list(session: &Session) -> Result<String> {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Groups".bold());
    for group in session.inventory.groups() {
        let _ = writeln!(out, "  {:<20} depth {}", group.name.cyan(), group.depth);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Hosts".bold());
    for host in session.inventory.hosts() {
        let groups: Vec<&str> = host.groups().iter().map(|g| g.name.as_str()).collect();
        let _ = writeln!(out, "  {:<20} {}", host.name.green(), groups.join(", "));
    }

    Ok(out)
}
