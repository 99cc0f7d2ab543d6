//! Resolve commands

use serde_yaml::Value;
use vars_core::Target;
use vars_fs::VarsMapping;

use crate::cli::OutputFormat;
use crate::error::{CliError, Result};

use super::Session;

/// Run the resolve command: merge all named hosts into one mapping
pub fn run_resolve(
    session: &mut Session,
    hosts: &[String],
    all: bool,
    format: OutputFormat,
) -> Result<String> {
    let targets: Vec<Target> = if all {
        session
            .inventory
            .hosts()
            .iter()
            .cloned()
            .map(Target::Host)
            .collect()
    } else if hosts.is_empty() {
        return Err(CliError::user("No hosts given; pass host names or --all"));
    } else {
        hosts
            .iter()
            .map(|name| session.target(name))
            .collect::<Result<Vec<_>>>()?
    };

    let vars = session.resolver.resolve(&session.root, targets)?;
    session.log_stats();
    render(&vars, format)
}

/// Run the each command: resolve hosts separately within one session
pub fn run_each(session: &mut Session, hosts: &[String], format: OutputFormat) -> Result<String> {
    let names: Vec<String> = if hosts.is_empty() {
        session
            .inventory
            .hosts()
            .iter()
            .map(|host| host.name.clone())
            .collect()
    } else {
        hosts.to_vec()
    };

    let mut output = VarsMapping::new();
    for name in names {
        let target = session.target(&name)?;
        let vars = session.resolver.resolve(&session.root, target)?;
        output.insert(Value::String(name), Value::Mapping(vars));
    }

    session.log_stats();
    render(&output, format)
}

/// Serialize vars in the requested format, newline-terminated.
pub fn render(vars: &VarsMapping, format: OutputFormat) -> Result<String> {
    let mut rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(vars)?,
        OutputFormat::Yaml => serde_yaml::to_string(vars)?,
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}
