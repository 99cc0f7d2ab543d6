//! hostvars CLI
//!
//! Resolves the effective variables of inventory hosts from `group_vars/`
//! and `host_vars/` files.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::Session;
use error::Result;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }

    match run(cli) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let Some(command) = cli.command else {
        return Ok(format!(
            "{} Host vars resolver\n\nRun {} for available commands.\n",
            "hostvars".green().bold(),
            "hostvars --help".cyan()
        ));
    };

    let mut session = Session::open(&cli.inventory, cli.root.as_deref())?;
    execute_command(&mut session, command)
}

fn execute_command(session: &mut Session, cmd: Commands) -> Result<String> {
    match cmd {
        Commands::Resolve { hosts, all, format } => {
            commands::run_resolve(session, &hosts, all, format)
        }
        Commands::Each { hosts, format } => commands::run_each(session, &hosts, format),
        Commands::Chain { host } => commands::run_chain(session, &host),
        Commands::List => commands::run_list(session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cli::OutputFormat;
    use vars_test_utils::TestTree;

    const INVENTORY: &str = "all:\n  children:\n    web:\n      hosts:\n        h1:\n";

    fn open(tree: &TestTree) -> Session {
        let inventory = tree.inventory(INVENTORY);
        Session::open(&inventory.to_native(), None).unwrap()
    }

    #[test]
    fn test_resolve_requires_hosts() {
        let tree = TestTree::new();
        let mut session = open(&tree);

        let err = execute_command(
            &mut session,
            Commands::Resolve {
                hosts: vec![],
                all: false,
                format: OutputFormat::Json,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("--all"));
    }

    #[test]
    fn test_unknown_host_is_user_error() {
        let tree = TestTree::new();
        let mut session = open(&tree);

        let err = execute_command(&mut session, Commands::Chain { host: "nope".into() })
            .unwrap_err();
        assert!(matches!(err, error::CliError::User { .. }));
    }

    #[test]
    fn test_group_name_is_rejected_by_resolver() {
        let tree = TestTree::new();
        let mut session = open(&tree);

        let err = execute_command(
            &mut session,
            Commands::Resolve {
                hosts: vec!["web".into()],
                all: false,
                format: OutputFormat::Json,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            error::CliError::Core(vars_core::Error::UnsupportedTarget { .. })
        ));
    }

    #[test]
    fn test_root_defaults_to_inventory_dir() {
        let tree = TestTree::new();
        tree.group_vars("web", "port: 80\n");
        let mut session = open(&tree);

        let out = execute_command(
            &mut session,
            Commands::Resolve {
                hosts: vec!["h1".into()],
                all: false,
                format: OutputFormat::Yaml,
            },
        )
        .unwrap();
        assert_eq!(out, "port: 80\n");
    }

    #[test]
    fn test_missing_inventory_is_user_error() {
        let tree = TestTree::new();
        let result = Session::open(&tree.root().join("missing.yml"), None);
        assert!(matches!(result, Err(error::CliError::User { .. })));
    }
}
