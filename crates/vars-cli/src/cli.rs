//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// hostvars - Resolve the effective variables of inventory hosts
#[derive(Parser, Debug)]
#[command(name = "hostvars")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Inventory file
    #[arg(
        short,
        long,
        global = true,
        env = "HOSTVARS_INVENTORY",
        default_value = "hosts.yml"
    )]
    pub inventory: PathBuf,

    /// Directory holding group_vars/ and host_vars/ (defaults to the inventory's directory)
    #[arg(short, long, global = true, env = "HOSTVARS_ROOT")]
    pub root: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the merged variables of one or more hosts
    ///
    /// All named hosts are merged into a single mapping, later hosts taking
    /// precedence.
    ///
    /// Examples:
    ///   hostvars resolve h1            # Vars of h1
    ///   hostvars resolve h1 h2 -f yaml # Merged vars of h1 and h2 as YAML
    ///   hostvars resolve --all         # Merged vars of every host
    Resolve {
        /// Hosts to resolve
        hosts: Vec<String>,

        /// Resolve every host in the inventory
        #[arg(long, conflicts_with = "hosts")]
        all: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Resolve hosts one by one and print a mapping of host to vars
    Each {
        /// Hosts to resolve (defaults to every host)
        hosts: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show the order in which a host's scopes are merged
    Chain {
        /// Host to inspect
        host: String,
    },

    /// List groups with their depths and hosts with their groups
    List,
}

/// How resolved vars are printed
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}
