use crate::config::Config;
use crate::export::OutputFormat;
use crate::utils::path::expand_tilde;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for surveydb
#[derive(Parser)]
#[command(
    name = "surveydb",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small survey database tool: run SQL against the embedded database and manage promoters",
    long_about = None
)]
pub struct Cli {
    /// Override the database directory (relative paths resolve against the working directory)
    #[arg(global = true, long = "db-dir")]
    pub db_dir: Option<String>,

    /// Override the configuration file path
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Increase diagnostic output on stderr (-v: info, -vv: debug)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration file in use: `--config` or the standard location.
    pub fn config_path(&self) -> PathBuf {
        match &self.config {
            Some(p) => expand_tilde(p),
            None => Config::config_file(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the database schema
    Init,

    /// Execute one SQL statement and commit (logged once the database is initialised)
    Exec {
        /// SQL statement, executed as-is
        sql: String,
    },

    /// Execute one data-changing SQL statement, commit, and print the affected rows
    Update {
        /// SQL statement, executed as-is
        sql: String,
    },

    /// Run a query and print its rows
    Query {
        /// SQL query, executed as-is
        sql: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        file: Option<String>,
    },

    /// List, add or delete promoters
    Promoters {
        /// Add a promoter with this name
        #[arg(long, conflicts_with = "del")]
        add: Option<String>,

        /// Email of the promoter being added
        #[arg(long, requires = "add")]
        email: Option<String>,

        /// Delete the promoter with this id
        #[arg(long)]
        del: Option<i64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show the start panel, optionally pressing one of its buttons
    Start {
        /// Label of the button to press (e.g. "Promoters")
        #[arg(long)]
        press: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Inspect the database
    Db {
        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
