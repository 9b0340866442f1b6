//! CLI module for QuantumLeap
//!
//! Provides command-line interface parsing and handling for the quantumleap binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod commands;
pub mod output;

use crate::utils::toml_config::LogFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// QuantumLeap - site router and QuantumAI chat widget
///
/// Hosts the site's route table and chat widget in the terminal.
#[derive(Parser, Debug)]
#[command(
    name = "quantumleap",
    author = "QuantumLeap <web@quantumleap.dev>",
    version,
    about = "QuantumLeap - site router and QuantumAI chat widget",
    long_about = "Terminal host for the QuantumLeap site core: inspect and resolve routes,\n\
                  or chat with the QuantumAI widget mounted on a page.\n\n\
                  Configuration is read from quantumleap.toml when present; the remote\n\
                  chat strategy reads its credential from the environment.",
    after_help = "EXAMPLES:\n    \
                  quantumleap routes                  # List registered routes\n    \
                  quantumleap resolve /about /nope    # Resolve paths\n    \
                  quantumleap chat                    # Chat on the home page\n    \
                  quantumleap chat --remote           # Use the chat-completion endpoint\n    \
                  quantumleap config --validate       # Check quantumleap.toml"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "quantumleap.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log output format (overrides the configuration file)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Log formats selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered routes in registration order
    Routes,

    /// Resolve one or more paths against the route table
    Resolve {
        /// Paths to resolve, matched verbatim
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Chat with the QuantumAI widget
    ///
    /// Type a message to submit it. `/go <path>` navigates, `/back` goes
    /// back, `/where` shows the current page, `quit` exits.
    Chat {
        /// Page to start on
        #[arg(short, long, default_value = "/")]
        page: String,

        /// Use the remote chat-completion strategy regardless of configuration
        #[arg(long)]
        remote: bool,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration file
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
