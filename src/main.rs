//! QuantumLeap CLI entry point
//!
//! - `quantumleap routes` - list the route table
//! - `quantumleap resolve <path>...` - resolve paths
//! - `quantumleap chat` - chat with the QuantumAI widget
//! - `quantumleap config` - show or validate configuration

use anyhow::Context;
use quantumleap::cli::commands::{self, ChatSummary};
use quantumleap::cli::output::Output;
use quantumleap::cli::{Cli, Commands};
use quantumleap::utils::toml_config::{ChatStrategy, LogFormat, SiteConfig};
use quantumleap::RouteTable;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, &output).await {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<()> {
    // Load .env so the remote credential can live outside the shell profile
    dotenvy::dotenv().ok();

    let mut config = SiteConfig::read_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    if let Some(format) = cli.log_format {
        config.logging.format = format.into();
    }

    init_tracing(&config, cli.verbose);
    tracing::debug!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Routes => {
            commands::list_routes(&RouteTable::site(), output);
        }
        Commands::Resolve { paths } => {
            commands::resolve_paths(&RouteTable::site(), &paths, output);
        }
        Commands::Config { validate } => {
            commands::show_config(&config, validate, output)?;
        }
        Commands::Chat { page, remote } => {
            if remote {
                config.chat.strategy = ChatStrategy::Remote;
            }
            config.validate()?;

            output.banner();
            output.hint("Type a message, `/go <path>` to navigate, `quit` to exit");

            let stdin = BufReader::new(tokio::io::stdin());
            let summary = commands::run_chat(&config, &page, stdin, output).await?;
            print_summary(&summary, output);
        }
    }

    Ok(())
}

fn init_tracing(config: &SiteConfig, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quantumleap={}", default_level)));

    // Logs go to stderr so they never interleave with the transcript
    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn print_summary(summary: &ChatSummary, output: &Output) {
    output.header("Session");
    output.kv("messages sent", &summary.messages_sent.to_string());
    output.kv("replies received", &summary.replies_received.to_string());
    output.kv("final page", &summary.final_location);
}
