//! Migration-Graph CLI - explore interstate migration networks.
//!
//! Reads the migration tables from the configured data directory and prints
//! the thresholded network, its display table, or per-state summaries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{config as config_cmd, network, OutputFormat};
use migration_graph_ops::{Config, OpsContext};

/// Migration-Graph CLI - build state-to-state migration networks.
///
/// Run `mg` or `mg network` to print the network for all states.
#[derive(Parser, Debug)]
#[command(
    name = "mg",
    author,
    version,
    about = "Migration-Graph: interstate migration networks from flow tables",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory holding the CSV tables (overrides config).
    #[arg(short, long, global = true, env = "MG_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Selection flags shared by `network` and `table`.
#[derive(clap::Args, Debug, Default)]
struct SelectionArgs {
    /// State to anchor on, or "All States".
    #[arg(short, long)]
    state: Option<String>,

    /// Flow direction: outgoing/incoming (aliases lending/renting).
    #[arg(long)]
    direction: Option<String>,

    /// Top N migrations kept per state (1-25).
    #[arg(short = 'n', long)]
    threshold: Option<String>,

    /// Maximum rows in the migration table.
    #[arg(short, long)]
    rows: Option<usize>,

    /// Output format: table or json.
    #[arg(short, long, default_value = "table")]
    format: String,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the migration network (default command).
    Network {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Also write the JSON response to a file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print only the migration table.
    Table {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Show the header and summary text for a state.
    Summary {
        /// State name (defaults to "All States").
        state: Option<String>,
    },

    /// List selectable states.
    States,

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity; RUST_LOG wins when set
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let data_dir = cli.data_dir;
    let command = cli.command.unwrap_or(Commands::Network {
        selection: SelectionArgs {
            format: "table".to_string(),
            ..SelectionArgs::default()
        },
        output: None,
    });

    match command {
        Commands::Network { selection, output } => {
            let ctx = load_context(runtime_config(data_dir)?)?;
            let format: OutputFormat = selection.format.parse()?;
            let request = network::build_request(
                &ctx,
                selection.state.as_deref(),
                selection.direction.as_deref(),
                selection.threshold.as_deref(),
                selection.rows,
            )?;
            network::execute(&ctx, &request, format, output)?;
        }

        Commands::Table { selection } => {
            let ctx = load_context(runtime_config(data_dir)?)?;
            let format: OutputFormat = selection.format.parse()?;
            let request = network::build_request(
                &ctx,
                selection.state.as_deref(),
                selection.direction.as_deref(),
                selection.threshold.as_deref(),
                selection.rows,
            )?;
            network::table(&ctx, &request, format)?;
        }

        Commands::Summary { state } => {
            let ctx = load_context(runtime_config(data_dir)?)?;
            network::summary(&ctx, state.as_deref());
        }

        Commands::States => {
            let ctx = load_context(runtime_config(data_dir)?)?;
            for state in ctx.states() {
                println!("{}", state);
            }
        }

        Commands::Config(config_cmd_inner) => match config_cmd_inner {
            ConfigCommands::Show => {
                config_cmd::show(&runtime_config(data_dir)?)?;
            }
            ConfigCommands::Set { key, value } => {
                let mut config = Config::load_file().context("Failed to load configuration")?;
                config_cmd::set(&mut config, &key, &value)?;
            }
            ConfigCommands::Get { key } => {
                config_cmd::get(&runtime_config(data_dir)?, &key)?;
            }
            ConfigCommands::Reset => {
                config_cmd::reset()?;
            }
            ConfigCommands::Path => {
                if let Some(path) = Config::config_file_path() {
                    println!("{}", path.display());
                } else {
                    println!("(no config file path available)");
                }
            }
        },
    }

    Ok(())
}

/// Effective configuration: the saved file, then `MG_*` env, then `--data-dir`.
fn runtime_config(data_dir: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

/// Load the dataset named by the configuration.
fn load_context(config: Config) -> Result<OpsContext> {
    let data_dir = config.data_dir.clone();
    OpsContext::load(config)
        .with_context(|| format!("Failed to load migration data from {}", data_dir.display()))
}
