use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hanoi_core::config::StateBackend;

mod commands;
mod context;

use context::Context;

#[derive(Parser)]
#[command(
    name = "hanoi",
    about = "Towers of Hanoi backup rotation — prints the next pool and tape",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Path to hanoi.toml (default: ./hanoi.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// State location: redb file, or directory for the json backend
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,
    /// Snapshot name inside the state store
    #[arg(short, long, global = true)]
    pub name: Option<String>,
    /// State backend: redb or json
    #[arg(short, long, global = true)]
    pub backend: Option<StateBackend>,
}

#[derive(Subcommand)]
enum Commands {
    /// Advance the rotation by one backup and print `{pool}-{tape}` (default)
    Next,
    /// Start a fresh rotation, discarding nothing unless --force is given
    Init {
        /// Number of pools (retention tiers)
        #[arg(short, long)]
        pools: Option<usize>,
        /// Tapes per pool
        #[arg(short, long)]
        tapes: Option<usize>,
        /// Overwrite an existing rotation
        #[arg(short, long)]
        force: bool,
    },
    /// Print the stored rotation state without advancing it
    Show {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Print upcoming assignments without saving
    Preview {
        #[arg(short = 'k', long, default_value_t = 10)]
        count: usize,
    },
    /// Simulate daily backups and report how far back retention reaches
    Simulate {
        #[arg(short, long, default_value_t = 365 * 50)]
        days: u64,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hanoi=info".parse()?)
        )
        .init();

    let cli = Cli::parse();
    let config = context::effective_config(&cli.global)?;

    match cli.command.unwrap_or(Commands::Next) {
        Commands::Next => commands::next::run(&Context::open(config)?),
        Commands::Init { pools, tapes, force } => {
            commands::init::run(&Context::open(config)?, pools, tapes, force)
        }
        Commands::Show { format } => commands::show::run(&Context::open(config)?, &format),
        Commands::Preview { count } => commands::preview::run(&Context::open(config)?, count),
        // Neither needs the state store.
        Commands::Simulate { days, format } => {
            commands::simulate::run(&config, days, &format)
        }
        Commands::Config => commands::config::run(&config),
    }
}
