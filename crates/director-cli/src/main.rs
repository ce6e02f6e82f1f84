mod cmd;
mod output;
mod render;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, run::RunArgs, timeline::TimelineArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "director",
    about = "Simulated AI browser operator: watch a canned task play out step by step",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .director/ or .git/)
    #[arg(long, global = true, env = "DIRECTOR_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a task and play its action timeline
    Run(RunArgs),

    /// Print the action timeline at a given step
    Timeline(TimelineArgs),

    /// Show, validate or create the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Run(args) => cmd::run::run(&root, args, cli.json),
        Commands::Timeline(args) => cmd::timeline::run(args, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
