use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(
    name = "provision",
    about = "Converge a cluster node to its recipes",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build resources from the run list and converge this node.
    ///
    /// Exits non-zero when any resource failed and `fail_on_error` is set.
    Converge {
        #[command(flatten)]
        inputs: Inputs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the resources the run list would converge, without touching the host.
    Plan {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// List known recipes in default run order.
    Recipes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
struct Inputs {
    /// Node attributes file (.json, otherwise TOML)
    #[arg(short, long)]
    attributes: PathBuf,
    /// Engine configuration (provision.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,provision=debug"))?;
    if cli.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Converge { inputs, format } => {
            commands::converge::converge(&inputs.attributes, inputs.config.as_deref(), format)
        }
        Commands::Plan { inputs } => {
            commands::plan::plan(&inputs.attributes, inputs.config.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Recipes => {
            commands::plan::recipes();
            Ok(ExitCode::SUCCESS)
        }
    }
}
