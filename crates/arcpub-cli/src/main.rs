mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::repo::RepoSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "arcpub",
    about = "Provision GitLab repositories and publish ARCs built from a JSON dataset",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(
        long,
        global = true,
        env = "ARCPUB_CONFIG",
        default_value = arcpub_core::config::DEFAULT_CONFIG_FILE
    )]
    config: PathBuf,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: create, clone, materialize, commit, push
    Run {
        /// Publish only the first N dataset items (overrides config)
        #[arg(long)]
        take: Option<usize>,

        /// Directory to place local clones in
        #[arg(long, default_value = ".")]
        workdir: PathBuf,
    },

    /// Materialize one ARC locally, without any network or git activity
    Materialize {
        /// Display name of the package (sanitized like a dataset entry)
        name: String,

        /// Output directory for the ARC tree
        #[arg(long)]
        out: PathBuf,
    },

    /// Inspect or remove remote repositories
    Repo {
        #[command(subcommand)]
        subcommand: RepoSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Run { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run { take, workdir } => cmd::run::run(&cli.config, take, &workdir, cli.json),
        Commands::Materialize { name, out } => cmd::materialize::run(&name, &out, cli.json),
        Commands::Repo { subcommand } => cmd::repo::run(&cli.config, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
