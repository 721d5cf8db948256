use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod commands;
mod logging;

#[derive(Debug, Parser)]
#[command(name = "phase-actions")]
#[command(about = "Phase Actions - start/success/error action types and messages")]
#[command(version)]
struct Cli {
    /// Configuration file path, used only if it exists
    #[arg(short, long, global = true, default_value = "phase-actions.yaml")]
    config: PathBuf,

    #[command(flatten)]
    phases: commands::PhaseArgs,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the base and phase action types for a name
    Types {
        /// Base action name
        base: String,

        /// Output format (table or json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Build a message and print it as JSON
    Emit {
        /// Base action name
        base: String,

        /// Call arguments, each a JSON value
        args: Vec<String>,

        /// Phase key to emit (base action when omitted)
        #[arg(short, long)]
        phase: Option<String>,

        /// Emit an error message with this text (takes no arguments)
        #[arg(short, long, conflicts_with = "args")]
        error: Option<String>,
    },

    /// Validate configuration file
    Validate,

    /// Check whether a JSON document is a standard message
    Check {
        /// JSON text, or "-" to read stdin
        input: String,
    },

    /// Print the JSON schema of a message
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Types { base, format } => {
            let config = setup(&cli.config, &cli.phases, cli.verbose)?;
            commands::types::run(&config, &base, &format)
        }
        Commands::Emit {
            base,
            args,
            phase,
            error,
        } => {
            let config = setup(&cli.config, &cli.phases, cli.verbose)?;
            commands::emit::run(&config, &base, &args, phase.as_deref(), error.as_deref())
        }
        Commands::Validate => {
            logging::init(cli.verbose, None);
            commands::validate::run(&cli.config)
        }
        Commands::Check { input } => {
            logging::init(cli.verbose, None);
            commands::check::run(&input)
        }
        Commands::Schema => {
            logging::init(cli.verbose, None);
            commands::schema::run()
        }
    }
}

/// Load configuration and install logging at its level
fn setup(
    config_path: &Path,
    phases: &commands::PhaseArgs,
    verbose: bool,
) -> Result<phase_actions_config::Config> {
    let config = commands::load_config(config_path, phases)?;
    logging::init(verbose, config.settings.log_level.as_deref());
    Ok(config)
}
