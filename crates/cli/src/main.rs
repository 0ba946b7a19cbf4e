mod config;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Errors surfaced by the CLI.
///
/// Runner failures display the runner's own message and nothing else.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("error: could not read '{path}': {message}")]
    Read { path: String, message: String },

    #[error("error: invalid JSON in '{path}': {message}")]
    Json { path: String, message: String },

    #[error("error: could not parse '{path}': {message}")]
    Config { path: String, message: String },

    #[error("error: invalid runner config: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error(transparent)]
    Runner(#[from] thenflow_core::RunnerError),
}

/// Run then-actions against an entity.
#[derive(Parser)]
#[command(name = "thenflow", version, about = "Run then-actions against an entity")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log each dispatched action to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a then-block's actions against an entity, in order
    Run {
        /// Path to the entity JSON file (may contain `null`)
        #[arg(long)]
        entity: PathBuf,
        /// Path to the then-arguments JSON file (may contain `null`)
        #[arg(long = "then")]
        then_args: PathBuf,
        /// Path to the runner config TOML file
        #[arg(long)]
        runners: PathBuf,
        /// Path to a JSON file passed to every runner as context
        #[arg(long)]
        context: Option<PathBuf>,
    },

    /// Validate a runner config TOML file
    Check {
        /// Path to the runner config TOML file
        #[arg(long)]
        runners: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // Quiet runs install no subscriber, so stderr only ever carries errors
    // written by `report_error`.
    if !cli.quiet {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(default_level.into()),
            )
            .with_target(false)
            .with_ansi(cli.output == OutputFormat::Text)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Run {
            entity,
            then_args,
            runners,
            context,
        } => {
            run::cmd_run(run::RunOptions {
                entity: &entity,
                then_args: &then_args,
                runners: &runners,
                context: context.as_deref(),
                output: cli.output,
                quiet: cli.quiet,
            });
        }
        Commands::Check { runners } => {
            run::cmd_check(&runners, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}
