use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigOverrides};
use crate::interpreter::{Interpreter, ProgramGrid};

#[derive(Parser)]
#[command(name = "snusp")]
#[command(about = "SNUSP - a concurrent interpreter for the two-dimensional esolang", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a program, reading stdin and writing stdout
    Run {
        /// Program source file
        file: PathBuf,

        #[command(flatten)]
        modes: ModeArgs,

        /// Print the JSON run report on stderr when the program ends
        #[arg(long)]
        report: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        modes: ModeArgs,
    },
}

/// Mode flags; each accepts an optional `=true` / `=false`
#[derive(Args, Debug, Clone, Default)]
pub struct ModeArgs {
    /// Enable subroutines (`@` and `#`)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub modular: Option<bool>,

    /// Enable vertical memory, threads and randomness (`:` `;` `&` `%`)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub bloated: Option<bool>,

    /// Take the extra call/return step on `#` instead of `@`
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub twist: Option<bool>,

    /// Store 0 on end of input instead of ending the thread
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub eof_zero: Option<bool>,

    /// Trace every step and dump memory at the end
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub debug: Option<bool>,

    /// Seed for `%`
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<ModeArgs> for ConfigOverrides {
    fn from(args: ModeArgs) -> Self {
        Self {
            modular: args.modular,
            bloated: args.bloated,
            twist: args.twist,
            eof_zero: args.eof_zero,
            debug: args.debug,
            seed: args.seed,
        }
    }
}

/// Run the CLI by parsing process arguments
pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli).await
}

/// Run the CLI with provided arguments
pub async fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli).await
}

/// Internal function that handles CLI commands
async fn run_cli_with_args(cli: Cli) -> Result<()> {
    dotenvy::dotenv().ok();

    let config_path = cli.config.map(PathBuf::from);

    match cli.command {
        Commands::Run {
            file,
            modes,
            report,
        } => {
            let config = Config::builder()
                .config_path(config_path)
                .overrides(modes.into())
                .build()
                .context("Failed to load configuration")?;

            init_logging(config.debug);

            let grid = ProgramGrid::load(&file)?;
            let interpreter = Interpreter::new(grid, config.modes()).with_seed(config.seed);

            let run_report = interpreter
                .run(std::io::stdin(), std::io::stdout())
                .await
                .context("Program run failed")?;

            if report {
                eprintln!("{}", serde_json::to_string_pretty(&run_report)?);
            }
        }

        Commands::Config { modes } => {
            let config = Config::builder()
                .config_path(config_path)
                .overrides(modes.into())
                .build()
                .context("Failed to load configuration")?;

            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

/// Log to stderr so program output on stdout stays byte-exact
///
/// `RUST_LOG` picks the filter, defaulting to `warn`; debug mode forces
/// tracing of the interpreter.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("snusp_core=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
