// Kindred CLI - headless household tree operations

mod exit_codes;
mod infer;
mod job;
mod roles;
mod tree;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};

/// Command failure carrying its shell exit code.
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Parser)]
#[command(name = "kin")]
#[command(about = "Household family tree engine (CLI mode, headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline from a job file
    #[command(after_help = "\
Examples:
  kin tree household.tree.toml
  kin tree household.tree.toml --json
  kin tree household.tree.toml --output tree.json")]
    Tree {
        /// Path to the .tree.toml job file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run only the age heuristic and emit the inferred partition plus
    /// suggested edges
    #[command(after_help = "\
Examples:
  kin infer household.tree.toml
  kin infer household.tree.toml | jq .suggested")]
    Infer {
        /// Path to the .tree.toml job file
        config: PathBuf,
    },

    /// Print a member/role table
    Roles {
        /// Path to the .tree.toml job file
        config: PathBuf,
    },

    /// Validate a job file without running
    Validate {
        /// Path to the .tree.toml job file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders its own help/usage text
            let _ = err.print();
            return ExitCode::from(if err.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS });
        }
    };

    let result = match cli.command {
        Commands::Tree { config, json, output } => tree::cmd_tree(config, json, output),
        Commands::Infer { config } => infer::cmd_infer(config),
        Commands::Roles { config } => roles::cmd_roles(config),
        Commands::Validate { config } => tree::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}
