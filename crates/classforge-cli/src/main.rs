//! classforge CLI - Generate and compile C# data classes
//!
//! Commands:
//! - `classforge generate` - Generate C# source from a JSON sample
//! - `classforge check` - Report compiler diagnostics for a source file
//! - `classforge compile` - Compile a source file into a module
//! - `classforge inspect` - Print a module's manifest and type table

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod check;
mod compile;
mod generate;
mod inspect;
mod logging;
mod settings;

use settings::SettingsArgs;

#[derive(Parser)]
#[command(name = "classforge")]
#[command(author, version, about = "Generate C# data classes from JSON samples", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate C# source from a JSON sample
    Generate {
        /// JSON sample file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the generated source (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Report compiler diagnostics for a source file
    Check {
        /// C# source file
        #[arg(short, long)]
        source: PathBuf,

        /// Additional reference metadata files
        #[arg(short, long = "reference")]
        references: Vec<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Compile a source file into a module
    Compile {
        /// C# source file
        #[arg(short, long)]
        source: PathBuf,

        /// Output module path
        #[arg(short, long)]
        output: PathBuf,

        /// Additional reference metadata files
        #[arg(short, long = "reference")]
        references: Vec<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Print a module's manifest and type table
    Inspect {
        /// Module file
        #[arg(short, long)]
        module: PathBuf,

        /// Print the type table as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output,
            settings,
        } => {
            generate::run(&input, output.as_deref(), &settings)?;
        }
        Commands::Check {
            source,
            references,
            settings,
        } => {
            if !check::run(&source, &references, &settings)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Compile {
            source,
            output,
            references,
            settings,
        } => {
            if !compile::run(&source, &output, &references, &settings)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Inspect { module, json } => {
            inspect::run(&module, json)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
