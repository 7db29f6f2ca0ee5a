//! examkit CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod exam_file;

#[derive(Parser)]
#[command(name = "examkit", version, about = "Exam authoring and marking toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate exam definition TOML files
    Validate {
        /// Path to an exam file or directory of exam files
        #[arg(long)]
        exam: PathBuf,
    },

    /// Show an exam's pages, questions, and marking setup
    Inspect {
        /// Path to an exam file
        #[arg(long)]
        exam: PathBuf,
    },

    /// Run an attempt from an answers file and mark it
    Take {
        /// Path to an exam file
        #[arg(long)]
        exam: PathBuf,

        /// Path to an answers file
        #[arg(long)]
        answers: PathBuf,

        /// Seed for page/question order randomisation
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the result JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create a starter exam and answers file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examkit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { exam } => commands::validate::execute(exam),
        Commands::Inspect { exam } => commands::inspect::execute(exam),
        Commands::Take {
            exam,
            answers,
            seed,
            format,
            output,
        } => commands::take::execute(exam, answers, seed, format, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
