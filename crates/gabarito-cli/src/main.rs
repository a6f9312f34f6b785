mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gabarito",
    version,
    about = "Answer-key and exam-structure extraction from PDFs and spreadsheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a document's structure (answer key, student exam, ...)
    Analyze {
        /// Path to a PDF, XLSX/XLS, or plain-text file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Extract the question -> answer mapping from an answer key
    Extract {
        /// Path to a PDF, XLSX/XLS, or plain-text file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show the per-decision extraction trace
        #[arg(long)]
        verbose: bool,

        /// Write the extracted key to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze { input_file, output } => commands::analyze::run(input_file, &output),
        Commands::Extract {
            input_file,
            output,
            verbose,
            out,
        } => commands::extract::run(input_file, &output, verbose, out),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
