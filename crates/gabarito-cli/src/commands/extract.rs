use std::path::PathBuf;

use gabarito_core::error::GabaritoError;

use crate::commands::{analyze_input, LoadedAnalysis};
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    verbose: bool,
    output_file: Option<PathBuf>,
) -> Result<(), GabaritoError> {
    let loaded = analyze_input(&input_file)?;

    if let Some(path) = output_file {
        // Always write JSON when saving to file
        let (json, questions_found) = match &loaded {
            LoadedAnalysis::Document(a) => (
                serde_json::to_string_pretty(&a.answer_key)?,
                a.answer_key.questions_found,
            ),
            LoadedAnalysis::Spreadsheet(a) => (
                serde_json::to_string_pretty(&a.answer_key)?,
                a.answer_key.key.questions_found,
            ),
        };
        std::fs::write(&path, json)?;
        eprintln!(
            "{} question(s) extracted, written to {}",
            questions_found,
            path.display()
        );
        return Ok(());
    }

    match (output_format, &loaded) {
        ("json", LoadedAnalysis::Document(a)) => output::json::print_answer_key(&a.answer_key)?,
        ("json", LoadedAnalysis::Spreadsheet(a)) => output::json::print_grid_key(&a.answer_key)?,
        (_, LoadedAnalysis::Document(a)) => output::table::print_answer_key(&a.answer_key, verbose),
        (_, LoadedAnalysis::Spreadsheet(a)) => {
            output::table::print_grid_key(&a.answer_key, verbose)
        }
    }

    Ok(())
}
