use std::path::PathBuf;

use gabarito_core::error::GabaritoError;

use crate::commands::{analyze_input, LoadedAnalysis};
use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), GabaritoError> {
    let loaded = analyze_input(&input_file)?;

    match (output_format, &loaded) {
        ("json", LoadedAnalysis::Document(a)) => output::json::print_document(a)?,
        ("json", LoadedAnalysis::Spreadsheet(a)) => output::json::print_spreadsheet(a)?,
        (_, LoadedAnalysis::Document(a)) => output::table::print_structure(&a.structure),
        (_, LoadedAnalysis::Spreadsheet(a)) => output::table::print_structure(&a.structure),
    }

    Ok(())
}
