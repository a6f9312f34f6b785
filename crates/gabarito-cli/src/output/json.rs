use gabarito_core::error::GabaritoError;
use gabarito_core::model::{AnswerKeyResult, GridAnswerKey};
use gabarito_core::{DocumentAnalysis, SpreadsheetAnalysis};

pub fn print_document(analysis: &DocumentAnalysis) -> Result<(), GabaritoError> {
    let json = serde_json::to_string_pretty(analysis)?;
    println!("{json}");
    Ok(())
}

pub fn print_spreadsheet(analysis: &SpreadsheetAnalysis) -> Result<(), GabaritoError> {
    let json = serde_json::to_string_pretty(analysis)?;
    println!("{json}");
    Ok(())
}

pub fn print_answer_key(key: &AnswerKeyResult) -> Result<(), GabaritoError> {
    let json = serde_json::to_string_pretty(key)?;
    println!("{json}");
    Ok(())
}

pub fn print_grid_key(key: &GridAnswerKey) -> Result<(), GabaritoError> {
    let json = serde_json::to_string_pretty(key)?;
    println!("{json}");
    Ok(())
}
