use gabarito_core::model::{AnswerKeyResult, GridAnswerKey, StructureAnalysis};

pub fn print_structure(structure: &StructureAnalysis) {
    println!(
        "Document type: {} (confidence {:.2})",
        structure.document_type, structure.confidence
    );
    if let Some(detail) = &structure.error_detail {
        println!("  {detail}");
        return;
    }
    println!();
    println!("Signals:");
    signal_row(
        "answer-key marker",
        structure.has_answer_key_marker,
        structure.evidence.answer_key_markers.first(),
    );
    signal_row(
        "visual answer-key marker",
        structure.has_visual_answer_key_marker,
        structure.evidence.visual_answer_key_markers.first(),
    );
    signal_row(
        "student name field",
        structure.has_student_name_field,
        structure.evidence.student_name_fields.first(),
    );
    signal_row(
        "date field",
        structure.has_date_field,
        structure.evidence.date_fields.first(),
    );
    signal_row(
        "question numbers",
        structure.has_question_numbers,
        structure.evidence.question_numbers.first(),
    );
    signal_row(
        "answer-choice markers",
        structure.has_answer_choice_markers,
        structure.evidence.answer_choices.first(),
    );
    signal_row(
        "multiple-choice sequence",
        structure.has_multiple_choice_sequence,
        None,
    );
    signal_row(
        "sequential numbering",
        structure.is_sequential_numbering,
        None,
    );
}

fn signal_row(name: &str, present: bool, first_evidence: Option<&String>) {
    let mark = if present { 'x' } else { ' ' };
    match first_evidence {
        Some(line) if present => println!("  [{mark}] {name:<26} e.g. '{line}'"),
        _ => println!("  [{mark}] {name}"),
    }
}

pub fn print_answer_key(key: &AnswerKeyResult, verbose: bool) {
    if key.answers.is_empty() {
        println!("No answers extracted.");
    } else {
        println!("Questions found: {}", key.questions_found);
        for a in &key.answers {
            println!("  {:>3} -> {}", a.question, a.answer);
        }
    }

    if let Some(message) = &key.message {
        println!();
        println!("Note: {message}");
    }

    if verbose && !key.trace.is_empty() {
        println!();
        println!("Trace:");
        for entry in &key.trace {
            println!("  {entry}");
        }
    }
}

pub fn print_grid_key(key: &GridAnswerKey, verbose: bool) {
    if !key.has_answer_key {
        println!("No answer key detected in spreadsheet.");
        if verbose {
            for entry in &key.key.trace {
                println!("  {entry}");
            }
        }
        return;
    }

    println!(
        "Key format: {} (confidence {:.2})",
        key.format, key.confidence
    );
    print_answer_key(&key.key, verbose);
}
