//! Document-structure classification.
//!
//! Scans the line sequence for lexical signals (answer-key markers, name
//! and date fields, question numbering, answer-choice markings) and maps
//! the combination onto a document-type label with a heuristic confidence.

pub mod signals;

use crate::model::{DocumentType, Line, SignalEvidence, StructureAnalysis};

/// Classify a document's structure from its normalized lines.
///
/// Pure and total: never fails, never panics, and must never abort the
/// caller's pipeline. An empty line list is the terminal `Empty`
/// classification regardless of anything else.
pub fn classify(lines: &[Line]) -> StructureAnalysis {
    if lines.is_empty() {
        return StructureAnalysis::empty();
    }

    let mut evidence = SignalEvidence::default();

    for line in lines {
        let lower = line.text.to_lowercase();

        if signals::is_visual_answer_key_marker(&lower) {
            evidence.visual_answer_key_markers.push(line.text.clone());
        }
        if signals::is_answer_key_marker(&lower) {
            evidence.answer_key_markers.push(line.text.clone());
        }
        if signals::is_student_name_field(&lower) {
            evidence.student_name_fields.push(line.text.clone());
        }
        if signals::is_date_field(&lower) {
            evidence.date_fields.push(line.text.clone());
        }
        if signals::is_question_number(&line.text, &lower) {
            evidence.question_numbers.push(line.text.clone());
        }
        if signals::is_answer_choice(&line.text) {
            evidence.answer_choices.push(line.text.clone());
        }
    }

    // The choice-sequence signal spans line boundaries in rendered PDF
    // text, so it runs over the concatenated document.
    let full_lower = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let has_multiple_choice_sequence = signals::has_choice_sequence(&full_lower);
    let is_sequential_numbering = signals::is_sequential_numbering(lines);

    let mut analysis = StructureAnalysis {
        document_type: DocumentType::GeneralDocument,
        confidence: 0.0,
        has_answer_key_marker: !evidence.answer_key_markers.is_empty(),
        has_visual_answer_key_marker: !evidence.visual_answer_key_markers.is_empty(),
        has_student_name_field: !evidence.student_name_fields.is_empty(),
        has_date_field: !evidence.date_fields.is_empty(),
        has_question_numbers: !evidence.question_numbers.is_empty(),
        has_answer_choice_markers: !evidence.answer_choices.is_empty(),
        has_multiple_choice_sequence,
        is_sequential_numbering,
        evidence,
        error_detail: None,
    };

    let (document_type, confidence) = decide(&analysis);
    analysis.document_type = document_type;
    analysis.confidence = confidence;
    analysis
}

/// Decision table, evaluated top to bottom; first match wins.
fn decide(a: &StructureAnalysis) -> (DocumentType, f64) {
    if a.has_visual_answer_key_marker && a.is_sequential_numbering && a.has_answer_choice_markers {
        (DocumentType::VisualAnswerKey, 0.95)
    } else if a.has_visual_answer_key_marker {
        (DocumentType::AnswerKeyDocument, 0.85)
    } else if a.has_answer_key_marker && a.has_question_numbers && a.has_student_name_field {
        (DocumentType::ExamWithAnswerKey, 0.90)
    } else if a.has_answer_key_marker && a.has_question_numbers {
        (DocumentType::AnswerKeyOnly, 0.80)
    } else if a.has_student_name_field && a.has_question_numbers && a.has_multiple_choice_sequence {
        (DocumentType::StudentExamVisual, 0.85)
    } else if a.has_student_name_field && a.has_question_numbers {
        (DocumentType::StudentExam, 0.70)
    } else if a.has_question_numbers && a.has_answer_choice_markers {
        (DocumentType::ExamOrTest, 0.60)
    } else {
        (DocumentType::GeneralDocument, 0.30)
    }
}
