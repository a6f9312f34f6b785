use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of resolved questions for an extraction to count as
/// successful.
pub const MIN_QUESTIONS: usize = 5;

/// Number of answer alternatives per question (A through E).
pub const CHOICE_SLOTS: usize = 5;

/// One of the five multiple-choice alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    C,
    D,
    E,
}

impl Choice {
    /// Map a zero-based slot position to its letter (0 -> A .. 4 -> E).
    pub fn from_position(pos: usize) -> Option<Choice> {
        match pos {
            0 => Some(Choice::A),
            1 => Some(Choice::B),
            2 => Some(Choice::C),
            3 => Some(Choice::D),
            4 => Some(Choice::E),
            _ => None,
        }
    }

    /// Parse a single letter, case-insensitively.
    pub fn from_char(c: char) -> Option<Choice> {
        match c.to_ascii_uppercase() {
            'A' => Some(Choice::A),
            'B' => Some(Choice::B),
            'C' => Some(Choice::C),
            'D' => Some(Choice::D),
            'E' => Some(Choice::E),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Choice::A => 'A',
            Choice::B => 'B',
            Choice::C => 'C',
            Choice::D => 'D',
            Choice::E => 'E',
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A trimmed, non-empty line of extracted text.
///
/// `index` is the line's position in the raw document, before empty lines
/// were dropped, so trace entries can point back at the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub index: usize,
    pub text: String,
}

/// Structural label assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Empty,
    VisualAnswerKey,
    AnswerKeyDocument,
    ExamWithAnswerKey,
    AnswerKeyOnly,
    StudentExamVisual,
    StudentExam,
    ExamOrTest,
    GeneralDocument,
    Error,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocumentType::Empty => "empty",
            DocumentType::VisualAnswerKey => "visual_answer_key",
            DocumentType::AnswerKeyDocument => "answer_key_document",
            DocumentType::ExamWithAnswerKey => "exam_with_answer_key",
            DocumentType::AnswerKeyOnly => "answer_key_only",
            DocumentType::StudentExamVisual => "student_exam_visual",
            DocumentType::StudentExam => "student_exam",
            DocumentType::ExamOrTest => "exam_or_test",
            DocumentType::GeneralDocument => "general_document",
            DocumentType::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// Matching line contents per signal family, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalEvidence {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answer_key_markers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visual_answer_key_markers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub student_name_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub question_numbers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answer_choices: Vec<String>,
}

/// The classifier's judgment of a document's structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureAnalysis {
    pub document_type: DocumentType,
    /// Heuristic certainty in [0, 1]; not a statistical probability.
    pub confidence: f64,
    pub has_answer_key_marker: bool,
    pub has_visual_answer_key_marker: bool,
    pub has_student_name_field: bool,
    pub has_date_field: bool,
    pub has_question_numbers: bool,
    pub has_answer_choice_markers: bool,
    pub has_multiple_choice_sequence: bool,
    pub is_sequential_numbering: bool,
    pub evidence: SignalEvidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl StructureAnalysis {
    /// Terminal classification for documents with no lines at all.
    pub fn empty() -> Self {
        Self::with_type(DocumentType::Empty, 0.0)
    }

    /// Represent a foreign fault as data instead of propagating it.
    pub fn error(detail: impl Into<String>) -> Self {
        let mut analysis = Self::with_type(DocumentType::Error, 0.0);
        analysis.error_detail = Some(detail.into());
        analysis
    }

    fn with_type(document_type: DocumentType, confidence: f64) -> Self {
        StructureAnalysis {
            document_type,
            confidence,
            has_answer_key_marker: false,
            has_visual_answer_key_marker: false,
            has_student_name_field: false,
            has_date_field: false,
            has_question_numbers: false,
            has_answer_choice_markers: false,
            has_multiple_choice_sequence: false,
            is_sequential_numbering: false,
            evidence: SignalEvidence::default(),
            error_detail: None,
        }
    }
}

/// One question resolved to its answer letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAnswer {
    pub question: u32,
    pub answer: Choice,
}

/// Outcome of an answer-key extraction.
///
/// `answers` holds unique question numbers in resolution order; `trace`
/// records one entry per decision or notable skip, in the order they were
/// taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerKeyResult {
    pub success: bool,
    pub answers: Vec<ResolvedAnswer>,
    pub questions_found: usize,
    pub trace: Vec<String>,
    /// Original line index of the answer-key anchor; `None` when not found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_line_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AnswerKeyResult {
    pub fn answer_for(&self, question: u32) -> Option<Choice> {
        self.answers
            .iter()
            .find(|a| a.question == question)
            .map(|a| a.answer)
    }
}

/// Layout family that produced a tabular answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyFormat {
    BinaryHorizontal,
    BinaryVertical,
    Traditional,
    Unknown,
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyFormat::BinaryHorizontal => "binary_horizontal",
            KeyFormat::BinaryVertical => "binary_vertical",
            KeyFormat::Traditional => "traditional",
            KeyFormat::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Answer key extracted from a spreadsheet grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridAnswerKey {
    pub has_answer_key: bool,
    pub format: KeyFormat,
    pub confidence: f64,
    pub key: AnswerKeyResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_from_position() {
        assert_eq!(Choice::from_position(0), Some(Choice::A));
        assert_eq!(Choice::from_position(4), Some(Choice::E));
        assert_eq!(Choice::from_position(5), None);
    }

    #[test]
    fn choice_from_char_case_insensitive() {
        assert_eq!(Choice::from_char('b'), Some(Choice::B));
        assert_eq!(Choice::from_char('E'), Some(Choice::E));
        assert_eq!(Choice::from_char('f'), None);
        assert_eq!(Choice::from_char('1'), None);
    }

    #[test]
    fn document_type_serializes_snake_case() {
        let json = serde_json::to_string(&DocumentType::VisualAnswerKey).unwrap();
        assert_eq!(json, "\"visual_answer_key\"");
    }

    #[test]
    fn empty_analysis_has_zero_confidence() {
        let a = StructureAnalysis::empty();
        assert_eq!(a.document_type, DocumentType::Empty);
        assert_eq!(a.confidence, 0.0);
        assert!(!a.has_answer_key_marker);
    }

    #[test]
    fn answer_for_looks_up_by_question() {
        let result = AnswerKeyResult {
            success: false,
            answers: vec![
                ResolvedAnswer {
                    question: 2,
                    answer: Choice::C,
                },
                ResolvedAnswer {
                    question: 7,
                    answer: Choice::A,
                },
            ],
            questions_found: 2,
            trace: vec![],
            anchor_line_index: Some(0),
            message: None,
        };
        assert_eq!(result.answer_for(7), Some(Choice::A));
        assert_eq!(result.answer_for(3), None);
    }
}
