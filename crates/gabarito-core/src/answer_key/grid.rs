//! Answer-key extraction from a spreadsheet grid.
//!
//! Same rules as the line walker, operating over 2-D cells: a bare-integer
//! cell is a question number, and its answer is sought as a binary run or
//! a letter cell nearby. Horizontal runs are scanned before vertical ones
//! because printed sheets mark answers to the right of the question number
//! far more often than below it.

use crate::model::{
    AnswerKeyResult, Choice, GridAnswerKey, KeyFormat, ResolvedAnswer, CHOICE_SLOTS, MIN_QUESTIONS,
};
use crate::pattern;

/// Rows inspected for the answer-key marker before giving up.
const MARKER_SCAN_ROWS: usize = 10;

/// Column slack when searching the rows below a question number for a
/// letter cell.
const COLUMN_SLACK: usize = 2;

/// Extract the question -> answer mapping from a grid of cell strings.
///
/// Missing cells are expected as empty strings. Without an answer-key
/// marker in the leading rows no extraction is attempted.
pub fn extract_from_grid(grid: &[Vec<String>]) -> GridAnswerKey {
    let mut trace = Vec::new();

    let marker_row = match find_marker_row(grid) {
        Some(row) => row,
        None => {
            trace.push(format!(
                "no answer-key marker in the first {MARKER_SCAN_ROWS} rows"
            ));
            return GridAnswerKey {
                has_answer_key: false,
                format: KeyFormat::Unknown,
                confidence: 0.0,
                key: AnswerKeyResult {
                    success: false,
                    answers: Vec::new(),
                    questions_found: 0,
                    trace,
                    anchor_line_index: None,
                    message: Some("no answer-key marker (gabarito) found".to_string()),
                },
            };
        }
    };
    trace.push(format!("answer-key marker found in row {marker_row}"));

    let mut answers: Vec<ResolvedAnswer> = Vec::new();

    let horizontal = horizontal_binary_scan(grid, &mut answers, &mut trace);
    let vertical = if horizontal {
        false
    } else {
        vertical_binary_scan(grid, &mut answers, &mut trace)
    };
    let traditional = traditional_letter_scan(grid, &mut answers, &mut trace);

    let (format, confidence) = if horizontal {
        (KeyFormat::BinaryHorizontal, 0.9)
    } else if vertical {
        (KeyFormat::BinaryVertical, 0.85)
    } else if traditional {
        (KeyFormat::Traditional, 0.8)
    } else {
        (KeyFormat::Unknown, 0.3)
    };

    let questions_found = answers.len();
    let success = questions_found >= MIN_QUESTIONS;
    let message = if success {
        None
    } else {
        Some(format!(
            "only {questions_found} of at least {MIN_QUESTIONS} questions resolved"
        ))
    };

    GridAnswerKey {
        has_answer_key: true,
        format,
        confidence,
        key: AnswerKeyResult {
            success,
            answers,
            questions_found,
            trace,
            anchor_line_index: Some(marker_row),
            message,
        },
    }
}

/// Scan the leading rows' concatenated text for the answer-key marker.
fn find_marker_row(grid: &[Vec<String>]) -> Option<usize> {
    grid.iter().take(MARKER_SCAN_ROWS).position(|row| {
        let text = row.join(" ").to_lowercase();
        text.contains("gabarito") || contains_answer_key(&text)
    })
}

fn contains_answer_key(lower: &str) -> bool {
    match lower.find("answer") {
        Some(idx) => lower[idx..].contains("key"),
        None => false,
    }
}

/// Question number followed by five binary cells in the same row.
fn horizontal_binary_scan(
    grid: &[Vec<String>],
    answers: &mut Vec<ResolvedAnswer>,
    trace: &mut Vec<String>,
) -> bool {
    let mut found = false;

    for row in grid {
        for (col, cell) in row.iter().enumerate() {
            let question = match pattern::bare_integer(cell) {
                Some(q) => q,
                None => continue,
            };
            let bits = match row_bits(row, col + 1) {
                Some(b) => b,
                None => continue,
            };
            trace.push(format!("Q{question}: {bits} (horizontal)"));
            if let Some(answer) = pattern::binary_run_to_choice(&bits) {
                found |= record(answers, trace, question, answer, "horizontal binary");
            }
        }
    }

    found
}

/// Question number with five binary cells below it, in the same or the
/// next column.
fn vertical_binary_scan(
    grid: &[Vec<String>],
    answers: &mut Vec<ResolvedAnswer>,
    trace: &mut Vec<String>,
) -> bool {
    let mut found = false;

    for (row_idx, row) in grid.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            let question = match pattern::bare_integer(cell) {
                Some(q) => q,
                None => continue,
            };
            let bits = match column_bits(grid, row_idx, col) {
                Some(b) => b,
                None => continue,
            };
            trace.push(format!("Q{question}: {bits} (vertical)"));
            if let Some(answer) = pattern::binary_run_to_choice(&bits) {
                found |= record(answers, trace, question, answer, "vertical binary");
            }
        }
    }

    found
}

/// Question number with a plain letter cell nearby: the next five cells
/// in-row, then the next five rows within the column slack. Fills only
/// questions the binary scans left open.
fn traditional_letter_scan(
    grid: &[Vec<String>],
    answers: &mut Vec<ResolvedAnswer>,
    trace: &mut Vec<String>,
) -> bool {
    let mut found = false;

    for (row_idx, row) in grid.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            let question = match pattern::bare_integer(cell) {
                Some(q) => q,
                None => continue,
            };
            if answers.iter().any(|a| a.question == question) {
                continue;
            }
            if let Some(answer) = find_letter_near(grid, row_idx, col) {
                found |= record(answers, trace, question, answer, "letter cell");
            }
        }
    }

    found
}

fn row_bits(row: &[String], start: usize) -> Option<String> {
    let mut bits = String::with_capacity(CHOICE_SLOTS);
    for i in 0..CHOICE_SLOTS {
        match row.get(start + i).map(|s| s.trim()) {
            Some("0") => bits.push('0'),
            Some("1") => bits.push('1'),
            _ => return None,
        }
    }
    Some(bits)
}

fn column_bits(grid: &[Vec<String>], row_idx: usize, col: usize) -> Option<String> {
    let mut bits = String::with_capacity(CHOICE_SLOTS);
    for offset in 1..=CHOICE_SLOTS {
        let row = grid.get(row_idx + offset)?;
        // same column, falling back to the next one when empty
        let cell = match row.get(col).map(|s| s.trim()) {
            Some("") | None => row.get(col + 1).map(|s| s.trim()).unwrap_or(""),
            Some(v) => v,
        };
        match cell {
            "0" => bits.push('0'),
            "1" => bits.push('1'),
            _ => return None,
        }
    }
    Some(bits)
}

fn find_letter_near(grid: &[Vec<String>], row_idx: usize, col: usize) -> Option<Choice> {
    let row = &grid[row_idx];
    for i in 1..=CHOICE_SLOTS {
        if let Some(answer) = row.get(col + i).and_then(|c| pattern::isolated_choice(c)) {
            return Some(answer);
        }
    }

    for offset in 1..=CHOICE_SLOTS {
        let next = match grid.get(row_idx + offset) {
            Some(r) => r,
            None => break,
        };
        for candidate in col.saturating_sub(COLUMN_SLACK)..=col + COLUMN_SLACK {
            if let Some(answer) = next.get(candidate).and_then(|c| pattern::isolated_choice(c)) {
                return Some(answer);
            }
        }
    }

    None
}

/// Insert unless the question is already resolved; returns whether an
/// entry was added.
fn record(
    answers: &mut Vec<ResolvedAnswer>,
    trace: &mut Vec<String>,
    question: u32,
    answer: Choice,
    how: &str,
) -> bool {
    if answers.iter().any(|a| a.question == question) {
        return false;
    }
    trace.push(format!("question {question} -> {answer} ({how})"));
    answers.push(ResolvedAnswer { question, answer });
    true
}
