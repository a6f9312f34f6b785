//! Per-line signal families the classifier scans for, plus the two
//! whole-document checks (choice sequence, sequential numbering).
//!
//! All lexical probes take the pre-lowercased line to avoid re-lowercasing
//! per family; probes that care about letter positions also take the
//! original text.

use crate::model::{Choice, Line, CHOICE_SLOTS};
use crate::pattern;

/// The printed answer-sheet heading: a `nome:` field whose value is the
/// answer-key label itself (possibly followed by a `data:` field).
pub fn is_visual_answer_key_marker(lower: &str) -> bool {
    pattern::label_value(lower, "nome")
        .map(|v| v.starts_with("gabarito"))
        .unwrap_or(false)
}

/// Any recognized answer-key marker form.
pub fn is_answer_key_marker(lower: &str) -> bool {
    is_visual_answer_key_marker(lower)
        || lower.contains("gabarito oficial")
        || lower.contains("folha de gabarito")
        || lower.trim_start().starts_with("gabarito")
}

/// A `nome:` / `aluno:` / `estudante:` field whose value reads like a
/// person's name (letters and spaces only).
pub fn is_student_name_field(lower: &str) -> bool {
    const LABELS: [&str; 3] = ["nome", "aluno", "estudante"];
    LABELS.iter().any(|label| {
        pattern::label_value(lower, label)
            .map(|v| v.chars().all(|c| c.is_alphabetic() || c == ' '))
            .unwrap_or(false)
    })
}

pub fn is_date_field(lower: &str) -> bool {
    pattern::label_value(lower, "data").is_some()
}

/// A question heading: `1.` / `12)` prefixes, `questão N` / `pergunta N`,
/// or a line that is nothing but a number (the common answer-key layout).
pub fn is_question_number(text: &str, lower: &str) -> bool {
    if pattern::bare_integer(text).is_some() {
        return true;
    }
    if has_numbered_prefix(text) {
        return true;
    }
    word_followed_by_number(lower, "questão")
        || word_followed_by_number(lower, "questao")
        || word_followed_by_number(lower, "pergunta")
}

/// An answer-choice marking: `a)` / `b.` / `c]` prefixes, parenthesized or
/// bracketed letters, or a short row of bare letter tokens.
pub fn is_answer_choice(text: &str) -> bool {
    let trimmed = text.trim_start();
    let mut chars = trimmed.chars();
    if let (Some(first), Some(second)) = (chars.next(), chars.next()) {
        if Choice::from_char(first).is_some() && matches!(second, ')' | '.' | ']') {
            return true;
        }
    }

    if has_marked_choice(text) {
        return true;
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    !tokens.is_empty()
        && tokens.len() <= CHOICE_SLOTS
        && tokens.iter().all(|t| pattern::isolated_choice(t).is_some())
}

/// `(a)`-or-`[a]`-style marker anywhere in the line.
fn has_marked_choice(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(3).any(|w| {
        let letter = Choice::from_char(w[1]).is_some();
        letter && ((w[0] == '(' && w[2] == ')') || (w[0] == '[' && w[2] == ']'))
    })
}

/// Leading digits immediately followed by `.` or `)`.
fn has_numbered_prefix(text: &str) -> bool {
    let trimmed = text.trim_start();
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    matches!(trimmed.chars().nth(digits), Some('.') | Some(')'))
}

fn word_followed_by_number(lower: &str, word: &str) -> bool {
    match lower.find(word) {
        Some(idx) => lower[idx + word.len()..]
            .trim_start()
            .starts_with(|c: char| c.is_ascii_digit()),
        None => false,
    }
}

/// Five consecutive whitespace-separated letter tokens, all distinct and
/// all in A..E, anywhere in the concatenated document text. Rendered PDF
/// answer sheets spill this sequence across line boundaries, so it is
/// checked against the full text rather than per line.
pub fn has_choice_sequence(full_lower: &str) -> bool {
    let tokens: Vec<Option<Choice>> = full_lower
        .split_whitespace()
        .map(pattern::isolated_choice)
        .collect();

    tokens.windows(CHOICE_SLOTS).any(|w| {
        let mut seen = [false; CHOICE_SLOTS];
        for t in w {
            match t {
                Some(c) => seen[*c as usize] = true,
                None => return false,
            }
        }
        seen.iter().all(|s| *s)
    })
}

/// At least five bare-integer lines whose values track their 1-based rank
/// within a small tolerance. Guards against stray numerals (years, page
/// numbers) reading as question numbering.
pub fn is_sequential_numbering(lines: &[Line]) -> bool {
    const TOLERANCE: i64 = 2;

    let values: Vec<i64> = lines
        .iter()
        .filter_map(|l| pattern::bare_integer(&l.text))
        .map(i64::from)
        .collect();

    values.len() >= 5
        && values
            .iter()
            .enumerate()
            .all(|(i, v)| (v - (i as i64 + 1)).abs() <= TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<Line> {
        texts
            .iter()
            .enumerate()
            .map(|(index, t)| Line {
                index,
                text: t.to_string(),
            })
            .collect()
    }

    #[test]
    fn visual_marker_is_nome_gabarito() {
        assert!(is_visual_answer_key_marker("nome: gabarito"));
        assert!(is_visual_answer_key_marker("nome: gabarito data: 29/08/2025"));
        assert!(!is_visual_answer_key_marker("gabarito oficial"));
        assert!(!is_visual_answer_key_marker("nome: joão"));
    }

    #[test]
    fn marker_forms() {
        assert!(is_answer_key_marker("gabarito"));
        assert!(is_answer_key_marker("gabarito oficial 2025"));
        assert!(is_answer_key_marker("folha de gabarito da prova"));
        assert!(is_answer_key_marker("nome: gabarito"));
        assert!(!is_answer_key_marker("resposta do aluno"));
    }

    #[test]
    fn student_name_wants_letters_only() {
        assert!(is_student_name_field("nome: joão da silva"));
        assert!(is_student_name_field("aluno: maria"));
        assert!(!is_student_name_field("nome: gabarito data: 29/08/2025"));
        assert!(!is_student_name_field("nome:"));
    }

    #[test]
    fn question_number_forms() {
        assert!(is_question_number("1. Qual é", "1. qual é"));
        assert!(is_question_number("12) alternativa", "12) alternativa"));
        assert!(is_question_number("7", "7"));
        assert!(is_question_number("Questão 3", "questão 3"));
        assert!(is_question_number("Pergunta 10:", "pergunta 10:"));
        assert!(!is_question_number("sem numero", "sem numero"));
        assert!(!is_question_number("1x", "1x"));
    }

    #[test]
    fn answer_choice_forms() {
        assert!(is_answer_choice("a) primeira"));
        assert!(is_answer_choice("B. segunda"));
        assert!(is_answer_choice("marque (C) aqui"));
        assert!(is_answer_choice("[d]"));
        assert!(is_answer_choice("A B C D E"));
        assert!(is_answer_choice("A"));
        assert!(!is_answer_choice("apenas texto"));
        assert!(!is_answer_choice("A B C D E F"));
    }

    #[test]
    fn choice_sequence_needs_five_distinct() {
        assert!(has_choice_sequence("prova a b c d e fim"));
        assert!(has_choice_sequence("x a b c e d"));
        assert!(!has_choice_sequence("a b c d d"));
        assert!(!has_choice_sequence("a b c d"));
        assert!(!has_choice_sequence("a b c d f"));
    }

    #[test]
    fn sequential_numbering_tolerates_noise() {
        assert!(is_sequential_numbering(&lines(&["1", "2", "3", "4", "5"])));
        // off-by-few from extraction noise
        assert!(is_sequential_numbering(&lines(&["1", "2", "4", "5", "6"])));
        assert!(!is_sequential_numbering(&lines(&["1", "2", "3", "4"])));
        assert!(!is_sequential_numbering(&lines(&["1", "2", "3", "4", "2025"])));
    }

    #[test]
    fn sequential_numbering_ignores_non_numeric_lines() {
        assert!(is_sequential_numbering(&lines(&[
            "NOME: GABARITO",
            "1",
            "A",
            "2",
            "B",
            "3",
            "C",
            "4",
            "D",
            "5",
            "E"
        ])));
    }
}
