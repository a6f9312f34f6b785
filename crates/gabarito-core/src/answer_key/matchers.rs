//! Ordered per-line matchers for the answer-key forward walk.
//!
//! Each notation the walk understands is its own function returning a
//! structured match, so every rule is testable on its own and the
//! precedence lives in one place (`match_line`). Ambiguous lines resolve
//! deterministically because the order is fixed.

use crate::model::{Choice, CHOICE_SLOTS};
use crate::pattern;

/// Outcome of testing one line during the forward walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// A bare question number; opens (or replaces) the pending question.
    QuestionNumber(u32),
    /// An answer for the pending question.
    Answer { answer: Choice, rule: MatchRule },
    /// A well-formed binary run that marks no position; consumes the
    /// pending question without resolving it.
    UnmarkedBinary { bits: String },
    /// A named section other than the answer key has begun.
    SectionEnd,
}

/// Which notation produced an answer; used for the diagnostic trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    CompactBinary(String),
    SpacedBinary(String),
    IsolatedLetter,
    OnlyOccurrence,
    IsolatedWithinSequence,
    LetterDigitPair,
}

impl MatchRule {
    pub fn describe(&self) -> String {
        match self {
            MatchRule::CompactBinary(bits) => format!("binary pattern {bits}"),
            MatchRule::SpacedBinary(bits) => format!("spaced binary pattern {bits}"),
            MatchRule::IsolatedLetter => "isolated letter line".to_string(),
            MatchRule::OnlyOccurrence => "only choice occurrence in line".to_string(),
            MatchRule::IsolatedWithinSequence => "bare letter within full sequence".to_string(),
            MatchRule::LetterDigitPair => "letter=digit format".to_string(),
        }
    }
}

/// A line that starts the answer-key block.
pub fn is_anchor_line(lower: &str) -> bool {
    if let Some(value) = pattern::label_value(lower, "nome") {
        if value.starts_with("gabarito") {
            return true;
        }
    }
    if lower.contains("gabarito") && lower.contains("data:") {
        return true;
    }
    let t = lower.trim();
    t == "gabarito" || t.starts_with("gabarito oficial") || t.contains("folha de gabarito")
}

/// A `nome:` header introducing some named section.
fn is_section_header(lower: &str) -> bool {
    pattern::label_value(lower, "nome").is_some()
}

/// Test a line against the ordered matcher set.
///
/// `pending` is the currently open question; answer notations only apply
/// while one is open. The section-end guard runs first so a student-name
/// header never parses as an answer.
pub fn match_line(text: &str, pending: Option<u32>) -> Option<LineMatch> {
    let lower = text.to_lowercase();

    if is_section_header(&lower) && !is_anchor_line(&lower) {
        return Some(LineMatch::SectionEnd);
    }

    if let Some(n) = pattern::bare_integer(text) {
        return Some(LineMatch::QuestionNumber(n));
    }

    pending?;

    if let Some(bits) = pattern::compact_binary_run(text) {
        return Some(binary_match(bits.to_string(), MatchRule::CompactBinary));
    }

    if let Some(bits) = pattern::spaced_binary_run(text) {
        return Some(binary_match(bits, MatchRule::SpacedBinary));
    }

    if let Some(answer) = pattern::isolated_choice(text) {
        return Some(LineMatch::Answer {
            answer,
            rule: MatchRule::IsolatedLetter,
        });
    }

    if let Some(m) = mixed_content_choice(text) {
        return Some(m);
    }

    if let Some(answer) = letter_digit_pairs(text) {
        return Some(LineMatch::Answer {
            answer,
            rule: MatchRule::LetterDigitPair,
        });
    }

    None
}

fn binary_match(bits: String, rule: fn(String) -> MatchRule) -> LineMatch {
    match pattern::binary_run_to_choice(&bits) {
        Some(answer) => LineMatch::Answer {
            answer,
            rule: rule(bits),
        },
        None => LineMatch::UnmarkedBinary { bits },
    }
}

#[derive(Debug, Clone, Copy)]
struct Occurrence {
    choice: Choice,
    /// Bare letter token, as opposed to a `(x)` / `[x]` / `x)` marker.
    bare: bool,
}

/// Choice-letter occurrences amid other content.
///
/// Exactly one occurrence is taken as the answer. Exactly five covering
/// the full A..E sequence take the unique bare letter as the marked one
/// (a bubbled sheet renders the filled choice without its surrounding
/// marks). Anything else is no match.
fn mixed_content_choice(text: &str) -> Option<LineMatch> {
    let occurrences: Vec<Occurrence> = text.split_whitespace().filter_map(token_occurrence).collect();

    if occurrences.len() == 1 {
        return Some(LineMatch::Answer {
            answer: occurrences[0].choice,
            rule: MatchRule::OnlyOccurrence,
        });
    }

    if occurrences.len() == CHOICE_SLOTS {
        let mut seen = [false; CHOICE_SLOTS];
        for occ in &occurrences {
            seen[occ.choice as usize] = true;
        }
        let full_sequence = seen.iter().all(|s| *s);
        let bare: Vec<&Occurrence> = occurrences.iter().filter(|o| o.bare).collect();
        if full_sequence && bare.len() == 1 {
            return Some(LineMatch::Answer {
                answer: bare[0].choice,
                rule: MatchRule::IsolatedWithinSequence,
            });
        }
    }

    None
}

fn token_occurrence(token: &str) -> Option<Occurrence> {
    let chars: Vec<char> = token.chars().collect();
    match chars.as_slice() {
        [c] => Choice::from_char(*c).map(|choice| Occurrence { choice, bare: true }),
        ['(', c, ')'] | ['[', c, ']'] => Choice::from_char(*c).map(|choice| Occurrence {
            choice,
            bare: false,
        }),
        [c, ')' | '.' | ']'] => Choice::from_char(*c).map(|choice| Occurrence {
            choice,
            bare: false,
        }),
        _ => None,
    }
}

/// `A=1 B=0 ...` pairs; the first letter paired with `1` wins.
fn letter_digit_pairs(text: &str) -> Option<Choice> {
    for token in text.split_whitespace() {
        let chars: Vec<char> = token.chars().collect();
        if let [letter, '=', digit] = chars.as_slice() {
            if let Some(choice) = Choice::from_char(*letter) {
                if *digit == '1' {
                    return Some(choice);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PENDING: Option<u32> = Some(1);

    #[test]
    fn anchor_line_forms() {
        assert!(is_anchor_line("nome: gabarito"));
        assert!(is_anchor_line("nome: gabarito data: 29/08/2025"));
        assert!(is_anchor_line("gabarito data: 29/08/2025"));
        assert!(is_anchor_line("gabarito"));
        assert!(is_anchor_line("gabarito oficial"));
        assert!(is_anchor_line("folha de gabarito"));
        assert!(!is_anchor_line("nome: joão da silva"));
        assert!(!is_anchor_line("resposta"));
    }

    #[test]
    fn section_header_ends_walk() {
        assert_eq!(
            match_line("NOME: João da Silva", PENDING),
            Some(LineMatch::SectionEnd)
        );
        // the anchor itself is not a section end
        assert_ne!(
            match_line("NOME: GABARITO", PENDING),
            Some(LineMatch::SectionEnd)
        );
    }

    #[test]
    fn bare_integer_opens_question() {
        assert_eq!(match_line("12", None), Some(LineMatch::QuestionNumber(12)));
        assert_eq!(match_line(" 3 ", PENDING), Some(LineMatch::QuestionNumber(3)));
    }

    #[test]
    fn answer_rules_require_pending_question() {
        assert_eq!(match_line("A", None), None);
        assert_eq!(match_line("01000", None), None);
        assert_eq!(match_line("A=1 B=0", None), None);
    }

    #[test]
    fn compact_binary_run_maps_position() {
        assert_eq!(
            match_line("01000", PENDING),
            Some(LineMatch::Answer {
                answer: Choice::B,
                rule: MatchRule::CompactBinary("01000".into()),
            })
        );
    }

    #[test]
    fn unmarked_binary_consumes_without_answer() {
        assert_eq!(
            match_line("00000", PENDING),
            Some(LineMatch::UnmarkedBinary {
                bits: "00000".into()
            })
        );
    }

    #[test]
    fn spaced_binary_run_maps_position() {
        assert_eq!(
            match_line("1 0 0 0 0", PENDING),
            Some(LineMatch::Answer {
                answer: Choice::A,
                rule: MatchRule::SpacedBinary("10000".into()),
            })
        );
    }

    #[test]
    fn isolated_letter_is_direct_answer() {
        assert_eq!(
            match_line(" C ", PENDING),
            Some(LineMatch::Answer {
                answer: Choice::C,
                rule: MatchRule::IsolatedLetter,
            })
        );
    }

    #[test]
    fn single_occurrence_amid_content() {
        assert_eq!(
            match_line("resposta correta: B", PENDING),
            Some(LineMatch::Answer {
                answer: Choice::B,
                rule: MatchRule::OnlyOccurrence,
            })
        );
    }

    #[test]
    fn bare_letter_within_full_sequence() {
        assert_eq!(
            match_line("(A) (B) C (D) (E)", PENDING),
            Some(LineMatch::Answer {
                answer: Choice::C,
                rule: MatchRule::IsolatedWithinSequence,
            })
        );
    }

    #[test]
    fn option_list_is_not_an_answer() {
        // five marked choices, none bare: a question's option list
        assert_eq!(match_line("a) b) c) d) e)", PENDING), None);
        // all five bare: nothing discriminates
        assert_eq!(match_line("A B C D E", PENDING), None);
    }

    #[test]
    fn partial_occurrences_do_not_match() {
        assert_eq!(match_line("entre A e B", PENDING), None);
    }

    #[test]
    fn letter_digit_pairs_pick_marked_letter() {
        assert_eq!(
            match_line("A=0 B=1 C=0 D=0 E=0", PENDING),
            Some(LineMatch::Answer {
                answer: Choice::B,
                rule: MatchRule::LetterDigitPair,
            })
        );
        // malformed double marking: first wins
        assert_eq!(
            match_line("A=1 B=1 C=0 D=0 E=0", PENDING),
            Some(LineMatch::Answer {
                answer: Choice::A,
                rule: MatchRule::LetterDigitPair,
            })
        );
        assert_eq!(match_line("A=0 B=0 C=0 D=0 E=0", PENDING), None);
    }

    #[test]
    fn plain_text_does_not_match() {
        assert_eq!(match_line("texto sem estrutura", PENDING), None);
    }
}
