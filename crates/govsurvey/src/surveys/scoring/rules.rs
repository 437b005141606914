use super::super::answers::AnswerValue;
use super::super::registry::{Question, QuestionType};

/// Fixed five-level agreement scale. Matching is trimmed and
/// case-insensitive because stored labels drifted in casing over time.
const LIKERT_SCORES: [(&str, f64); 5] = [
    ("strongly agree", 5.0),
    ("agree", 4.0),
    ("neutral", 3.0),
    ("disagree", 2.0),
    ("strongly disagree", 1.0),
];

fn has_legacy_five_point_options(question: &Question) -> bool {
    question.options.len() == 5 && question.options == ["1", "2", "3", "4", "5"]
}

/// A question contributes to scoring iff it is one of the two five-point
/// kinds, or a legacy question whose option list is exactly 1-5.
pub fn is_scoreable(question: &Question) -> bool {
    matches!(
        question.question_type,
        QuestionType::LikertAgree | QuestionType::Rating5
    ) || has_legacy_five_point_options(question)
}

fn numeric_score(raw: &str) -> Option<f64> {
    let parsed: f64 = raw.trim().parse().ok()?;
    (1.0..=5.0).contains(&parsed).then_some(parsed)
}

fn likert_score(raw: &str) -> Option<f64> {
    let wanted = raw.trim().to_ascii_lowercase();
    LIKERT_SCORES
        .iter()
        .find(|(label, _)| *label == wanted)
        .map(|(_, score)| *score)
}

/// Score a single answered question onto the 1-5 scale.
///
/// Out-of-range ratings, unknown agreement labels, multi-select values,
/// and unanswered questions all yield `None` and are excluded from every
/// denominator.
pub fn question_score(question: &Question, answer: Option<&AnswerValue>) -> Option<f64> {
    let raw = answer?.as_text()?;
    match question.question_type {
        QuestionType::Rating5 => numeric_score(raw),
        QuestionType::LikertAgree => likert_score(raw),
        _ if has_legacy_five_point_options(question) => numeric_score(raw),
        _ => None,
    }
}
