//! Per-submission scoring: maps a canonical answer map onto section and
//! overall percentages plus a coarse performance band. Scoring is a pure
//! read over the definition and the answers; results are derived fresh on
//! every call and never persisted.

mod rules;

pub use rules::{is_scoreable, question_score};

use super::answers::AnswerMap;
use super::registry::{SurveyDefinition, SurveyFamily};
use serde::Serialize;

/// Coarse classification of an overall percentage. Lower bounds are
/// inclusive on every band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PerformanceBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PerformanceBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Self::Excellent
        } else if percentage >= 60.0 {
            Self::Good
        } else if percentage >= 40.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn ordered() -> [PerformanceBand; 4] {
        [Self::Excellent, Self::Good, Self::Fair, Self::Poor]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

/// Pooled score contributions of one section of one submission.
#[derive(Debug, Clone)]
pub struct SectionTally {
    pub title: &'static str,
    pub sum: f64,
    pub count: usize,
}

/// Raw scoring outcome for a single submission, before averaging.
#[derive(Debug, Clone)]
pub struct SubmissionTally {
    pub stored_overall: Option<f64>,
    pub answered_sum: f64,
    pub answered_count: usize,
    pub sections: Vec<SectionTally>,
}

impl SubmissionTally {
    /// Overall percentage for this submission.
    ///
    /// A percentage persisted at submit time wins over recomputation so
    /// later schema edits cannot shift historical results. Without one,
    /// the percentage is computed over the answered scoreable questions;
    /// a submission with none contributes no overall score at all.
    pub fn overall_percentage(&self) -> Option<f64> {
        if let Some(stored) = self.stored_overall {
            return Some(stored);
        }
        if self.answered_count == 0 {
            return None;
        }
        Some(section_percentage(self.answered_sum, self.answered_count))
    }
}

/// Percentage average for `count` scored five-point answers summing to `sum`.
pub fn section_percentage(sum: f64, count: usize) -> f64 {
    (sum / (count as f64 * 5.0)) * 100.0
}

/// Parse a previously stored overall percentage for the survey's family,
/// when present and finite.
pub fn stored_overall(family: SurveyFamily, answers: &AnswerMap) -> Option<f64> {
    let raw = answers.get(family.storage_key())?.as_text()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Walk every section of the definition and pool the scoreable answers.
pub fn tally_submission(survey: &SurveyDefinition, answers: &AnswerMap) -> SubmissionTally {
    let family = SurveyFamily::detect(survey);
    let mut sections = Vec::with_capacity(survey.sections.len());
    let mut answered_sum = 0.0;
    let mut answered_count = 0;

    for section in &survey.sections {
        let mut tally = SectionTally {
            title: section.title,
            sum: 0.0,
            count: 0,
        };
        for question in &section.questions {
            if !is_scoreable(question) {
                continue;
            }
            let Some(score) = question_score(question, answers.get(question.key)) else {
                continue;
            };
            tally.sum += score;
            tally.count += 1;
            answered_sum += score;
            answered_count += 1;
        }
        sections.push(tally);
    }

    SubmissionTally {
        stored_overall: stored_overall(family, answers),
        answered_sum,
        answered_count,
        sections,
    }
}

/// Per-section average for display, with the response count that backs it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionAverage {
    pub section_title: String,
    pub percentage: f64,
    pub responses: usize,
}

/// Derived score of a single submission.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub overall_percentage: Option<f64>,
    pub performance_band: Option<PerformanceBand>,
    pub section_averages: Vec<SectionAverage>,
}

/// Score one submission against its survey definition.
pub fn score_submission(survey: &SurveyDefinition, answers: &AnswerMap) -> ScoreResult {
    let tally = tally_submission(survey, answers);
    let overall_percentage = tally.overall_percentage();

    let section_averages = tally
        .sections
        .iter()
        .filter(|section| section.count > 0)
        .map(|section| SectionAverage {
            section_title: section.title.to_string(),
            percentage: section_percentage(section.sum, section.count),
            responses: section.count,
        })
        .collect();

    ScoreResult {
        overall_percentage,
        performance_band: overall_percentage.map(PerformanceBand::from_percentage),
        section_averages,
    }
}

/// Submit-time overall percentage: earned points over the survey's *total*
/// scoreable questions, answered or not. This is what historical clients
/// computed and persisted, so the same formula is used when stamping new
/// submissions.
pub fn submission_percentage(survey: &SurveyDefinition, answers: &AnswerMap) -> f64 {
    let mut earned = 0.0;
    let mut total_questions = 0usize;

    for question in survey.questions() {
        if !is_scoreable(question) {
            continue;
        }
        total_questions += 1;
        if let Some(score) = question_score(question, answers.get(question.key)) {
            earned += score;
        }
    }

    let max_points = total_questions as f64 * 5.0;
    if max_points > 0.0 {
        (earned / max_points) * 100.0
    } else {
        0.0
    }
}
