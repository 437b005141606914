//! Cross-submission aggregation for the per-survey results analysis.

use super::answers::extract_answers;
use super::registry::{SurveyDefinition, SurveyFamily};
use super::scoring::{
    section_percentage, tally_submission, PerformanceBand, SectionAverage,
};
use super::store::SubmissionRecord;
use serde::Serialize;
use std::collections::HashMap;

/// One slice of the performance-band distribution. Every band is always
/// present, zero or not, so consumers can render a stable legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCount {
    pub band: PerformanceBand,
    pub label: &'static str,
    pub count: usize,
}

/// Aggregated analysis of a survey's submissions.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyAnalysis {
    pub section_averages: Vec<SectionAverage>,
    pub distribution: Vec<BandCount>,
    pub overall_average_percentage: f64,
    pub scored_submission_count: usize,
    pub overall_label: &'static str,
}

/// Aggregate scores across a collection of submissions.
///
/// Section percentages come from totals pooled across all submissions, not
/// from averaging per-submission averages. The overall average is the mean
/// of each submission's own overall percentage, over only the submissions
/// that produced one; a submission with zero scoreable answers is excluded
/// outright rather than counted as 0%.
pub fn analyze(survey: &SurveyDefinition, submissions: &[SubmissionRecord]) -> SurveyAnalysis {
    let family = SurveyFamily::detect(survey);
    let mut pooled: HashMap<&'static str, (f64, usize)> = HashMap::new();
    let mut band_counts: HashMap<PerformanceBand, usize> = HashMap::new();
    let mut scored_submission_count = 0usize;
    let mut total_percentage = 0.0;

    for record in submissions {
        let answers = extract_answers(&record.data);
        let tally = tally_submission(survey, &answers);

        for section in &tally.sections {
            let entry = pooled.entry(section.title).or_insert((0.0, 0));
            entry.0 += section.sum;
            entry.1 += section.count;
        }

        if let Some(percentage) = tally.overall_percentage() {
            scored_submission_count += 1;
            total_percentage += percentage;
            *band_counts
                .entry(PerformanceBand::from_percentage(percentage))
                .or_insert(0) += 1;
        }
    }

    let section_averages = survey
        .sections
        .iter()
        .filter_map(|section| {
            let (sum, count) = pooled.get(section.title).copied()?;
            if count == 0 {
                return None;
            }
            Some(SectionAverage {
                section_title: section.title.to_string(),
                percentage: section_percentage(sum, count),
                responses: count,
            })
        })
        .collect();

    let distribution = PerformanceBand::ordered()
        .into_iter()
        .map(|band| BandCount {
            band,
            label: band.label(),
            count: band_counts.get(&band).copied().unwrap_or(0),
        })
        .collect();

    let overall_average_percentage = if scored_submission_count > 0 {
        total_percentage / scored_submission_count as f64
    } else {
        0.0
    };

    SurveyAnalysis {
        section_averages,
        distribution,
        overall_average_percentage,
        scored_submission_count,
        overall_label: family.overall_label(),
    }
}
