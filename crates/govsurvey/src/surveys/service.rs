//! Report service composing the schema registry, answer extraction,
//! scoring, and the submission store into the payloads the admin surface
//! serves.

use super::analysis::{analyze, SurveyAnalysis};
use super::answers::{extract_answers, AnswerMap, AnswerValue};
use super::export::write_csv;
use super::mapping::canonical_sections;
use super::normalizer::normalize_slug;
use super::registry::{self, Section, SurveyDefinition, SurveyFamily};
use super::scoring::submission_percentage;
use super::sources;
use super::store::{SubmissionRecord, SubmissionStore, SubmissionUser};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const RECENT_SUBMISSION_LIMIT: usize = 50;
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(5000);

static SUBMISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_submission_id() -> String {
    let id = SUBMISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("sub-{id:06}")
}

/// Error raised by the report service.
///
/// Missing or malformed per-submission data never surfaces here; it
/// degrades inside extraction and scoring. Only unresolved lookups and a
/// total source outage reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("survey not found")]
    SurveyNotFound,
    #[error("submission not found")]
    SubmissionNotFound,
    #[error("no submission source could be reached")]
    AllSourcesFailed,
    #[error(transparent)]
    Store(#[from] super::store::StoreError),
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}

/// Catalog entry as listed on the overview.
#[derive(Debug, Clone, Serialize)]
pub struct SurveySummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Submission row as listed on the overview and results pages. The slug is
/// always re-labeled with the catalog's canonical spelling.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionSummary {
    pub id: String,
    pub survey_slug: String,
    pub created_at: DateTime<Utc>,
    pub user: Option<SubmissionUser>,
}

/// Overview payload: catalog, recent activity, and per-survey counts.
/// `partial` flags that at least one count source could not be reached and
/// the numbers may understate reality.
#[derive(Debug, Serialize)]
pub struct OverviewReport {
    pub surveys: Vec<SurveySummary>,
    pub recent_submissions: Vec<SubmissionSummary>,
    pub counts_by_survey_slug: BTreeMap<String, u64>,
    pub partial: bool,
}

/// Survey definition as served to consumers, with canonical sections.
#[derive(Debug, Serialize)]
pub struct SurveyView {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub sections: Vec<Section>,
}

impl SurveyView {
    fn of(survey: &SurveyDefinition) -> Self {
        Self {
            slug: survey.slug,
            title: survey.title,
            description: survey.description,
            sections: canonical_sections(survey),
        }
    }
}

/// Per-survey results payload: definition, submissions, and the
/// aggregated analysis.
#[derive(Debug, Serialize)]
pub struct ResultsReport {
    pub survey: SurveyView,
    pub submissions: Vec<SubmissionSummary>,
    pub analysis: SurveyAnalysis,
}

/// Single-submission detail payload with the reconciled answer map.
#[derive(Debug, Serialize)]
pub struct SubmissionDetailReport {
    pub survey: SurveyView,
    pub submission: SubmissionSummary,
    pub answers: AnswerMap,
}

/// Rendered CSV export plus its download filename.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Stateless facade over the submission store. Every computation is a pure
/// read; nothing derived is ever written back.
pub struct SurveyReportService<S> {
    store: Arc<S>,
    fetch_timeout: Duration,
}

impl<S> SurveyReportService<S>
where
    S: SubmissionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_fetch_timeout(store, DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_fetch_timeout(store: Arc<S>, fetch_timeout: Duration) -> Self {
        Self {
            store,
            fetch_timeout,
        }
    }

    /// Build the admin overview, reconciling submission counts across the
    /// ordered source strategies.
    pub async fn overview(&self, query: Option<&str>) -> Result<OverviewReport, ReportError> {
        let needle = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);
        let mut partial = false;

        let surveys: Vec<SurveySummary> = registry::surveys()
            .iter()
            .filter(|survey| match &needle {
                Some(q) => {
                    survey.title.to_lowercase().contains(q)
                        || survey.description.to_lowercase().contains(q)
                }
                None => true,
            })
            .map(|survey| SurveySummary {
                slug: survey.slug,
                title: survey.title,
                description: survey.description,
            })
            .collect();

        let recent = match self.store.recent(RECENT_SUBMISSION_LIMIT) {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "recent submission listing unavailable");
                partial = true;
                Vec::new()
            }
        };
        let recent_submissions = recent
            .iter()
            .map(summary_of)
            .filter(|summary| match &needle {
                Some(q) => {
                    summary.survey_slug.to_lowercase().contains(q)
                        || summary.id.to_lowercase().contains(q)
                        || summary
                            .user
                            .as_ref()
                            .map(|user| user.email.to_lowercase().contains(q))
                            .unwrap_or(false)
                }
                None => true,
            })
            .collect();

        let (counts, counts_partial) = self.reconciled_counts().await?;
        partial |= counts_partial;

        let mut counts_by_survey_slug: BTreeMap<String, u64> = registry::surveys()
            .iter()
            .map(|survey| (survey.slug.to_string(), 0))
            .collect();
        for (slug, count) in counts {
            let entry = counts_by_survey_slug.entry(slug).or_insert(0);
            *entry = (*entry).max(count);
        }

        Ok(OverviewReport {
            surveys,
            recent_submissions,
            counts_by_survey_slug,
            partial,
        })
    }

    /// Counts from the primary grouped tally, falling back to a bounded
    /// concurrent recount when the primary is unavailable or reports
    /// nothing while surveys exist. Merging takes the element-wise max.
    async fn reconciled_counts(
        &self,
    ) -> Result<(std::collections::HashMap<String, u64>, bool), ReportError> {
        let primary = match self.store.counts_by_survey() {
            Ok(raw) => Some(sources::canonicalize_counts(raw)),
            Err(err) => {
                warn!(error = %err, source = sources::GROUPED_COUNTS, "count source failed");
                None
            }
        };

        if let Some(sample) = &primary {
            if sample.counts.values().any(|count| *count > 0) {
                return Ok((sample.counts.clone(), false));
            }
        }

        let primary_failed = primary.is_none();
        let fallback = sources::listing_counts(Arc::clone(&self.store), self.fetch_timeout).await;
        if primary_failed && fallback.counts.is_empty() && !fallback.failed.is_empty() {
            return Err(ReportError::AllSourcesFailed);
        }
        if !fallback.failed.is_empty() {
            warn!(
                source = fallback.source,
                failed = ?fallback.failed,
                "partial count recount"
            );
        }

        let partial = !fallback.failed.is_empty();
        let merged = sources::merge_max(
            primary.map(|sample| sample.counts).unwrap_or_default(),
            fallback.counts,
        );
        Ok((merged, partial))
    }

    /// Per-survey results with the aggregated analysis.
    pub fn results(&self, slug: &str) -> Result<ResultsReport, ReportError> {
        let survey = registry::find_by_slug(slug).ok_or(ReportError::SurveyNotFound)?;
        let submissions = self.survey_submissions(survey)?;

        let analysis = analyze(survey, &submissions);
        let submissions = submissions.iter().map(summary_of).collect();

        Ok(ResultsReport {
            survey: SurveyView::of(survey),
            submissions,
            analysis,
        })
    }

    /// One submission with its owning survey and reconciled answers.
    pub fn submission_detail(&self, id: &str) -> Result<SubmissionDetailReport, ReportError> {
        let record = self
            .store
            .submission(id)?
            .ok_or(ReportError::SubmissionNotFound)?;
        let survey =
            registry::find_by_slug(&record.survey_slug).ok_or(ReportError::SurveyNotFound)?;

        Ok(SubmissionDetailReport {
            survey: SurveyView::of(survey),
            submission: summary_of(&record),
            answers: extract_answers(&record.data),
        })
    }

    /// Accept a new submission: reconcile the payload into the canonical
    /// answer map, stamp the family-specific overall percentage, persist.
    pub fn submit(
        &self,
        slug: &str,
        user_email: &str,
        payload: &Value,
    ) -> Result<SubmissionRecord, ReportError> {
        let survey = registry::find_by_slug(slug).ok_or(ReportError::SurveyNotFound)?;

        let mut answers = extract_answers(payload);
        let family = SurveyFamily::detect(survey);
        let percentage = submission_percentage(survey, &answers);
        answers.insert(
            family.storage_key().to_string(),
            AnswerValue::Text(format!("{percentage:.1}")),
        );

        let record = SubmissionRecord {
            id: next_submission_id(),
            survey_slug: survey.slug.to_string(),
            created_at: Utc::now(),
            user: Some(SubmissionUser {
                email: user_email.to_string(),
            }),
            data: serde_json::json!({ "answers": answers }),
        };

        Ok(self.store.insert(record)?)
    }

    /// Render the survey's submissions as a downloadable CSV.
    pub fn export_csv(&self, slug: &str) -> Result<CsvExport, ReportError> {
        let survey = registry::find_by_slug(slug).ok_or(ReportError::SurveyNotFound)?;
        let submissions = self.survey_submissions(survey)?;
        let content = write_csv(survey, &submissions)?;

        Ok(CsvExport {
            filename: format!("{}-submissions.csv", survey.slug),
            content,
        })
    }

    /// Fetch and defensively re-filter a survey's submissions by
    /// normalized slug, newest first.
    fn survey_submissions(
        &self,
        survey: &SurveyDefinition,
    ) -> Result<Vec<SubmissionRecord>, ReportError> {
        let wanted = normalize_slug(survey.slug);
        let mut submissions: Vec<SubmissionRecord> = self
            .store
            .for_survey(survey.slug)?
            .into_iter()
            .filter(|record| normalize_slug(&record.survey_slug) == wanted)
            .collect();
        submissions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(submissions)
    }
}

fn summary_of(record: &SubmissionRecord) -> SubmissionSummary {
    SubmissionSummary {
        id: record.id.clone(),
        survey_slug: registry::canonical_slug(&record.survey_slug),
        created_at: record.created_at,
        user: record.user.clone(),
    }
}
