//! Integration specifications for the survey reporting workflow.
//!
//! Scenarios run through the public service facade with an in-memory
//! store, covering slug reconciliation, mixed payload shapes, scoring,
//! aggregation, export, and the count-source fallback behavior.

mod common {
    use chrono::{DateTime, TimeZone, Utc};
    use govsurvey::surveys::{
        normalize_slug, StoreError, SubmissionRecord, SubmissionStore, SubmissionUser,
    };
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// In-memory store with switches for simulating stale tallies and
    /// outages.
    #[derive(Default)]
    pub(super) struct ScriptedStore {
        records: Mutex<Vec<SubmissionRecord>>,
        pub(super) stale_counts: AtomicBool,
        pub(super) counts_down: AtomicBool,
        pub(super) listings_down: AtomicBool,
    }

    impl ScriptedStore {
        pub(super) fn seeded(records: Vec<SubmissionRecord>) -> Self {
            Self {
                records: Mutex::new(records),
                ..Self::default()
            }
        }
    }

    impl SubmissionStore for ScriptedStore {
        fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, StoreError> {
            let mut guard = self.records.lock().expect("store mutex poisoned");
            if guard.iter().any(|existing| existing.id == record.id) {
                return Err(StoreError::Conflict);
            }
            guard.push(record.clone());
            Ok(record)
        }

        fn submission(&self, id: &str) -> Result<Option<SubmissionRecord>, StoreError> {
            let guard = self.records.lock().expect("store mutex poisoned");
            Ok(guard.iter().find(|record| record.id == id).cloned())
        }

        fn recent(&self, limit: usize) -> Result<Vec<SubmissionRecord>, StoreError> {
            let mut records = self.records.lock().expect("store mutex poisoned").clone();
            records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            records.truncate(limit);
            Ok(records)
        }

        fn for_survey(&self, slug: &str) -> Result<Vec<SubmissionRecord>, StoreError> {
            if self.listings_down.load(Ordering::Relaxed) {
                return Err(StoreError::Unavailable("listings offline".to_string()));
            }
            let wanted = normalize_slug(slug);
            let guard = self.records.lock().expect("store mutex poisoned");
            Ok(guard
                .iter()
                .filter(|record| normalize_slug(&record.survey_slug) == wanted)
                .cloned()
                .collect())
        }

        fn counts_by_survey(&self) -> Result<HashMap<String, u64>, StoreError> {
            if self.counts_down.load(Ordering::Relaxed) {
                return Err(StoreError::Unavailable("tally offline".to_string()));
            }
            if self.stale_counts.load(Ordering::Relaxed) {
                // A tally that went stale at zero while rows exist.
                return Ok(HashMap::new());
            }
            let guard = self.records.lock().expect("store mutex poisoned");
            let mut counts = HashMap::new();
            for record in guard.iter() {
                *counts.entry(record.survey_slug.clone()).or_insert(0) += 1;
            }
            Ok(counts)
        }
    }

    pub(super) fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 9, 0, 0).single().expect("valid date")
    }

    pub(super) fn record(
        id: &str,
        slug: &str,
        day: u32,
        email: &str,
        data: Value,
    ) -> SubmissionRecord {
        SubmissionRecord {
            id: id.to_string(),
            survey_slug: slug.to_string(),
            created_at: at(day),
            user: Some(SubmissionUser {
                email: email.to_string(),
            }),
            data,
        }
    }
}

use common::{record, ScriptedStore};
use govsurvey::surveys::{PerformanceBand, ReportError, SurveyReportService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn results_reconcile_slug_variants_and_payload_shapes() {
    let store = Arc::new(ScriptedStore::seeded(vec![
        record(
            "s1",
            "board_evaluation",
            3,
            "chair@example.org",
            json!({ "answers": { "transparency": "Strongly Agree", "whistleblowing": "Agree" } }),
        ),
        record(
            "s2",
            "Board-Evaluation",
            5,
            "director@example.org",
            json!({ "transparency": "Disagree" }),
        ),
        record(
            "s3",
            "peer-evaluation",
            4,
            "peer@example.org",
            json!({ "answers": { "b1_prepared": "4" } }),
        ),
    ]));
    let service = SurveyReportService::new(store);

    let report = service.results("board_evaluation").expect("results build");
    assert_eq!(report.survey.slug, "board-evaluation");
    assert_eq!(report.submissions.len(), 2);
    // Newest first, canonical slug labels.
    assert_eq!(report.submissions[0].id, "s2");
    assert!(report
        .submissions
        .iter()
        .all(|submission| submission.survey_slug == "board-evaluation"));

    // s1: (5 + 4) / (2 * 5) = 90%; s2: 2 / 5 = 40%.
    assert_eq!(report.analysis.scored_submission_count, 2);
    assert_eq!(report.analysis.overall_average_percentage, 65.0);
    let excellent = report
        .analysis
        .distribution
        .iter()
        .find(|slice| slice.band == PerformanceBand::Excellent)
        .expect("band present");
    assert_eq!(excellent.count, 1);
    let fair = report
        .analysis
        .distribution
        .iter()
        .find(|slice| slice.band == PerformanceBand::Fair)
        .expect("band present");
    assert_eq!(fair.count, 1);

    // The board survey view is regrouped into the canonical letters.
    assert_eq!(
        report.survey.sections[0].title,
        "Section A: Governance Framework"
    );
}

#[test]
fn submission_detail_resolves_owner_survey_and_answers() {
    let store = Arc::new(ScriptedStore::seeded(vec![record(
        "s1",
        "peer_evaluation",
        2,
        "peer@example.org",
        json!({ "answers": { "b1_prepared": "5", "g_development_areas": "Risk training" } }),
    )]));
    let service = SurveyReportService::new(store);

    let detail = service.submission_detail("s1").expect("detail builds");
    assert_eq!(detail.survey.slug, "peer-evaluation");
    assert_eq!(detail.submission.survey_slug, "peer-evaluation");
    assert_eq!(
        detail.answers.get("g_development_areas").map(|a| a.display()),
        Some("Risk training".to_string())
    );

    match service.submission_detail("missing") {
        Err(ReportError::SubmissionNotFound) => {}
        other => panic!("expected SubmissionNotFound, got {other:?}"),
    }
}

#[test]
fn submit_then_export_round_trips_through_the_store() {
    let store = Arc::new(ScriptedStore::default());
    let service = SurveyReportService::new(store);

    let record = service
        .submit(
            "PEER_EVALUATION",
            "member@example.org",
            &json!({ "answers": { "b1_prepared": "5", "b2_contributes_strategy": "3" } }),
        )
        .expect("submission accepted");
    assert_eq!(record.survey_slug, "peer-evaluation");

    // The stored payload carries the submit-time percentage under the
    // peer family key.
    let stamped = record.data["answers"]["overall_percentage_b"]
        .as_str()
        .expect("percentage stamped");
    stamped.parse::<f64>().expect("percentage parses");

    let export = service.export_csv("peer-evaluation").expect("export renders");
    assert_eq!(export.filename, "peer-evaluation-submissions.csv");
    assert!(export.content.contains(&format!("\"{}\"", record.id)));
    assert!(export.content.contains("\"member@example.org\""));
}

#[test]
fn csv_cells_double_embedded_quotes() {
    let store = Arc::new(ScriptedStore::seeded(vec![record(
        "s1",
        "board-evaluation",
        1,
        "chair@example.org",
        json!({ "answers": { "additional_comments": "He said \"hi\"" } }),
    )]));
    let service = SurveyReportService::new(store);

    let export = service.export_csv("board-evaluation").expect("export renders");
    assert!(export.content.contains("\"He said \"\"hi\"\"\""));
}

#[tokio::test]
async fn stale_zero_counts_are_repaired_from_listings() {
    let store = Arc::new(ScriptedStore::seeded(vec![
        record("s1", "board-evaluation", 1, "a@example.org", json!({})),
        record("s2", "board_evaluation", 2, "b@example.org", json!({})),
        record("s3", "board-evaluation", 3, "c@example.org", json!({})),
    ]));
    store.stale_counts.store(true, Ordering::Relaxed);
    let service = SurveyReportService::with_fetch_timeout(store, Duration::from_millis(500));

    let overview = service.overview(None).await.expect("overview builds");
    // The stale zero tally never wins over the recount.
    assert_eq!(overview.counts_by_survey_slug.get("board-evaluation"), Some(&3));
    assert!(!overview.partial);
}

#[tokio::test]
async fn partial_count_outage_degrades_instead_of_failing() {
    // Primary tally succeeds (at zero) while listings are down: the
    // overview still renders, annotated as partial.
    let store = Arc::new(ScriptedStore::default());
    store.listings_down.store(true, Ordering::Relaxed);
    let service =
        SurveyReportService::with_fetch_timeout(Arc::clone(&store), Duration::from_millis(100));

    let overview = service.overview(None).await.expect("overview degrades");
    assert!(overview.partial);
    assert_eq!(overview.counts_by_survey_slug.get("peer-evaluation"), Some(&0));
}

#[tokio::test]
async fn total_source_outage_is_the_only_fatal_overview_error() {
    let store = Arc::new(ScriptedStore::default());
    store.counts_down.store(true, Ordering::Relaxed);
    store.listings_down.store(true, Ordering::Relaxed);
    let service =
        SurveyReportService::with_fetch_timeout(store, Duration::from_millis(100));

    match service.overview(None).await {
        Err(ReportError::AllSourcesFailed) => {}
        other => panic!("expected AllSourcesFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn overview_query_filters_surveys_and_submissions() {
    let store = Arc::new(ScriptedStore::seeded(vec![
        record("s1", "board-evaluation", 1, "chair@example.org", json!({})),
        record("s2", "peer-evaluation", 2, "peer@example.org", json!({})),
    ]));
    let service = SurveyReportService::new(store);

    let overview = service.overview(Some("peer")).await.expect("overview builds");
    assert_eq!(overview.surveys.len(), 1);
    assert_eq!(overview.surveys[0].slug, "peer-evaluation");
    assert_eq!(overview.recent_submissions.len(), 1);
    assert_eq!(overview.recent_submissions[0].id, "s2");
}
