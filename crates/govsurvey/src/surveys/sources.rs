//! Count-source strategies for the admin overview.
//!
//! Submission counts can come from two independently maintained tallies:
//! the store's grouped counts and a recount from per-survey listings. The
//! two can disagree, and the grouped tally has historically gone stale at
//! zero. Strategies are tried in a fixed order and reconciled by
//! element-wise maximum so a stale zero never overwrites a later nonzero
//! count.

use super::normalizer::normalize_slug;
use super::registry;
use super::store::SubmissionStore;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

pub(crate) const GROUPED_COUNTS: &str = "grouped-counts";
pub(crate) const PER_SURVEY_LISTING: &str = "per-survey-listing";

/// Outcome of one counting strategy: canonical slug to count, plus the
/// surveys whose fetch failed or timed out.
#[derive(Debug, Default)]
pub(crate) struct CountSample {
    pub(crate) source: &'static str,
    pub(crate) counts: HashMap<String, u64>,
    pub(crate) failed: Vec<&'static str>,
}

/// Re-key a raw store tally by canonical slug, pooling variants.
pub(crate) fn canonicalize_counts(raw: HashMap<String, u64>) -> CountSample {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for (slug, count) in raw {
        *counts.entry(registry::canonical_slug(&slug)).or_insert(0) += count;
    }
    CountSample {
        source: GROUPED_COUNTS,
        counts,
        failed: Vec::new(),
    }
}

/// Element-wise maximum over the union of both samples' slugs.
pub(crate) fn merge_max(
    primary: HashMap<String, u64>,
    fallback: HashMap<String, u64>,
) -> HashMap<String, u64> {
    let mut merged = primary;
    for (slug, count) in fallback {
        let entry = merged.entry(slug).or_insert(0);
        *entry = (*entry).max(count);
    }
    merged
}

/// Recount by listing each survey's submissions, concurrently and bounded
/// by `fetch_timeout` per survey. A fetch that fails or times out only
/// excludes that one survey's contribution.
pub(crate) async fn listing_counts<S>(store: Arc<S>, fetch_timeout: Duration) -> CountSample
where
    S: SubmissionStore + 'static,
{
    let mut tasks = JoinSet::new();
    for survey in registry::surveys() {
        let slug = survey.slug;
        let store = Arc::clone(&store);
        tasks.spawn(async move {
            let fetch = tokio::task::spawn_blocking(move || store.for_survey(slug));
            let count = match tokio::time::timeout(fetch_timeout, fetch).await {
                Ok(Ok(Ok(records))) => {
                    let wanted = normalize_slug(slug);
                    let matching = records
                        .iter()
                        .filter(|record| normalize_slug(&record.survey_slug) == wanted)
                        .count();
                    Some(matching as u64)
                }
                _ => None,
            };
            (slug, count)
        });
    }

    let mut sample = CountSample {
        source: PER_SURVEY_LISTING,
        ..CountSample::default()
    };
    while let Some(joined) = tasks.join_next().await {
        if let Ok((slug, outcome)) = joined {
            match outcome {
                Some(count) => {
                    sample.counts.insert(slug.to_string(), count);
                }
                None => sample.failed.push(slug),
            }
        }
    }
    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surveys::store::{StoreError, SubmissionRecord};
    use serde_json::json;

    struct ScriptedStore {
        fail_for: &'static str,
        slow_for: Option<&'static str>,
    }

    impl SubmissionStore for ScriptedStore {
        fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, StoreError> {
            Ok(record)
        }

        fn submission(&self, _id: &str) -> Result<Option<SubmissionRecord>, StoreError> {
            Ok(None)
        }

        fn recent(&self, _limit: usize) -> Result<Vec<SubmissionRecord>, StoreError> {
            Ok(Vec::new())
        }

        fn for_survey(&self, slug: &str) -> Result<Vec<SubmissionRecord>, StoreError> {
            if slug == self.fail_for {
                return Err(StoreError::Unavailable("scripted outage".to_string()));
            }
            if Some(slug) == self.slow_for {
                std::thread::sleep(Duration::from_millis(200));
            }
            let record = SubmissionRecord::from_value(&json!({
                "id": format!("{slug}-1"),
                "surveySlug": slug,
            }))
            .expect("scripted record");
            Ok(vec![record])
        }

        fn counts_by_survey(&self) -> Result<HashMap<String, u64>, StoreError> {
            Ok(HashMap::new())
        }
    }

    #[test]
    fn merge_never_regresses_to_a_stale_zero() {
        let primary: HashMap<String, u64> =
            [("board-evaluation".to_string(), 0)].into_iter().collect();
        let fallback: HashMap<String, u64> =
            [("board-evaluation".to_string(), 3)].into_iter().collect();
        let merged = merge_max(primary, fallback);
        assert_eq!(merged.get("board-evaluation"), Some(&3));

        // And the other direction: a fallback zero cannot clobber either.
        let primary: HashMap<String, u64> =
            [("peer-evaluation".to_string(), 7)].into_iter().collect();
        let fallback: HashMap<String, u64> =
            [("peer-evaluation".to_string(), 0)].into_iter().collect();
        let merged = merge_max(primary, fallback);
        assert_eq!(merged.get("peer-evaluation"), Some(&7));
    }

    #[test]
    fn canonicalization_pools_slug_variants() {
        let raw: HashMap<String, u64> = [
            ("board_evaluation".to_string(), 2),
            ("Board-Evaluation".to_string(), 1),
            ("unregistered-survey".to_string(), 4),
        ]
        .into_iter()
        .collect();

        let sample = canonicalize_counts(raw);
        assert_eq!(sample.source, GROUPED_COUNTS);
        assert_eq!(sample.counts.get("board-evaluation"), Some(&3));
        assert_eq!(sample.counts.get("unregistered-survey"), Some(&4));
    }

    #[tokio::test]
    async fn listing_recount_survives_single_survey_failures() {
        let store = Arc::new(ScriptedStore {
            fail_for: "board-evaluation",
            slow_for: None,
        });
        let sample = listing_counts(store, Duration::from_millis(500)).await;

        assert_eq!(sample.source, PER_SURVEY_LISTING);
        assert_eq!(sample.counts.get("peer-evaluation"), Some(&1));
        assert!(!sample.counts.contains_key("board-evaluation"));
        assert_eq!(sample.failed, vec!["board-evaluation"]);
    }

    #[tokio::test]
    async fn slow_fetches_are_bounded_by_the_timeout() {
        let store = Arc::new(ScriptedStore {
            fail_for: "none",
            slow_for: Some("peer-evaluation"),
        });
        let sample = listing_counts(store, Duration::from_millis(30)).await;

        assert_eq!(sample.counts.get("board-evaluation"), Some(&1));
        assert!(sample.failed.contains(&"peer-evaluation"));
    }
}
