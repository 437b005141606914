use chrono::{Duration, Utc};
use govsurvey::surveys::{
    normalize_slug, Role, SessionAuthority, SessionUser, StoreError, SubmissionRecord,
    SubmissionStore, SubmissionUser,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Submission store backed by process memory. The relational store this
/// stands in for lives outside the core; reports only ever see the trait.
#[derive(Default)]
pub(crate) struct InMemorySubmissionStore {
    records: Mutex<Vec<SubmissionRecord>>,
}

impl SubmissionStore for InMemorySubmissionStore {
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
        let wanted = normalize_slug(slug);
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| normalize_slug(&record.survey_slug) == wanted)
            .cloned()
            .collect())
    }

    fn counts_by_survey(&self) -> Result<HashMap<String, u64>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let mut counts = HashMap::new();
        for record in guard.iter() {
            *counts.entry(record.survey_slug.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

/// Static token table standing in for the external session service.
pub(crate) struct StaticSessionAuthority {
    tokens: HashMap<String, SessionUser>,
}

impl StaticSessionAuthority {
    pub(crate) fn from_env() -> Self {
        let admin_token =
            std::env::var("APP_ADMIN_TOKEN").unwrap_or_else(|_| "local-admin-token".to_string());
        let member_token =
            std::env::var("APP_MEMBER_TOKEN").unwrap_or_else(|_| "local-member-token".to_string());

        let mut tokens = HashMap::new();
        tokens.insert(
            admin_token,
            SessionUser {
                email: "admin@example.org".to_string(),
                role: Role::Admin,
            },
        );
        tokens.insert(
            member_token,
            SessionUser {
                email: "member@example.org".to_string(),
                role: Role::Member,
            },
        );
        Self { tokens }
    }
}

impl SessionAuthority for StaticSessionAuthority {
    fn session_user(&self, token: &str) -> Option<SessionUser> {
        self.tokens.get(token).cloned()
    }
}

/// Seed a handful of realistic submissions across both templates and the
/// historical slug and payload variants.
pub(crate) fn seed_submissions(store: &InMemorySubmissionStore) -> Result<usize, StoreError> {
    let now = Utc::now();
    let seeds = vec![
        SubmissionRecord {
            id: "seed-000001".to_string(),
            survey_slug: "board-evaluation".to_string(),
            created_at: now - Duration::days(12),
            user: Some(SubmissionUser {
                email: "chair@example.org".to_string(),
            }),
            data: json!({
                "answers": {
                    "board_composition_diverse_mix": "Strongly Agree",
                    "board_diversity_reflect": "Agree",
                    "meetings_frequency": "Agree",
                    "transparency": "Strongly Agree",
                    "improvement_areas": "More frequent strategy retreats.",
                    "overall_percentage_a": "88.0",
                }
            }),
        },
        SubmissionRecord {
            id: "seed-000002".to_string(),
            // Legacy rows stored the slug with underscores.
            survey_slug: "board_evaluation".to_string(),
            created_at: now - Duration::days(9),
            user: Some(SubmissionUser {
                email: "director@example.org".to_string(),
            }),
            // Legacy rows also stored answers flat at the top level.
            data: json!({
                "board_composition_diverse_mix": "Neutral",
                "meetings_frequency": "Disagree",
                "transparency": "Agree",
            }),
        },
        SubmissionRecord {
            id: "seed-000003".to_string(),
            survey_slug: "peer-evaluation".to_string(),
            created_at: now - Duration::days(4),
            user: Some(SubmissionUser {
                email: "peer@example.org".to_string(),
            }),
            data: json!({
                "answers": {
                    "director_being_evaluated": "Mrs. Oluyemisi Dawodu",
                    "b1_prepared": "5",
                    "b2_contributes_strategy": "4",
                    "c1_risk_controls": "4",
                    "h_training_needs": [
                        "Risk & compliance management",
                        "Board leadership & governance best practices",
                    ],
                    "overall_percentage_b": "86.7",
                }
            }),
        },
    ];

    let seeded = seeds.len();
    for record in seeds {
        store.insert(record)?;
    }
    Ok(seeded)
}
