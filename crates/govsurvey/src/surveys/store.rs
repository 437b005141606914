use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::answers::submission_rows;

/// Owning user reference attached to a submission, reduced to what reports
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionUser {
    pub email: String,
}

/// One stored survey submission. `data` is the opaque answer payload,
/// permanent once written; its shape is reconciled at read time by the
/// answer extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: String,
    pub survey_slug: String,
    pub created_at: DateTime<Utc>,
    pub user: Option<SubmissionUser>,
    pub data: Value,
}

impl SubmissionRecord {
    /// Decode a submission row from a foreign payload, tolerating the
    /// field-name variants accumulated across upstream eras
    /// (`surveySlug` / `survey_slug` / `survey_id`, `createdAt` /
    /// `created_at`, and so on). Rows without an id and slug are skipped.
    pub fn from_value(row: &Value) -> Option<Self> {
        let object = row.as_object()?;

        let id = string_field(object, &["id", "submission_id", "submissionId"])?;
        let survey_slug = string_field(
            object,
            &["surveySlug", "survey_slug", "survey_id", "surveyId", "slug"],
        )?;

        let created_at = string_field(object, &["createdAt", "created_at", "submitted_at"])
            .and_then(|raw| parse_timestamp(&raw))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        let user = object
            .get("user")
            .and_then(Value::as_object)
            .and_then(|user| string_field(user, &["email"]))
            .or_else(|| string_field(object, &["user_email", "email"]))
            .map(|email| SubmissionUser { email });

        let data = object.get("data").cloned().unwrap_or_else(|| row.clone());

        Some(Self {
            id,
            survey_slug,
            created_at,
            user,
            data,
        })
    }

    /// Decode every recognizable row of a collection payload, probing the
    /// known container fields when the payload is not itself an array.
    pub fn batch_from_value(payload: &Value) -> Vec<Self> {
        submission_rows(payload)
            .map(|rows| rows.iter().filter_map(Self::from_value).collect())
            .unwrap_or_default()
    }
}

fn string_field(
    object: &serde_json::Map<String, Value>,
    candidates: &[&str],
) -> Option<String> {
    candidates.iter().find_map(|field| {
        object.get(*field).and_then(|value| match value {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction over the external data store so reports can be
/// exercised without a database.
pub trait SubmissionStore: Send + Sync {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, StoreError>;
    fn submission(&self, id: &str) -> Result<Option<SubmissionRecord>, StoreError>;
    /// Most recent submissions across all surveys, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<SubmissionRecord>, StoreError>;
    /// Submissions whose stored slug matches the given slug after
    /// normalization. Callers still re-filter defensively.
    fn for_survey(&self, slug: &str) -> Result<Vec<SubmissionRecord>, StoreError>;
    /// Tally keyed by the *raw* stored slug; canonicalization happens in
    /// the reporting layer.
    fn counts_by_survey(&self) -> Result<HashMap<String, u64>, StoreError>;
}

/// User role as resolved by the session boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Member,
}

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub role: Role,
}

/// Session lookup boundary. Token issuance and storage live outside the
/// core; handlers only ever see the resolved identity.
pub trait SessionAuthority: Send + Sync {
    fn session_user(&self, token: &str) -> Option<SessionUser>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_rows_with_alternate_field_names() {
        let record = SubmissionRecord::from_value(&json!({
            "submission_id": "abc-1",
            "survey_id": "board_evaluation",
            "created_at": "2025-06-01T09:30:00Z",
            "user_email": "chair@example.org",
            "data": { "answers": { "transparency": "Agree" } },
        }))
        .expect("row decodes");

        assert_eq!(record.id, "abc-1");
        assert_eq!(record.survey_slug, "board_evaluation");
        assert_eq!(
            record.user,
            Some(SubmissionUser { email: "chair@example.org".to_string() })
        );
        assert_eq!(record.created_at.to_rfc3339(), "2025-06-01T09:30:00+00:00");
    }

    #[test]
    fn flat_rows_become_their_own_data_payload() {
        let record = SubmissionRecord::from_value(&json!({
            "id": "abc-2",
            "surveySlug": "peer-evaluation",
            "createdAt": "2025-06-02",
            "transparency": "Agree",
        }))
        .expect("row decodes");

        assert_eq!(record.data["transparency"], json!("Agree"));
    }

    #[test]
    fn rows_missing_identity_are_skipped() {
        assert!(SubmissionRecord::from_value(&json!({ "surveySlug": "x" })).is_none());
        assert!(SubmissionRecord::from_value(&json!({ "id": "only-id" })).is_none());
        assert!(SubmissionRecord::from_value(&json!("not-an-object")).is_none());
    }

    #[test]
    fn batch_decode_probes_containers_and_skips_bad_rows() {
        let payload = json!({
            "items": [
                { "id": "s1", "surveySlug": "board-evaluation" },
                { "not": "a submission" },
                { "id": "s2", "survey_slug": "peer-evaluation" },
            ]
        });
        let records = SubmissionRecord::batch_from_value(&payload);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "s1");
        assert_eq!(records[1].id, "s2");

        assert!(SubmissionRecord::batch_from_value(&json!({ "unrelated": true })).is_empty());
    }
}
