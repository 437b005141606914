//! CSV export of a survey's submissions.

use super::answers::{extract_answers, AnswerValue};
use super::registry::SurveyDefinition;
use super::store::SubmissionRecord;
use csv::{QuoteStyle, WriterBuilder};

/// Render submissions as CSV: fixed identity columns followed by one
/// column per question key in definition order. Every cell is quoted, so
/// embedded quotes are doubled per RFC 4180; multi-select answers join
/// with `"; "`.
pub fn write_csv(
    survey: &SurveyDefinition,
    submissions: &[SubmissionRecord],
) -> Result<String, csv::Error> {
    let question_keys = survey.question_keys();

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    let mut header = vec!["submission_id", "submitted_at", "user_email"];
    header.extend(question_keys.iter().copied());
    writer.write_record(&header)?;

    for submission in submissions {
        let answers = extract_answers(&submission.data);
        let mut row = vec![
            submission.id.clone(),
            submission.created_at.to_rfc3339(),
            submission
                .user
                .as_ref()
                .map(|user| user.email.clone())
                .unwrap_or_default(),
        ];
        for key in &question_keys {
            let cell = match answers.get(*key) {
                Some(AnswerValue::Text(value)) => value.clone(),
                Some(AnswerValue::Multi(values)) => values.join("; "),
                Some(AnswerValue::Null) | None => String::new(),
            };
            row.push(cell);
        }
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surveys::registry::find_by_slug;
    use crate::surveys::store::SubmissionUser;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn record(data: serde_json::Value) -> SubmissionRecord {
        SubmissionRecord {
            id: "sub-000001".to_string(),
            survey_slug: "board-evaluation".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 4, 10, 8, 15, 0).unwrap(),
            user: Some(SubmissionUser { email: "director@example.org".to_string() }),
            data,
        }
    }

    #[test]
    fn header_lists_identity_columns_then_question_keys() {
        let survey = find_by_slug("board-evaluation").expect("board survey");
        let csv = write_csv(survey, &[]).expect("csv renders");
        let header = csv.lines().next().expect("header line");
        assert!(header.starts_with(
            "\"submission_id\",\"submitted_at\",\"user_email\",\"board_composition_diverse_mix\""
        ));
        let columns = header.split(',').count();
        assert_eq!(columns, 3 + survey.question_keys().len());
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let survey = find_by_slug("board-evaluation").expect("board survey");
        let submission = record(json!({
            "answers": { "improvement_areas": "He said \"hi\"" }
        }));
        let csv = write_csv(survey, &[submission]).expect("csv renders");
        assert!(csv.contains("\"He said \"\"hi\"\"\""));
    }

    #[test]
    fn arrays_join_with_semicolons_and_gaps_stay_empty() {
        let survey = find_by_slug("peer-evaluation").expect("peer survey");
        let submission = record(json!({
            "answers": {
                "h_training_needs": ["Risk & compliance management", "Board leadership & governance best practices"],
                "evaluation_date": null,
            }
        }));
        let csv = write_csv(survey, &[submission]).expect("csv renders");
        let data_row = csv.lines().nth(1).expect("data row");
        assert!(data_row.contains(
            "\"Risk & compliance management; Board leadership & governance best practices\""
        ));
        assert!(data_row.starts_with("\"sub-000001\",\"2025-04-10T08:15:00+00:00\",\"director@example.org\""));
    }

    #[test]
    fn rows_align_answers_to_header_positions() {
        let survey = find_by_slug("board-evaluation").expect("board survey");
        let submission = record(json!({ "transparency": "Agree" }));
        let csv = write_csv(survey, &[submission]).expect("csv renders");

        let header: Vec<&str> = csv.lines().next().unwrap().split(',').collect();
        let row: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        let column = header
            .iter()
            .position(|cell| *cell == "\"transparency\"")
            .expect("transparency column");
        assert_eq!(row[column], "\"Agree\"");
    }
}
