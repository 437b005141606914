use super::catalog;
use super::normalizer::normalize_slug;
use serde::Serialize;

/// Question input/display kind. The two five-point kinds are the only
/// scoreable ones; everything else is free-form or categorical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    ShortText,
    LongText,
    Date,
    SingleSelect,
    MultiSelect,
    LikertAgree,
    #[serde(rename = "rating_5")]
    Rating5,
}

/// A single question inside a survey section.
///
/// `key` is the stable join key against stored answers; `label` wording has
/// drifted across template edits while keys were largely preserved.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheading: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_number: Option<u32>,
}

/// Ordered group of questions under a human-readable heading.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub questions: Vec<Question>,
}

/// Immutable survey definition, loaded once from the static catalog.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyDefinition {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub sections: Vec<Section>,
}

impl SurveyDefinition {
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
    }

    pub fn question_keys(&self) -> Vec<&'static str> {
        self.questions().map(|question| question.key).collect()
    }

    pub fn has_question(&self, key: &str) -> bool {
        self.questions().any(|question| question.key == key)
    }
}

/// Survey family, inferred from the question-key set or slug.
///
/// The two historical templates each persisted their own self-computed
/// overall percentage under a template-specific field; the family decides
/// which field to read back and which label to report under. New surveys
/// fall into `Generic` and use the single canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyFamily {
    Board,
    Peer,
    Generic,
}

impl SurveyFamily {
    pub fn detect(survey: &SurveyDefinition) -> Self {
        if survey.slug == "board-evaluation"
            || survey.has_question("board_composition_diverse_mix")
            || survey.has_question("vision_strategy")
            || survey.has_question("compliance_legal")
        {
            return Self::Board;
        }
        if survey.slug == "peer-evaluation" {
            return Self::Peer;
        }
        Self::Generic
    }

    /// Answer-map field the overall percentage is persisted under.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Board => "overall_percentage_a",
            Self::Peer => "overall_percentage_b",
            Self::Generic => "overall_percentage",
        }
    }

    pub fn overall_label(self) -> &'static str {
        match self {
            Self::Board => "Overall Percentage A",
            Self::Peer => "Overall Percentage B",
            Self::Generic => "Overall Percentage",
        }
    }
}

/// All registered survey definitions, in catalog order.
pub fn surveys() -> &'static [SurveyDefinition] {
    catalog::surveys()
}

/// Look up a survey by any historical slug variant. Returns `None` rather
/// than erroring so callers can surface a 404-equivalent.
pub fn find_by_slug(raw: &str) -> Option<&'static SurveyDefinition> {
    let wanted = normalize_slug(raw);
    surveys()
        .iter()
        .find(|survey| normalize_slug(survey.slug) == wanted)
}

/// Map a stored slug variant onto the catalog's canonical spelling, or
/// return it unchanged when no definition matches.
pub fn canonical_slug(raw: &str) -> String {
    find_by_slug(raw)
        .map(|survey| survey.slug.to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lookup_tolerates_slug_variants() {
        let direct = find_by_slug("board-evaluation").expect("known survey");
        for variant in ["board_evaluation", "Board-Evaluation", " BOARDEVALUATION "] {
            let found = find_by_slug(variant).expect("variant resolves");
            assert_eq!(found.slug, direct.slug);
        }
        assert!(find_by_slug("quarterly-review").is_none());
    }

    #[test]
    fn canonical_slug_passes_unknown_values_through() {
        assert_eq!(canonical_slug("peer_evaluation"), "peer-evaluation");
        assert_eq!(canonical_slug("mystery-survey"), "mystery-survey");
    }

    #[test]
    fn question_keys_are_unique_within_each_survey() {
        for survey in surveys() {
            let mut seen = HashSet::new();
            for question in survey.questions() {
                assert!(
                    seen.insert(question.key),
                    "duplicate key {} in {}",
                    question.key,
                    survey.slug
                );
            }
        }
    }

    #[test]
    fn family_detection_covers_both_templates() {
        let board = find_by_slug("board-evaluation").expect("board survey");
        let peer = find_by_slug("peer-evaluation").expect("peer survey");
        assert_eq!(SurveyFamily::detect(board), SurveyFamily::Board);
        assert_eq!(SurveyFamily::detect(peer), SurveyFamily::Peer);
        assert_eq!(
            SurveyFamily::Board.storage_key(),
            "overall_percentage_a"
        );
        assert_eq!(SurveyFamily::Peer.storage_key(), "overall_percentage_b");
        assert_eq!(SurveyFamily::Generic.storage_key(), "overall_percentage");
    }
}
