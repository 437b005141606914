//! Canonical section mapping for the board evaluation template.
//!
//! Section titles, letters, and question numbering drifted across schema
//! edits while question keys were largely preserved. The tables here
//! re-derive a stable A-H grouping from the keys alone, with a
//! numeric-range fallback on the resolved display number for keys the
//! tables do not know.

use super::registry::{Question, Section, SurveyDefinition, SurveyFamily};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical board section letters, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoardSection {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl BoardSection {
    pub fn ordered() -> [BoardSection; 8] {
        [
            BoardSection::A,
            BoardSection::B,
            BoardSection::C,
            BoardSection::D,
            BoardSection::E,
            BoardSection::F,
            BoardSection::G,
            BoardSection::H,
        ]
    }

    pub fn title(self) -> &'static str {
        match self {
            BoardSection::A => "Section A: Governance Framework",
            BoardSection::B => "Section B: Board Processes",
            BoardSection::C => "Section C: Performance Review",
            BoardSection::D => "Section D: Communication and Reporting",
            BoardSection::E => "Section E: Stakeholder Engagement",
            BoardSection::F => "Section F: Strategic Oversight",
            BoardSection::G => "Section G: Compliance & Risk Management",
            BoardSection::H => "Section H: Recommendations",
        }
    }
}

/// Legacy keys that older payloads carry but the canonical layout hides.
const HIDDEN_BOARD_KEYS: [&str; 2] = ["board_composition_additional_skills", "consensus_suggestion"];

static SECTION_BY_KEY: OnceLock<HashMap<&'static str, BoardSection>> = OnceLock::new();

fn section_by_key() -> &'static HashMap<&'static str, BoardSection> {
    SECTION_BY_KEY.get_or_init(|| {
        const KEYS_BY_SECTION: &[(BoardSection, &[&str])] = &[
            (
                BoardSection::A,
                &[
                    "board_composition_diverse_mix",
                    "board_composition_additional_skills",
                    "board_diversity_reflect",
                    "board_diversity_importance",
                    "board_composition_aligns",
                    "board_guidelines_appointment",
                    "board_size_appropriate",
                    "board_size_effective",
                    "board_understands_roles",
                    "board_induction_training",
                    "chairperson_facilitates",
                    "chairperson_participation",
                    "board_effective_governance",
                    "committees_charters",
                    "committees_understanding",
                    "committees_effective",
                    "committees_report_back",
                    "committees_integrate",
                    "independent_directors_number",
                    "independent_directors_contribute",
                ],
            ),
            (
                BoardSection::B,
                &[
                    "meetings_frequency",
                    "meeting_materials",
                    "agenda_clarity",
                    "attendance_rate",
                    "meeting_effectiveness",
                    "company_secretary_experience",
                    "company_secretary_senior_staff",
                    "company_secretary_assists",
                    "information_flow",
                    "decision_making",
                    "consensus_building",
                    "consensus_suggestion",
                    "conflict_resolution_process",
                    "conflict_resolution_suggestion",
                    "conflict_handling",
                ],
            ),
            (
                BoardSection::C,
                &["board_self_assessment", "director_contribution", "directors_engaged"],
            ),
            (BoardSection::D, &["transparency", "whistleblowing"]),
            (
                BoardSection::E,
                &["stakeholder_interests", "stakeholder_engagement", "management_collaboration"],
            ),
            (
                BoardSection::F,
                &[
                    "vision_strategy",
                    "strategic_oversight",
                    "goal_setting",
                    "succession_plan",
                    "succession_plan_review",
                    "resource_allocation",
                ],
            ),
            (
                BoardSection::G,
                &[
                    "compliance_legal",
                    "risk_management",
                    "governance_framework",
                    "regulatory_knowledge",
                ],
            ),
            (BoardSection::H, &["improvement_areas", "additional_comments"]),
        ];

        let mut map = HashMap::new();
        for (section, keys) in KEYS_BY_SECTION {
            for key in *keys {
                map.insert(*key, *section);
            }
        }
        map
    })
}

static DISPLAY_NUMBER_BY_KEY: OnceLock<HashMap<&'static str, u32>> = OnceLock::new();

fn display_number_by_key() -> &'static HashMap<&'static str, u32> {
    DISPLAY_NUMBER_BY_KEY.get_or_init(|| {
        const NUMBERS: &[(&str, u32)] = &[
            ("board_composition_diverse_mix", 1),
            ("board_diversity_reflect", 2),
            ("board_diversity_importance", 3),
            ("board_composition_aligns", 4),
            ("board_guidelines_appointment", 5),
            ("board_size_appropriate", 6),
            ("board_size_effective", 7),
            ("board_understands_roles", 8),
            ("board_induction_training", 9),
            ("chairperson_facilitates", 10),
            ("chairperson_participation", 11),
            ("board_effective_governance", 12),
            ("committees_charters", 13),
            ("committees_understanding", 14),
            ("committees_effective", 15),
            ("committees_report_back", 16),
            ("committees_integrate", 17),
            ("independent_directors_number", 18),
            ("independent_directors_contribute", 19),
            ("meetings_frequency", 20),
            ("meeting_materials", 21),
            ("agenda_clarity", 22),
            ("attendance_rate", 23),
            ("meeting_effectiveness", 24),
            ("company_secretary_experience", 25),
            ("company_secretary_senior_staff", 26),
            ("company_secretary_assists", 27),
            ("information_flow", 28),
            ("decision_making", 29),
            ("consensus_building", 30),
            ("conflict_resolution_process", 31),
            ("conflict_handling", 32),
            ("board_self_assessment", 33),
            ("director_contribution", 34),
            ("directors_engaged", 35),
            ("transparency", 36),
            ("whistleblowing", 37),
            ("stakeholder_interests", 38),
            ("stakeholder_engagement", 39),
            ("management_collaboration", 40),
            ("vision_strategy", 41),
            ("strategic_oversight", 42),
            ("goal_setting", 43),
            ("succession_plan", 44),
            ("succession_plan_review", 45),
            ("resource_allocation", 46),
            ("compliance_legal", 47),
            ("risk_management", 48),
            ("governance_framework", 49),
            ("regulatory_knowledge", 50),
        ];

        NUMBERS.iter().copied().collect()
    })
}

static SUBHEADING_BY_KEY: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn subheading_by_key() -> &'static HashMap<&'static str, &'static str> {
    SUBHEADING_BY_KEY.get_or_init(|| {
        const SUBHEADINGS: &[(&str, &str)] = &[
            ("board_composition_diverse_mix", "Board Composition"),
            ("board_diversity_reflect", "Board Diversity"),
            ("board_size_appropriate", "Board Structure"),
            (
                "board_understands_roles",
                "Competence (Understanding of Roles and Responsibilities)",
            ),
            ("board_induction_training", "Induction & Training"),
            ("chairperson_facilitates", "Role of Chairperson"),
            ("board_effective_governance", "Overall Effectiveness"),
            ("committees_charters", "Board Committees"),
            ("committees_integrate", "Integration of Committees"),
            ("independent_directors_number", "Independence"),
            ("meetings_frequency", "Frequency"),
            ("meeting_materials", "Preparation"),
            ("agenda_clarity", "Agenda Setting"),
            ("attendance_rate", "Attendance"),
            ("meeting_effectiveness", "Meeting Effectiveness"),
            ("company_secretary_experience", "Company Secretariat"),
            ("information_flow", "Information Flow"),
            ("decision_making", "Decision-Making Process"),
            ("consensus_building", "Consensus Building"),
            ("conflict_resolution_process", "Conflict Resolution"),
            ("board_self_assessment", "Self-Assessment"),
            ("director_contribution", "Individual Directors Assessment"),
            ("transparency", "Transparency"),
            ("whistleblowing", "Feedback/Whistleblowing Mechanism"),
            ("stakeholder_interests", "Stakeholder Interests"),
            ("vision_strategy", "Vision and Strategy"),
            ("strategic_oversight", "Strategic Oversight"),
            ("goal_setting", "Goal Setting"),
            ("succession_plan", "Succession Planning"),
            ("resource_allocation", "Resource Allocation"),
            ("compliance_legal", "Compliance and Risk Management"),
            ("governance_framework", "Governance Framework"),
            ("improvement_areas", "Improvement Areas"),
            ("additional_comments", "Additional Comments"),
        ];

        SUBHEADINGS.iter().copied().collect()
    })
}

/// Section letter for a known question key.
pub fn section_for_key(key: &str) -> Option<BoardSection> {
    section_by_key().get(key).copied()
}

/// Numeric-range fallback: the historical numbering bands questions into
/// letters even when the key itself is unrecognized.
pub fn section_for_number(number: u32) -> BoardSection {
    match number {
        0..=19 => BoardSection::A,
        20..=32 => BoardSection::B,
        33..=35 => BoardSection::C,
        36..=37 => BoardSection::D,
        38..=40 => BoardSection::E,
        41..=46 => BoardSection::F,
        47..=50 => BoardSection::G,
        _ => BoardSection::H,
    }
}

/// Resolve the canonical section for a question: key table first, numeric
/// band second, recommendations bucket last.
pub fn resolve_section(question: &Question, resolved_number: Option<u32>) -> BoardSection {
    if let Some(section) = section_for_key(question.key) {
        return section;
    }
    match resolved_number {
        Some(number) => section_for_number(number),
        None => BoardSection::H,
    }
}

pub fn display_number_for_key(key: &str) -> Option<u32> {
    display_number_by_key().get(key).copied()
}

/// Effective sub-grouping label for a board question. The definition's own
/// subheading wins; the key table repairs payloads that lost theirs; the
/// first question falls back to the opening label even under a foreign key.
pub fn board_subheading(question: &Question, resolved_number: Option<u32>) -> Option<&'static str> {
    if question.key == "risk_management" {
        return None;
    }
    if let Some(subheading) = question.subheading {
        return Some(subheading);
    }
    if let Some(subheading) = subheading_by_key().get(question.key) {
        return Some(subheading);
    }
    if question.display_number == Some(1)
        || resolved_number == Some(1)
        || question
            .label
            .to_ascii_lowercase()
            .contains("diverse mix of skills and experiences")
    {
        return Some("Board Composition");
    }
    None
}

/// Regroup a survey definition into its canonical section layout.
///
/// Board-family definitions are flattened, renumbered, and regrouped into
/// the stable A-H letters; peer-family definitions get their respondent
/// context title repaired; anything else passes through untouched.
pub fn canonical_sections(survey: &SurveyDefinition) -> Vec<Section> {
    match SurveyFamily::detect(survey) {
        SurveyFamily::Board => board_sections(survey),
        SurveyFamily::Peer => peer_sections(survey),
        SurveyFamily::Generic => survey.sections.clone(),
    }
}

fn board_sections(survey: &SurveyDefinition) -> Vec<Section> {
    let mut flattened: Vec<(usize, usize, &Question, Option<u32>)> = Vec::new();
    for (section_index, section) in survey.sections.iter().enumerate() {
        for (question_index, question) in section.questions.iter().enumerate() {
            let resolved = question
                .display_number
                .or_else(|| display_number_for_key(question.key));
            flattened.push((section_index, question_index, question, resolved));
        }
    }

    flattened.sort_by_key(|(section_index, question_index, _, resolved)| {
        (resolved.unwrap_or(u32::MAX), *section_index, *question_index)
    });

    let mut grouped: HashMap<BoardSection, Vec<Question>> = HashMap::new();
    for (_, _, question, resolved) in flattened {
        if HIDDEN_BOARD_KEYS.contains(&question.key) {
            continue;
        }
        let letter = resolve_section(question, resolved);
        let mut question = question.clone();
        question.display_number = resolved;
        question.subheading = board_subheading(&question, resolved);
        grouped.entry(letter).or_default().push(question);
    }

    BoardSection::ordered()
        .into_iter()
        .filter_map(|letter| {
            let questions = grouped.remove(&letter)?;
            if questions.is_empty() {
                return None;
            }
            Some(Section {
                title: letter.title(),
                description: None,
                questions,
            })
        })
        .collect()
}

fn peer_sections(survey: &SurveyDefinition) -> Vec<Section> {
    survey
        .sections
        .iter()
        .map(|section| {
            let mut section = section.clone();
            let has_context_keys = section
                .questions
                .iter()
                .any(|q| q.key == "evaluation_date" || q.key == "director_being_evaluated");
            if has_context_keys {
                section.title = "Section A - Respondent Context";
            }
            section
        })
        .collect()
}
