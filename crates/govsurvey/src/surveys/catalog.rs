//! Static survey catalog. Definitions are configuration: built once, never
//! mutated. Two production templates are registered, the board evaluation
//! questionnaire and the directors' peer-to-peer evaluation.

use super::registry::{Question, QuestionType, Section, SurveyDefinition};
use std::sync::OnceLock;

pub(crate) const AGREE_OPTIONS: [&str; 5] = [
    "Strongly Agree",
    "Agree",
    "Neutral",
    "Disagree",
    "Strongly Disagree",
];

pub(crate) const RATING_OPTIONS: [&str; 5] = ["1", "2", "3", "4", "5"];

static SURVEYS: OnceLock<Vec<SurveyDefinition>> = OnceLock::new();

pub(crate) fn surveys() -> &'static [SurveyDefinition] {
    SURVEYS
        .get_or_init(|| vec![board_evaluation(), peer_evaluation()])
        .as_slice()
}

fn likert(key: &'static str, label: &'static str, number: u32) -> Question {
    Question {
        key,
        label,
        question_type: QuestionType::LikertAgree,
        required: true,
        options: AGREE_OPTIONS.to_vec(),
        subheading: None,
        display_number: Some(number),
    }
}

fn likert_under(
    key: &'static str,
    label: &'static str,
    number: u32,
    subheading: &'static str,
) -> Question {
    Question {
        subheading: Some(subheading),
        ..likert(key, label, number)
    }
}

fn long_text(key: &'static str, label: &'static str) -> Question {
    Question {
        key,
        label,
        question_type: QuestionType::LongText,
        required: false,
        options: Vec::new(),
        subheading: None,
        display_number: None,
    }
}

fn rating(key: &'static str, label: &'static str) -> Question {
    Question {
        key,
        label,
        question_type: QuestionType::Rating5,
        required: true,
        options: RATING_OPTIONS.to_vec(),
        subheading: None,
        display_number: None,
    }
}

fn strength(key: &'static str, label: &'static str) -> Question {
    Question {
        required: false,
        ..rating(key, label)
    }
}

fn board_evaluation() -> SurveyDefinition {
    SurveyDefinition {
        slug: "board-evaluation",
        title: "Board Evaluation Questionnaire",
        description: "Assess board composition, governance framework, processes, and strategic oversight.",
        sections: vec![
            Section {
                title: "Section A: Governance Framework",
                description: None,
                questions: vec![
                    likert_under(
                        "board_composition_diverse_mix",
                        "Does the board possess a diverse mix of skills and experiences (i.e. the necessary expertise and diversity to effectively oversee the organisation)?",
                        1,
                        "Board Composition",
                    ),
                    likert_under(
                        "board_diversity_reflect",
                        "Do you agree that the board reflect a diversity of gender, ethnicity, perspectives, experiences and backgrounds?",
                        2,
                        "Board Diversity",
                    ),
                    likert(
                        "board_diversity_importance",
                        "Diversity is important to the board's strategic goals.",
                        3,
                    ),
                    likert(
                        "board_composition_aligns",
                        "Does the current composition aligns with the skills and expertise needed for effective governance?",
                        4,
                    ),
                    likert(
                        "board_guidelines_appointment",
                        "There are clear guidelines for the appointment and removal of board members.",
                        5,
                    ),
                    likert_under(
                        "board_size_appropriate",
                        "The current size of the board is appropriate in relation to the complexity of the organization.",
                        6,
                        "Board Structure",
                    ),
                    likert(
                        "board_size_effective",
                        "The board's size allows for effective decision-making and diverse viewpoints.",
                        7,
                    ),
                    likert_under(
                        "board_understands_roles",
                        "The board understands its roles and responsibilities.",
                        8,
                        "Competence (Understanding of Roles and Responsibilities)",
                    ),
                    likert_under(
                        "board_induction_training",
                        "Board members undergo induction and are provided with ongoing training and development opportunities.",
                        9,
                        "Induction & Training",
                    ),
                    likert_under(
                        "chairperson_facilitates",
                        "The chairperson effectively facilitates board meetings and discussions.",
                        10,
                        "Role of Chairperson",
                    ),
                    likert(
                        "chairperson_participation",
                        "The chairperson encourages active participation from all board members.",
                        11,
                    ),
                    likert_under(
                        "board_effective_governance",
                        "The board is effective in fulfilling its governance responsibilities.",
                        12,
                        "Overall Effectiveness",
                    ),
                    likert_under(
                        "committees_charters",
                        "Board Committees have their respective Committee Charters, which provide guidance on their structure, functions, authority and duties in line with Principle 11.1.3 of the NCCG.",
                        13,
                        "Board Committees",
                    ),
                    likert(
                        "committees_understanding",
                        "Board members adequately understand the roles and responsibilities of each committee.",
                        14,
                    ),
                    likert("committees_effective", "Board committees function effectively.", 15),
                    likert(
                        "committees_report_back",
                        "Committees frequently report back to the full board.",
                        16,
                    ),
                    likert_under(
                        "committees_integrate",
                        "Board committees effectively integrate with the overall board structure and decision-making processes.",
                        17,
                        "Integration of Committees",
                    ),
                    likert_under(
                        "independent_directors_number",
                        "The board has an adequate number of independent directors.",
                        18,
                        "Independence",
                    ),
                    likert(
                        "independent_directors_contribute",
                        "Independent directors contribute to board effectiveness to a large extent.",
                        19,
                    ),
                ],
            },
            Section {
                title: "Section B: Board Processes",
                description: None,
                questions: vec![
                    likert_under(
                        "meetings_frequency",
                        "Meetings are held regularly and at appropriate intervals.",
                        20,
                        "Frequency",
                    ),
                    likert_under(
                        "meeting_materials",
                        "Board members receive meeting materials in advance to prepare adequately.",
                        21,
                        "Preparation",
                    ),
                    likert_under(
                        "agenda_clarity",
                        "Meeting agendas are clear, relevant, and strategically focused.",
                        22,
                        "Agenda Setting",
                    ),
                    likert_under(
                        "attendance_rate",
                        "The attendance rate of board members at meetings is always good.",
                        23,
                        "Attendance",
                    ),
                    likert_under(
                        "meeting_effectiveness",
                        "Board meetings are scheduled timely and conducted efficiently.",
                        24,
                        "Meeting Effectiveness",
                    ),
                    likert_under(
                        "company_secretary_experience",
                        "The Company Secretary also possesses requisite experience and qualifications to effectively carry out assigned duties, in line with Principle 8.1 of the NCCG.",
                        25,
                        "Company Secretariat",
                    ),
                    likert(
                        "company_secretary_senior_staff",
                        "The Company Secretary is a Senior Management staff of the Company as required by Principle 8.2 of the NCCG.",
                        26,
                    ),
                    likert(
                        "company_secretary_assists",
                        "In line with Principle 8.6.3 of the NCCG, the Company Secretary assists the Chairman and the MD/CEO in coordinating the activities of the Board.",
                        27,
                    ),
                    likert_under(
                        "information_flow",
                        "Relevant information is provided to the board in a timely manner.",
                        28,
                        "Information Flow",
                    ),
                    likert_under(
                        "decision_making",
                        "Decisions are made clearly and communicated to relevant stakeholders timely and appropriately.",
                        29,
                        "Decision-Making Process",
                    ),
                    likert_under(
                        "consensus_building",
                        "There is a process for fostering participation and consensus in decision making.",
                        30,
                        "Consensus Building",
                    ),
                    likert_under(
                        "conflict_resolution_process",
                        "There a clear process for addressing conflicts of interest.",
                        31,
                        "Conflict Resolution",
                    ),
                    long_text(
                        "conflict_resolution_suggestion",
                        "If not, suggest a possible process for addressing conflicts of interests.",
                    ),
                    likert(
                        "conflict_handling",
                        "The board handles conflicts or disagreements, if any, effectively.",
                        32,
                    ),
                ],
            },
            Section {
                title: "Section C: Performance Review",
                description: None,
                questions: vec![
                    likert_under(
                        "board_self_assessment",
                        "The board frequently reviews its own performance and effectiveness.",
                        33,
                        "Self-Assessment",
                    ),
                    likert_under(
                        "director_contribution",
                        "Each director contributes effectively to board discussions and decision-making.",
                        34,
                        "Individual Directors Assessment",
                    ),
                    likert(
                        "directors_engaged",
                        "Directors are engaged and active participants in meetings.",
                        35,
                    ),
                ],
            },
            Section {
                title: "Section D: Communication and Reporting",
                description: None,
                questions: vec![
                    likert_under(
                        "transparency",
                        "Board activities and decisions are transparent to stakeholders.",
                        36,
                        "Transparency",
                    ),
                    likert_under(
                        "whistleblowing",
                        "There is a structured process for whistleblowing/providing feedback to board members.",
                        37,
                        "Feedback/Whistleblowing Mechanism",
                    ),
                ],
            },
            Section {
                title: "Section E: Stakeholder Engagement",
                description: None,
                questions: vec![
                    likert_under(
                        "stakeholder_interests",
                        "The board considers stakeholders' interests in decision-making.",
                        38,
                        "Stakeholder Interests",
                    ),
                    likert(
                        "stakeholder_engagement",
                        "The board engages well with shareholders and other stakeholders to gather insights and feedback.",
                        39,
                    ),
                    likert(
                        "management_collaboration",
                        "The board communicates and collaborates well and effectively with executive management.",
                        40,
                    ),
                ],
            },
            Section {
                title: "Section F: Strategic Oversight",
                description: None,
                questions: vec![
                    likert_under(
                        "vision_strategy",
                        "The board sets a clear and compelling vision for the organization.",
                        41,
                        "Vision and Strategy",
                    ),
                    likert_under(
                        "strategic_oversight",
                        "The board effectively manages and oversees the organisation's strategic direction.",
                        42,
                        "Strategic Oversight",
                    ),
                    likert_under(
                        "goal_setting",
                        "There are clear goals and objectives set for the board and its committees.",
                        43,
                        "Goal Setting",
                    ),
                    likert_under(
                        "succession_plan",
                        "The board has a formal succession plan for key positions.",
                        44,
                        "Succession Planning",
                    ),
                    likert(
                        "succession_plan_review",
                        "The board reviews and updates this succession plan regularly.",
                        45,
                    ),
                    likert_under(
                        "resource_allocation",
                        "The board reviews and approves resource allocation to support its strategic goals.",
                        46,
                        "Resource Allocation",
                    ),
                ],
            },
            Section {
                title: "Section G: Compliance & Risk Management",
                description: None,
                questions: vec![
                    likert_under(
                        "compliance_legal",
                        "The board effectively and routinely ensures compliance with regulatory and legal requirements.",
                        47,
                        "Compliance and Risk Management",
                    ),
                    likert_under(
                        "risk_management",
                        "The board effectively oversees the company's risk management processes and policies.",
                        48,
                        "Regulatory Compliance",
                    ),
                    likert_under(
                        "governance_framework",
                        "The governance framework are well aligned with best practices and regulatory requirements.",
                        49,
                        "Governance Framework",
                    ),
                    likert(
                        "regulatory_knowledge",
                        "The board is knowledgeable about relevant laws and regulations affecting the organisation.",
                        50,
                    ),
                ],
            },
            Section {
                title: "Section H: Recommendations",
                description: None,
                questions: vec![
                    Question {
                        subheading: Some("Improvement Areas"),
                        ..long_text(
                            "improvement_areas",
                            "What areas of the company's board governance could be improved?",
                        )
                    },
                    Question {
                        subheading: Some("Additional Comments"),
                        ..long_text("additional_comments", "Any other comments or suggestions?")
                    },
                ],
            },
        ],
    }
}

fn peer_evaluation() -> SurveyDefinition {
    SurveyDefinition {
        slug: "peer-evaluation",
        title: "Directors' Peer-to-Peer Evaluation Questionnaire",
        description: "Assess individual director effectiveness against corporate governance standards.",
        sections: vec![
            Section {
                title: "Section A - Respondent Context",
                description: None,
                questions: vec![
                    Question {
                        key: "evaluation_date",
                        label: "Date",
                        question_type: QuestionType::Date,
                        required: true,
                        options: Vec::new(),
                        subheading: None,
                        display_number: None,
                    },
                    Question {
                        key: "director_being_evaluated",
                        label: "Director Being Evaluated",
                        question_type: QuestionType::SingleSelect,
                        required: true,
                        options: vec![
                            "Mr. Samuel Durojaye (Chairman)",
                            "Mrs. Oluyemisi Dawodu",
                            "Dr. Remilekun Bakare",
                            "Mr. Adesina Towolawi",
                            "Mr. Otunba Adewale Jubril",
                            "Esv. Akinwale Ojo",
                            "Arc. Abiodun Fari-Arole",
                            "Mrs. Ronke Akinleye",
                            "Mr. Rotimi Olashore",
                            "Mr. Olawale Osisanya",
                        ],
                        subheading: None,
                        display_number: Some(1),
                    },
                    Question {
                        key: "committee_worked_with",
                        label: "Committee(s) worked with this Director",
                        question_type: QuestionType::ShortText,
                        required: false,
                        options: Vec::new(),
                        subheading: None,
                        display_number: None,
                    },
                    Question {
                        key: "years_interacting",
                        label: "Years interacting with this Director",
                        question_type: QuestionType::SingleSelect,
                        required: false,
                        options: vec!["<1", "1-3", "3-5", ">5"],
                        subheading: None,
                        display_number: Some(2),
                    },
                ],
            },
            Section {
                title: "SECTION B - BOARD EFFECTIVENESS & RESPONSIBILITIES",
                description: Some("(Reflects board duties, including oversight, strategy and governance)"),
                questions: vec![
                    rating("b1_prepared", "Comes prepared, understanding agenda items and reports."),
                    rating("b2_contributes_strategy", "Actively contributes to strategic discussions."),
                    rating(
                        "b3_understands_risks",
                        "Demonstrates deep understanding of mortgage banking risks and business issues.",
                    ),
                    rating(
                        "b4_sustainability",
                        "Ensures decisions consider long-term sustainability, risk, and regulatory compliance.",
                    ),
                    rating(
                        "b5_regulatory_knowledge",
                        "Demonstrates knowledge of applicable laws, policies, and CBN governance expectations.",
                    ),
                    long_text("b_optional_comments", "Optional Comments: _________________"),
                ],
            },
            Section {
                title: "SECTION C - GOVERNANCE, RISK & COMPLIANCE OVERSIGHT",
                description: None,
                questions: vec![
                    rating(
                        "c1_risk_controls",
                        "Provides robust oversight of risk management and internal controls",
                    ),
                    rating(
                        "c2_compliance_culture",
                        "Supports a strong culture of compliance and ethical standards",
                    ),
                    rating(
                        "c3_compliance_discussions",
                        "Engages constructively in compliance discussions and risk mitigation",
                    ),
                    rating(
                        "c4_balance_oversight",
                        "Promotes a balance between oversight and respect for management's role",
                    ),
                    rating(
                        "c5_risk_controls_repeat",
                        "Provides robust oversight of risk management and internal controls",
                    ),
                    long_text("c_optional_comments", "Optional Comments: _________________"),
                ],
            },
            Section {
                title: "SECTION D - INDEPENDENCE, INTEGRITY & COLLISION AVOIDANCE",
                description: Some(
                    "(Reflects expectations on director independence, integrity, and effective governance behaviour)",
                ),
                questions: vec![
                    rating("d1_independence", "Demonstrates independence of thought and judgement"),
                    rating(
                        "d2_integrity",
                        "Upholds integrity in all interactions with Board & stakeholders",
                    ),
                    rating("d3_conflicts", "Manages conflicts of interest effectively"),
                    rating("d4_confidentiality", "Respects confidentiality and Board protocols"),
                    rating(
                        "d5_independence_repeat",
                        "Demonstrates independence of thought and judgement",
                    ),
                    long_text("d_optional_comments", "Optional Comments: _________________"),
                ],
            },
            Section {
                title: "SECTION E - ENGAGEMENT & TEAM DYNAMICS",
                description: Some(
                    "(Behavioral aspects key to effective boards, as reinforced in governance practice)",
                ),
                questions: vec![
                    rating("e1_collaboration", "Works collaboratively with fellow directors"),
                    rating(
                        "e2_challenges",
                        "Challenges ideas constructively without undermining consensus",
                    ),
                    rating(
                        "e3_adds_value",
                        "Adds value to discussions during committee and plenary sessions",
                    ),
                    long_text("e_optional_comments", "Optional Comments: _________________"),
                ],
            },
            Section {
                title: "SECTION F - MANAGEMENT ENGAGEMENT & OVERSIGHT",
                description: Some("(Aligned with governance but respects management's role)"),
                questions: vec![
                    rating(
                        "f1_accountable",
                        "Holds management accountable for performance and compliance",
                    ),
                    rating(
                        "f2_supports_management",
                        "Supports management with insight without micromanaging",
                    ),
                    rating(
                        "f3_constructive_feedback",
                        "Provides constructive feedback for improvement",
                    ),
                    long_text("f_optional_comments", "Optional Comments: _________________"),
                ],
            },
            Section {
                title: "SECTION G - OVERALL PERFORMANCE & REAPPOINTMENT",
                description: Some("(For cumulative assessment)"),
                questions: vec![
                    Question {
                        subheading: Some("1. Key strengths:"),
                        ..strength("g_strengths_strategic_vision", "1a Strategic vision")
                    },
                    strength("g_strengths_long_term_thinking", "1b Long term thinking"),
                    strength("g_strengths_adaptability", "1c Adaptability"),
                    strength("g_strengths_financial_literacy", "2a Financial literacy"),
                    strength("g_strengths_financial_metrics", "2b Understands financial metrics"),
                    strength("g_strengths_budget_oversight", "2c Budget oversight"),
                    strength("g_strengths_governance_compliance", "3a Governance & Compliance"),
                    strength("g_strengths_regulatory_knowledge", "3b Regulatory knowledge"),
                    strength("g_strengths_risk_management", "3c Risk Management"),
                    strength("g_strengths_leadership", "4a Leadership & Influence"),
                    strength("g_strengths_communication", "4b Effective Communication"),
                    strength("g_strengths_team_player", "4c Team Player"),
                    strength("g_strengths_decision_making", "5a Decision Making"),
                    strength("g_strengths_data_driven", "5b Data-driven approach"),
                    strength("g_strengths_judgement", "5c Judgement & insight"),
                    strength("g_strengths_stakeholder_engagement", "6a Stakeholder Engagement"),
                    strength("g_strengths_relationship_management", "6b Relationship management"),
                    strength("g_strengths_listening_skills", "6c Listening skills"),
                    strength("g_strengths_innovation", "7a Innovation & Change Management"),
                    strength("g_strengths_fostering_innovation", "7b Fostering innovation"),
                    strength("g_strengths_change_adaptability", "7c Change adaptability"),
                    strength("g_strengths_accountability", "8a Accountability & Integrity"),
                    strength("g_strengths_ethical_leadership", "8b Ethical leadership"),
                    strength("g_strengths_responsiveness", "8c Responsiveness"),
                    strength("g_strengths_continuous_learning", "9a Continuous Learning"),
                    strength("g_strengths_commitment_development", "9b Commitment to development"),
                    strength("g_strengths_embraces_feedback", "9c Embraces feedback"),
                    long_text("g_development_areas", "2. Suggest areas for development:"),
                    Question {
                        key: "g_overall_rating",
                        label: "3. Overall performance rating:",
                        question_type: QuestionType::SingleSelect,
                        required: false,
                        options: vec!["Poor", "Fair", "Good", "Very Good", "Excellent"],
                        subheading: None,
                        display_number: None,
                    },
                    Question {
                        key: "g_reappoint",
                        label: "4. Recommend re-appointment?",
                        question_type: QuestionType::SingleSelect,
                        required: false,
                        options: vec!["Yes", "Yes with development support", "No"],
                        subheading: None,
                        display_number: None,
                    },
                    long_text("g_optional_comments", "Optional Comments: _________________"),
                ],
            },
            Section {
                title: "SECTION H - DEVELOPMENT & TRAINING NEEDS",
                description: Some("(Training areas that promote compliance and board effectiveness)"),
                questions: vec![Question {
                    key: "h_training_needs",
                    label: "Please tick any recommended areas for this Director",
                    question_type: QuestionType::MultiSelect,
                    required: false,
                    options: vec![
                        "Regulatory updates & CBN governance expectations",
                        "Risk & compliance management",
                        "Advanced mortgage portfolio oversight",
                        "Board leadership & governance best practices",
                        "Digital transformation and cyber security oversight",
                    ],
                    subheading: None,
                    display_number: None,
                }],
            },
        ],
    }
}
