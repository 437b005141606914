//! Survey schema registry, submission reconciliation, scoring, and the
//! admin reporting surface.

pub mod analysis;
pub mod answers;
pub mod catalog;
pub mod export;
pub mod mapping;
pub mod normalizer;
pub mod registry;
pub mod router;
pub mod scoring;
pub mod service;
pub(crate) mod sources;
pub mod store;

pub use analysis::{BandCount, SurveyAnalysis};
pub use answers::{extract_answers, AnswerMap, AnswerValue};
pub use normalizer::normalize_slug;
pub use registry::{Question, QuestionType, Section, SurveyDefinition, SurveyFamily};
pub use router::survey_router;
pub use scoring::{PerformanceBand, ScoreResult, SectionAverage};
pub use service::{
    CsvExport, OverviewReport, ReportError, ResultsReport, SubmissionDetailReport,
    SurveyReportService,
};
pub use store::{
    Role, SessionAuthority, SessionUser, StoreError, SubmissionRecord, SubmissionStore,
    SubmissionUser,
};
