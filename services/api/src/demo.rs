use crate::infra::{seed_submissions, InMemorySubmissionStore};
use clap::Args;
use govsurvey::error::AppError;
use govsurvey::surveys::{registry, SubmissionRecord, SubmissionStore, SurveyReportService};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ResultsReportArgs {
    /// Survey slug to analyze (any historical variant resolves)
    #[arg(long)]
    pub(crate) survey: String,
    /// JSON file of submissions to load instead of the built-in samples
    #[arg(long)]
    pub(crate) submissions: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional JSON file of additional submissions to ingest
    #[arg(long)]
    pub(crate) submissions: Option<PathBuf>,
}

fn load_submissions(path: &Path, store: &InMemorySubmissionStore) -> Result<usize, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let payload: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|err| std::io::Error::new(ErrorKind::InvalidData, err))?;

    let records = SubmissionRecord::batch_from_value(&payload);
    let loaded = records.len();
    for record in records {
        if let Err(err) = store.insert(record) {
            println!("  Skipping submission: {err}");
        }
    }
    Ok(loaded)
}

fn render_analysis(service: &SurveyReportService<InMemorySubmissionStore>, slug: &str) -> Result<(), AppError> {
    let report = service.results(slug)?;
    let analysis = &report.analysis;

    println!("\n{} ({})", report.survey.title, report.survey.slug);
    println!("- {} submission(s) on record", report.submissions.len());
    if analysis.scored_submission_count == 0 {
        println!("- No scoreable responses yet");
        return Ok(());
    }

    println!(
        "- {} mean score: {:.1}% across {} scored submission(s)",
        analysis.overall_label, analysis.overall_average_percentage, analysis.scored_submission_count
    );
    println!("- Distribution:");
    for slice in &analysis.distribution {
        println!("    {}: {}", slice.label, slice.count);
    }
    println!("- Section averages:");
    for section in &analysis.section_averages {
        println!(
            "    {} -> {:.1}% ({} response(s))",
            section.section_title, section.percentage, section.responses
        );
    }
    Ok(())
}

pub(crate) fn run_results_report(args: ResultsReportArgs) -> Result<(), AppError> {
    let ResultsReportArgs { survey, submissions } = args;

    let store = InMemorySubmissionStore::default();
    match submissions {
        Some(path) => {
            let loaded = load_submissions(&path, &store)?;
            println!("Loaded {loaded} submission(s) from file");
        }
        None => {
            let seeded = seed_submissions(&store).map_err(|err| {
                std::io::Error::new(ErrorKind::Other, err.to_string())
            })?;
            println!("Seeded {seeded} sample submission(s)");
        }
    }

    let service = SurveyReportService::new(Arc::new(store));
    render_analysis(&service, &survey)
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { submissions } = args;

    println!("Governance survey reporting demo");
    let store = InMemorySubmissionStore::default();
    let seeded = seed_submissions(&store)
        .map_err(|err| std::io::Error::new(ErrorKind::Other, err.to_string()))?;
    println!("- Seeded {seeded} sample submission(s)");

    if let Some(path) = submissions {
        let loaded = load_submissions(&path, &store)?;
        println!("- Ingested {loaded} submission(s) from {}", path.display());
    }

    let service = SurveyReportService::new(Arc::new(store));

    let overview = service.overview(None).await?;
    println!("\nOverview");
    for survey in &overview.surveys {
        let count = overview
            .counts_by_survey_slug
            .get(survey.slug)
            .copied()
            .unwrap_or(0);
        println!("- {} -> {} submission(s)", survey.title, count);
    }
    if overview.partial {
        println!("- Counts are partial; at least one source was unreachable");
    }
    println!("Recent activity:");
    for submission in overview.recent_submissions.iter().take(5) {
        println!(
            "- {} | {} | {}",
            submission.created_at.format("%Y-%m-%d"),
            submission.survey_slug,
            submission
                .user
                .as_ref()
                .map(|user| user.email.as_str())
                .unwrap_or("unknown"),
        );
    }

    for survey in registry::surveys() {
        render_analysis(&service, survey.slug)?;
    }

    Ok(())
}
