use clap::Args;
use melma_audit::audit::{export, EvaluationRecord, EvaluationSession, GeminiJudge, Rubric};
use melma_audit::config::AppConfig;
use melma_audit::error::AppError;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Name of the audited model, recorded alongside the verdict
    #[arg(long)]
    model: String,
    /// File holding the clinical case scenario
    #[arg(long)]
    scenario: PathBuf,
    /// File holding the model answer under audit
    #[arg(long)]
    answer: PathBuf,
    /// File holding the raw judge response to score
    #[arg(long)]
    response: PathBuf,
    /// Include the itemized Q1-Q30 listing in the output
    #[arg(long)]
    list_items: bool,
    /// Optional CSV destination for the evaluation log
    #[arg(long)]
    csv_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ReviewArgs {
    /// Name of the audited model, recorded alongside the verdict
    #[arg(long)]
    model: String,
    /// File holding the clinical case scenario
    #[arg(long)]
    scenario: PathBuf,
    /// File holding the model answer under audit
    #[arg(long)]
    answer: PathBuf,
    /// Include the itemized Q1-Q30 listing in the output
    #[arg(long)]
    list_items: bool,
    /// Optional CSV destination for the evaluation log
    #[arg(long)]
    csv_out: Option<PathBuf>,
}

/// Score a judge response that was fetched earlier and saved to disk.
pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let scenario = fs::read_to_string(&args.scenario)?;
    let answer = fs::read_to_string(&args.answer)?;
    let raw_response = fs::read_to_string(&args.response)?;

    let mut session = EvaluationSession::new(Rubric::standard());
    let record = session.evaluate(&args.model, &scenario, &answer, &raw_response)?;

    render_report(&record, &session, args.list_items);
    write_csv_if_requested(args.csv_out, &session)
}

/// Fetch a fresh judgement from the configured judge model, then score it.
pub(crate) async fn run_review(args: ReviewArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let judge = GeminiJudge::from_config(&config.judge)?;

    let scenario = fs::read_to_string(&args.scenario)?;
    let answer = fs::read_to_string(&args.answer)?;

    let mut session = EvaluationSession::new(Rubric::standard());
    let record = session
        .evaluate_remote(&judge, &args.model, &scenario, &answer)
        .await?;

    render_report(&record, &session, args.list_items);
    write_csv_if_requested(args.csv_out, &session)
}

fn write_csv_if_requested(
    path: Option<PathBuf>,
    session: &EvaluationSession,
) -> Result<(), AppError> {
    if let Some(path) = path {
        let file = fs::File::create(path)?;
        export::write_csv(file, session.snapshot())?;
    }
    Ok(())
}

fn safety_gate_verdict(flagged: bool) -> &'static str {
    if flagged {
        "FAIL"
    } else {
        "PASS"
    }
}

fn render_report(record: &EvaluationRecord, session: &EvaluationSession, list_items: bool) {
    let view = record.to_view(session.rubric());

    println!("MELMA-W audit report");
    println!(
        "Model: {} (evaluated {})",
        view.model_name,
        view.evaluated_at.format("%Y-%m-%d %H:%M UTC")
    );

    println!(
        "\nVerdict: {} - {} ({:.1}%)",
        view.classification.code, view.classification.label, view.composite_percentage
    );
    println!("Safety gate: {}", safety_gate_verdict(view.safety_flag));

    println!("\nDomain breakdown");
    for domain in &view.domain_scores {
        println!("- {}: {:.0}%", domain.domain_label, domain.percentage);
    }

    println!("\nScore statistics");
    println!(
        "- mean {:.2} / 5.0, std dev {:.3}, range {}..{}",
        view.statistics.mean, view.statistics.std_dev, view.statistics.min, view.statistics.max
    );

    if !view.summary.is_empty() {
        println!("\nConsultant summary");
        println!("{}", view.summary);
    }

    if list_items {
        println!("\nItemized scores (Q1-Q30)");
        for item in &view.item_scores {
            println!("- {} | {} | {}", item.key, item.label, item.score);
        }
    }
}
