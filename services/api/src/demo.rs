use crate::infra::{build_orchestrator, preview, IntakeOrchestrator};
use crate::samples;
use clap::Args;
use cv_intake::config::{AppConfig, IntakeConfig, SinkKind};
use cv_intake::error::AppError;
use cv_intake::pipeline::{
    CandidateField, CandidateRecord, FileAttachment, ProcessingResult, Submission,
};
use cv_intake::telemetry;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ProcessArgs {
    /// Resume file to attach (.txt, .pdf, .docx); repeat for several.
    #[arg(
        long = "file",
        value_name = "PATH",
        required_unless_present = "texts"
    )]
    pub(crate) files: Vec<PathBuf>,
    /// Text file whose contents are sent as the message body
    #[arg(long = "text", value_name = "PATH")]
    pub(crate) texts: Vec<PathBuf>,
    /// Sender ID recorded on every submission
    #[arg(long, default_value = "cli")]
    pub(crate) sender_id: String,
    /// Sender name recorded on every submission
    #[arg(long, default_value = "Local Upload")]
    pub(crate) sender_name: String,
    /// Write summary, candidates, and processing log as JSON
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Override INTAKE_TARGET_ID for this run
    #[arg(long)]
    pub(crate) target_id: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Directory where the sample attachment is written
    #[arg(long, default_value = "sample_resumes")]
    pub(crate) samples_dir: PathBuf,
    /// Destination for the exported results
    #[arg(long, default_value = "demo_results.json")]
    pub(crate) export: PathBuf,
}

pub(crate) fn run_process(args: ProcessArgs) -> Result<(), AppError> {
    let ProcessArgs {
        files,
        texts,
        sender_id,
        sender_name,
        export,
        target_id,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let orchestrator = build_orchestrator(&config.intake);
    let target_id = target_id.unwrap_or_else(|| config.intake.target_id.clone());
    orchestrator.initialize_sink(&target_id)?;
    println!("Delivering rows to {}", orchestrator.sink().describe());

    for path in files {
        let message = format!("Resume attached: {}", path.display());
        let attachment = FileAttachment::new(path, None);
        orchestrator.receive(Submission::new(
            &sender_id,
            &sender_name,
            message,
            Some(attachment),
        )?);
    }
    for path in texts {
        let body = fs::read_to_string(&path)?;
        orchestrator.receive(Submission::new(&sender_id, &sender_name, body, None)?);
    }

    let results = orchestrator.drain_queue();
    render_candidates(&orchestrator.candidates());
    render_summary(&orchestrator);
    render_processing_log(&results);

    if let Some(path) = export {
        orchestrator.export(&path)?;
        println!("\nResults exported to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        samples_dir,
        export,
    } = args;

    println!("Resume intake demo");
    let config = IntakeConfig {
        sink: SinkKind::Memory,
        ..IntakeConfig::default()
    };
    let orchestrator = build_orchestrator(&config);
    orchestrator.initialize_sink(&config.target_id)?;
    println!("- Sheet '{}' initialized with headers", config.target_id);

    fs::create_dir_all(&samples_dir)?;
    let attachment_path = samples_dir.join("resume_rajesh.txt");
    fs::write(&attachment_path, samples::RAJESH_KUMAR)?;
    println!("- Sample attachment written to {}", attachment_path.display());

    println!("\nReceiving submissions");
    orchestrator.receive(Submission::new(
        "1234567890",
        "John Smith",
        samples::JOHN_SMITH,
        None,
    )?);
    orchestrator.receive(Submission::new(
        "9876543210",
        "Sarah Johnson",
        samples::SARAH_JOHNSON,
        None,
    )?);
    orchestrator.receive(Submission::new(
        "5555555555",
        "Priya Sharma",
        "Hi, here's my resume",
        Some(FileAttachment::new(&attachment_path, Some("txt"))),
    )?);
    println!("- {} submissions queued", orchestrator.queue().len());

    let results = orchestrator.drain_queue();
    render_candidates(&orchestrator.candidates());
    render_summary(&orchestrator);

    orchestrator.export(&export)?;
    println!("\nResults exported to {}", export.display());

    render_processing_log(&results);
    Ok(())
}

fn render_candidates(candidates: &[CandidateRecord]) {
    println!("\nExtracted candidates");
    for (index, candidate) in candidates.iter().enumerate() {
        println!("\nCandidate {}:", index + 1);
        for field in CandidateField::ALL {
            println!("  {}: {}", field.column(), preview(candidate.value(field), 60));
        }
    }
}

fn render_summary(orchestrator: &IntakeOrchestrator) {
    let summary = orchestrator.summary();
    println!("\nProcessing summary");
    println!("- Total processed: {}", summary.total_processed);
    println!(
        "- Successful: {} | Partial: {} | Failed: {}",
        summary.successful, summary.partial_success, summary.failed
    );
    println!("- Candidates extracted: {}", summary.candidates_extracted);
    println!(
        "- Queue: {} pending / {} processed / {} total",
        summary.queue_stats.pending, summary.queue_stats.processed, summary.queue_stats.total
    );
}

fn render_processing_log(results: &[ProcessingResult]) {
    println!("\nProcessing details");
    for (index, result) in results.iter().enumerate() {
        println!("\nMessage {}: {}", index + 1, result.sender);
        println!("  Status: {}", result.status.label().to_uppercase());
        println!("  Data extracted: {}", result.extracted.is_some());
        println!("  Delivered to sheet: {}", result.sink_delivered);
        if !result.errors.is_empty() {
            println!("  Errors: {}", result.errors.join(", "));
        }
    }
}
