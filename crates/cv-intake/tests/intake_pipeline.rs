use std::fs;
use std::sync::Arc;

use cv_intake::pipeline::{
    CandidateField, CsvRecordSink, ExportDocument, FileAttachment, FileContentResolver,
    InMemorySheetSink, PipelineOrchestrator, ProcessingStatus, RecordSink, SinkError, SinkRow,
    Submission, SubmissionError, SubmissionQueue, NOT_SPECIFIED, SHEET_HEADERS,
};

const SOURCE_LABEL: &str = "WhatsApp/File Upload";

const JOHN_SMITH_RESUME: &str = "John Smith
Software Engineer
Email: john.smith@email.com
Phone: +91-9876543210

EDUCATION:
B.Tech in Computer Science
IIT Delhi, 2018

SKILLS:
Python, Java, React, Node.js, AWS, Docker
";

const DEGREES_ONLY: &str = "Meera Iyer
Bachelor of Arts, Delhi University
Master of Arts, JNU
MBA, IIM Ahmedabad
PhD in Economics
Teaching assistant";

struct RejectingSink;

impl RecordSink for RejectingSink {
    fn initialize(&self, _target_id: &str, _headers: &[&str]) -> Result<(), SinkError> {
        Ok(())
    }

    fn append(&self, _row: &SinkRow) -> Result<(), SinkError> {
        Err(SinkError::Rejected("quota exceeded".to_string()))
    }
}

fn orchestrator<S: RecordSink>(sink: Arc<S>) -> PipelineOrchestrator<FileContentResolver, S> {
    PipelineOrchestrator::new(
        Arc::new(SubmissionQueue::new()),
        Arc::new(FileContentResolver::default()),
        sink,
        SOURCE_LABEL,
    )
}

fn submission(name: &str, text: &str) -> Submission {
    Submission::new("9876543210", name, text, None).expect("valid submission")
}

#[test]
fn inline_resume_is_extracted_and_delivered() {
    let sink = Arc::new(InMemorySheetSink::new());
    let orchestrator = orchestrator(sink.clone());
    orchestrator
        .initialize_sink("demo_spreadsheet_id")
        .expect("sink initialized");

    orchestrator.receive(submission("John Smith", JOHN_SMITH_RESUME));
    let results = orchestrator.drain_queue();

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.status, ProcessingStatus::Success);
    assert!(result.sink_delivered);

    let record = result.extracted.as_ref().expect("record extracted");
    assert_eq!(record.value(CandidateField::FullName), "John Smith");
    assert_eq!(record.value(CandidateField::Email), "john.smith@email.com");
    assert!(record.value(CandidateField::Phone).contains("9876543210"));
    assert!(record.value(CandidateField::Skills).contains("Python"));
    assert!(record.value(CandidateField::Education).contains("B.Tech"));

    let exported = sink.export_records();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0]["Email"], "john.smith@email.com");
    assert_eq!(exported[0]["Source"], SOURCE_LABEL);
}

#[test]
fn submission_without_content_fails() {
    let sink = Arc::new(InMemorySheetSink::new());
    let orchestrator = orchestrator(sink.clone());
    let mut empty = submission("Sarah Johnson", "placeholder");
    empty.text = Some(String::new());

    let result = orchestrator.process_one(empty);

    assert_eq!(result.status, ProcessingStatus::Failed);
    assert!(result
        .errors
        .contains(&"No content found to process".to_string()));
    assert!(orchestrator.candidates().is_empty());
    assert!(sink.rows().is_empty());
}

#[test]
fn rejected_rows_leave_a_partial_success() {
    let orchestrator = orchestrator(Arc::new(RejectingSink));

    let result = orchestrator.process_one(submission("John Smith", JOHN_SMITH_RESUME));

    assert_eq!(result.status, ProcessingStatus::PartialSuccess);
    assert!(result.extracted.is_some());
    assert!(!result.sink_delivered);
    assert_eq!(orchestrator.summary().partial_success, 1);
}

#[test]
fn unmatched_fields_use_the_sentinel_and_contexts_are_capped() {
    let orchestrator = orchestrator(Arc::new(InMemorySheetSink::new()));

    let result = orchestrator.process_one(submission("Meera Iyer", DEGREES_ONLY));

    let record = result.extracted.expect("record extracted");
    assert_eq!(record.value(CandidateField::Skills), NOT_SPECIFIED);
    assert_eq!(record.value(CandidateField::Email), NOT_SPECIFIED);
    assert_eq!(record.value(CandidateField::Phone), NOT_SPECIFIED);
    assert_eq!(
        record.value(CandidateField::Education),
        "Bachelor of Arts, Delhi University Master of Arts, JNU; \
         Master of Arts, JNU MBA, IIM Ahmedabad; \
         MBA, IIM Ahmedabad PhD in Economics"
    );
}

#[test]
fn file_attachments_flow_into_a_csv_sheet() {
    let dir = tempfile::tempdir().expect("temp dir");
    let resume = dir.path().join("resume_john.txt");
    fs::write(&resume, JOHN_SMITH_RESUME).expect("write resume");
    let sheet = dir.path().join("candidates.csv");

    let orchestrator = orchestrator(Arc::new(CsvRecordSink::new(&sheet)));
    orchestrator
        .initialize_sink("local")
        .expect("csv initialized");
    orchestrator.receive(
        Submission::new(
            "1234567890",
            "John Smith",
            "Hi, I'm interested in the Software Engineer position.",
            Some(FileAttachment::new(&resume, Some("txt"))),
        )
        .expect("valid submission"),
    );
    orchestrator.receive(
        Submission::new(
            "5555555555",
            "Priya Sharma",
            "Please find my resume attached.",
            Some(FileAttachment::new(dir.path().join("absent.txt"), Some("txt"))),
        )
        .expect("valid submission"),
    );
    let scan = dir.path().join("resume_scan.xyz");
    fs::write(&scan, "Rajesh Kumar").expect("write scan");
    orchestrator.receive(
        Submission::new(
            "4444444444",
            "Rajesh Kumar",
            "Resume attached",
            Some(FileAttachment::new(&scan, None)),
        )
        .expect("valid submission"),
    );

    let results = orchestrator.drain_queue();
    assert_eq!(results[0].status, ProcessingStatus::Success);
    assert_eq!(results[1].status, ProcessingStatus::Success);
    assert_eq!(
        results[1].content.as_deref(),
        Some("Please find my resume attached.")
    );
    assert_eq!(results[2].status, ProcessingStatus::Failed);
    assert_eq!(
        results[2].errors,
        [
            "File processing failed: Unsupported file type: .xyz",
            "No content found to process",
        ]
    );

    let mut reader = csv::Reader::from_path(&sheet).expect("open sheet");
    assert_eq!(
        reader
            .headers()
            .expect("headers")
            .iter()
            .collect::<Vec<_>>(),
        SHEET_HEADERS
    );
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "John Smith");
    assert_eq!(&rows[0][7], SOURCE_LABEL);
    assert_eq!(&rows[1][1], NOT_SPECIFIED);
}

#[test]
fn message_text_stands_in_for_a_missing_attachment() {
    let sink = Arc::new(InMemorySheetSink::new());
    let orchestrator = orchestrator(sink.clone());

    let result = orchestrator.process_one(
        Submission::new(
            "5555555555",
            "Priya Sharma",
            "Priya Sharma\npriya@example.com\nPython",
            Some(FileAttachment::new("/nonexistent/resume.txt", Some("txt"))),
        )
        .expect("valid submission"),
    );

    assert_eq!(result.status, ProcessingStatus::Success);
    assert!(result.errors.is_empty());
    let record = result.extracted.expect("record extracted");
    assert_eq!(record.value(CandidateField::FullName), "Priya Sharma");
    assert_eq!(record.value(CandidateField::Email), "priya@example.com");
    assert_eq!(record.value(CandidateField::Skills), "Python");
    assert_eq!(sink.rows().len(), 1);
}

#[test]
fn export_round_trips_through_a_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let destination = dir.path().join("results.json");
    let orchestrator = orchestrator(Arc::new(InMemorySheetSink::new()));
    for name in ["John Smith", "Sarah Johnson", "Priya Sharma"] {
        orchestrator.receive(submission(name, &format!("{name}\nData Analysis, 5 years")));
    }
    orchestrator.drain_queue();

    orchestrator.export(&destination).expect("export written");

    let document: ExportDocument =
        serde_json::from_str(&fs::read_to_string(&destination).expect("read export"))
            .expect("export parses");
    assert_eq!(document.summary.successful, 3);
    assert_eq!(document.summary.queue_stats.total, 3);
    let senders: Vec<&str> = document
        .processing_log
        .iter()
        .map(|result| result.sender.as_str())
        .collect();
    assert_eq!(senders, ["John Smith", "Sarah Johnson", "Priya Sharma"]);
    assert_eq!(
        document.candidates[1].value(CandidateField::Skills),
        "Data Analysis"
    );
}

#[test]
fn invalid_submissions_never_reach_the_queue() {
    assert_eq!(
        Submission::new("9876543210", "John Smith", "", None),
        Err(SubmissionError::MissingMessageText)
    );
    assert_eq!(
        Submission::new("", "", "resume", None),
        Err(SubmissionError::MissingSender)
    );
}
