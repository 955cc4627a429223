// src/main.rs
mod extractors;
mod scanner;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use tokio::io::AsyncBufReadExt;

use extractors::extract_employee_fields;
use scanner::{clean_scan, read_payload_file, DuplicateFilter};
use storage::RegisterWriter;
use utils::AppError;

/// Command Line Interface for the QR employee register
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Payload files to process; each file holds one decoded QR payload
    inputs: Vec<PathBuf>,

    /// A single decoded payload passed directly on the command line
    #[arg(short, long)]
    payload: Option<String>,

    /// CSV register the accepted records are appended to
    #[arg(short, long, default_value = "empleados_qr.csv")]
    output: PathBuf,

    /// Debug mode - also dump rejected payloads to rejected_payloads.log
    #[arg(short, long)]
    debug: bool,

    /// In stdin mode, stop after the first accepted record
    #[arg(long)]
    once: bool,
}

/// One capture run: the register sink, the duplicate filter and the
/// accept/reject counters, fed one raw scan at a time.
struct CaptureSession {
    register: RegisterWriter,
    duplicates: DuplicateFilter,
    debug_log: Option<PathBuf>,
    accepted: u32,
    rejected: u32,
}

impl CaptureSession {
    fn new(register: RegisterWriter, debug_log: Option<PathBuf>) -> Self {
        Self {
            register,
            duplicates: DuplicateFilter::new(),
            debug_log,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Cleans, deduplicates, extracts and persists one scan. Returns true
    /// when a record was appended to the register.
    fn process_scan(&mut self, raw: &str) -> bool {
        let payload = clean_scan(raw);
        if payload.is_empty() {
            return false;
        }
        if !self.duplicates.admit(&payload) {
            tracing::debug!("Ignoring repeated scan of the same payload");
            return false;
        }

        tracing::info!("Decoded payload: {}", payload);

        match extract_employee_fields(&payload) {
            Ok(record) => match self.register.append(&record) {
                Ok(()) => {
                    // Remember only accepted scans; a rejected badge can be
                    // corrected and re-scanned immediately.
                    self.duplicates.remember(&payload);
                    self.accepted += 1;
                    let summary = serde_json::to_string(&record)
                        .unwrap_or_else(|_| format!("{record:?}"));
                    tracing::info!("Recorded: {}", summary);
                    true
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to append record to {}: {}",
                        self.register.path().display(),
                        e
                    );
                    self.rejected += 1;
                    false
                }
            },
            Err(err) => {
                tracing::warn!("{} - payload discarded", err);
                self.rejected += 1;
                if let Some(log_path) = &self.debug_log {
                    if let Err(log_err) = utils::payload_debug::log_rejected_payload(
                        log_path,
                        &payload,
                        err.missing_fields(),
                    ) {
                        tracing::error!("Failed to record rejected payload: {}", log_err);
                    }
                }
                false
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting capture for args: {:?}", args);

    if args.payload.is_some() && !args.inputs.is_empty() {
        return Err(AppError::Config(
            "pass either --payload or payload files, not both".to_string(),
        ));
    }

    // 3. Initialize the register sink
    let register = RegisterWriter::new(&args.output)?;
    let debug_log = args
        .debug
        .then(|| args.output.with_file_name("rejected_payloads.log"));
    let mut session = CaptureSession::new(register, debug_log);

    // 4. Feed payloads from the selected source
    if let Some(payload) = &args.payload {
        session.process_scan(payload);
    } else if !args.inputs.is_empty() {
        for path in &args.inputs {
            match read_payload_file(path) {
                Ok(payload) => {
                    session.process_scan(&payload);
                }
                Err(e) => {
                    tracing::error!("Skipping {}: {}", path.display(), e);
                    session.rejected += 1;
                }
            }
        }
    } else {
        // Keyboard-wedge mode: QR scanner hardware types the decoded text
        // followed by a newline, so every stdin line is one payload.
        tracing::info!("Reading decoded payloads from stdin, one per line (Ctrl-D to finish)");
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        while let Some(line) = lines.next_line().await? {
            let accepted = session.process_scan(&line);
            if accepted && args.once {
                break;
            }
        }
    }

    tracing::info!(
        "Capture finished. Accepted: {}, Rejected: {}",
        session.accepted,
        session.rejected
    );

    if session.accepted == 0 && session.rejected > 0 {
        return Err(AppError::Processing(format!(
            "no employee record could be extracted from {} payload(s)",
            session.rejected
        )));
    }

    Ok(())
}
