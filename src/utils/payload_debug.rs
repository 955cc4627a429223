// src/utils/payload_debug.rs
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::extractors::record::Field;
use crate::utils::error::AppError;

/// Appends one rejected payload to the debug log as a JSON line, so a bad
/// batch of badges can be inspected after the fact.
pub fn log_rejected_payload(
    log_path: &Path,
    payload: &str,
    missing: &[Field],
) -> Result<(), AppError> {
    let entry = serde_json::json!({
        "rejected_at": chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        "missing": missing.iter().map(|field| field.column_name()).collect::<Vec<_>>(),
        "payload": payload,
    });

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    writeln!(file, "{entry}")?;

    tracing::debug!("Recorded rejected payload in {}", log_path.display());
    Ok(())
}
