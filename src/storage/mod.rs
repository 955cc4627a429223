// src/storage/mod.rs
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::extractors::record::EmployeeRecord;
use crate::utils::error::StorageError;

/// Fixed column order of the register. The fourth column is generated at
/// append time, not supplied by the record.
pub const REGISTER_COLUMNS: [&str; 4] = ["Nombre", "Número de empleado", "Área", "timestamp"];

/// Appends accepted records to a CSV register file. The header row is
/// written lazily, the first time the file is created or found empty, so an
/// existing register is never clobbered.
pub struct RegisterWriter {
    path: PathBuf,
}

impl RegisterWriter {
    /// Creates a writer for the given register path, creating parent
    /// directories if needed. The file itself is only touched on append.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record as a CSV row, stamping the capture time.
    pub fn append(&self, record: &EmployeeRecord) -> Result<(), StorageError> {
        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if needs_header {
            writeln!(file, "{}", REGISTER_COLUMNS.join(","))?;
        }

        let captured_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        writeln!(
            file,
            "{},{},{},{}",
            csv_field(&record.name),
            csv_field(&record.employee_number),
            csv_field(&record.area),
            csv_field(&captured_at),
        )?;

        tracing::debug!("Appended record to {}", self.path.display());

        Ok(())
    }
}

/// RFC 4180 quoting: fields holding the delimiter, quotes or newlines are
/// wrapped in double quotes with inner quotes doubled.
fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
