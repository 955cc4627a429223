// src/utils/error.rs
#![allow(dead_code)]
use thiserror::Error;

use crate::extractors::record::Field;

// Define specific error types for the different parts of the application
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Could not read payload source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Payload source is empty: {0}")]
    EmptySource(String),
}

/// The core's only failure mode. Malformed payloads are not errors; they
/// simply yield fewer candidates and end up here with the unfilled columns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Incomplete record, missing fields: {}", format_fields(.0))]
    IncompleteRecord(Vec<Field>),
}

impl ExtractError {
    /// The missing columns, in fixed register order.
    pub fn missing_fields(&self) -> &[Field] {
        match self {
            ExtractError::IncompleteRecord(missing) => missing,
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Payload acquisition failed: {0}")]
    Scan(#[from] ScanError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}

fn format_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.column_name())
        .collect::<Vec<_>>()
        .join(", ")
}
