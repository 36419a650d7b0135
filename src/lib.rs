//! SPEI Batch Library
//!
//! Core logic behind bulk transfer loading: parsing pipe-delimited transfer
//! files into normalized records, and deciding whether an uploaded file is an
//! acceptable public key.
//!
//! # Modules
//!
//! - **pipe_format**: the bank's `|`-delimited bulk-load layout (import and write-back)
//! - **key_material**: structural public-key classification (PEM / OpenSSH)
//! - **csv_format**: CSV export of a batch
//! - **token**: bearer token kept next to a batch
//!
//! Every function here is pure over its input: reading files is left to the
//! caller, and an import either yields a whole batch or an error.
//!
//! # Examples
//!
//! ## Importing a transfer file
//!
//! ```no_run
//! use std::fs::File;
//! use spei_batch::pipe_format::PipeBatch;
//!
//! let mut file = File::open("transfers.txt")?;
//! let batch = PipeBatch::from_read(&mut file)?;
//! println!("Loaded {} transfers", batch.records.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Checking a public key
//!
//! ```
//! use spei_batch::key_material::{classify, KeyFamily, KeyVerdict};
//!
//! let verdict = classify("ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0 ops@bank");
//! assert_eq!(verdict, KeyVerdict::Accepted(KeyFamily::Ssh));
//! ```

pub mod error;
pub mod types;
pub mod pipe_format;
pub mod key_material;
pub mod csv_format;
pub mod token;

use std::str::FromStr;

// Re-export commonly used types
pub use error::{Error, ImportError, Result};
pub use key_material::{classify, KeyVerdict};
pub use pipe_format::parse_records;
pub use types::{Currency, RecordId, TransactionRecord, TransferType};

/// Output formats for an imported batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pipe-delimited bulk-load layout
    Pipe,
    /// CSV with a header row
    Csv,
    /// JSON array of records
    Json,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pipe" | "txt" | "psv" => Ok(ExportFormat::Pipe),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl ExportFormat {
    /// Get file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pipe => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}
