// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a scrape produced fewer rows than the page holds.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("no <table> element in document from {url}")]
    MissingTable { url: String },
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("cannot read credentials file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed credentials file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a cycle's write did not happen (or did not succeed).
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error("failed to sign token request: {0}")]
    Signing(String),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} answered with HTTP {status}: {body}")]
    Status { operation: &'static str, status: u16, body: String },
    #[error("could not decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("no sheet with id {sheet_id} in spreadsheet {spreadsheet_id}")]
    SheetNotFound { spreadsheet_id: String, sheet_id: i64 },
}

impl PublishError {
    pub fn status(&self) -> Option<u16> {
        match self {
            PublishError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures while wiring up the mirror, before the first tick.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Publish(#[from] PublishError),
}
