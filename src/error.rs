//! Error handling for the SkillSync client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillSyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No file selected")]
    NoFileSelected,

    #[error("A submission is already in progress")]
    Busy,

    #[error("Invalid JSON in {path}: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned {status}{}", detail_suffix(.detail))]
    Http { status: u16, detail: Option<String> },

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {}", d)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, SkillSyncError>;

impl SkillSyncError {
    /// Server-provided `detail`, if the failure carried a usable one.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            SkillSyncError::Http { detail: Some(detail), .. } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SkillSyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SkillSyncError::Decode(err.to_string())
        } else {
            SkillSyncError::Network(err.to_string())
        }
    }
}
