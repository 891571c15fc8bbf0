//! Input manager: turns a picked path into something that can be sent

use crate::error::{Result, SkillSyncError};
use crate::input::file_detector::FileType;
use log::{debug, info};
use std::path::Path;
use tokio::fs;

/// A file read into memory, ready for a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct InputManager;

impl InputManager {
    /// Read any file for the resume upload. The backend decides what it accepts.
    pub async fn load_upload(path: &Path) -> Result<UploadFile> {
        if !path.is_file() {
            return Err(SkillSyncError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| SkillSyncError::InvalidInput(format!("Not a file path: {}", path.display())))?;

        let file_type = Self::detect_file_type(path);
        let bytes = fs::read(path).await?;

        info!("Loaded {} ({} bytes, {})", file_name, bytes.len(), file_type.mime_type());

        Ok(UploadFile {
            file_name,
            mime_type: file_type.mime_type(),
            bytes,
        })
    }

    /// Read the whole file as text and parse it as JSON. No schema is checked.
    ///
    /// A leading UTF-8 BOM is dropped and invalid bytes become U+FFFD.
    pub async fn read_json(path: &Path) -> Result<serde_json::Value> {
        let bytes = fs::read(path).await?;
        let text = String::from_utf8_lossy(&bytes);
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text.as_ref());
        debug!("Read {} characters from {}", text.len(), path.display());

        serde_json::from_str(text).map_err(|source| SkillSyncError::InvalidJson {
            path: path.display().to_string(),
            source,
        })
    }

    fn detect_file_type(path: &Path) -> FileType {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}
