//! Resume form: one file, multipart upload, ranked matches back

use crate::api::{Backend, ResumeResponse};
use crate::error::{Result, SkillSyncError};
use crate::forms::state::{failure_message, FormState, FormStatus};
use crate::input::InputManager;
use crate::output::indicator::BusyIndicator;
use log::{info, warn};
use std::path::{Path, PathBuf};

pub const SELECT_FILE_MESSAGE: &str = "Please select a file to upload.";
pub const UPLOAD_FAILED_MESSAGE: &str = "Error uploading file. Please try again.";

#[derive(Debug, Default)]
pub struct ResumeForm {
    state: FormState<ResumeResponse>,
}

impl ResumeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, path: PathBuf) {
        self.state.select(path);
    }

    /// Raise the busy flag and clear the previous outcome, or record why not.
    pub fn begin(&mut self) -> Result<PathBuf> {
        self.state.begin(SELECT_FILE_MESSAGE)
    }

    /// Run one submission to completion and return the resulting status.
    ///
    /// A call made while another is pending returns `Busy` and changes nothing.
    pub async fn submit<B, I>(&mut self, backend: &B, indicator: &I) -> FormStatus
    where
        B: Backend,
        I: BusyIndicator,
    {
        let path = match self.begin() {
            Ok(path) => path,
            Err(SkillSyncError::Busy) => return FormStatus::Busy,
            Err(_) => return self.status(),
        };

        indicator.start("Uploading...");
        let outcome = send(backend, &path).await;
        indicator.finish();

        match outcome {
            Ok(response) => {
                info!("Received {} matches", response.matches.len());
                self.state.succeed(response);
            }
            Err(e) => {
                warn!("Resume upload failed: {}", e);
                self.state.fail(failure_message(&e, UPLOAD_FAILED_MESSAGE));
            }
        }
        self.status()
    }

    pub fn selected(&self) -> Option<&Path> {
        self.state.selected()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn result(&self) -> Option<&ResumeResponse> {
        self.state.result()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn status(&self) -> FormStatus {
        self.state.status()
    }
}

async fn send<B: Backend>(backend: &B, path: &Path) -> Result<ResumeResponse> {
    let file = InputManager::load_upload(path).await?;
    backend.upload_resume(file).await
}
