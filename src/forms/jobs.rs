//! Jobs form: one JSON file, parsed locally, posted as the request body

use crate::api::Backend;
use crate::error::{Result, SkillSyncError};
use crate::forms::state::{failure_message, FormState, FormStatus};
use crate::input::InputManager;
use crate::output::indicator::BusyIndicator;
use log::{info, warn};
use std::path::{Path, PathBuf};

pub const SELECT_JSON_MESSAGE: &str = "Please select a JSON file first.";
pub const JOBS_FAILED_MESSAGE: &str = "Invalid JSON file format or upload failed.";

#[derive(Debug, Default)]
pub struct JobsForm {
    state: FormState<serde_json::Value>,
}

impl JobsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, path: PathBuf) {
        self.state.select(path);
    }

    pub fn begin(&mut self) -> Result<PathBuf> {
        self.state.begin(SELECT_JSON_MESSAGE)
    }

    /// Parse failures and request failures end in the same message.
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
                info!("Jobs upload accepted");
                self.state.succeed(response);
            }
            Err(e) => {
                warn!("Jobs upload failed: {}", e);
                self.state.fail(failure_message(&e, JOBS_FAILED_MESSAGE));
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

    pub fn result(&self) -> Option<&serde_json::Value> {
        self.state.result()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn status(&self) -> FormStatus {
        self.state.status()
    }
}

async fn send<B: Backend>(backend: &B, path: &Path) -> Result<serde_json::Value> {
    let jobs = InputManager::read_json(path).await?;
    backend.upload_jobs(&jobs).await
}
