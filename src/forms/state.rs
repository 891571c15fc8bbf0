//! Per-form transient state: selected file, busy flag, result, error

use crate::error::{Result, SkillSyncError};
use log::debug;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Busy,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub struct FormState<T> {
    selected: Option<PathBuf>,
    loading: bool,
    result: Option<T>,
    error: Option<String>,
}

impl<T> Default for FormState<T> {
    fn default() -> Self {
        Self {
            selected: None,
            loading: false,
            result: None,
            error: None,
        }
    }
}

impl<T> FormState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picking a file discards whatever the previous submission displayed.
    pub fn select(&mut self, path: PathBuf) {
        debug!("Selected {}", path.display());
        self.selected = Some(path);
        self.result = None;
        self.error = None;
    }

    /// Start a submission.
    ///
    /// Rejected with `Busy` while one is pending, leaving state untouched.
    /// Without a selected file the error is set to `missing_file_message`
    /// and `NoFileSelected` is returned. Otherwise the busy flag is raised,
    /// prior result and error are cleared, and the file to send is returned.
    pub fn begin(&mut self, missing_file_message: &str) -> Result<PathBuf> {
        if self.loading {
            return Err(SkillSyncError::Busy);
        }

        let Some(path) = self.selected.clone() else {
            self.result = None;
            self.error = Some(missing_file_message.to_string());
            return Err(SkillSyncError::NoFileSelected);
        };

        self.loading = true;
        self.result = None;
        self.error = None;
        Ok(path)
    }

    pub fn succeed(&mut self, value: T) {
        self.loading = false;
        self.error = None;
        self.result = Some(value);
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.result = None;
        self.error = Some(message);
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> FormStatus {
        if self.loading {
            FormStatus::Busy
        } else if self.error.is_some() {
            FormStatus::Failed
        } else if self.result.is_some() {
            FormStatus::Succeeded
        } else {
            FormStatus::Idle
        }
    }
}

/// The single message a form shows for a failed submission.
pub fn failure_message(err: &SkillSyncError, fallback: &str) -> String {
    err.server_detail().unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_without_file_sets_message() {
        let mut state: FormState<u32> = FormState::new();
        let err = state.begin("pick one").unwrap_err();
        assert!(matches!(err, SkillSyncError::NoFileSelected));
        assert_eq!(state.error(), Some("pick one"));
        assert!(!state.is_loading());
        assert_eq!(state.status(), FormStatus::Failed);
    }

    #[test]
    fn test_begin_clears_previous_outcome() {
        let mut state: FormState<u32> = FormState::new();
        state.select(PathBuf::from("a.pdf"));
        state.begin("pick one").unwrap();
        state.succeed(7);
        assert_eq!(state.result(), Some(&7));

        let path = state.begin("pick one").unwrap();
        assert_eq!(path, PathBuf::from("a.pdf"));
        assert_eq!(state.result(), None);
        assert_eq!(state.error(), None);
        assert_eq!(state.status(), FormStatus::Busy);
    }

    #[test]
    fn test_busy_rejects_second_begin() {
        let mut state: FormState<u32> = FormState::new();
        state.select(PathBuf::from("a.pdf"));
        state.begin("pick one").unwrap();

        assert!(matches!(state.begin("pick one"), Err(SkillSyncError::Busy)));
        assert!(state.is_loading());

        state.fail("boom".to_string());
        assert!(!state.is_loading());
        assert!(state.begin("pick one").is_ok());
    }

    #[test]
    fn test_select_clears_result_and_error() {
        let mut state: FormState<u32> = FormState::new();
        state.fail("old".to_string());
        state.select(PathBuf::from("b.json"));
        assert_eq!(state.error(), None);
        assert_eq!(state.status(), FormStatus::Idle);
    }

    #[test]
    fn test_failure_message_prefers_detail() {
        let with_detail = SkillSyncError::Http { status: 400, detail: Some("X".to_string()) };
        assert_eq!(failure_message(&with_detail, "generic"), "X");

        let without = SkillSyncError::Http { status: 500, detail: None };
        assert_eq!(failure_message(&without, "generic"), "generic");

        let network = SkillSyncError::Network("connection refused".to_string());
        assert_eq!(failure_message(&network, "generic"), "generic");
    }
}
