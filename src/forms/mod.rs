//! Submission forms
//! Each form owns its own state and talks to the backend through `Backend`

pub mod jobs;
pub mod resume;
pub mod state;

pub use jobs::JobsForm;
pub use resume::ResumeForm;
pub use state::FormStatus;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{JobId, JobsListing, StatusResponse};
    use crate::api::{Backend, JobMatch, ResumeResponse};
    use crate::error::{Result, SkillSyncError};
    use crate::input::UploadFile;
    use crate::output::indicator::BusyIndicator;
    use serde_json::json;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    type ResumeOutcome = Box<dyn Fn() -> Result<ResumeResponse> + Send + Sync>;
    type JobsOutcome = Box<dyn Fn() -> Result<serde_json::Value> + Send + Sync>;

    struct FakeBackend {
        calls: AtomicUsize,
        uploaded_names: Mutex<Vec<String>>,
        posted_jobs: Mutex<Vec<serde_json::Value>>,
        resume_outcome: ResumeOutcome,
        jobs_outcome: JobsOutcome,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                uploaded_names: Mutex::new(Vec::new()),
                posted_jobs: Mutex::new(Vec::new()),
                resume_outcome: Box::new(|| Ok(sample_response(2))),
                jobs_outcome: Box::new(|| Ok(json!({"status": "ok", "inserted": 2}))),
            }
        }

        fn failing_with(detail: Option<&str>) -> Self {
            let detail = detail.map(str::to_string);
            let jobs_detail = detail.clone();
            Self {
                resume_outcome: Box::new(move || Err(SkillSyncError::Http { status: 400, detail: detail.clone() })),
                jobs_outcome: Box::new(move || Err(SkillSyncError::Http { status: 400, detail: jobs_detail.clone() })),
                ..Self::new()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Backend for FakeBackend {
        async fn upload_resume(&self, file: UploadFile) -> Result<ResumeResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.uploaded_names.lock().unwrap().push(file.file_name);
            (self.resume_outcome)()
        }

        async fn upload_jobs(&self, jobs: &serde_json::Value) -> Result<serde_json::Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.posted_jobs.lock().unwrap().push(jobs.clone());
            (self.jobs_outcome)()
        }

        async fn status(&self) -> Result<StatusResponse> {
            Ok(StatusResponse { message: "up".to_string() })
        }

        async fn list_jobs(&self) -> Result<JobsListing> {
            Ok(JobsListing { jobs: vec![], message: None })
        }
    }

    #[derive(Default)]
    struct RecordingIndicator {
        events: Mutex<Vec<String>>,
    }

    impl BusyIndicator for RecordingIndicator {
        fn start(&self, message: &str) {
            self.events.lock().unwrap().push(format!("start:{}", message));
        }

        fn finish(&self) {
            self.events.lock().unwrap().push("finish".to_string());
        }
    }

    fn sample_response(n: usize) -> ResumeResponse {
        ResumeResponse {
            recommendation: "Focus on backend roles.".to_string(),
            matches: (0..n)
                .map(|i| JobMatch {
                    id: JobId::Number(i.into()),
                    title: format!("Job {}", i),
                    description: "Build services".to_string(),
                    skills: vec!["Rust".to_string(), "SQL".to_string()],
                    matched_skills: vec!["Rust".to_string()],
                    semantic_score: 0.8,
                    keyword_score: 1.0,
                    final_score: 0.75,
                })
                .collect(),
        }
    }

    fn temp_file(contents: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_resume_without_file_never_calls_backend() {
        let backend = FakeBackend::new();
        let indicator = RecordingIndicator::default();
        let mut form = ResumeForm::new();

        let status = form.submit(&backend, &indicator).await;

        assert_eq!(status, FormStatus::Failed);
        assert_eq!(form.error(), Some(resume::SELECT_FILE_MESSAGE));
        assert_eq!(backend.calls(), 0);
        assert!(indicator.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resume_success_stores_response() {
        let file = temp_file("Jane Doe\nRust engineer", ".txt");
        let backend = FakeBackend::new();
        let indicator = RecordingIndicator::default();
        let mut form = ResumeForm::new();
        form.select_file(file.path().to_path_buf());

        let status = form.submit(&backend, &indicator).await;

        assert_eq!(status, FormStatus::Succeeded);
        assert!(!form.is_loading());
        assert_eq!(form.error(), None);
        assert_eq!(form.result().map(|r| r.matches.len()), Some(2));
        assert_eq!(backend.calls(), 1);
        assert_eq!(
            *indicator.events.lock().unwrap(),
            vec!["start:Uploading...".to_string(), "finish".to_string()]
        );
    }

    #[tokio::test]
    async fn test_resume_failure_surfaces_detail_or_fallback() {
        let file = temp_file("resume", ".pdf");

        let mut form = ResumeForm::new();
        form.select_file(file.path().to_path_buf());
        form.submit(&FakeBackend::failing_with(Some("Unsupported file type: image/png")), &RecordingIndicator::default())
            .await;
        assert_eq!(form.error(), Some("Unsupported file type: image/png"));
        assert!(form.result().is_none());

        form.submit(&FakeBackend::failing_with(None), &RecordingIndicator::default()).await;
        assert_eq!(form.error(), Some(resume::UPLOAD_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_resume_begin_clears_previous_result() {
        let file = temp_file("resume", ".txt");
        let backend = FakeBackend::new();
        let mut form = ResumeForm::new();
        form.select_file(file.path().to_path_buf());
        form.submit(&backend, &RecordingIndicator::default()).await;
        assert!(form.result().is_some());

        form.begin().unwrap();
        assert!(form.result().is_none());
        assert!(form.error().is_none());
        assert_eq!(form.status(), FormStatus::Busy);

        // the pending submission gates a new one
        assert_eq!(form.submit(&backend, &RecordingIndicator::default()).await, FormStatus::Busy);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_resume_sends_file_name() {
        let file = temp_file("resume", ".docx");
        let backend = FakeBackend::new();
        let mut form = ResumeForm::new();
        form.select_file(file.path().to_path_buf());
        form.submit(&backend, &RecordingIndicator::default()).await;

        let names = backend.uploaded_names.lock().unwrap();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".docx"));
    }

    #[tokio::test]
    async fn test_jobs_without_file_never_calls_backend() {
        let backend = FakeBackend::new();
        let mut form = JobsForm::new();

        let status = form.submit(&backend, &RecordingIndicator::default()).await;

        assert_eq!(status, FormStatus::Failed);
        assert_eq!(form.error(), Some(jobs::SELECT_JSON_MESSAGE));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_jobs_posts_parsed_structure() {
        let file = temp_file(r#"[{"id": 1, "title": "Backend", "skills": ["Rust"]}, {"id": "x"}]"#, ".json");
        let backend = FakeBackend::new();
        let mut form = JobsForm::new();
        form.select_file(file.path().to_path_buf());

        let status = form.submit(&backend, &RecordingIndicator::default()).await;

        assert_eq!(status, FormStatus::Succeeded);
        assert_eq!(
            backend.posted_jobs.lock().unwrap()[0],
            json!([{"id": 1, "title": "Backend", "skills": ["Rust"]}, {"id": "x"}])
        );
        assert_eq!(form.result(), Some(&json!({"status": "ok", "inserted": 2})));
    }

    #[tokio::test]
    async fn test_jobs_invalid_json_is_generic_failure_without_call() {
        let file = temp_file("{\"jobs\": [", ".json");
        let backend = FakeBackend::new();
        let mut form = JobsForm::new();
        form.select_file(file.path().to_path_buf());

        let status = form.submit(&backend, &RecordingIndicator::default()).await;

        assert_eq!(status, FormStatus::Failed);
        assert_eq!(form.error(), Some(jobs::JOBS_FAILED_MESSAGE));
        assert_eq!(backend.calls(), 0);
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_jobs_failure_surfaces_detail() {
        let file = temp_file("[]", ".json");
        let mut form = JobsForm::new();
        form.select_file(file.path().to_path_buf());

        form.submit(&FakeBackend::failing_with(Some("X")), &RecordingIndicator::default()).await;
        assert_eq!(form.error(), Some("X"));

        form.submit(&FakeBackend::failing_with(None), &RecordingIndicator::default()).await;
        assert_eq!(form.error(), Some(jobs::JOBS_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_selecting_file_clears_only_that_form() {
        let resume_file = temp_file("resume", ".txt");
        let backend = FakeBackend::failing_with(Some("nope"));
        let mut resume = ResumeForm::new();
        let mut jobs_form = JobsForm::new();
        resume.select_file(resume_file.path().to_path_buf());
        resume.submit(&backend, &RecordingIndicator::default()).await;
        jobs_form.submit(&backend, &RecordingIndicator::default()).await;

        resume.select_file(resume_file.path().to_path_buf());
        assert_eq!(resume.error(), None);
        assert_eq!(jobs_form.error(), Some(jobs::SELECT_JSON_MESSAGE));
    }
}
