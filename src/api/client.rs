//! HTTP client for the SkillSync backend

use crate::api::models::{ErrorBody, JobsListing, ResumeResponse, StatusResponse};
use crate::config::ServerConfig;
use crate::error::{Result, SkillSyncError};
use crate::input::UploadFile;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

/// Multipart field the resume is sent under.
pub const RESUME_FIELD: &str = "file";

const STATUS_ENDPOINT: &str = "/";
const JOBS_LISTING_ENDPOINT: &str = "/jobs/";

/// Calls the forms and the shell make against the backend.
pub trait Backend {
    fn upload_resume(&self, file: UploadFile) -> impl Future<Output = Result<ResumeResponse>> + Send;

    fn upload_jobs(&self, jobs: &serde_json::Value) -> impl Future<Output = Result<serde_json::Value>> + Send;

    fn status(&self) -> impl Future<Output = Result<StatusResponse>> + Send;

    fn list_jobs(&self) -> impl Future<Output = Result<JobsListing>> + Send;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
    resume_endpoint: String,
    jobs_endpoint: String,
}

impl HttpBackend {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SkillSyncError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            resume_endpoint: config.resume_endpoint.clone(),
            jobs_endpoint: config.jobs_endpoint.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl Backend for HttpBackend {
    async fn upload_resume(&self, file: UploadFile) -> Result<ResumeResponse> {
        let url = self.url(&self.resume_endpoint);
        info!("Uploading {} to {}", file.file_name, url);

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(file.mime_type)
            .map_err(|e| SkillSyncError::InvalidInput(format!("Invalid MIME type: {}", e)))?;
        let form = Form::new().part(RESUME_FIELD, part);

        let response = self.client.post(&url).multipart(form).send().await?;
        decode(response).await
    }

    async fn upload_jobs(&self, jobs: &serde_json::Value) -> Result<serde_json::Value> {
        let url = self.url(&self.jobs_endpoint);
        info!("Posting jobs JSON to {}", url);

        let response = self.client.post(&url).json(jobs).send().await?;
        decode(response).await
    }

    /// `GET /`: liveness message from the backend.
    async fn status(&self) -> Result<StatusResponse> {
        let url = self.url(STATUS_ENDPOINT);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    /// `GET /jobs/`: the postings the backend currently indexes.
    async fn list_jobs(&self) -> Result<JobsListing> {
        let url = self.url(JOBS_LISTING_ENDPOINT);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }
}

/// Turn a response into `T`, or into `Http { status, detail }` when non-2xx.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    debug!("Response status: {}", status);

    let body = response.text().await?;

    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail_text());
        warn!("Backend returned {}: {}", status, detail.as_deref().unwrap_or("<no detail>"));
        return Err(SkillSyncError::Http {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| SkillSyncError::Decode(e.to_string()))
}
