//! Wire types exchanged with the SkillSync backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Job identifier as the backend sends it: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Number(n) => write!(f, "{}", n),
            JobId::Text(s) => f.write_str(s),
        }
    }
}

/// A job posting scored against the submitted resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub semantic_score: f64,
    pub keyword_score: f64,
    pub final_score: f64,
}

/// Successful `POST /upload_resume` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeResponse {
    #[serde(default)]
    pub recommendation: String,
    pub matches: Vec<JobMatch>,
}

/// Error body the backend may attach to a non-2xx response.
///
/// `detail` is kept loose because validation failures carry a list here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn detail_text(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// `GET /` health message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

/// `GET /jobs/` listing. Entries are left untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobsListing {
    #[serde(default)]
    pub jobs: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_id_accepts_number_and_string() {
        let numeric: JobId = serde_json::from_value(json!(42)).unwrap();
        let text: JobId = serde_json::from_value(json!("job-7")).unwrap();
        assert_eq!(numeric.to_string(), "42");
        assert_eq!(text.to_string(), "job-7");
    }

    #[test]
    fn test_resume_response_preserves_server_order() {
        let body = json!({
            "recommendation": "Apply to the backend role.",
            "matches": [
                {"id": 3, "title": "Backend", "description": "APIs", "skills": ["Rust", "SQL"],
                 "matched_skills": ["Rust"], "semantic_score": 0.81234, "keyword_score": 1, "final_score": 0.7},
                {"id": 1, "title": "Data", "description": "ETL", "skills": ["Python"],
                 "matched_skills": [], "semantic_score": 0.5, "keyword_score": 0, "final_score": 0.4}
            ]
        });
        let parsed: ResumeResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.matches.len(), 2);
        assert_eq!(parsed.matches[0].title, "Backend");
        assert_eq!(parsed.matches[1].id.to_string(), "1");
        assert_eq!(parsed.matches[0].keyword_score, 1.0);
    }

    #[test]
    fn test_missing_recommendation_is_empty() {
        let parsed: ResumeResponse = serde_json::from_value(json!({"matches": []})).unwrap();
        assert!(parsed.recommendation.is_empty());
    }

    #[test]
    fn test_error_detail_text_only_for_strings() {
        let text: ErrorBody = serde_json::from_value(json!({"detail": "Unsupported file type"})).unwrap();
        assert_eq!(text.detail_text().as_deref(), Some("Unsupported file type"));

        let list: ErrorBody = serde_json::from_value(json!({"detail": [{"msg": "field required"}]})).unwrap();
        assert_eq!(list.detail_text(), None);

        let missing: ErrorBody = serde_json::from_value(json!({"error": "x"})).unwrap();
        assert_eq!(missing.detail_text(), None);
    }
}
