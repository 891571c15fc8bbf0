//! Backend API: wire types and the HTTP client

pub mod client;
pub mod models;

pub use client::{Backend, HttpBackend};
pub use models::{JobId, JobMatch, ResumeResponse};
