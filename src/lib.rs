//! SkillSync client library

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod forms;
pub mod input;
pub mod output;
pub mod shell;

pub use config::Config;
pub use error::{Result, SkillSyncError};
