//! Input handling module
//! Detects file types and loads the files picked for upload

pub mod file_detector;
pub mod manager;

pub use manager::{InputManager, UploadFile};
