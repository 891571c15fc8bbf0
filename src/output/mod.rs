//! Output module
//! Renders backend responses and shows progress while a request is pending

pub mod formatter;
pub mod indicator;

pub use formatter::ResultRenderer;
pub use indicator::{BusyIndicator, Silent, Spinner};
