//! CLI interface for the SkillSync client

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skillsync")]
#[command(about = "Upload resumes and job postings to a SkillSync matching service")]
#[command(long_about = "Send a resume to the SkillSync backend to get ranked job matches and a recommendation, or upload a JSON file of job postings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8000
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a resume and show the ranked job matches
    Resume {
        /// Resume file (PDF, DOCX, DOC, TXT)
        file: Option<PathBuf>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Job posting commands
    Jobs {
        #[command(subcommand)]
        action: JobsAction,
    },

    /// Check that the backend is reachable
    Status,

    /// Interactive shell with a resume tab and a job tab
    Shell,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum JobsAction {
    /// Upload a JSON file of job postings
    Upload {
        /// JSON file with the postings
        file: Option<PathBuf>,

        /// Save the server response to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// List the postings the backend has indexed
    List {
        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "server.base_url")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}
