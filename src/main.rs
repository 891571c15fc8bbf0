//! SkillSync: upload resumes and job postings to a matching service

use anyhow::{bail, Context};
use clap::Parser;
use log::{debug, error, info};
use skillsync::api::{Backend, HttpBackend};
use skillsync::cli::{self, Cli, Commands, ConfigAction, JobsAction};
use skillsync::config::{Config, OutputFormat};
use skillsync::forms::{FormStatus, JobsForm, ResumeForm};
use skillsync::output::formatter::save_output_to_file;
use skillsync::output::{ResultRenderer, Spinner};
use skillsync::shell::Shell;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };
    config.apply_overrides(cli.server.as_deref());

    if cli.no_color || !config.output.color_output {
        colored::control::set_override(false);
        config.output.color_output = false;
    }

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> anyhow::Result<()> {
    let renderer = ResultRenderer::new(config.output.color_output, config.output.show_descriptions);

    match command {
        Commands::Resume { file, output, save } => {
            let format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };
            let backend = HttpBackend::new(&config.server)?;
            info!("Using backend {}", backend.base_url());

            let mut form = ResumeForm::new();
            if let Some(file) = file.clone() {
                form.select_file(file);
            }

            if form.submit(&backend, &Spinner::new()).await != FormStatus::Succeeded {
                bail!(form.error().unwrap_or("Upload failed").to_string());
            }

            if let Some(response) = form.result() {
                let rendered = renderer.render_matches(response, format)?;
                emit(&rendered, save.as_deref(), format, file.as_deref())?;
            }
        }

        Commands::Jobs { action } => match action {
            JobsAction::Upload { file, save } => {
                let backend = HttpBackend::new(&config.server)?;
                let mut form = JobsForm::new();
                if let Some(file) = file.clone() {
                    form.select_file(file);
                }

                if form.submit(&backend, &Spinner::new()).await != FormStatus::Succeeded {
                    bail!(form.error().unwrap_or("Upload failed").to_string());
                }

                if let Some(response) = form.result() {
                    let rendered = renderer.render_value(response)?;
                    emit(&rendered, save.as_deref(), OutputFormat::Json, file.as_deref())?;
                }
            }

            JobsAction::List { output } => {
                let format = cli::parse_output_format(&output).map_err(anyhow::Error::msg)?;
                let backend = HttpBackend::new(&config.server)?;
                let listing = backend
                    .list_jobs()
                    .await
                    .with_context(|| format!("Failed to list jobs from {}", backend.base_url()))?;
                println!("{}", renderer.render_listing(&listing, format)?);
            }
        },

        Commands::Status => {
            let backend = HttpBackend::new(&config.server)?;
            let status = backend
                .status()
                .await
                .with_context(|| format!("Backend at {} is not reachable", backend.base_url()))?;
            println!("✅ {} ({})", status.message, backend.base_url());
        }

        Commands::Shell => {
            let backend = HttpBackend::new(&config.server)?;
            let indicator = Spinner::new();
            let mut shell = Shell::new(&backend, &indicator, renderer);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            shell.run(stdin, &mut stdout).await?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Backend: {}", config.server.base_url);
                println!("Timeout: {}s", config.server.timeout_secs);
                println!("Resume endpoint: {}", config.server.resume_endpoint);
                println!("Jobs endpoint: {}", config.server.jobs_endpoint);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Colors: {}", config.output.color_output);
                println!("  Descriptions: {}", config.output.show_descriptions);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset to defaults");
            }

            Some(ConfigAction::Set { key, value }) => {
                // reload so env and flag overrides are not written back
                let mut stored = Config::load_from(config_path)?;
                stored.set(&key, &value)?;
                stored.save_to(config_path)?;
                println!("✅ {} = {}", key, value);
            }
        },
    }

    Ok(())
}

/// Print the rendered result, or write it to `save` when given.
fn emit(rendered: &str, save: Option<&Path>, format: OutputFormat, source: Option<&Path>) -> anyhow::Result<()> {
    match save {
        Some(path) => {
            let path = if path.is_dir() {
                let source_name = source.map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
                path.join(skillsync::output::formatter::suggest_filename(format, &source_name, true))
            } else {
                PathBuf::from(path)
            };
            save_output_to_file(rendered, &path)
                .with_context(|| format!("Failed to save output to {}", path.display()))?;
            debug!("Saved output to {}", path.display());
            println!("💾 Saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
