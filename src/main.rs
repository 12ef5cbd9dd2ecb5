//! resume-gap: find job keywords missing from a resume

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_gap::cli::{self, Cli, Commands, ConfigAction, InputArgs};
use resume_gap::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_gap::output::render::{substitute_sections, PdfRenderer};
use resume_gap::output::report::GapReport;
use resume_gap::processing::sections::extract_summary_and_skills;
use resume_gap::rewrite::{OpenAiRewriter, RewriteRequest, RewriteService};
use resume_gap::server::{self, AppState};
use resume_gap::{Config, GapEngine, InputManager, Result, ResumeGapError};
use std::process;
use std::time::{Duration, Instant};

const INPUT_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Gap {
            input,
            output,
            detailed,
            save,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeGapError::InvalidInput)?,
                None => config.output.format,
            };

            let start = Instant::now();
            let engine = GapEngine::with_extra_stopwords(&config.analysis.extra_stopwords);
            let (resume_text, job_text, job_source) = load_inputs(&input).await?;

            let comparison = engine.compare(&resume_text, &job_text);
            let report = GapReport::from_comparison(
                &comparison,
                input.resume.display().to_string(),
                job_source,
                start.elapsed().as_millis() as u64,
            );
            info!(
                "Found {} missing keywords ({}% coverage)",
                report.missing_keywords.len(),
                report.coverage_percentage()
            );

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
            );
            let formatted = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&output_format, &input.resume.to_string_lossy(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&formatted, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", formatted),
            }
        }

        Commands::Optimize { input, out, model } => {
            let start = Instant::now();
            let engine = GapEngine::with_extra_stopwords(&config.analysis.extra_stopwords);
            let (resume_text, job_text, job_source) = load_inputs(&input).await?;

            let comparison = engine.compare(&resume_text, &job_text);
            let sections = extract_summary_and_skills(&resume_text);
            if sections.summary.is_none() || sections.skills.is_none() {
                warn!("Could not locate both summary and skills sections; missing ones will be appended");
            }

            let mut rewrite_config = config.rewrite.clone();
            if let Some(model) = model {
                rewrite_config.model = model;
            }
            let rewriter = OpenAiRewriter::new(rewrite_config, config.rewrite_api_key()?)?;

            let request = RewriteRequest {
                job_description: job_text.clone(),
                summary: sections.summary_text().to_string(),
                skills: sections.skills_text().to_string(),
                missing_keywords: comparison.missing_keywords.clone().into_vec(),
            };

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(format!("Rewriting sections with {}...", rewriter.model()));
            spinner.enable_steady_tick(Duration::from_millis(120));
            let rewritten = rewriter.rewrite(&request).await;
            spinner.finish_and_clear();
            let rewritten = rewritten?;

            let document = substitute_sections(&resume_text, &sections, &rewritten);
            PdfRenderer::new().render(&document, "Optimized Resume", &out)?;

            let report = GapReport::from_comparison(
                &comparison,
                input.resume.display().to_string(),
                job_source,
                start.elapsed().as_millis() as u64,
            )
            .with_rewritten(rewritten);

            let generator = ReportGenerator::with_options(config.output.color_output, config.output.detailed);
            println!("{}", generator.generate_report(&report, &config.output.format)?);
            println!("Optimized resume written to {}", out.display());
        }

        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let engine = GapEngine::with_extra_stopwords(&config.analysis.extra_stopwords);
            let rewriter = match config
                .rewrite_api_key()
                .and_then(|key| OpenAiRewriter::new(config.rewrite.clone(), key))
            {
                Ok(rewriter) => Some(rewriter),
                Err(e) => {
                    warn!("Rewrite endpoint disabled: {}", e);
                    None
                }
            };

            let addr = config.server_addr();
            server::serve(AppState::new(engine, rewriter), &addr).await?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeGapError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }

            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults at {}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

/// Read the resume and the job description; returns (resume, job, job source label)
async fn load_inputs(input: &InputArgs) -> Result<(String, String, String)> {
    cli::validate_file_extension(&input.resume, INPUT_EXTENSIONS)
        .map_err(|e| ResumeGapError::InvalidInput(format!("Resume file: {}", e)))?;
    if let Some(job) = &input.job {
        cli::validate_file_extension(job, INPUT_EXTENSIONS)
            .map_err(|e| ResumeGapError::InvalidInput(format!("Job description file: {}", e)))?;
    }

    let mut input_manager = InputManager::new();
    let resume_text = input_manager.extract_text(&input.resume).await?;
    let job_text = input_manager
        .resolve_text(input.job.as_deref(), input.job_text.as_deref(), "job description")
        .await?;

    let job_source = input
        .job
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "inline text".to_string());

    Ok((resume_text, job_text, job_source))
}
