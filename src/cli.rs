//! CLI interface for the resume gap tool

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-gap")]
#[command(about = "Find job-description keywords missing from a resume")]
#[command(long_about = "Compare a resume against a job description, list the job keywords the resume never mentions, and optionally rewrite the summary and skills sections to cover them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Where the resume and job description come from
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to resume file (PDF, TXT, MD)
    #[arg(short, long)]
    pub resume: PathBuf,

    /// Path to job description file (PDF, TXT, MD)
    #[arg(short, long, conflicts_with = "job_text")]
    pub job: Option<PathBuf>,

    /// Job description given directly as text
    #[arg(long)]
    pub job_text: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List job-description keywords missing from the resume
    Gap {
        #[command(flatten)]
        input: InputArgs,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Include matched keywords and token counts
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Rewrite summary and skills around the missing keywords and render a new PDF
    Optimize {
        #[command(flatten)]
        input: InputArgs,

        /// Path of the PDF to write
        #[arg(long, default_value = "optimized_resume.pdf")]
        out: PathBuf,

        /// Override the configured model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Serve the comparison API over HTTP
    Serve {
        /// Override the configured host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_gap_with_inline_job() {
        let cli = Cli::parse_from([
            "resume-gap", "gap", "--resume", "cv.pdf", "--job-text", "Python AWS", "-o", "json",
        ]);

        match cli.command {
            Commands::Gap { input, output, .. } => {
                assert_eq!(input.resume, PathBuf::from("cv.pdf"));
                assert!(input.job.is_none());
                assert_eq!(input.job_text.as_deref(), Some("Python AWS"));
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected gap command"),
        }
    }

    #[test]
    fn test_job_sources_conflict() {
        let result = Cli::try_parse_from([
            "resume-gap", "gap", "--resume", "cv.pdf", "--job", "job.txt", "--job-text", "Python",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("html"), Ok(OutputFormat::Html));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("a.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("a.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("a"), &["pdf"]).is_err());
    }
}
