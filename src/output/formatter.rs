//! Output formatters for gap reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeGapError};
use crate::output::report::GapReport;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting gap reports
pub trait OutputFormatter {
    fn format_report(&self, report: &GapReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Resume Keyword Gap Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; max-width: 860px; margin: 0 auto; padding: 20px; color: #333; }
        h1 { border-bottom: 3px solid #007acc; padding-bottom: 10px; }
        .badge { display: inline-block; padding: 6px 14px; border-radius: 16px; color: white; font-weight: bold; }
        .score-good { background: #28a745; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .keywords li { display: inline-block; margin: 4px; padding: 4px 10px; border-radius: 4px; background: #f1f3f5; }
        .missing li { background: #fdecea; }
        .metadata { color: #6c757d; font-size: 0.9em; margin-top: 30px; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Resume Keyword Gap Report</h1>
    <p>Keyword coverage: <span class="badge {{ score_class }}">{{ coverage }}%</span></p>
    <p><em>{{ verdict }}</em></p>

    <h2>Missing Keywords ({{ missing_keywords.len() }})</h2>
    {% if missing_keywords.is_empty() %}
    <p>None. Every job keyword appears in the resume.</p>
    {% else %}
    <ul class="keywords missing">
        {% for keyword in missing_keywords %}<li>{{ keyword }}</li>{% endfor %}
    </ul>
    {% endif %}

    <h2>Matched Keywords ({{ matched_keywords.len() }})</h2>
    <ul class="keywords">
        {% for keyword in matched_keywords %}<li>{{ keyword }}</li>{% endfor %}
    </ul>

    {% if has_rewrite %}
    <h2>Rewritten Sections</h2>
    <h3>Summary</h3>
    <p>{{ rewritten_summary }}</p>
    <h3>Skills</h3>
    <p>{{ rewritten_skills }}</p>
    {% endif %}

    <div class="metadata">
        <p>Generated {{ generated_at }} by resume-gap v{{ version }} in {{ processing_time }}ms</p>
        <p>Resume: {{ resume_source }} | Job: {{ job_source }}</p>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    score_class: &'static str,
    coverage: u8,
    verdict: &'static str,
    missing_keywords: &'a [String],
    matched_keywords: &'a [String],
    has_rewrite: bool,
    rewritten_summary: &'a str,
    rewritten_skills: &'a str,
    generated_at: String,
    version: &'a str,
    processing_time: u64,
    resume_source: &'a str,
    job_source: &'a str,
}

fn format_timestamp(report: &GapReport) -> String {
    report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_coverage_badge(&self, coverage: u8) -> String {
        let (badge, color) = match coverage {
            90..=100 => ("EXCELLENT", Color::Green),
            70..=89 => ("GOOD", Color::Yellow),
            40..=69 => ("FAIR", Color::BrightYellow),
            _ => ("POOR", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &GapReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME KEYWORD GAP", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Keyword coverage: {}% {}\n",
            report.coverage_percentage(),
            self.format_coverage_badge(report.coverage_percentage())
        ));
        output.push_str(&format!(
            "Matched {} of {} job keywords\n",
            report.matched_keywords.len(),
            report.job_token_count
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(report.verdict(), Color::Cyan)));

        output.push_str(&self.format_header(
            &format!("Missing Keywords ({})", report.missing_keywords.len()),
            2,
        ));
        if report.missing_keywords.is_empty() {
            output.push_str("  None. Every job keyword appears in the resume.\n");
        } else {
            for keyword in &report.missing_keywords {
                output.push_str(&format!("  • {}\n", self.colorize(keyword, Color::Red)));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header(
                &format!("Matched Keywords ({})", report.matched_keywords.len()),
                3,
            ));
            for keyword in &report.matched_keywords {
                output.push_str(&format!("  • {}\n", self.colorize(keyword, Color::Green)));
            }
            output.push_str(&format!(
                "\nResume tokens: {} | Job tokens: {}\n",
                report.resume_token_count, report.job_token_count
            ));
            output.push_str(&format!(
                "Resume: {} | Job: {}\n",
                report.metadata.resume_source, report.metadata.job_source
            ));
        }

        if let Some(rewritten) = &report.rewritten {
            output.push_str(&self.format_header("Rewritten Summary", 2));
            output.push_str(&format!("{}\n", rewritten.summary));
            output.push_str(&self.format_header("Rewritten Skills", 2));
            output.push_str(&format!("{}\n", rewritten.skills));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &GapReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn keyword_list(keywords: &[String]) -> String {
        if keywords.is_empty() {
            "_None_\n\n".to_string()
        } else {
            let items: Vec<String> = keywords.iter().map(|k| format!("`{}`", k)).collect();
            format!("{}\n\n", items.join(", "))
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &GapReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Keyword Gap Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                format_timestamp(report),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.resume_source, report.metadata.job_source
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| Keyword coverage | {}% |\n", report.coverage_percentage()));
        output.push_str(&format!("| Job keywords | {} |\n", report.job_token_count));
        output.push_str(&format!("| Matched | {} |\n", report.matched_keywords.len()));
        output.push_str(&format!("| Missing | {} |\n\n", report.missing_keywords.len()));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict()));

        output.push_str("## Missing Keywords\n\n");
        output.push_str(&Self::keyword_list(&report.missing_keywords));

        output.push_str("## Matched Keywords\n\n");
        output.push_str(&Self::keyword_list(&report.matched_keywords));

        if let Some(rewritten) = &report.rewritten {
            output.push_str("## Rewritten Sections\n\n");
            output.push_str(&format!("### Summary\n\n{}\n\n", rewritten.summary));
            output.push_str(&format!("### Skills\n\n{}\n\n", rewritten.skills));
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &GapReport) -> Result<String> {
        let coverage = report.coverage_percentage();
        let score_class = match coverage {
            70..=100 => "score-good",
            40..=69 => "score-fair",
            _ => "score-poor",
        };

        let template = HtmlTemplate {
            include_styles: self.include_styles,
            score_class,
            coverage,
            verdict: report.verdict(),
            missing_keywords: &report.missing_keywords,
            matched_keywords: &report.matched_keywords,
            has_rewrite: report.rewritten.is_some(),
            rewritten_summary: report.rewritten.as_ref().map(|r| r.summary.as_str()).unwrap_or(""),
            rewritten_skills: report.rewritten.as_ref().map(|r| r.skills.as_str()).unwrap_or(""),
            generated_at: format_timestamp(report),
            version: &report.metadata.version,
            processing_time: report.metadata.processing_time_ms,
            resume_source: &report.metadata.resume_source,
            job_source: &report.metadata.job_source,
        };

        template
            .render()
            .map_err(|e| ResumeGapError::OutputFormatting(e.to_string()))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &GapReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_gap{}.{}", base_name, timestamp_suffix, extension)
}
