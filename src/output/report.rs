//! Report structures for a keyword gap comparison

use crate::processing::gap::Comparison;
use crate::rewrite::RewrittenSections;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the formatters need to present one comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapReport {
    /// Job-description keywords absent from the resume, sorted
    pub missing_keywords: Vec<String>,

    /// Keywords present in both documents, sorted
    pub matched_keywords: Vec<String>,

    pub resume_token_count: usize,
    pub job_token_count: usize,

    /// Share of job keywords found in the resume (0.0 - 1.0)
    pub coverage: f32,

    /// Present only when the rewrite service was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten: Option<RewrittenSections>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub resume_source: String,
    pub job_source: String,
    pub version: String,
}

impl GapReport {
    pub fn from_comparison(
        comparison: &Comparison,
        resume_source: impl Into<String>,
        job_source: impl Into<String>,
        processing_time_ms: u64,
    ) -> Self {
        let matched_keywords = comparison
            .job_tokens
            .iter()
            .filter(|token| comparison.resume_tokens.contains(token))
            .map(str::to_string)
            .collect();

        Self {
            missing_keywords: comparison.missing_keywords.keywords().clone().into_vec(),
            matched_keywords,
            resume_token_count: comparison.resume_tokens.len(),
            job_token_count: comparison.job_tokens.len(),
            coverage: comparison.coverage(),
            rewritten: None,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                processing_time_ms,
                resume_source: resume_source.into(),
                job_source: job_source.into(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn with_rewritten(mut self, rewritten: RewrittenSections) -> Self {
        self.rewritten = Some(rewritten);
        self
    }

    pub fn coverage_percentage(&self) -> u8 {
        (self.coverage * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// One-line verdict keyed on coverage
    pub fn verdict(&self) -> &'static str {
        match self.coverage_percentage() {
            90..=100 => "Resume already mentions nearly every job keyword",
            70..=89 => "Good keyword overlap with a few gaps",
            40..=69 => "Noticeable keyword gaps worth addressing",
            _ => "Most job keywords are missing from the resume",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::GapEngine;

    #[test]
    fn test_report_from_comparison() {
        let comparison = GapEngine::default().compare("Rust and SQL", "Rust, SQL, Python and AWS");
        let report = GapReport::from_comparison(&comparison, "resume.txt", "inline", 3);

        assert_eq!(report.missing_keywords, vec!["aws", "python"]);
        assert_eq!(report.matched_keywords, vec!["rust", "sql"]);
        assert_eq!(report.job_token_count, 4);
        assert_eq!(report.coverage_percentage(), 50);
        assert_eq!(report.verdict(), "Noticeable keyword gaps worth addressing");
        assert_eq!(report.metadata.processing_time_ms, 3);
    }

    #[test]
    fn test_json_uses_missing_keywords_key() {
        let comparison = GapEngine::default().compare("", "Django");
        let report = GapReport::from_comparison(&comparison, "a", "b", 0);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["missing_keywords"], serde_json::json!(["django"]));
        assert!(value.get("rewritten").is_none());
    }
}
