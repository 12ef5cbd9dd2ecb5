//! Keyword gap analysis between a resume and a job description

use crate::error::{Result, ResumeGapError};
use crate::processing::normalizer::{Normalizer, TokenSet};
use crate::processing::stopwords::StopwordSet;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Job-description tokens that the resume never mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordGap(TokenSet);

impl KeywordGap {
    pub fn keywords(&self) -> &TokenSet {
        &self.0
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_vec()
    }
}

/// Asymmetric set difference over token sets.
pub struct GapAnalyzer;

impl GapAnalyzer {
    /// `job_tokens \ resume_tokens`. Argument order matters.
    pub fn analyze(resume_tokens: &TokenSet, job_tokens: &TokenSet) -> KeywordGap {
        KeywordGap(
            job_tokens
                .iter()
                .filter(|token| !resume_tokens.contains(token))
                .collect(),
        )
    }
}

/// Full result of one comparison, kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub resume_tokens: TokenSet,
    pub job_tokens: TokenSet,
    pub missing_keywords: KeywordGap,
}

impl Comparison {
    pub fn matched_count(&self) -> usize {
        self.job_tokens.len() - self.missing_keywords.len()
    }

    /// Share of job tokens present in the resume; 1.0 for an empty job set
    pub fn coverage(&self) -> f32 {
        if self.job_tokens.is_empty() {
            1.0
        } else {
            self.matched_count() as f32 / self.job_tokens.len() as f32
        }
    }
}

/// Normalizer and analyzer wired together behind one entry point.
#[derive(Debug, Clone, Default)]
pub struct GapEngine {
    normalizer: Normalizer,
}

impl GapEngine {
    pub fn new(stop_words: Arc<StopwordSet>) -> Self {
        Self {
            normalizer: Normalizer::new(stop_words),
        }
    }

    /// Engine using the English stopwords plus the given extra words.
    /// Falls back to the shared English set when there are none.
    pub fn with_extra_stopwords(extra: &[String]) -> Self {
        if extra.is_empty() {
            Self::default()
        } else {
            Self::new(Arc::new(StopwordSet::with_extra(extra)))
        }
    }

    pub fn compute_keyword_gap(&self, resume_text: &str, job_text: &str) -> KeywordGap {
        self.compare(resume_text, job_text).missing_keywords
    }

    pub fn compare(&self, resume_text: &str, job_text: &str) -> Comparison {
        let resume_tokens = self.normalizer.normalize(resume_text);
        let job_tokens = self.normalizer.normalize(job_text);
        let missing_keywords = GapAnalyzer::analyze(&resume_tokens, &job_tokens);

        debug!(
            "Compared {} resume tokens against {} job tokens: {} missing",
            resume_tokens.len(),
            job_tokens.len(),
            missing_keywords.len()
        );

        Comparison {
            resume_tokens,
            job_tokens,
            missing_keywords,
        }
    }

    /// Boundary variant for callers whose inputs may be absent
    pub fn try_compare(&self, resume_text: Option<&str>, job_text: Option<&str>) -> Result<Comparison> {
        let resume_text = resume_text
            .ok_or_else(|| ResumeGapError::InvalidInput("resume text is required".to_string()))?;
        let job_text = job_text
            .ok_or_else(|| ResumeGapError::InvalidInput("job description text is required".to_string()))?;

        Ok(self.compare(resume_text, job_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> TokenSet {
        words.iter().copied().collect()
    }

    #[test]
    fn test_difference_is_asymmetric() {
        let resume = set(&["rust", "sql"]);
        let job = set(&["rust", "python"]);

        assert_eq!(GapAnalyzer::analyze(&resume, &job).into_vec(), vec!["python"]);
        assert_eq!(GapAnalyzer::analyze(&job, &resume).into_vec(), vec!["sql"]);
    }

    #[test]
    fn test_empty_job_yields_empty_gap() {
        let engine = GapEngine::default();
        assert!(engine.compute_keyword_gap("Rust engineer with SQL", "").is_empty());
        assert!(engine.compute_keyword_gap("", "").is_empty());
    }

    #[test]
    fn test_empty_resume_yields_full_gap() {
        let engine = GapEngine::default();
        let gap = engine.compute_keyword_gap("", "Python Django AWS");
        assert_eq!(gap.keywords(), &set(&["python", "django", "aws"]));
    }

    #[test]
    fn test_engineer_scenario() {
        let engine = GapEngine::default();
        let gap = engine.compute_keyword_gap(
            "Experienced engineer skilled in Java and SQL",
            "Looking for engineer with Python, Django, REST APIs, and AWS experience",
        );

        for keyword in ["python", "django", "rest", "apis", "aws"] {
            assert!(gap.contains(keyword), "missing {}", keyword);
        }
        assert!(!gap.contains("engineer"));
        // Exact matching: "experienced" does not cover "experience"
        assert_eq!(
            gap.into_vec(),
            vec!["apis", "aws", "django", "experience", "looking", "python", "rest"]
        );
    }

    #[test]
    fn test_gap_containment() {
        let engine = GapEngine::default();
        let cases = [
            ("Rust Go Kubernetes", "Go Kubernetes Terraform AWS"),
            ("", "anything at all"),
            ("Managed teams of 5 engineers", "Managing engineers, 5 teams!"),
            ("C++ and C#", "C C++ C# F#"),
        ];

        for (resume_text, job_text) in cases {
            let comparison = engine.compare(resume_text, job_text);
            for token in comparison.missing_keywords.iter() {
                assert!(comparison.job_tokens.contains(token));
                assert!(!comparison.resume_tokens.contains(token));
            }
        }
    }

    #[test]
    fn test_case_insensitive_match() {
        let engine = GapEngine::default();
        assert!(engine.compute_keyword_gap("PYTHON developer", "python Developer").is_empty());
    }

    #[test]
    fn test_coverage() {
        let engine = GapEngine::default();
        let comparison = engine.compare("rust sql", "rust sql python go");
        assert_eq!(comparison.matched_count(), 2);
        assert!((comparison.coverage() - 0.5).abs() < f32::EPSILON);

        let empty = engine.compare("rust", "");
        assert!((empty.coverage() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_try_compare_rejects_missing_input() {
        let engine = GapEngine::default();
        assert!(matches!(
            engine.try_compare(None, Some("python")),
            Err(ResumeGapError::InvalidInput(_))
        ));
        assert!(matches!(
            engine.try_compare(Some("python"), None),
            Err(ResumeGapError::InvalidInput(_))
        ));
        assert!(engine.try_compare(Some(""), Some("")).is_ok());
    }

    #[test]
    fn test_extra_stopwords_applied() {
        let engine = GapEngine::with_extra_stopwords(&["looking".to_string()]);
        let gap = engine.compute_keyword_gap("", "Looking for Rust");
        assert_eq!(gap.into_vec(), vec!["rust"]);
    }

    #[test]
    fn test_serialized_gap_is_sorted_list() {
        let engine = GapEngine::default();
        let gap = engine.compute_keyword_gap("", "Zig Ada Rust");
        assert_eq!(serde_json::to_string(&gap).unwrap(), r#"["ada","rust","zig"]"#);
    }
}
