//! Prompt template for the section rewrite request

use crate::error::{Result, ResumeGapError};
use log::debug;
use serde::{Deserialize, Serialize};

/// Inputs to one rewrite call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub job_description: String,
    pub summary: String,
    pub skills: String,
    pub missing_keywords: Vec<String>,
}

/// Rewritten summary and skills text, without their headings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewrittenSections {
    pub summary: String,
    pub skills: String,
}

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub rewrite_sections: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            rewrite_sections: REWRITE_SECTIONS_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render_rewrite(&self, request: &RewriteRequest) -> String {
        let keywords = if request.missing_keywords.is_empty() {
            "(none)".to_string()
        } else {
            request.missing_keywords.join(", ")
        };

        let prompt = self
            .rewrite_sections
            .replace("{job}", request.job_description.trim())
            .replace("{summary}", request.summary.trim())
            .replace("{skills}", request.skills.trim())
            .replace("{keywords}", &keywords);

        debug!(
            "Rendered rewrite prompt: {} chars, {} missing keywords",
            prompt.len(),
            request.missing_keywords.len()
        );

        prompt
    }
}

const SUMMARY_LABEL: &str = "Summary:";
const SKILLS_LABEL: &str = "Skills:";

/// Split a model reply into its `Summary:` and `Skills:` parts.
///
/// Both labels must be present with the summary first; anything else is
/// rejected so that no half-rewritten document gets produced.
pub fn parse_rewritten_sections(output: &str) -> Result<RewrittenSections> {
    let (Some(summary_idx), Some(skills_idx)) = (output.find(SUMMARY_LABEL), output.find(SKILLS_LABEL)) else {
        return Err(ResumeGapError::Rewrite(
            "Reply is missing the 'Summary:' or 'Skills:' label".to_string(),
        ));
    };

    if summary_idx >= skills_idx {
        return Err(ResumeGapError::Rewrite(
            "Reply lists 'Skills:' before 'Summary:'".to_string(),
        ));
    }

    Ok(RewrittenSections {
        summary: output[summary_idx + SUMMARY_LABEL.len()..skills_idx].trim().to_string(),
        skills: output[skills_idx + SKILLS_LABEL.len()..].trim().to_string(),
    })
}

const REWRITE_SECTIONS_TEMPLATE: &str = r#"You are a professional resume editor. Enhance the following resume sections to better align with the job description.

Job Description:
{job}

Original Summary:
{summary}

Original Skills:
{skills}

Keywords from the job description that the resume does not mention:
{keywords}

Please rewrite the Summary and Skills using relevant keywords from the job description, keeping the tone professional. Only claim skills that the original sections support.

Reply in exactly this format:
Summary: <rewritten summary>
Skills: <rewritten skills>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_all_inputs() {
        let templates = PromptTemplates::default();
        let request = RewriteRequest {
            job_description: "Senior engineer, Python and AWS".to_string(),
            summary: "Engineer with Java experience.".to_string(),
            skills: "Java, SQL".to_string(),
            missing_keywords: vec!["aws".to_string(), "python".to_string()],
        };

        let prompt = templates.render_rewrite(&request);

        assert!(prompt.contains("Senior engineer, Python and AWS"));
        assert!(prompt.contains("Engineer with Java experience."));
        assert!(prompt.contains("Java, SQL"));
        assert!(prompt.contains("aws, python"));
        assert!(!prompt.contains("{job}"));
        assert!(!prompt.contains("{keywords}"));
    }

    #[test]
    fn test_render_without_keywords() {
        let prompt = PromptTemplates::default().render_rewrite(&RewriteRequest::default());
        assert!(prompt.contains("(none)"));
    }

    #[test]
    fn test_parse_reply() {
        let reply = "Here you go.\nSummary: Backend engineer shipping Python services on AWS.\n\nSkills: Python, Django, AWS, SQL\n";
        let sections = parse_rewritten_sections(reply).unwrap();

        assert_eq!(sections.summary, "Backend engineer shipping Python services on AWS.");
        assert_eq!(sections.skills, "Python, Django, AWS, SQL");
    }

    #[test]
    fn test_parse_rejects_missing_label() {
        assert!(matches!(
            parse_rewritten_sections("Summary: only a summary"),
            Err(ResumeGapError::Rewrite(_))
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_order() {
        assert!(matches!(
            parse_rewritten_sections("Skills: Rust\nSummary: Engineer"),
            Err(ResumeGapError::Rewrite(_))
        ));
    }
}
