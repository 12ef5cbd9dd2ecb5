//! Best-effort detection of the summary and skills blocks of a resume.
//!
//! This is a line heuristic and sits outside the keyword gap contract: a
//! resume without recognizable headings simply yields empty sections.

use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
    Education,
    Projects,
    Certifications,
}

/// Heading aliases, longest first within each kind
const SECTION_HEADINGS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Summary,
        &["professional summary", "career summary", "about me", "objective", "summary", "profile"],
    ),
    (
        SectionKind::Skills,
        &["technical skills", "core competencies", "key skills", "skills", "expertise"],
    ),
    (
        SectionKind::Experience,
        &["professional experience", "work experience", "employment history", "experience", "employment"],
    ),
    (SectionKind::Education, &["academic background", "education"]),
    (SectionKind::Projects, &["notable projects", "projects", "portfolio"]),
    (SectionKind::Certifications, &["certifications", "certificates", "licenses"]),
];

/// One located section: its body and the byte range it spans in the source,
/// heading line included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedSection {
    pub content: String,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSections {
    pub summary: Option<LocatedSection>,
    pub skills: Option<LocatedSection>,
}

impl ResumeSections {
    pub fn summary_text(&self) -> &str {
        self.summary.as_ref().map(|s| s.content.as_str()).unwrap_or("")
    }

    pub fn skills_text(&self) -> &str {
        self.skills.as_ref().map(|s| s.content.as_str()).unwrap_or("")
    }
}

struct Heading<'a> {
    kind: SectionKind,
    line_start: usize,
    inline: &'a str,
}

/// Locate the first summary and skills sections in `text`.
pub fn extract_summary_and_skills(text: &str) -> ResumeSections {
    let mut headings = Vec::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if let Some((kind, inline)) = classify_heading(line) {
            headings.push(Heading {
                kind,
                line_start: offset,
                inline,
            });
        }
        offset += line.len();
    }

    let locate = |wanted: SectionKind| -> Option<LocatedSection> {
        let index = headings.iter().position(|h| h.kind == wanted)?;
        let heading = &headings[index];
        let end = headings
            .get(index + 1)
            .map(|next| next.line_start)
            .unwrap_or(text.len());

        let heading_line_end = text[heading.line_start..end]
            .find('\n')
            .map(|pos| heading.line_start + pos + 1)
            .unwrap_or(end);

        let mut content = heading.inline.trim().to_string();
        let body = text[heading_line_end..end].trim();
        if !body.is_empty() {
            if !content.is_empty() {
                content.push('\n');
            }
            content.push_str(body);
        }

        Some(LocatedSection {
            content,
            span: heading.line_start..end,
        })
    };

    ResumeSections {
        summary: locate(SectionKind::Summary),
        skills: locate(SectionKind::Skills),
    }
}

/// A heading line starts with a known alias and is followed by nothing, or
/// by a colon and optional inline content.
fn classify_heading(line: &str) -> Option<(SectionKind, &str)> {
    let trimmed = line.trim();
    let lower = trimmed.to_lowercase();

    for (kind, aliases) in SECTION_HEADINGS {
        for alias in aliases.iter().copied() {
            let Some(rest) = lower.strip_prefix(alias) else {
                continue;
            };

            if rest.trim().is_empty() {
                return Some((*kind, ""));
            }
            if rest.starts_with(':') {
                let inline = trimmed.get(alias.len() + 1..).unwrap_or("");
                return Some((*kind, inline));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\n\
        jane@example.com\n\
        \n\
        Professional Summary\n\
        Backend engineer with eight years of experience.\n\
        Loves distributed systems.\n\
        \n\
        Technical Skills:\n\
        Java, SQL, Kafka\n\
        \n\
        Experience\n\
        Acme Corp - Senior Engineer\n";

    #[test]
    fn test_extracts_summary_and_skills() {
        let sections = extract_summary_and_skills(RESUME);

        assert_eq!(
            sections.summary_text(),
            "Backend engineer with eight years of experience.\nLoves distributed systems."
        );
        assert_eq!(sections.skills_text(), "Java, SQL, Kafka");
    }

    #[test]
    fn test_spans_cover_heading_and_body() {
        let sections = extract_summary_and_skills(RESUME);
        let summary = sections.summary.unwrap();
        let skills = sections.skills.unwrap();

        assert!(RESUME[summary.span.clone()].starts_with("Professional Summary\n"));
        assert_eq!(summary.span.end, skills.span.start);
        assert!(RESUME[skills.span.clone()].starts_with("Technical Skills:"));
        assert!(RESUME[skills.span.end..].starts_with("Experience"));
    }

    #[test]
    fn test_inline_skills_line() {
        let text = "Summary\nRust developer.\nSkills: Rust, Tokio, Axum\n";
        let sections = extract_summary_and_skills(text);

        assert_eq!(sections.summary_text(), "Rust developer.");
        assert_eq!(sections.skills_text(), "Rust, Tokio, Axum");
        assert_eq!(sections.skills.unwrap().span.end, text.len());
    }

    #[test]
    fn test_sentences_mentioning_skills_are_not_headings() {
        let text = "Summary\nSkilled engineer whose skills include Rust.\n";
        let sections = extract_summary_and_skills(text);

        assert_eq!(sections.summary_text(), "Skilled engineer whose skills include Rust.");
        assert!(sections.skills.is_none());
    }

    #[test]
    fn test_missing_sections() {
        let sections = extract_summary_and_skills("Just a plain paragraph of text.");
        assert_eq!(sections, ResumeSections::default());
        assert_eq!(sections.summary_text(), "");
        assert_eq!(sections.skills_text(), "");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "Skills\nRust\nEducation\nBSc\nSkills\nGo\n";
        let sections = extract_summary_and_skills(text);
        assert_eq!(sections.skills_text(), "Rust");
    }
}
