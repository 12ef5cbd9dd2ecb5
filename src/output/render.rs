//! Rendering of the rewritten resume into a new PDF document

use crate::error::{Result, ResumeGapError};
use crate::processing::sections::{LocatedSection, ResumeSections};
use crate::rewrite::RewrittenSections;
use log::info;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::path::Path;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;

/// Replace the located summary and skills blocks with their rewritten text.
///
/// A section the heuristic could not find is appended at the end instead,
/// so rewritten content is never silently dropped.
pub fn substitute_sections(text: &str, sections: &ResumeSections, rewritten: &RewrittenSections) -> String {
    let mut replacements: Vec<(&LocatedSection, String)> = Vec::new();
    let mut appended = Vec::new();

    for (located, heading, body) in [
        (&sections.summary, "Summary", &rewritten.summary),
        (&sections.skills, "Skills", &rewritten.skills),
    ] {
        let block = format!("{}\n{}\n\n", heading, body.trim());
        match located {
            Some(section) => replacements.push((section, block)),
            None if !body.trim().is_empty() => appended.push(block),
            None => {}
        }
    }

    // Later spans first so earlier offsets stay valid
    replacements.sort_by(|a, b| b.0.span.start.cmp(&a.0.span.start));

    let mut output = text.to_string();
    for (section, block) in replacements {
        output.replace_range(section.span.clone(), &block);
    }

    for block in appended {
        if !output.ends_with("\n\n") {
            output.push_str(if output.ends_with('\n') { "\n" } else { "\n\n" });
        }
        output.push_str(&block);
    }

    output.trim_end().to_string()
}

/// Greedy word wrap; words longer than a line are hard-split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                let piece: String = piece.iter().collect();
                let piece_len = piece.chars().count();

                if current_len > 0 && current_len + 1 + piece_len > max_chars {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(&piece);
                current_len += piece_len;
            }
        }

        lines.push(current);
    }

    lines
}

/// Lays text out on A4 pages in Helvetica.
pub struct PdfRenderer {
    font_size: f32,
    line_height_mm: f32,
    max_chars_per_line: usize,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self {
            font_size: 11.0,
            line_height_mm: 5.5,
            max_chars_per_line: 95,
        }
    }
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lines_per_page(&self) -> usize {
        (((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / self.line_height_mm).floor() as usize).max(1)
    }

    pub fn render_to_bytes(&self, text: &str, title: &str) -> Result<Vec<u8>> {
        let lines = wrap_text(text, self.max_chars_per_line);
        let (doc, first_page, first_layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ResumeGapError::Rendering(e.to_string()))?;

        for (page_index, chunk) in lines.chunks(self.lines_per_page()).enumerate() {
            let (page, layer) = if page_index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), format!("Layer {}", page_index + 1))
            };
            let layer = doc.get_page(page).get_layer(layer);

            let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
            for line in chunk {
                if !line.is_empty() {
                    layer.use_text(line.as_str(), self.font_size, Mm(MARGIN_MM), Mm(y), &font);
                }
                y -= self.line_height_mm;
            }
        }

        doc.save_to_bytes()
            .map_err(|e| ResumeGapError::Rendering(e.to_string()))
    }

    /// Render and write `path`. Nothing is written if rendering fails.
    pub fn render(&self, text: &str, title: &str, path: &Path) -> Result<()> {
        let bytes = self.render_to_bytes(text, title)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;

        info!("Wrote rewritten resume to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::sections::extract_summary_and_skills;

    fn rewritten() -> RewrittenSections {
        RewrittenSections {
            summary: "Python engineer building Django services on AWS.".to_string(),
            skills: "Python, Django, AWS, SQL".to_string(),
        }
    }

    #[test]
    fn test_substitute_located_sections() {
        let text = "Jane Doe\n\nSummary\nJava engineer.\n\nSkills\nJava, SQL\n\nEducation\nBSc\n";
        let sections = extract_summary_and_skills(text);
        let output = substitute_sections(text, &sections, &rewritten());

        assert!(output.starts_with("Jane Doe\n\nSummary\nPython engineer building Django services on AWS.\n\nSkills\nPython, Django, AWS, SQL\n\nEducation\nBSc"));
        assert!(!output.contains("Java engineer."));
    }

    #[test]
    fn test_missing_sections_are_appended() {
        let text = "Jane Doe\nExperience\nAcme";
        let sections = extract_summary_and_skills(text);
        let output = substitute_sections(text, &sections, &rewritten());

        assert!(output.starts_with("Jane Doe\nExperience\nAcme\n\nSummary\nPython engineer"));
        assert!(output.ends_with("Skills\nPython, Django, AWS, SQL"));
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("alpha beta gamma delta\n\nepsilon", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta", "", "epsilon"]);

        let long = wrap_text("abcdefghij", 4);
        assert_eq!(long, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_render_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("resume.pdf");
        let text = (0..120).map(|i| format!("Line number {}", i)).collect::<Vec<_>>().join("\n");

        PdfRenderer::new().render(&text, "Resume", &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
