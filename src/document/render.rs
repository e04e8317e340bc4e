/*!
 * Document file formats.
 *
 * - JSON: lossless serde form, readable and writable
 * - HTML: styled output for viewing and printing, write-only
 * - Text: plain paragraphs, one per line; styling is dropped on write
 */

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::document::model::{Paragraph, ParagraphStyle, RichDocument, StyledRun};
use crate::errors::DocumentError;

/// On-disk document format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Json,
    #[default]
    Html,
    Text,
}

impl DocumentFormat {
    /// Format for a path's extension
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "html" | "htm" => Ok(Self::Html),
            "txt" | "md" => Ok(Self::Text),
            other => Err(DocumentError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Canonical file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
            Self::Text => "txt",
        }
    }

    /// Whether documents in this format can be read back
    pub fn is_loadable(&self) -> bool {
        matches!(self, Self::Json | Self::Text)
    }
}

/// Read a document from disk.
pub fn load_document(path: &Path) -> Result<RichDocument, DocumentError> {
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(&content)?),
        DocumentFormat::Text => Ok(parse_text(&content)),
        DocumentFormat::Html => Err(DocumentError::UnsupportedFormat(
            "html documents cannot be loaded".to_string(),
        )),
    }
}

/// Write a document to disk in the format implied by its extension.
///
/// The file is written to a temporary sibling and then moved into place, so a
/// failed save leaves any earlier file untouched.
pub fn save_document(document: &RichDocument, path: &Path) -> Result<(), DocumentError> {
    let content = match DocumentFormat::from_path(path)? {
        DocumentFormat::Json => serde_json::to_string_pretty(document)?,
        DocumentFormat::Html => render_html(document),
        DocumentFormat::Text => render_text(document),
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.persist(path).map_err(|e| DocumentError::Io(e.error))?;
    Ok(())
}

/// One paragraph per line; blank lines become empty paragraphs.
pub fn parse_text(content: &str) -> RichDocument {
    let paragraphs = content
        .lines()
        .map(|line| {
            let mut paragraph = Paragraph::new(ParagraphStyle::Normal);
            if !line.is_empty() {
                paragraph.runs.push(StyledRun::plain(line));
            }
            paragraph
        })
        .collect();
    RichDocument { paragraphs }
}

fn number_prefix(paragraph: &Paragraph) -> String {
    paragraph
        .numbering
        .map(|n| format!("{}. ", n.value))
        .unwrap_or_default()
}

fn indent_level(paragraph: &Paragraph) -> u8 {
    match (paragraph.numbering, paragraph.style) {
        (Some(n), _) if n.level > 0 => n.level,
        (_, ParagraphStyle::ListNumber2) => 1,
        _ => 0,
    }
}

/// Plain-text rendering with list numbers and indentation.
pub fn render_text(document: &RichDocument) -> String {
    let mut out = String::new();
    for paragraph in &document.paragraphs {
        match paragraph.style {
            ParagraphStyle::PageBreak => out.push('\u{000C}'),
            _ => {
                out.push_str(&"    ".repeat(indent_level(paragraph) as usize));
                out.push_str(&number_prefix(paragraph));
                out.push_str(&paragraph.text());
            }
        }
        out.push('\n');
    }
    out
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_run_html(run: &StyledRun) -> String {
    let mut html = escape_html(&run.text);
    if run.underline {
        html = format!("<u>{}</u>", html);
    }
    if run.italic {
        html = format!("<i>{}</i>", html);
    }
    if run.bold {
        html = format!("<b>{}</b>", html);
    }
    html
}

fn render_runs_html(paragraph: &Paragraph) -> String {
    paragraph.runs.iter().map(render_run_html).collect()
}

/// Standalone HTML page.
pub fn render_html(document: &RichDocument) -> String {
    let title = document
        .paragraphs
        .iter()
        .find(|p| matches!(p.style, ParagraphStyle::Heading(_)))
        .map(|p| p.text())
        .unwrap_or_else(|| "Document".to_string());

    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html>\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{}</title>", escape_html(&title));
    let _ = writeln!(
        out,
        "<style>\nbody {{ font-family: \"Times New Roman\", serif; }}\n\
         p.level-1 {{ margin-left: 2em; }}\n\
         div.page-break {{ page-break-after: always; }}\n</style>"
    );
    let _ = writeln!(out, "</head>\n<body>");

    for paragraph in &document.paragraphs {
        match paragraph.style {
            ParagraphStyle::Heading(0) => {
                let _ = writeln!(out, "<h1 class=\"title\">{}</h1>", render_runs_html(paragraph));
            }
            ParagraphStyle::Heading(level) => {
                let tag = (level as usize + 1).min(6);
                let _ = writeln!(out, "<h{tag}>{}</h{tag}>", render_runs_html(paragraph));
            }
            ParagraphStyle::PageBreak => {
                let _ = writeln!(out, "<div class=\"page-break\"></div>");
            }
            _ => {
                let _ = writeln!(
                    out,
                    "<p class=\"level-{}\">{}{}</p>",
                    indent_level(paragraph),
                    number_prefix(paragraph),
                    render_runs_html(paragraph)
                );
            }
        }
    }

    let _ = writeln!(out, "</body>\n</html>");
    out
}
