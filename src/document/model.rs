/*!
 * Format-neutral rich-text document model.
 *
 * A document is an ordered list of paragraphs, each holding styled runs.
 * Runs are immutable values once handed over; the only in-place change the
 * sink allows is restyling a run through its handle.
 */

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::DocumentError;

/// A span of text with uniform emphasis
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyledRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl StyledRun {
    pub fn new(text: impl Into<String>, bold: bool, italic: bool, underline: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
            underline,
        }
    }

    /// Unformatted run
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, false, false, false)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text, false, true, false)
    }

    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.underline
    }
}

/// Paragraph style tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphStyle {
    #[default]
    Normal,
    /// Top-level numbered list item
    ListNumber,
    /// Nested numbered list item
    ListNumber2,
    /// Heading; level 0 is the document title
    Heading(u8),
    PageBreak,
}

/// Computed list position of a numbered paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNumbering {
    pub level: u8,
    pub value: u32,
}

/// A paragraph and its runs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub style: ParagraphStyle,
    #[serde(default)]
    pub runs: Vec<StyledRun>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering: Option<ListNumbering>,
}

impl Paragraph {
    pub fn new(style: ParagraphStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Handle to a paragraph inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParagraphId(pub usize);

/// Handle to a run inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId {
    pub paragraph: usize,
    pub run: usize,
}

/// Output side of the formatter: anything that can receive headings,
/// paragraphs and styled runs.
pub trait DocumentSink {
    /// Append a heading; level 0 is the document title
    fn add_heading(&mut self, text: &str, level: u8) -> ParagraphId;

    fn add_page_break(&mut self);

    /// Append a paragraph, optionally seeded with plain text
    fn add_paragraph(&mut self, text: &str, style: ParagraphStyle) -> ParagraphId;

    /// Append a styled run to a paragraph
    fn append_run(&mut self, paragraph: ParagraphId, run: StyledRun) -> Result<RunId, DocumentError>;

    /// Replace the emphasis of an existing run
    fn set_run_style(
        &mut self,
        run: RunId,
        bold: bool,
        italic: bool,
        underline: bool,
    ) -> Result<(), DocumentError>;

    /// Number `paragraph` as a list item.
    ///
    /// With `prev` set to the previous item at the same level the numbering
    /// continues from it; otherwise it restarts at 1.
    fn list_number(
        &mut self,
        paragraph: ParagraphId,
        prev: Option<ParagraphId>,
        level: u8,
    ) -> Result<(), DocumentError>;

    /// Plain text of every paragraph in order
    fn paragraph_texts(&self) -> Vec<String>;

    fn save(&self, path: &Path) -> Result<(), DocumentError>;

    fn append_runs(&mut self, paragraph: ParagraphId, runs: Vec<StyledRun>) -> Result<(), DocumentError> {
        for run in runs {
            self.append_run(paragraph, run)?;
        }
        Ok(())
    }
}

/// In-memory document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RichDocument {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl RichDocument {
    /// Start an empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(&self, id: ParagraphId) -> Option<&Paragraph> {
        self.paragraphs.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    fn push(&mut self, paragraph: Paragraph) -> ParagraphId {
        self.paragraphs.push(paragraph);
        ParagraphId(self.paragraphs.len() - 1)
    }

    fn paragraph_mut(&mut self, id: ParagraphId) -> Result<&mut Paragraph, DocumentError> {
        self.paragraphs
            .get_mut(id.0)
            .ok_or(DocumentError::UnknownParagraph(id.0))
    }
}

impl DocumentSink for RichDocument {
    fn add_heading(&mut self, text: &str, level: u8) -> ParagraphId {
        let mut paragraph = Paragraph::new(ParagraphStyle::Heading(level));
        paragraph.runs.push(StyledRun::plain(text));
        self.push(paragraph)
    }

    fn add_page_break(&mut self) {
        self.push(Paragraph::new(ParagraphStyle::PageBreak));
    }

    fn add_paragraph(&mut self, text: &str, style: ParagraphStyle) -> ParagraphId {
        let mut paragraph = Paragraph::new(style);
        if !text.is_empty() {
            paragraph.runs.push(StyledRun::plain(text));
        }
        self.push(paragraph)
    }

    fn append_run(&mut self, paragraph: ParagraphId, run: StyledRun) -> Result<RunId, DocumentError> {
        let target = self.paragraph_mut(paragraph)?;
        target.runs.push(run);
        Ok(RunId {
            paragraph: paragraph.0,
            run: target.runs.len() - 1,
        })
    }

    fn set_run_style(
        &mut self,
        run: RunId,
        bold: bool,
        italic: bool,
        underline: bool,
    ) -> Result<(), DocumentError> {
        let target = self
            .paragraphs
            .get_mut(run.paragraph)
            .and_then(|p| p.runs.get_mut(run.run))
            .ok_or(DocumentError::UnknownRun {
                paragraph: run.paragraph,
                run: run.run,
            })?;
        target.bold = bold;
        target.italic = italic;
        target.underline = underline;
        Ok(())
    }

    fn list_number(
        &mut self,
        paragraph: ParagraphId,
        prev: Option<ParagraphId>,
        level: u8,
    ) -> Result<(), DocumentError> {
        let value = match prev {
            Some(prev_id) => match self.paragraph(prev_id) {
                Some(p) => match p.numbering {
                    Some(n) if n.level == level => n.value + 1,
                    _ => 1,
                },
                None => return Err(DocumentError::UnknownParagraph(prev_id.0)),
            },
            None => 1,
        };

        self.paragraph_mut(paragraph)?.numbering = Some(ListNumbering { level, value });
        Ok(())
    }

    fn paragraph_texts(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::text).collect()
    }

    fn save(&self, path: &Path) -> Result<(), DocumentError> {
        crate::document::render::save_document(self, path)
    }
}
