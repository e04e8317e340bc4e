/*!
 * Packet assembly.
 *
 * Turns one packet's question tree into document content:
 * - the visual-answers section: packet heading, numbered answerlines and a
 *   nested, numbered list of slide sources
 * - optionally, the hybrid content appended to a written packet: numbered
 *   placeholder lines with power marks, `ANSWER:` lines and author tags
 *
 * The assembler is the only component that writes to a document.
 */

use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::annotation::{self, PowerThresholds, QuestionCredits};
use crate::answerline::{self, ParsedAnswer};
use crate::database::{Packet, Question};
use crate::document::{DocumentSink, ParagraphId, ParagraphStyle, StyledRun};
use crate::errors::DocumentError;

/// Leading question number of a written paragraph, e.g. `12.` in `12. This film...`
static QUESTION_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.+").unwrap());

/// Highest question number already present in a written packet.
///
/// Numbers too wide for `u32` saturate to `u32::MAX`.
pub fn max_leading_number<D: DocumentSink>(document: &D) -> u32 {
    document
        .paragraph_texts()
        .iter()
        .filter_map(|text| QUESTION_NUMBER.captures(text))
        .map(|caps| caps[1].parse::<u32>().unwrap_or(u32::MAX))
        .max()
        .unwrap_or(0)
}

/// Settings that shape assembled content
#[derive(Debug, Clone)]
pub struct AssemblerOptions {
    /// Log every answerline as it is written
    pub verbose: bool,
    /// Author tags after hybrid answers
    pub tags: bool,
    /// Print the last slide number on placeholder lines
    pub force_end: bool,
    pub visual_questions: u32,
    pub total_questions: u32,
    pub thresholds: PowerThresholds,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            tags: true,
            force_end: true,
            visual_questions: 10,
            total_questions: 20,
            thresholds: PowerThresholds::default(),
        }
    }
}

/// What happened to a packet's hybrid augmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HybridOutcome {
    /// No written packet was supplied
    Disabled,
    /// Placeholders were appended after `written` existing questions
    Written { written: u32, placeholders: usize },
    /// Not enough room left for the visual questions
    SkippedCapacity { written: u32 },
}

/// Summary of one assembled packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketReport {
    pub packet: String,
    pub questions: usize,
    pub slides: usize,
    pub hybrid: HybridOutcome,
}

/// Looked-up credits of a packet, keyed by question number
pub type PacketCredits = HashMap<u32, QuestionCredits>;

/// Writes packets into documents
#[derive(Debug, Clone, Default)]
pub struct PacketAssembler {
    options: AssemblerOptions,
}

impl PacketAssembler {
    pub fn new(options: AssemblerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    /// Start a packet's section: the set title on a fresh document, a page
    /// break otherwise, then the packet heading.
    pub fn open_section<D: DocumentSink>(&self, document: &mut D, set_name: &str, packet: &Packet, first: bool) {
        if first {
            document.add_heading(&format!("{} - Visual Answerlines", set_name), 0);
        } else {
            document.add_page_break();
        }
        document.add_heading(&format!("Packet {}", packet.name), 1);
    }

    /// Whether `written` existing questions leave room for the visual ones
    pub fn has_capacity(&self, written: u32) -> bool {
        written
            .checked_add(self.options.visual_questions)
            .is_some_and(|needed| needed <= self.options.total_questions)
    }

    /// Write a packet's answers into `visual` and, when given, its
    /// placeholders into `hybrid`.
    pub fn assemble<V, H>(
        &self,
        packet: &Packet,
        credits: &PacketCredits,
        visual: &mut V,
        hybrid: Option<&mut H>,
    ) -> Result<PacketReport, DocumentError>
    where
        V: DocumentSink,
        H: DocumentSink,
    {
        let (mut hybrid, written) = match hybrid {
            Some(doc) => {
                let written = max_leading_number(&*doc);
                if self.has_capacity(written) {
                    (Some(doc), written)
                } else {
                    warn!(
                        "Skipping hybrid packet {}: {} questions are already written, no room for {} more in packets of {}",
                        packet.name, written, self.options.visual_questions, self.options.total_questions
                    );
                    return self
                        .write_visual_only(packet, credits, visual)
                        .map(|report| PacketReport {
                            hybrid: HybridOutcome::SkippedCapacity { written },
                            ..report
                        });
                }
            }
            None => (None, 0),
        };

        let empty = QuestionCredits::default();
        let mut prev_answer: Option<ParagraphId> = None;
        let mut slides = 0;
        let mut placeholders = 0;

        for question in &packet.questions {
            let question_credits = credits.get(&question.number).unwrap_or(&empty);
            if self.options.verbose {
                info!("{}: {}", question.number, question.answerline);
            }

            let parsed = answerline::parse(&question.answerline);
            let answer = visual.add_paragraph("", ParagraphStyle::ListNumber);
            visual.append_runs(answer, answerline::style_answerline(&parsed, &question.answer_type))?;

            let hybrid_answer = match hybrid.as_deref_mut() {
                Some(doc) => {
                    let id = self.write_placeholder(doc, question, &parsed, written, placeholders > 0)?;
                    placeholders += 1;
                    Some((doc, id))
                }
                None => None,
            };

            if question.answer_type.is_film() {
                if let Some(director) = annotation::film_credit(question, question_credits) {
                    let credit = StyledRun::plain(format!(" (dir. {})", director));
                    visual.append_run(answer, credit.clone())?;
                    if let Some((doc, id)) = hybrid_answer {
                        doc.append_run(id, credit)?;
                    }
                }
            } else {
                let annotations = annotation::annotate(question, question_credits);
                let mut prev_slide: Option<ParagraphId> = None;
                for slide in &annotations {
                    let paragraph = visual.add_paragraph("", ParagraphStyle::ListNumber2);
                    visual.append_runs(paragraph, slide.runs())?;
                    visual.list_number(paragraph, prev_slide, 1)?;
                    prev_slide = Some(paragraph);
                }
                slides += annotations.len();

                if let Some((doc, id)) = hybrid_answer {
                    doc.append_runs(id, annotation::sources_note(question, &annotations))?;
                }
            }

            if self.options.tags {
                if let Some(doc) = hybrid.as_deref_mut() {
                    let tag = match &question.author {
                        Some(author) => format!("<{}, Visual>", author),
                        None => "<Visual>".to_string(),
                    };
                    doc.add_paragraph(&tag, ParagraphStyle::Normal);
                }
            }

            if let Some(notes) = &question.notes {
                visual.append_run(answer, StyledRun::plain(format!(" ({})", notes)))?;
            }

            visual.list_number(answer, prev_answer, 0)?;
            prev_answer = Some(answer);
        }

        Ok(PacketReport {
            packet: packet.name.clone(),
            questions: packet.questions.len(),
            slides,
            hybrid: match hybrid {
                Some(_) => HybridOutcome::Written { written, placeholders },
                None => HybridOutcome::Disabled,
            },
        })
    }

    fn write_visual_only<V: DocumentSink>(
        &self,
        packet: &Packet,
        credits: &PacketCredits,
        visual: &mut V,
    ) -> Result<PacketReport, DocumentError> {
        self.assemble::<V, V>(packet, credits, visual, None)
    }

    /// Append a question's placeholder line and `ANSWER:` paragraph,
    /// returning the answer paragraph.
    fn write_placeholder<H: DocumentSink>(
        &self,
        document: &mut H,
        question: &Question,
        parsed: &ParsedAnswer,
        written: u32,
        separate: bool,
    ) -> Result<ParagraphId, DocumentError> {
        if separate {
            document.add_paragraph("", ParagraphStyle::Normal);
        }

        let line = document.add_paragraph("", ParagraphStyle::Normal);
        document.append_runs(
            line,
            annotation::placeholder_runs(
                question.number.saturating_add(written),
                &question.values(),
                self.options.force_end,
                self.options.thresholds,
            ),
        )?;

        let answer = document.add_paragraph("ANSWER: ", ParagraphStyle::Normal);
        document.append_runs(answer, answerline::style_answerline(parsed, &question.answer_type))?;
        Ok(answer)
    }
}
