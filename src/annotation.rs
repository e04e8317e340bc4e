/*!
 * Slide annotations.
 *
 * Derives everything printed next to or about a question's slides:
 * - per-slide source text and its creator/director credit
 * - power and superpower marks for the hybrid placeholder line
 * - the `(Sources: ...)` note and film director credit of hybrid answers
 *
 * Metadata lookups are the only side effect and happen up front in
 * [`resolve_credits`]; everything else is pure.
 */

use log::debug;
use std::collections::HashMap;

use crate::answerline;
use crate::database::{is_media_source, Question, Slide};
use crate::document::StyledRun;
use crate::providers::CachedLookup;

/// Characters that mark a quoted title
const QUOTE_CHARS: [char; 4] = ['\'', '"', '‘', '“'];

pub const SUPERPOWER_GLYPH: &str = "(+)";
pub const POWER_GLYPH: &str = "(*)";

/// Whether a title starts with a quote character and so must not be italicized
pub fn is_quoted(text: &str) -> bool {
    text.starts_with(QUOTE_CHARS)
}

/// Credit label for a source type
pub fn credit_label(source_type: Option<&str>) -> &'static str {
    if is_media_source(source_type) {
        "dir."
    } else {
        "by"
    }
}

/// Credits obtained from the metadata service for one question
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionCredits {
    /// Looked-up credit per source title
    pub sources: HashMap<String, String>,
    /// Looked-up director of a film answer
    pub film: Option<String>,
}

/// Titles of a question that need a metadata lookup, with their years.
///
/// Film answers need one when the first slide carries no credit. Other
/// title-like answers need one per distinct media source that no slide
/// credits. Person-like answers never need one.
pub fn lookup_requests(question: &Question) -> Vec<(String, Option<i32>)> {
    if question.answer_type.is_film() {
        if question.question_credit().is_some() {
            return Vec::new();
        }
        let main = answerline::parse(&question.answerline).main;
        return vec![(main, question.question_year())];
    }
    if question.answer_type.is_person_like() {
        return Vec::new();
    }

    let mut requests: Vec<(String, Option<i32>)> = Vec::new();
    for slide in &question.slides {
        let Some(source) = slide.source.as_deref() else {
            continue;
        };
        if !is_media_source(slide.source_type.as_deref())
            || sibling_credit(question, source).is_some()
            || requests.iter().any(|(title, _)| title == source)
        {
            continue;
        }
        requests.push((source.to_string(), slide.source_year));
    }
    requests
}

/// Resolve the metadata lookups a question needs.
///
/// Without a lookup service every credit stays empty.
pub async fn resolve_credits(question: &Question, lookup: Option<&CachedLookup>) -> QuestionCredits {
    let mut credits = QuestionCredits::default();
    let Some(lookup) = lookup else {
        return credits;
    };

    for (title, year) in lookup_requests(question) {
        let Some(credit) = lookup.director_credit(&title, year).await else {
            continue;
        };
        debug!("Resolved '{}' to {}", title, credit);
        if question.answer_type.is_film() {
            credits.film = Some(credit);
        } else {
            credits.sources.insert(title, credit);
        }
    }
    credits
}

/// First credit given by any slide showing `source`
fn sibling_credit<'a>(question: &'a Question, source: &str) -> Option<&'a str> {
    question
        .slides
        .iter()
        .filter(|s| s.source.as_deref() == Some(source))
        .find_map(|s| s.credit.as_deref())
}

/// What the visual-answers document prints for one slide
#[derive(Debug, Clone, PartialEq)]
pub struct SlideAnnotation {
    pub source_text: String,
    pub source_is_italic: bool,
    pub credit_label: &'static str,
    pub credit_text: Option<String>,
}

impl SlideAnnotation {
    /// Source run followed by the ` (dir. X)` / ` (by X)` run when credited
    pub fn runs(&self) -> Vec<StyledRun> {
        let mut runs = vec![StyledRun::new(
            self.source_text.clone(),
            false,
            self.source_is_italic,
            false,
        )];
        if let Some(credit) = &self.credit_text {
            runs.push(StyledRun::plain(format!(" ({} {})", self.credit_label, credit)));
        }
        runs
    }
}

fn resolve_slide_credit(question: &Question, slide: &Slide, credits: &QuestionCredits) -> Option<String> {
    let question_credit = question.question_credit();

    if question.answer_type.is_person_like() {
        // The question is about the credited person; only a differing credit is news
        return slide
            .credit
            .as_deref()
            .filter(|own| Some(*own) != question_credit)
            .map(str::to_string);
    }

    if let Some(own) = slide.credit.as_deref() {
        return Some(own.to_string());
    }
    let source = slide.source.as_deref()?;
    sibling_credit(question, source)
        .map(str::to_string)
        .or_else(|| credits.sources.get(source).cloned())
        .or_else(|| question_credit.map(str::to_string))
}

/// Annotate every slide of a question, in slide order.
pub fn annotate(question: &Question, credits: &QuestionCredits) -> Vec<SlideAnnotation> {
    question
        .slides
        .iter()
        .map(|slide| {
            let source_text = slide.source.clone().unwrap_or_default();
            SlideAnnotation {
                source_is_italic: !source_text.is_empty() && !is_quoted(&source_text),
                source_text,
                credit_label: credit_label(slide.source_type.as_deref()),
                credit_text: resolve_slide_credit(question, slide, credits),
            }
        })
        .collect()
}

/// Point values that earn a mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerThresholds {
    pub superpower: i32,
    pub power: i32,
}

impl Default for PowerThresholds {
    fn default() -> Self {
        Self {
            superpower: 20,
            power: 15,
        }
    }
}

/// Emphasis and trailing glyph of one slide number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlideMark {
    pub bold: bool,
    pub underline: bool,
    pub glyph: Option<&'static str>,
}

/// Power marks for a sequence of slide values.
///
/// A slide at the superpower value is bold and underlined, a slide at the
/// power value is bold. The glyph is added only where the next slide drops
/// below that value. The last slide is never marked.
pub fn power_marks(values: &[i32], thresholds: PowerThresholds) -> Vec<SlideMark> {
    let mut marks = vec![SlideMark::default(); values.len()];
    for (k, pair) in values.windows(2).enumerate() {
        let (value, next) = (pair[0], pair[1]);
        marks[k] = if value == thresholds.superpower {
            SlideMark {
                bold: true,
                underline: true,
                glyph: (next < value).then_some(SUPERPOWER_GLYPH),
            }
        } else if value == thresholds.power {
            SlideMark {
                bold: true,
                underline: false,
                glyph: (next < value).then_some(POWER_GLYPH),
            }
        } else {
            SlideMark::default()
        };
    }
    marks
}

/// Runs of the hybrid placeholder line, e.g. `21. 1 2 3(+) 4 5`.
///
/// With `force_end` every slide number is printed; otherwise the last one is
/// left off.
pub fn placeholder_runs(number: u32, values: &[i32], force_end: bool, thresholds: PowerThresholds) -> Vec<StyledRun> {
    let n = values.len();
    let mut runs = vec![StyledRun::plain(format!("{}. ", number))];

    for (k, mark) in power_marks(values, thresholds).into_iter().enumerate() {
        if !force_end && k + 1 >= n {
            break;
        }
        let spaced = if force_end { k + 1 < n } else { k + 2 < n };
        let text = if spaced { format!("{} ", k + 1) } else { (k + 1).to_string() };
        runs.push(StyledRun::new(text, mark.bold, false, mark.underline));

        if let Some(glyph) = mark.glyph {
            runs.push(StyledRun::new(glyph, true, false, mark.underline));
            runs.push(StyledRun::plain(" "));
        }
    }
    runs
}

/// Director credit of a film answer: first slide's credit, else the lookup
pub fn film_credit(question: &Question, credits: &QuestionCredits) -> Option<String> {
    question
        .question_credit()
        .map(str::to_string)
        .or_else(|| credits.film.clone())
}

fn push_source(runs: &mut Vec<StyledRun>, source: &str) {
    if is_quoted(source) {
        runs.push(StyledRun::plain(source));
    } else {
        runs.push(StyledRun::italic(source));
    }
}

/// The ` (Sources: ...)` note of a hybrid answer.
///
/// Returns nothing when no slide names a source.
pub fn sources_note(question: &Question, annotations: &[SlideAnnotation]) -> Vec<StyledRun> {
    let sourced: Vec<&SlideAnnotation> = annotations.iter().filter(|a| !a.source_text.is_empty()).collect();
    if sourced.is_empty() {
        return Vec::new();
    }

    let mut runs = vec![StyledRun::plain(" (Sources: ")];

    if question.answer_type.is_person_like() {
        let mut seen: Vec<&str> = Vec::new();
        for annotation in sourced {
            if seen.contains(&annotation.source_text.as_str()) {
                continue;
            }
            if !seen.is_empty() {
                runs.push(StyledRun::plain("; "));
            }
            push_source(&mut runs, &annotation.source_text);
            seen.push(&annotation.source_text);
        }
    } else {
        // (credit, label, distinct sources) in first-appearance order
        let mut groups: Vec<(Option<&str>, &'static str, Vec<&str>)> = Vec::new();
        for annotation in sourced {
            let credit = annotation.credit_text.as_deref();
            let source = annotation.source_text.as_str();
            match groups.iter_mut().find(|(c, _, _)| *c == credit) {
                Some((_, _, sources)) => {
                    if !sources.contains(&source) {
                        sources.push(source);
                    }
                }
                None => groups.push((credit, annotation.credit_label, vec![source])),
            }
        }

        for (g, (credit, label, sources)) in groups.into_iter().enumerate() {
            if g > 0 {
                runs.push(StyledRun::plain("; "));
            }
            for (s, source) in sources.into_iter().enumerate() {
                if s > 0 {
                    runs.push(StyledRun::plain(", "));
                }
                push_source(&mut runs, source);
            }
            if let Some(credit) = credit {
                let label = if label == "dir." { "- dir." } else { label };
                runs.push(StyledRun::plain(format!(" {} {}", label, credit)));
            }
        }
    }

    runs.push(StyledRun::plain(")"));
    runs
}
