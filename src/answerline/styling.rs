/*!
 * Run-style policy for answerlines.
 *
 * Decides which parts of an answer are bold, italic or underlined:
 * - person-like answers emphasize only the final name token (the surname)
 * - title-like answers emphasize everything after a leading article
 * - films are italicized
 * - alternates inherit the emphasis their directive allows
 */

use crate::answerline::parser::{Alternate, Directive, ParsedAnswer};
use crate::database::AnswerType;
use crate::document::StyledRun;

/// Leading articles that are never emphasized in title-like answers
pub const ARTICLES: [&str; 14] = [
    "A ", "The ", "a ", "the ", "Le ", "le ", "La ", "la ", "El ", "el ", "Il ", "il ", "Dir ",
    "dir ",
];

/// Emphasis permitted for a fragment, before answer-type rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Emphasis {
    bold: bool,
    underline: bool,
    italic_allowed: bool,
}

impl Emphasis {
    const MAIN: Emphasis = Emphasis {
        bold: true,
        underline: true,
        italic_allowed: true,
    };

    fn for_directive(directive: Directive) -> Self {
        match directive {
            Directive::Or | Directive::Accept => Self::MAIN,
            Directive::PromptOn => Emphasis {
                bold: false,
                underline: true,
                italic_allowed: true,
            },
            Directive::Reject => Emphasis {
                bold: false,
                underline: false,
                italic_allowed: false,
            },
        }
    }
}

/// Split a leading article off a title, returning `(article, remainder)`.
///
/// The article keeps its trailing space.
pub fn split_article(text: &str) -> Option<(&str, &str)> {
    ARTICLES
        .iter()
        .find(|article| text.starts_with(*article))
        .map(|article| text.split_at(article.len()))
}

/// Style a main answer.
pub fn style_main(main: &str, answer_type: &AnswerType) -> Vec<StyledRun> {
    style_fragment(main, answer_type, Emphasis::MAIN)
}

/// Style the text of one alternate under the given directive.
///
/// The directive keyword itself is not included; see [`style_answerline`].
pub fn style_alternate(text: &str, directive: Directive, answer_type: &AnswerType) -> Vec<StyledRun> {
    style_fragment(text, answer_type, Emphasis::for_directive(directive))
}

fn style_fragment(text: &str, answer_type: &AnswerType, emphasis: Emphasis) -> Vec<StyledRun> {
    if answer_type.is_person_like() {
        style_name(text, emphasis)
    } else {
        let italic = emphasis.italic_allowed && answer_type.is_film();
        style_title(text, emphasis, italic)
    }
}

/// Name tokens are plain except the last, separated by plain space runs.
fn style_name(text: &str, emphasis: Emphasis) -> Vec<StyledRun> {
    let tokens: Vec<&str> = text.split(' ').collect();
    let last = tokens.len() - 1;

    let mut runs = Vec::with_capacity(tokens.len() * 2);
    for (i, token) in tokens.into_iter().enumerate() {
        if i == last {
            runs.push(StyledRun::new(token, emphasis.bold, false, emphasis.underline));
        } else {
            runs.push(StyledRun::plain(token));
            runs.push(StyledRun::plain(" "));
        }
    }
    runs
}

fn style_title(text: &str, emphasis: Emphasis, italic: bool) -> Vec<StyledRun> {
    let remainder_run = |s: &str| StyledRun::new(s, emphasis.bold, italic, emphasis.underline);

    match split_article(text) {
        Some((article, rest)) => vec![
            StyledRun::new(article, false, italic, false),
            remainder_run(rest),
        ],
        None => vec![remainder_run(text)],
    }
}

/// Style one alternate including its directive keyword.
pub fn style_alternate_with_keyword(alternate: &Alternate, answer_type: &AnswerType) -> Vec<StyledRun> {
    let mut runs = vec![StyledRun::plain(alternate.directive.keyword())];
    runs.extend(style_alternate(&alternate.text, alternate.directive, answer_type));
    runs
}

/// Style a whole parsed answerline: main answer, pronunciation guide, then the
/// bracketed alternates joined by `"; "`.
pub fn style_answerline(parsed: &ParsedAnswer, answer_type: &AnswerType) -> Vec<StyledRun> {
    let mut runs = style_main(&parsed.main, answer_type);

    if parsed.has_pronunciation() {
        runs.push(StyledRun::plain(&parsed.pronunciation));
    }

    if !parsed.alternates.is_empty() {
        runs.push(StyledRun::plain(" ["));
        for (i, alternate) in parsed.alternates.iter().enumerate() {
            if i > 0 {
                runs.push(StyledRun::plain("; "));
            }
            runs.extend(style_alternate_with_keyword(alternate, answer_type));
        }
        runs.push(StyledRun::plain("]"));
    }

    runs
}
