/*!
 * Answerline grammar.
 *
 * A raw answerline has the shape
 *
 * ```text
 * answerline  := main [ " (" guide ] [ " [" alternates [ "]" rest ] ]
 * alternates  := alternate { "; " alternate }
 * alternate   := directive text
 * directive   := "or " | "accept " | "prompt on " | "reject "
 * ```
 *
 * The first `" ["` always ends the head, so a `" ("` that only appears inside
 * the bracketed section never becomes a pronunciation guide.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Head/guide/alternates split. `main` is lazy so the earliest `" ("` or
/// `" ["` wins, and the guide stops at the first `" ["`.
static ANSWERLINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?P<main>.*?)(?: \((?P<guide>.*?))?(?: \[(?P<alternates>.*))?$")
        .expect("answerline grammar is a valid regex")
});

/// Acceptability directive that prefixes an alternate answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Directive {
    Or,
    Accept,
    PromptOn,
    Reject,
}

impl Directive {
    /// Directives in prefix-matching priority order
    pub const ALL: [Directive; 4] = [
        Directive::Or,
        Directive::Accept,
        Directive::PromptOn,
        Directive::Reject,
    ];

    /// Literal prefix that introduces this directive, trailing space included
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Or => "or ",
            Self::Accept => "accept ",
            Self::PromptOn => "prompt on ",
            Self::Reject => "reject ",
        }
    }

    /// Split a candidate into its directive and the remaining text.
    ///
    /// Returns `None` when the candidate starts with none of the keywords.
    pub fn strip(candidate: &str) -> Option<(Directive, &str)> {
        Self::ALL
            .iter()
            .find_map(|d| candidate.strip_prefix(d.keyword()).map(|rest| (*d, rest)))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword().trim_end())
    }
}

/// One directive-tagged alternate answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternate {
    pub directive: Directive,
    pub text: String,
}

impl Alternate {
    pub fn new(directive: Directive, text: impl Into<String>) -> Self {
        Self {
            directive,
            text: text.into(),
        }
    }
}

/// A raw answerline decomposed into its parts
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedAnswer {
    /// Scored answer before any guide or alternates
    pub main: String,

    /// Pronunciation guide with its opening `" ("` reattached, or empty
    pub pronunciation: String,

    /// Alternates in source order
    pub alternates: Vec<Alternate>,
}

impl ParsedAnswer {
    /// Whether a pronunciation guide was present
    pub fn has_pronunciation(&self) -> bool {
        !self.pronunciation.is_empty()
    }
}

/// Parse a raw answerline.
///
/// The guide keeps whatever follows `" ("` up to the alternates section, so
/// an unterminated guide such as `"Mao (MOW"` stays unterminated. Candidates
/// without a recognized directive are dropped.
pub fn parse(raw: &str) -> ParsedAnswer {
    let Some(caps) = ANSWERLINE_REGEX.captures(raw) else {
        return ParsedAnswer {
            main: raw.to_string(),
            ..Default::default()
        };
    };

    let main = caps.name("main").map_or("", |m| m.as_str()).to_string();
    let pronunciation = caps
        .name("guide")
        .map(|g| format!(" ({}", g.as_str()))
        .unwrap_or_default();
    let alternates = caps
        .name("alternates")
        .map(|a| parse_alternates(a.as_str()))
        .unwrap_or_default();

    ParsedAnswer {
        main,
        pronunciation,
        alternates,
    }
}

/// Parse the body of a bracketed alternates section.
///
/// Only the text up to the first `]` is considered; a missing `]` takes the
/// rest of the string.
pub fn parse_alternates(section: &str) -> Vec<Alternate> {
    let inner = section
        .split_once(']')
        .map_or(section, |(inner, _)| inner);

    inner
        .split("; ")
        .filter_map(|candidate| {
            Directive::strip(candidate).map(|(directive, text)| Alternate::new(directive, text))
        })
        .collect()
}
