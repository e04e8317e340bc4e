/*!
 * Row-level model of the answerline database.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source types whose credit is labelled `dir.` rather than `by`
pub const MEDIA_SOURCE_TYPES: [&str; 4] = ["Film", "Music Video", "Video", "Television"];

/// Class of a question's answer.
///
/// Person-like types emphasize the surname; every other type is title-like.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AnswerType {
    Film,
    Creator,
    Director,
    Crew,
    Figure,
    Surname,
    #[default]
    Misc,
    /// Any other label found in the database, treated as title-like
    Other(String),
}

impl AnswerType {
    /// Whether the answer names a person
    pub fn is_person_like(&self) -> bool {
        matches!(
            self,
            Self::Creator | Self::Director | Self::Crew | Self::Figure | Self::Surname
        )
    }

    pub fn is_film(&self) -> bool {
        matches!(self, Self::Film)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Film => "Film",
            Self::Creator => "Creator",
            Self::Director => "Director",
            Self::Crew => "Crew",
            Self::Figure => "Figure",
            Self::Surname => "Surname",
            Self::Misc => "Misc",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnswerType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "Film" => Self::Film,
            "Creator" => Self::Creator,
            "Director" => Self::Director,
            "Crew" => Self::Crew,
            "Figure" => Self::Figure,
            "Surname" => Self::Surname,
            "Misc" | "" => Self::Misc,
            other => Self::Other(other.to_string()),
        })
    }
}

/// Whether a source type takes the `dir.` credit label.
///
/// An unspecified source type counts as media.
pub fn is_media_source(source_type: Option<&str>) -> bool {
    source_type.is_none_or(|t| MEDIA_SOURCE_TYPES.contains(&t))
}

/// One database row: a single slide of a question
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuestionRow {
    #[serde(rename = "Packet")]
    pub packet: String,

    #[serde(rename = "Number")]
    pub number: u32,

    /// Explicit 1-based slide index (optional column)
    #[serde(rename = "Slide", default, deserialize_with = "csv::invalid_option")]
    pub slide: Option<u32>,

    #[serde(rename = "Value")]
    pub value: i32,

    #[serde(rename = "Answerline", default)]
    pub answerline: Option<String>,

    #[serde(rename = "Answerline_Type", default)]
    pub answerline_type: Option<String>,

    #[serde(rename = "Source", default)]
    pub source: Option<String>,

    #[serde(rename = "Source_Type", default)]
    pub source_type: Option<String>,

    #[serde(rename = "Source_Year", default, deserialize_with = "csv::invalid_option")]
    pub source_year: Option<i32>,

    #[serde(rename = "Creator", default)]
    pub creator: Option<String>,

    #[serde(rename = "Director", default)]
    pub director: Option<String>,

    #[serde(rename = "Author", default)]
    pub author: Option<String>,

    #[serde(rename = "Notes", default)]
    pub notes: Option<String>,
}

impl QuestionRow {
    /// The slide's own credit: its creator, else its director
    pub fn credit(&self) -> Option<&str> {
        non_empty(self.creator.as_deref()).or_else(|| non_empty(self.director.as_deref()))
    }

    /// The answerline if present and not blank
    pub fn answerline(&self) -> Option<&str> {
        non_empty(self.answerline.as_deref())
    }
}

/// Treat blank strings as missing
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
