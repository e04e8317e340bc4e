/*!
 * Packet/question/slide tree built from database rows.
 *
 * Rows sharing `(packet, number)` form one question. Slide order is either
 * the explicit `Slide` column (which must then be 1..=n on every row) or the
 * natural row order.
 */

use log::debug;
use std::collections::BTreeMap;

use crate::database::models::{non_empty, AnswerType, QuestionRow};
use crate::errors::DatabaseError;

/// One visual reveal step of a question
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Slide {
    /// 0-based position within the question
    pub index: usize,
    pub value: i32,
    pub source: Option<String>,
    pub source_type: Option<String>,
    pub source_year: Option<i32>,
    /// The slide's own creator/director credit
    pub credit: Option<String>,
}

impl From<(usize, &QuestionRow)> for Slide {
    fn from((index, row): (usize, &QuestionRow)) -> Self {
        Self {
            index,
            value: row.value,
            source: non_empty(row.source.as_deref()).map(str::to_string),
            source_type: non_empty(row.source_type.as_deref()).map(str::to_string),
            source_year: row.source_year,
            credit: row.credit().map(str::to_string),
        }
    }
}

/// A question with a non-empty answerline and its ordered slides
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub packet: String,
    pub number: u32,
    pub answerline: String,
    pub answer_type: AnswerType,
    pub author: Option<String>,
    pub notes: Option<String>,
    pub slides: Vec<Slide>,
}

impl Question {
    /// The first slide's credit, used as the question-level fallback
    pub fn question_credit(&self) -> Option<&str> {
        self.slides.first().and_then(|s| s.credit.as_deref())
    }

    /// The first slide's source year
    pub fn question_year(&self) -> Option<i32> {
        self.slides.first().and_then(|s| s.source_year)
    }

    /// Slide point values in slide order
    pub fn values(&self) -> Vec<i32> {
        self.slides.iter().map(|s| s.value).collect()
    }
}

/// All questions of one packet, ordered by number
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    pub name: String,
    pub questions: Vec<Question>,
}

impl Packet {
    /// Packet name left-padded with zeros to two characters
    pub fn padded_name(&self) -> String {
        format!("{:0>2}", self.name)
    }
}

/// Group rows into packets in first-appearance order.
///
/// Questions without any non-empty answerline are dropped.
pub fn build_packets(rows: &[QuestionRow]) -> Result<Vec<Packet>, DatabaseError> {
    let mut packet_order: Vec<&str> = Vec::new();
    let mut grouped: BTreeMap<(usize, u32), Vec<&QuestionRow>> = BTreeMap::new();

    for row in rows {
        let packet_index = match packet_order.iter().position(|p| *p == row.packet) {
            Some(index) => index,
            None => {
                packet_order.push(&row.packet);
                packet_order.len() - 1
            }
        };
        grouped.entry((packet_index, row.number)).or_default().push(row);
    }

    let mut packets: Vec<Packet> = packet_order
        .iter()
        .map(|name| Packet {
            name: name.to_string(),
            questions: Vec::new(),
        })
        .collect();

    for ((packet_index, number), group) in grouped {
        let name = packet_order[packet_index];
        let ordered = order_slides(name, number, group)?;
        match build_question(name, number, &ordered) {
            Some(question) => packets[packet_index].questions.push(question),
            None => debug!("Packet {}, question {}: no answerline, skipping", name, number),
        }
    }

    Ok(packets)
}

/// Order a question's rows by explicit slide index when present.
fn order_slides<'a>(
    packet: &str,
    number: u32,
    mut group: Vec<&'a QuestionRow>,
) -> Result<Vec<&'a QuestionRow>, DatabaseError> {
    let indexed = group.iter().filter(|r| r.slide.is_some()).count();
    if indexed == 0 {
        return Ok(group);
    }
    if indexed != group.len() {
        return Err(DatabaseError::PartialSlideIndex {
            packet: packet.to_string(),
            number,
        });
    }

    group.sort_by_key(|r| r.slide);
    let found: Vec<u32> = group.iter().filter_map(|r| r.slide).collect();

    if let Some(pair) = found.windows(2).find(|w| w[0] == w[1]) {
        return Err(DatabaseError::DuplicateSlide {
            packet: packet.to_string(),
            number,
            slide: pair[0],
        });
    }
    if found.iter().zip(1u32..).any(|(slide, expected)| *slide != expected) {
        return Err(DatabaseError::NonContiguousSlides {
            packet: packet.to_string(),
            number,
            found,
        });
    }

    Ok(group)
}

fn build_question(packet: &str, number: u32, rows: &[&QuestionRow]) -> Option<Question> {
    let head = rows.iter().find(|r| r.answerline().is_some())?;
    let answerline = head.answerline()?.to_string();
    let answer_type = head
        .answerline_type
        .as_deref()
        .unwrap_or_default()
        .parse::<AnswerType>()
        .unwrap_or_default();

    Some(Question {
        packet: packet.to_string(),
        number,
        answerline,
        answer_type,
        author: non_empty(head.author.as_deref()).map(str::to_string),
        notes: non_empty(head.notes.as_deref()).map(str::to_string),
        slides: rows.iter().enumerate().map(|(i, row)| Slide::from((i, *row))).collect(),
    })
}
