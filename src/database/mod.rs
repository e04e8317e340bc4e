/*!
 * Answerline database access.
 *
 * - `models`: one CSV row per slide, answer-type partition
 * - `loader`: CSV decoding with typographic quote normalization
 * - `questions`: packet/question/slide tree with validated slide order
 */

pub mod loader;
pub mod models;
pub mod questions;

pub use loader::{load_rows, load_rows_from_reader};
pub use models::{is_media_source, AnswerType, QuestionRow};
pub use questions::{build_packets, Packet, Question, Slide};
