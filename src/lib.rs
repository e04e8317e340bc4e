/*!
 * # Storyboard - visual answerline formatter
 *
 * A Rust library for formatting the answer keys of visual quiz tournaments.
 *
 * ## Features
 *
 * - Parse answerlines into main answer, pronunciation guide and
 *   directive-tagged alternates
 * - Style answers by answer type: surnames for people, titles after their
 *   leading article, italics for films
 * - Annotate slides with their source and creator/director credit
 * - Mark power and superpower slides on hybrid placeholder lines
 * - Fill in missing film directors from TMDB
 * - Write HTML, JSON or plain-text documents
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: CSV row source and the packet/question/slide tree
 * - `answerline`: Parsing, quote normalization and run styling
 * - `annotation`: Slide sources, credits and power marks
 * - `assembler`: Writes packets into documents
 * - `document`: Rich-text document model and file formats
 * - `providers`: Director lookup services:
 *   - `providers::tmdb`: The Movie Database client
 *   - `providers::cache`: Per-run lookup cache
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod annotation;
pub mod answerline;
pub mod app_config;
pub mod app_controller;
pub mod assembler;
pub mod database;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod providers;

// Re-export main types for easier usage
pub use answerline::{normalize, parse, style_alternate, style_answerline, style_main, Directive, ParsedAnswer};
pub use annotation::{annotate, power_marks, SlideAnnotation};
pub use app_config::Config;
pub use assembler::{PacketAssembler, PacketReport};
pub use database::{AnswerType, Packet, Question, QuestionRow, Slide};
pub use document::{DocumentSink, RichDocument, StyledRun};
pub use errors::{DatabaseError, DocumentError, ProviderError};
