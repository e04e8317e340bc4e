/*!
 * Rich-text documents produced by the formatter.
 *
 * - `model`: styled runs, paragraphs and the `DocumentSink` interface
 * - `render`: JSON, HTML and plain-text files
 */

pub mod model;
pub mod render;

pub use model::{
    DocumentSink, ListNumbering, Paragraph, ParagraphId, ParagraphStyle, RichDocument, RunId,
    StyledRun,
};
pub use render::{load_document, save_document, DocumentFormat};
