/*!
 * Answerline formatting engine.
 *
 * - `parser`: decomposes a raw answerline into main answer, pronunciation
 *   guide and directive-tagged alternates
 * - `normalize`: typographic quotes for free-text fields
 * - `styling`: bold/italic/underline policy for each answer fragment
 */

pub mod normalize;
pub mod parser;
pub mod styling;

pub use normalize::{make_curly, normalize};
pub use parser::{parse, Alternate, Directive, ParsedAnswer};
pub use styling::{style_alternate, style_answerline, style_main};
