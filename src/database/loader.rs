/*!
 * CSV row source for the answerline database.
 */

use log::debug;
use std::io::Read;
use std::path::Path;

use crate::answerline::normalize;
use crate::database::models::QuestionRow;
use crate::errors::DatabaseError;

/// Load every row of the database at `path`, normalizing free-text fields.
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<QuestionRow>, DatabaseError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .from_path(path)
        .map_err(|source| DatabaseError::Read {
            path: path.display().to_string(),
            source,
        })?;

    let rows = read_rows(reader, &path.display().to_string())?;
    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load rows from any CSV reader; `origin` names the source in errors.
pub fn load_rows_from_reader<R: Read>(input: R, origin: &str) -> Result<Vec<QuestionRow>, DatabaseError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .from_reader(input);
    read_rows(reader, origin)
}

fn read_rows<R: Read>(mut reader: csv::Reader<R>, origin: &str) -> Result<Vec<QuestionRow>, DatabaseError> {
    reader
        .deserialize::<QuestionRow>()
        .map(|record| {
            record
                .map(normalize_row)
                .map_err(|source| DatabaseError::Read {
                    path: origin.to_string(),
                    source,
                })
        })
        .collect()
}

/// Apply typographic quotes to the free-text columns of a row.
///
/// Structural columns (packet, numbers, types) are left untouched.
pub fn normalize_row(mut row: QuestionRow) -> QuestionRow {
    row.answerline = normalize(row.answerline.as_deref());
    row.source = normalize(row.source.as_deref());
    row.creator = normalize(row.creator.as_deref());
    row.director = normalize(row.director.as_deref());
    row.notes = normalize(row.notes.as_deref());
    row
}
