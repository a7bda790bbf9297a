use std::collections::HashSet;
use std::io::Read;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::response::ResponseSet;

/// Reads one respondent per CSV row.
///
/// The header names the columns: the first is the respondent id, the rest
/// are question ids. A cell holds either a weight (`4`) or an option label
/// (`Poor`); empty cells are left unanswered. A header naming the same
/// question twice is rejected up front. Row errors are reported per row
/// and do not stop the rows after them.
pub fn read_bulk<'a, R: Read + 'a>(
    reader: R,
    catalog: &'a Catalog,
) -> Result<impl Iterator<Item = Result<(String, ResponseSet)>> + 'a> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let mut seen = HashSet::new();
    if let Some(column) = headers.iter().skip(1).find(|column| !seen.insert(*column)) {
        return Err(Error::DuplicateColumn(column.to_string()));
    }
    Ok(reader
        .into_records()
        .map(move |record| parse_row(&headers, &record?, catalog)))
}

fn parse_row(
    headers: &csv::StringRecord,
    record: &csv::StringRecord,
    catalog: &Catalog,
) -> Result<(String, ResponseSet)> {
    let respondent = record.get(0).unwrap_or_default().to_string();
    let mut responses = ResponseSet::new();
    for (question_id, cell) in headers.iter().zip(record.iter()).skip(1) {
        if cell.is_empty() {
            continue;
        }
        match cell.parse::<u8>() {
            Ok(weight) => responses.insert_weight(catalog, question_id, weight)?,
            Err(_) => {
                responses.answer(catalog, question_id, cell)?;
            }
        }
    }
    Ok((respondent, responses))
}
