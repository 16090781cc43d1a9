//! Flat CSV table codec.
//!
//! The table is a header row followed by one row per user. Columns are found
//! by header name when decoding, and always written in [`COLUMNS`] order.

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::error::StoreError;
use crate::record::{StoredAge, UserId, UserRecord};

/// Column names in persisted order.
pub const COLUMNS: [&str; 7] = [
    "id",
    "name",
    "email",
    "mobile",
    "age",
    "address",
    "created_at",
];

/// Positions of each column within a decoded header.
struct ColumnIndex([usize; 7]);

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, StoreError> {
        let mut positions = [0_usize; 7];
        for (slot, column) in positions.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|header| header.trim() == column)
                .ok_or_else(|| StoreError::MalformedTable {
                    row: 0,
                    message: format!("missing column '{column}'"),
                })?;
        }
        Ok(Self(positions))
    }

    fn cell<'r>(&self, row: &'r StringRecord, column: usize) -> &'r str {
        self.0
            .get(column)
            .and_then(|&position| row.get(position))
            .unwrap_or_default()
    }
}

/// Decode table text into records, in file order.
///
/// Field values are taken as written; rows that break current validation
/// rules are still returned. Empty input decodes to an empty collection.
///
/// # Errors
///
/// Returns [`StoreError::MalformedTable`] when a column is missing, a row
/// cannot be read, or a row has no identifier.
pub fn decode(text: &str) -> Result<Vec<UserRecord>, StoreError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|error| StoreError::MalformedTable {
            row: 0,
            message: error.to_string(),
        })?
        .clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    reader
        .records()
        .enumerate()
        .map(|(index, row)| {
            let row_number = index + 1;
            let row = row.map_err(|error| StoreError::MalformedTable {
                row: row_number,
                message: error.to_string(),
            })?;
            decode_row(&columns, &row, row_number)
        })
        .collect()
}

fn decode_row(
    columns: &ColumnIndex,
    row: &StringRecord,
    row_number: usize,
) -> Result<UserRecord, StoreError> {
    let id = UserId::parse(columns.cell(row, 0)).ok_or_else(|| StoreError::MalformedTable {
        row: row_number,
        message: "row has no id".to_owned(),
    })?;
    Ok(UserRecord {
        id,
        name: columns.cell(row, 1).to_owned(),
        email: columns.cell(row, 2).to_owned(),
        mobile: columns.cell(row, 3).to_owned(),
        age: StoredAge::from_text(columns.cell(row, 4)),
        address: columns.cell(row, 5).to_owned(),
        created_at: columns.cell(row, 6).to_owned(),
    })
}

/// Encode records as table text with a header row and CRLF terminators.
///
/// # Errors
///
/// Returns [`StoreError::MalformedTable`] if serialisation fails, which only
/// happens when the in-memory buffer cannot be written.
pub fn encode(records: &[UserRecord]) -> Result<String, StoreError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    let encode_error = |row: usize, message: String| StoreError::MalformedTable { row, message };

    writer
        .write_record(COLUMNS)
        .map_err(|error| encode_error(0, error.to_string()))?;
    for (index, record) in records.iter().enumerate() {
        let age = record.age.to_string();
        writer
            .write_record([
                record.id.as_ref(),
                record.name.as_str(),
                record.email.as_str(),
                record.mobile.as_str(),
                age.as_str(),
                record.address.as_str(),
                record.created_at.as_str(),
            ])
            .map_err(|error| encode_error(index + 1, error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| encode_error(records.len(), error.to_string()))?;
    String::from_utf8(bytes).map_err(|error| encode_error(records.len(), error.to_string()))
}
