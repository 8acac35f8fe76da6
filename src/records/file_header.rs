//! File Header record (type `1`).

use crate::error::{AchError, Result};
use crate::format::{pad_left, pad_right, RECORD_LENGTH};
use chrono::NaiveDateTime;

/// The first record of every ACH file.
///
/// The creation date and time come from an explicit timestamp so that rendering
/// the same header twice produces the same line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    immediate_destination: String,
    immediate_origin: String,
    created: NaiveDateTime,
    file_id_modifier: char,
    destination_name: String,
    origin_name: String,
    reference_code: String,
}

impl FileHeader {
    const RECORD_TYPE_CODE: &'static str = "1";
    pub const PRIORITY_CODE: &'static str = "01";
    pub const RECORD_SIZE: &'static str = "094";
    pub const BLOCKING_FACTOR: &'static str = "10";
    pub const FORMAT_CODE: &'static str = "1";

    /// Creates a header from the destination and origin routing numbers.
    ///
    /// Each routing number is 9 digits, optionally already preceded by the
    /// blank that the 10-character field requires.
    pub fn new(destination: &str, origin: &str, created: NaiveDateTime) -> Result<Self> {
        Ok(FileHeader {
            immediate_destination: routing_field("immediate destination", destination)?,
            immediate_origin: routing_field("immediate origin", origin)?,
            created,
            file_id_modifier: 'A',
            destination_name: pad_right("immediate destination name", "", 23)?,
            origin_name: pad_right("immediate origin name", "", 23)?,
            reference_code: pad_right("reference code", "", 8)?,
        })
    }

    pub fn with_destination_name(mut self, name: &str) -> Result<Self> {
        self.destination_name = pad_right("immediate destination name", name.trim(), 23)?;
        Ok(self)
    }

    pub fn with_origin_name(mut self, name: &str) -> Result<Self> {
        self.origin_name = pad_right("immediate origin name", name.trim(), 23)?;
        Ok(self)
    }

    pub fn with_reference_code(mut self, code: &str) -> Result<Self> {
        self.reference_code = pad_right("reference code", code.trim(), 8)?;
        Ok(self)
    }

    /// Distinguishes files sent on the same day. Must be `A`-`Z` or `0`-`9`.
    pub fn with_file_id_modifier(mut self, modifier: char) -> Result<Self> {
        if !(modifier.is_ascii_uppercase() || modifier.is_ascii_digit()) {
            return Err(AchError::InvalidField {
                field: "file ID modifier",
                value: modifier.to_string(),
                reason: "must be A-Z or 0-9",
            });
        }
        self.file_id_modifier = modifier;
        Ok(self)
    }

    pub fn created(&self) -> NaiveDateTime {
        self.created
    }

    pub fn file_id_modifier(&self) -> char {
        self.file_id_modifier
    }

    /// Renders the 94-character record.
    pub fn render(&self) -> String {
        let mut record = String::with_capacity(RECORD_LENGTH);

        record.push_str(Self::RECORD_TYPE_CODE);
        record.push_str(Self::PRIORITY_CODE);
        record.push_str(&self.immediate_destination);
        record.push_str(&self.immediate_origin);
        record.push_str(&self.created.format("%y%m%d").to_string());
        record.push_str(&self.created.format("%H%M").to_string());
        record.push(self.file_id_modifier);
        record.push_str(Self::RECORD_SIZE);
        record.push_str(Self::BLOCKING_FACTOR);
        record.push_str(Self::FORMAT_CODE);
        record.push_str(&self.destination_name);
        record.push_str(&self.origin_name);
        record.push_str(&self.reference_code);

        debug_assert_eq!(record.len(), RECORD_LENGTH);
        record
    }
}

fn routing_field(field: &'static str, value: &str) -> Result<String> {
    let digits = value.trim();
    if digits.len() != 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AchError::InvalidField {
            field,
            value: value.to_string(),
            reason: "must be a 9-digit routing number",
        });
    }
    pad_left(field, digits, 10, ' ')
}
