//! Addenda record (type `7`, addenda type `05`) for PPD, CCD and WEB entries.

use crate::codes::TraceNumber;
use crate::error::Result;
use crate::format::{numeric, pad_right, RECORD_LENGTH};

/// Free-form payment information that travels with a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addenda {
    payment_info: String,
    entry_detail_sequence: String,
}

impl Addenda {
    const RECORD_TYPE_CODE: &'static str = "7";
    const ADDENDA_TYPE_CODE: &'static str = "05";
    // Only one addenda per entry.
    const ADDENDA_SEQUENCE_NUMBER: &'static str = "0001";

    /// `entry_detail_sequence` must be the last 7 digits of the owning entry's trace number.
    pub fn new(payment_info: &str, entry_detail_sequence: &str) -> Result<Self> {
        Ok(Addenda {
            payment_info: pad_right("payment related information", payment_info, 80)?,
            entry_detail_sequence: numeric(
                "entry detail sequence number",
                entry_detail_sequence.trim(),
                7,
            )?,
        })
    }

    /// Creates an addenda sequenced to the entry carrying `trace`.
    pub fn for_trace(payment_info: &str, trace: &TraceNumber) -> Result<Self> {
        Addenda::new(payment_info, trace.sequence())
    }

    pub fn payment_info(&self) -> &str {
        self.payment_info.trim_end()
    }

    pub fn entry_detail_sequence(&self) -> &str {
        &self.entry_detail_sequence
    }

    pub fn render(&self) -> String {
        let mut record = String::with_capacity(RECORD_LENGTH);

        record.push_str(Self::RECORD_TYPE_CODE);
        record.push_str(Self::ADDENDA_TYPE_CODE);
        record.push_str(&self.payment_info);
        record.push_str(Self::ADDENDA_SEQUENCE_NUMBER);
        record.push_str(&self.entry_detail_sequence);

        debug_assert_eq!(record.len(), RECORD_LENGTH);
        record
    }
}
