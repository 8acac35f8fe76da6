//! Company/Batch Header record (type `5`).

use crate::codes::{RoutingPrefix, ServiceClass, StandardEntryClass};
use crate::error::Result;
use crate::format::{format_count, pad_right, RECORD_LENGTH};
use chrono::NaiveDate;

/// Opens a batch and names the originator, the entry class and the settlement day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchHeader {
    service_class: ServiceClass,
    company_name: String,
    discretionary_data: String,
    company_id: String,
    sec: StandardEntryClass,
    entry_description: String,
    descriptive_date: String,
    effective_date: NaiveDate,
    originating_dfi: RoutingPrefix,
    batch_number: u32,
}

impl BatchHeader {
    const RECORD_TYPE_CODE: &'static str = "5";
    const SETTLEMENT_DATE: &'static str = "   ";
    const ORIGINATOR_STATUS_CODE: &'static str = "1";

    /// Largest batch number that fits the 7-digit field.
    pub const MAX_BATCH_NUMBER: u32 = 9_999_999;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        service_class: ServiceClass,
        company_name: &str,
        company_id: &str,
        sec: StandardEntryClass,
        entry_description: &str,
        effective_date: NaiveDate,
        originating_dfi: &str,
        batch_number: u32,
    ) -> Result<Self> {
        // Rejects batch numbers wider than 7 digits.
        format_count("batch number", u64::from(batch_number), 7)?;

        Ok(BatchHeader {
            service_class,
            company_name: pad_right("company name", company_name.trim(), 16)?,
            discretionary_data: pad_right("company discretionary data", "", 20)?,
            company_id: pad_right("company identification", company_id.trim(), 10)?,
            sec,
            entry_description: pad_right("company entry description", entry_description.trim(), 10)?,
            descriptive_date: pad_right("company descriptive date", "", 6)?,
            effective_date,
            originating_dfi: RoutingPrefix::new(originating_dfi)?,
            batch_number,
        })
    }

    pub fn with_discretionary_data(mut self, data: &str) -> Result<Self> {
        self.discretionary_data = pad_right("company discretionary data", data.trim(), 20)?;
        Ok(self)
    }

    /// Date shown to the receiver, e.g. `MAR 24` or `031524`. Blank unless set.
    pub fn with_descriptive_date(mut self, date: &str) -> Result<Self> {
        self.descriptive_date = pad_right("company descriptive date", date.trim(), 6)?;
        Ok(self)
    }

    pub fn service_class(&self) -> ServiceClass {
        self.service_class
    }

    pub fn sec(&self) -> StandardEntryClass {
        self.sec
    }

    /// Company identification as it appears in the 10-character field.
    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    pub fn originating_dfi(&self) -> &RoutingPrefix {
        &self.originating_dfi
    }

    pub fn batch_number(&self) -> u32 {
        self.batch_number
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    pub(crate) fn batch_number_field(&self) -> String {
        format!("{:07}", self.batch_number)
    }

    /// Renders the 94-character record.
    pub fn render(&self) -> String {
        let mut record = String::with_capacity(RECORD_LENGTH);

        record.push_str(Self::RECORD_TYPE_CODE);
        record.push_str(self.service_class.code());
        record.push_str(&self.company_name);
        record.push_str(&self.discretionary_data);
        record.push_str(&self.company_id);
        record.push_str(self.sec.code());
        record.push_str(&self.entry_description);
        record.push_str(&self.descriptive_date);
        record.push_str(&self.effective_date.format("%y%m%d").to_string());
        record.push_str(Self::SETTLEMENT_DATE);
        record.push_str(Self::ORIGINATOR_STATUS_CODE);
        record.push_str(self.originating_dfi.as_str());
        record.push_str(&self.batch_number_field());

        debug_assert_eq!(record.len(), RECORD_LENGTH);
        record
    }
}
