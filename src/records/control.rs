//! Batch Control (type `8`) and File Control (type `9`) records.
//!
//! Both records are derived: they are built from [`ControlTotals`] folded over
//! the entries below them, never supplied by callers.

use crate::amount::Amount;
use crate::codes::{RoutingPrefix, ServiceClass, TransactionKind};
use crate::error::{AchError, Result};
use crate::format::{format_cents, format_count, format_entry_hash, pad_right, RECORD_LENGTH};
use crate::records::batch_header::BatchHeader;
use crate::records::entry_detail::EntryDetail;

/// Records per block.
pub const BLOCKING_FACTOR: u64 = 10;

/// Counts, hash and dollar totals shared by batch and file control records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlTotals {
    /// Entry detail records plus addenda records.
    pub entry_addenda_count: u64,

    /// Unreduced sum of the receiving DFI identifications.
    pub entry_hash: u64,

    pub total_debit: Amount,
    pub total_credit: Amount,
}

impl ControlTotals {
    /// Adds one entry (and its addenda, if any) to the totals.
    ///
    /// Fails if the entry's transaction code is neither a debit nor a credit.
    pub fn with_entry(self, entry: &EntryDetail) -> Result<Self> {
        let kind = entry.transaction_code().kind().ok_or_else(|| {
            AchError::UnclassifiableTransactionCode {
                code: entry.transaction_code().to_string(),
                trace: entry.trace_number().to_string(),
            }
        })?;

        let mut totals = self;
        totals.entry_addenda_count += 1 + u64::from(entry.addenda().is_some());
        totals.entry_hash += entry.receiving_dfi().value();
        match kind {
            TransactionKind::Debit => totals.total_debit += entry.amount(),
            TransactionKind::Credit => totals.total_credit += entry.amount(),
        }
        Ok(totals)
    }

    /// Combines two sets of totals, e.g. rolling batches up into the file.
    pub fn merge(self, other: &ControlTotals) -> Self {
        ControlTotals {
            entry_addenda_count: self.entry_addenda_count + other.entry_addenda_count,
            entry_hash: self.entry_hash + other.entry_hash,
            total_debit: self.total_debit + other.total_debit,
            total_credit: self.total_credit + other.total_credit,
        }
    }

    /// Debits and credits together.
    pub fn total_amount(&self) -> Amount {
        self.total_debit + self.total_credit
    }
}

/// Number of 10-record blocks needed for a file with these counts.
///
/// Counts the file header, a header and control per batch, every entry and
/// addenda, and the file control. Filler records are not counted.
pub fn block_count(batch_count: u64, entry_addenda_count: u64) -> u64 {
    let records = 1 + 2 * batch_count + entry_addenda_count + 1;
    records.div_ceil(BLOCKING_FACTOR)
}

/// Closes a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchControl {
    service_class: ServiceClass,
    totals: ControlTotals,
    company_id: String,
    originating_dfi: RoutingPrefix,
    batch_number: String,
    // Pre-rendered numeric fields, width-checked on construction.
    count_field: String,
    debit_field: String,
    credit_field: String,
}

impl BatchControl {
    const RECORD_TYPE_CODE: &'static str = "8";
    const MESSAGE_AUTHENTICATION_CODE: &'static str = "                   ";
    const RESERVED: &'static str = "      ";

    pub(crate) fn new(header: &BatchHeader, totals: ControlTotals) -> Result<Self> {
        Ok(BatchControl {
            service_class: header.service_class(),
            totals,
            company_id: pad_right("company identification", header.company_id(), 10)?,
            originating_dfi: header.originating_dfi().clone(),
            batch_number: header.batch_number_field(),
            count_field: format_count("batch entry/addenda count", totals.entry_addenda_count, 6)?,
            debit_field: format_cents("batch total debit", totals.total_debit, 12)?,
            credit_field: format_cents("batch total credit", totals.total_credit, 12)?,
        })
    }

    pub fn service_class(&self) -> ServiceClass {
        self.service_class
    }

    pub fn totals(&self) -> &ControlTotals {
        &self.totals
    }

    pub fn render(&self) -> String {
        let mut record = String::with_capacity(RECORD_LENGTH);

        record.push_str(Self::RECORD_TYPE_CODE);
        record.push_str(self.service_class.code());
        record.push_str(&self.count_field);
        record.push_str(&format_entry_hash(self.totals.entry_hash));
        record.push_str(&self.debit_field);
        record.push_str(&self.credit_field);
        record.push_str(&self.company_id);
        record.push_str(Self::MESSAGE_AUTHENTICATION_CODE);
        record.push_str(Self::RESERVED);
        record.push_str(self.originating_dfi.as_str());
        record.push_str(&self.batch_number);

        debug_assert_eq!(record.len(), RECORD_LENGTH);
        record
    }
}

/// Closes the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileControl {
    batch_count: u64,
    block_count: u64,
    totals: ControlTotals,
    fields: String,
}

impl FileControl {
    const RECORD_TYPE_CODE: &'static str = "9";
    const RESERVED_WIDTH: usize = 39;

    pub(crate) fn new(batch_count: u64, totals: ControlTotals) -> Result<Self> {
        let block_count = block_count(batch_count, totals.entry_addenda_count);

        let mut fields = String::with_capacity(RECORD_LENGTH);
        fields.push_str(&format_count("batch count", batch_count, 6)?);
        fields.push_str(&format_count("block count", block_count, 6)?);
        fields.push_str(&format_count("file entry/addenda count", totals.entry_addenda_count, 8)?);
        fields.push_str(&format_entry_hash(totals.entry_hash));
        fields.push_str(&format_cents("file total debit", totals.total_debit, 12)?);
        fields.push_str(&format_cents("file total credit", totals.total_credit, 12)?);

        Ok(FileControl {
            batch_count,
            block_count,
            totals,
            fields,
        })
    }

    pub fn batch_count(&self) -> u64 {
        self.batch_count
    }

    pub fn block_count(&self) -> u64 {
        self.block_count
    }

    pub fn totals(&self) -> &ControlTotals {
        &self.totals
    }

    pub fn render(&self) -> String {
        let mut record = String::with_capacity(RECORD_LENGTH);

        record.push_str(Self::RECORD_TYPE_CODE);
        record.push_str(&self.fields);
        record.push_str(&" ".repeat(Self::RESERVED_WIDTH));

        debug_assert_eq!(record.len(), RECORD_LENGTH);
        record
    }
}
