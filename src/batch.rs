//! Batch aggregation: a batch header, its entries, and the derived batch control.

use crate::codes::TraceNumber;
use crate::error::{AchError, Result};
use crate::format::LINE_TERMINATOR;
use crate::records::{BatchControl, BatchHeader, ControlTotals, EntryDetail};
use log::{debug, warn};
use std::collections::HashSet;

/// A batch of entries that share one Standard Entry Class and originator.
///
/// The batch control record is not stored; it is derived each time the batch
/// is rendered, so rendering is repeatable and leaves the batch untouched.
///
/// The service class code is not enforced against the entries: a debit in a
/// credits-only batch is accepted and logged as a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    header: BatchHeader,
    entries: Vec<EntryDetail>,
    traces: HashSet<TraceNumber>,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new(header: BatchHeader) -> Self {
        Batch {
            header,
            entries: Vec::new(),
            traces: HashSet::new(),
        }
    }

    /// Appends an entry.
    ///
    /// The entry class must match the header's Standard Entry Class code, and
    /// its trace number must not already be used in this batch.
    pub fn add_entry(&mut self, entry: impl Into<EntryDetail>) -> Result<()> {
        let entry = entry.into();
        if entry.sec() != self.header.sec() {
            return Err(AchError::EntryClassMismatch {
                batch: self.header.sec().to_string(),
                entry: entry.sec().to_string(),
            });
        }
        if self.traces.contains(entry.trace_number()) {
            return Err(AchError::TraceNumberInUse(entry.trace_number().to_string()));
        }

        if let Some(kind) = entry.transaction_code().kind() {
            if !self.header.service_class().admits(kind) {
                warn!(
                    "Batch {}: {:?} entry {} in service class {} batch",
                    self.header.batch_number(),
                    kind,
                    entry.trace_number(),
                    self.header.service_class()
                );
            }
        }

        self.traces.insert(entry.trace_number().clone());
        self.entries.push(entry);
        Ok(())
    }

    pub fn header(&self) -> &BatchHeader {
        &self.header
    }

    pub fn entries(&self) -> &[EntryDetail] {
        &self.entries
    }

    /// Renders the header, every entry with its addenda, and the batch control.
    ///
    /// Any entry whose transaction code is neither a debit nor a credit fails
    /// the whole batch; no lines are produced in that case.
    pub fn render(&self) -> Result<RenderedBatch> {
        let totals = self
            .entries
            .iter()
            .try_fold(ControlTotals::default(), |totals, entry| totals.with_entry(entry))?;
        let control = BatchControl::new(&self.header, totals)?;

        let mut lines = Vec::with_capacity(2 * self.entries.len() + 2);
        lines.push(self.header.render());
        for entry in &self.entries {
            lines.push(entry.render());
            if let Some(addenda) = entry.addenda() {
                lines.push(addenda.render());
            }
        }
        lines.push(control.render());

        debug!(
            "Batch {}: {} entries, {} entry/addenda records, debits {}, credits {}",
            self.header.batch_number(),
            self.entries.len(),
            totals.entry_addenda_count,
            totals.total_debit,
            totals.total_credit
        );

        Ok(RenderedBatch { lines, control })
    }
}

/// Output of [`Batch::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBatch {
    lines: Vec<String>,
    control: BatchControl,
}

impl RenderedBatch {
    /// Record lines in file order, without terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn control(&self) -> &BatchControl {
        &self.control
    }

    pub fn totals(&self) -> &ControlTotals {
        self.control.totals()
    }

    /// The lines joined, each followed by the line terminator.
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .flat_map(|line| [line.as_str(), LINE_TERMINATOR])
            .collect()
    }
}
