//! Groups CSV payment instructions into batches.
//!
//! Rows are read one at a time. Each row lands in the batch whose batch-level
//! columns it matches; a new batch is opened (and numbered) the first time a
//! combination is seen. Unlike a tolerant transaction feed, a payment file
//! cannot be sent with rows missing, so the first invalid row stops the load.

use crate::batch::Batch;
use crate::codes::TraceNumber;
use crate::error::{AchError, Result};
use crate::file::AchFile;
use crate::instruction::{BatchKey, InstructionRecord};
use crate::records::FileHeader;
use csv::{ReaderBuilder, Trim};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::io::Read;

/// Builds batches from payment instructions.
///
/// # Trace numbers
///
/// Rows without a trace number get one made of the batch's originating DFI
/// and the row's 1-based position among all loaded entries. Trace numbers
/// must be unique across everything the loader has seen.
pub struct InstructionLoader {
    /// Batches in order of first appearance.
    batches: Vec<Batch>,

    /// Position of each batch in `batches`.
    index: HashMap<BatchKey, usize>,

    /// Trace numbers already used in this file.
    traces: HashSet<TraceNumber>,

    /// Entries loaded so far.
    entry_count: u32,
}

impl InstructionLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        InstructionLoader {
            batches: Vec::new(),
            index: HashMap::new(),
            traces: HashSet::new(),
            entry_count: 0,
        }
    }

    /// Loads instructions from a CSV reader with a header row.
    ///
    /// Fails on the first row that cannot be parsed or turned into an entry.
    pub fn load_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<InstructionRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let record = result.map_err(|e| AchError::InvalidRecord {
                row: row_num,
                message: e.to_string(),
            })?;
            self.load_record(&record, row_num)?;
        }

        Ok(())
    }

    /// Adds a single instruction.
    pub fn load_record(&mut self, record: &InstructionRecord, row: usize) -> Result<()> {
        let invalid = |e: AchError| AchError::InvalidRecord {
            row,
            message: e.to_string(),
        };

        let key = record.batch_key().map_err(invalid)?;
        let sequence = self.entry_count + 1;
        let trace = match record.trace.as_deref().map(str::trim) {
            Some(trace) if !trace.is_empty() => TraceNumber::new(trace),
            _ => TraceNumber::from_parts(&key.originating_dfi, sequence),
        }
        .map_err(invalid)?;

        if self.traces.contains(&trace) {
            return Err(AchError::DuplicateTraceNumber {
                trace: trace.to_string(),
                row,
            });
        }

        let entry = record.to_entry(key.sec, &trace).map_err(invalid)?;
        let batch_idx = self.batch_index(key).map_err(invalid)?;
        self.batches[batch_idx].add_entry(entry).map_err(invalid)?;

        debug!(
            "Row {}: {} entry {} for {} added to batch {}",
            row,
            record.sec.trim(),
            trace,
            record.amount,
            batch_idx + 1
        );

        self.traces.insert(trace);
        self.entry_count = sequence;
        Ok(())
    }

    /// Finds the batch for `key`, opening a new one if needed.
    fn batch_index(&mut self, key: BatchKey) -> Result<usize> {
        if let Some(&idx) = self.index.get(&key) {
            return Ok(idx);
        }

        // Numbers past the 7-digit field are rejected by the header.
        let batch_number = u32::try_from(self.batches.len() + 1).unwrap_or(u32::MAX);
        let header = key.header(batch_number)?;
        debug!(
            "Opening batch {} ({} {})",
            batch_number,
            key.sec,
            key.company_name
        );

        self.batches.push(Batch::new(header));
        self.index.insert(key, self.batches.len() - 1);
        Ok(self.batches.len() - 1)
    }

    /// Returns the number of entries loaded.
    pub fn entry_count(&self) -> u32 {
        self.entry_count
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn into_batches(self) -> Vec<Batch> {
        self.batches
    }

    /// Places all loaded batches under `header`.
    pub fn into_file(self, header: FileHeader) -> Result<AchFile> {
        let mut file = AchFile::new(header);
        for batch in self.batches {
            file.add_batch(batch)?;
        }
        Ok(file)
    }
}

impl Default for InstructionLoader {
    fn default() -> Self {
        Self::new()
    }
}
