//! File aggregation: the file header, its batches, and the derived file control.

use crate::batch::{Batch, RenderedBatch};
use crate::codes::TraceNumber;
use crate::error::{AchError, Result};
use crate::format::LINE_TERMINATOR;
use crate::records::{ControlTotals, FileControl, FileHeader};
use log::debug;
use std::collections::HashSet;

/// A complete ACH file.
///
/// # Output
///
/// One 94-character record per line, each followed by `\n`:
///
/// 1. File Header
/// 2. For each batch: Batch Header, each Entry Detail followed by its Addenda
///    (if any), Batch Control
/// 3. File Control
///
/// The output is not padded to a multiple of 10 records. The block count in the
/// File Control assumes that whoever transmits the file adds any filler records.
///
/// Batch numbers strictly increase through the file, and no trace number
/// appears twice in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchFile {
    header: FileHeader,
    batches: Vec<Batch>,
    traces: HashSet<TraceNumber>,
}

impl AchFile {
    pub fn new(header: FileHeader) -> Self {
        AchFile {
            header,
            batches: Vec::new(),
            traces: HashSet::new(),
        }
    }

    /// Appends a batch.
    ///
    /// Fails if its batch number does not exceed the previous batch's, or if
    /// any of its trace numbers is already used in the file. A rejected batch
    /// leaves the file unchanged.
    pub fn add_batch(&mut self, batch: Batch) -> Result<()> {
        if let Some(last) = self.batches.last() {
            let previous = last.header().batch_number();
            let batch_number = batch.header().batch_number();
            if batch_number <= previous {
                return Err(AchError::BatchNumberOutOfOrder {
                    previous,
                    batch_number,
                });
            }
        }

        if let Some(entry) = batch
            .entries()
            .iter()
            .find(|entry| self.traces.contains(entry.trace_number()))
        {
            return Err(AchError::TraceNumberInUse(entry.trace_number().to_string()));
        }

        self.traces
            .extend(batch.entries().iter().map(|entry| entry.trace_number().clone()));
        self.batches.push(batch);
        Ok(())
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Renders every batch and rolls their totals up into the File Control.
    ///
    /// Fails if any batch fails to render.
    pub fn render(&self) -> Result<RenderedFile> {
        let rendered: Vec<RenderedBatch> = self
            .batches
            .iter()
            .map(Batch::render)
            .collect::<Result<_>>()?;

        let totals = rendered
            .iter()
            .fold(ControlTotals::default(), |acc, batch| acc.merge(batch.totals()));
        let control = FileControl::new(rendered.len() as u64, totals)?;

        let mut text = String::new();
        push_line(&mut text, &self.header.render());
        for batch in &rendered {
            for line in batch.lines() {
                push_line(&mut text, line);
            }
        }
        push_line(&mut text, &control.render());

        debug!(
            "File rendered: {} batches, {} blocks, {} entry/addenda records",
            control.batch_count(),
            control.block_count(),
            totals.entry_addenda_count
        );

        Ok(RenderedFile {
            text,
            batches: rendered,
            control,
        })
    }

    /// Renders the file and returns only its text.
    pub fn generate(&self) -> Result<String> {
        self.render().map(|rendered| rendered.text)
    }
}

fn push_line(text: &mut String, line: &str) {
    text.push_str(line);
    text.push_str(LINE_TERMINATOR);
}

/// Output of [`AchFile::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    text: String,
    batches: Vec<RenderedBatch>,
    control: FileControl,
}

impl RenderedFile {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn batches(&self) -> &[RenderedBatch] {
        &self.batches
    }

    pub fn control(&self) -> &FileControl {
        &self.control
    }

    pub fn totals(&self) -> &ControlTotals {
        self.control.totals()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
