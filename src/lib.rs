//! # NACHA Writer
//!
//! Encodes payment instructions into NACHA ACH files: 94-character fixed-width
//! records arranged as file → batches → entries → optional addenda, closed by
//! control records whose counts, hashes and dollar totals tie out to the
//! records above them.
//!
//! ## Design Principles
//!
//! - **Exact money**: amounts are `rust_decimal` values held in whole cents
//! - **Validate on construction**: every record checks its own fields when it
//!   is built; nothing is silently truncated when it is rendered
//! - **Derived controls**: batch and file control records are computed by
//!   folding over entries at render time, never supplied by the caller
//! - **Reproducible output**: the creation timestamp is injected, so rendering
//!   the same file twice yields identical text
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use nacha_writer::{
//!     AchFile, Amount, Batch, BatchHeader, EntryCommon, FileHeader, PpdEntry, ServiceClass,
//!     StandardEntryClass,
//! };
//! use std::str::FromStr;
//!
//! let created = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let header = FileHeader::new("123456789", "987654321", created).unwrap();
//!
//! let batch_header = BatchHeader::new(
//!     ServiceClass::CreditsOnly,
//!     "YOUR COMPANY",
//!     "9876543210",
//!     StandardEntryClass::Ppd,
//!     "PAYROLL",
//!     NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(),
//!     "12345678",
//!     1,
//! )
//! .unwrap();
//!
//! let amount = Amount::from_str("100.00").unwrap();
//! let common = EntryCommon::new("22", "87654321", "123456789", amount, "123456780000001").unwrap();
//!
//! let mut batch = Batch::new(batch_header);
//! batch.add_entry(PpdEntry::new(common, "JOHN DOE").unwrap()).unwrap();
//!
//! let mut file = AchFile::new(header);
//! file.add_batch(batch).unwrap();
//!
//! let text = file.generate().unwrap();
//! assert_eq!(text.lines().count(), 5);
//! assert!(text.lines().all(|line| line.len() == 94));
//! ```

pub mod amount;
pub mod batch;
pub mod codes;
pub mod error;
pub mod file;
pub mod format;
pub mod instruction;
pub mod loader;
pub mod records;

pub use amount::Amount;
pub use batch::{Batch, RenderedBatch};
pub use codes::{
    PaymentType, RoutingPrefix, ServiceClass, StandardEntryClass, TraceNumber, TransactionCode,
    TransactionKind,
};
pub use error::{AchError, Result};
pub use file::{AchFile, RenderedFile};
pub use instruction::{BatchKey, InstructionRecord};
pub use loader::InstructionLoader;
pub use records::{
    Addenda, BatchControl, BatchHeader, CcdEntry, ControlTotals, EntryCommon, EntryDetail,
    FileControl, FileHeader, PpdEntry, TelEntry, WebEntry,
};
