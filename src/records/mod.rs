//! Record encoders. Each record renders to exactly 94 characters.

pub mod addenda;
pub mod batch_header;
pub mod control;
pub mod entry_detail;
pub mod file_header;

pub use addenda::Addenda;
pub use batch_header::BatchHeader;
pub use control::{block_count, BatchControl, ControlTotals, FileControl, BLOCKING_FACTOR};
pub use entry_detail::{CcdEntry, EntryCommon, EntryDetail, PpdEntry, TelEntry, WebEntry};
pub use file_header::FileHeader;
