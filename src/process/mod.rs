// src/process/mod.rs
pub mod normalize;
pub mod parse;
pub mod raw_table;
pub mod utils;

pub use normalize::{normalize_record, normalize_records, renormalize, Cell, NormalizedRow};
pub use parse::parse_csv;
pub use raw_table::{RawRecord, RawTable};
