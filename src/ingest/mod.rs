//! Input tables
//!
//! Loads the defense and reference CSV files into plain records. No
//! filtering happens here beyond trimming cells.

pub mod record;
pub mod tables;

pub use record::{parse_year, NameSlot, RawDefense, ReferenceRecord};
pub use tables::{load_defenses, load_references, read_defenses, read_references};
