//! CSV transfer for the register screens: client-side parse on import
//! (the parsed rows are posted to the backend's import endpoint) and
//! client-side formatting on export of the filtered set.

pub mod export;
pub mod import;
pub mod types;

pub use export::{csv_template, to_csv};
pub use import::{import_payload, parse_csv};
pub use types::{ImportResult, RowError};
