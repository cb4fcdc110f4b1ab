use serde_json::{Map, Value};

/// One malformed import row; the rest of the batch still goes through.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line number in the source file, header included.
    pub line: usize,
    pub reason: String,
}

/// Outcome of the client-side parse step.
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub rows: Vec<Map<String, Value>>,
    pub errors: Vec<RowError>,
}

impl ImportResult {
    pub fn parsed(&self) -> usize {
        self.rows.len()
    }
}
