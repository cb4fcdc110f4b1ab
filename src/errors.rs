use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Network failure or non-2xx response on a read.
    Fetch(String),
    /// Non-2xx, envelope failure, or transport error on a write.
    /// Carries the operation name for user-facing reporting.
    Mutation { op: &'static str, message: String },
    /// Client-side required-field checks failed; the request was never issued.
    Validation(String),
    /// Malformed CSV or an unexpected response shape.
    Parse(String),
    /// The owning view was dropped while the request was in flight.
    Cancelled,
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Fetch(e) => write!(f, "Fetch error: {e}"),
            AppError::Mutation { op, message } => write!(f, "{op} failed: {message}"),
            AppError::Validation(e) => write!(f, "Validation failed: {e}"),
            AppError::Parse(e) => write!(f, "Parse error: {e}"),
            AppError::Cancelled => write!(f, "Cancelled"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Fetch(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Parse(e.to_string())
    }
}
