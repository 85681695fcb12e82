
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpanlogError {
    // This message is part of the engine's contract and must read the same
    // regardless of which endpoint failed validation.
    #[error("Span's start/end must be integers")]
    SpanEndpoints,
    #[error("Parse error: {message}")]
    Parse { message: String },
    #[error("Ordering comparison not allowed between {left} and {right}")]
    Comparison { left: &'static str, right: &'static str },
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, SpanlogError>;

// Helper conversions
impl From<std::num::ParseIntError> for SpanlogError {
    fn from(e: std::num::ParseIntError) -> Self { Self::Parse { message: e.to_string() } }
}
