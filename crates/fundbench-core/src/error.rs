use thiserror::Error;

/// Validation and contract errors exposed by `fundbench-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter, digit, or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("scheme code cannot be empty")]
    EmptySchemeCode,
    #[error("scheme code must contain only digits and at most {max} of them: '{value}'")]
    InvalidSchemeCode { value: String, max: usize },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("start date {start} must not be after end date {end}")]
    InvertedDateRange { start: String, end: String },

    #[error("series value for {date} must be finite")]
    NonFiniteValue { date: String },
}

