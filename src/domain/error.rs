use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed catalog file or row. Fatal at load.
    #[error("Catalog format error (row {row}): {reason}")]
    CatalogFormat { row: usize, reason: String },

    /// Encoder output and catalog embeddings disagree on vector size. Fatal.
    #[error("Dimension mismatch: catalog vectors have {expected} dimensions, encoder produced {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Insufficient data: need at least 2 price rows, got {rows}")]
    InsufficientData { rows: usize },

    #[error("Invalid price on {date}: close {close} must be positive")]
    InvalidPrice { date: NaiveDate, close: f64 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DomainError {
    /// Load-time and configuration errors that must stop the process.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DomainError::CatalogFormat { .. }
                | DomainError::DimensionMismatch { .. }
                | DomainError::Config(_)
                | DomainError::Io(_)
        )
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::MarketData(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(DomainError::CatalogFormat { row: 3, reason: "bad".into() }.is_fatal());
        assert!(DomainError::DimensionMismatch { expected: 384, actual: 1536 }.is_fatal());
        assert!(!DomainError::InsufficientData { rows: 1 }.is_fatal());
        assert!(!DomainError::NotFound("ZZZZ".into()).is_fatal());
    }

    #[test]
    fn test_messages_name_the_problem() {
        let e = DomainError::DimensionMismatch { expected: 384, actual: 512 };
        assert!(e.to_string().contains("384"));
        assert!(e.to_string().contains("512"));

        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let e = DomainError::InvalidPrice { date, close: 0.0 };
        assert!(e.to_string().contains("2024-01-02"));
    }
}
