use thiserror::Error;

use crate::DocId;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HashTableError {
    #[error("hash table needs at least one bucket")]
    ZeroBuckets,

    #[error("hash key must not be empty")]
    EmptyKey,
}

/// Failures reading or writing a page file.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("page {0} not found")]
    NotFound(DocId),

    #[error("page io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("page {0} is malformed: {1}")]
    Malformed(DocId, String),

    #[error("page {id} declares {declared} bytes of html but holds {actual}")]
    LengthMismatch { id: DocId, declared: usize, actual: usize },
}

impl PageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PageError::NotFound(_))
    }
}

/// Failures reading or writing an index file.
#[derive(Error, Debug)]
pub enum IndexFileError {
    #[error("index io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index line {line} is malformed: {reason}")]
    Malformed { line: usize, reason: String },

    #[error(transparent)]
    Table(#[from] HashTableError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(PageError::NotFound(42).to_string(), "page 42 not found");
        let err = PageError::LengthMismatch { id: 3, declared: 10, actual: 7 };
        assert_eq!(err.to_string(), "page 3 declares 10 bytes of html but holds 7");
        let err = IndexFileError::Malformed { line: 2, reason: "odd pair list".into() };
        assert_eq!(err.to_string(), "index line 2 is malformed: odd pair list");
    }

    #[test]
    fn not_found_is_distinguishable() {
        assert!(PageError::NotFound(1).is_not_found());
        assert!(!PageError::Malformed(1, "x".into()).is_not_found());
    }
}
