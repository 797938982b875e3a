//! Error types for the persistence layer. Validation failures are the only
//! thing the front-end is expected to recover from; everything else is a
//! storage failure that bubbles up to `main`.

use thiserror::Error;

/// A required field was left empty. Raised before anything is written.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Travel name and date are required fields!")]
    MissingPlanFields,
    #[error("Date and destination are required fields!")]
    MissingDetailFields,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Attach a short description to a raw SQLite failure, in the same spirit as
/// `anyhow::Context` but producing a typed [`StoreError`].
pub(crate) trait StorageContext<T> {
    fn context(self, context: &'static str) -> Result<T>;
}

impl<T> StorageContext<T> for rusqlite::Result<T> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|source| StoreError::Storage { context, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_recoverable() {
        let err = StoreError::from(ValidationError::MissingPlanFields);
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Travel name and date are required fields!");
    }

    #[test]
    fn storage_errors_keep_their_source() {
        let raw: rusqlite::Result<()> = Err(rusqlite::Error::QueryReturnedNoRows);
        let err = raw.context("failed to load plans").unwrap_err();
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "failed to load plans");
        assert!(std::error::Error::source(&err).is_some());
    }
}
