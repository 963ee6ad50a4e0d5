//! Error types for Tessera operations.
//!
//! This module provides the main error type [`TesseraError`] and the
//! failure kinds it wraps. They differ in how far they travel:
//!
//! - [`MissingDependencyError`] is expected. It is caught per item, recorded
//!   as a warning and the item is skipped.
//! - [`ResolutionError`] means the underlying data is inconsistent. It fails
//!   the row being migrated.
//! - [`ConfigurationError`] is raised before any lookup happens and fails the
//!   whole call.
//! - [`BackendError`] wraps a failed read from an external collaborator.

use std::{error::Error as StdError, io};

use thiserror::Error;

use tessera_core::identifier::{EntityId, SourceId};

/// The main error type for Tessera operations.
#[derive(Debug, Error)]
pub enum TesseraError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    MissingDependency(#[from] MissingDependencyError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// A layout item references something that was never migrated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingDependencyError {
    #[error("Unable to find related migrated block for source id {source_id} in migration {migration}")]
    Block {
        source_id: SourceId,
        migration: String,
    },

    #[error("Unable to find the paragraph type for source id {source_id}")]
    ParagraphType { source_id: SourceId },

    #[error("No migration is mapped for paragraph type {paragraph_type} (source id {source_id})")]
    UnmappedType {
        paragraph_type: String,
        source_id: SourceId,
    },
}

impl MissingDependencyError {
    /// Returns the source id of the item that could not be resolved.
    pub fn source_id(&self) -> SourceId {
        match self {
            Self::Block { source_id, .. }
            | Self::ParagraphType { source_id }
            | Self::UnmappedType { source_id, .. } => *source_id,
        }
    }
}

/// The migrated data is inconsistent and a row cannot be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error(
        "An unknown error occurred trying to find the block type from migration item type {item_type} with id {source_id} (block {block_id})"
    )]
    UnknownBlockType {
        item_type: String,
        source_id: SourceId,
        block_id: EntityId,
    },

    #[error("Block {block_id} has no revision")]
    MissingRevision { block_id: EntityId },

    #[error("Invalid paragraph reference at delta {delta} of source field {field}")]
    InvalidReference { field: String, delta: usize },
}

/// Required configuration is absent or malformed.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Missing {key} for {step} process step")]
    MissingKey {
        key: &'static str,
        step: &'static str,
    },

    #[error("Invalid default layout stored for bundle {bundle}: {source}")]
    InvalidDefaultLayout {
        bundle: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A read from an external collaborator failed.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl BackendError {
    /// Create a new backend error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new backend error caused by another error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_block_message() {
        let err = MissingDependencyError::Block {
            source_id: SourceId::new(12),
            migration: "d7_paragraph_text".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Unable to find related migrated block for source id 12 in migration d7_paragraph_text"
        );
        assert_eq!(err.source_id(), SourceId::new(12));
    }

    #[test]
    fn test_missing_dependency_is_transparent() {
        let err: TesseraError = MissingDependencyError::ParagraphType {
            source_id: SourceId::new(3),
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Unable to find the paragraph type for source id 3"
        );
    }

    #[test]
    fn test_configuration_message() {
        let err = ConfigurationError::MissingKey {
            key: "source_field",
            step: "paragraphs_layout",
        };

        assert_eq!(
            err.to_string(),
            "Missing source_field for paragraphs_layout process step"
        );
    }

    #[test]
    fn test_backend_error_keeps_source() {
        let io = io::Error::other("connection reset");
        let err = BackendError::with_source("Lookup failed", io);

        assert_eq!(err.to_string(), "Lookup failed");
        assert!(err.source().is_some());
    }
}
