//! Error types for the hand action tracking library.

use crate::object_tracking::ItemState;
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Recorded session could not be parsed or is inconsistent
    #[error("Session error: {0}")]
    SessionError(String),

    /// Requested item state change is not allowed by the state machine
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        /// State the item is currently in
        from: ItemState,
        /// State that was requested
        to: ItemState,
    },

    /// No item with this tracking id is under supervision
    #[error("Unknown tracked item: {0}")]
    UnknownItem(u64),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
