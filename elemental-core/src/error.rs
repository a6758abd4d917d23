//! Error types for Elemental.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`ElementError`] - Errors surfaced to callers of component operations
//! - [`ListenerError`] - Errors from an individual listener invocation
//!
//! Listener errors never escape a dispatch. They are logged by the delivery
//! loop and the remaining listeners still run.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by component, registry and query operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElementError {
    /// An argument was rejected before any event was built.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A component name is not a valid custom element name.
    #[error("invalid element name: {0:?}")]
    InvalidName(String),

    /// The registry already holds a constructor for this name.
    #[error("element already defined: {0}")]
    AlreadyDefined(String),

    /// The selector uses syntax the query engine does not support.
    #[error("unsupported selector: {0:?}")]
    Selector(String),
}

/// Errors that can occur while invoking a single listener.
#[derive(Error, Debug)]
pub enum ListenerError {
    /// The listener returned an error.
    #[error("listener failed: {0}")]
    Failed(#[source] BoxError),

    /// The listener panicked.
    #[error("listener panicked: {0}")]
    Panicked(String),
}

impl From<BoxError> for ListenerError {
    fn from(err: BoxError) -> Self {
        ListenerError::Failed(err)
    }
}
