//! Error types for the Fathom system.
//!
//! Uses `thiserror` for ergonomic error definition. Two of the kinds,
//! [`ErrorKind::AbortAction`] and [`ErrorKind::DoInstead`], are not
//! faults at all: they are the control signals an action rule raises to
//! unwind or replace the action in flight. The pipeline intercepts
//! them; anything else that reaches the turn loop is reported as an
//! internal fault.

use thiserror::Error;

use crate::id::Id;
use crate::value::Value;

/// The main error type for Fathom operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an unknown-entity error.
    #[must_use]
    pub fn unknown_entity(id: Id) -> Self {
        Self::new(ErrorKind::UnknownEntity(id))
    }

    /// Creates an unknown-operation error.
    #[must_use]
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownOperation(name.into()))
    }

    /// Creates a no-applicable-method fault for a dispatch operation.
    #[must_use]
    pub fn no_applicable_method(operation: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoApplicableMethod {
            operation: operation.into(),
        })
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: &'static str, actual: &Value) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected,
            actual: actual.type_name(),
        })
    }

    /// Creates an action-abort signal with no message of its own.
    #[must_use]
    pub fn abort() -> Self {
        Self::new(ErrorKind::AbortAction { reason: None })
    }

    /// Creates an action-abort signal carrying a reason template.
    #[must_use]
    pub fn abort_with(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::AbortAction {
            reason: Some(reason.into()),
        })
    }

    /// Creates a redirect signal replacing the current action.
    ///
    /// The replacement action travels as its [`Value`] encoding so this
    /// crate stays independent of the action record type.
    #[must_use]
    pub fn do_instead(action: Value, quiet: bool) -> Self {
        Self::new(ErrorKind::DoInstead { action, quiet })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// True if this is the action-abort control signal.
    #[must_use]
    pub fn is_abort(&self) -> bool {
        matches!(self.kind, ErrorKind::AbortAction { .. })
    }

    /// True if this is the redirect control signal.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self.kind, ErrorKind::DoInstead { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An id was used as an entity but never created.
    #[error("unknown entity: {0}")]
    UnknownEntity(Id),

    /// A property or activity name was never declared.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A dispatch scan fell off the head of the method list.
    #[error("no applicable method for {operation}")]
    NoApplicableMethod {
        /// The operation whose rulebook was exhausted.
        operation: String,
    },

    /// A value had the wrong variant for the requested use.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected variant.
        expected: &'static str,
        /// The actual variant encountered.
        actual: &'static str,
    },

    /// Control signal: abort the action in flight.
    ///
    /// Unwinds to the turn loop without calling `carry_out` or
    /// `report`. The optional reason is a prose template.
    #[error("action aborted")]
    AbortAction {
        /// Template to show the player, if any.
        reason: Option<String>,
    },

    /// Control signal: replace the action in flight with another.
    #[error("action redirected")]
    DoInstead {
        /// The replacement action, as its `Value` encoding.
        action: Value,
        /// Suppress the `(doing X instead)` notice.
        quiet: bool,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// An I/O operation failed.
    #[error("io error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
