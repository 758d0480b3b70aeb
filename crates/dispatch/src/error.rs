//! Error categorization for the dispatch loop.
//!
//! [`DispatchError`] ends a command. [`HandlerError`] is what sub-handlers
//! and client callbacks report; the dispatcher turns it into a
//! [`DispatchError`] tagged with the function and mode it arose in.

use std::io;

use charset::TranslationError;
use thiserror::Error;

use crate::mode::DispatchMode;

/// Failure that aborts a dispatch session.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The server sent something this client cannot interpret.
    #[error("protocol error in {mode} mode{}: {message}", function.as_deref().map(|f| format!(" ({f})")).unwrap_or_default())]
    Protocol {
        /// Description of the violation.
        message: String,
        /// Function being processed, when known.
        function: Option<String>,
        /// Mode the loop was in.
        mode: DispatchMode,
    },

    /// The connection closed or failed before the command finished.
    #[error("connection lost in {mode} mode: {reason}")]
    ConnectionLost {
        /// What happened.
        reason: String,
        /// Mode the loop was in.
        mode: DispatchMode,
        /// Underlying I/O error, absent for a clean end of stream.
        #[source]
        source: Option<io::Error>,
    },

    /// The server called a function that is never valid in this direction.
    #[error("{function} is not implemented by this client ({mode} mode)")]
    Unimplemented {
        /// Function name.
        function: String,
        /// Mode the loop was in.
        mode: DispatchMode,
    },

    /// A sub-handler stopped the command with an error verdict.
    #[error("command aborted by {function} in {mode} mode")]
    Aborted {
        /// Function whose handler aborted.
        function: String,
        /// Mode the loop was in.
        mode: DispatchMode,
    },

    /// A sub-handler failed unexpectedly.
    #[error("{function} failed in {mode} mode: {message}")]
    Connection {
        /// Function being processed.
        function: String,
        /// Mode the loop was in.
        mode: DispatchMode,
        /// Message of the original failure.
        message: String,
    },
}

impl DispatchError {
    /// Mode the loop was in when the error occurred.
    #[must_use]
    pub const fn mode(&self) -> DispatchMode {
        match self {
            Self::Protocol { mode, .. }
            | Self::ConnectionLost { mode, .. }
            | Self::Unimplemented { mode, .. }
            | Self::Aborted { mode, .. }
            | Self::Connection { mode, .. } => *mode,
        }
    }

    /// Function being processed, when known.
    #[must_use]
    pub fn function(&self) -> Option<&str> {
        match self {
            Self::Protocol { function, .. } => function.as_deref(),
            Self::ConnectionLost { .. } => None,
            Self::Unimplemented { function, .. }
            | Self::Aborted { function, .. }
            | Self::Connection { function, .. } => Some(function),
        }
    }

    /// Categorizes a failure to read the next packet.
    ///
    /// Undecodable frames are protocol errors; everything else means the
    /// connection is gone.
    pub(crate) fn from_read(err: io::Error, mode: DispatchMode) -> Self {
        if err.kind() == io::ErrorKind::InvalidData {
            Self::Protocol {
                message: err.to_string(),
                function: None,
                mode,
            }
        } else {
            Self::ConnectionLost {
                reason: err.to_string(),
                mode,
                source: Some(err),
            }
        }
    }

    /// Tags a sub-handler failure with the function and mode it arose in.
    pub(crate) fn from_handler(err: HandlerError, function: &str, mode: DispatchMode) -> Self {
        match err {
            HandlerError::Protocol(message) => Self::Protocol {
                message,
                function: Some(function.to_owned()),
                mode,
            },
            HandlerError::Unimplemented(function) => Self::Unimplemented { function, mode },
            other => Self::Connection {
                function: function.to_owned(),
                mode,
                message: other.to_string(),
            },
        }
    }
}

/// Failure reported by a sub-handler or a client callback.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The packet is missing something the function requires.
    #[error("{0}")]
    Protocol(String),

    /// The function is not supported.
    #[error("{0} is not implemented by this client")]
    Unimplemented(String),

    /// Sending a reply failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Text could not be transcoded.
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// A caller-supplied callback failed.
    #[error("callback failed: {0}")]
    Callback(String),
}
