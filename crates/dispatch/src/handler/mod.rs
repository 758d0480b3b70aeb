//! Category-specific packet handlers.
//!
//! Only client and protocol functions have handlers; the dispatcher rejects
//! every other category before a handler is chosen.

mod client;
mod protocol;

pub use client::ClientHandler;
pub use protocol::ProtocolHandler;

use ::protocol::{Function, FunctionCategory, FunctionSpec, ParameterMap};

use crate::error::HandlerError;
use crate::mode::{DispatchMode, DispatchResult};
use crate::session::CommandSession;

/// Handler for one function category.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubHandler {
    /// Server-to-client callbacks.
    Client(ClientHandler),
    /// Connection housekeeping.
    Protocol(ProtocolHandler),
}

impl SubHandler {
    /// Handler for `category`, if that category is valid from the server.
    #[must_use]
    pub const fn for_category(category: FunctionCategory) -> Option<Self> {
        match category {
            FunctionCategory::Client => Some(Self::Client(ClientHandler)),
            FunctionCategory::Protocol => Some(Self::Protocol(ProtocolHandler)),
            FunctionCategory::User | FunctionCategory::Server | FunctionCategory::None => None,
        }
    }

    /// Category this handler serves.
    #[must_use]
    pub const fn category(&self) -> FunctionCategory {
        match self {
            Self::Client(_) => FunctionCategory::Client,
            Self::Protocol(_) => FunctionCategory::Protocol,
        }
    }

    /// Handles one packet and returns the verdict for the dispatch loop.
    pub fn dispatch(
        &self,
        mode: DispatchMode,
        spec: FunctionSpec,
        session: &mut CommandSession<'_>,
        params: ParameterMap,
    ) -> Result<DispatchResult, HandlerError> {
        match (self, spec.function()) {
            (Self::Client(handler), Function::Client(function)) => {
                handler.dispatch(mode, function, session, params)
            }
            (Self::Protocol(handler), Function::Protocol(function)) => {
                handler.dispatch(mode, function, session, params)
            }
            _ => Err(HandlerError::Protocol(format!(
                "{} is not a {} function",
                spec.name(),
                self.category()
            ))),
        }
    }
}
