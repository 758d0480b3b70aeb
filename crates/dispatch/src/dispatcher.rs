//! The packet dispatch loop.

use logging::{trace_connect, trace_dispatch};
use protocol::{FunctionCategory, FunctionSpec, Packet, ParameterMap, ProtocolFunction};

use crate::connection::Connection;
use crate::error::DispatchError;
use crate::handler::SubHandler;
use crate::mode::{DispatchMode, DispatchResult};
use crate::session::CommandSession;

/// Drives a command by reading and dispatching server packets.
///
/// The dispatcher holds no per-command state; everything a command
/// accumulates lives in its [`CommandSession`], so one dispatcher can serve
/// any number of sessions in turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct PacketDispatcher;

impl PacketDispatcher {
    /// Creates a dispatcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs the dispatch loop until the command finishes.
    ///
    /// Returns the accumulated result maps when a handler stops normally or
    /// when the session is cancelled. Cancellation is checked before every
    /// read and again after it, so a cancelled session never dispatches
    /// another packet.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::ConnectionLost`] when the stream ends or fails
    ///   before the command finished.
    /// - [`DispatchError::Protocol`] for undecodable packets and for function
    ///   names that are unknown or only valid from client to server.
    /// - [`DispatchError::Unimplemented`] for server functions and
    ///   unsupported client functions.
    /// - [`DispatchError::Aborted`] when a handler stops with an error.
    /// - [`DispatchError::Connection`] for any other handler failure.
    pub fn dispatch(
        &self,
        session: &mut CommandSession<'_>,
    ) -> Result<Vec<ParameterMap>, DispatchError> {
        let mut mode = DispatchMode::Primal;
        session.progress_start();

        loop {
            if session.is_cancelled() {
                return Ok(Self::cancelled(session, mode));
            }

            let packet = match session.read_packet() {
                Ok(Some(packet)) => packet,
                Ok(None) => {
                    return Err(DispatchError::ConnectionLost {
                        reason: "server closed the connection before the command completed"
                            .to_owned(),
                        mode,
                        source: None,
                    });
                }
                Err(err) => return Err(DispatchError::from_read(err, mode)),
            };

            if session.is_cancelled() {
                return Ok(Self::cancelled(session, mode));
            }

            let (name, params) = packet.into_parts();
            let result = Self::dispatch_packet(mode, &name, session, params)?;

            match result.next_mode(mode) {
                Some(next) => {
                    if next != mode {
                        trace_dispatch!("{} -> {} after {}", mode, next, name);
                    }
                    mode = next;
                }
                None if result == DispatchResult::StopNormal => {
                    trace_dispatch!("{} stopped the command in {} mode", name, mode);
                    session.progress_stop();
                    return Ok(session.take_results());
                }
                None => {
                    return Err(DispatchError::Aborted {
                        function: name,
                        mode,
                    });
                }
            }
        }
    }

    fn dispatch_packet(
        mode: DispatchMode,
        name: &str,
        session: &mut CommandSession<'_>,
        params: ParameterMap,
    ) -> Result<DispatchResult, DispatchError> {
        if name.is_empty() {
            return Err(DispatchError::Protocol {
                message: "packet has no function name".to_owned(),
                function: None,
                mode,
            });
        }

        let spec = FunctionSpec::decode(name);
        let handler = match spec.category() {
            FunctionCategory::None => {
                return Err(DispatchError::Protocol {
                    message: "unable to decode function".to_owned(),
                    function: Some(name.to_owned()),
                    mode,
                });
            }
            FunctionCategory::User => {
                return Err(DispatchError::Protocol {
                    message: "user functions are never sent by the server".to_owned(),
                    function: Some(name.to_owned()),
                    mode,
                });
            }
            FunctionCategory::Server => {
                return Err(DispatchError::Unimplemented {
                    function: name.to_owned(),
                    mode,
                });
            }
            category => SubHandler::for_category(category).ok_or_else(|| {
                DispatchError::Protocol {
                    message: format!("no handler for {category} functions"),
                    function: Some(name.to_owned()),
                    mode,
                }
            })?,
        };

        trace_dispatch!("dispatching {} ({}) in {} mode", name, spec.category(), mode);
        handler
            .dispatch(mode, spec, session, params)
            .map_err(|err| DispatchError::from_handler(err, name, mode))
    }

    fn cancelled(session: &mut CommandSession<'_>, mode: DispatchMode) -> Vec<ParameterMap> {
        trace_dispatch!("command cancelled in {} mode", mode);
        session.progress_stop();
        session.take_results()
    }

    /// Tells the server the connection is being released.
    ///
    /// Failures are logged and otherwise ignored: by the time a connection is
    /// torn down the command has already finished, failed or been cancelled.
    pub fn shutdown(&self, connection: &mut dyn Connection) {
        let release = Packet::for_spec(
            FunctionSpec::protocol(ProtocolFunction::Release),
            ParameterMap::new(),
        );
        if let Err(err) = connection.send_packet(&release) {
            tracing::warn!(target: "p4rpc::connect", "failed to send release: {err}");
            return;
        }
        trace_connect!("sent release");
    }
}
