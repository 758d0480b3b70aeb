use logging::trace_dispatch;
use protocol::{FunctionSpec, Packet, ParameterMap, ProtocolFunction};

use crate::error::HandlerError;
use crate::mode::{DispatchMode, DispatchResult};
use crate::session::CommandSession;

/// Handles connection housekeeping functions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProtocolHandler;

impl ProtocolHandler {
    /// Handles one protocol function.
    pub fn dispatch(
        &self,
        mode: DispatchMode,
        function: ProtocolFunction,
        session: &mut CommandSession<'_>,
        params: ParameterMap,
    ) -> Result<DispatchResult, HandlerError> {
        trace_dispatch!("{} in {} mode", function.name(), mode);
        match function {
            ProtocolFunction::Protocol => {
                session.merge_server_protocol(&params);
                Ok(DispatchResult::Continue)
            }
            ProtocolFunction::Flush1 => {
                // flush2 echoes the sequence counters of flush1.
                let reply = Packet::for_spec(FunctionSpec::protocol(ProtocolFunction::Flush2), params);
                session.send(&reply)?;
                Ok(DispatchResult::Continue)
            }
            ProtocolFunction::Flush2 | ProtocolFunction::Crypto => Ok(DispatchResult::Continue),
            ProtocolFunction::Release | ProtocolFunction::Release2 => Ok(DispatchResult::StopNormal),
            ProtocolFunction::Compress1 | ProtocolFunction::Compress2 => {
                Err(HandlerError::Unimplemented(function.name().to_owned()))
            }
        }
    }
}
