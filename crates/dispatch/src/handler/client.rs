use logging::trace_dispatch;
use protocol::{ClientFunction, FunctionSpec, Packet, ParameterMap, keys};

use crate::error::HandlerError;
use crate::mode::{DispatchMode, DispatchResult};
use crate::session::CommandSession;

const SEVERITY_FAILED: u32 = 3;
const SEVERITY_FATAL: u32 = 4;

/// Message code for client-side errors: subcode 1 in the client subsystem (14).
const fn message_code(severity: u32) -> u32 {
    1 | (14 << 10) | (severity << 28)
}

fn error_result(severity: u32, message: impl Into<Vec<u8>>) -> ParameterMap {
    let mut result = ParameterMap::new();
    result.insert(keys::CODE0, message_code(severity).to_string());
    result.insert(keys::FMT0, message);
    result
}

/// Handles server-to-client callbacks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClientHandler;

impl ClientHandler {
    /// Handles one client function.
    pub fn dispatch(
        &self,
        mode: DispatchMode,
        function: ClientFunction,
        session: &mut CommandSession<'_>,
        params: ParameterMap,
    ) -> Result<DispatchResult, HandlerError> {
        trace_dispatch!("{} in {} mode", function.name(), mode);
        if !session.is_cancelled() {
            session.progress_tick(progress_marker(function, &params));
        }

        match function {
            ClientFunction::Message if session.config().quiet() => Ok(DispatchResult::Continue),
            ClientFunction::Message
            | ClientFunction::FstatInfo
            | ClientFunction::FstatPartial
            | ClientFunction::Progress
            | ClientFunction::OutputInfo
            | ClientFunction::OutputData
            | ClientFunction::OutputBinary => {
                session.push_result(params);
                Ok(DispatchResult::Continue)
            }
            ClientFunction::OutputText => Ok(Self::output_text(session, params)),
            ClientFunction::OutputError => Ok(Self::output_error(session, params)),
            ClientFunction::Prompt => Self::prompt(session, &params),
            ClientFunction::SetPassword
            | ClientFunction::InputData
            | ClientFunction::Ack
            | ClientFunction::SingleSignOn
            | ClientFunction::Crypto => Self::respond(function, session, &params),
            _ => Self::local_action(function, session, &params),
        }
    }

    fn output_text(session: &mut CommandSession<'_>, mut params: ParameterMap) -> DispatchResult {
        let converted = match (params.get(keys::DATA), session.text_converter_mut()) {
            (Some(data), Some(converter)) => Some(converter.convert(data)),
            _ => None,
        };

        match converted {
            None => session.push_result(params),
            Some(Ok(text)) => {
                params.insert(keys::DATA, text);
                session.push_result(params);
            }
            Some(Err(err)) => {
                tracing::warn!(target: "p4rpc::iconv", "{err}");
                if let Some(converter) = session.text_converter_mut() {
                    converter.reset();
                }
                session.push_result(error_result(SEVERITY_FAILED, err.to_string()));
            }
        }
        DispatchResult::Continue
    }

    fn output_error(session: &mut CommandSession<'_>, mut params: ParameterMap) -> DispatchResult {
        let message = params.remove(keys::DATA).unwrap_or_default();
        params.extend_from(&error_result(SEVERITY_FATAL, message));
        session.push_result(params);
        DispatchResult::StopNormal
    }

    fn prompt(
        session: &mut CommandSession<'_>,
        params: &ParameterMap,
    ) -> Result<DispatchResult, HandlerError> {
        let confirm = confirm_function(params)?;
        let message = params.get_str(keys::DATA).unwrap_or_default();
        let response = session.callbacks().prompt(message, params)?;

        let mut reply = params.clone();
        reply.remove(keys::CONFIRM);
        reply.insert(keys::DATA, response);
        session.send(&Packet::for_spec(confirm, reply))?;
        Ok(DispatchResult::Continue)
    }

    fn respond(
        function: ClientFunction,
        session: &mut CommandSession<'_>,
        params: &ParameterMap,
    ) -> Result<DispatchResult, HandlerError> {
        let confirm = confirm_function(params)?;
        let reply = session.callbacks().respond(function, params)?;
        session.send(&Packet::for_spec(confirm, reply))?;
        Ok(DispatchResult::ContinueLoop)
    }

    fn local_action(
        function: ClientFunction,
        session: &mut CommandSession<'_>,
        params: &ParameterMap,
    ) -> Result<DispatchResult, HandlerError> {
        let mut replies = Vec::new();
        let result = session
            .callbacks()
            .local_action(function, params, &mut replies)?;
        for reply in &replies {
            session.send(reply)?;
        }
        Ok(result)
    }
}

/// Function the server asked the reply to be sent to.
fn confirm_function(params: &ParameterMap) -> Result<FunctionSpec, HandlerError> {
    let name = params
        .get_str(keys::CONFIRM)
        .ok_or_else(|| HandlerError::Protocol("missing confirm function".to_owned()))?;
    let spec = FunctionSpec::decode(name);
    if spec.is_none() {
        return Err(HandlerError::Protocol(format!(
            "unable to decode confirm function '{name}'"
        )));
    }
    Ok(spec)
}

fn progress_marker(function: ClientFunction, params: &ParameterMap) -> &str {
    params
        .get_str(keys::DEPOT_FILE)
        .or_else(|| params.get_str(keys::CLIENT_FILE))
        .unwrap_or_else(|| function.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_output_error_code_matches_the_wire_value() {
        assert_eq!(message_code(SEVERITY_FATAL), 1 | (14 << 10) | (4 << 28));
        assert_eq!(message_code(SEVERITY_FATAL), 0x4000_3801);
    }

    #[test]
    fn error_result_carries_code_and_message() {
        let result = error_result(SEVERITY_FAILED, "bad bytes");
        assert_eq!(result.get_str(keys::CODE0), Some("805320705"));
        assert_eq!(result.get_str(keys::FMT0), Some("bad bytes"));
    }

    #[test]
    fn confirm_must_name_a_known_function() {
        let mut params = ParameterMap::new();
        assert!(matches!(confirm_function(&params), Err(HandlerError::Protocol(_))));

        params.insert(keys::CONFIRM, "dm-Nonsense");
        assert!(matches!(confirm_function(&params), Err(HandlerError::Protocol(_))));

        params.insert(keys::CONFIRM, "dm-Login");
        assert_eq!(confirm_function(&params).map(FunctionSpec::name).ok(), Some("dm-Login"));
    }

    #[test]
    fn progress_marker_prefers_file_names() {
        let mut params = ParameterMap::new();
        assert_eq!(progress_marker(ClientFunction::WriteFile, &params), "client-WriteFile");
        params.insert(keys::CLIENT_FILE, "/ws/a.c");
        assert_eq!(progress_marker(ClientFunction::WriteFile, &params), "/ws/a.c");
        params.insert(keys::DEPOT_FILE, "//depot/a.c");
        assert_eq!(progress_marker(ClientFunction::WriteFile, &params), "//depot/a.c");
    }
}
