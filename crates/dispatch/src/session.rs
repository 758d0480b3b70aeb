//! Per-command state owned by the dispatch loop.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use charset::CharsetConverter;
use logging::{trace_cmd, trace_progress};
use protocol::{BinaryFieldRule, ClientFunction, FieldRule, KeepAll, Packet, PacketFilter, ParameterMap};

use crate::config::DispatchConfig;
use crate::connection::Connection;
use crate::error::HandlerError;
use crate::mode::DispatchResult;

/// Cloneable flag used to cancel a running command from another thread.
///
/// Cancellation is checked once per loop iteration and cannot interrupt a
/// blocked read.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Creates a handle that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Reports whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Receives progress notifications for a command.
pub trait ProgressCallback {
    /// Called once before the first packet is read.
    fn start(&mut self, key: i32);

    /// Called for every client function. Returning `false` cancels the command.
    fn tick(&mut self, key: i32, marker: &str) -> bool;

    /// Called when the command finishes normally or is cancelled.
    fn stop(&mut self, key: i32);
}

/// Answers the interactive and local-file functions a server may call.
///
/// Every method defaults to reporting the function as unimplemented.
pub trait ClientCallbacks {
    /// Answers `client-Prompt`; the returned bytes are sent back as `data`.
    fn prompt(&mut self, message: &str, params: &ParameterMap) -> Result<Vec<u8>, HandlerError> {
        let _ = (message, params);
        Err(HandlerError::Unimplemented(ClientFunction::Prompt.name().to_owned()))
    }

    /// Builds the reply parameters for an interactive exchange such as
    /// `client-SetPassword` or `client-Ack`.
    fn respond(
        &mut self,
        function: ClientFunction,
        params: &ParameterMap,
    ) -> Result<ParameterMap, HandlerError> {
        let _ = params;
        Err(HandlerError::Unimplemented(function.name().to_owned()))
    }

    /// Performs a local file action such as `client-WriteFile`.
    ///
    /// Packets pushed to `replies` are sent to the server in order. The
    /// returned verdict drives the dispatch loop like any handler result.
    fn local_action(
        &mut self,
        function: ClientFunction,
        params: &ParameterMap,
        replies: &mut Vec<Packet>,
    ) -> Result<DispatchResult, HandlerError> {
        let _ = (params, replies);
        Err(HandlerError::Unimplemented(function.name().to_owned()))
    }
}

/// Callbacks that support nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCallbacks;

impl ClientCallbacks for NoCallbacks {}

/// State of one top-level command.
///
/// The session borrows the connection for its lifetime and accumulates the
/// result maps produced while packets are dispatched.
pub struct CommandSession<'a> {
    connection: &'a mut dyn Connection,
    config: DispatchConfig,
    results: Vec<ParameterMap>,
    cancel: CancelHandle,
    progress: Option<Box<dyn ProgressCallback + 'a>>,
    callbacks: Box<dyn ClientCallbacks + 'a>,
    text_converter: Option<CharsetConverter>,
    server_protocol: ParameterMap,
    field_rule: Box<dyn FieldRule + 'a>,
    filter: Box<dyn PacketFilter + 'a>,
}

impl<'a> CommandSession<'a> {
    /// Creates a session reading from `connection`.
    pub fn new(connection: &'a mut dyn Connection, config: DispatchConfig) -> Self {
        let text_converter = config.text_converter();
        Self {
            connection,
            config,
            results: Vec::new(),
            cancel: CancelHandle::new(),
            progress: None,
            callbacks: Box::new(NoCallbacks),
            text_converter,
            server_protocol: ParameterMap::new(),
            field_rule: Box::new(BinaryFieldRule),
            filter: Box::new(KeepAll),
        }
    }

    /// Attaches a progress callback.
    #[must_use]
    pub fn with_progress(mut self, progress: impl ProgressCallback + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Installs the callbacks used for interactive and local-file functions.
    #[must_use]
    pub fn with_callbacks(mut self, callbacks: impl ClientCallbacks + 'a) -> Self {
        self.callbacks = Box::new(callbacks);
        self
    }

    /// Replaces the rule selecting fields that bypass charset conversion.
    #[must_use]
    pub fn with_field_rule(mut self, rule: impl FieldRule + 'a) -> Self {
        self.field_rule = Box::new(rule);
        self
    }

    /// Installs a filter applied to every incoming packet.
    #[must_use]
    pub fn with_filter(mut self, filter: impl PacketFilter + 'a) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Shares an existing cancellation flag with this session.
    #[must_use]
    pub fn with_cancel_handle(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    /// Settings of this command.
    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Handle that cancels this command.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Reports whether the command was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Result maps accumulated so far.
    #[must_use]
    pub fn results(&self) -> &[ParameterMap] {
        &self.results
    }

    /// Appends a result map.
    pub fn push_result(&mut self, result: ParameterMap) {
        trace_cmd!("result {} with {} fields", self.results.len() + 1, result.len());
        self.results.push(result);
    }

    /// Removes and returns the accumulated result maps.
    pub fn take_results(&mut self) -> Vec<ParameterMap> {
        std::mem::take(&mut self.results)
    }

    /// Protocol parameters announced by the server.
    #[must_use]
    pub const fn server_protocol(&self) -> &ParameterMap {
        &self.server_protocol
    }

    pub(crate) fn merge_server_protocol(&mut self, params: &ParameterMap) {
        trace_cmd!("merged {} server protocol parameters", params.len());
        self.server_protocol.extend_from(params);
    }

    /// Converter applied to `client-OutputText` data, if configured.
    pub fn text_converter_mut(&mut self) -> Option<&mut CharsetConverter> {
        self.text_converter.as_mut()
    }

    pub(crate) fn callbacks(&mut self) -> &mut dyn ClientCallbacks {
        self.callbacks.as_mut()
    }

    pub(crate) fn read_packet(&mut self) -> io::Result<Option<Packet>> {
        self.connection
            .next_packet(self.field_rule.as_mut(), self.filter.as_mut())
    }

    /// Sends a packet to the server.
    pub fn send(&mut self, packet: &Packet) -> io::Result<()> {
        self.connection.send_packet(packet)
    }

    pub(crate) fn progress_start(&mut self) {
        let key = self.config.progress_key();
        if let Some(progress) = self.progress.as_mut() {
            trace_progress!("start {}", key);
            progress.start(key);
        }
    }

    /// Ticks the progress callback; cancels the command if it declines.
    pub(crate) fn progress_tick(&mut self, marker: &str) {
        let key = self.config.progress_key();
        let Some(progress) = self.progress.as_mut() else {
            return;
        };
        if !progress.tick(key, marker) {
            trace_progress!("tick {} declined; cancelling", marker);
            self.cancel.cancel();
        }
    }

    pub(crate) fn progress_stop(&mut self) {
        let key = self.config.progress_key();
        if let Some(progress) = self.progress.as_mut() {
            trace_progress!("stop {}", key);
            progress.stop(key);
        }
    }
}
