//! Scripted connection and callbacks shared by the dispatcher tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use dispatch::{ClientCallbacks, Connection, HandlerError, ProgressCallback};
use protocol::{ClientFunction, FieldRule, FilterAction, Packet, PacketFilter, ParameterMap};

/// One scripted reply to `next_packet`.
pub enum Step {
    Packet(Packet),
    Error(io::ErrorKind),
}

/// Connection that replays a fixed script and records what was sent.
#[derive(Default)]
pub struct ScriptedConnection {
    script: VecDeque<Step>,
    pub reads: usize,
    pub sent: Vec<Packet>,
    pub fail_sends: bool,
    pub send_attempts: usize,
}

impl ScriptedConnection {
    pub fn new(packets: impl IntoIterator<Item = Packet>) -> Self {
        Self {
            script: packets.into_iter().map(Step::Packet).collect(),
            ..Self::default()
        }
    }

    pub fn with_steps(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: steps.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Connection for ScriptedConnection {
    fn next_packet(
        &mut self,
        _rule: &mut dyn FieldRule,
        filter: &mut dyn PacketFilter,
    ) -> io::Result<Option<Packet>> {
        self.reads += 1;
        match self.script.pop_front() {
            None => Ok(None),
            Some(Step::Error(kind)) => Err(io::Error::new(kind, "scripted failure")),
            Some(Step::Packet(packet)) => {
                filter.reset();
                let (function, params) = packet.into_parts();
                let mut kept = ParameterMap::new();
                for (name, value) in params {
                    match filter.filter(&name, &value) {
                        FilterAction::Keep => {
                            kept.insert(name, value);
                        }
                        FilterAction::Skip => {}
                        FilterAction::SkipRest => break,
                    }
                }
                Ok(Some(Packet::new(function, kept)))
            }
        }
    }

    fn send_packet(&mut self, packet: &Packet) -> io::Result<()> {
        self.send_attempts += 1;
        if self.fail_sends {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"));
        }
        self.sent.push(packet.clone());
        Ok(())
    }
}

pub fn packet(function: &str, fields: &[(&str, &str)]) -> Packet {
    Packet::new(
        function,
        fields.iter().map(|(name, value)| (*name, *value)).collect(),
    )
}

pub fn message(text: &str) -> Packet {
    packet("client-Message", &[("fmt0", text), ("code0", "285219702")])
}

/// Progress events in the order they were received.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgressEvent {
    Start(i32),
    Tick(i32, String),
    Stop(i32),
}

/// Progress callback that logs events and declines the `decline_at`-th tick.
#[derive(Clone, Default)]
pub struct RecordingProgress {
    pub events: Rc<RefCell<Vec<ProgressEvent>>>,
    pub decline_at: Option<usize>,
    ticks: usize,
}

impl RecordingProgress {
    pub fn declining_at(tick: usize) -> Self {
        Self {
            decline_at: Some(tick),
            ..Self::default()
        }
    }
}

impl ProgressCallback for RecordingProgress {
    fn start(&mut self, key: i32) {
        self.events.borrow_mut().push(ProgressEvent::Start(key));
    }

    fn tick(&mut self, key: i32, marker: &str) -> bool {
        self.ticks += 1;
        self.events
            .borrow_mut()
            .push(ProgressEvent::Tick(key, marker.to_owned()));
        self.decline_at != Some(self.ticks)
    }

    fn stop(&mut self, key: i32) {
        self.events.borrow_mut().push(ProgressEvent::Stop(key));
    }
}

/// Callbacks answering prompts and interactive exchanges with fixed values.
#[derive(Default)]
pub struct FixedCallbacks {
    pub prompts: Rc<RefCell<Vec<String>>>,
    pub answer: String,
    pub local_result: Option<dispatch::DispatchResult>,
}

impl ClientCallbacks for FixedCallbacks {
    fn prompt(&mut self, message: &str, _params: &ParameterMap) -> Result<Vec<u8>, HandlerError> {
        self.prompts.borrow_mut().push(message.to_owned());
        Ok(self.answer.clone().into_bytes())
    }

    fn respond(
        &mut self,
        function: ClientFunction,
        _params: &ParameterMap,
    ) -> Result<ParameterMap, HandlerError> {
        let mut reply = ParameterMap::new();
        reply.insert("data", self.answer.as_str());
        reply.insert("for", function.name());
        Ok(reply)
    }

    fn local_action(
        &mut self,
        function: ClientFunction,
        params: &ParameterMap,
        replies: &mut Vec<Packet>,
    ) -> Result<dispatch::DispatchResult, HandlerError> {
        let Some(result) = self.local_result else {
            return Err(HandlerError::Unimplemented(function.name().to_owned()));
        };
        if let Some(handle) = params.get_str("handle") {
            let mut ack = ParameterMap::new();
            ack.insert("handle", handle);
            replies.push(Packet::new("dm-OpenFile", ack));
        }
        Ok(result)
    }
}
