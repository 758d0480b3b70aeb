use ::core::fmt;

/// Phase of a client/server exchange.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum DispatchMode {
    /// The command was just issued and the client awaits server directives.
    #[default]
    Primal,
    /// Interactive multi-round exchange such as a password prompt.
    Loop,
    /// The server streams output and the client only consumes it.
    Callback,
    /// The client acknowledges every server message.
    Duplex,
    /// Reserved by the protocol; never entered by this client.
    DuplexRev,
}

impl DispatchMode {
    /// Upper-case label used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primal => "PRIMAL",
            Self::Loop => "LOOP",
            Self::Callback => "CALLBACK",
            Self::Duplex => "DUPLEX",
            Self::DuplexRev => "DUPLEXREV",
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict returned by a sub-handler for one packet.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum DispatchResult {
    /// No opinion; the loop continues unchanged.
    #[default]
    None,
    /// Keep reading in the current mode.
    Continue,
    /// Keep reading in [`DispatchMode::Loop`].
    ContinueLoop,
    /// Keep reading in [`DispatchMode::Duplex`].
    ContinueDuplex,
    /// The command finished; return the accumulated results.
    StopNormal,
    /// The command was aborted.
    StopError,
}

impl DispatchResult {
    /// Mode the loop continues in, or `None` when the result stops the loop.
    #[must_use]
    pub const fn next_mode(self, current: DispatchMode) -> Option<DispatchMode> {
        match self {
            Self::None | Self::Continue => Some(current),
            Self::ContinueLoop => Some(DispatchMode::Loop),
            Self::ContinueDuplex => Some(DispatchMode::Duplex),
            Self::StopNormal | Self::StopError => None,
        }
    }
}
