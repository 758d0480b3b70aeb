use ::core::fmt;

/// Broad classification of an RPC function name.
///
/// Only [`FunctionCategory::Client`] and [`FunctionCategory::Protocol`]
/// functions are meaningful when received by a client. The remaining
/// categories exist so that the dispatcher can reject them with a precise
/// error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FunctionCategory {
    /// Server-to-client callbacks such as `client-Message`.
    Client,
    /// User commands sent from client to server, such as `user-files`.
    User,
    /// Server-internal functions such as `dm-SubmitChange`.
    Server,
    /// Connection housekeeping such as `flush1` or `release`.
    Protocol,
    /// The name is not part of the function table.
    None,
}

impl FunctionCategory {
    /// All categories in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Client,
        Self::User,
        Self::Server,
        Self::Protocol,
        Self::None,
    ];

    /// Returns the upper-case label used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::User => "USER",
            Self::Server => "SERVER",
            Self::Protocol => "PROTOCOL",
            Self::None => "NONE",
        }
    }
}

impl fmt::Display for FunctionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
