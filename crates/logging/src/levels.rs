//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Command results surfaced to the caller.
    Cmd,
    /// Miscellaneous operations.
    Misc,
    /// Progress reporting.
    Progress,
}

impl InfoFlag {
    /// Every info flag in declaration order.
    pub const ALL: [Self; 3] = [Self::Cmd, Self::Misc, Self::Progress];

    /// Returns the token used to select this flag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cmd => "cmd",
            Self::Misc => "misc",
            Self::Progress => "progress",
        }
    }
}

/// Debug flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Per-command session handling.
    Cmd,
    /// Connection establishment and teardown.
    Connect,
    /// Dispatch loop mode transitions.
    Dispatch,
    /// Character encoding conversion.
    Iconv,
    /// Packet framing and payload codec.
    Proto,
}

impl DebugFlag {
    /// Every debug flag in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Cmd,
        Self::Connect,
        Self::Dispatch,
        Self::Iconv,
        Self::Proto,
    ];

    /// Returns the token used to select this flag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cmd => "cmd",
            Self::Connect => "connect",
            Self::Dispatch => "dispatch",
            Self::Iconv => "iconv",
            Self::Proto => "proto",
        }
    }
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// Command results level.
    pub cmd: u8,
    /// Miscellaneous operations level.
    pub misc: u8,
    /// Progress reporting level.
    pub progress: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Cmd => self.cmd,
            InfoFlag::Misc => self.misc,
            InfoFlag::Progress => self.progress,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Cmd => self.cmd = level,
            InfoFlag::Misc => self.misc = level,
            InfoFlag::Progress => self.progress = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.cmd = level;
        self.misc = level;
        self.progress = level;
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Session handling level.
    pub cmd: u8,
    /// Connection handling level.
    pub connect: u8,
    /// Dispatch loop level.
    pub dispatch: u8,
    /// Character encoding level.
    pub iconv: u8,
    /// Packet codec level.
    pub proto: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Cmd => self.cmd,
            DebugFlag::Connect => self.connect,
            DebugFlag::Dispatch => self.dispatch,
            DebugFlag::Iconv => self.iconv,
            DebugFlag::Proto => self.proto,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Cmd => self.cmd = level,
            DebugFlag::Connect => self.connect = level,
            DebugFlag::Dispatch => self.dispatch = level,
            DebugFlag::Iconv => self.iconv = level,
            DebugFlag::Proto => self.proto = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.cmd = level;
        self.connect = level;
        self.dispatch = level;
        self.iconv = level;
        self.proto = level;
    }
}
