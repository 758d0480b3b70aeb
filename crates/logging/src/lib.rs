#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the verbosity flag system shared by the RPC engine crates.
//! Every subsystem logs through the `tracing` macros with a `p4rpc::*`
//! target; the [`P4RpcLayer`] bridge (behind the `tracing` feature) maps each
//! target onto an [`InfoFlag`] or [`DebugFlag`] and records the event only
//! when the thread's [`VerbosityConfig`] enables that flag at the event level.
//!
//! # Design
//!
//! - [`VerbosityConfig`] combines [`InfoLevels`] and [`DebugLevels`] and can be
//!   built from a single `-v` style level or refined with flag tokens such as
//!   `proto2` or `iconv`.
//! - Configuration and recorded [`DiagnosticEvent`]s live in thread-local
//!   storage so tests can inspect what a code path logged with
//!   [`drain_events`].
//! - The `trace_*` macros fix the target string for each subsystem.
//!
//! # Examples
//!
//! ```
//! use logging::{DebugFlag, VerbosityConfig, debug_gte, init};
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_debug_flag("dispatch2").unwrap();
//! init(config);
//!
//! assert!(debug_gte(DebugFlag::Dispatch, 2));
//! assert!(!debug_gte(DebugFlag::Proto, 1));
//! ```

mod config;
mod levels;
mod thread_local;
#[cfg(feature = "tracing")]
mod tracing_bridge;
#[cfg(feature = "tracing")]
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use thread_local::{
    DiagnosticEvent, apply_debug_flag, apply_info_flag, debug_gte, drain_events, emit_debug,
    emit_info, info_gte, init,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{P4RpcLayer, init_tracing, init_tracing_with_filter};
