//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the verbosity flag system.
//!
//! This module provides a custom tracing subscriber layer that maps tracing
//! events to info and debug flags. Library code uses the standard tracing
//! macros (or the `trace_*` wrappers in this crate) with a `p4rpc::*` target,
//! and the layer records the event only when the flag for that target is
//! enabled at the event's level.
//!
//! # Architecture
//!
//! - [`P4RpcLayer`]: A tracing-subscriber layer that filters and records events
//! - Targets are mapped to flags by their final path segment
//! - The thread-local [`VerbosityConfig`] decides whether an event is kept
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(3));
//!
//! tracing::debug!(target: "p4rpc::dispatch", "entering LOOP mode");
//! tracing::info!(target: "p4rpc::progress", "42 files");
//! ```

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use super::thread_local::{debug_gte, emit_debug, emit_info, info_gte};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// A tracing layer that bridges tracing events to the verbosity flags.
pub struct P4RpcLayer {
    _config: VerbosityConfig,
}

impl P4RpcLayer {
    /// Create a new layer with the given verbosity configuration.
    #[must_use]
    pub const fn new(config: VerbosityConfig) -> Self {
        Self { _config: config }
    }

    fn segment(target: &str) -> &str {
        target.rsplit("::").next().unwrap_or(target)
    }

    /// Map a tracing target to an info flag.
    fn target_to_info_flag(target: &str) -> Option<InfoFlag> {
        match Self::segment(target) {
            "result" | "results" => Some(InfoFlag::Cmd),
            "misc" => Some(InfoFlag::Misc),
            "progress" => Some(InfoFlag::Progress),
            _ => None,
        }
    }

    /// Map a tracing target to a debug flag.
    fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
        match Self::segment(target) {
            "cmd" | "session" => Some(DebugFlag::Cmd),
            "connect" | "connection" => Some(DebugFlag::Connect),
            "dispatch" | "dispatcher" => Some(DebugFlag::Dispatch),
            "iconv" | "charset" => Some(DebugFlag::Iconv),
            "proto" | "protocol" => Some(DebugFlag::Proto),
            _ => None,
        }
    }

    /// Map a tracing level to a verbosity level.
    const fn level_to_verbosity_level(level: &Level) -> u8 {
        match *level {
            Level::ERROR | Level::WARN | Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
        }
    }
}

impl<S> Layer<S> for P4RpcLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        let verbosity_level = Self::level_to_verbosity_level(metadata.level());

        if let Some(debug_flag) = Self::target_to_debug_flag(target) {
            if debug_gte(debug_flag, verbosity_level) {
                let mut visitor = MessageVisitor::default();
                event.record(&mut visitor);
                if let Some(message) = visitor.message {
                    emit_debug(debug_flag, verbosity_level, message);
                }
            }
            return;
        }

        if let Some(info_flag) = Self::target_to_info_flag(target) {
            if info_gte(info_flag, verbosity_level) {
                let mut visitor = MessageVisitor::default();
                event.record(&mut visitor);
                if let Some(message) = visitor.message {
                    emit_info(info_flag, verbosity_level, message);
                }
            }
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Initialize tracing with a verbosity configuration.
///
/// Installs a global subscriber that routes `p4rpc::*` events through
/// [`P4RpcLayer`]. Calling this twice panics inside `tracing-subscriber`, so
/// binaries should call it once at startup.
pub fn init_tracing(config: VerbosityConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config.clone());

    let layer = P4RpcLayer::new(config);

    tracing_subscriber::registry().with(layer).init();
}

/// Initialize tracing with a custom filter in addition to the verbosity flags.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{VerbosityConfig, init_tracing_with_filter};
/// use tracing_subscriber::EnvFilter;
///
/// let config = VerbosityConfig::from_verbose_level(2);
/// init_tracing_with_filter(config, EnvFilter::from_default_env());
/// ```
pub fn init_tracing_with_filter<F>(config: VerbosityConfig, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config.clone());

    let layer = P4RpcLayer::new(config);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread_local::{drain_events, init};
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_target_to_info_flag() {
        assert_eq!(
            P4RpcLayer::target_to_info_flag("p4rpc::progress"),
            Some(InfoFlag::Progress)
        );
        assert_eq!(
            P4RpcLayer::target_to_info_flag("p4rpc::result"),
            Some(InfoFlag::Cmd)
        );
        assert_eq!(P4RpcLayer::target_to_info_flag("unknown"), None);
    }

    #[test]
    fn test_target_to_debug_flag() {
        assert_eq!(
            P4RpcLayer::target_to_debug_flag("p4rpc::proto"),
            Some(DebugFlag::Proto)
        );
        assert_eq!(
            P4RpcLayer::target_to_debug_flag("p4rpc::dispatch"),
            Some(DebugFlag::Dispatch)
        );
        assert_eq!(
            P4RpcLayer::target_to_debug_flag("p4rpc::iconv"),
            Some(DebugFlag::Iconv)
        );
        assert_eq!(P4RpcLayer::target_to_debug_flag("p4rpc::unknown"), None);
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(P4RpcLayer::level_to_verbosity_level(&Level::WARN), 1);
        assert_eq!(P4RpcLayer::level_to_verbosity_level(&Level::DEBUG), 2);
        assert_eq!(P4RpcLayer::level_to_verbosity_level(&Level::TRACE), 3);
    }

    #[test]
    fn layer_records_only_enabled_events() {
        let mut config = VerbosityConfig::default();
        config.debug.proto = 2;
        init(config.clone());
        drain_events();

        let subscriber = tracing_subscriber::registry().with(P4RpcLayer::new(config));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "p4rpc::proto", "frame of {} bytes", 12);
            tracing::trace!(target: "p4rpc::proto", "too verbose");
            tracing::debug!(target: "p4rpc::iconv", "flag disabled");
        });

        let events = drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message(), "frame of 12 bytes");
    }
}
