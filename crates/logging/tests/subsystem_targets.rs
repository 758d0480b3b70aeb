//! Integration tests for the subsystem macros and the tracing bridge.
//!
//! Each `trace_*` macro logs on a fixed `p4rpc::*` target; these tests check
//! that the bridge keeps or drops those events according to the thread's
//! verbosity configuration.

use logging::{
    DebugFlag, DiagnosticEvent, InfoFlag, P4RpcLayer, VerbosityConfig, drain_events, init,
    trace_cmd, trace_connect, trace_dispatch, trace_iconv, trace_progress, trace_proto,
};
use tracing_subscriber::layer::SubscriberExt;

fn capture(config: VerbosityConfig, body: impl FnOnce()) -> Vec<DiagnosticEvent> {
    init(config.clone());
    drain_events();
    let subscriber = tracing_subscriber::registry().with(P4RpcLayer::new(config));
    tracing::subscriber::with_default(subscriber, body);
    drain_events()
}

fn emit_all() {
    trace_proto!("proto");
    trace_dispatch!("dispatch");
    trace_iconv!("iconv");
    trace_connect!("connect");
    trace_cmd!("cmd");
    trace_progress!("progress");
}

// ============================================================================
// Silence
// ============================================================================

/// Verbose level 0 records nothing.
#[test]
fn level_zero_records_nothing() {
    let events = capture(VerbosityConfig::from_verbose_level(0), emit_all);
    assert!(events.is_empty());
}

// ============================================================================
// Per-macro targets
// ============================================================================

/// Every macro lands on its own debug or info flag.
#[test]
fn macros_map_to_their_flags() {
    let events = capture(VerbosityConfig::from_verbose_level(4), emit_all);
    let flags: Vec<String> = events
        .iter()
        .map(|event| match event {
            DiagnosticEvent::Debug { flag, .. } => format!("debug:{}", flag.name()),
            DiagnosticEvent::Info { flag, .. } => format!("info:{}", flag.name()),
        })
        .collect();

    assert_eq!(
        flags,
        [
            "debug:proto",
            "debug:dispatch",
            "debug:iconv",
            "debug:connect",
            "debug:cmd",
            "info:progress",
        ]
    );
}

/// `trace_iconv!` logs at trace level, so it needs level 3.
#[test]
fn iconv_traces_need_level_three() {
    let mut config = VerbosityConfig::default();
    config.apply_debug_flag("iconv2").expect("valid token");
    assert!(capture(config.clone(), emit_all).is_empty());

    config.apply_debug_flag("iconv3").expect("valid token");
    let events = capture(config, emit_all);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message(), "iconv");
}

/// Warnings on a debug target are kept from level 1.
#[test]
fn warnings_need_only_level_one() {
    let mut config = VerbosityConfig::default();
    config.debug.connect = 1;

    let events = capture(config, || {
        tracing::warn!(target: "p4rpc::connect", "release failed: {}", "broken pipe");
        trace_connect!("not at level 1");
    });

    assert_eq!(events.len(), 1);
    match &events[0] {
        DiagnosticEvent::Debug {
            flag,
            level,
            message,
        } => {
            assert_eq!(*flag, DebugFlag::Connect);
            assert_eq!(*level, 1);
            assert_eq!(message, "release failed: broken pipe");
        }
        DiagnosticEvent::Info { .. } => panic!("expected debug event"),
    }
}

/// Progress is an info flag and honours `-v` level 2.
#[test]
fn progress_follows_verbose_level_two() {
    let events = capture(VerbosityConfig::from_verbose_level(2), || {
        trace_progress!("tick {}", "//depot/a.c");
        trace_dispatch!("dropped");
    });

    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        DiagnosticEvent::Info { flag: InfoFlag::Progress, message, .. } if message == "tick //depot/a.c"
    ));
}

// ============================================================================
// Foreign targets
// ============================================================================

/// Events outside the `p4rpc` families are ignored.
#[test]
fn unrelated_targets_are_ignored() {
    let events = capture(VerbosityConfig::from_verbose_level(4), || {
        tracing::debug!(target: "hyper::client", "unrelated");
        tracing::info!("no target");
    });
    assert!(events.is_empty());
}

// ============================================================================
// Flag tokens
// ============================================================================

/// `all` tokens raise every flag at once.
#[test]
fn all_token_sets_every_flag() {
    let mut config = VerbosityConfig::default();
    config.apply_debug_flag("all2").expect("valid token");
    config.apply_info_flag("all").expect("valid token");

    assert!(DebugFlag::ALL.into_iter().all(|flag| config.debug.get(flag) == 2));
    assert!(InfoFlag::ALL.into_iter().all(|flag| config.info.get(flag) == 1));
}
