//! crates/logging/src/tracing_macros.rs
//! Convenience macros for engine-specific tracing.
//!
//! These macros wrap the standard tracing macros with the `p4rpc::*` targets
//! understood by [`P4RpcLayer`](crate::P4RpcLayer).

/// Emit a packet framing or payload codec trace.
///
/// # Example
/// ```ignore
/// trace_proto!("read frame of {} bytes", len);
/// ```
#[macro_export]
macro_rules! trace_proto {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "p4rpc::proto", $($arg)*);
    };
}

/// Emit a dispatch loop trace.
///
/// # Example
/// ```ignore
/// trace_dispatch!("{} -> {} mode", function, mode);
/// ```
#[macro_export]
macro_rules! trace_dispatch {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "p4rpc::dispatch", $($arg)*);
    };
}

/// Emit a charset conversion trace.
///
/// # Example
/// ```ignore
/// trace_iconv!("retained {} underflow bytes", tail.len());
/// ```
#[macro_export]
macro_rules! trace_iconv {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "p4rpc::iconv", $($arg)*);
    };
}

/// Emit a connection lifecycle trace.
///
/// # Example
/// ```ignore
/// trace_connect!("sent release to server");
/// ```
#[macro_export]
macro_rules! trace_connect {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "p4rpc::connect", $($arg)*);
    };
}

/// Emit a per-command session trace.
///
/// # Example
/// ```ignore
/// trace_cmd!("merged {} server protocol parameters", count);
/// ```
#[macro_export]
macro_rules! trace_cmd {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "p4rpc::cmd", $($arg)*);
    };
}

/// Emit a progress trace.
///
/// # Example
/// ```ignore
/// trace_progress!("tick {}", marker);
/// ```
#[macro_export]
macro_rules! trace_progress {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "p4rpc::progress", $($arg)*);
    };
}
