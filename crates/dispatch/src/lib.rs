#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Dispatch state machine of the Perforce client RPC engine.
//!
//! After a command is sent, the server drives the exchange: it calls client
//! functions (`client-Message`, `client-Prompt`, `client-WriteFile`, ...)
//! and protocol functions (`flush1`, `release`, ...) until the command is
//! done. [`PacketDispatcher::dispatch`] reads those packets from a
//! [`Connection`], routes each one to the [`SubHandler`] for its category,
//! tracks the [`DispatchMode`] the handlers request, and returns the result
//! maps the command produced.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//!
//! use charset::CharsetRegistry;
//! use dispatch::{CommandSession, DispatchConfig, PacketDispatcher, StreamConnection};
//! use protocol::{Packet, ParameterMap, write_packet};
//!
//! let mut info = ParameterMap::new();
//! info.insert("fmt0", "Change 42 created.");
//! let mut wire = Vec::new();
//! write_packet(&mut wire, &Packet::new("client-Message", info))?;
//! write_packet(&mut wire, &Packet::new("release", ParameterMap::new()))?;
//!
//! let registry = CharsetRegistry::new();
//! let config = DispatchConfig::builder().build(&registry)?;
//! let mut connection = StreamConnection::with_config(Cursor::new(wire), Vec::new(), &config);
//!
//! let dispatcher = PacketDispatcher::new();
//! let mut session = CommandSession::new(&mut connection, config);
//! let results = dispatcher.dispatch(&mut session)?;
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].get_str("fmt0"), Some("Change 42 created."));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod connection;
mod dispatcher;
mod error;
mod handler;
mod mode;
mod session;

pub use config::{DispatchConfig, DispatchConfigBuilder};
pub use connection::{Connection, ConnectionStats, StreamConnection};
pub use dispatcher::PacketDispatcher;
pub use error::{DispatchError, HandlerError};
pub use handler::{ClientHandler, ProtocolHandler, SubHandler};
pub use mode::{DispatchMode, DispatchResult};
pub use session::{CancelHandle, ClientCallbacks, CommandSession, NoCallbacks, ProgressCallback};
