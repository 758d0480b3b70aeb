#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Charset handling for the Perforce client RPC engine.
//!
//! Servers running in Unicode mode declare a charset by its Perforce name.
//! [`CharsetRegistry`] maps those names to platform encodings, [`Charset`]
//! wraps a resolved encoding, and [`CharsetConverter`] transcodes file
//! content and protocol strings chunk by chunk.
//!
//! # Examples
//!
//! ```
//! use charset::{CharsetConverter, CharsetRegistry};
//!
//! let registry = CharsetRegistry::new();
//! let mut converter = CharsetConverter::from_perforce_names(&registry, "shiftjis", "utf8")?;
//!
//! // "日本" split in the middle of the second character.
//! let mut text = converter.convert(&[0x93, 0xFA, 0x96])?;
//! text.extend(converter.convert(&[0x7B])?);
//! converter.finish()?;
//!
//! assert_eq!(String::from_utf8(text).unwrap(), "日本");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod charset;
mod codepage;
mod codec;
mod converter;
mod error;
mod registry;

pub use charset::{ByteOrder, Charset};
pub use converter::{CharsetConverter, Lookahead};
pub use error::{EncodingError, TranslationError, TranslationErrorKind};
pub use registry::{CharsetEntry, CharsetRegistry, CharsetSelection};
