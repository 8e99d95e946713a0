//! Serialize structured data with MessagePack.
//!
//! # Overview
//!
//! A MessagePack serialization library designed to:
//! - Encode typed values into the exact byte layout other implementations of the same
//!   profile produce (smallest integer forms, sorted map keys)
//! - Decode untrusted input into typed values, reporting the path to the failing field
//! - Size a value before encoding it so the output buffer is allocated once
//!
//! # Supported Types
//!
//! Natively supports:
//! - Primitives: `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64`, `f32`, `f64`, `bool`
//! - Text and binary: `String`, `str`, `Bytes`
//! - Collections: `Vec<T>`, `Option<T>`, `IndexMap<K, V>`
//! - Text-carried values: `BigInt` (decimal) and `serde_json::Value` (compact JSON)
//!
//! Records are written as maps from field name to value by implementing [Write] and
//! [Read]. Field reads and writes are bracketed by [Context] frames so that a failure
//! deep inside a nested record names every enclosing field.
//!
//! # Example
//!
//! ```
//! use wrap_msgpack::{Decode, Decoder, Encode, Error, Read, Write, Writer};
//!
//! #[derive(Debug, PartialEq)]
//! struct Item {
//!     name: String,
//!     count: Option<u32>,
//! }
//!
//! impl Write for Item {
//!     fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error> {
//!         writer.write_map_length(2);
//!
//!         writer.context_mut().push("name", "String", "writing property");
//!         writer.write_string("name");
//!         writer.write_string(&self.name);
//!         writer.context_mut().pop()?;
//!
//!         writer.context_mut().push("count", "UInt32 | null", "writing property");
//!         writer.write_string("count");
//!         writer.write_optional_u32(self.count);
//!         writer.context_mut().pop()?;
//!         Ok(())
//!     }
//! }
//!
//! impl Read for Item {
//!     fn read(decoder: &mut Decoder) -> Result<Self, Error> {
//!         let mut name = None;
//!         let mut count = None;
//!         for _ in 0..decoder.read_map_length()? {
//!             let field = decoder.read_string()?;
//!             match field.as_str() {
//!                 "name" => {
//!                     let note = "type found, reading property";
//!                     decoder.context_mut().push("name", "String", note);
//!                     name = Some(decoder.read_string()?);
//!                     decoder.context_mut().pop()?;
//!                 }
//!                 "count" => {
//!                     let note = "type found, reading property";
//!                     decoder.context_mut().push("count", "UInt32 | null", note);
//!                     count = decoder.read_optional_u32()?;
//!                     decoder.context_mut().pop()?;
//!                 }
//!                 _ => decoder.skip_value()?,
//!             }
//!         }
//!         let name = decoder.require(name, "name", "String")?;
//!         Ok(Self { name, count })
//!     }
//! }
//!
//! let item = Item { name: "bolt".into(), count: Some(500) };
//! let encoded = item.encode("Serializing (encoding) object-type: Item").unwrap();
//! assert_eq!(encoded.len(), item.encoded_size("sizing").unwrap());
//!
//! let decoded = Item::decode("Deserializing object-type: Item", &encoded).unwrap();
//! assert_eq!(item, decoded);
//! ```

pub mod codec;
pub mod config;
pub mod container;
pub mod context;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod invoke;
pub mod sizer;
pub mod types;
pub mod view;
pub mod writer;

// Re-export main types and traits
pub use codec::{Decode, Encode, Read, Write};
pub use config::{Config, RangeCfg};
pub use container::{as_result, OptionExt, ResultExt};
pub use context::{Context, Frame};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Error, ErrorKind};
pub use format::Format;
pub use sizer::SizeCounter;
pub use writer::Writer;
