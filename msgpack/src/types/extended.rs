//! Codec implementations for values carried as text.
//!
//! [BigInt] and [serde_json::Value] have no native MessagePack representation, so both
//! travel inside a `str`. An empty string means "absent": it decodes as `None` through
//! `Option<_>`, as an error for a required [BigInt] and as `null` for a required JSON
//! value.

use crate::{Decoder, Error, ErrorKind, Read, Write, Writer};
use num_bigint::BigInt;
use serde_json::Value;

impl Write for BigInt {
    #[inline]
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_big_int(Some(self));
        Ok(())
    }
}

impl Read for BigInt {
    fn read(decoder: &mut Decoder) -> Result<Self, Error> {
        match decoder.read_big_int()? {
            Some(value) => Ok(value),
            None => Err(decoder.error(ErrorKind::UnparsableBigInt(String::new()))),
        }
    }
}

impl Write for Value {
    #[inline]
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_json(Some(self));
        Ok(())
    }
}

impl Read for Value {
    fn read(decoder: &mut Decoder) -> Result<Self, Error> {
        Ok(decoder.read_json()?.unwrap_or(Value::Null))
    }
}
