//! Codec implementation for [Bytes].
//!
//! Byte sequences use the `bin` family. An empty sequence is written as `nil` and any
//! `nil` reads back as an empty sequence.

use crate::{Decoder, Error, Read, Write, Writer};
use bytes::Bytes;

impl Write for Bytes {
    #[inline]
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_bytes(self);
        Ok(())
    }
}

impl Read for Bytes {
    #[inline]
    fn read(decoder: &mut Decoder) -> Result<Self, Error> {
        decoder.read_bytes()
    }
}
