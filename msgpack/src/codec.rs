//! Value-level codec traits
//!
//! [Write] and [Read] describe how a single value maps onto the operations of a [Writer]
//! or a [Decoder]. [Encode] and [Decode] are provided on top of them and own the whole
//! buffer: encoding sizes the value first and then writes it into an exactly-sized buffer,
//! decoding requires the input to be consumed entirely.

use crate::{Config, Context, Decoder, Encoder, Error, SizeCounter, Writer};
use bytes::Bytes;
use tracing::trace;

/// Trait for types that can be written with any [Writer].
pub trait Write {
    /// Writes this value.
    ///
    /// Implementations must issue the same sequence of writes on every call, so that a
    /// [SizeCounter] pass predicts the length of an [Encoder] pass.
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error>;
}

/// Trait for types that can be read from a [Decoder].
pub trait Read: Sized {
    /// Reads a value, consuming exactly the bytes that encode it.
    fn read(decoder: &mut Decoder) -> Result<Self, Error>;
}

/// Trait for types that can be encoded into a standalone buffer.
pub trait Encode: Write {
    /// Returns the exact number of bytes [Encode::encode] produces.
    fn encoded_size(&self, description: &str) -> Result<usize, Error> {
        let mut sizer = SizeCounter::new(Context::new(description));
        self.write(&mut sizer)?;
        Ok(sizer.len())
    }

    /// Encodes this value into a new buffer.
    ///
    /// Panics if the [Write] implementation does not write the length it was sized at.
    fn encode(&self, description: &str) -> Result<Bytes, Error> {
        let len = self.encoded_size(description)?;
        let mut encoder = Encoder::with_capacity(Context::new(description), len);
        self.write(&mut encoder)?;
        assert_eq!(encoder.len(), len, "write() did not write expected bytes");
        trace!(description, len, "encoded value");
        Ok(encoder.into_bytes())
    }
}

// Automatically implement `Encode` for types that implement `Write`.
impl<T: Write + ?Sized> Encode for T {}

/// Trait for types that can be decoded from a standalone buffer.
pub trait Decode: Read {
    /// Decodes a value, ensuring the buffer is fully consumed.
    fn decode(description: &str, bytes: &[u8]) -> Result<Self, Error> {
        Self::decode_cfg(description, bytes, Config::default())
    }

    /// Like [Decode::decode] but with explicit length limits.
    fn decode_cfg(description: &str, bytes: &[u8], config: Config) -> Result<Self, Error> {
        let mut decoder = Decoder::with_config(Context::new(description), bytes, config);
        let value = Self::read(&mut decoder)?;
        decoder.finish()?;
        trace!(description, len = bytes.len(), "decoded value");
        Ok(value)
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_encode_matches_encoded_size() {
        let value = vec![1u32, 300, 70_000];
        let bytes = value.encode("vec").unwrap();
        assert_eq!(bytes.len(), value.encoded_size("vec").unwrap());
        assert_eq!(bytes.as_ref(), &[0x93, 0x01, 0xcd, 0x01, 0x2c, 0xce, 0x00, 0x01, 0x11, 0x70]);
    }

    #[test]
    fn test_decode_rejects_extra_data() {
        let err = u8::decode("u8", &[0x01, 0x02]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ExtraData(1));
        assert!(err.message().contains("Context: u8"));
    }

    #[test]
    fn test_decode_underrun() {
        let err = u32::decode("u32", &[0xce, 0x00]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::BufferUnderrun);
    }

    #[test]
    fn test_decode_cfg() {
        let cfg = Config::default().with_max_string(1);
        let bytes = "ab".encode("string").unwrap();
        let err = String::decode_cfg("string", &bytes, cfg).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidLength(2));
        assert_eq!(String::decode("string", &bytes).unwrap(), "ab");
    }
}
