//! Codec implementations for Rust primitive types.
//!
//! Integers are written in the smallest form that holds the value, so the encoded
//! length depends on the value and not on the declared width. Reads check that the
//! decoded value fits the target type.

use crate::{Decoder, Error, Read, Write, Writer};
use paste::paste;

// Numeric types implementation
macro_rules! impl_numeric {
    ($type:ident) => {
        paste! {
            impl Write for $type {
                #[inline]
                fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error> {
                    writer.[<write_ $type>](*self);
                    Ok(())
                }
            }

            impl Read for $type {
                #[inline]
                fn read(decoder: &mut Decoder) -> Result<Self, Error> {
                    decoder.[<read_ $type>]()
                }
            }
        }
    };
}

impl_numeric!(u8);
impl_numeric!(u16);
impl_numeric!(u32);
impl_numeric!(u64);
impl_numeric!(i8);
impl_numeric!(i16);
impl_numeric!(i32);
impl_numeric!(i64);
impl_numeric!(f32);
impl_numeric!(f64);
impl_numeric!(bool);

impl Write for str {
    #[inline]
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_string(self);
        Ok(())
    }
}

impl Write for String {
    #[inline]
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error> {
        self.as_str().write(writer)
    }
}

impl Read for String {
    #[inline]
    fn read(decoder: &mut Decoder) -> Result<Self, Error> {
        decoder.read_string()
    }
}

// Option implementation
impl<T: Write> Write for Option<T> {
    #[inline]
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error> {
        match self {
            Some(inner) => inner.write(writer),
            None => {
                writer.write_nil();
                Ok(())
            }
        }
    }
}

impl<T: Read> Read for Option<T> {
    #[inline]
    fn read(decoder: &mut Decoder) -> Result<Self, Error> {
        if decoder.skip_nil()? {
            return Ok(None);
        }
        T::read(decoder).map(Some)
    }
}
