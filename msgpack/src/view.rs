//! Sequential big-endian access to a byte buffer.
//!
//! A [View] appends to the end of its buffer and reads from a cursor that starts at the
//! front. Reads never go past the end of the buffer: an over-read fails with
//! [ErrorKind::BufferUnderrun] and leaves the cursor where it was.

use crate::ErrorKind;
use bytes::{BufMut, Bytes, BytesMut};

#[derive(Clone, Debug, Default)]
pub struct View {
    buf: BytesMut,
    cursor: usize,
}

macro_rules! impl_fixed {
    ($type:ty, $read_method:ident, $write_method:ident, $put_method:ident) => {
        #[inline]
        pub fn $write_method(&mut self, value: $type) {
            self.buf.$put_method(value);
        }

        #[inline]
        pub fn $read_method(&mut self) -> Result<$type, ErrorKind> {
            let raw = self.take(std::mem::size_of::<$type>())?;
            let mut dst = [0u8; std::mem::size_of::<$type>()];
            dst.copy_from_slice(raw);
            Ok(<$type>::from_be_bytes(dst))
        }
    };
}

impl View {
    /// An empty view, ready for writing.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty view with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// A view positioned at the start of `data`, ready for reading.
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            buf: BytesMut::from(data),
            cursor: 0,
        }
    }

    /// Total number of bytes held.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.cursor
    }

    /// Everything written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the view, returning everything written so far.
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    impl_fixed!(u8, read_u8, write_u8, put_u8);
    impl_fixed!(u16, read_u16, write_u16, put_u16);
    impl_fixed!(u32, read_u32, write_u32, put_u32);
    impl_fixed!(u64, read_u64, write_u64, put_u64);
    impl_fixed!(i8, read_i8, write_i8, put_i8);
    impl_fixed!(i16, read_i16, write_i16, put_i16);
    impl_fixed!(i32, read_i32, write_i32, put_i32);
    impl_fixed!(i64, read_i64, write_i64, put_i64);
    impl_fixed!(f32, read_f32, write_f32, put_f32);
    impl_fixed!(f64, read_f64, write_f64, put_f64);

    #[inline]
    pub fn write_bytes(&mut self, value: &[u8]) {
        self.buf.put_slice(value);
    }

    #[inline]
    pub fn write_str(&mut self, value: &str) {
        self.buf.put_slice(value.as_bytes());
    }

    /// Returns the next byte without advancing the cursor.
    #[inline]
    pub fn peek_u8(&self) -> Result<u8, ErrorKind> {
        self.buf
            .get(self.cursor)
            .copied()
            .ok_or(ErrorKind::BufferUnderrun)
    }

    /// Advances the cursor by `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<(), ErrorKind> {
        self.take(len).map(|_| ())
    }

    /// Fails unless at least `len` bytes remain.
    #[inline]
    pub fn at_least(&self, len: usize) -> Result<(), ErrorKind> {
        if self.remaining() < len {
            return Err(ErrorKind::BufferUnderrun);
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes, ErrorKind> {
        self.take(len).map(Bytes::copy_from_slice)
    }

    pub fn read_str(&mut self, len: usize) -> Result<String, ErrorKind> {
        let raw = self.take(len)?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| ErrorKind::InvalidUtf8)
    }

    fn take(&mut self, len: usize) -> Result<&[u8], ErrorKind> {
        self.at_least(len)?;
        let start = self.cursor;
        self.cursor += len;
        Ok(&self.buf[start..self.cursor])
    }
}
