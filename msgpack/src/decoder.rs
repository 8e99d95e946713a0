//! Decoding of MessagePack values from a byte buffer.
//!
//! A [Decoder] exposes one `read_*` operation per value kind. Each operation consumes the
//! leading format byte, checks that it is acceptable for the requested kind and then reads
//! the payload. Any failure is returned as an [Error] rendered against the decoder's
//! [Context], and the decoder should not be used afterwards.
//!
//! # Integers
//!
//! Signed reads accept fixints and `int8`..`int64`; unsigned reads accept positive fixints,
//! `uint8`..`uint64` and non-negative `int8`..`int64`. Narrow reads decode at 64 bits and
//! then fail with [ErrorKind::IntegerOverflow] if the value does not fit.
//!
//! Unsigned tags are never accepted by signed reads: a value another producer encoded as
//! `uint8` (for example `200`) fails [Decoder::read_i32] with [ErrorKind::TypeMismatch].
//!
//! # Absent values
//!
//! `nil` decodes as length zero for strings, bytes, arrays and maps. Every `read_optional_*`
//! operation instead maps a leading `nil` to `None`, consuming only that byte.

use crate::{format::Format, view::View, Config, Context, Error, ErrorKind, RangeCfg, Read};
use bytes::Bytes;
use indexmap::IndexMap;
use num_bigint::BigInt;
use paste::paste;
use std::hash::Hash;

pub struct Decoder {
    context: Context,
    view: View,
    config: Config,
}

// Narrow integer reads
macro_rules! impl_narrow {
    ($type:ident, $wide:ident, $bits:literal) => {
        paste! {
            pub fn [<read_ $type>](&mut self) -> Result<$type, Error> {
                let value = self.$wide(stringify!($type))?;
                <$type>::try_from(value).map_err(|_| {
                    self.error(ErrorKind::IntegerOverflow {
                        value: value as i128,
                        bits: $bits,
                    })
                })
            }
        }
    };
}

// `nil`-aware wrappers around the plain reads
macro_rules! impl_optional {
    ($name:ident, $type:ty) => {
        paste! {
            #[doc = "Reads `nil` as `None`, otherwise delegates to [Decoder::read_" $name "]."]
            pub fn [<read_optional_ $name>](&mut self) -> Result<Option<$type>, Error> {
                if self.skip_nil()? {
                    return Ok(None);
                }
                self.[<read_ $name>]().map(Some)
            }
        }
    };
}

impl Decoder {
    pub fn new(context: Context, data: &[u8]) -> Self {
        Self::with_config(context, data, Config::default())
    }

    pub fn with_config(context: Context, data: &[u8], config: Config) -> Self {
        Self {
            context,
            view: View::from_slice(data),
            config,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.view.remaining()
    }

    /// Fails with [ErrorKind::ExtraData] if any input is left unread.
    pub fn finish(&self) -> Result<(), Error> {
        match self.view.remaining() {
            0 => Ok(()),
            remaining => Err(self.error(ErrorKind::ExtraData(remaining))),
        }
    }

    /// Renders `kind` against the current context.
    pub fn error(&self, kind: ErrorKind) -> Error {
        Error::new(kind, &self.context)
    }

    /// Unwraps a required field collected while scanning a record's entries.
    pub fn require<T>(&self, value: Option<T>, field: &str, ty: &str) -> Result<T, Error> {
        value.ok_or_else(|| {
            self.error(ErrorKind::MissingRequiredField {
                field: field.to_string(),
                ty: ty.to_string(),
            })
        })
    }

    /// Reads any type that implements [Read].
    pub fn read<T: Read>(&mut self) -> Result<T, Error> {
        T::read(self)
    }

    fn with_view<T>(
        &mut self,
        op: impl FnOnce(&mut View) -> Result<T, ErrorKind>,
    ) -> Result<T, Error> {
        let result = op(&mut self.view);
        result.map_err(|kind| self.error(kind))
    }

    fn next_format(&mut self) -> Result<Format, Error> {
        self.with_view(View::read_u8).map(Format::from)
    }

    fn mismatch<T>(&self, expected: &'static str, found: Format) -> Result<T, Error> {
        Err(self.error(ErrorKind::TypeMismatch { expected, found }))
    }

    fn check_len(&self, len: u32, range: RangeCfg) -> Result<usize, Error> {
        let len = len as usize;
        if !range.contains(&len) {
            return Err(self.error(ErrorKind::InvalidLength(len)));
        }
        Ok(len)
    }

    /// Consumes a leading `nil`, returning whether one was present.
    pub fn skip_nil(&mut self) -> Result<bool, Error> {
        if !self.is_nil()? {
            return Ok(false);
        }
        self.with_view(|view| view.skip(1))?;
        Ok(true)
    }

    /// Whether the next value is `nil`. Never consumes input.
    pub fn is_nil(&self) -> Result<bool, Error> {
        let byte = self.view.peek_u8().map_err(|kind| self.error(kind))?;
        Ok(Format::from(byte) == Format::Nil)
    }

    pub fn read_bool(&mut self) -> Result<bool, Error> {
        match self.next_format()? {
            Format::True => Ok(true),
            Format::False => Ok(false),
            other => self.mismatch("bool", other),
        }
    }

    fn read_signed(&mut self, expected: &'static str) -> Result<i64, Error> {
        match self.next_format()? {
            Format::PositiveFixInt(value) => Ok(value as i64),
            Format::NegativeFixInt(value) => Ok(value as i64),
            Format::Int8 => self.with_view(View::read_i8).map(i64::from),
            Format::Int16 => self.with_view(View::read_i16).map(i64::from),
            Format::Int32 => self.with_view(View::read_i32).map(i64::from),
            Format::Int64 => self.with_view(View::read_i64),
            other => self.mismatch(expected, other),
        }
    }

    fn read_unsigned(&mut self, expected: &'static str) -> Result<u64, Error> {
        let signed = match self.next_format()? {
            Format::PositiveFixInt(value) => return Ok(value as u64),
            Format::Uint8 => return self.with_view(View::read_u8).map(u64::from),
            Format::Uint16 => return self.with_view(View::read_u16).map(u64::from),
            Format::Uint32 => return self.with_view(View::read_u32).map(u64::from),
            Format::Uint64 => return self.with_view(View::read_u64),
            Format::NegativeFixInt(value) => value as i64,
            Format::Int8 => self.with_view(View::read_i8)? as i64,
            Format::Int16 => self.with_view(View::read_i16)? as i64,
            Format::Int32 => self.with_view(View::read_i32)? as i64,
            Format::Int64 => self.with_view(View::read_i64)?,
            other => return self.mismatch(expected, other),
        };
        u64::try_from(signed).map_err(|_| self.error(ErrorKind::NegativeUnsigned(signed)))
    }

    pub fn read_i64(&mut self) -> Result<i64, Error> {
        self.read_signed("i64")
    }

    impl_narrow!(i8, read_signed, 8);
    impl_narrow!(i16, read_signed, 16);
    impl_narrow!(i32, read_signed, 32);

    pub fn read_u64(&mut self) -> Result<u64, Error> {
        self.read_unsigned("u64")
    }

    impl_narrow!(u8, read_unsigned, 8);
    impl_narrow!(u16, read_unsigned, 16);
    impl_narrow!(u32, read_unsigned, 32);

    pub fn read_f32(&mut self) -> Result<f32, Error> {
        match self.next_format()? {
            Format::Float32 => self.with_view(View::read_f32),
            other => self.mismatch("f32", other),
        }
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        match self.next_format()? {
            Format::Float64 => self.with_view(View::read_f64),
            other => self.mismatch("f64", other),
        }
    }

    pub fn read_string_length(&mut self) -> Result<u32, Error> {
        let len = match self.next_format()? {
            Format::FixStr(len) => len as u32,
            Format::Nil => 0,
            Format::Str8 => self.with_view(View::read_u8)? as u32,
            Format::Str16 => self.with_view(View::read_u16)? as u32,
            Format::Str32 => self.with_view(View::read_u32)?,
            other => return self.mismatch("string", other),
        };
        self.check_len(len, self.config.string)?;
        Ok(len)
    }

    pub fn read_string(&mut self) -> Result<String, Error> {
        let len = self.read_string_length()? as usize;
        if len == 0 {
            return Ok(String::new());
        }
        self.with_view(|view| view.read_str(len))
    }

    pub fn read_bytes_length(&mut self) -> Result<u32, Error> {
        let len = match self.next_format()? {
            Format::Nil => 0,
            Format::Bin8 => self.with_view(View::read_u8)? as u32,
            Format::Bin16 => self.with_view(View::read_u16)? as u32,
            Format::Bin32 => self.with_view(View::read_u32)?,
            other => return self.mismatch("bytes", other),
        };
        self.check_len(len, self.config.bytes)?;
        Ok(len)
    }

    /// Reads a byte sequence. `nil` yields an empty (not absent) sequence.
    pub fn read_bytes(&mut self) -> Result<Bytes, Error> {
        let len = self.read_bytes_length()? as usize;
        if len == 0 {
            return Ok(Bytes::new());
        }
        self.with_view(|view| view.read_bytes(len))
    }

    pub fn read_array_length(&mut self) -> Result<u32, Error> {
        let len = match self.next_format()? {
            Format::Nil => 0,
            Format::FixArray(len) => len as u32,
            Format::Array16 => self.with_view(View::read_u16)? as u32,
            Format::Array32 => self.with_view(View::read_u32)?,
            other => return self.mismatch("array", other),
        };
        self.check_len(len, self.config.array)?;
        Ok(len)
    }

    /// Reads an array, invoking `item` once per element in order.
    pub fn read_array<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, Error>,
    ) -> Result<Vec<T>, Error> {
        let len = self.read_array_length()? as usize;

        // Every element occupies at least one byte
        let mut items = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            items.push(item(self)?);
        }
        Ok(items)
    }

    pub fn read_map_length(&mut self) -> Result<u32, Error> {
        let len = match self.next_format()? {
            Format::Nil => 0,
            Format::FixMap(len) => len as u32,
            Format::Map16 => self.with_view(View::read_u16)? as u32,
            Format::Map32 => self.with_view(View::read_u32)?,
            other => return self.mismatch("map", other),
        };
        self.check_len(len, self.config.map)?;
        Ok(len)
    }

    /// Reads a map, invoking `entry` once per key/value pair.
    ///
    /// Entries keep their wire order. A repeated key keeps its first position but takes
    /// the last value read for it.
    pub fn read_map<K: Hash + Eq, V>(
        &mut self,
        mut entry: impl FnMut(&mut Self) -> Result<(K, V), Error>,
    ) -> Result<IndexMap<K, V>, Error> {
        let len = self.read_map_length()? as usize;

        // Every entry occupies at least two bytes
        let mut map = IndexMap::with_capacity(len.min(self.remaining() / 2));
        for _ in 0..len {
            let (key, value) = entry(self)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Reads a big integer carried as decimal text. An empty string is `None`.
    pub fn read_big_int(&mut self) -> Result<Option<BigInt>, Error> {
        let text = self.read_string()?;
        if text.is_empty() {
            return Ok(None);
        }
        text.parse::<BigInt>()
            .map(Some)
            .map_err(|_| self.error(ErrorKind::UnparsableBigInt(text)))
    }

    /// Reads a JSON value carried as text. An empty string is `None`.
    pub fn read_json(&mut self) -> Result<Option<serde_json::Value>, Error> {
        let text = self.read_string()?;
        if text.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| self.error(ErrorKind::UnparsableJson(err.to_string())))
    }

    /// Consumes one complete value of any kind without decoding it.
    ///
    /// Record readers use this to step over fields they do not know. Nested containers
    /// are walked with a counter of pending values rather than by recursion.
    pub fn skip_value(&mut self) -> Result<(), Error> {
        let mut pending: u64 = 1;
        while pending > 0 {
            pending -= 1;
            let payload = match self.next_format()? {
                Format::PositiveFixInt(_)
                | Format::NegativeFixInt(_)
                | Format::Nil
                | Format::False
                | Format::True => 0,
                Format::Uint8 | Format::Int8 => 1,
                Format::Uint16 | Format::Int16 => 2,
                Format::Uint32 | Format::Int32 | Format::Float32 => 4,
                Format::Uint64 | Format::Int64 | Format::Float64 => 8,
                Format::FixStr(len) => len as usize,
                Format::Str8 | Format::Bin8 => self.with_view(View::read_u8)? as usize,
                Format::Str16 | Format::Bin16 => self.with_view(View::read_u16)? as usize,
                Format::Str32 | Format::Bin32 => self.with_view(View::read_u32)? as usize,
                Format::FixArray(len) => {
                    pending += len as u64;
                    0
                }
                Format::Array16 => {
                    pending += self.with_view(View::read_u16)? as u64;
                    0
                }
                Format::Array32 => {
                    pending += self.with_view(View::read_u32)? as u64;
                    0
                }
                Format::FixMap(len) => {
                    pending += 2 * len as u64;
                    0
                }
                Format::Map16 => {
                    pending += 2 * self.with_view(View::read_u16)? as u64;
                    0
                }
                Format::Map32 => {
                    pending += 2 * self.with_view(View::read_u32)? as u64;
                    0
                }
                other @ Format::Unsupported(_) => return self.mismatch("value", other),
            };
            self.with_view(|view| view.skip(payload))?;
        }
        Ok(())
    }

    impl_optional!(bool, bool);
    impl_optional!(i8, i8);
    impl_optional!(i16, i16);
    impl_optional!(i32, i32);
    impl_optional!(i64, i64);
    impl_optional!(u8, u8);
    impl_optional!(u16, u16);
    impl_optional!(u32, u32);
    impl_optional!(u64, u64);
    impl_optional!(f32, f32);
    impl_optional!(f64, f64);
    impl_optional!(string, String);
    impl_optional!(bytes, Bytes);

    pub fn read_optional_big_int(&mut self) -> Result<Option<BigInt>, Error> {
        if self.skip_nil()? {
            return Ok(None);
        }
        self.read_big_int()
    }

    pub fn read_optional_json(&mut self) -> Result<Option<serde_json::Value>, Error> {
        if self.skip_nil()? {
            return Ok(None);
        }
        self.read_json()
    }

    pub fn read_optional_array<T>(
        &mut self,
        item: impl FnMut(&mut Self) -> Result<T, Error>,
    ) -> Result<Option<Vec<T>>, Error> {
        if self.skip_nil()? {
            return Ok(None);
        }
        self.read_array(item).map(Some)
    }

    pub fn read_optional_map<K: Hash + Eq, V>(
        &mut self,
        entry: impl FnMut(&mut Self) -> Result<(K, V), Error>,
    ) -> Result<Option<IndexMap<K, V>>, Error> {
        if self.skip_nil()? {
            return Ok(None);
        }
        self.read_map(entry).map(Some)
    }
}
