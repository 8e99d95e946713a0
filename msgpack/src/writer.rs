//! The encoding contract shared by [crate::Encoder] and [crate::SizeCounter].
//!
//! Implementors supply two raw sinks ([Writer::put_u8] and [Writer::put_slice]) plus
//! access to their [Context]. Every MessagePack operation is provided on top of those
//! sinks, so an encoder and a size counter always agree on which representation a value
//! gets and therefore on its length.
//!
//! # Canonical choices
//!
//! - Integers use the smallest representation that holds the value, regardless of the
//!   width the caller declared.
//! - Map entries are emitted sorted by key.
//! - An empty byte sequence or array is written as `nil`, so it cannot be told apart from
//!   an absent one after a round trip.

use crate::{format, Context, Error, Write};
use num_bigint::BigInt;
use paste::paste;

// Fixed-width big-endian sinks with a default in terms of `put_slice`
macro_rules! impl_put {
    ($type:ident) => {
        paste! {
            #[inline]
            fn [<put_ $type>](&mut self, value: $type) {
                self.put_slice(&value.to_be_bytes());
            }
        }
    };
}

// Widening writes that defer to the canonical 64-bit encoding
macro_rules! impl_widen {
    ($type:ident, $wide:ident) => {
        paste! {
            #[inline]
            fn [<write_ $type>](&mut self, value: $type) {
                self.[<write_ $wide>](value.into());
            }
        }
    };
}

// `None` becomes `nil`, `Some` defers to the plain write
macro_rules! impl_optional {
    ($name:ident, $type:ty) => {
        paste! {
            fn [<write_optional_ $name>](&mut self, value: Option<$type>) {
                match value {
                    Some(value) => self.[<write_ $name>](value),
                    None => self.write_nil(),
                }
            }
        }
    };
}

pub trait Writer: Sized {
    fn context(&self) -> &Context;

    fn context_mut(&mut self) -> &mut Context;

    /// Emits a single raw byte.
    fn put_u8(&mut self, value: u8);

    /// Emits raw bytes.
    fn put_slice(&mut self, value: &[u8]);

    impl_put!(u16);
    impl_put!(u32);
    impl_put!(u64);
    impl_put!(i8);
    impl_put!(i16);
    impl_put!(i32);
    impl_put!(i64);
    impl_put!(f32);
    impl_put!(f64);

    /// Writes any type that implements [Write].
    fn write<T: Write + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        value.write(self)
    }

    fn write_nil(&mut self) {
        self.put_u8(format::NIL);
    }

    fn write_bool(&mut self, value: bool) {
        self.put_u8(if value { format::TRUE } else { format::FALSE });
    }

    fn write_i64(&mut self, value: i64) {
        if (0..=format::MAX_POSITIVE_FIXINT as i64).contains(&value) {
            self.put_u8(value as u8);
        } else if (format::MIN_NEGATIVE_FIXINT..0).contains(&value) {
            let low = value as u8 & format::FIVE_LEAST_SIG_BITS_IN_BYTE;
            self.put_u8(low | format::NEGATIVE_FIXINT);
        } else if let Ok(value) = i8::try_from(value) {
            self.put_u8(format::INT8);
            self.put_i8(value);
        } else if let Ok(value) = i16::try_from(value) {
            self.put_u8(format::INT16);
            self.put_i16(value);
        } else if let Ok(value) = i32::try_from(value) {
            self.put_u8(format::INT32);
            self.put_i32(value);
        } else {
            self.put_u8(format::INT64);
            self.put_i64(value);
        }
    }

    impl_widen!(i8, i64);
    impl_widen!(i16, i64);
    impl_widen!(i32, i64);

    fn write_u64(&mut self, value: u64) {
        if value <= format::MAX_POSITIVE_FIXINT as u64 {
            self.put_u8(value as u8);
        } else if let Ok(value) = u8::try_from(value) {
            self.put_u8(format::UINT8);
            self.put_u8(value);
        } else if let Ok(value) = u16::try_from(value) {
            self.put_u8(format::UINT16);
            self.put_u16(value);
        } else if let Ok(value) = u32::try_from(value) {
            self.put_u8(format::UINT32);
            self.put_u32(value);
        } else {
            self.put_u8(format::UINT64);
            self.put_u64(value);
        }
    }

    impl_widen!(u8, u64);
    impl_widen!(u16, u64);
    impl_widen!(u32, u64);

    fn write_f32(&mut self, value: f32) {
        self.put_u8(format::FLOAT32);
        self.put_f32(value);
    }

    fn write_f64(&mut self, value: f64) {
        self.put_u8(format::FLOAT64);
        self.put_f64(value);
    }

    fn write_string_length(&mut self, len: u32) {
        if len < format::FIXSTR_LIMIT {
            self.put_u8(format::FIXSTR | len as u8);
        } else if let Ok(len) = u8::try_from(len) {
            self.put_u8(format::STR8);
            self.put_u8(len);
        } else if let Ok(len) = u16::try_from(len) {
            self.put_u8(format::STR16);
            self.put_u16(len);
        } else {
            self.put_u8(format::STR32);
            self.put_u32(len);
        }
    }

    fn write_string(&mut self, value: &str) {
        let len = u32::try_from(value.len()).expect("string length exceeds u32");
        self.write_string_length(len);
        self.put_slice(value.as_bytes());
    }

    fn write_bytes_length(&mut self, len: u32) {
        if let Ok(len) = u8::try_from(len) {
            self.put_u8(format::BIN8);
            self.put_u8(len);
        } else if let Ok(len) = u16::try_from(len) {
            self.put_u8(format::BIN16);
            self.put_u16(len);
        } else {
            self.put_u8(format::BIN32);
            self.put_u32(len);
        }
    }

    /// Writes a byte sequence; an empty one is written as `nil`.
    fn write_bytes(&mut self, value: &[u8]) {
        if value.is_empty() {
            self.write_nil();
            return;
        }
        let len = u32::try_from(value.len()).expect("bytes length exceeds u32");
        self.write_bytes_length(len);
        self.put_slice(value);
    }

    fn write_array_length(&mut self, len: u32) {
        if len < format::FIX_CONTAINER_LIMIT {
            self.put_u8(format::FIXARRAY | len as u8);
        } else if let Ok(len) = u16::try_from(len) {
            self.put_u8(format::ARRAY16);
            self.put_u16(len);
        } else {
            self.put_u8(format::ARRAY32);
            self.put_u32(len);
        }
    }

    /// Writes an array, invoking `item` once per element in order. An empty array is
    /// written as `nil`.
    fn write_array<T>(
        &mut self,
        items: &[T],
        mut item: impl FnMut(&mut Self, &T) -> Result<(), Error>,
    ) -> Result<(), Error> {
        if items.is_empty() {
            self.write_nil();
            return Ok(());
        }
        let len = u32::try_from(items.len()).expect("array length exceeds u32");
        self.write_array_length(len);
        for value in items {
            item(self, value)?;
        }
        Ok(())
    }

    fn write_map_length(&mut self, len: u32) {
        if len < format::FIX_CONTAINER_LIMIT {
            self.put_u8(format::FIXMAP | len as u8);
        } else if let Ok(len) = u16::try_from(len) {
            self.put_u8(format::MAP16);
            self.put_u16(len);
        } else {
            self.put_u8(format::MAP32);
            self.put_u32(len);
        }
    }

    /// Writes a map, invoking `entry` once per key/value pair in ascending key order.
    fn write_map<'a, K: Ord + 'a, V: 'a>(
        &mut self,
        entries: impl IntoIterator<Item = (&'a K, &'a V)>,
        mut entry: impl FnMut(&mut Self, &K, &V) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let mut sorted: Vec<(&K, &V)> = entries.into_iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let len = u32::try_from(sorted.len()).expect("map length exceeds u32");
        self.write_map_length(len);
        for (key, value) in sorted {
            entry(self, key, value)?;
        }
        Ok(())
    }

    /// Writes a big integer as decimal text; `None` is written as `nil`.
    fn write_big_int(&mut self, value: Option<&BigInt>) {
        match value {
            Some(value) => self.write_string(&value.to_string()),
            None => self.write_nil(),
        }
    }

    /// Writes a JSON value as compact text; `None` is written as `nil`.
    fn write_json(&mut self, value: Option<&serde_json::Value>) {
        match value {
            Some(value) => self.write_string(&value.to_string()),
            None => self.write_nil(),
        }
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
    impl_optional!(string, &str);
    impl_optional!(bytes, &[u8]);

    fn write_optional_big_int(&mut self, value: Option<&BigInt>) {
        self.write_big_int(value);
    }

    fn write_optional_json(&mut self, value: Option<&serde_json::Value>) {
        self.write_json(value);
    }

    fn write_optional_array<T>(
        &mut self,
        items: Option<&[T]>,
        item: impl FnMut(&mut Self, &T) -> Result<(), Error>,
    ) -> Result<(), Error> {
        match items {
            Some(items) => self.write_array(items, item),
            None => {
                self.write_nil();
                Ok(())
            }
        }
    }

    fn write_optional_map<'a, K: Ord + 'a, V: 'a, I: IntoIterator<Item = (&'a K, &'a V)>>(
        &mut self,
        entries: Option<I>,
        entry: impl FnMut(&mut Self, &K, &V) -> Result<(), Error>,
    ) -> Result<(), Error> {
        match entries {
            Some(entries) => self.write_map(entries, entry),
            None => {
                self.write_nil();
                Ok(())
            }
        }
    }
}
