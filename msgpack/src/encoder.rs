//! Encoding of MessagePack values into a growable buffer.

use crate::{view::View, Context, Writer};
use bytes::Bytes;

/// A [Writer] that appends every value to an owned buffer.
#[derive(Debug)]
pub struct Encoder {
    context: Context,
    view: View,
}

impl Encoder {
    pub fn new(context: Context) -> Self {
        Self {
            context,
            view: View::new(),
        }
    }

    /// An encoder whose buffer is pre-sized, typically with the length reported by a
    /// [crate::SizeCounter] pass over the same value.
    pub fn with_capacity(context: Context, capacity: usize) -> Self {
        Self {
            context,
            view: View::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Everything written so far.
    pub fn buffer(&self) -> &[u8] {
        self.view.as_slice()
    }

    pub fn into_bytes(self) -> Bytes {
        self.view.freeze()
    }
}

impl Writer for Encoder {
    fn context(&self) -> &Context {
        &self.context
    }

    fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    #[inline]
    fn put_u8(&mut self, value: u8) {
        self.view.write_u8(value);
    }

    #[inline]
    fn put_slice(&mut self, value: &[u8]) {
        self.view.write_bytes(value);
    }

    #[inline]
    fn put_u16(&mut self, value: u16) {
        self.view.write_u16(value);
    }

    #[inline]
    fn put_u32(&mut self, value: u32) {
        self.view.write_u32(value);
    }

    #[inline]
    fn put_u64(&mut self, value: u64) {
        self.view.write_u64(value);
    }

    #[inline]
    fn put_i8(&mut self, value: i8) {
        self.view.write_i8(value);
    }

    #[inline]
    fn put_i16(&mut self, value: i16) {
        self.view.write_i16(value);
    }

    #[inline]
    fn put_i32(&mut self, value: i32) {
        self.view.write_i32(value);
    }

    #[inline]
    fn put_i64(&mut self, value: i64) {
        self.view.write_i64(value);
    }

    #[inline]
    fn put_f32(&mut self, value: f32) {
        self.view.write_f32(value);
    }

    #[inline]
    fn put_f64(&mut self, value: f64) {
        self.view.write_f64(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ErrorKind};
    use indexmap::IndexMap;
    use num_bigint::BigInt;
    use std::collections::BTreeMap;
    use test_case::test_case;

    fn encoder() -> Encoder {
        Encoder::new(Context::new("test"))
    }

    fn encode(op: impl FnOnce(&mut Encoder)) -> Vec<u8> {
        let mut encoder = encoder();
        op(&mut encoder);
        encoder.buffer().to_vec()
    }

    #[test]
    fn test_nil_and_bool() {
        assert_eq!(encode(|e| e.write_nil()), [0xc0]);
        assert_eq!(encode(|e| e.write_bool(true)), [0xc3]);
        assert_eq!(encode(|e| e.write_bool(false)), [0xc2]);
    }

    #[test_case(0, &[0x00]; "zero")]
    #[test_case(127, &[0x7f]; "max positive fixint")]
    #[test_case(-1, &[0xff]; "minus one")]
    #[test_case(-32, &[0xe0]; "min negative fixint")]
    #[test_case(-33, &[0xd0, 0xdf]; "int8")]
    #[test_case(128, &[0xd1, 0x00, 0x80]; "positive past fixint")]
    #[test_case(-129, &[0xd1, 0xff, 0x7f]; "int16")]
    #[test_case(40_000, &[0xd2, 0x00, 0x00, 0x9c, 0x40]; "int32")]
    #[test_case(i64::MIN, &[0xd3, 0x80, 0, 0, 0, 0, 0, 0, 0]; "int64 min")]
    fn test_write_i64(value: i64, expected: &[u8]) {
        assert_eq!(encode(|e| e.write_i64(value)), expected);
    }

    #[test]
    fn test_write_narrow_signed_uses_smallest_form() {
        assert_eq!(encode(|e| e.write_i8(1)), [0x01]);
        assert_eq!(encode(|e| e.write_i16(-5)), [0xfb]);
        assert_eq!(encode(|e| e.write_i32(-200)), [0xd1, 0xff, 0x38]);
        assert_eq!(encode(|e| e.write_i8(i8::MIN)), [0xd0, 0x80]);
    }

    #[test_case(0, &[0x00]; "zero")]
    #[test_case(127, &[0x7f]; "max fixint")]
    #[test_case(128, &[0xcc, 0x80]; "uint8")]
    #[test_case(255, &[0xcc, 0xff]; "uint8 max")]
    #[test_case(256, &[0xcd, 0x01, 0x00]; "uint16")]
    #[test_case(65_536, &[0xce, 0x00, 0x01, 0x00, 0x00]; "uint32")]
    #[test_case(u64::MAX, &[0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]; "uint64 max")]
    fn test_write_u64(value: u64, expected: &[u8]) {
        assert_eq!(encode(|e| e.write_u64(value)), expected);
    }

    #[test]
    fn test_write_floats() {
        assert_eq!(
            encode(|e| e.write_f32(0.6046603)),
            [0xca, 0x3f, 0x1a, 0xcb, 0x04]
        );
        assert_eq!(
            encode(|e| e.write_f64(1.5)),
            [0xcb, 0x3f, 0xf8, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_write_string() {
        assert_eq!(encode(|e| e.write_string("")), [0xa0]);
        assert_eq!(encode(|e| e.write_string("hi")), [0xa2, b'h', b'i']);

        let fixstr = "a".repeat(31);
        let bytes = encode(|e| e.write_string(&fixstr));
        assert_eq!(bytes[0], 0xbf);
        assert_eq!(bytes.len(), 32);

        let str8 = "a".repeat(32);
        let bytes = encode(|e| e.write_string(&str8));
        assert_eq!(&bytes[..2], &[0xd9, 32]);
        assert_eq!(bytes.len(), 34);

        let str16 = "a".repeat(256);
        let bytes = encode(|e| e.write_string(&str16));
        assert_eq!(&bytes[..3], &[0xda, 0x01, 0x00]);

        let str32 = "a".repeat(65_536);
        let bytes = encode(|e| e.write_string(&str32));
        assert_eq!(&bytes[..5], &[0xdb, 0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_write_bytes() {
        assert_eq!(encode(|e| e.write_bytes(&[])), [0xc0]);
        assert_eq!(encode(|e| e.write_bytes(&[1, 2])), [0xc4, 0x02, 0x01, 0x02]);
        let bin16 = vec![7u8; 300];
        assert_eq!(&encode(|e| e.write_bytes(&bin16))[..3], &[0xc5, 0x01, 0x2c]);
        assert_eq!(encode(|e| e.write_bytes_length(0)), [0xc4, 0x00]);
    }

    #[test]
    fn test_write_array() {
        let bytes = encode(|e| {
            e.write_array(&[1u8, 2, 3], |e, v| {
                e.write_u8(*v);
                Ok(())
            })
            .unwrap()
        });
        assert_eq!(bytes, [0x93, 0x01, 0x02, 0x03]);

        let empty: [u8; 0] = [];
        let bytes = encode(|e| e.write_array(&empty, |_, _| Ok(())).unwrap());
        assert_eq!(bytes, [0xc0]);

        assert_eq!(encode(|e| e.write_array_length(15)), [0x9f]);
        assert_eq!(encode(|e| e.write_array_length(16)), [0xdc, 0x00, 0x10]);
        assert_eq!(
            encode(|e| e.write_array_length(70_000)),
            [0xdd, 0x00, 0x01, 0x11, 0x70]
        );
    }

    #[test]
    fn test_write_array_propagates_item_failure() {
        let mut encoder = encoder();
        let err = encoder
            .write_array(&[1u8, 2], |e, v| {
                if *v == 2 {
                    return Err(Error::new(ErrorKind::EmptyOption, e.context()));
                }
                e.write_u8(*v);
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EmptyOption);
        assert_eq!(encoder.buffer(), &[0x92, 0x01]);
    }

    #[test]
    fn test_write_map_sorts_keys() {
        let mut map = IndexMap::new();
        map.insert("b".to_string(), 2u8);
        map.insert("a".to_string(), 1u8);

        let bytes = encode(|e| {
            e.write_map(&map, |e, k, v| {
                e.write_string(k);
                e.write_u8(*v);
                Ok(())
            })
            .unwrap()
        });
        assert_eq!(bytes, [0x82, 0xa1, b'a', 0x01, 0xa1, b'b', 0x02]);
    }

    #[test]
    fn test_write_empty_map() {
        let map: BTreeMap<u8, u8> = BTreeMap::new();
        let bytes = encode(|e| e.write_map(&map, |_, _, _| Ok(())).unwrap());
        assert_eq!(bytes, [0x80]);
        assert_eq!(encode(|e| e.write_map_length(16)), [0xde, 0x00, 0x10]);
    }

    #[test]
    fn test_write_big_int() {
        let zero = BigInt::from(0);
        assert_eq!(encode(|e| e.write_big_int(Some(&zero))), [0xa1, b'0']);
        assert_eq!(encode(|e| e.write_big_int(None)), [0xc0]);

        let negative = BigInt::from(-12);
        assert_eq!(
            encode(|e| e.write_big_int(Some(&negative))),
            [0xa3, b'-', b'1', b'2']
        );
    }

    #[test]
    fn test_write_json() {
        let value = serde_json::json!({"foo": "bar"});
        let bytes = encode(|e| e.write_json(Some(&value)));
        let text = br#"{"foo":"bar"}"#;
        assert_eq!(bytes[0], 0xa0 | text.len() as u8);
        assert_eq!(&bytes[1..], text);
        assert_eq!(encode(|e| e.write_json(None)), [0xc0]);
    }

    #[test]
    fn test_write_optional() {
        assert_eq!(encode(|e| e.write_optional_u32(None)), [0xc0]);
        assert_eq!(encode(|e| e.write_optional_u32(Some(200))), [0xcc, 0xc8]);
        assert_eq!(encode(|e| e.write_optional_bool(Some(false))), [0xc2]);
        assert_eq!(encode(|e| e.write_optional_string(Some("x"))), [0xa1, b'x']);
        assert_eq!(encode(|e| e.write_optional_bytes(None)), [0xc0]);

        let items: Option<&[u8]> = None;
        let bytes = encode(|e| e.write_optional_array(items, |_, _| Ok(())).unwrap());
        assert_eq!(bytes, [0xc0]);

        let entries: Option<&BTreeMap<u8, u8>> = None;
        let bytes = encode(|e| e.write_optional_map(entries, |_, _, _| Ok(())).unwrap());
        assert_eq!(bytes, [0xc0]);
    }

    #[test]
    fn test_into_bytes() {
        let mut encoder = Encoder::with_capacity(Context::new("test"), 8);
        assert!(encoder.is_empty());
        encoder.write_u8(5);
        encoder.write_string("ok");
        assert_eq!(encoder.len(), 4);
        assert_eq!(encoder.into_bytes().as_ref(), &[0x05, 0xa2, b'o', b'k']);
    }
}
