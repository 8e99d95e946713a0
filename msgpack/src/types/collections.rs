//! Codec implementations for sequences and maps.

use crate::{Decoder, Error, Read, Write, Writer};
use indexmap::IndexMap;
use std::hash::Hash;

// Slice implementation
impl<T: Write> Write for [T] {
    #[inline]
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_array(self, |writer, item| item.write(writer))
    }
}

// Vec implementation
impl<T: Write> Write for Vec<T> {
    #[inline]
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error> {
        self.as_slice().write(writer)
    }
}

impl<T: Read> Read for Vec<T> {
    #[inline]
    fn read(decoder: &mut Decoder) -> Result<Self, Error> {
        decoder.read_array(T::read)
    }
}

// Map implementation
impl<K: Write + Ord, V: Write> Write for IndexMap<K, V> {
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_map(self, |writer, key, value| {
            key.write(writer)?;
            value.write(writer)
        })
    }
}

impl<K: Read + Hash + Eq, V: Read> Read for IndexMap<K, V> {
    fn read(decoder: &mut Decoder) -> Result<Self, Error> {
        decoder.read_map(|decoder| Ok((K::read(decoder)?, V::read(decoder)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, Decode, Encode, ErrorKind};

    #[test]
    fn test_vec() {
        let values = [vec![1u8], vec![1u8, 2u8, 3u8], (0..20).collect()];
        for value in values {
            let encoded = value.encode("vec").unwrap();
            assert_eq!(Vec::<u8>::decode("vec", &encoded).unwrap(), value);
        }
    }

    #[test]
    fn test_empty_vec_is_nil() {
        let empty: Vec<u32> = Vec::new();
        assert_eq!(empty.encode("vec").unwrap().as_ref(), &[0xc0]);
        assert!(Vec::<u32>::decode("vec", &[0xc0]).unwrap().is_empty());
        assert_eq!(Option::<Vec<u32>>::decode("vec", &[0xc0]).unwrap(), None);
    }

    #[test]
    fn test_vec_length_limit() {
        let encoded = vec![1u8, 2, 3].encode("vec").unwrap();
        let cfg = Config::default().with_max_array(2);
        let err = Vec::<u8>::decode_cfg("vec", &encoded, cfg).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidLength(3));
    }

    #[test]
    fn test_nested_vec() {
        let value = vec![vec!["a".to_string()], vec!["b".to_string(), "c".to_string()]];
        let encoded = value.encode("nested").unwrap();
        assert_eq!(&encoded[..3], &[0x92, 0x91, 0xa1]);
        assert_eq!(Vec::<Vec<String>>::decode("nested", &encoded).unwrap(), value);
    }

    #[test]
    fn test_map_sorted_on_write() {
        let mut map = IndexMap::new();
        map.insert("zeta".to_string(), 1u32);
        map.insert("alpha".to_string(), 2u32);

        let encoded = map.encode("map").unwrap();
        let decoded = IndexMap::<String, u32>::decode("map", &encoded).unwrap();
        let keys: Vec<&str> = decoded.keys().map(String::as_str).collect();
        assert_eq!(keys, ["alpha", "zeta"]);
        assert_eq!(decoded["zeta"], 1);
    }

    #[test]
    fn test_empty_map() {
        let map: IndexMap<String, u32> = IndexMap::new();
        assert_eq!(map.encode("map").unwrap().as_ref(), &[0x80]);
        assert!(IndexMap::<String, u32>::decode("map", &[0x80])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_map_of_arrays() {
        let mut map = IndexMap::new();
        map.insert(2u8, vec![1i32, -1]);
        map.insert(1u8, vec![]);
        let encoded = map.encode("map").unwrap();
        assert_eq!(
            encoded.as_ref(),
            &[0x82, 0x01, 0xc0, 0x02, 0x92, 0x01, 0xff]
        );
    }
}
