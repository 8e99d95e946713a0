#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use indexmap::IndexMap;
use libfuzzer_sys::fuzz_target;
use wrap_msgpack::{Context, Decode, Decoder, Encode, Encoder, SizeCounter, Write, Writer};

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    OptionU32(Option<u32>),
    VecI64(Vec<i64>),
    VecString(Vec<String>),
    NestedVec(Vec<Vec<u16>>),
    Map(Vec<(String, i64)>),
}

fn roundtrip<T: Encode + Decode + PartialEq + std::fmt::Debug>(value: &T) {
    let encoded = value.encode("fuzz").expect("failed to encode");
    assert_eq!(value.encoded_size("fuzz").unwrap(), encoded.len());
    let decoded =
        T::decode("fuzz", &encoded).expect("failed to decode a successfully encoded input");
    assert_eq!(value, &decoded);

    // Every value is a single well-formed item
    let mut decoder = Decoder::new(Context::new("fuzz"), &encoded);
    decoder.skip_value().expect("failed to skip an encoded value");
    assert_eq!(decoder.remaining(), 0);
}

fn roundtrip_float<T: Encode + Decode + Into<f64> + Copy>(value: T) {
    let encoded = value.encode("fuzz").expect("failed to encode");
    let decoded = T::decode("fuzz", &encoded).expect("failed to decode float");
    let (expected, actual): (f64, f64) = (value.into(), decoded.into());
    assert!(expected.to_bits() == actual.to_bits() || (expected.is_nan() && actual.is_nan()));
}

fn sizes_agree<T: Write>(value: &T) {
    let mut sizer = SizeCounter::new(Context::new("fuzz"));
    value.write(&mut sizer).expect("failed to size");
    let mut encoder = Encoder::new(Context::new("fuzz"));
    value.write(&mut encoder).expect("failed to encode");
    assert_eq!(sizer.len(), encoder.len());
}

fuzz_target!(|input: FuzzInput| {
    match input {
        FuzzInput::Bool(v) => roundtrip(&v),
        FuzzInput::U8(v) => roundtrip(&v),
        FuzzInput::U16(v) => roundtrip(&v),
        FuzzInput::U32(v) => roundtrip(&v),
        FuzzInput::U64(v) => roundtrip(&v),
        FuzzInput::I8(v) => roundtrip(&v),
        FuzzInput::I16(v) => roundtrip(&v),
        FuzzInput::I32(v) => roundtrip(&v),
        FuzzInput::I64(v) => {
            roundtrip(&v);
            let mut sizer = SizeCounter::new(Context::new("fuzz"));
            sizer.write_i64(v);
            assert!(sizer.len() <= 9);
        }
        FuzzInput::F32(v) => roundtrip_float(v),
        FuzzInput::F64(v) => roundtrip_float(v),
        FuzzInput::String(v) => roundtrip(&v),
        FuzzInput::Bytes(v) => roundtrip(&Bytes::from(v)),
        FuzzInput::OptionU32(v) => roundtrip(&v),
        FuzzInput::VecI64(v) => roundtrip(&v),
        FuzzInput::VecString(v) => roundtrip(&v),
        FuzzInput::NestedVec(v) => {
            // Empty inner arrays are written as nil and read back empty
            roundtrip(&v);
            sizes_agree(&v);
        }
        FuzzInput::Map(entries) => {
            let map: IndexMap<String, i64> = entries.into_iter().collect();
            sizes_agree(&map);

            let encoded = map.encode("fuzz").expect("failed to encode map");
            let decoded = IndexMap::<String, i64>::decode("fuzz", &encoded)
                .expect("failed to decode map");
            let mut expected: Vec<_> = map.into_iter().collect();
            expected.sort();
            let actual: Vec<_> = decoded.into_iter().collect();
            assert_eq!(expected, actual);
        }
    }
});
