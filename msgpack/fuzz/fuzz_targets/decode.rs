#![no_main]

use bytes::Bytes;
use indexmap::IndexMap;
use libfuzzer_sys::fuzz_target;
use wrap_msgpack::{Config, Context, Decode, Decoder, Encode};

/// Decoding must fail cleanly, never panic, and anything that decodes must re-encode
/// to something that decodes to the same value.
fn check<T: Decode + Encode + PartialEq + std::fmt::Debug>(data: &[u8]) {
    let cfg = Config::default()
        .with_max_string(4096)
        .with_max_bytes(4096)
        .with_max_array(4096)
        .with_max_map(4096);
    let Ok(value) = T::decode_cfg("fuzz", data, cfg) else {
        return;
    };
    let encoded = value.encode("fuzz").expect("failed to encode a decoded value");
    let decoded = T::decode("fuzz", &encoded).expect("failed to decode a re-encoded value");
    assert_eq!(value, decoded);
}

fuzz_target!(|data: &[u8]| {
    check::<bool>(data);
    check::<u8>(data);
    check::<u64>(data);
    check::<i32>(data);
    check::<i64>(data);
    check::<String>(data);
    check::<Bytes>(data);
    check::<Option<u16>>(data);
    check::<Vec<i64>>(data);
    check::<Vec<Option<String>>>(data);
    check::<IndexMap<String, Vec<u32>>>(data);

    // Skipping walks any well-formed value without panicking
    let mut decoder = Decoder::new(Context::new("fuzz"), data);
    while decoder.remaining() > 0 && decoder.skip_value().is_ok() {}
});
