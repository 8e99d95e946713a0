//! MessagePack leading-byte tags.
//!
//! Every encoded value starts with a single byte that identifies its type and, for the
//! "fix" families, embeds a small value or length in its low bits. [Format] classifies a
//! raw byte into one of these tags; the predicates below are pure bit tests over the raw
//! byte and are what the [crate::Decoder] uses to dispatch.

use std::fmt;

pub const POSITIVE_FIXINT: u8 = 0x00;
pub const FIXMAP: u8 = 0x80;
pub const FIXARRAY: u8 = 0x90;
pub const FIXSTR: u8 = 0xa0;
pub const NIL: u8 = 0xc0;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;
pub const BIN8: u8 = 0xc4;
pub const BIN16: u8 = 0xc5;
pub const BIN32: u8 = 0xc6;
pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;
pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;
pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;
pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;
pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;
pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;
pub const NEGATIVE_FIXINT: u8 = 0xe0;

/// Selects the length embedded in a fixmap or fixarray tag.
pub const FOUR_LEAST_SIG_BITS_IN_BYTE: u8 = 0x0f;
/// Selects the family of a fixmap or fixarray tag.
pub const FOUR_SIG_BITS_IN_BYTE: u8 = 0xf0;
/// Selects the length embedded in a fixstr tag.
pub const FIVE_LEAST_SIG_BITS_IN_BYTE: u8 = 0x1f;
/// Selects the family of a fixstr or negative fixint tag.
pub const THREE_SIG_BITS_IN_BYTE: u8 = 0xe0;

/// Largest value encoded directly in a positive fixint tag.
pub const MAX_POSITIVE_FIXINT: u8 = 0x7f;
/// Smallest value encoded directly in a negative fixint tag.
pub const MIN_NEGATIVE_FIXINT: i64 = -(1 << 5);
/// Number of elements (exclusive) that fit a fixmap or fixarray tag.
pub const FIX_CONTAINER_LIMIT: u32 = 16;
/// Number of bytes (exclusive) that fit a fixstr tag.
pub const FIXSTR_LIMIT: u32 = 32;

#[inline]
pub fn is_fixint(byte: u8) -> bool {
    byte >> 7 == 0
}

#[inline]
pub fn is_negative_fixint(byte: u8) -> bool {
    byte & THREE_SIG_BITS_IN_BYTE == NEGATIVE_FIXINT
}

#[inline]
pub fn is_fixmap(byte: u8) -> bool {
    byte & FOUR_SIG_BITS_IN_BYTE == FIXMAP
}

#[inline]
pub fn is_fixarray(byte: u8) -> bool {
    byte & FOUR_SIG_BITS_IN_BYTE == FIXARRAY
}

#[inline]
pub fn is_fixstr(byte: u8) -> bool {
    byte & THREE_SIG_BITS_IN_BYTE == FIXSTR
}

/// A classified leading byte.
///
/// The fix families carry the value (positive/negative fixint) or length (fixmap,
/// fixarray, fixstr) embedded in the tag. Bytes that this profile never produces (the
/// reserved `0xc1` and the ext family) classify as [Format::Unsupported].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    PositiveFixInt(u8),
    FixMap(u8),
    FixArray(u8),
    FixStr(u8),
    Nil,
    False,
    True,
    Bin8,
    Bin16,
    Bin32,
    Float32,
    Float64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Str8,
    Str16,
    Str32,
    Array16,
    Array32,
    Map16,
    Map32,
    NegativeFixInt(i8),
    Unsupported(u8),
}

impl From<u8> for Format {
    fn from(byte: u8) -> Self {
        if is_fixint(byte) {
            return Format::PositiveFixInt(byte);
        }
        if is_negative_fixint(byte) {
            return Format::NegativeFixInt(byte as i8);
        }
        if is_fixmap(byte) {
            return Format::FixMap(byte & FOUR_LEAST_SIG_BITS_IN_BYTE);
        }
        if is_fixarray(byte) {
            return Format::FixArray(byte & FOUR_LEAST_SIG_BITS_IN_BYTE);
        }
        if is_fixstr(byte) {
            return Format::FixStr(byte & FIVE_LEAST_SIG_BITS_IN_BYTE);
        }
        match byte {
            NIL => Format::Nil,
            FALSE => Format::False,
            TRUE => Format::True,
            BIN8 => Format::Bin8,
            BIN16 => Format::Bin16,
            BIN32 => Format::Bin32,
            FLOAT32 => Format::Float32,
            FLOAT64 => Format::Float64,
            UINT8 => Format::Uint8,
            UINT16 => Format::Uint16,
            UINT32 => Format::Uint32,
            UINT64 => Format::Uint64,
            INT8 => Format::Int8,
            INT16 => Format::Int16,
            INT32 => Format::Int32,
            INT64 => Format::Int64,
            STR8 => Format::Str8,
            STR16 => Format::Str16,
            STR32 => Format::Str32,
            ARRAY16 => Format::Array16,
            ARRAY32 => Format::Array32,
            MAP16 => Format::Map16,
            MAP32 => Format::Map32,
            other => Format::Unsupported(other),
        }
    }
}

impl From<Format> for u8 {
    fn from(format: Format) -> Self {
        match format {
            Format::PositiveFixInt(value) => value & MAX_POSITIVE_FIXINT,
            Format::FixMap(len) => FIXMAP | (len & FOUR_LEAST_SIG_BITS_IN_BYTE),
            Format::FixArray(len) => FIXARRAY | (len & FOUR_LEAST_SIG_BITS_IN_BYTE),
            Format::FixStr(len) => FIXSTR | (len & FIVE_LEAST_SIG_BITS_IN_BYTE),
            Format::Nil => NIL,
            Format::False => FALSE,
            Format::True => TRUE,
            Format::Bin8 => BIN8,
            Format::Bin16 => BIN16,
            Format::Bin32 => BIN32,
            Format::Float32 => FLOAT32,
            Format::Float64 => FLOAT64,
            Format::Uint8 => UINT8,
            Format::Uint16 => UINT16,
            Format::Uint32 => UINT32,
            Format::Uint64 => UINT64,
            Format::Int8 => INT8,
            Format::Int16 => INT16,
            Format::Int32 => INT32,
            Format::Int64 => INT64,
            Format::Str8 => STR8,
            Format::Str16 => STR16,
            Format::Str32 => STR32,
            Format::Array16 => ARRAY16,
            Format::Array32 => ARRAY32,
            Format::Map16 => MAP16,
            Format::Map32 => MAP32,
            Format::NegativeFixInt(value) => (value as u8) | NEGATIVE_FIXINT,
            Format::Unsupported(byte) => byte,
        }
    }
}

impl Format {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Format::PositiveFixInt(_) => "positive fixint",
            Format::FixMap(_) => "fixmap",
            Format::FixArray(_) => "fixarray",
            Format::FixStr(_) => "fixstr",
            Format::Nil => "nil",
            Format::False | Format::True => "bool",
            Format::Bin8 => "bin8",
            Format::Bin16 => "bin16",
            Format::Bin32 => "bin32",
            Format::Float32 => "float32",
            Format::Float64 => "float64",
            Format::Uint8 => "uint8",
            Format::Uint16 => "uint16",
            Format::Uint32 => "uint32",
            Format::Uint64 => "uint64",
            Format::Int8 => "int8",
            Format::Int16 => "int16",
            Format::Int32 => "int32",
            Format::Int64 => "int64",
            Format::Str8 => "str8",
            Format::Str16 => "str16",
            Format::Str32 => "str32",
            Format::Array16 => "array16",
            Format::Array32 => "array32",
            Format::Map16 => "map16",
            Format::Map32 => "map32",
            Format::NegativeFixInt(_) => "negative fixint",
            Format::Unsupported(_) => "unsupported",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Unsupported(byte) => write!(f, "unsupported (0x{byte:02x})"),
            other => f.write_str(other.name()),
        }
    }
}
