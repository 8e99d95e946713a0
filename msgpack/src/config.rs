//! Limits applied while decoding untrusted input.
//!
//! Every variable-length value (string, bytes, array, map) declares its length up front.
//! A [Config] bounds each declared length before anything is allocated for it.

use core::ops::{Bound, RangeBounds};

/// Configuration for limiting the range of a value.
///
/// # Examples
///
/// ```
/// use wrap_msgpack::RangeCfg;
///
/// let cfg = RangeCfg::new(0..=1024);
/// assert!(cfg.contains(&500));
/// assert!(!cfg.contains(&2000));
///
/// let cfg_min = RangeCfg::from(1..);
/// assert!(cfg_min.contains(&1));
/// assert!(!cfg_min.contains(&0));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RangeCfg<T: Copy + PartialOrd = usize> {
    start: Bound<T>,
    end: Bound<T>,
}

impl<T: Copy + PartialOrd> From<core::ops::Range<T>> for RangeCfg<T> {
    fn from(r: core::ops::Range<T>) -> Self {
        Self::new(r)
    }
}

impl<T: Copy + PartialOrd> From<core::ops::RangeInclusive<T>> for RangeCfg<T> {
    fn from(r: core::ops::RangeInclusive<T>) -> Self {
        Self::new(r)
    }
}

impl<T: Copy + PartialOrd> From<core::ops::RangeFrom<T>> for RangeCfg<T> {
    fn from(r: core::ops::RangeFrom<T>) -> Self {
        Self::new(r)
    }
}

impl<T: Copy + PartialOrd> From<core::ops::RangeToInclusive<T>> for RangeCfg<T> {
    fn from(r: core::ops::RangeToInclusive<T>) -> Self {
        Self::new(r)
    }
}

impl<T: Copy + PartialOrd> From<core::ops::RangeFull> for RangeCfg<T> {
    fn from(_: core::ops::RangeFull) -> Self {
        Self::new(..)
    }
}

impl<T: Copy + PartialOrd> RangeCfg<T> {
    pub fn new(r: impl RangeBounds<T>) -> Self {
        RangeCfg {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Returns true if the value is within this range.
    pub fn contains(&self, value: &T) -> bool {
        match &self.start {
            Bound::Included(s) if value < s => return false,
            Bound::Excluded(s) if value <= s => return false,
            _ => {}
        }
        match &self.end {
            Bound::Included(e) if value > e => return false,
            Bound::Excluded(e) if value >= e => return false,
            _ => {}
        }
        true
    }
}

impl<T: Copy + PartialOrd> RangeBounds<T> for RangeCfg<T> {
    fn start_bound(&self) -> Bound<&T> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&T> {
        self.end.as_ref()
    }
}

/// Per-kind length limits for a [crate::Decoder].
///
/// The default accepts any length the wire format can express.
///
/// ```
/// use wrap_msgpack::Config;
///
/// let cfg = Config::default().with_max_string(256).with_max_array(1024);
/// assert!(cfg.string.contains(&256));
/// assert!(!cfg.array.contains(&1025));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    pub string: RangeCfg,
    pub bytes: RangeCfg,
    pub array: RangeCfg,
    pub map: RangeCfg,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            string: (..).into(),
            bytes: (..).into(),
            array: (..).into(),
            map: (..).into(),
        }
    }
}

impl Config {
    pub fn with_max_string(mut self, max: usize) -> Self {
        self.string = (..=max).into();
        self
    }

    pub fn with_max_bytes(mut self, max: usize) -> Self {
        self.bytes = (..=max).into();
        self
    }

    pub fn with_max_array(mut self, max: usize) -> Self {
        self.array = (..=max).into();
        self
    }

    pub fn with_max_map(mut self, max: usize) -> Self {
        self.map = (..=max).into();
        self
    }
}
