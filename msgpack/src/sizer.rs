//! Exact encoded-length calculation without producing any output.

use crate::{Context, Writer};
use paste::paste;
use std::mem::size_of;

// Fixed-width sinks only contribute their width
macro_rules! impl_count {
    ($type:ident) => {
        paste! {
            #[inline]
            fn [<put_ $type>](&mut self, _: $type) {
                self.len += size_of::<$type>();
            }
        }
    };
}

/// A [Writer] that only counts the bytes an [crate::Encoder] would produce.
///
/// Since both run the same provided [Writer] operations, the count always equals the
/// length of the encoding of the same sequence of writes.
#[derive(Debug)]
pub struct SizeCounter {
    context: Context,
    len: usize,
}

impl SizeCounter {
    pub fn new(context: Context) -> Self {
        Self { context, len: 0 }
    }

    /// Bytes counted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Writer for SizeCounter {
    fn context(&self) -> &Context {
        &self.context
    }

    fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    #[inline]
    fn put_u8(&mut self, _: u8) {
        self.len += 1;
    }

    #[inline]
    fn put_slice(&mut self, value: &[u8]) {
        self.len += value.len();
    }

    impl_count!(u16);
    impl_count!(u32);
    impl_count!(u64);
    impl_count!(i8);
    impl_count!(i16);
    impl_count!(i32);
    impl_count!(i64);
    impl_count!(f32);
    impl_count!(f64);
}
