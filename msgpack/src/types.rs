//! Codec implementations for common types
//!
//! | Rust type                 | Wire representation                         |
//! |---------------------------|---------------------------------------------|
//! | `bool`                    | `true` / `false`                            |
//! | `u8`..`u64`, `i8`..`i64`  | smallest integer form holding the value     |
//! | `f32`, `f64`              | `float32`, `float64`                        |
//! | `String`, `str`           | `str`                                       |
//! | `Bytes`                   | `bin`, or `nil` when empty                  |
//! | `Vec<T>`, `[T]`           | `array`, or `nil` when empty                |
//! | `IndexMap<K, V>`          | `map`, keys sorted on write                 |
//! | `Option<T>`               | `nil` for `None`, otherwise `T`             |
//! | `BigInt`                  | decimal text in a `str`                     |
//! | `serde_json::Value`       | compact JSON text in a `str`                |

mod bytes;
mod collections;
mod extended;
mod primitives;
