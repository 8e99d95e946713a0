//! Error types for codec operations

use crate::{format::Format, Context};
use thiserror::Error;
use tracing::debug;

/// The reason an operation failed, without the diagnostic path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("unexpected end of buffer")]
    BufferUnderrun,
    #[error("Property must be of type '{expected}'. Found '{found}'.")]
    TypeMismatch {
        expected: &'static str,
        found: Format,
    },
    #[error("integer overflow: value = {value}; bits = {bits}")]
    IntegerOverflow { value: i128, bits: u32 },
    #[error("unsigned integer cannot be negative: value = {0}")]
    NegativeUnsigned(i64),
    #[error("Missing required property: '{field}: {ty}'")]
    MissingRequiredField { field: String, ty: String },
    #[error("unparsable big integer: {0}")]
    UnparsableBigInt(String),
    #[error("unparsable JSON: {0}")]
    UnparsableJson(String),
    #[error("tried to pop an item from an empty Context stack")]
    EmptyDiagnosticStack,
    #[error("no such element")]
    EmptyOption,
    #[error("invalid UTF-8 in string payload")]
    InvalidUtf8,
    #[error("invalid length: {0}")]
    InvalidLength(usize),
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
}

/// An [ErrorKind] rendered against the [Context] that was active when it was raised.
///
/// The message has the form:
///
/// ```text
/// <kind message>
///   Context: <description>
///     at <field>: <type> >> <note>
///       at <outer field>: <type> >> <note>
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    /// Renders `kind` with the frames currently pushed onto `context`.
    pub fn new(kind: ErrorKind, context: &Context) -> Self {
        debug!(
            description = context.description(),
            depth = context.len(),
            %kind,
            "codec failure"
        );
        let message = context.print_with_context(&kind.to_string());
        Self { kind, message }
    }

    /// The failure reason.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The full multi-line message, including the diagnostic path.
    pub fn message(&self) -> &str {
        &self.message
    }
}
