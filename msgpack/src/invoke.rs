//! Dispatch of encoded method calls at the module boundary.
//!
//! The host hands a module a method name and a buffer of encoded arguments. A [Module]
//! routes the call to the registered [Handler] and turns every outcome into a value:
//! the encoded result on success, or a message describing the failure. Nothing unwinds
//! past [Module::invoke].
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use wrap_msgpack::{
//!     invoke::{decode_args, encode_result, Invocation, Module},
//!     Encode, Error,
//! };
//!
//! fn double(args: &[u8]) -> Result<Bytes, Error> {
//!     let value: u32 = decode_args("double", args)?;
//!     encode_result("double", &(value * 2))
//! }
//!
//! let mut module = Module::new();
//! module.register("double", double);
//!
//! let args = 21u32.encode("args").unwrap();
//! let result = module.invoke(&Invocation::new("double", args)).unwrap();
//! assert_eq!(result.as_ref(), &[42]);
//!
//! let err = module.invoke(&Invocation::new("triple", Bytes::new())).unwrap_err();
//! assert_eq!(err, "Could not find invoke function \"triple\"");
//! ```

use crate::{Decode, Encode, Error, Read, Write};
use bytes::Bytes;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Handles one method: decodes its arguments and returns its encoded result.
pub type Handler = fn(&[u8]) -> Result<Bytes, Error>;

/// A method call received from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub method: String,
    pub args: Bytes,
}

impl Invocation {
    pub fn new(method: impl Into<String>, args: impl Into<Bytes>) -> Self {
        Self {
            method: method.into(),
            args: args.into(),
        }
    }
}

/// Registry of the methods a module exports.
#[derive(Clone, Default)]
pub struct Module {
    handlers: HashMap<String, Handler>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `method`, replacing any previous handler.
    pub fn register(&mut self, method: impl Into<String>, handler: Handler) {
        let method = method.into();
        if self.handlers.insert(method.clone(), handler).is_some() {
            warn!(%method, "replaced invoke handler");
        }
    }

    pub fn contains(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// Runs the handler registered for the invocation's method.
    pub fn invoke(&self, invocation: &Invocation) -> Result<Bytes, String> {
        let method = invocation.method.as_str();
        let Some(handler) = self.handlers.get(method) else {
            warn!(method, "unknown invoke function");
            return Err(format!("Could not find invoke function \"{method}\""));
        };

        debug!(method, args = invocation.args.len(), "invoking");
        match handler(&invocation.args) {
            Ok(result) => {
                debug!(method, len = result.len(), "invoke succeeded");
                Ok(result)
            }
            Err(err) => {
                debug!(method, kind = %err.kind(), "invoke failed");
                Err(err.to_string())
            }
        }
    }
}

/// Decodes a method's arguments, requiring the whole buffer to be consumed.
pub fn decode_args<T: Read>(method: &str, args: &[u8]) -> Result<T, Error> {
    T::decode(&format!("Deserializing module-type: {method}"), args)
}

/// Encodes a method's return value.
pub fn encode_result<T: Write + ?Sized>(method: &str, result: &T) -> Result<Bytes, Error> {
    result.encode(&format!("Serializing (encoding) module-type: {method}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decoder, ErrorKind, Writer};

    fn echo(args: &[u8]) -> Result<Bytes, Error> {
        let value: String = decode_args("echo", args)?;
        encode_result("echo", value.as_str())
    }

    fn strict(args: &[u8]) -> Result<Bytes, Error> {
        let value: Option<u8> = decode_args("strict", args)?;
        let mut decoder = Decoder::new(crate::Context::new("strict"), &[]);
        decoder.context_mut().push("value", "u8", "type found, reading property");
        let value = decoder.require(value, "value", "UInt8")?;
        encode_result("strict", &value)
    }

    fn module() -> Module {
        let mut module = Module::new();
        module.register("echo", echo);
        module.register("strict", strict);
        module
    }

    #[test]
    fn test_invoke_round_trip() {
        let args = "hello".encode("args").unwrap();
        let result = module().invoke(&Invocation::new("echo", args)).unwrap();
        assert_eq!(String::decode("result", &result).unwrap(), "hello");
    }

    #[test]
    fn test_contains() {
        let module = module();
        assert!(module.contains("echo"));
        assert!(!module.contains("missing"));
    }

    #[test]
    fn test_unknown_method() {
        let err = module()
            .invoke(&Invocation::new("missing", Bytes::new()))
            .unwrap_err();
        assert_eq!(err, "Could not find invoke function \"missing\"");
    }

    #[test]
    fn test_handler_failure_is_a_value() {
        // Arguments of the wrong type
        let args = true.encode("args").unwrap();
        let err = module().invoke(&Invocation::new("echo", args)).unwrap_err();
        let mut lines = err.lines();
        assert_eq!(
            lines.next(),
            Some("Property must be of type 'string'. Found 'bool'.")
        );
        assert_eq!(
            lines.next(),
            Some("  Context: Deserializing module-type: echo")
        );

        // Missing required value
        let args = Bytes::from_static(&[0xc0]);
        let err = module().invoke(&Invocation::new("strict", args)).unwrap_err();
        assert!(err.starts_with("Missing required property: 'value: UInt8'"));
        assert!(err.ends_with("at value: u8 >> type found, reading property"));
    }

    #[test]
    fn test_trailing_arguments_rejected() {
        let mut encoder = crate::Encoder::new(crate::Context::new("args"));
        encoder.write_string("hi");
        encoder.write_nil();
        let err = decode_args::<String>("echo", encoder.buffer()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ExtraData(1));
    }

    #[test]
    fn test_register_replaces() {
        let mut module = module();
        module.register("echo", strict);
        let args = Bytes::from_static(&[0x07]);
        let result = module.invoke(&Invocation::new("echo", args)).unwrap();
        assert_eq!(result.as_ref(), &[0x07]);
    }
}
