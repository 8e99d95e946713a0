//! Diagnostic context for locating failures inside nested values.
//!
//! Generated record code pushes a [Frame] before reading or writing each named field and
//! pops it afterwards. When an operation fails, the frames that are still pushed describe
//! the path from the outermost value to the failing field.

use crate::{Error, ErrorKind};
use std::fmt;

/// Spaces added per nesting level when rendering.
const INDENT: usize = 2;

/// A single (field, type, note) entry on the [Context] stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub field: String,
    pub ty: String,
    pub note: String,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.ty)?;
        if !self.note.is_empty() {
            write!(f, " >> {}", self.note)?;
        }
        Ok(())
    }
}

/// A stack of [Frame]s plus a description of the operation as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Context {
    description: String,
    frames: Vec<Frame>,
}

impl Context {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            frames: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in push order (outermost first).
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn push(
        &mut self,
        field: impl Into<String>,
        ty: impl Into<String>,
        note: impl Into<String>,
    ) {
        self.frames.push(Frame {
            field: field.into(),
            ty: ty.into(),
            note: note.into(),
        });
    }

    /// Removes the most recent frame and returns it rendered as `field: type >> note`.
    ///
    /// An empty stack means the caller's pushes and pops are unbalanced.
    pub fn pop(&mut self) -> Result<String, Error> {
        match self.frames.pop() {
            Some(frame) => Ok(frame.to_string()),
            None => Err(Error::new(ErrorKind::EmptyDiagnosticStack, self)),
        }
    }

    /// Renders `message` followed by the context, one level indented.
    pub fn print_with_context(&self, message: &str) -> String {
        let mut out = String::with_capacity(message.len() + 64);
        out.push_str(message);
        out.push('\n');
        self.render(&mut out, 1);
        out
    }

    fn render(&self, out: &mut String, mut level: usize) {
        push_indent(out, level);
        out.push_str("Context: ");
        out.push_str(&self.description);
        level += 1;

        if self.frames.is_empty() {
            out.push('\n');
            push_indent(out, level);
            out.push_str("context stack is empty");
            return;
        }

        // Most recent frame first, each one nested one level deeper
        for frame in self.frames.iter().rev() {
            out.push('\n');
            push_indent(out, level);
            out.push_str("at ");
            out.push_str(&frame.to_string());
            level += 1;
        }
    }
}

fn push_indent(out: &mut String, level: usize) {
    out.extend(std::iter::repeat(' ').take(level * INDENT));
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(&mut out, 0);
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push() {
        let mut context = Context::new("some description");
        assert!(context.is_empty());
        assert_eq!(context.len(), 0);

        context.push("property", "string", "");
        context.push("property", "i32", "");
        context.push("property", "bool", "");

        assert!(!context.is_empty());
        assert_eq!(context.len(), 3);

        let types: Vec<&str> = context.frames().iter().map(|f| f.ty.as_str()).collect();
        assert_eq!(types, ["string", "i32", "bool"]);
        assert_eq!(
            context.frames()[2],
            Frame {
                field: "property".into(),
                ty: "bool".into(),
                note: String::new(),
            }
        );
    }

    #[test]
    fn test_pop_renders_frame() {
        let mut context = Context::new("pop");
        context.push("first", "u8", "");
        context.push("second", "string", "writing property");
        assert_eq!(context.pop().unwrap(), "second: string >> writing property");
        assert_eq!(context.pop().unwrap(), "first: u8");
        assert!(context.is_empty());
    }

    #[test]
    fn test_pop_empty() {
        let mut context = Context::new("unbalanced");
        let err = context.pop().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EmptyDiagnosticStack);
        assert!(err.message().ends_with("context stack is empty"));
    }

    #[test]
    fn test_print_with_context() {
        let mut context = Context::new("Deserializing module-type: Query");
        context.push("obj", "Record", "");
        context.push("field", "i32", "");
        let rendered = context.print_with_context("boom");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            [
                "boom",
                "  Context: Deserializing module-type: Query",
                "    at field: i32",
                "      at obj: Record",
            ]
        );
    }

    #[test]
    fn test_display_empty() {
        let context = Context::new("nothing");
        assert_eq!(
            context.to_string(),
            "Context: nothing\n  context stack is empty"
        );
    }
}
