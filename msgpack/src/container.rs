//! Combinators over [Option] and [Result] used by generated record code.
//!
//! Absent values and failures are the std types. The extension traits only add the
//! operations record code expects on top of them: a checked unwrap that reports through
//! a [Context], and two-armed combinators that produce a new container.

use crate::{Context, Error, ErrorKind};

pub trait OptionExt<T> {
    /// Returns the value, or fails with [ErrorKind::EmptyOption] rendered against
    /// `context`.
    fn must_get(self, context: &Context) -> Result<T, Error>;

    /// Applies `on_some` to a present value or calls `on_none`, yielding a new [Option].
    fn match_with<U>(
        self,
        on_some: impl FnOnce(T) -> Option<U>,
        on_none: impl FnOnce() -> Option<U>,
    ) -> Option<U>;
}

impl<T> OptionExt<T> for Option<T> {
    fn must_get(self, context: &Context) -> Result<T, Error> {
        self.ok_or_else(|| Error::new(ErrorKind::EmptyOption, context))
    }

    fn match_with<U>(
        self,
        on_some: impl FnOnce(T) -> Option<U>,
        on_none: impl FnOnce() -> Option<U>,
    ) -> Option<U> {
        match self {
            Some(value) => on_some(value),
            None => on_none(),
        }
    }
}

pub trait ResultExt<T, E> {
    /// Applies `on_ok` to a success or `on_err` to a failure, yielding a new [Result].
    ///
    /// Either arm may recover or fail, so a failure can be turned into a success and
    /// the other way around.
    fn match_with<U, F>(
        self,
        on_ok: impl FnOnce(T) -> Result<U, F>,
        on_err: impl FnOnce(E) -> Result<U, F>,
    ) -> Result<U, F>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn match_with<U, F>(
        self,
        on_ok: impl FnOnce(T) -> Result<U, F>,
        on_err: impl FnOnce(E) -> Result<U, F>,
    ) -> Result<U, F> {
        match self {
            Ok(value) => on_ok(value),
            Err(err) => on_err(err),
        }
    }
}

/// Builds a [Result] from a value and an optional error; the error wins when present.
pub fn as_result<T, E>(value: T, err: Option<E>) -> Result<T, E> {
    match err {
        Some(err) => Err(err),
        None => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANSWER: i32 = 42;

    #[test]
    fn test_must_get() {
        let context = Context::new("option");
        assert_eq!(Some(ANSWER).must_get(&context).unwrap(), ANSWER);

        let err = None::<i32>.must_get(&context).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EmptyOption);
        assert!(err.message().starts_with("no such element\n  Context: option"));
    }

    #[test]
    fn test_option_match_with() {
        let double = |v: i32| Some(v * 2);
        let reject = |_: i32| None;
        let fallback = || Some(ANSWER);
        let nothing = || None;

        assert_eq!(Some(ANSWER / 2).match_with(double, fallback), Some(ANSWER));
        assert_eq!(Some(ANSWER).match_with(reject, fallback), None);
        assert_eq!(None.match_with(double, fallback), Some(ANSWER));
        assert_eq!(None.match_with(double, nothing), None);
    }

    #[test]
    fn test_result_match_with() {
        let double = |v: i32| Ok::<_, &str>(v * 2);
        let fail = |_: i32| Err("failed");
        let recover = |_: &str| Ok(ANSWER);
        let rethrow = |e| Err(e);

        let ok: Result<i32, &str> = Ok(ANSWER / 2);
        let err: Result<i32, &str> = Err("some error");

        assert_eq!(ok.match_with(double, recover), Ok(ANSWER));
        assert_eq!(ok.match_with(fail, recover), Err("failed"));
        assert_eq!(err.match_with(double, recover), Ok(ANSWER));
        assert_eq!(err.match_with(double, rethrow), Err("some error"));
    }

    #[test]
    fn test_as_result() {
        assert_eq!(as_result(ANSWER, None::<&str>), Ok(ANSWER));
        assert_eq!(as_result(ANSWER, Some("bad")), Err("bad"));
    }
}
