//! Package-level helpers: classify, wrap and trace arbitrary errors.
//!
//! These are the entry points for promoting any `std::error::Error` into the
//! structured model without knowing its type up front. A value that already
//! is a structured [`Error`] is re-traced in place; anything else is wrapped
//! into a fresh [`internal_error`] with the original as its cause.
//!
//! The original's "no error in, no error out" pass-through lives on
//! [`ResultExt`]: `Ok` values flow through untouched, `Err` values are
//! promoted at the call site that observed them.

use std::error::Error as StdError;

use crate::definitions::{INTERNAL_ERROR_CODE, INTERNAL_ERROR_MESSAGE};
use crate::options::Options;
use crate::source::Source;
use crate::trace::CallSite;
use crate::Error;

/// A fresh, un-namespaced generic error: the universal default fallback and
/// the wrapper type for unclassified causes.
///
/// ```rust
/// use cairn_errors::internal_error;
///
/// assert_eq!(internal_error().to_string(), "Internal Error");
/// ```
#[inline]
pub fn internal_error() -> Error {
    Error::new(INTERNAL_ERROR_CODE, INTERNAL_ERROR_MESSAGE)
}

/// Classify `err` and add a trace entry attributed to the caller.
///
/// A structured [`Error`] is re-traced as its own source: its identity and
/// trace history are kept and the new entry is prepended. Any other error is
/// wrapped into [`internal_error`] as the causal error, with one trace entry.
///
/// ```rust
/// use std::io;
/// use cairn_errors::{trace, Error};
///
/// let promoted = trace(io::Error::new(io::ErrorKind::InvalidData, "invalid email format"));
/// assert_eq!(promoted.code(), "ERROR");
/// assert_eq!(promoted.traces().len(), 1);
///
/// let retraced = trace(Error::new("ERR_1", "msg").trace());
/// assert_eq!(retraced.code(), "ERR_1");
/// assert_eq!(retraced.traces().len(), 2);
/// ```
#[track_caller]
pub fn trace<E>(err: E) -> Error
where
    E: StdError + Send + Sync + 'static,
{
    classify_and_trace(Source::new(err), CallSite::caller())
}

/// Shorthand for `internal_error().wrap(err)`.
#[inline]
pub fn wrap<E>(err: E) -> Error
where
    E: StdError + Send + Sync + 'static,
{
    internal_error().wrap(err)
}

fn classify_and_trace(source: Source, site: CallSite) -> Error {
    let base = match source.as_structured() {
        Some(structured) => structured.clone(),
        None => internal_error(),
    };
    base.trace_with(Options::new().source_entry(source).call_site(site))
}

/// Promote the error side of a `Result` into the structured model.
///
/// These are the `Result`-level rendering of the original nil-propagation
/// contract: an `Ok` passes through untouched, so "no error" is preserved
/// along pass-through call chains.
pub trait ResultExt<T> {
    /// Classify and trace the error, attributing the trace entry to this
    /// call site. `Ok` passes through unchanged.
    #[track_caller]
    fn trace(self) -> crate::Result<T>;

    /// Wrap the error into [`internal_error`] without tracing. `Ok` passes
    /// through unchanged.
    fn wrap_internal(self) -> crate::Result<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    #[track_caller]
    fn trace(self) -> crate::Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => {
                // Captured here, not inside a closure, so attribution lands
                // on the application call site.
                let site = CallSite::caller();
                Err(classify_and_trace(Source::new(err), site))
            }
        }
    }

    fn wrap_internal(self) -> crate::Result<T> {
        self.map_err(wrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn generic(message: &str) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, message.to_owned())
    }

    #[test]
    fn internal_error_shape() {
        let err = internal_error();

        assert_eq!(err.code(), "ERROR");
        assert_eq!(err.message(), "Internal Error");
        assert_eq!(err.namespace(), None);
        assert!(err.traces().is_empty());
    }

    #[test]
    fn trace_promotes_generic_error() {
        let err = trace(generic("invalid email format"));
        let expected = line!() - 1;

        assert!(err.is(&internal_error()));
        assert_eq!(err.traces().len(), 1);
        assert_eq!(err.traces()[0].file(), file!());
        assert_eq!(err.traces()[0].line(), expected);
        assert_eq!(err.cause().expect("cause").to_string(), "invalid email format");
    }

    #[test]
    fn trace_retraces_structured_error_in_place() {
        let err = trace(Error::new("ERR_1", "msg").trace());

        assert_eq!(err.code(), "ERR_1");
        assert_eq!(err.traces().len(), 2);
        // Re-tracing itself does not wrap itself as a cause.
        assert!(err.cause().is_none());
    }

    // Each hop adds exactly one entry, newest first.
    fn nested_1() -> Error {
        trace(generic("invalid email format"))
    }

    fn nested_2() -> Error {
        internal_error().trace_with(Options::new().source(nested_1()))
    }

    fn nested_3() -> Error {
        trace(nested_2())
    }

    #[test]
    fn nested_tracing_accumulates_in_reverse_call_order() {
        let err = nested_3();
        let traces = err.traces();

        assert_eq!(traces.len(), 3);
        for site in traces {
            assert_eq!(site.file(), file!());
        }
        // nested_1/2/3 are defined top-down in this file, so newest-first
        // means strictly decreasing line numbers.
        assert!(traces[0].line() > traces[1].line());
        assert!(traces[1].line() > traces[2].line());
    }

    #[test]
    fn wrap_sets_internal_error_identity() {
        let err = wrap(generic("invalid phone format"));

        assert!(err.is(&internal_error()));
        assert_eq!(err.cause().expect("cause").to_string(), "invalid phone format");
    }

    #[test]
    fn result_trace_passes_ok_through() {
        let ok: Result<u32, io::Error> = Ok(7);
        assert_eq!(ok.trace().expect("ok"), 7);
    }

    #[test]
    fn result_trace_promotes_err_at_call_site() {
        let res: Result<(), io::Error> = Err(generic("boom"));
        let err = res.trace().expect_err("err");
        let expected = line!() - 1;

        assert_eq!(err.traces().len(), 1);
        assert_eq!(err.traces()[0].file(), file!());
        assert_eq!(err.traces()[0].line(), expected);
    }

    #[test]
    fn result_wrap_internal() {
        let res: Result<(), io::Error> = Err(generic("boom"));
        let err = res.wrap_internal().expect_err("err");

        assert!(err.is(&internal_error()));
        assert!(err.traces().is_empty());
    }
}
