//! The structured error value.
//!
//! [`Error`] is immutable by convention: every mutating-looking operation
//! (`copy`, `wrap`, `trace`, `add_metadata`) returns a new value and leaves
//! the receiver untouched. Two errors are "the same error" iff their
//! namespace and code match exactly; message, metadata and trace content
//! never participate in identity.
//!
//! # Display contract
//!
//! The string form is stable and safe to parse from logs:
//!
//! ```text
//! <namespace>: [<code>] <message>        (namespace set)
//! <message>                              (no namespace)
//! [<code>] <message>                     (no namespace, captured as a source)
//! ```
//!
//! followed, in this order, by an optional `"\n  CausedBy => <cause>"` line
//! and an optional `"\n  Traces => <entry>"` block whose continuation lines
//! are indented to align under the first entry.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;

use crate::options::Options;
use crate::source::Source;
use crate::trace::{CallSite, TraceList};

/// Open string-keyed metadata attached to an error.
///
/// Values are intentionally unconstrained ([`serde_json::Value`]); the
/// library attaches no schema or validation to them.
pub type Metadata = BTreeMap<String, Value>;

/// A stable, namespaced, code-identified error value.
///
/// # Properties
///
/// - `code`, `message` and `namespace` are frozen at construction.
/// - Metadata storage is never shared between copies: mutating a copy's
///   metadata cannot affect the original.
/// - Traces are most-recent-first and survive nested wrap/trace chains
///   without loss, duplication or reordering.
/// - `Clone`, `Send` and `Sync`; causal chains are shared behind `Arc`.
///
/// # Example
///
/// ```rust
/// use cairn_errors::Error;
///
/// let err = Error::new("ERR_1", "Invalid input");
/// assert_eq!(err.to_string(), "Invalid input");
/// assert_eq!(err.code(), "ERR_1");
/// ```
#[must_use = "errors should be handled or logged"]
#[derive(Debug, Clone)]
pub struct Error {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    namespace: Option<Cow<'static, str>>,
    metadata: Metadata,
    traces: TraceList,
    source: Option<Source>,
    is_source: bool,
}

impl Error {
    /// Construct a new error with empty metadata, no traces and no
    /// namespace.
    ///
    /// Code and message content is not validated; any string, including the
    /// empty string, is accepted.
    #[inline]
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new_with(code, message, Options::new())
    }

    /// Construct a new error, honoring the `namespace` and `metadata`
    /// options. Other options are ignored here.
    pub fn new_with(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        options: Options,
    ) -> Self {
        let mut err = Self {
            code: code.into(),
            message: message.into(),
            namespace: None,
            metadata: Metadata::new(),
            traces: TraceList::new(),
            source: None,
            is_source: false,
        };

        if let Some(namespace) = options.namespace.filter(|ns| !ns.is_empty()) {
            err.namespace = Some(namespace);
        }
        if !options.metadata.is_empty() {
            err.metadata = options.metadata;
        }

        err
    }

    /// Duplicate this error with a cleared trace list.
    ///
    /// The copy shares code, message, namespace and causal source with the
    /// receiver. Metadata is deep-duplicated, so the copy's map can be
    /// mutated without affecting the receiver. Trace history does not
    /// survive a plain copy.
    #[inline]
    pub fn copy(&self) -> Self {
        self.copy_with(Options::new())
    }

    /// [`copy`](Self::copy), honoring the `namespace` option (override) and
    /// the `metadata` option (wholesale replacement when non-empty).
    pub fn copy_with(&self, options: Options) -> Self {
        let mut err = Self {
            code: self.code.clone(),
            message: self.message.clone(),
            namespace: self.namespace.clone(),
            metadata: Metadata::new(),
            traces: TraceList::new(),
            source: self.source.clone(),
            is_source: false,
        };

        if let Some(namespace) = options.namespace.filter(|ns| !ns.is_empty()) {
            err.namespace = Some(namespace);
        }
        err.metadata = if options.metadata.is_empty() {
            self.metadata.clone()
        } else {
            options.metadata
        };

        err
    }

    /// Copy this error and install `source` as its causal error.
    ///
    /// "No error in, no error out" pass-through lives at the `Result` level:
    /// see [`ResultExt`](crate::ResultExt).
    pub fn wrap<E>(&self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.wrap_source(Source::new(source))
    }

    pub(crate) fn wrap_source(&self, source: Source) -> Self {
        let mut err = self.copy();
        err.source = Some(source);
        err
    }

    /// Capture a trace entry at the caller's location.
    ///
    /// Without a source option this behaves like [`copy`](Self::copy) plus
    /// prepending the new entry to the receiver's existing trace history;
    /// prior entries are preserved, never dropped.
    #[inline]
    #[track_caller]
    pub fn trace(&self) -> Self {
        self.trace_with(Options::new())
    }

    /// Capture a trace entry, honoring `source`, `metadata` and `call_site`
    /// options.
    ///
    /// Behavior branches on the supplied source:
    ///
    /// - **No source**: copy the receiver and inherit its own traces.
    /// - **Source is the same logical error** (namespace + code match,
    ///   anywhere in the source's causal chain): treated as a re-trace, not
    ///   a new cause. The receiver's code/message/namespace are kept, the
    ///   source chain's trace history is pulled forward, and no causal
    ///   wrapping occurs.
    /// - **Source is a different structured error carrying traces**: its
    ///   trace list is transplanted onto the result, the source itself is
    ///   left trace-less and marked as having been captured as a source,
    ///   and it becomes the causal error.
    /// - **Source is a generic error**: wrapped as the causal error
    ///   directly; there is no trace list to move.
    ///
    /// In every branch the newly captured entry goes first, followed by the
    /// inherited entries. Metadata from the options is merged
    /// (insert-or-overwrite) after trace assembly.
    #[track_caller]
    pub fn trace_with(&self, options: Options) -> Self {
        let site = match options.call_site {
            Some(site) => site,
            None => CallSite::caller(),
        };

        let (mut err, inherited) = self.wrap_and_trace(options.source);

        let mut traces = TraceList::new();
        traces.push(site);
        traces.extend(inherited);
        err.traces = traces;

        for (key, value) in options.metadata {
            err.metadata.insert(key, value);
        }

        err
    }

    fn wrap_and_trace(&self, source: Option<Source>) -> (Self, TraceList) {
        let Some(source) = source else {
            return (self.copy(), self.traces.clone());
        };

        if source.is(self) {
            // Re-trace of the same logical error: keep self, pull the trace
            // history forward from the first structured error in the chain.
            let inherited = source
                .first_structured()
                .map(|err| err.traces.clone())
                .unwrap_or_default();
            return (self.copy(), inherited);
        }

        match source {
            Source::Structured(mut inner) if !inner.traces.is_empty() => {
                let inherited = std::mem::take(&mut inner.traces);
                inner.is_source = true;
                (self.wrap_source(Source::Structured(inner)), inherited)
            }
            other => (self.wrap_source(other), TraceList::new()),
        }
    }

    /// Copy this error and set one metadata entry on the copy.
    pub fn add_metadata(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut err = self.copy();
        err.metadata.insert(key.into(), value.into());
        err
    }

    /// Identity comparison: namespace + code, transitively through this
    /// error's own causal chain.
    ///
    /// Message, metadata and trace content never participate.
    ///
    /// ```rust
    /// use cairn_errors::Error;
    ///
    /// let expected = Error::new("ERR_1", "fullName is required");
    /// let actual = Error::new("ERR_1", "different message");
    /// assert!(actual.is(&expected));
    ///
    /// let wrapped = Error::new("ERROR", "Internal Error").wrap(expected.clone());
    /// assert!(wrapped.is(&expected));
    /// ```
    pub fn is(&self, expected: &Error) -> bool {
        if self.same_identity(expected) {
            return true;
        }
        match &self.source {
            Some(source) => source.is(expected),
            None => false,
        }
    }

    #[inline]
    pub(crate) fn same_identity(&self, other: &Error) -> bool {
        self.namespace == other.namespace && self.code == other.code
    }

    /// Short stable identifier for this error kind.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The namespace scoping this error to its owning component, if any.
    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Human-readable message text.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attached metadata.
    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Captured call sites, most recent first.
    #[inline]
    pub fn traces(&self) -> &[CallSite] {
        &self.traces
    }

    /// The immediate causal error, if any.
    ///
    /// Equivalent chain-walking is available to generic inspection utilities
    /// through the [`std::error::Error::source`] implementation.
    #[inline]
    pub fn cause(&self) -> Option<&Source> {
        self.source.as_ref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}: [{}] {}", namespace, self.code, self.message)?,
            None if self.is_source => write!(f, "[{}] {}", self.code, self.message)?,
            None => f.write_str(&self.message)?,
        }

        if let Some(source) = &self.source {
            write!(f, "\n  CausedBy => {}", source)?;
        }

        if !self.traces.is_empty() {
            f.write_str("\n  Traces => ")?;
            for (i, site) in self.traces.iter().enumerate() {
                if i > 0 {
                    f.write_str("\n            ")?;
                }
                write!(f, "{}", site)?;
            }
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(Source::as_dyn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convenience::internal_error;
    use std::io;

    fn generic(message: &str) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, message.to_owned())
    }

    #[test]
    fn new_error_displays_message_only() {
        let err = Error::new("ERR_1", "Invalid input");
        assert_eq!(err.to_string(), "Invalid input");
    }

    #[test]
    fn new_error_with_namespace_displays_full_form() {
        let err = Error::new_with("ERR_1", "Invalid input", Options::new().namespace("myapp"));
        assert_eq!(err.to_string(), "myapp: [ERR_1] Invalid input");
    }

    #[test]
    fn copy_overrides_namespace_and_metadata() {
        let err = internal_error().copy_with(
            Options::new()
                .namespace("myapp")
                .add_metadata("httpStatus", 500),
        );

        assert_eq!(err.to_string(), "myapp: [ERROR] Internal Error");
        assert_eq!(err.metadata()["httpStatus"], 500);
    }

    #[test]
    fn empty_namespace_option_is_not_applied() {
        let err = Error::new_with("ERR_1", "msg", Options::new().namespace(""));
        assert_eq!(err.namespace(), None);

        // An empty override cancels an earlier pending one.
        let cleared = Error::new_with("ERR_1", "msg", Options::new().namespace("kept").namespace(""));
        assert_eq!(cleared.namespace(), None);
    }

    #[test]
    fn copy_with_empty_namespace_keeps_receiver_namespace() {
        let base = Error::new_with("ERR_1", "msg", Options::new().namespace("myapp"));
        let copied = base.copy_with(Options::new().namespace(""));
        assert_eq!(copied.namespace(), Some("myapp"));
    }

    #[test]
    fn copy_duplicates_existing_metadata() {
        let err = Error::new_with(
            "ERR_1",
            "Invalid input",
            Options::new().add_metadata("httpStatus", 400),
        );
        let copied = err.copy();

        assert_eq!(copied.metadata()["httpStatus"], 400);
    }

    #[test]
    fn copy_does_not_share_metadata_storage() {
        let err = Error::new("ERR_1", "Invalid input");
        let mutated = err.add_metadata("httpStatus", 400);

        assert!(err.metadata().is_empty());
        assert_eq!(mutated.metadata()["httpStatus"], 400);
    }

    #[test]
    fn copy_clears_traces() {
        let traced = Error::new("ERR_1", "Invalid input").trace();
        assert_eq!(traced.traces().len(), 1);
        assert!(traced.copy().traces().is_empty());
    }

    #[test]
    fn trace_attributes_to_caller() {
        let err = internal_error().trace();
        let expected = line!() - 1;

        assert_eq!(err.traces().len(), 1);
        assert_eq!(err.traces()[0].file(), file!());
        assert_eq!(err.traces()[0].line(), expected);
    }

    #[test]
    fn trace_without_source_preserves_history() {
        let once = Error::new("ERR_1", "Invalid input").trace();
        let twice = once.trace();

        assert_eq!(twice.traces().len(), 2);
        assert_eq!(twice.traces()[1], once.traces()[0]);
    }

    #[test]
    fn trace_with_same_error_source_pulls_traces_forward() {
        let base = internal_error();
        let traced = base.trace();
        let retraced = base.trace_with(Options::new().source(traced.clone()));

        assert_eq!(retraced.traces().len(), 2);
        assert_eq!(retraced.traces()[1], traced.traces()[0]);
        // A re-trace of the same logical error does not wrap it as a cause.
        assert!(retraced.cause().is_none());
    }

    #[test]
    fn trace_transplants_traces_from_different_source() {
        let inner = Error::new("ERR_1", "validation failed").trace();
        let inner_site = inner.traces()[0];

        let outer = internal_error().trace_with(Options::new().source(inner));

        assert_eq!(outer.traces().len(), 2);
        assert_eq!(outer.traces()[1], inner_site);

        // The moved-in source was left trace-less and marked as a source,
        // which switches its un-namespaced rendering to "[code] message".
        let cause = outer.cause().expect("cause").as_structured().expect("structured");
        assert!(cause.traces().is_empty());
        assert_eq!(cause.to_string(), "[ERR_1] validation failed");
    }

    #[test]
    fn trace_wraps_generic_source_directly() {
        let err = internal_error().trace_with(Options::new().source(generic("invalid email format")));

        assert_eq!(err.traces().len(), 1);
        let cause = err.cause().expect("cause");
        assert!(cause.as_structured().is_none());
        assert_eq!(cause.to_string(), "invalid email format");
    }

    #[test]
    fn trace_merges_options_metadata() {
        let base = Error::new_with("ERR_1", "msg", Options::new().add_metadata("kept", 1));
        let traced = base.trace_with(Options::new().add_metadata("added", 2));

        assert_eq!(traced.metadata()["kept"], 1);
        assert_eq!(traced.metadata()["added"], 2);
        assert!(!base.metadata().contains_key("added"));
    }

    #[test]
    fn display_orders_cause_before_traces() {
        let err = internal_error().trace_with(Options::new().source(generic("invalid phone format")));

        let rendered = err.to_string();
        let lines: Vec<&str> = rendered.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Internal Error");
        assert_eq!(lines[1], "  CausedBy => invalid phone format");
        assert!(lines[2].starts_with("  Traces => "));
        assert!(lines[2].ends_with(&format!(":{}", err.traces()[0].line())));
    }

    #[test]
    fn display_indents_trace_continuations() {
        let err = Error::new("ERR_1", "msg").trace().trace();

        let rendered = err.to_string();
        let lines: Vec<&str> = rendered.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("  Traces => "));
        assert!(lines[2].starts_with("            "));
    }

    #[test]
    fn wrap_sets_cause_and_unwraps() {
        let err = internal_error().wrap(generic("invalid phone format"));

        let source = StdError::source(&err).expect("source");
        let io_err = source.downcast_ref::<io::Error>().expect("io::Error");
        assert_eq!(io_err.to_string(), "invalid phone format");
    }

    #[test]
    fn is_matches_identical_namespace_and_code() {
        let expected = Error::new("ERR_1", "fullName is required");
        let actual = Error::new("ERR_1", "fullName is required");
        assert!(actual.is(&expected));
    }

    #[test]
    fn is_ignores_message_metadata_and_traces() {
        let expected = Error::new("ERR_1", "one message");
        let actual = Error::new("ERR_1", "another message")
            .add_metadata("k", "v")
            .trace();
        assert!(actual.is(&expected));
    }

    #[test]
    fn is_matches_through_wrapped_chain() {
        let expected = Error::new("ERR_1", "fullName is required");
        let actual = internal_error().wrap(expected.clone());
        assert!(actual.is(&expected));
    }

    #[test]
    fn is_rejects_differing_namespace_or_code() {
        let base = Error::new("ERR_1", "msg");

        assert!(!Error::new("ERR_2", "msg").is(&base));
        assert!(!Error::new_with("ERR_1", "msg", Options::new().namespace("other")).is(&base));
    }

    #[test]
    fn message_accessor() {
        let err = Error::new("ERR_1", "malformed token");
        assert_eq!(err.message(), "malformed token");
    }

    #[test]
    fn empty_code_and_message_are_accepted() {
        let err = Error::new("", "");
        assert_eq!(err.code(), "");
        assert_eq!(err.to_string(), "");
    }
}
