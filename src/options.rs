//! Optional named parameters for error construction and transformation.
//!
//! [`Options`] is an ephemeral configuration value: start from
//! [`Options::new`] (all defaults) and chain the recognized setters. Each
//! operation (`new_with`, `copy_with`, `trace_with`, `Builder::new_with`)
//! consumes the options it understands and ignores the rest.
//!
//! # Recognized options
//!
//! | Setter             | Consumed by                     | Effect                                   |
//! |--------------------|---------------------------------|------------------------------------------|
//! | [`namespace`]      | construct, copy, builder        | overrides the namespace                  |
//! | [`metadata`]       | construct, copy (replace); trace (merge) | metadata map                     |
//! | [`add_metadata`]   | same as `metadata`              | single-entry metadata patch              |
//! | [`source`]         | trace                           | causal error                             |
//! | [`fallback_error`] | builder construction            | registry fallback                        |
//! | [`call_site`]      | trace                           | explicit pre-captured location           |
//!
//! [`namespace`]: Options::namespace
//! [`metadata`]: Options::metadata
//! [`add_metadata`]: Options::add_metadata
//! [`source`]: Options::source
//! [`fallback_error`]: Options::fallback_error
//! [`call_site`]: Options::call_site

use std::borrow::Cow;
use std::error::Error as StdError;

use serde_json::Value;

use crate::error::Metadata;
use crate::source::Source;
use crate::trace::CallSite;
use crate::Error;

/// Optional parameters, built by chaining setters over defaults.
///
/// # Example
///
/// ```rust
/// use cairn_errors::{Error, Options};
///
/// let err = Error::new_with(
///     "E_AUTH_1",
///     "token expired",
///     Options::new()
///         .namespace("auth")
///         .add_metadata("httpStatus", 401),
/// );
///
/// assert_eq!(err.namespace(), Some("auth"));
/// assert_eq!(err.metadata()["httpStatus"], 401);
/// ```
#[derive(Debug, Default)]
pub struct Options {
    pub(crate) namespace: Option<Cow<'static, str>>,
    pub(crate) metadata: Metadata,
    pub(crate) source: Option<Source>,
    pub(crate) fallback: Option<Error>,
    pub(crate) call_site: Option<CallSite>,
}

impl Options {
    /// All defaults: no namespace override, empty metadata patch, no source,
    /// no fallback, no call-site override.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the namespace of the produced error.
    ///
    /// The last value supplied wins unconditionally, which is what lets a
    /// [`Builder`](crate::Builder) force its own namespace over any
    /// caller-supplied one. An empty string means "no namespace": it is
    /// skipped when the option is applied, so an empty override leaves a new
    /// error un-namespaced and cancels any earlier pending override.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<Cow<'static, str>>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Supply a full metadata map.
    ///
    /// Construction and copy treat a non-empty map as a wholesale
    /// replacement; trace merges it entry by entry into the result.
    #[must_use]
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add a single metadata entry to the patch.
    #[must_use]
    pub fn add_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Supply the causal error for a trace operation.
    ///
    /// Accepts any standard error; values of this crate's [`Error`] type are
    /// recognized and get their trace history merged or transplanted by
    /// [`Error::trace_with`].
    #[must_use]
    pub fn source<E>(self, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source_entry(Source::new(err))
    }

    /// Supply a pre-classified source. Used by the package helpers, which
    /// classify the error themselves before dispatching.
    #[must_use]
    pub(crate) fn source_entry(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Designate the fallback error for a [`Builder`](crate::Builder).
    ///
    /// Only consumed at builder construction; ignored everywhere else.
    #[must_use]
    pub fn fallback_error(mut self, err: Error) -> Self {
        self.fallback = Some(err);
        self
    }

    /// Attribute the captured trace entry to an explicit, pre-captured
    /// location instead of the immediate caller.
    ///
    /// This is the escape hatch for helper layers that cannot carry
    /// `#[track_caller]` themselves (closures, trait objects): capture
    /// [`CallSite::caller`] at the boundary you want attributed and pass it
    /// down.
    #[must_use]
    pub fn call_site(mut self, site: CallSite) -> Self {
        self.call_site = Some(site);
        self
    }
}
