//! Namespaced error registry.
//!
//! A [`Builder`] owns one namespace and a code-keyed store of the errors
//! defined under it. Every error produced or copied through a builder gets
//! the builder's namespace forced onto it, even when the caller supplied a
//! different namespace option (closed-namespace policy). Lookups by code
//! never fail: unknown codes resolve to the builder's fallback error.
//!
//! Registration is single-writer: the registry map takes no internal lock,
//! so concurrent `new_error`/`copy_error` calls on one builder require
//! external synchronization. Shared reads via [`Builder::get`] are safe once
//! registration has quiesced.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::convenience::internal_error;
use crate::definitions;
use crate::options::Options;
use crate::Error;

/// A keyed store of [`Error`] values scoped to one namespace.
///
/// Created once per owning component and passed explicitly; there is no
/// process-wide singleton registry. The registry grows monotonically:
/// re-registering a code overwrites, nothing is ever removed.
///
/// # Example
///
/// ```rust
/// use cairn_errors::Builder;
///
/// let mut errs = Builder::new("auth");
/// let invalid = errs.new_error("E_TOKEN_1", "malformed token");
///
/// assert_eq!(invalid.namespace(), Some("auth"));
/// assert!(errs.get("E_TOKEN_1").is(&invalid));
/// // Unknown codes resolve to the fallback, never to "not found".
/// assert!(errs.get("E_NOPE").is(errs.fallback_error()));
/// ```
#[derive(Debug)]
pub struct Builder {
    registry: HashMap<String, Error>,
    namespace: Cow<'static, str>,
    fallback: Error,
}

impl Builder {
    /// Create a builder with the default fallback: a generic internal error
    /// stamped with this builder's namespace.
    #[inline]
    pub fn new(namespace: impl Into<Cow<'static, str>>) -> Self {
        Self::new_with(namespace, Options::new())
    }

    /// Create a builder, honoring the `fallback_error` option.
    ///
    /// A supplied fallback is copied with its namespace forced to the
    /// builder's, which guarantees [`get`](Self::get) always returns a value
    /// carrying this namespace.
    pub fn new_with(namespace: impl Into<Cow<'static, str>>, options: Options) -> Self {
        let namespace = namespace.into();
        let fallback = options
            .fallback
            .unwrap_or_else(internal_error)
            .copy_with(Options::new().namespace(namespace.clone()));

        Self {
            registry: HashMap::new(),
            namespace,
            fallback,
        }
    }

    /// Construct and register a new error under this builder's namespace.
    ///
    /// # Panics
    ///
    /// Panics if `code` equals the fallback error's code. Shadowing the
    /// fallback would make [`get`](Self::get) ambiguous, so the collision is
    /// treated as a programming mistake, not a runtime condition; the
    /// registry is left untouched.
    #[inline]
    pub fn new_error(
        &mut self,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Error {
        self.new_error_with(code, message, Options::new())
    }

    /// [`new_error`](Self::new_error) with options. The builder's namespace
    /// is applied last, overriding any caller-supplied namespace option.
    ///
    /// # Panics
    ///
    /// Same collision policy as [`new_error`](Self::new_error).
    pub fn new_error_with(
        &mut self,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        options: Options,
    ) -> Error {
        let code = code.into();
        self.reject_fallback_collision(&code);

        let err = Error::new_with(code, message, options.namespace(self.namespace.clone()));
        self.register(err.clone());
        err
    }

    /// Copy an existing error into this builder, forcing the namespace, and
    /// register the copy under its own code.
    ///
    /// # Panics
    ///
    /// Same collision policy as [`new_error`](Self::new_error).
    #[inline]
    pub fn copy_error(&mut self, source: &Error) -> Error {
        self.copy_error_with(source, Options::new())
    }

    /// [`copy_error`](Self::copy_error) with options; namespace forcing and
    /// collision policy as above.
    pub fn copy_error_with(&mut self, source: &Error, options: Options) -> Error {
        self.reject_fallback_collision(source.code());

        let err = source.copy_with(options.namespace(self.namespace.clone()));
        self.register(err.clone());
        err
    }

    /// Look up a registered error by code, falling back to the designated
    /// fallback error for unknown codes. Never fails, never mutates.
    pub fn get(&self, code: &str) -> &Error {
        self.registry.get(code).unwrap_or(&self.fallback)
    }

    /// The namespace forced onto every error this builder produces.
    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The error returned by [`get`](Self::get) for unregistered codes.
    #[inline]
    pub fn fallback_error(&self) -> &Error {
        &self.fallback
    }

    fn reject_fallback_collision(&self, code: &str) {
        if code == self.fallback.code() {
            panic!("{}", definitions::duplicate_fallback_error());
        }
    }

    fn register(&mut self, err: Error) {
        self.registry.insert(err.code().to_owned(), err);
    }
}
