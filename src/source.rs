//! Causal-chain representation.
//!
//! A [`Source`] is the error that caused the current one. It distinguishes
//! structured [`Error`](crate::Error) causes (whose traces and identity the
//! trace algorithm inspects) from arbitrary `std::error::Error` causes, which
//! are carried opaquely behind an `Arc` so chains stay cheap to clone.
//!
//! Chain walking uses the standard `Error::source()` links, so identity
//! matching works through causes wrapped by foreign error types too.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::Error;

/// The causal error captured by a wrap or trace operation.
#[derive(Debug, Clone)]
pub enum Source {
    /// A structured error from this crate. Boxed to keep the chain owned and
    /// its traces movable during trace transplantation.
    Structured(Box<Error>),
    /// Any other error type, held behind `Arc` so copies of the wrapping
    /// error share one cause.
    Dynamic(Arc<dyn StdError + Send + Sync + 'static>),
}

impl Source {
    /// Classify an arbitrary error into a `Source`.
    ///
    /// A value that is (or boxes down to) this crate's [`Error`] becomes
    /// [`Source::Structured`]; anything else is carried as
    /// [`Source::Dynamic`].
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = Box::new(err);
        match boxed.downcast::<Error>() {
            Ok(structured) => Self::Structured(structured),
            Err(other) => Self::Dynamic(Arc::from(other)),
        }
    }

    /// The structured error, if this source is one.
    #[inline]
    pub fn as_structured(&self) -> Option<&Error> {
        match self {
            Self::Structured(err) => Some(err),
            Self::Dynamic(_) => None,
        }
    }

    /// View this source as a standard error trait object for chain walking.
    #[inline]
    pub fn as_dyn(&self) -> &(dyn StdError + 'static) {
        match self {
            Self::Structured(err) => err.as_ref(),
            Self::Dynamic(err) => err.as_ref(),
        }
    }

    /// Whether `expected` matches, by namespace + code identity, this source
    /// or anything deeper in its causal chain.
    pub fn is(&self, expected: &Error) -> bool {
        let mut current: Option<&(dyn StdError + 'static)> = Some(self.as_dyn());
        while let Some(err) = current {
            if let Some(structured) = err.downcast_ref::<Error>() {
                if structured.same_identity(expected) {
                    return true;
                }
            }
            current = err.source();
        }
        false
    }

    /// The first structured error found in this source's causal chain.
    ///
    /// This is what a same-identity re-trace pulls trace history from.
    pub(crate) fn first_structured(&self) -> Option<&Error> {
        let mut current: Option<&(dyn StdError + 'static)> = Some(self.as_dyn());
        while let Some(err) = current {
            if let Some(structured) = err.downcast_ref::<Error>() {
                return Some(structured);
            }
            current = err.source();
        }
        None
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured(err) => fmt::Display::fmt(err, f),
            Self::Dynamic(err) => fmt::Display::fmt(err, f),
        }
    }
}
