//! # Cairn Errors
//!
//! Structured, namespaced, code-identified error values with causal chains,
//! call-site traces and open metadata.
//!
//! ## Design Philosophy
//!
//! 1. **Errors are compared by identity**, never by message text: two values
//!    are the same error iff their namespace and code match.
//! 2. **Error values are immutable by convention**: every mutating-looking
//!    operation returns a new value and leaves the receiver untouched.
//! 3. **Trace history survives nesting**: wrap-and-trace chains merge
//!    call-site entries newest-first, without loss or duplication.
//! 4. **Registries never miss**: a namespace builder resolves unknown codes
//!    to its fallback error instead of failing.
//! 5. **No I/O, no global state**: builders are plain values, passed
//!    explicitly; every operation is a bounded synchronous computation.
//!
//! ## Quick Start
//!
//! ```rust
//! use cairn_errors::Builder;
//!
//! // One builder per owning component, constructed once.
//! let mut errs = Builder::new("auth");
//! let token_expired = errs.new_error("E_TOKEN_1", "token expired");
//!
//! // Later, somewhere a failure is observed:
//! let err = token_expired.trace();
//!
//! assert!(err.is(&token_expired));
//! assert_eq!(err.namespace(), Some("auth"));
//! println!("{err}");
//! // auth: [E_TOKEN_1] token expired
//! //   Traces => src/lib.rs:9
//! ```
//!
//! ## Promoting foreign errors
//!
//! ```rust
//! use std::io;
//! use cairn_errors::{Result, ResultExt};
//!
//! fn read_config() -> Result<String> {
//!     // Err is classified, wrapped and traced; Ok passes through untouched.
//!     std::str::from_utf8(b"threshold=3")
//!         .map(str::to_owned)
//!         .trace()
//! }
//!
//! assert_eq!(read_config().unwrap(), "threshold=3");
//! ```
//!
//! ## Display contract
//!
//! The string form is stable: `"<namespace>: [<code>] <message>"` when a
//! namespace is set, else the bare message (or `"[<code>] <message>"` for a
//! value captured as someone else's source), followed by an optional
//! `CausedBy` line and then an optional `Traces` block, in that order.
//!
//! ## Concurrency
//!
//! [`Error`] is `Clone + Send + Sync` with value semantics; causal chains
//! are shared behind `Arc`. [`Builder`] registration is single-writer by
//! design: concurrent `new_error`/`copy_error` calls on one builder require
//! external synchronization, while shared reads via [`Builder::get`] are
//! safe once registration has quiesced.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::result;

pub mod builder;
pub mod convenience;
pub mod definitions;
pub mod error;
pub mod options;
pub mod source;
pub mod trace;

pub use builder::Builder;
pub use convenience::{internal_error, trace, wrap, ResultExt};
pub use error::{Error, Metadata};
pub use options::Options;
pub use source::Source;
pub use trace::CallSite;

/// Type alias for Results carrying a structured [`Error`].
pub type Result<T> = result::Result<T, Error>;
