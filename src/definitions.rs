//! Package-level error definitions.
//!
//! The crate reserves one namespace, `cairn`, for errors about the error
//! machinery itself. Application namespaces are whatever [`Builder`]s the
//! application constructs; nothing here is registered globally.
//!
//! [`Builder`]: crate::Builder

use crate::options::Options;
use crate::Error;

/// Namespace stamped on the crate's own errors.
pub const PKG_NAMESPACE: &str = "cairn";

/// Code of the generic internal error produced by
/// [`internal_error`](crate::internal_error).
pub const INTERNAL_ERROR_CODE: &str = "ERROR";

/// Message of the generic internal error.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Error";

/// Code of the fallback-collision error raised by
/// [`Builder`](crate::Builder) registration.
pub const DUPLICATE_FALLBACK_CODE: &str = "ERR_1";

/// The fatal signal raised when a builder is asked to register an error
/// whose code collides with its fallback error's code.
///
/// This is the payload of the panic: a registration collision is a
/// programming-time configuration mistake, never a runtime condition.
pub fn duplicate_fallback_error() -> Error {
    Error::new_with(
        DUPLICATE_FALLBACK_CODE,
        "Cannot create new Error that has same code with Fallback Error",
        Options::new().namespace(PKG_NAMESPACE),
    )
}
