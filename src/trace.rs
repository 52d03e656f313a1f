//! Call-site capture for error traces.
//!
//! Every trace entry records where an error was observed or re-raised, as a
//! `file:line` descriptor. Capture is compile-time via `#[track_caller]`:
//! there is no runtime stack walking, no symbolication, and no dependence on
//! debug info being present in the binary.
//!
//! # Attribution
//!
//! All trace-capturing entry points in this crate are `#[track_caller]`, so
//! the captured location is always the application call site, never a frame
//! inside this library. Helpers layered on top of this crate get the same
//! behavior by annotating themselves with `#[track_caller]`; helpers that
//! cannot (e.g. closures) capture a [`CallSite`] up front and pass it down
//! via [`Options::call_site`](crate::Options::call_site).

use std::fmt;

use smallvec::SmallVec;

/// Ordered trace storage. Inline for the common shallow case.
pub(crate) type TraceList = SmallVec<[CallSite; 4]>;

/// A captured source location, rendered as `file:line`.
///
/// Cheap to copy: two words, no allocation. The file path is the compile-time
/// path of the capturing crate's source file.
///
/// # Example
///
/// ```rust
/// use cairn_errors::CallSite;
///
/// let site = CallSite::caller();
/// assert_eq!(site.file(), file!());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    file: &'static str,
    line: u32,
}

impl CallSite {
    /// Capture the location of the caller of the enclosing function.
    ///
    /// When invoked from another `#[track_caller]` function, attribution
    /// propagates outward to the nearest non-annotated caller. This replaces
    /// frame-skip arithmetic: annotate the helper instead of counting frames.
    #[inline]
    #[track_caller]
    pub fn caller() -> Self {
        let location = core::panic::Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }

    /// Source file of the captured location.
    #[inline]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// 1-based line number of the captured location.
    #[inline]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
