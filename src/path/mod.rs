//! This module contains all of the logic for paths.
//!
//! A path points at a specific location inside of a nested
//! [`Value`](crate::value::Value): an ordered, non-empty sequence of
//! segments, where each segment is either a field name (for objects) or a
//! numeric index (for arrays and tuples).
//!
//! # Notations
//! The same abstract path can be written two ways, and both resolve
//! identically:
//!
//! - a dot-joined string: `"a.b.c"`, `"pair.0"`;
//! - a segment list: `owned_path!("a", "b", "c")`, `owned_path!("pair", 0)`.
//!
//! The segment list is the canonical representation. The dot-string form is
//! purely a parsing/formatting layer over it: [`parse_path`] turns a string
//! into an [`OwnedPath`], and `Display` renders it back.
//!
//! # Owned paths
//! [`OwnedPath`] is a pre-parsed path. Parsing happens once, up front, and
//! the segments are heap allocated, so owned paths should be preferred when
//! they can be created outside of a hot loop and stored for re-use.
//!
//! # String paths
//! Behind the (default) `string_path` feature, [`ValuePath`] is implemented
//! for [`&str`], so a raw string can be used as a path directly. Segments
//! are then parsed lazily as the path is traversed, and a malformed token
//! surfaces as [`BorrowedSegment::Invalid`] rather than an upfront error.
//! This exists for convenience; pre-parsed paths catch mistakes earlier.
//!
//! # Macros
//! [`path!`](crate::path!) builds a zero-allocation [`BorrowedPath`] from
//! literal segments, and [`owned_path!`](crate::owned_path!) builds an
//! [`OwnedPath`]. The macros do not parse: each argument is one segment.

use snafu::Snafu;

pub use borrowed::{BorrowedPath, BorrowedSegment};
pub use owned::{OwnedPath, OwnedSegment};

mod borrowed;
mod dot;
mod owned;

#[derive(Clone, Debug, Eq, PartialEq, Snafu)]
pub enum PathParseError {
    #[snafu(display("Invalid path {:?}", path))]
    InvalidPathSyntax { path: String },
}

/// Syntactic sugar for creating a pre-parsed borrowed path.
///
/// Example: `path!("pair", 0)` is the pre-parsed path of `pair.0`
#[macro_export]
macro_rules! path {
    ($($segment:expr),+) => { $crate::path::BorrowedPath {
        segments: &[$($crate::path::BorrowedSegment::from($segment),)+],
    }};
}

/// Syntactic sugar for creating a pre-parsed owned path.
///
/// This allocates and will be slower than using `path!`. Prefer that when
/// possible.
///
/// Example: `owned_path!("pair", 0)` is the pre-parsed path of `pair.0`
#[macro_export]
macro_rules! owned_path {
    ($($segment:expr),+) => {{
        $crate::path::OwnedPath::from(vec![$($crate::path::OwnedSegment::from($segment),)+])
    }};
}

/// Pre-parse a dot-joined string into the canonical segment form.
///
/// A token consisting solely of digits is an index segment; a token matching
/// `[0-9]*[a-zA-Z_@][0-9a-zA-Z_@]*` is a field segment. Anything else —
/// including an empty token, which also covers the empty string — is a parse
/// error, since a path must have at least one segment.
pub fn parse_path(path: &str) -> Result<OwnedPath, PathParseError> {
    dot::DotPath::new(path).to_owned_path().map_err(|()| {
        tracing::trace!(path, "rejected malformed path");
        PathParseError::InvalidPathSyntax {
            path: path.to_owned(),
        }
    })
}

/// A path is simply the data describing how to look up a field from a value.
/// This should only be implemented for types that are very cheap to clone,
/// such as references.
pub trait ValuePath<'a>: Clone {
    type Iter: Iterator<Item = BorrowedSegment<'a>> + Clone;

    /// Iterates over the raw "Borrowed" segments.
    fn segment_iter(&self) -> Self::Iter;

    fn eq(&self, other: impl ValuePath<'a>) -> bool {
        self.segment_iter().eq(other.segment_iter())
    }

    #[allow(clippy::result_unit_err)]
    fn to_owned_path(&self) -> Result<OwnedPath, ()> {
        self.segment_iter()
            .map(OwnedSegment::try_from)
            .collect::<Result<Vec<OwnedSegment>, ()>>()
            .map(OwnedPath::from)
    }
}

#[cfg(any(feature = "string_path", test))]
impl<'a> ValuePath<'a> for &'a str {
    type Iter = dot::DotPathIter<'a>;

    fn segment_iter(&self) -> Self::Iter {
        dot::DotPath::new(self).segment_iter()
    }
}
