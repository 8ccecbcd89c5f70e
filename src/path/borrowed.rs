use std::borrow::Cow;
use std::iter::Cloned;
use std::slice::Iter;

use super::{OwnedSegment, ValuePath};

/// A pre-parsed path that borrows its segments, as produced by the
/// [`path!`](crate::path!) macro.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BorrowedPath<'a, 'b> {
    pub segments: &'b [BorrowedSegment<'a>],
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum BorrowedSegment<'a> {
    Field(Cow<'a, str>),
    Index(usize),
    /// A segment that failed lazy parsing. Only produced by the raw string
    /// form of a path; traversal treats it as pointing nowhere.
    Invalid,
}

impl BorrowedSegment<'_> {
    pub const fn field(value: &str) -> BorrowedSegment {
        BorrowedSegment::Field(Cow::Borrowed(value))
    }

    pub fn index(value: usize) -> BorrowedSegment<'static> {
        BorrowedSegment::Index(value)
    }

    pub fn is_field(&self) -> bool {
        matches!(self, BorrowedSegment::Field(_))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, BorrowedSegment::Index(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, BorrowedSegment::Invalid)
    }
}

impl<'a> From<&'a OwnedSegment> for BorrowedSegment<'a> {
    fn from(segment: &'a OwnedSegment) -> Self {
        match segment {
            OwnedSegment::Field(field) => Self::Field(field.as_str().into()),
            OwnedSegment::Index(i) => Self::Index(*i),
        }
    }
}

impl<'a> From<&'a str> for BorrowedSegment<'a> {
    fn from(field: &'a str) -> Self {
        BorrowedSegment::field(field)
    }
}

impl<'a> From<&'a String> for BorrowedSegment<'a> {
    fn from(field: &'a String) -> Self {
        BorrowedSegment::field(field.as_str())
    }
}

impl From<usize> for BorrowedSegment<'_> {
    fn from(index: usize) -> Self {
        BorrowedSegment::index(index)
    }
}

impl<'a, 'b> ValuePath<'a> for BorrowedPath<'a, 'b> {
    type Iter = Cloned<Iter<'b, BorrowedSegment<'a>>>;

    fn segment_iter(&self) -> Self::Iter {
        self.segments.iter().cloned()
    }
}

impl<'a, 'b> ValuePath<'a> for &'b Vec<BorrowedSegment<'a>> {
    type Iter = Cloned<Iter<'b, BorrowedSegment<'a>>>;

    fn segment_iter(&self) -> Self::Iter {
        self.as_slice().iter().cloned()
    }
}
