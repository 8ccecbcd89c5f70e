use std::fmt::{self, Display, Formatter, Write};
use std::str::FromStr;

use once_cell::sync::Lazy;
#[cfg(any(test, feature = "proptest"))]
use proptest::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{parse_path, BorrowedSegment, PathParseError, ValuePath};
use crate::value::KeyString;

/// A pre-parsed lookup path: the canonical, segment-list representation.
///
/// The dot-string notation is a formatting layer over this type: `Display`
/// renders it, [`parse_path`] and `FromStr` produce it. Paths hold at least
/// one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnedPath {
    pub segments: Vec<OwnedSegment>,
}

impl OwnedPath {
    pub fn single_field(field: &str) -> Self {
        vec![OwnedSegment::field(field)].into()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push_field(&mut self, field: &str) {
        self.segments.push(OwnedSegment::field(field));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(OwnedSegment::index(index));
    }

    pub fn push_segment(&mut self, segment: OwnedSegment) {
        self.segments.push(segment);
    }

    pub fn with_field_appended(&self, field: &str) -> Self {
        let mut new_path = self.clone();
        new_path.push_field(field);
        new_path
    }

    pub fn with_index_appended(&self, index: usize) -> Self {
        let mut new_path = self.clone();
        new_path.push_index(index);
        new_path
    }
}

impl From<Vec<OwnedSegment>> for OwnedPath {
    fn from(segments: Vec<OwnedSegment>) -> Self {
        Self { segments }
    }
}

impl Display for OwnedPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from(self))
    }
}

impl FromStr for OwnedPath {
    type Err = PathParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        parse_path(src)
    }
}

impl TryFrom<String> for OwnedPath {
    type Error = PathParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl From<OwnedPath> for String {
    fn from(owned: OwnedPath) -> Self {
        Self::from(&owned)
    }
}

impl From<&OwnedPath> for String {
    fn from(owned: &OwnedPath) -> Self {
        let mut output = String::new();
        for (i, segment) in owned.segments.iter().enumerate() {
            if i != 0 {
                output.push('.');
            }
            match segment {
                OwnedSegment::Field(field) => output.push_str(field.as_str()),
                OwnedSegment::Index(index) => {
                    write!(output, "{index}").expect("could not write to string");
                }
            }
        }
        output
    }
}

/// One step of a path: a field name or a numeric index.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OwnedSegment {
    Field(KeyString),
    Index(usize),
}

impl OwnedSegment {
    pub fn field(value: &str) -> OwnedSegment {
        OwnedSegment::Field(value.into())
    }

    pub fn index(value: usize) -> OwnedSegment {
        OwnedSegment::Index(value)
    }

    pub fn is_field(&self) -> bool {
        matches!(self, OwnedSegment::Field(_))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, OwnedSegment::Index(_))
    }
}

impl<'a> From<&'a str> for OwnedSegment {
    fn from(field: &'a str) -> Self {
        OwnedSegment::field(field)
    }
}

impl<'a> From<&'a String> for OwnedSegment {
    fn from(field: &'a String) -> Self {
        OwnedSegment::field(field.as_str())
    }
}

impl From<KeyString> for OwnedSegment {
    fn from(field: KeyString) -> Self {
        OwnedSegment::Field(field)
    }
}

impl From<usize> for OwnedSegment {
    fn from(index: usize) -> Self {
        OwnedSegment::index(index)
    }
}

impl Display for OwnedSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OwnedSegment::Index(i) => write!(f, "{i}"),
            OwnedSegment::Field(field) => write!(f, "{field}"),
        }
    }
}

impl<'a> TryFrom<BorrowedSegment<'a>> for OwnedSegment {
    type Error = ();

    fn try_from(segment: BorrowedSegment<'a>) -> Result<Self, Self::Error> {
        match segment {
            BorrowedSegment::Invalid => Err(()),
            BorrowedSegment::Index(i) => Ok(OwnedSegment::Index(i)),
            BorrowedSegment::Field(field) => Ok(OwnedSegment::Field(field.into())),
        }
    }
}

impl<'a> ValuePath<'a> for &'a Vec<OwnedSegment> {
    type Iter = OwnedSegmentSliceIter<'a>;

    fn segment_iter(&self) -> Self::Iter {
        OwnedSegmentSliceIter(self.iter())
    }
}

impl<'a> ValuePath<'a> for &'a [OwnedSegment] {
    type Iter = OwnedSegmentSliceIter<'a>;

    fn segment_iter(&self) -> Self::Iter {
        OwnedSegmentSliceIter(self.iter())
    }
}

impl<'a> ValuePath<'a> for &'a OwnedPath {
    type Iter = OwnedSegmentSliceIter<'a>;

    fn segment_iter(&self) -> Self::Iter {
        (&self.segments).segment_iter()
    }
}

#[derive(Clone)]
pub struct OwnedSegmentSliceIter<'a>(std::slice::Iter<'a, OwnedSegment>);

impl<'a> Iterator for OwnedSegmentSliceIter<'a> {
    type Item = BorrowedSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(BorrowedSegment::from)
    }
}

static VALID_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[0-9]*[a-zA-Z_@][0-9a-zA-Z_@]*$").expect("valid regex"));

/// Whether `field` is a legal field token in the dot-string notation.
/// All-digit tokens are indices, so a field must contain at least one
/// non-digit character.
pub(super) fn is_valid_field(field: &str) -> bool {
    VALID_FIELD.is_match(field)
}

// Generated fields stay within the dot-notation grammar so that every
// generated path survives a format/parse round trip.
#[cfg(any(test, feature = "proptest"))]
impl Arbitrary for OwnedSegment {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        prop_oneof![
            "[0-9]{0,2}[a-zA-Z_@][0-9a-zA-Z_@]{0,8}"
                .prop_map(|field| OwnedSegment::Field(field.into())),
            (0..20usize).prop_map(OwnedSegment::Index),
        ]
        .boxed()
    }
}

// OwnedPath values must have at least one segment.
#[cfg(any(test, feature = "proptest"))]
impl Arbitrary for OwnedPath {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        prop::collection::vec(any::<OwnedSegment>(), 1..10)
            .prop_map(|segments| OwnedPath { segments })
            .boxed()
    }
}
