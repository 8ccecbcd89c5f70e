use std::str::Split;

use super::owned::is_valid_field;
use super::{BorrowedSegment, ValuePath};

/// An unparsed dot-joined path. Segments are parsed as they are iterated
/// over, so a malformed token is only noticed when the walk reaches it.
#[derive(Clone, Debug)]
pub(super) struct DotPath<'a> {
    path: &'a str,
}

impl<'a> DotPath<'a> {
    pub(super) fn new(path: &'a str) -> Self {
        Self { path }
    }
}

impl<'a> ValuePath<'a> for DotPath<'a> {
    type Iter = DotPathIter<'a>;

    fn segment_iter(&self) -> Self::Iter {
        DotPathIter {
            tokens: self.path.split('.'),
        }
    }
}

/// Iterator over the lazily parsed segments of a dot-joined string.
#[derive(Clone)]
pub struct DotPathIter<'a> {
    tokens: Split<'a, char>,
}

impl<'a> Iterator for DotPathIter<'a> {
    type Item = BorrowedSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next().map(parse_token)
    }
}

fn parse_token(token: &str) -> BorrowedSegment<'_> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        match token.parse::<usize>() {
            Ok(index) => BorrowedSegment::Index(index),
            Err(_) => BorrowedSegment::Invalid,
        }
    } else if is_valid_field(token) {
        BorrowedSegment::Field(token.into())
    } else {
        BorrowedSegment::Invalid
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_tokens() {
        let segments: Vec<_> = DotPath::new("foo.0.b@r").segment_iter().collect();
        assert_eq!(
            segments,
            vec![
                BorrowedSegment::field("foo"),
                BorrowedSegment::index(0),
                BorrowedSegment::field("b@r"),
            ]
        );
    }

    #[test]
    fn flags_malformed_tokens() {
        let segments: Vec<_> = DotPath::new("foo..bar").segment_iter().collect();
        assert_eq!(
            segments,
            vec![
                BorrowedSegment::field("foo"),
                BorrowedSegment::Invalid,
                BorrowedSegment::field("bar"),
            ]
        );

        assert!(DotPath::new("foo bar")
            .segment_iter()
            .any(|segment| segment.is_invalid()));
    }
}
