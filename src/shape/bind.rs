use std::fmt::Write;

use snafu::{ensure, Snafu};

use super::{Shape, ShapeKind};
use crate::path::{parse_path, OwnedPath, OwnedSegment, PathParseError, ValuePath};
use crate::value::Value;

/// The ways a path can fail to bind against a [`Shape`].
///
/// These take the place of the compile-time type errors of a language with
/// type-level path checking: an ill-formed path is rejected here, before any
/// value is touched, and never surfaces as a runtime absence.
#[derive(Clone, Debug, Eq, PartialEq, Snafu)]
pub enum BindError {
    #[snafu(display("{}", source), context(false))]
    Parse { source: PathParseError },

    #[snafu(display("Path contains a malformed segment"))]
    MalformedSegment,

    #[snafu(display("Path is empty"))]
    EmptyPath,

    #[snafu(display("Unknown field {:?} in object at {:?}", field, at))]
    UnknownField { field: String, at: String },

    #[snafu(display("Index {} out of range for tuple of length {} at {:?}", index, len, at))]
    IndexOutOfRange { index: usize, len: usize, at: String },

    #[snafu(display("Segment {:?} cannot descend into {} at {:?}", segment, found, at))]
    SegmentMismatch {
        segment: String,
        found: &'static str,
        at: String,
    },

    #[snafu(display("Path continues past a leaf at {:?}", at))]
    PastLeaf { at: String },

    #[snafu(display("No paths lead into the empty object at {:?}", at))]
    EmptyObject { at: String },
}

/// A path validated against a [`Shape`].
///
/// This is where the original compile-time guarantee lives: a `BoundPath`
/// can only be produced for a path the shape admits, and it carries the
/// shape of the value it reaches, with the nullable flag already folded over
/// every intermediate. [`BoundPath::resolve`] is therefore infallible —
/// absence is its only non-value outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoundPath {
    path: OwnedPath,
    shape: Shape,
}

impl BoundPath {
    #[must_use]
    pub fn path(&self) -> &OwnedPath {
        &self.path
    }

    /// The shape of the value this path reaches. `shape().is_nullable()`
    /// means resolution may yield `None` even for conforming instances.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Walk `value` along this path.
    #[must_use]
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        value.get(&self.path)
    }
}

impl Shape {
    /// Validate a pre-parsed path against this shape.
    ///
    /// Accepts anything path-shaped: `&OwnedPath`, a `path!` literal, or —
    /// with the `string_path` feature — a raw `&str`.
    pub fn bind<'a>(&self, path: impl ValuePath<'a>) -> Result<BoundPath, BindError> {
        let path = path.to_owned_path().map_err(|()| BindError::MalformedSegment)?;
        self.bind_owned(path)
    }

    /// Parse a dot-joined string and validate it against this shape.
    pub fn bind_str(&self, path: &str) -> Result<BoundPath, BindError> {
        let path = parse_path(path)?;
        self.bind_owned(path)
    }

    fn bind_owned(&self, path: OwnedPath) -> Result<BoundPath, BindError> {
        ensure!(!path.is_empty(), EmptyPathSnafu);

        let mut current = self;
        let mut nullable = false;

        for (depth, segment) in path.segments.iter().enumerate() {
            nullable |= current.nullable;
            let at = || prefix_string(&path.segments[..depth]);

            current = match (&current.kind, segment) {
                (ShapeKind::Object(fields), OwnedSegment::Field(name)) => fields
                    .get(name)
                    .ok_or_else(|| BindError::UnknownField {
                        field: name.to_string(),
                        at: at(),
                    })?,
                (ShapeKind::Tuple(positions), OwnedSegment::Index(index)) => positions
                    .get(*index)
                    .ok_or_else(|| BindError::IndexOutOfRange {
                        index: *index,
                        len: positions.len(),
                        at: at(),
                    })?,
                (ShapeKind::Array(element), OwnedSegment::Index(_)) => element,
                (ShapeKind::Leaf(_), _) => return PastLeafSnafu { at: at() }.fail(),
                (_, segment) => {
                    return SegmentMismatchSnafu {
                        segment: segment.to_string(),
                        found: current.kind_str(),
                        at: at(),
                    }
                    .fail()
                }
            };

            ensure!(
                !current.is_empty_object(),
                EmptyObjectSnafu {
                    at: prefix_string(&path.segments[..=depth]),
                }
            );
        }

        nullable |= current.nullable;
        let mut shape = current.clone();
        shape.nullable = nullable;

        tracing::trace!(path = %path, shape = shape.kind_str(), nullable, "bound path");

        Ok(BoundPath { path, shape })
    }
}

/// Render an already-consumed path prefix for error messages. The root (no
/// segments consumed) renders as `"."`.
fn prefix_string(segments: &[OwnedSegment]) -> String {
    if segments.is_empty() {
        return ".".to_owned();
    }

    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i != 0 {
            out.push('.');
        }
        write!(out, "{segment}").expect("could not write to string");
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{owned_path, path};

    fn account() -> Shape {
        Shape::object([
            ("name", Shape::bytes()),
            (
                "address",
                Shape::object([("city", Shape::bytes())]).or_null(),
            ),
            ("pair", Shape::tuple([Shape::bytes(), Shape::integer()])),
            ("tags", Shape::array(Shape::bytes())),
            ("junk", Shape::object(Vec::<(&str, Shape)>::new())),
        ])
    }

    #[test]
    fn binds_valid_paths() {
        let shape = account();

        assert_eq!(shape.bind_str("name").unwrap().shape(), &Shape::bytes());
        assert_eq!(
            shape.bind_str("pair.1").unwrap().shape(),
            &Shape::integer()
        );
        assert_eq!(shape.bind_str("tags.7").unwrap().shape(), &Shape::bytes());
    }

    #[test]
    fn both_notations_bind_identically() {
        let shape = account();

        let by_string = shape.bind_str("address.city").unwrap();
        let by_segments = shape.bind(&owned_path!("address", "city")).unwrap();
        let by_macro = shape.bind(path!("address", "city")).unwrap();

        assert_eq!(by_string, by_segments);
        assert_eq!(by_string, by_macro);
    }

    #[test]
    fn nullable_intermediate_marks_result_possibly_absent() {
        let shape = account();

        let bound = shape.bind_str("address.city").unwrap();
        assert!(bound.shape().is_nullable());

        let bound = shape.bind_str("address").unwrap();
        assert!(bound.shape().is_nullable());

        let bound = shape.bind_str("name").unwrap();
        assert!(!bound.shape().is_nullable());
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert_eq!(
            account().bind_str("nope"),
            Err(BindError::UnknownField {
                field: "nope".into(),
                at: ".".into(),
            })
        );
        assert_eq!(
            account().bind_str("address.street"),
            Err(BindError::UnknownField {
                field: "street".into(),
                at: "address".into(),
            })
        );
    }

    #[test]
    fn tuple_index_one_past_the_end_is_rejected() {
        assert_eq!(
            account().bind_str("pair.2"),
            Err(BindError::IndexOutOfRange {
                index: 2,
                len: 2,
                at: "pair".into(),
            })
        );
    }

    #[test]
    fn segment_kind_mismatch_is_rejected() {
        assert!(matches!(
            account().bind_str("pair.first"),
            Err(BindError::SegmentMismatch { .. })
        ));
        assert!(matches!(
            account().bind_str("address.0"),
            Err(BindError::SegmentMismatch { .. })
        ));
    }

    #[test]
    fn paths_past_leaves_are_rejected() {
        assert_eq!(
            account().bind_str("name.length"),
            Err(BindError::PastLeaf { at: "name".into() })
        );
    }

    #[test]
    fn paths_into_empty_objects_are_rejected() {
        assert_eq!(
            account().bind_str("junk"),
            Err(BindError::EmptyObject { at: "junk".into() })
        );
        assert!(matches!(
            account().bind_str("junk.anything"),
            Err(BindError::EmptyObject { .. })
        ));
    }

    #[test]
    fn malformed_strings_are_parse_errors() {
        assert!(matches!(
            account().bind_str("name..city"),
            Err(BindError::Parse { .. })
        ));
        // `path!` segments are taken verbatim, so binding fails on the
        // unknown field rather than on syntax.
        assert_eq!(
            account().bind(path!("a", "b!")),
            Err(BindError::UnknownField {
                field: "a".into(),
                at: ".".into(),
            })
        );
    }

    #[test]
    fn empty_paths_are_rejected() {
        assert_eq!(
            account().bind(&OwnedPath::from(vec![])),
            Err(BindError::EmptyPath)
        );
    }
}
