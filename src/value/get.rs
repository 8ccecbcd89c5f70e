use crate::path::{BorrowedSegment, ValuePath};

use crate::value::Value;

impl Value {
    /// Walk this value along `path`, one segment per level.
    ///
    /// This is a short-circuiting fold with optional-chaining semantics: the
    /// moment an intermediate is absent — `Null`, a missing field, an
    /// out-of-range index, or a segment kind that doesn't match the value —
    /// the walk stops and the whole lookup is `None`. A `Null` sitting at
    /// the very end of the path is reported as `None` too: absence is one
    /// outcome, however the walk arrives at it.
    ///
    /// No path validation happens here. Pair with
    /// [`Shape::bind`](crate::shape::Shape::bind) to establish up front that
    /// a path is valid for a value's shape.
    pub fn get<'a, 'b>(&'a self, path: impl ValuePath<'b>) -> Option<&'a Value> {
        let mut current = self;
        for segment in path.segment_iter() {
            current = match (current, segment) {
                (Value::Object(map), BorrowedSegment::Field(field)) => map.get(field.as_ref())?,
                (Value::Array(array), BorrowedSegment::Index(index)) => array.get(index)?,
                _ => return None,
            };
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }
}
