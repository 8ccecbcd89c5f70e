//! Static descriptions of value structure.
//!
//! A [`Shape`] plays the role a static type plays in languages with
//! type-level path computation: it describes which fields and indices exist
//! at every nesting level, which leaves terminate traversal, and which parts
//! may be absent. Shapes are built once with the constructor methods and
//! never mutated afterwards.
//!
//! Two operations are derived from a shape:
//!
//! - [`Shape::paths`] enumerates every valid path into it, together with the
//!   shape reachable at each path;
//! - [`Shape::bind`] validates one concrete path against it, producing a
//!   [`BoundPath`] whose [`resolve`](BoundPath::resolve) is infallible.
//!
//! Both agree exactly: a path binds if and only if it matches one of the
//! enumerated path templates, and the bound shape equals the enumerated one.

mod bind;
mod paths;

pub use bind::{BindError, BoundPath};
pub use paths::{PathSpec, PathTemplate, TemplateSegment};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::{KeyString, Value};

/// A primitive leaf. Leaves terminate paths: no segment may follow one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "proptest"), derive(proptest_derive::Arbitrary))]
pub enum Leaf {
    /// A string.
    Bytes,
    Integer,
    Float,
    Boolean,
    /// The absence marker itself, for fields that are always null.
    Null,
    /// A value this schema doesn't look into.
    Opaque,
}

/// The static structure of a nested value.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    kind: ShapeKind,
    nullable: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Leaf(Leaf),
    /// A mapping from field name to sub-shape.
    Object(BTreeMap<KeyString, Shape>),
    /// A homogeneous sequence: one element shape for every index.
    Array(Box<Shape>),
    /// A fixed-length heterogeneous sequence: one shape per position.
    Tuple(Vec<Shape>),
}

impl Shape {
    fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn bytes() -> Self {
        Self::new(ShapeKind::Leaf(Leaf::Bytes))
    }

    pub fn integer() -> Self {
        Self::new(ShapeKind::Leaf(Leaf::Integer))
    }

    pub fn float() -> Self {
        Self::new(ShapeKind::Leaf(Leaf::Float))
    }

    pub fn boolean() -> Self {
        Self::new(ShapeKind::Leaf(Leaf::Boolean))
    }

    pub fn null() -> Self {
        Self::new(ShapeKind::Leaf(Leaf::Null))
    }

    pub fn opaque() -> Self {
        Self::new(ShapeKind::Leaf(Leaf::Opaque))
    }

    pub fn object<K: Into<KeyString>>(fields: impl IntoIterator<Item = (K, Shape)>) -> Self {
        Self::new(ShapeKind::Object(
            fields
                .into_iter()
                .map(|(key, shape)| (key.into(), shape))
                .collect(),
        ))
    }

    pub fn array(element: Shape) -> Self {
        Self::new(ShapeKind::Array(Box::new(element)))
    }

    pub fn tuple(positions: impl IntoIterator<Item = Shape>) -> Self {
        Self::new(ShapeKind::Tuple(positions.into_iter().collect()))
    }

    /// Mark this shape nullable: an instance may be `Null` where this shape
    /// is expected. Paths passing through a nullable shape stay valid; the
    /// shape they resolve to is marked nullable instead.
    #[must_use]
    pub fn or_null(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// The name of this shape's kind, for diagnostics.
    #[must_use]
    pub fn kind_str(&self) -> &'static str {
        match &self.kind {
            ShapeKind::Leaf(_) => "leaf",
            ShapeKind::Object(_) => "object",
            ShapeKind::Array(_) => "array",
            ShapeKind::Tuple(_) => "tuple",
        }
    }

    pub(crate) fn is_empty_object(&self) -> bool {
        matches!(&self.kind, ShapeKind::Object(fields) if fields.is_empty())
    }

    /// Structural check that `value` inhabits this shape.
    ///
    /// A nullable shape admits `Null`; a missing object field is admitted
    /// only when the field's shape is nullable; tuples check arity and every
    /// position; arrays check every element.
    #[must_use]
    pub fn conforms(&self, value: &Value) -> bool {
        if value.is_null() {
            return self.nullable || matches!(self.kind, ShapeKind::Leaf(Leaf::Null));
        }

        match (&self.kind, value) {
            (ShapeKind::Leaf(Leaf::Bytes), Value::Bytes(_))
            | (ShapeKind::Leaf(Leaf::Integer), Value::Integer(_))
            | (ShapeKind::Leaf(Leaf::Float), Value::Float(_))
            | (ShapeKind::Leaf(Leaf::Boolean), Value::Boolean(_))
            | (ShapeKind::Leaf(Leaf::Opaque), _) => true,
            (ShapeKind::Object(fields), Value::Object(map)) => {
                fields.iter().all(|(key, shape)| match map.get(key) {
                    Some(value) => shape.conforms(value),
                    None => shape.nullable,
                })
            }
            (ShapeKind::Array(element), Value::Array(values)) => {
                values.iter().all(|value| element.conforms(value))
            }
            (ShapeKind::Tuple(positions), Value::Array(values)) => {
                positions.len() == values.len()
                    && positions
                        .iter()
                        .zip(values)
                        .all(|(shape, value)| shape.conforms(value))
            }
            _ => false,
        }
    }
}
