//! Schema-checked dotted-path lookup into nested values.
//!
//! A [`Shape`] describes the static structure of a nested value: objects with
//! named fields, homogeneous arrays, fixed-length tuples, and primitive
//! leaves, any of which may be marked nullable. From a shape, every valid
//! access path can be enumerated ([`Shape::paths`]), and a concrete path can
//! be validated against it ([`Shape::bind`]), yielding a [`BoundPath`] that
//! knows the shape of the value it reaches, including whether that value may
//! be absent because some intermediate along the way is nullable.
//!
//! Resolution itself never fails: walking a bound path over a [`Value`] is a
//! short-circuiting fold with optional-chaining semantics, where any absent
//! intermediate yields `None` for the whole lookup.
//!
//! Paths have two equivalent notations, a dot-joined string and a segment
//! list, and both resolve identically:
//!
//! ```rust
//! use dotpath::{owned_path, value, Shape};
//!
//! let shape = Shape::object([(
//!     "a",
//!     Shape::object([("b", Shape::object([("c", Shape::bytes())]))]),
//! )]);
//! let instance = value!({a: {b: {c: "hi"}}});
//!
//! let by_string = shape.bind_str("a.b.c").unwrap();
//! let by_segments = shape.bind(&owned_path!("a", "b", "c")).unwrap();
//!
//! assert_eq!(by_string.resolve(&instance), Some(&value!("hi")));
//! assert_eq!(by_string.resolve(&instance), by_segments.resolve(&instance));
//! ```

#![deny(clippy::all)]
#![deny(unused_allocation)]
#![deny(unused_extern_crates)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![allow(clippy::module_name_repetitions)]

pub mod path;
pub mod shape;
pub mod value;

pub use path::{parse_path, OwnedPath, OwnedSegment, PathParseError, ValuePath};
pub use shape::{BindError, BoundPath, Leaf, PathSpec, PathTemplate, Shape, TemplateSegment};
pub use value::{KeyString, ObjectMap, Value};
