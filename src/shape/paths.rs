use std::fmt::{self, Display, Formatter};

use super::{Shape, ShapeKind};
use crate::path::{OwnedPath, OwnedSegment};
use crate::value::KeyString;

/// One segment of an enumerated path template.
///
/// Homogeneous arrays contribute [`TemplateSegment::AnyIndex`], a
/// placeholder admitting every numeric index; tuples contribute one fixed
/// [`TemplateSegment::Index`] per position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TemplateSegment {
    Field(KeyString),
    Index(usize),
    AnyIndex,
}

impl TemplateSegment {
    fn admits(&self, segment: &OwnedSegment) -> bool {
        match (self, segment) {
            (TemplateSegment::Field(a), OwnedSegment::Field(b)) => a == b,
            (TemplateSegment::Index(a), OwnedSegment::Index(b)) => a == b,
            (TemplateSegment::AnyIndex, OwnedSegment::Index(_)) => true,
            _ => false,
        }
    }
}

impl Display for TemplateSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSegment::Field(field) => write!(f, "{field}"),
            TemplateSegment::Index(index) => write!(f, "{index}"),
            TemplateSegment::AnyIndex => write!(f, "*"),
        }
    }
}

/// An enumerated path pattern. Concrete paths are checked against it with
/// [`matches`](PathTemplate::matches); the `Display` form is the dot-joined
/// notation with `*` for the any-index placeholder.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathTemplate {
    pub segments: Vec<TemplateSegment>,
}

impl PathTemplate {
    #[must_use]
    pub fn matches(&self, path: &OwnedPath) -> bool {
        self.segments.len() == path.segments.len()
            && self
                .segments
                .iter()
                .zip(&path.segments)
                .all(|(template, segment)| template.admits(segment))
    }
}

impl Display for PathTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i != 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// One valid path into a shape, with the shape of the value reachable there.
///
/// `shape.is_nullable()` is true when the target itself is nullable or when
/// any intermediate along the path is, i.e. when resolution may come up
/// absent even for conforming instances.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathSpec {
    pub template: PathTemplate,
    pub shape: Shape,
}

impl Shape {
    /// Enumerate every valid path into this shape.
    ///
    /// Each object field, tuple position, and array element contributes a
    /// segment, and every prefix of a longer path is itself listed, pointing
    /// at the sub-value. Leaves terminate enumeration, and an empty object
    /// contributes no paths at all — not even the segment leading to it.
    #[must_use]
    pub fn paths(&self) -> Vec<PathSpec> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        collect(self, false, &mut prefix, &mut out);
        out
    }
}

fn collect(
    shape: &Shape,
    saw_nullable: bool,
    prefix: &mut Vec<TemplateSegment>,
    out: &mut Vec<PathSpec>,
) {
    let saw_nullable = saw_nullable || shape.is_nullable();

    match shape.kind() {
        ShapeKind::Leaf(_) => {}
        ShapeKind::Object(fields) => {
            for (name, child) in fields {
                descend(
                    child,
                    TemplateSegment::Field(name.clone()),
                    saw_nullable,
                    prefix,
                    out,
                );
            }
        }
        ShapeKind::Array(element) => {
            descend(element, TemplateSegment::AnyIndex, saw_nullable, prefix, out);
        }
        ShapeKind::Tuple(positions) => {
            for (index, child) in positions.iter().enumerate() {
                descend(
                    child,
                    TemplateSegment::Index(index),
                    saw_nullable,
                    prefix,
                    out,
                );
            }
        }
    }
}

fn descend(
    child: &Shape,
    segment: TemplateSegment,
    saw_nullable: bool,
    prefix: &mut Vec<TemplateSegment>,
    out: &mut Vec<PathSpec>,
) {
    if child.is_empty_object() {
        return;
    }

    prefix.push(segment);

    let mut shape = child.clone();
    shape.nullable |= saw_nullable;
    out.push(PathSpec {
        template: PathTemplate {
            segments: prefix.clone(),
        },
        shape,
    });

    collect(child, saw_nullable, prefix, out);
    prefix.pop();
}
