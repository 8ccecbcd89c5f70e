//! End-to-end coverage: enumeration, binding, and resolution working
//! together over one realistic shape.

use dotpath::{owned_path, value, BindError, OwnedPath, OwnedSegment, Shape, TemplateSegment, Value};
use proptest::prelude::*;

fn event_shape() -> Shape {
    Shape::object([
        ("message", Shape::bytes()),
        ("count", Shape::integer()),
        (
            "source",
            Shape::object([
                ("host", Shape::bytes()),
                (
                    "geo",
                    Shape::object([("city", Shape::bytes()), ("lat", Shape::float())]).or_null(),
                ),
            ]),
        ),
        ("tags", Shape::array(Shape::bytes())),
        ("window", Shape::tuple([Shape::integer(), Shape::integer()])),
    ])
}

fn event() -> Value {
    value!({
        message: "connected",
        count: 3,
        source: {
            host: "web-1",
            geo: {city: "lyon", lat: 45.76}
        },
        tags: ["prod", "edge"],
        window: [10, 20]
    })
}

/// Expand a template into concrete paths, instantiating the any-index
/// placeholder with a few indices.
fn concretize(segments: &[TemplateSegment]) -> Vec<OwnedPath> {
    let mut paths = vec![vec![]];
    for segment in segments {
        let choices: Vec<OwnedSegment> = match segment {
            TemplateSegment::Field(field) => vec![OwnedSegment::Field(field.clone())],
            TemplateSegment::Index(index) => vec![OwnedSegment::Index(*index)],
            TemplateSegment::AnyIndex => vec![OwnedSegment::Index(0), OwnedSegment::Index(1)],
        };
        paths = paths
            .iter()
            .flat_map(|path| {
                choices.iter().map(move |choice| {
                    let mut path = path.clone();
                    path.push(choice.clone());
                    path
                })
            })
            .collect();
    }
    paths.into_iter().map(OwnedPath::from).collect()
}

#[test]
fn string_and_segment_forms_resolve_identically() {
    let shape = event_shape();
    let instance = event();

    for spec in shape.paths() {
        for path in concretize(&spec.template.segments) {
            let by_segments = shape.bind(&path).unwrap();
            let by_string = shape.bind_str(&path.to_string()).unwrap();

            assert_eq!(by_segments, by_string, "path {path}");
            assert_eq!(
                by_segments.resolve(&instance),
                by_string.resolve(&instance),
                "path {path}"
            );
        }
    }
}

#[test]
fn binding_agrees_with_enumeration() {
    let shape = event_shape();
    let specs = shape.paths();

    for spec in &specs {
        for path in concretize(&spec.template.segments) {
            let bound = shape.bind(&path).unwrap();
            assert_eq!(bound.shape(), &spec.shape, "path {path}");
        }
    }
}

proptest! {
    // Random paths over the fixture's vocabulary: a path binds exactly when
    // some enumerated template matches it, and the bound shape is the
    // matching template's shape.
    #[test]
    fn random_paths_bind_iff_enumerated(segments in prop::collection::vec(
        prop_oneof![
            prop::sample::select(vec![
                "message", "count", "source", "host", "geo", "city", "lat",
                "tags", "window", "bogus",
            ])
            .prop_map(OwnedSegment::field),
            (0..4usize).prop_map(OwnedSegment::index),
        ],
        1..5,
    )) {
        let shape = event_shape();
        let path = OwnedPath::from(segments);
        let matching = shape
            .paths()
            .into_iter()
            .find(|spec| spec.template.matches(&path));

        match shape.bind(&path) {
            Ok(bound) => {
                let spec = matching.expect("bound path must be enumerated");
                prop_assert_eq!(bound.shape(), &spec.shape);
            }
            Err(_) => prop_assert!(matching.is_none()),
        }
    }
}

#[test]
fn populated_non_nullable_chains_never_absent() {
    let shape = event_shape();
    let instance = event();

    for spec in shape.paths() {
        if spec.shape.is_nullable() {
            continue;
        }
        // Fields are fully populated and both sequence fields have two
        // elements, so every non-nullable concrete path must hit a value.
        for path in concretize(&spec.template.segments) {
            let bound = shape.bind(&path).unwrap();
            assert!(bound.resolve(&instance).is_some(), "path {path}");
        }
    }
}

#[test]
fn nullable_intermediate_yields_absent_and_marks_the_type() {
    let shape = Shape::object([(
        "a",
        Shape::object([(
            "b",
            Shape::object([("c", Shape::bytes())]).or_null(),
        )]),
    )]);

    let bound = shape.bind_str("a.b.c").unwrap();
    // The possibly-absent annotation is a property of the path, independent
    // of any particular instance.
    assert!(bound.shape().is_nullable());

    let missing = value!({a: {b: null}});
    assert_eq!(bound.resolve(&missing), None);

    let populated = value!({a: {b: {c: "hi"}}});
    assert_eq!(bound.resolve(&populated), Some(&value!("hi")));
}

#[test]
fn single_segment_path_resolves_top_level_field() {
    let shape = event_shape();
    let instance = event();

    let bound = shape.bind_str("count").unwrap();
    assert_eq!(bound.resolve(&instance), Some(&value!(3)));
}

#[test]
fn fixed_tuple_enumerates_exactly_its_positions() {
    let shape = Shape::tuple([Shape::bytes(), Shape::integer()]);

    let rendered: Vec<String> = shape
        .paths()
        .iter()
        .map(|spec| spec.template.to_string())
        .collect();
    assert_eq!(rendered, vec!["0", "1"]);

    // One past the end is a binding error, not a silent absence.
    assert_eq!(
        shape.bind_str("2"),
        Err(BindError::IndexOutOfRange {
            index: 2,
            len: 2,
            at: ".".into(),
        })
    );

    let instance = value!(["hi", 42]);
    assert_eq!(
        shape.bind_str("0").unwrap().resolve(&instance),
        Some(&value!("hi"))
    );
    assert_eq!(
        shape.bind(&owned_path!(1)).unwrap().resolve(&instance),
        Some(&value!(42))
    );
}

#[test]
fn dotted_scenario_from_both_notations() {
    let shape = Shape::object([(
        "a",
        Shape::object([("b", Shape::object([("c", Shape::bytes())]))]),
    )]);
    let instance = value!({a: {b: {c: "hi"}}});

    let by_string = shape.bind_str("a.b.c").unwrap();
    let by_segments = shape.bind(&owned_path!("a", "b", "c")).unwrap();

    assert_eq!(by_string.resolve(&instance), Some(&value!("hi")));
    assert_eq!(by_segments.resolve(&instance), Some(&value!("hi")));
}

#[test]
fn resolves_instances_built_from_json() {
    let shape = event_shape();
    let instance = Value::from(serde_json::json!({
        "message": "connected",
        "count": 3,
        "source": {"host": "web-1", "geo": null},
        "tags": ["prod"],
        "window": [10, 20]
    }));

    assert!(shape.conforms(&instance));

    let geo_city = shape.bind_str("source.geo.city").unwrap();
    assert!(geo_city.shape().is_nullable());
    assert_eq!(geo_city.resolve(&instance), None);

    let host = shape.bind_str("source.host").unwrap();
    assert_eq!(host.resolve(&instance), Some(&value!("web-1")));
}

#[test]
fn repeated_resolution_is_stable() {
    let shape = event_shape();
    let instance = event();
    let bound = shape.bind_str("source.geo.lat").unwrap();

    assert_eq!(bound.resolve(&instance), bound.resolve(&instance));
}
