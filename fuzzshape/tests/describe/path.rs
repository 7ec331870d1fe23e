use std::collections::HashMap;

use facet::Facet;
use fuzzshape::path::{Label, ValuePath};

#[derive(Facet, Debug, Default)]
struct Link {
    value: i32,
    next: Option<Box<Link>>,
}

#[derive(Facet, Debug)]
#[repr(u8)]
#[allow(dead_code)]
enum Figure {
    Circle { radius: f64 },
    Dot,
}

fn next_path() -> ValuePath {
    ValuePath::root()
        .extend(Link::SHAPE, Label::Type)
        .extend(Link::SHAPE, Label::Field("next"))
}

#[test]
fn pointers_render_as_stars_on_the_next_type() {
    let path = next_path()
        .extend(<Option<Box<Link>>>::SHAPE, Label::Deref)
        .extend(<Box<Link>>::SHAPE, Label::Deref)
        .extend(Link::SHAPE, Label::Type)
        .extend(Link::SHAPE, Label::Field("value"));
    assert_eq!(path.render(i32::SHAPE), "(Link).next(**Link).value (i32)");
    assert_eq!(path.len(), 6);
}

#[test]
fn trailing_pointers_fold_into_the_type() {
    let path = next_path()
        .extend(<Option<Box<Link>>>::SHAPE, Label::Deref)
        .extend(<Box<Link>>::SHAPE, Label::Deref);
    assert_eq!(path.render(Link::SHAPE), "(Link).next (Option<Box<Link>>)");
}

#[test]
fn pointers_before_elements_are_kept() {
    let path = ValuePath::root()
        .extend(Link::SHAPE, Label::Type)
        .extend(Link::SHAPE, Label::Field("items"))
        .extend(<Box<Vec<u8>>>::SHAPE, Label::Deref)
        .extend(<Vec<u8>>::SHAPE, Label::Index(3));
    assert_eq!(path.render(u8::SHAPE), "(Link).items.*[3] (u8)");
}

#[test]
fn map_parts_and_variants() {
    let entries = ValuePath::root()
        .extend(Link::SHAPE, Label::Type)
        .extend(Link::SHAPE, Label::Field("scores"));
    let map = <HashMap<String, Figure>>::SHAPE;
    assert_eq!(
        entries.extend(map, Label::MapKey).render(String::SHAPE),
        "(Link).scores[key] (String)"
    );
    let value = entries.extend(map, Label::MapValue);
    assert_eq!(value.render(Figure::SHAPE), "(Link).scores[value] (Figure)");

    let radius = value
        .extend(Figure::SHAPE, Label::Variant("Circle"))
        .extend(Figure::SHAPE, Label::Field("radius"));
    assert_eq!(
        radius.render(f64::SHAPE),
        "(Link).scores[value](Figure::Circle).radius (f64)"
    );
    assert!(radius.contains_shape(Figure::SHAPE));
}

#[test]
fn root_elements_have_no_leading_dot() {
    let path = ValuePath::root().extend(<Vec<u8>>::SHAPE, Label::Index(0));
    assert_eq!(path.render(u8::SHAPE), "[0] (u8)");
    assert_eq!(ValuePath::root().render(Link::SHAPE), "(Link)");
    assert!(ValuePath::root().is_empty());
}

#[test]
fn debug_lists_the_labels() {
    let path = next_path().extend(Link::SHAPE, Label::Index(1));
    assert_eq!(format!("{path:?}"), r#"[Type, Field("next"), Index(1)]"#);
}
