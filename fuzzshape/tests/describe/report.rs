use std::collections::{BTreeMap, BTreeSet};

use facet::Facet;
use fuzzshape as fuzz;
use fuzzshape::Generator;
use fuzzshape_testhelpers::setup;
use indoc::indoc;
use insta::assert_snapshot;

#[derive(Facet, Default)]
struct Everything {
    flag: bool,
    #[facet(fuzz::int_range = "-5,5")]
    small: i8,
    big: u16,
    ratio: f32,
    #[facet(fuzz::string_range = "1,8")]
    name: String,
    #[facet(fuzz::string_method = "colors")]
    color: String,
    #[facet(fuzz::slice_range = "0,3")]
    tags: Vec<u8>,
    grid: [bool; 2],
    counts: BTreeMap<String, u32>,
    #[facet(fuzz::set_range = "1,4")]
    seen: BTreeSet<u8>,
    maybe: Option<i64>,
    #[facet(fuzz::ignore)]
    skipped: u64,
}

impl Everything {
    fn colors(&self) -> Vec<String> {
        vec!["red".to_string(), "green".to_string(), "blue".to_string()]
    }
}

#[test]
fn every_kind_of_value() {
    setup();

    let report = Generator::new()
        .method("colors", Everything::colors)
        .describe_to_string(&Everything::default())
        .unwrap();
    assert_snapshot!(report, @r#"
(Everything).flag (bool)
(Everything).small (i8)
	range min: -5 max: 5
(Everything).big (u16)
	range min: 0 max: 65535
(Everything).ratio (f32)
	range min: -inf max: inf
(Everything).name (String)
	range min: 1 max: 8
(Everything).color (String)
	method (colors): ["red", "green", ...
(Everything).tags (Vec<u8>)
	range min: 0 max: 3
(Everything).tags[0] (u8)
	range min: 0 max: 255
(Everything).grid ([bool; 2])
(Everything).grid[0] (bool)
(Everything).grid[1] (bool)
(Everything).counts (BTreeMap<String, u32>)
	range min: 0 max: 20
(Everything).counts[key] (String)
	range min: 0 max: 20
(Everything).counts[value] (u32)
	range min: 0 max: 4294967295
(Everything).seen (BTreeSet<u8>)
	range min: 1 max: 4
(Everything).seen[0] (u8)
	range min: 0 max: 255
(Everything).skipped (u64)
	ignored
(Everything).maybe (Option<i64>)
	range min: -9223372036854775808 max: 9223372036854775807
"#);
}

#[test]
fn nested_values_are_reported_depth_first() {
    setup();

    #[derive(Facet, Default)]
    struct Inner {
        x: u8,
    }

    #[derive(Facet, Default)]
    struct Outer {
        inner: Inner,
        boxed: Box<Inner>,
        list: Vec<Inner>,
    }

    let report = fuzz::describe_to_string(&Outer::default()).unwrap();
    assert_eq!(
        report,
        indoc! {"
            (Outer).inner(Inner).x (u8)
            \trange min: 0 max: 255
            (Outer).list (Vec<Inner>)
            \trange min: 0 max: 20
            (Outer).list[0](Inner).x (u8)
            \trange min: 0 max: 255
            (Outer).boxed(*Inner).x (u8)
            \trange min: 0 max: 255
        "}
    );
}

#[test]
fn enumerated_numbers_list_their_candidates() {
    setup();

    #[derive(Facet, Default)]
    struct Choice {
        #[facet(fuzz::int_method = "primes")]
        prime: i32,
        #[facet(fuzz::float_method = "halves")]
        half: f64,
    }

    impl Choice {
        fn primes(&self) -> Vec<i32> {
            vec![2, 3, 5, 7]
        }

        fn halves(&self) -> Vec<f64> {
            vec![0.5, 1.5, 2.5, 3.5, 4.5]
        }
    }

    let report = Generator::new()
        .method("primes", Choice::primes)
        .method("halves", Choice::halves)
        .describe_to_string(&Choice::default())
        .unwrap();
    assert_eq!(
        report,
        indoc! {"
            (Choice).prime (i32)
            \tmethod (primes): [2, 3, 5, 7]
            (Choice).half (f64)
            \tmethod (halves): [0.5, 1.5, 2.5, 3...
        "}
    );
}

#[derive(Facet, Debug, Clone, PartialEq)]
#[repr(u8)]
enum Figure {
    Square {
        #[facet(fuzz::float_range = "1,10")]
        side: f64,
    },
    Circle {
        radius: f64,
    },
}

#[derive(Facet, Debug, PartialEq)]
struct Scene {
    #[facet(fuzz::interface_method = "figures")]
    main: Figure,
    spare: Figure,
}

impl Scene {
    fn figures(&self) -> Vec<Figure> {
        vec![Figure::Square { side: 1.0 }, Figure::Circle { radius: 1.0 }]
    }
}

#[test]
fn enums_describe_their_first_candidate() {
    setup();

    let scene = Scene {
        main: Figure::Circle { radius: 4.0 },
        spare: Figure::Circle { radius: 2.0 },
    };
    let report = Generator::new()
        .method("figures", Scene::figures)
        .describe_to_string(&scene)
        .unwrap();
    assert_snapshot!(report, @"
(Scene).main (Figure)
\tmethod (figures): [Square { side: 1...
(Scene).spare (Figure)
\tno candidates, will leave unset
(Scene).main(Figure::Square).side (f64)
\trange min: 1 max: 10
");
    assert_eq!(scene.main, Figure::Circle { radius: 4.0 });
}

#[test]
fn missing_methods_fail_the_description() {
    setup();

    let scene = Scene {
        main: Figure::Circle { radius: 4.0 },
        spare: Figure::Circle { radius: 2.0 },
    };
    let err = fuzz::describe_to_string(&scene).unwrap_err();
    assert_eq!(err.owner(), "Scene");
    assert_eq!(err.field(), Some("main"));
}

#[test]
fn unsupported_values_are_reported() {
    setup();

    #[derive(Facet, Default)]
    struct Raw {
        letter: char,
        wide: u128,
    }

    let report = fuzz::describe_to_string(&Raw::default()).unwrap();
    assert_eq!(
        report,
        indoc! {"
            (Raw).letter (char)
            \tunsupported, will ignore
            (Raw).wide (u128)
            \tunsupported, will ignore
        "}
    );
}

#[test]
fn root_values_that_are_not_structs() {
    setup();

    assert_eq!(
        fuzz::describe_to_string(&0u8).unwrap(),
        "(u8)\n\trange min: 0 max: 255\n"
    );
    assert_eq!(
        fuzz::describe_to_string(&Vec::<bool>::new()).unwrap(),
        "(Vec<bool>)\n\trange min: 0 max: 20\n[0] (bool)\n"
    );
}

#[test]
fn describe_prints_without_touching_the_value() {
    setup();

    let values = Vec::<u8>::new();
    fuzz::describe(&values).unwrap();
    assert!(values.is_empty());
}
