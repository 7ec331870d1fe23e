//! Whole-struct byte layouts: every field, element and map entry is read
//! depth first, in declaration order.

use std::collections::HashMap;

use facet::Facet;
use fuzzshape_testhelpers::{BytePusher, NATIVE, setup};

#[derive(Facet, Debug, Default, PartialEq)]
struct SimpleTypes {
    int_value: isize,
    int64_value: i64,
    int32_value: i32,
    int16_value: i16,
    int8_value: i8,

    uint_value: usize,
    uint64_value: u64,
    uint32_value: u32,
    uint16_value: u16,
    uint8_value: u8,

    float64_value: f64,
    float32_value: f32,

    bool1_value: bool,
    bool2_value: bool,

    string1_value: String,
    string2_value: String,
    string3_value: String,
    string4_value: String,

    array_value: [isize; 4],
    slice_value: Vec<usize>,

    map_value: HashMap<String, f64>,
}

fn simple_types_input() -> BytePusher {
    let mut input = BytePusher::new();
    input
        .push_i64(-1, NATIVE)
        .push_i64(-64, 8)
        .push_i64(-32, 4)
        .push_i64(-16, 2)
        .push_i64(-8, 1);
    input
        .push_native(1)
        .push_u64(64, 8)
        .push_u64(32, 4)
        .push_u64(16, 2)
        .push_u64(8, 1);
    input.push_f64(3.1415).push_f32(4.1415);
    input.push_bool(true).push_bool(false);
    input
        .push_string("a")
        .push_string("ab")
        .push_string("abc")
        .push_string("abcd");

    // the array's length is fixed, only its elements are read
    for v in [-2, -3, -4, -5] {
        input.push_i64(v, NATIVE);
    }

    input.push_native(4);
    for v in [2, 3, 4, 5] {
        input.push_native(v);
    }

    input
        .push_native(1)
        .push_string("map key string")
        .push_f64(5.1415);
    input
}

fn simple_types_expected() -> SimpleTypes {
    SimpleTypes {
        int_value: -1,
        int64_value: -64,
        int32_value: -32,
        int16_value: -16,
        int8_value: -8,

        uint_value: 1,
        uint64_value: 64,
        uint32_value: 32,
        uint16_value: 16,
        uint8_value: 8,

        float64_value: 3.1415,
        float32_value: 4.1415,

        bool1_value: true,
        bool2_value: false,

        string1_value: "a".to_string(),
        string2_value: "ab".to_string(),
        string3_value: "abc".to_string(),
        string4_value: "abcd".to_string(),

        array_value: [-2, -3, -4, -5],
        slice_value: vec![2, 3, 4, 5],

        map_value: HashMap::from([("map key string".to_string(), 5.1415)]),
    }
}

#[test]
fn simple_types() {
    setup();

    let input = simple_types_input();
    let mut value = SimpleTypes::default();
    fuzzshape::fill(&mut value, input.as_slice()).unwrap();
    assert_eq!(value, simple_types_expected());
}

#[test]
fn simple_types_behind_pointers() {
    setup();

    let input = simple_types_input();

    let mut boxed = Box::<SimpleTypes>::default();
    fuzzshape::fill(&mut boxed, input.as_slice()).unwrap();
    assert_eq!(*boxed, simple_types_expected());

    let mut maybe: Option<Box<SimpleTypes>> = None;
    fuzzshape::fill(&mut maybe, input.as_slice()).unwrap();
    assert_eq!(maybe.as_deref(), Some(&simple_types_expected()));
}

#[test]
fn map_values_are_structs() {
    setup();

    #[derive(Facet, Debug, Default, PartialEq)]
    struct ValueStruct {
        int_field: isize,
    }

    #[derive(Facet, Debug, Default)]
    struct WithMap {
        map_value: HashMap<isize, ValueStruct>,
    }

    let mut input = BytePusher::new();
    // one entry, key 1, int_field 2
    input.push_native(1).push_native(1).push_native(2);

    let mut value = WithMap::default();
    fuzzshape::fill(&mut value, input.as_slice()).unwrap();
    assert_eq!(value.map_value.len(), 1);
    assert_eq!(value.map_value[&1], ValueStruct { int_field: 2 });
}

#[derive(Facet, Debug, Default, Clone, PartialEq)]
struct InnerInner {
    uint_value: usize,
    string_value: String,
}

#[derive(Facet, Debug, Default, Clone, PartialEq)]
struct Inner {
    int_value: isize,
    inner_inner: InnerInner,
    string_value: String,
}

#[derive(Facet, Debug, Default, PartialEq)]
struct Complex {
    inner: Inner,
    map_field: HashMap<String, Inner>,
}

fn push_inner(input: &mut BytePusher) {
    input
        .push_i64(-2, NATIVE)
        .push_native(1)
        .push_string("innerinner")
        .push_string("inner");
}

#[test]
fn nested_structs_and_map_entries() {
    setup();

    let mut input = BytePusher::new();
    push_inner(&mut input);
    input.push_native(1).push_string("key");
    push_inner(&mut input);

    let inner = Inner {
        int_value: -2,
        inner_inner: InnerInner {
            uint_value: 1,
            string_value: "innerinner".to_string(),
        },
        string_value: "inner".to_string(),
    };

    let mut value = Complex::default();
    fuzzshape::fill(&mut value, input.as_slice()).unwrap();
    assert_eq!(
        value,
        Complex {
            inner: inner.clone(),
            map_field: HashMap::from([("key".to_string(), inner)]),
        }
    );
}
