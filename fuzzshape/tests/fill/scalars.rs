use facet::Facet;
use fuzzshape as fuzz;
use fuzzshape_testhelpers::{BytePusher, NATIVE, setup};

#[derive(Facet, Debug, Default, PartialEq)]
struct Primitives {
    flag: bool,
    signed8: i8,
    signed16: i16,
    signed32: i32,
    signed64: i64,
    signed_native: isize,
    unsigned8: u8,
    unsigned16: u16,
    unsigned32: u32,
    unsigned64: u64,
    unsigned_native: usize,
    single: f32,
    double: f64,
    text: String,
}

#[derive(Facet, Debug, Default)]
struct V {
    v: i64,
}

#[test]
fn every_primitive_reads_back_what_was_pushed() {
    setup();

    let mut input = BytePusher::new();
    input
        .push_bool(true)
        .push_i64(-100, 1)
        .push_i64(-30_000, 2)
        .push_i64(-2_000_000_000, 4)
        .push_i64(i64::MIN, 8)
        .push_i64(-5, NATIVE)
        .push_u64(200, 1)
        .push_u64(60_000, 2)
        .push_u64(4_000_000_000, 4)
        .push_u64(u64::MAX, 8)
        .push_native(12_345)
        .push_f32(1.5)
        .push_f64(-2.25)
        .push_string("hello");

    let mut p = Primitives::default();
    fuzz::fill(&mut p, input.as_slice()).unwrap();

    assert_eq!(
        p,
        Primitives {
            flag: true,
            signed8: -100,
            signed16: -30_000,
            signed32: -2_000_000_000,
            signed64: i64::MIN,
            signed_native: -5,
            unsigned8: 200,
            unsigned16: 60_000,
            unsigned32: 4_000_000_000,
            unsigned64: u64::MAX,
            unsigned_native: 12_345,
            single: 1.5,
            double: -2.25,
            text: "hello".to_string(),
        }
    );
}

#[test]
fn minus_one_at_native_width() {
    setup();

    let mut input = BytePusher::new();
    input.push_i64(-1, NATIVE);

    let mut v = V::default();
    fuzz::fill(&mut v, input.as_slice()).unwrap();
    assert_eq!(v.v, -1);
}

#[test]
fn minus_one_at_every_width() {
    setup();

    #[derive(Facet, Debug, Default)]
    struct Negatives {
        native: isize,
        wide: i64,
        word: i32,
        half: i16,
        byte: i8,
    }

    let mut input = BytePusher::new();
    for width in [NATIVE, 8, 4, 2, 1] {
        input.push_i64(-1, width);
    }

    let mut n = Negatives::default();
    fuzz::fill(&mut n, input.as_slice()).unwrap();
    assert_eq!((n.native, n.wide, n.word, n.half, n.byte), (-1, -1, -1, -1, -1));
}

#[test]
fn empty_input_leaves_values_alone() {
    setup();

    let mut v = V::default();
    fuzz::fill(&mut v, &[]).unwrap();
    assert_eq!(v.v, 0);

    let mut v = V { v: 5 };
    fuzz::fill(&mut v, &[]).unwrap();
    assert_eq!(v.v, 5);
}

#[test]
fn short_input_is_zero_padded() {
    setup();

    #[derive(Facet, Debug, Default)]
    struct Triple {
        a: u32,
        b: u32,
        c: u32,
    }

    let mut triple = Triple { a: 9, b: 9, c: 9 };
    fuzz::fill(&mut triple, &[1, 0, 0, 0, 2, 1]).unwrap();
    assert_eq!(triple.a, 1);
    assert_eq!(triple.b, 0x0102);
    // the walk stopped before reaching c
    assert_eq!(triple.c, 9);
}

#[test]
fn numbers_are_mapped_into_their_ranges() {
    setup();

    #[derive(Facet, Debug, Default)]
    struct Ranged {
        #[facet(fuzz::int_range = "-10,10")]
        small: i32,
        #[facet(fuzz::uint_range = "5,5")]
        fixed: u8,
        #[facet(fuzz::float_range = "0,1")]
        ratio: f64,
        #[facet(fuzz::int_range = "0,100")]
        narrow: i8,
    }

    let mut input = BytePusher::new();
    input
        .push_i64(25, 4)
        .push_u64(77, 1)
        .push_f64(2.5)
        .push_i64(-1, 1);

    let mut r = Ranged::default();
    fuzz::fill(&mut r, input.as_slice()).unwrap();
    assert_eq!(r.small, -6);
    assert_eq!(r.fixed, 5);
    assert_eq!(r.ratio, 0.5);
    assert_eq!(r.narrow, 1);
}

#[test]
fn float_special_values_are_fitted() {
    setup();

    #[derive(Facet, Debug, Default)]
    struct Floats {
        #[facet(fuzz::float_range = "-1,3")]
        nan: f64,
        #[facet(fuzz::float_range = "-1,3")]
        up: f64,
        #[facet(fuzz::float_range = "-1,3")]
        down: f64,
        unbounded: f64,
    }

    let mut input = BytePusher::new();
    input
        .push_f64(f64::NAN)
        .push_f64(f64::INFINITY)
        .push_f64(f64::NEG_INFINITY)
        .push_f64(f64::INFINITY);

    let mut f = Floats::default();
    fuzz::fill(&mut f, input.as_slice()).unwrap();
    assert_eq!(f.nan, 1.0);
    assert_eq!(f.up, 3.0);
    assert_eq!(f.down, -1.0);
    assert_eq!(f.unbounded, f64::INFINITY);
}

#[test]
fn string_lengths_are_fitted() {
    setup();

    #[derive(Facet, Debug, Default)]
    struct Words {
        #[facet(fuzz::string_range = "2,4")]
        short: String,
        next: u8,
        long: String,
    }

    let mut input = BytePusher::new();
    input
        .push_native(7)
        .push_bytes(b"abcd")
        .push_native(25)
        .push_bytes(b"wxyz!");

    let mut w = Words::default();
    fuzz::fill(&mut w, input.as_slice()).unwrap();
    // 7 maps to 3 in 2..=4
    assert_eq!(w.short, "abc");
    assert_eq!(w.next, b'd');
    // unconstrained strings default to 0..=20, where 25 maps to 4
    assert_eq!(w.long, "wxyz");
}

#[test]
fn invalid_utf8_is_dropped_from_strings() {
    setup();

    #[derive(Facet, Debug, Default)]
    struct Text {
        text: String,
    }

    let mut input = BytePusher::new();
    input.push_native(4).push_bytes(&[b'a', 0xff, b'b', b'c']);

    let mut t = Text::default();
    fuzz::fill(&mut t, input.as_slice()).unwrap();
    assert_eq!(t.text, "abc");
}

#[test]
fn ignored_fields_consume_nothing() {
    setup();

    #[derive(Facet, Debug, Default)]
    struct Skipping {
        #[facet(fuzz::ignore)]
        skipped: u32,
        taken: u8,
    }

    let mut s = Skipping {
        skipped: 42,
        taken: 0,
    };
    fuzz::fill(&mut s, &[7]).unwrap();
    assert_eq!(s.skipped, 42);
    assert_eq!(s.taken, 7);
}

#[test]
fn unsupported_fields_consume_nothing_and_reset() {
    setup();

    #[derive(Facet, Debug, Default)]
    struct Raw {
        letter: char,
        wide: u128,
        after: u8,
    }

    let mut raw = Raw {
        letter: 'x',
        wide: 5,
        after: 0,
    };
    fuzz::fill(&mut raw, &[9]).unwrap();
    assert_eq!(raw.after, 9);
    assert_eq!((raw.letter, raw.wide), ('\0', 0));
}

#[test]
fn several_values_share_one_consumer() {
    setup();

    let bytes = [1, 2, 3];
    let mut consumer = fuzz::ByteConsumer::new(&bytes);
    let mut first = 0u8;
    let mut second = 0u16;
    fuzz::fill_from(&mut first, &mut consumer).unwrap();
    fuzz::fill_from(&mut second, &mut consumer).unwrap();
    assert_eq!(first, 1);
    assert_eq!(second, 0x0302);
    assert!(consumer.is_empty());
}
