use core::fmt::Write as _;

use facet_core::Shape;

use crate::engine::{Visit, Visitor, ensure_pointee};
use crate::node::Node;
use crate::tags::MethodValues;
use crate::{ByteConsumer, FloatWidth, Width};

/// Candidate lists longer than this are cut short in the report.
const SHORTEN_LIMIT: usize = 20;

/// Writes one entry per visited value instead of filling anything in.
///
/// Collections get a single placeholder element so their element type is
/// described too; nothing is read from the input.
#[derive(Default)]
pub(crate) struct DescribeVisitor {
    pub(crate) out: String,
}

fn shorten(s: &str) -> String {
    if s.chars().count() <= SHORTEN_LIMIT {
        return s.to_string();
    }
    let head: String = s.chars().take(SHORTEN_LIMIT - 3).collect();
    format!("{head}...")
}

impl DescribeVisitor {
    fn intro(&mut self, visit: &Visit<'_>) {
        let _ = writeln!(self.out, "{}", visit.path.render(visit.shape));
    }

    fn detail(&mut self, args: core::fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "\t{args}");
    }

    /// Describes an enumerated value list. Returns whether there was one.
    fn method(&mut self, values: &Option<MethodValues>) -> bool {
        match values {
            Some(values) => {
                self.detail(format_args!(
                    "method ({}): {}",
                    values.method,
                    shorten(values.candidates.render())
                ));
                true
            }
            None => false,
        }
    }

    fn length(&mut self, bounds: (u64, u64)) {
        self.detail(format_args!("range min: {} max: {}", bounds.0, bounds.1));
    }
}

impl Visitor for DescribeVisitor {
    fn can_grow(&self) -> bool {
        false
    }

    fn visit_bool(&mut self, _value: &mut bool, _c: &mut ByteConsumer<'_>, visit: &Visit<'_>) {
        self.intro(visit);
    }

    fn visit_int(
        &mut self,
        _value: &mut i64,
        width: Width,
        _c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    ) {
        self.intro(visit);
        if self.method(&visit.tags.int_values) {
            return;
        }
        let (min, max) = visit
            .tags
            .int_range
            .bounds()
            .unwrap_or_else(|| width.signed_bounds());
        self.detail(format_args!("range min: {min} max: {max}"));
    }

    fn visit_uint(
        &mut self,
        _value: &mut u64,
        width: Width,
        _c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    ) {
        self.intro(visit);
        if self.method(&visit.tags.uint_values) {
            return;
        }
        let (min, max) = visit
            .tags
            .uint_range
            .bounds()
            .unwrap_or_else(|| (0, width.unsigned_max()));
        self.detail(format_args!("range min: {min} max: {max}"));
    }

    fn visit_float(
        &mut self,
        _value: &mut f64,
        _width: FloatWidth,
        _c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    ) {
        self.intro(visit);
        if self.method(&visit.tags.float_values) {
            return;
        }
        let (min, max) = visit
            .tags
            .float_range
            .bounds()
            .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
        self.detail(format_args!("range min: {min} max: {max}"));
    }

    fn visit_string(&mut self, _value: &mut String, _c: &mut ByteConsumer<'_>, visit: &Visit<'_>) {
        self.intro(visit);
        if self.method(&visit.tags.string_values) {
            return;
        }
        self.length(visit.tags.string_range.bounds());
    }

    fn visit_struct(&mut self, visit: &Visit<'_>) -> bool {
        if visit.path.contains_shape(visit.shape) {
            self.intro(visit);
            self.detail(format_args!("recursive, will not expand"));
            return false;
        }
        true
    }

    fn visit_ignored(&mut self, visit: &Visit<'_>) {
        self.intro(visit);
        self.detail(format_args!("ignored"));
    }

    fn visit_pointer(&mut self, value: &mut Node, pointee: &'static Shape, _visit: &Visit<'_>) {
        ensure_pointee(value, pointee);
    }

    fn visit_list(&mut self, _c: &mut ByteConsumer<'_>, visit: &Visit<'_>) -> usize {
        self.intro(visit);
        self.length(visit.tags.slice_range.bounds());
        1
    }

    fn visit_array(&mut self, visit: &Visit<'_>) {
        self.intro(visit);
    }

    fn visit_set(&mut self, _c: &mut ByteConsumer<'_>, visit: &Visit<'_>) -> usize {
        self.intro(visit);
        self.length(visit.tags.set_range.bounds());
        1
    }

    fn visit_map(&mut self, _c: &mut ByteConsumer<'_>, visit: &Visit<'_>) -> usize {
        self.intro(visit);
        self.length(visit.tags.map_range.bounds());
        1
    }

    fn visit_interface(
        &mut self,
        value: &mut Node,
        _c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    ) -> bool {
        self.intro(visit);
        let Some(values) = &visit.tags.interface_values else {
            self.detail(format_args!("no candidates, will leave unset"));
            return false;
        };
        self.method(&visit.tags.interface_values);
        match values.candidates.node(0) {
            Some(first) => {
                *value = first.clone();
                true
            }
            None => false,
        }
    }

    fn visit_unsupported(&mut self, visit: &Visit<'_>) {
        self.intro(visit);
        self.detail(format_args!("unsupported, will ignore"));
    }
}
