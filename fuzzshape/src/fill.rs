use facet_core::Shape;

use crate::engine::{Visit, Visitor, ensure_pointee};
use crate::node::Node;
use crate::tags::MethodValues;
use crate::{ByteConsumer, FloatWidth, Width, debug};

/// Decodes input into every value it visits.
pub(crate) struct FillVisitor;

/// Native-width index into `len` candidates.
fn pick(c: &mut ByteConsumer<'_>, len: usize) -> usize {
    let raw = c.uint64(Width::Native);
    // len is a usize, so the remainder is too
    usize::try_from(raw % len as u64).unwrap_or(0)
}

/// A clone of the candidate the input selects.
fn choose(values: &MethodValues, c: &mut ByteConsumer<'_>) -> Option<Node> {
    let index = pick(c, values.candidates.len());
    values.candidates.node(index).cloned()
}

impl Visitor for FillVisitor {
    fn can_grow(&self) -> bool {
        true
    }

    fn visit_bool(&mut self, value: &mut bool, c: &mut ByteConsumer<'_>, _visit: &Visit<'_>) {
        *value = c.bool();
    }

    fn visit_int(
        &mut self,
        value: &mut i64,
        width: Width,
        c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    ) {
        if let Some(values) = &visit.tags.int_values {
            if let Some(Node::Int(chosen)) = choose(values, c) {
                *value = chosen;
            }
            return;
        }
        *value = visit.tags.int_range.fit(c.int64(width));
    }

    fn visit_uint(
        &mut self,
        value: &mut u64,
        width: Width,
        c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    ) {
        if let Some(values) = &visit.tags.uint_values {
            if let Some(Node::Uint(chosen)) = choose(values, c) {
                *value = chosen;
            }
            return;
        }
        *value = visit.tags.uint_range.fit(c.uint64(width));
    }

    fn visit_float(
        &mut self,
        value: &mut f64,
        width: FloatWidth,
        c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    ) {
        if let Some(values) = &visit.tags.float_values {
            if let Some(Node::Float(chosen)) = choose(values, c) {
                *value = chosen;
            }
            return;
        }
        *value = visit.tags.float_range.fit(c.float64(width));
    }

    fn visit_string(&mut self, value: &mut String, c: &mut ByteConsumer<'_>, visit: &Visit<'_>) {
        if let Some(values) = &visit.tags.string_values {
            if let Some(Node::String(chosen)) = choose(values, c) {
                *value = chosen;
            }
            return;
        }
        let len = visit.tags.string_range.fit_length(c.int64(Width::Native));
        *value = c.string(len);
    }

    fn visit_struct(&mut self, visit: &Visit<'_>) -> bool {
        match visit.path.progress_within(visit.shape) {
            Some(0) => {
                debug!(
                    "{} recurses without consuming input, not descending",
                    visit.path.render(visit.shape)
                );
                false
            }
            _ => true,
        }
    }

    fn visit_ignored(&mut self, _visit: &Visit<'_>) {}

    fn visit_pointer(&mut self, value: &mut Node, pointee: &'static Shape, _visit: &Visit<'_>) {
        ensure_pointee(value, pointee);
    }

    fn visit_list(&mut self, c: &mut ByteConsumer<'_>, visit: &Visit<'_>) -> usize {
        visit.tags.slice_range.fit_length(c.int64(Width::Native))
    }

    fn visit_array(&mut self, _visit: &Visit<'_>) {}

    fn visit_set(&mut self, c: &mut ByteConsumer<'_>, visit: &Visit<'_>) -> usize {
        visit.tags.set_range.fit_length(c.int64(Width::Native))
    }

    fn visit_map(&mut self, c: &mut ByteConsumer<'_>, visit: &Visit<'_>) -> usize {
        visit.tags.map_range.fit_length(c.int64(Width::Native))
    }

    fn visit_interface(
        &mut self,
        value: &mut Node,
        c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    ) -> bool {
        let Some(values) = &visit.tags.interface_values else {
            debug!("{} has no candidates, leaving it as is", visit.path.render(visit.shape));
            return false;
        };
        match choose(values, c) {
            Some(chosen) => {
                *value = chosen;
                true
            }
            None => false,
        }
    }

    fn visit_unsupported(&mut self, _visit: &Visit<'_>) {}
}
