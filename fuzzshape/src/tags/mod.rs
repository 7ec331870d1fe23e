//! Per-field constraints, read from `#[facet(fuzz::...)]` attributes.
//!
//! | attribute | value | constrains |
//! |---|---|---|
//! | `fuzz::int_range` | `"min,max"` | signed integers |
//! | `fuzz::uint_range` | `"min,max"` | unsigned integers |
//! | `fuzz::float_range` | `"min,max"` | floats |
//! | `fuzz::string_range` | `"min,max"`, default `0,20` | string length |
//! | `fuzz::slice_range` | `"min,max"`, default `0,20` | `Vec` length |
//! | `fuzz::map_range` | `"min,max"`, default `0,20` | map entry count |
//! | `fuzz::set_range` | `"min,max"`, default `0,20` | set element count |
//! | `fuzz::int_method` .. `fuzz::interface_method` | method name | enumerated values |
//! | `fuzz::ignore` | none | skips the field |

use facet_core::{Field, Shape};

use crate::kind::Kind;
use crate::methods::{Methods, MethodReturn};
use crate::node::Node;
use crate::{Attr, ShapeError, trace};

mod range;
pub use range::*;

/// Which kind of value a method attribute enumerates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    /// `int_method`
    Int,
    /// `uint_method`
    Uint,
    /// `float_method`
    Float,
    /// `string_method`
    String,
    /// `interface_method`
    Interface,
}

impl MethodKind {
    const ALL: [MethodKind; 5] = [
        MethodKind::Int,
        MethodKind::Uint,
        MethodKind::Float,
        MethodKind::String,
        MethodKind::Interface,
    ];

    /// Attribute key for this kind.
    pub const fn key(self) -> &'static str {
        match self {
            MethodKind::Int => "int_method",
            MethodKind::Uint => "uint_method",
            MethodKind::Float => "float_method",
            MethodKind::String => "string_method",
            MethodKind::Interface => "interface_method",
        }
    }
}

impl Attr {
    /// The string an attribute carries, if it carries one.
    pub fn value(&self) -> Option<&'static str> {
        match *self {
            Attr::IntRange(v)
            | Attr::UintRange(v)
            | Attr::FloatRange(v)
            | Attr::StringRange(v)
            | Attr::SliceRange(v)
            | Attr::MapRange(v)
            | Attr::SetRange(v)
            | Attr::IntMethod(v)
            | Attr::UintMethod(v)
            | Attr::FloatMethod(v)
            | Attr::StringMethod(v)
            | Attr::InterfaceMethod(v) => Some(v),
            Attr::Ignore => None,
        }
    }
}

/// The string value of `fuzz::<key>` on `field`.
fn attr(field: &Field, key: &str) -> Option<&'static str> {
    let ext = field.get_attr(Some("fuzz"), key)?;
    match ext.get_as::<&'static str>() {
        Some(value) => Some(*value),
        None => ext.get_as::<Attr>().and_then(Attr::value),
    }
}

/// Candidates produced by a method attribute, validated against the field.
#[derive(Debug)]
pub struct MethodValues {
    /// Name of the method that produced them
    pub method: &'static str,

    /// The values, at their original type
    pub candidates: crate::Candidates,
}

/// Every constraint that applies to one field.
#[derive(Debug, Default)]
pub struct FieldTags {
    /// Signed integer range
    pub int_range: IntRange,
    /// Unsigned integer range
    pub uint_range: UintRange,
    /// Float range
    pub float_range: FloatRange,
    /// String length
    pub string_range: LengthRange,
    /// `Vec` length
    pub slice_range: LengthRange,
    /// Map entry count
    pub map_range: LengthRange,
    /// Set element count
    pub set_range: LengthRange,

    /// From `int_method`
    pub int_values: Option<MethodValues>,
    /// From `uint_method`
    pub uint_values: Option<MethodValues>,
    /// From `float_method`
    pub float_values: Option<MethodValues>,
    /// From `string_method`
    pub string_values: Option<MethodValues>,
    /// From `interface_method`
    pub interface_values: Option<MethodValues>,

    /// The field carries `fuzz::ignore`
    pub ignored: bool,
}

impl FieldTags {
    /// Parses the range and flag attributes. Method attributes need a
    /// receiver, see [`FieldTags::for_field`].
    pub fn parse(field: &Field) -> Self {
        FieldTags {
            int_range: attr(field, "int_range").map(IntRange::parse).unwrap_or_default(),
            uint_range: attr(field, "uint_range").map(UintRange::parse).unwrap_or_default(),
            float_range: attr(field, "float_range").map(FloatRange::parse).unwrap_or_default(),
            string_range: LengthRange::from_tag(attr(field, "string_range")),
            slice_range: LengthRange::from_tag(attr(field, "slice_range")),
            map_range: LengthRange::from_tag(attr(field, "map_range")),
            set_range: LengthRange::from_tag(attr(field, "set_range")),
            ignored: field.has_attr(Some("fuzz"), "ignore"),
            ..FieldTags::default()
        }
    }

    /// Builds the constraints for `field` of the struct `owner`, calling
    /// any method attributes on `receiver`, the struct as it is right now.
    ///
    /// Ignored fields are not inspected any further.
    pub(crate) fn for_field(
        owner: &'static Shape,
        field: &'static Field,
        receiver: &Node,
        methods: &Methods,
    ) -> Result<Self, ShapeError> {
        let mut tags = Self::parse(field);
        if tags.ignored {
            return Ok(tags);
        }

        for kind in MethodKind::ALL {
            let Some(method) = attr(field, kind.key()) else {
                continue;
            };
            let values = method_values(owner, field, method, receiver, methods)?;
            let slot = match kind {
                MethodKind::Int => &mut tags.int_values,
                MethodKind::Uint => &mut tags.uint_values,
                MethodKind::Float => &mut tags.float_values,
                MethodKind::String => &mut tags.string_values,
                MethodKind::Interface => &mut tags.interface_values,
            };
            *slot = Some(values);
        }

        Ok(tags)
    }
}

/// The shape a candidate must have to be stored in `field`: its own type,
/// or the element type when the field is a `Vec`.
fn assign_target(field_shape: &'static Shape) -> &'static Shape {
    match Kind::of(field_shape) {
        Kind::List(element) => element,
        _ => field_shape,
    }
}

fn method_values(
    owner: &'static Shape,
    field: &'static Field,
    method: &'static str,
    receiver: &Node,
    methods: &Methods,
) -> Result<MethodValues, ShapeError> {
    let returned = methods
        .call(owner, method, receiver)
        .ok_or(ShapeError::MethodNotFound {
            owner: owner.type_identifier,
            field: field.name,
            method,
        })??;

    let candidates = match returned {
        MethodReturn::Sequence(candidates) => candidates,
        MethodReturn::NotSequence(found) => {
            return Err(ShapeError::NotASequence {
                owner: owner.type_identifier,
                field: field.name,
                method,
                found,
            });
        }
    };

    let target = assign_target(field.shape());
    if candidates.element_shape() != target {
        return Err(ShapeError::NotAssignable {
            owner: owner.type_identifier,
            field: field.name,
            method,
            element: candidates.element_type_name(),
            target: target.to_string(),
        });
    }

    if candidates.is_empty() {
        return Err(ShapeError::EmptyCandidates {
            owner: owner.type_identifier,
            field: field.name,
            method,
        });
    }

    trace!(
        "{}.{}: {} candidates from {}()",
        owner.type_identifier,
        field.name,
        candidates.len(),
        method
    );
    Ok(MethodValues { method, candidates })
}
