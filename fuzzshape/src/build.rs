//! Turning a [`Node`] back into a real value through facet-reflect's
//! `Partial` builder.

use facet::Facet;
use facet_reflect::{Partial, ReflectError};

use crate::kind::Kind;
use crate::node::Node;
use crate::{ShapeError, Width, trace};

type Wip = Partial<'static, false>;

/// Where the builder steps into before writing the next node.
#[derive(Clone, Copy, Debug)]
enum Enter {
    /// Struct field, variant field or array element
    Field(usize),
    ListItem,
    SetItem,
    Key,
    Value,
    Some,
    SmartPtr,
}

enum Op<'n> {
    Enter(Enter),
    Write(&'n Node),
    End,
}

/// Builds a `T` holding what `node` describes.
///
/// Parts of `node` that do not match `T`'s shape, and [`Node::Opaque`]
/// parts, are built from their `Default`. The work list keeps the stack flat
/// no matter how deeply the value nests.
pub(crate) fn materialize<T: Facet<'static>>(node: &Node) -> Result<T, ShapeError> {
    let fail = |err: ReflectError| ShapeError::reflect(T::SHAPE, err);

    let mut wip = Partial::alloc_owned::<T>().map_err(fail)?;
    let mut ops = vec![Op::Write(node)];
    while let Some(op) = ops.pop() {
        wip = match op {
            Op::Enter(into) => enter(wip, into),
            Op::Write(node) => write(wip, node, &mut ops),
            Op::End => wip.end(),
        }
        .map_err(fail)?;
    }

    wip.build().map_err(fail)?.materialize::<T>().map_err(fail)
}

fn enter(wip: Wip, into: Enter) -> Result<Wip, ReflectError> {
    match into {
        Enter::Field(index) => wip.begin_nth_field(index),
        Enter::ListItem => wip.begin_list_item(),
        Enter::SetItem => wip.begin_set_item(),
        Enter::Key => wip.begin_key(),
        Enter::Value => wip.begin_value(),
        Enter::Some => wip.begin_some(),
        Enter::SmartPtr => wip.begin_smart_ptr(),
    }
}

/// Queues `children` so that they are written in order, each between an
/// `Enter` and an `End`.
fn push_children<'n>(
    ops: &mut Vec<Op<'n>>,
    children: &'n [Node],
    into: impl Fn(usize) -> Enter,
) {
    for (index, child) in children.iter().enumerate().rev() {
        ops.extend([Op::End, Op::Write(child), Op::Enter(into(index))]);
    }
}

fn write<'n>(wip: Wip, node: &'n Node, ops: &mut Vec<Op<'n>>) -> Result<Wip, ReflectError> {
    let shape = wip.shape();
    match (Kind::of(shape), node) {
        (Kind::Bool, Node::Bool(v)) => wip.set(*v),
        (Kind::Int(width), Node::Int(v)) => set_int(wip, width, *v),
        (Kind::Uint(width), Node::Uint(v)) => set_uint(wip, width, *v),
        (Kind::Float(crate::FloatWidth::F32), Node::Float(v)) => wip.set(*v as f32),
        (Kind::Float(crate::FloatWidth::F64), Node::Float(v)) => wip.set(*v),
        (Kind::String, Node::String(v)) => wip.set(v.clone()),
        (Kind::Struct(_), Node::Struct(fields)) => {
            push_children(ops, fields, Enter::Field);
            Ok(wip)
        }
        (Kind::Enum(_), Node::Enum { variant, fields }) => {
            let wip = wip.select_nth_variant(*variant)?;
            push_children(ops, fields, Enter::Field);
            Ok(wip)
        }
        (Kind::Option(_), Node::Option(Some(inner))) => {
            ops.extend([Op::End, Op::Write(inner.as_ref()), Op::Enter(Enter::Some)]);
            Ok(wip)
        }
        (Kind::Pointer(_), Node::Pointer(inner)) => {
            ops.extend([Op::End, Op::Write(inner.as_ref()), Op::Enter(Enter::SmartPtr)]);
            Ok(wip)
        }
        (Kind::List(_), Node::List(items)) => {
            push_children(ops, items, |_| Enter::ListItem);
            wip.init_list()
        }
        (Kind::Array(..), Node::List(items)) => {
            push_children(ops, items, Enter::Field);
            wip.init_array()
        }
        (Kind::Set(_), Node::List(items)) => {
            push_children(ops, items, |_| Enter::SetItem);
            wip.init_set()
        }
        (Kind::Map(..), Node::Map(entries)) => {
            for (key, value) in entries.iter().rev() {
                ops.extend([
                    Op::End,
                    Op::Write(value),
                    Op::Enter(Enter::Value),
                    Op::End,
                    Op::Write(key),
                    Op::Enter(Enter::Key),
                ]);
            }
            wip.init_map()
        }
        (_, Node::Opaque) | (Kind::Option(_), Node::Option(None)) => wip.set_default(),
        (kind, node) => {
            trace!("{shape} ({kind:?}) cannot hold {node:?}, using its default");
            wip.set_default()
        }
    }
}

// Out-of-range values wrap, as integer casts do.
fn set_int(wip: Wip, width: Width, v: i64) -> Result<Wip, ReflectError> {
    match width {
        Width::W8 => wip.set(v as i8),
        Width::W16 => wip.set(v as i16),
        Width::W32 => wip.set(v as i32),
        Width::W64 => wip.set(v),
        Width::Native => wip.set(v as isize),
    }
}

fn set_uint(wip: Wip, width: Width, v: u64) -> Result<Wip, ReflectError> {
    match width {
        Width::W8 => wip.set(v as u8),
        Width::W16 => wip.set(v as u16),
        Width::W32 => wip.set(v as u32),
        Width::W64 => wip.set(v),
        Width::Native => wip.set(v as usize),
    }
}
