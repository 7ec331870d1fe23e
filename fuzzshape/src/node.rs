//! An owned, shape-agnostic copy of a value that the walk can edit freely
//! before the real value is rebuilt from it.

use facet_core::Shape;
use facet_reflect::Peek;

use crate::ShapeError;
use crate::kind::Kind;

/// One value, in the form the walk reads and writes.
///
/// Integers of every width are held widened; they are narrowed again when
/// the value is rebuilt.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Node {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    /// Fields in declaration order
    Struct(Vec<Node>),
    /// Selected variant and its fields
    Enum { variant: usize, fields: Vec<Node> },
    Option(Option<Box<Node>>),
    Pointer(Box<Node>),
    /// Lists, arrays and sets
    List(Vec<Node>),
    Map(Vec<(Node, Node)>),
    /// Something the generator never produces; rebuilt from its `Default`
    Opaque,
}

impl Node {
    /// Copies the value behind `peek`.
    pub(crate) fn snapshot(peek: Peek<'_, '_>) -> Result<Node, ShapeError> {
        let shape = peek.shape();
        let fail = |err: &dyn core::fmt::Display| ShapeError::reflect(shape, err);

        let node = match Kind::of(shape) {
            Kind::Bool => Node::Bool(*peek.get::<bool>().map_err(|e| fail(&e))?),
            Kind::Int(_) => Node::Int(read_int(peek).map_err(|e| fail(&e))?),
            Kind::Uint(_) => Node::Uint(read_uint(peek).map_err(|e| fail(&e))?),
            Kind::Float(_) => Node::Float(read_float(peek).map_err(|e| fail(&e))?),
            Kind::String => {
                let value = peek.as_str().ok_or_else(|| fail(&"not a string"))?;
                Node::String(value.to_string())
            }
            Kind::Struct(_) => {
                let ps = peek.into_struct().map_err(|e| fail(&e))?;
                let mut fields = Vec::with_capacity(ps.field_count());
                for index in 0..ps.field_count() {
                    let field = ps.field(index).map_err(|e| fail(&e))?;
                    fields.push(Node::snapshot(field)?);
                }
                Node::Struct(fields)
            }
            Kind::Enum(_) => {
                let pe = peek.into_enum().map_err(|e| fail(&e))?;
                let variant = pe.variant_index().map_err(|e| fail(&e))?;
                let count = pe.active_variant().map_err(|e| fail(&e))?.data.fields.len();
                let mut fields = Vec::with_capacity(count);
                for index in 0..count {
                    let field = pe
                        .field(index)
                        .map_err(|e| fail(&e))?
                        .ok_or_else(|| fail(&format_args!("variant field {index} is missing")))?;
                    fields.push(Node::snapshot(field)?);
                }
                Node::Enum { variant, fields }
            }
            Kind::Option(_) => {
                let inner = peek.into_option().map_err(|e| fail(&e))?.value();
                Node::Option(match inner {
                    Some(inner) => Some(Box::new(Node::snapshot(inner)?)),
                    None => None,
                })
            }
            Kind::Pointer(_) => match peek.into_pointer().map_err(|e| fail(&e))?.borrow_inner() {
                Some(inner) => Node::Pointer(Box::new(Node::snapshot(inner)?)),
                None => Node::Opaque,
            },
            Kind::List(_) | Kind::Array(..) => {
                let list = peek.into_list_like().map_err(|e| fail(&e))?;
                Node::List(list.iter().map(Node::snapshot).collect::<Result<_, _>>()?)
            }
            Kind::Set(_) => {
                let set = peek.into_set().map_err(|e| fail(&e))?;
                Node::List(set.iter().map(Node::snapshot).collect::<Result<_, _>>()?)
            }
            Kind::Map(..) => {
                let map = peek.into_map().map_err(|e| fail(&e))?;
                let mut entries = Vec::with_capacity(map.len());
                for (key, value) in map.iter() {
                    entries.push((Node::snapshot(key)?, Node::snapshot(value)?));
                }
                Node::Map(entries)
            }
            Kind::Unsupported => Node::Opaque,
        };
        Ok(node)
    }

    /// The zero value of `shape`: zeroes, empty strings and collections,
    /// `None`, and the first variant of an enum that can be built without
    /// containing itself.
    pub(crate) fn default_for(shape: &'static Shape) -> Node {
        let mut enclosing = Vec::new();
        default_within(shape, &mut enclosing).unwrap_or(Node::Opaque)
    }
}

/// `enclosing` holds the shapes being defaulted further up. Running into one
/// of them again means the branch never ends, and gives `None`.
fn default_within(shape: &'static Shape, enclosing: &mut Vec<&'static Shape>) -> Option<Node> {
    if enclosing.contains(&shape) {
        return None;
    }
    enclosing.push(shape);
    let node = match Kind::of(shape) {
        Kind::Bool => Some(Node::Bool(false)),
        Kind::Int(_) => Some(Node::Int(0)),
        Kind::Uint(_) => Some(Node::Uint(0)),
        Kind::Float(_) => Some(Node::Float(0.0)),
        Kind::String => Some(Node::String(String::new())),
        Kind::Struct(ty) => ty
            .fields
            .iter()
            .map(|field| default_within(field.shape(), enclosing))
            .collect::<Option<_>>()
            .map(Node::Struct),
        Kind::Enum(ty) => ty.variants.iter().enumerate().find_map(|(variant, v)| {
            let fields = v
                .data
                .fields
                .iter()
                .map(|field| default_within(field.shape(), enclosing))
                .collect::<Option<_>>()?;
            Some(Node::Enum { variant, fields })
        }),
        Kind::Option(_) => Some(Node::Option(None)),
        Kind::Pointer(t) => default_within(t, enclosing).map(|inner| Node::Pointer(Box::new(inner))),
        Kind::Array(t, n) => (0..n)
            .map(|_| default_within(t, enclosing))
            .collect::<Option<_>>()
            .map(Node::List),
        Kind::List(_) | Kind::Set(_) => Some(Node::List(Vec::new())),
        Kind::Map(..) => Some(Node::Map(Vec::new())),
        Kind::Unsupported => Some(Node::Opaque),
    };
    enclosing.pop();
    node
}

fn read_int(peek: Peek<'_, '_>) -> Result<i64, facet_reflect::ReflectError> {
    use facet_core::ScalarType;

    Ok(match peek.scalar_type() {
        Some(ScalarType::I8) => i64::from(*peek.get::<i8>()?),
        Some(ScalarType::I16) => i64::from(*peek.get::<i16>()?),
        Some(ScalarType::I32) => i64::from(*peek.get::<i32>()?),
        Some(ScalarType::ISize) => *peek.get::<isize>()? as i64,
        _ => *peek.get::<i64>()?,
    })
}

fn read_uint(peek: Peek<'_, '_>) -> Result<u64, facet_reflect::ReflectError> {
    use facet_core::ScalarType;

    Ok(match peek.scalar_type() {
        Some(ScalarType::U8) => u64::from(*peek.get::<u8>()?),
        Some(ScalarType::U16) => u64::from(*peek.get::<u16>()?),
        Some(ScalarType::U32) => u64::from(*peek.get::<u32>()?),
        Some(ScalarType::USize) => *peek.get::<usize>()? as u64,
        _ => *peek.get::<u64>()?,
    })
}

fn read_float(peek: Peek<'_, '_>) -> Result<f64, facet_reflect::ReflectError> {
    match peek.scalar_type() {
        Some(facet_core::ScalarType::F32) => Ok(f64::from(*peek.get::<f32>()?)),
        _ => Ok(*peek.get::<f64>()?),
    }
}
