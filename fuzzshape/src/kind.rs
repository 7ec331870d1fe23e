//! Sorting facet shapes into the kinds of value the generator knows how to
//! produce.

use facet_core::{Def, EnumType, KnownPointer, ScalarType, Shape, StructType, Type, UserType};

use crate::{FloatWidth, Width};

/// What a shape is, as far as generation is concerned.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Kind {
    Bool,
    Int(Width),
    Uint(Width),
    Float(FloatWidth),
    String,
    Struct(&'static StructType),
    /// Plays the part of an interface: its value is one of the candidates a
    /// method offers
    Enum(&'static EnumType),
    Option(&'static Shape),
    /// `Box`, `Rc` or `Arc`
    Pointer(&'static Shape),
    List(&'static Shape),
    Array(&'static Shape, usize),
    Set(&'static Shape),
    Map(&'static Shape, &'static Shape),
    Unsupported,
}

impl Kind {
    pub(crate) fn of(shape: &'static Shape) -> Kind {
        match &shape.def {
            Def::Option(def) => return Kind::Option(def.t()),
            Def::Pointer(def) => {
                return match (def.known, def.pointee()) {
                    (Some(KnownPointer::Box | KnownPointer::Rc | KnownPointer::Arc), Some(t)) => {
                        Kind::Pointer(t)
                    }
                    _ => Kind::Unsupported,
                };
            }
            _ => {}
        }

        if let Some(scalar) = shape.scalar_type() {
            return Kind::of_scalar(scalar);
        }

        match &shape.def {
            Def::List(def) => return Kind::List(def.t()),
            Def::Array(def) => return Kind::Array(def.t(), def.n),
            Def::Set(def) => return Kind::Set(def.t()),
            Def::Map(def) => return Kind::Map(def.k(), def.v()),
            _ => {}
        }

        match &shape.ty {
            Type::User(UserType::Struct(ty)) => Kind::Struct(ty),
            Type::User(UserType::Enum(ty)) => Kind::Enum(ty),
            _ => Kind::Unsupported,
        }
    }

    fn of_scalar(scalar: ScalarType) -> Kind {
        match scalar {
            ScalarType::Bool => Kind::Bool,
            ScalarType::I8 => Kind::Int(Width::W8),
            ScalarType::I16 => Kind::Int(Width::W16),
            ScalarType::I32 => Kind::Int(Width::W32),
            ScalarType::I64 => Kind::Int(Width::W64),
            ScalarType::ISize => Kind::Int(Width::Native),
            ScalarType::U8 => Kind::Uint(Width::W8),
            ScalarType::U16 => Kind::Uint(Width::W16),
            ScalarType::U32 => Kind::Uint(Width::W32),
            ScalarType::U64 => Kind::Uint(Width::W64),
            ScalarType::USize => Kind::Uint(Width::Native),
            ScalarType::F32 => Kind::Float(FloatWidth::F32),
            ScalarType::F64 => Kind::Float(FloatWidth::F64),
            ScalarType::String => Kind::String,
            // char, 128-bit integers, borrowed strings, addresses
            _ => Kind::Unsupported,
        }
    }
}
