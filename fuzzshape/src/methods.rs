use core::fmt::{self, Debug};

use facet::Facet;
use facet_core::Shape;
use facet_reflect::Peek;

use crate::ShapeError;
use crate::build::materialize;
use crate::node::Node;

/// What a registered method handed back.
pub enum MethodReturn {
    /// A sequence of candidate values
    Sequence(Candidates),

    /// Something that isn't a sequence, named by its type
    NotSequence(String),
}

/// Conversion from a method's return value into a [`MethodReturn`].
///
/// Sequences (`Vec<T>`, arrays, slices) become candidate lists. Scalars are
/// accepted so that a method returning the wrong thing is reported when the
/// attribute is used, not when the method is registered.
pub trait IntoMethodReturn {
    /// Converts `self`, reading every candidate through reflection.
    fn into_method_return(self) -> Result<MethodReturn, ShapeError>;
}

impl<T: Facet<'static> + Debug> IntoMethodReturn for Vec<T> {
    fn into_method_return(self) -> Result<MethodReturn, ShapeError> {
        Candidates::new(&self).map(MethodReturn::Sequence)
    }
}

impl<T: Facet<'static> + Debug, const N: usize> IntoMethodReturn for [T; N] {
    fn into_method_return(self) -> Result<MethodReturn, ShapeError> {
        Candidates::new(&self).map(MethodReturn::Sequence)
    }
}

impl<T: Facet<'static> + Debug> IntoMethodReturn for &[T] {
    fn into_method_return(self) -> Result<MethodReturn, ShapeError> {
        Candidates::new(self).map(MethodReturn::Sequence)
    }
}

impl<T: Facet<'static> + Debug> IntoMethodReturn for Box<[T]> {
    fn into_method_return(self) -> Result<MethodReturn, ShapeError> {
        Candidates::new(&self).map(MethodReturn::Sequence)
    }
}

macro_rules! impl_not_sequence {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoMethodReturn for $ty {
                fn into_method_return(self) -> Result<MethodReturn, ShapeError> {
                    Ok(MethodReturn::NotSequence(<$ty as Facet>::SHAPE.to_string()))
                }
            }
        )*
    };
}

impl_not_sequence!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    String,
    &'static str,
);

/// Candidate values returned by a method, captured through reflection.
///
/// The element shape is kept, so a candidate can only be stored where a
/// value of that exact type fits.
pub struct Candidates {
    shape: &'static Shape,
    nodes: Vec<Node>,
    rendered: String,
}

impl Candidates {
    /// Captures `values`.
    pub fn new<T: Facet<'static> + Debug>(values: &[T]) -> Result<Self, ShapeError> {
        let nodes = values
            .iter()
            .map(|value| Node::snapshot(Peek::new(value)))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            shape: T::SHAPE,
            nodes,
            rendered: format!("{values:?}"),
        })
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether there are no candidates at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Shape of every element.
    pub fn element_shape(&self) -> &'static Shape {
        self.shape
    }

    /// Element type, written as Rust type syntax.
    pub fn element_type_name(&self) -> String {
        self.shape.to_string()
    }

    /// `Debug` rendering of the whole list.
    pub fn render(&self) -> &str {
        &self.rendered
    }

    pub(crate) fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }
}

impl Debug for Candidates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

type Call = Box<dyn Fn(&Node) -> Result<MethodReturn, ShapeError>>;

struct Method {
    owner: &'static Shape,
    name: &'static str,
    call: Call,
}

/// Methods that attributes can name, keyed by the struct they belong to.
#[derive(Default)]
pub(crate) struct Methods {
    table: Vec<Method>,
}

impl Methods {
    /// Registers `f` as method `name` of `T`. A later registration under the
    /// same name replaces the earlier one.
    pub(crate) fn register<T, R, F>(&mut self, name: &'static str, f: F)
    where
        T: Facet<'static>,
        R: IntoMethodReturn,
        F: Fn(&T) -> R + 'static,
    {
        self.table
            .retain(|method| !(method.owner == T::SHAPE && method.name == name));
        self.table.push(Method {
            owner: T::SHAPE,
            name,
            call: Box::new(move |receiver: &Node| {
                let receiver: T = materialize(receiver)?;
                f(&receiver).into_method_return()
            }),
        });
    }

    /// Calls `owner`'s method `name` on `receiver`, a snapshot of an
    /// `owner` value. `None` if no such method is registered.
    pub(crate) fn call(
        &self,
        owner: &'static Shape,
        name: &str,
        receiver: &Node,
    ) -> Option<Result<MethodReturn, ShapeError>> {
        self.table
            .iter()
            .find(|method| method.owner == owner && method.name == name)
            .map(|method| (method.call)(receiver))
    }

    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }
}

impl Debug for Methods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.table
                    .iter()
                    .map(|method| format!("{}::{}", method.owner.type_identifier, method.name)),
            )
            .finish()
    }
}
