#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate self as fuzzshape;

use std::rc::Rc;

use facet::Facet;
use facet_reflect::Peek;

mod consumer;
pub use consumer::*;

mod error;
pub use error::*;

mod methods;
pub use methods::{Candidates, IntoMethodReturn, MethodReturn};

pub mod path;
pub mod queue;
pub mod tags;

mod build;
mod describe;
mod engine;
mod fill;
mod kind;
mod node;

mod slice_of;
pub use slice_of::*;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}

facet::define_attr_grammar! {
    ns "fuzz";
    crate_path ::fuzzshape;

    /// Field attributes that constrain generated values.
    ///
    /// Bring the crate in as `fuzz` and write them as
    /// `#[facet(fuzz::int_range = "0,9")]`.
    pub enum Attr {
        /// Inclusive `"min,max"` for signed integers
        IntRange(&'static str),
        /// Inclusive `"min,max"` for unsigned integers
        UintRange(&'static str),
        /// Inclusive `"min,max"` for floats
        FloatRange(&'static str),
        /// String length, `"0,20"` when absent
        StringRange(&'static str),
        /// `Vec` length, `"0,20"` when absent. Setting it also stops the
        /// list from growing past its first batch of elements.
        SliceRange(&'static str),
        /// Map entry count, `"0,20"` when absent
        MapRange(&'static str),
        /// Set element count, `"0,20"` when absent
        SetRange(&'static str),
        /// Method returning the signed integers to pick from
        IntMethod(&'static str),
        /// Method returning the unsigned integers to pick from
        UintMethod(&'static str),
        /// Method returning the floats to pick from
        FloatMethod(&'static str),
        /// Method returning the strings to pick from
        StringMethod(&'static str),
        /// Method returning the enum values to pick from
        InterfaceMethod(&'static str),
        /// Leave the field alone
        Ignore,
    }
}

use describe::DescribeVisitor;
use engine::Engine;
use fill::FillVisitor;
use methods::Methods;
use node::Node;
use tags::FieldTags;

/// Fixed input handed to the describe walk. It is never consumed, so the
/// walk never stops for lack of input.
const DESCRIBE_SEED: [u8; 3] = [1, 2, 3];

/// Fills and describes values, calling the methods that `*_method`
/// attributes name.
///
/// Methods are registered per type. The receiver a method sees is the
/// struct as filled so far: every field before the one being filled already
/// holds its new value.
///
/// ```
/// use facet::Facet;
/// use fuzzshape as fuzz;
///
/// #[derive(Facet, Debug, Default)]
/// struct Order {
///     #[facet(fuzz::uint_range = "1,3")]
///     quantity: u8,
///     #[facet(fuzz::string_method = "products")]
///     product: String,
/// }
///
/// impl Order {
///     fn products(&self) -> Vec<String> {
///         vec!["tea".to_string(), "cake".to_string()]
///     }
/// }
///
/// let generator = fuzz::Generator::new().method("products", Order::products);
/// let mut input = vec![5];
/// input.extend_from_slice(&1usize.to_le_bytes());
///
/// let mut order = Order::default();
/// generator.fill(&mut order, &input).unwrap();
/// assert_eq!(order.quantity, 3);
/// assert_eq!(order.product, "cake");
/// ```
#[derive(Debug, Default)]
pub struct Generator {
    methods: Methods,
}

impl Generator {
    /// A generator with no methods registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f` as method `name` of `T`, for attributes on `T`'s fields
    /// to name.
    pub fn method<T, R, F>(mut self, name: &'static str, f: F) -> Self
    where
        T: Facet<'static>,
        R: IntoMethodReturn,
        F: Fn(&T) -> R + 'static,
    {
        self.methods.register(name, f);
        self
    }

    /// Populates `root` from `bytes`, honoring every field constraint.
    ///
    /// Running out of input is fine: whatever was not reached keeps its
    /// current value, apart from values of types that cannot be generated,
    /// which are reset to their `Default`. A `Vec` root keeps getting new
    /// elements while input remains.
    ///
    /// Errors come from inconsistent constraint declarations, or from a
    /// value that has to be rebuilt but has no way to be.
    pub fn fill<T: Facet<'static>>(&self, root: &mut T, bytes: &[u8]) -> Result<(), ShapeError> {
        self.fill_from(root, &mut ByteConsumer::new(bytes))
    }

    /// Like [`Generator::fill`], reading from a consumer the caller keeps,
    /// so that several values can be filled from one buffer.
    pub fn fill_from<T: Facet<'static>>(
        &self,
        root: &mut T,
        consumer: &mut ByteConsumer<'_>,
    ) -> Result<(), ShapeError> {
        self.fill_with(root, consumer, Rc::default())
    }

    fn fill_with<T: Facet<'static>>(
        &self,
        root: &mut T,
        consumer: &mut ByteConsumer<'_>,
        tags: Rc<FieldTags>,
    ) -> Result<(), ShapeError> {
        if consumer.is_empty() {
            return Ok(());
        }
        let mut node = Node::snapshot(Peek::new(&*root))?;
        Engine::new(&mut FillVisitor, consumer, &self.methods).run(&mut node, T::SHAPE, tags)?;
        *root = build::materialize(&node)?;
        Ok(())
    }

    /// Prints what [`Generator::describe_to_string`] returns to stdout.
    pub fn describe<T: Facet<'static>>(&self, root: &T) -> Result<(), ShapeError> {
        print!("{}", self.describe_to_string(root)?);
        Ok(())
    }

    /// Reports every value reachable from `root`: its path, its type and
    /// the constraints that apply to it.
    ///
    /// The walk runs over a copy: pointers are allocated and collections
    /// get one placeholder element there, while `root` is left untouched.
    pub fn describe_to_string<T: Facet<'static>>(&self, root: &T) -> Result<String, ShapeError> {
        let mut node = Node::snapshot(Peek::new(root))?;
        let mut visitor = DescribeVisitor::default();
        let mut consumer = ByteConsumer::new(&DESCRIBE_SEED);
        Engine::new(&mut visitor, &mut consumer, &self.methods).run(
            &mut node,
            T::SHAPE,
            Rc::default(),
        )?;
        Ok(visitor.out)
    }
}

/// [`Generator::fill`] without registered methods.
pub fn fill<T: Facet<'static>>(root: &mut T, bytes: &[u8]) -> Result<(), ShapeError> {
    Generator::new().fill(root, bytes)
}

/// [`Generator::fill_from`] without registered methods.
pub fn fill_from<T: Facet<'static>>(
    root: &mut T,
    consumer: &mut ByteConsumer<'_>,
) -> Result<(), ShapeError> {
    Generator::new().fill_from(root, consumer)
}

/// [`Generator::describe`] without registered methods.
pub fn describe<T: Facet<'static>>(root: &T) -> Result<(), ShapeError> {
    Generator::new().describe(root)
}

/// [`Generator::describe_to_string`] without registered methods.
pub fn describe_to_string<T: Facet<'static>>(root: &T) -> Result<String, ShapeError> {
    Generator::new().describe_to_string(root)
}
