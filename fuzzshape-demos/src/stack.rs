//! A last-in first-out stack, and the step type used to fuzz it.

use core::fmt;

use facet::Facet;
use fuzzshape::{self as fuzz, Generator};

/// Operation name for [`Stack::push`].
pub const PUSH: &str = "push";

/// Operation name for [`Stack::pop`].
pub const POP: &str = "pop";

/// A plain stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// An empty stack.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Puts `value` on top.
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Takes the top value off, if there is one.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// The top value, if there is one.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Number of values on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "len: {}", self.items.len())
    }
}

/// One push or pop, as generated from fuzzer input.
///
/// A `Vec<StackFuzzStep>` filled from the input is a whole run.
#[derive(Facet, Debug, Default, Clone, PartialEq, Eq)]
pub struct StackFuzzStep {
    /// [`PUSH`] or [`POP`]
    #[facet(fuzz::string_method = "all_operations")]
    pub operation: String,
    /// Pushed when the operation is a push
    #[facet(fuzz::string_range = "1,10")]
    pub push_value: String,
}

impl StackFuzzStep {
    /// A generator that can fill steps, with
    /// [`StackFuzzStep::all_operations`] registered.
    pub fn generator() -> Generator {
        Generator::new().method("all_operations", StackFuzzStep::all_operations)
    }

    /// Every operation a step may perform.
    pub fn all_operations(&self) -> Vec<String> {
        vec![PUSH.to_string(), POP.to_string()]
    }

    /// Applies this step to `stack`, returning what a pop took off.
    ///
    /// Steps with an unknown operation do nothing.
    pub fn apply(&self, stack: &mut Stack<String>) -> Option<String> {
        match self.operation.as_str() {
            PUSH => {
                stack.push(self.push_value.clone());
                None
            }
            POP => stack.pop(),
            _ => None,
        }
    }
}
