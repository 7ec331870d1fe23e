//! Where a value sits relative to the root, for recursion checks and
//! diagnostics.

use core::cell::Cell;
use core::fmt::Write as _;
use std::rc::Rc;

use facet_core::Shape;

/// How a value was reached from its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    /// Entering a struct; renders as `(Name)`
    Type,
    /// A struct field
    Field(&'static str),
    /// Through a pointer; renders as `*`
    Deref,
    /// A list, array or set element
    Index(usize),
    /// A map key
    MapKey,
    /// A map value
    MapValue,
    /// Entering the fields of an enum variant; renders as `(Enum::Variant)`
    Variant(&'static str),
}

impl Label {
    /// Whether the entry opens a struct or variant, the places recursion is
    /// tracked at.
    fn opens_fields(self) -> bool {
        matches!(self, Label::Type | Label::Variant(_))
    }
}

struct Entry {
    shape: &'static Shape,
    label: Label,
    /// Input consumed beneath this entry, tracked for `Type` and `Variant`
    /// entries
    consumed: Cell<usize>,
    parent: Option<Rc<Entry>>,
}

/// Persistent path from the root to a value.
///
/// Extending never touches the original; children share their ancestors'
/// entries.
#[derive(Clone, Default)]
pub struct ValuePath {
    head: Option<Rc<Entry>>,
}

impl ValuePath {
    /// The empty path of the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// A new path with one more entry. `shape` is the container's shape.
    pub fn extend(&self, shape: &'static Shape, label: Label) -> Self {
        Self {
            head: Some(Rc::new(Entry {
                shape,
                label,
                consumed: Cell::new(0),
                parent: self.head.clone(),
            })),
        }
    }

    fn entries(&self) -> impl Iterator<Item = &Entry> {
        core::iter::successors(self.head.as_deref(), |entry| entry.parent.as_deref())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// Whether this is the root path.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Whether a struct or enum of this shape is already being filled
    /// further up.
    pub fn contains_shape(&self, shape: &'static Shape) -> bool {
        self.entries()
            .any(|entry| entry.label.opens_fields() && entry.shape == shape)
    }

    /// Bytes consumed so far beneath the nearest enclosing struct or enum of
    /// this shape, or `None` if there is no such value.
    pub fn progress_within(&self, shape: &'static Shape) -> Option<usize> {
        self.entries()
            .find(|entry| entry.label.opens_fields() && entry.shape == shape)
            .map(|entry| entry.consumed.get())
    }

    /// Credits `n` consumed bytes to every enclosing struct and enum.
    pub fn record_consumed(&self, n: usize) {
        if n == 0 {
            return;
        }
        for entry in self.entries().filter(|entry| entry.label.opens_fields()) {
            entry.consumed.set(entry.consumed.get().saturating_add(n));
        }
    }

    /// Renders the path followed by the type of the value it leads to,
    /// e.g. `(Tree).left(*Tree).value (i32)`.
    ///
    /// Trailing dereferences are folded into the type: a value reached
    /// through `next` and two pointers renders as `next (Option<Box<Node>>)`.
    pub fn render(&self, current: &'static Shape) -> String {
        let mut entries: Vec<&Entry> = self.entries().collect();
        entries.reverse();

        let mut shape = current;
        while let Some(last) = entries.last() {
            if last.label != Label::Deref {
                break;
            }
            shape = last.shape;
            entries.pop();
        }

        let mut out = String::new();
        let mut stars = 0usize;
        for entry in entries {
            match entry.label {
                Label::Deref => stars += 1,
                Label::Type => {
                    let _ = write!(
                        out,
                        "({}{})",
                        "*".repeat(stars),
                        entry.shape.type_identifier
                    );
                    stars = 0;
                }
                Label::Variant(name) => {
                    let _ = write!(
                        out,
                        "({}{}::{name})",
                        "*".repeat(stars),
                        entry.shape.type_identifier
                    );
                    stars = 0;
                }
                label => {
                    let text = match label {
                        Label::Field(name) => name.to_string(),
                        Label::Index(i) => format!("[{i}]"),
                        Label::MapKey => "[key]".to_string(),
                        _ => "[value]".to_string(),
                    };
                    if stars > 0 {
                        if !out.is_empty() {
                            out.push('.');
                        }
                        out.push_str(&"*".repeat(stars));
                        stars = 0;
                    } else if !out.is_empty() && !text.starts_with(['[', '(']) {
                        out.push('.');
                    }
                    out.push_str(&text);
                }
            }
        }

        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "({shape})");
        out
    }
}

impl core::fmt::Debug for ValuePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut labels: Vec<Label> = self.entries().map(|entry| entry.label).collect();
        labels.reverse();
        f.debug_list().entries(labels).finish()
    }
}
