//! The walk shared by filling and describing.
//!
//! A value's own fields, elements and map entries are visited right away,
//! depth first. Pointees, the fields of an enum variant and further growth
//! of an open-ended list are deferred: they go to the back of a FIFO queue
//! and run once everything visited inline before them is done.
//!
//! Work items are pure data: a route of steps from the root of the walk to
//! the value, plus the constraints and path to visit it with. Executing one
//! re-navigates from the root.

use std::rc::Rc;

use facet_core::{Field, Shape};

use crate::kind::Kind;
use crate::methods::Methods;
use crate::node::Node;
use crate::path::{Label, ValuePath};
use crate::queue::WorkQueue;
use crate::tags::FieldTags;
use crate::{ByteConsumer, FloatWidth, ShapeError, Width, debug, trace};

/// What the visitor gets to know about the value in front of it.
pub(crate) struct Visit<'a> {
    pub shape: &'static Shape,
    pub tags: &'a FieldTags,
    pub path: &'a ValuePath,
}

/// One callback per kind of value.
pub(crate) trait Visitor {
    /// Whether open-ended lists (and a `Vec` root) may keep growing while
    /// input remains.
    fn can_grow(&self) -> bool;

    fn visit_bool(&mut self, value: &mut bool, c: &mut ByteConsumer<'_>, visit: &Visit<'_>);
    fn visit_int(
        &mut self,
        value: &mut i64,
        width: Width,
        c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    );
    fn visit_uint(
        &mut self,
        value: &mut u64,
        width: Width,
        c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    );
    fn visit_float(
        &mut self,
        value: &mut f64,
        width: FloatWidth,
        c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    );
    fn visit_string(&mut self, value: &mut String, c: &mut ByteConsumer<'_>, visit: &Visit<'_>);

    /// Returns whether to descend into the fields.
    fn visit_struct(&mut self, visit: &Visit<'_>) -> bool;

    fn visit_ignored(&mut self, visit: &Visit<'_>);

    /// `value` is an `Option` or a smart pointer holding a `pointee`.
    fn visit_pointer(&mut self, value: &mut Node, pointee: &'static Shape, visit: &Visit<'_>);

    /// Returns how many elements to add to the list.
    fn visit_list(&mut self, c: &mut ByteConsumer<'_>, visit: &Visit<'_>) -> usize;

    fn visit_array(&mut self, visit: &Visit<'_>);

    /// Returns how many elements the set gets.
    fn visit_set(&mut self, c: &mut ByteConsumer<'_>, visit: &Visit<'_>) -> usize;

    /// Returns how many entries the map gets.
    fn visit_map(&mut self, c: &mut ByteConsumer<'_>, visit: &Visit<'_>) -> usize;

    /// Returns whether a concrete variant was installed in `value`.
    fn visit_interface(
        &mut self,
        value: &mut Node,
        c: &mut ByteConsumer<'_>,
        visit: &Visit<'_>,
    ) -> bool;

    fn visit_unsupported(&mut self, visit: &Visit<'_>);
}

/// Allocates the pointee of an empty `Option`.
pub(crate) fn ensure_pointee(value: &mut Node, pointee: &'static Shape) {
    if let Node::Option(slot @ None) = value {
        *slot = Some(Box::new(Node::default_for(pointee)));
    }
}

/// A single move from a value to one of its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Struct field, or field of the selected enum variant
    Field(usize),
    Index(usize),
    MapKey(usize),
    MapValue(usize),
    Deref,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Value,
    /// Re-visit of a list that already got its first batch of elements
    Growth,
    /// The fields of the variant an enum holds
    Variant,
}

#[derive(Clone)]
enum TaskTags {
    Ready(Rc<FieldTags>),
    /// Worked out from the owning struct right before the field is visited,
    /// so methods see every earlier sibling already filled
    Field {
        owner: &'static Shape,
        field: &'static Field,
    },
}

#[derive(Clone)]
struct Task {
    route: Vec<Step>,
    shape: &'static Shape,
    tags: TaskTags,
    path: ValuePath,
    focus: Focus,
}

impl Task {
    fn root(
        shape: &'static Shape,
        route: Vec<Step>,
        path: ValuePath,
        tags: Rc<FieldTags>,
    ) -> Self {
        Self {
            route,
            shape,
            tags: TaskTags::Ready(tags),
            path,
            focus: Focus::Value,
        }
    }

    fn child(&self, step: Step, shape: &'static Shape, tags: TaskTags, path: ValuePath) -> Self {
        let mut route = Vec::with_capacity(self.route.len() + 1);
        route.extend_from_slice(&self.route);
        route.push(step);
        Self {
            route,
            shape,
            tags,
            path,
            focus: Focus::Value,
        }
    }

    fn refocus(&self, focus: Focus, tags: TaskTags, path: ValuePath) -> Self {
        Self {
            route: self.route.clone(),
            shape: self.shape,
            tags,
            path,
            focus,
        }
    }
}

/// An item on the inline stack of the task being executed.
enum Work {
    Visit(Task),
    Defer(Task),
}

fn step_into(node: &mut Node, step: Step) -> Option<&mut Node> {
    match (node, step) {
        (Node::Struct(fields) | Node::Enum { fields, .. }, Step::Field(index)) => {
            fields.get_mut(index)
        }
        (Node::List(items), Step::Index(index)) => items.get_mut(index),
        (Node::Map(entries), Step::MapKey(index)) => entries.get_mut(index).map(|(k, _)| k),
        (Node::Map(entries), Step::MapValue(index)) => entries.get_mut(index).map(|(_, v)| v),
        (Node::Option(Some(inner)) | Node::Pointer(inner), Step::Deref) => Some(inner),
        _ => None,
    }
}

fn navigate<'n>(root: &'n mut Node, route: &[Step]) -> Option<&'n mut Node> {
    let mut node = root;
    for &step in route {
        node = step_into(node, step)?;
    }
    Some(node)
}

/// Replaces `node` with the default of `shape` if it cannot hold a `kind`.
fn conform(node: &mut Node, kind: Kind, shape: &'static Shape) {
    let fits = matches!(
        (kind, &*node),
        (Kind::Bool, Node::Bool(_))
            | (Kind::Int(_), Node::Int(_))
            | (Kind::Uint(_), Node::Uint(_))
            | (Kind::Float(_), Node::Float(_))
            | (Kind::String, Node::String(_))
            | (Kind::Struct(_), Node::Struct(_))
            | (Kind::Enum(_), Node::Enum { .. })
            | (Kind::Option(_), Node::Option(_))
            | (Kind::Pointer(_), Node::Pointer(_))
            | (Kind::List(_) | Kind::Array(..) | Kind::Set(_), Node::List(_))
            | (Kind::Map(..), Node::Map(_))
            | (Kind::Unsupported, _)
    );
    if !fits {
        *node = Node::default_for(shape);
    }
}

/// Drives a [`Visitor`] over a value, pulling input from a [`ByteConsumer`].
pub(crate) struct Engine<'e, 'b, V> {
    visitor: &'e mut V,
    consumer: &'e mut ByteConsumer<'b>,
    methods: &'e Methods,
}

impl<'e, 'b, V: Visitor> Engine<'e, 'b, V> {
    pub(crate) fn new(
        visitor: &'e mut V,
        consumer: &'e mut ByteConsumer<'b>,
        methods: &'e Methods,
    ) -> Self {
        Self {
            visitor,
            consumer,
            methods,
        }
    }

    /// Visits `root`, a value of `shape`, and everything reachable from it.
    ///
    /// A `Vec` root is grown one element at a time for as long as input
    /// remains and each new element consumes some of it.
    pub(crate) fn run(
        &mut self,
        root: &mut Node,
        shape: &'static Shape,
        root_tags: Rc<FieldTags>,
    ) -> Result<(), ShapeError> {
        let element = match Kind::of(shape) {
            Kind::List(element) if self.visitor.can_grow() => element,
            _ => {
                let task = Task::root(shape, Vec::new(), ValuePath::root(), root_tags);
                return self.drain(root, task);
            }
        };

        conform(root, Kind::List(element), shape);
        while !self.consumer.is_empty() {
            let Node::List(items) = root else {
                break;
            };
            let index = items.len();
            items.push(Node::default_for(element));

            let before = self.consumer.consumed();
            let task = Task::root(
                element,
                vec![Step::Index(index)],
                ValuePath::root().extend(shape, Label::Index(index)),
                root_tags.clone(),
            );
            self.drain(root, task)?;

            if self.consumer.consumed() == before {
                debug!("root element [{index}] consumed nothing, no more growth");
                break;
            }
        }
        Ok(())
    }

    /// Runs `first` and everything it leads to. Deferred work runs in FIFO
    /// order, each item with its own inline stack.
    fn drain(&mut self, root: &mut Node, first: Task) -> Result<(), ShapeError> {
        let mut queue = WorkQueue::new();
        queue.push_back(first);
        let mut inline = Vec::new();

        while let Some(task) = queue.pop_front() {
            inline.push(Work::Visit(task));
            while let Some(work) = inline.pop() {
                let task = match work {
                    Work::Defer(task) => {
                        queue.push_back(task);
                        continue;
                    }
                    Work::Visit(task) => task,
                };
                if self.consumer.is_empty() {
                    debug!("input exhausted with {} deferred items pending", queue.len());
                    return Ok(());
                }
                let before = self.consumer.consumed();
                self.visit(root, &task, &mut inline)?;
                task.path.record_consumed(self.consumer.consumed() - before);
            }
        }
        Ok(())
    }

    fn resolve_tags(&self, root: &mut Node, task: &Task) -> Result<Rc<FieldTags>, ShapeError> {
        match task.tags {
            TaskTags::Ready(ref tags) => Ok(tags.clone()),
            TaskTags::Field { owner, field } => {
                let owner_route = task.route.split_last().map_or(&[][..], |(_, rest)| rest);
                let Some(receiver) = navigate(root, owner_route) else {
                    return Ok(Rc::default());
                };
                FieldTags::for_field(owner, field, receiver, self.methods).map(Rc::new)
            }
        }
    }

    /// Visits one value. Children that are visited inline go on `inline`
    /// in reverse, so they pop in order.
    fn visit(
        &mut self,
        root: &mut Node,
        task: &Task,
        inline: &mut Vec<Work>,
    ) -> Result<(), ShapeError> {
        let tags = self.resolve_tags(root, task)?;
        let Some(node) = navigate(root, &task.route) else {
            debug!("route {:?} no longer leads anywhere, skipping", task.route);
            return Ok(());
        };

        let shape = task.shape;
        let visit = Visit {
            shape,
            tags: &tags,
            path: &task.path,
        };
        trace!("visiting {}", task.path.render(shape));

        if tags.ignored {
            self.visitor.visit_ignored(&visit);
            return Ok(());
        }

        let kind = Kind::of(shape);
        conform(node, kind, shape);
        let c = &mut *self.consumer;

        match (kind, node, task.focus) {
            (Kind::Enum(ty), Node::Enum { variant, .. }, Focus::Variant) => {
                if !self.visitor.visit_struct(&visit) {
                    return Ok(());
                }
                let Some(selected) = ty.variants.get(*variant) else {
                    return Ok(());
                };
                let path = task.path.extend(shape, Label::Variant(selected.name));
                for (index, field) in selected.data.fields.iter().enumerate().rev() {
                    inline.push(Work::Visit(task.child(
                        Step::Field(index),
                        field.shape(),
                        TaskTags::Field {
                            owner: shape,
                            field,
                        },
                        path.extend(shape, Label::Field(field.name)),
                    )));
                }
            }
            (Kind::Bool, Node::Bool(v), _) => self.visitor.visit_bool(v, c, &visit),
            (Kind::Int(width), Node::Int(v), _) => self.visitor.visit_int(v, width, c, &visit),
            (Kind::Uint(width), Node::Uint(v), _) => self.visitor.visit_uint(v, width, c, &visit),
            (Kind::Float(width), Node::Float(v), _) => {
                self.visitor.visit_float(v, width, c, &visit);
            }
            (Kind::String, Node::String(v), _) => self.visitor.visit_string(v, c, &visit),
            (Kind::Struct(ty), Node::Struct(_), _) => {
                if !self.visitor.visit_struct(&visit) {
                    return Ok(());
                }
                let path = task.path.extend(shape, Label::Type);
                for (index, field) in ty.fields.iter().enumerate().rev() {
                    inline.push(Work::Visit(task.child(
                        Step::Field(index),
                        field.shape(),
                        TaskTags::Field {
                            owner: shape,
                            field,
                        },
                        path.extend(shape, Label::Field(field.name)),
                    )));
                }
            }
            (Kind::Option(pointee) | Kind::Pointer(pointee), node, _) => {
                self.visitor.visit_pointer(node, pointee, &visit);
                if matches!(node, Node::Option(Some(_)) | Node::Pointer(_)) {
                    inline.push(Work::Defer(task.child(
                        Step::Deref,
                        pointee,
                        TaskTags::Ready(Rc::default()),
                        task.path.extend(shape, Label::Deref),
                    )));
                }
            }
            (Kind::List(element), Node::List(items), focus) => {
                let start = if focus == Focus::Growth { items.len() } else { 0 };
                let added = self.visitor.visit_list(c, &visit);
                let end = start.saturating_add(added);
                items.resize(end, Node::default_for(element));

                if added != 0 && !tags.slice_range.is_explicit() && self.visitor.can_grow() {
                    inline.push(Work::Defer(task.refocus(
                        Focus::Growth,
                        TaskTags::Ready(tags.clone()),
                        task.path.clone(),
                    )));
                }
                for index in (start..end).rev() {
                    inline.push(Work::Visit(task.child(
                        Step::Index(index),
                        element,
                        TaskTags::Ready(tags.clone()),
                        task.path.extend(shape, Label::Index(index)),
                    )));
                }
            }
            (Kind::Array(element, len), Node::List(_), _) => {
                self.visitor.visit_array(&visit);
                for index in (0..len).rev() {
                    inline.push(Work::Visit(task.child(
                        Step::Index(index),
                        element,
                        TaskTags::Ready(Rc::default()),
                        task.path.extend(shape, Label::Index(index)),
                    )));
                }
            }
            (Kind::Set(element), Node::List(items), _) => {
                let count = self.visitor.visit_set(c, &visit);
                *items = vec![Node::default_for(element); count];
                for index in (0..count).rev() {
                    inline.push(Work::Visit(task.child(
                        Step::Index(index),
                        element,
                        TaskTags::Ready(tags.clone()),
                        task.path.extend(shape, Label::Index(index)),
                    )));
                }
            }
            (Kind::Map(key, value), Node::Map(entries), _) => {
                let count = self.visitor.visit_map(c, &visit);
                *entries = vec![(Node::default_for(key), Node::default_for(value)); count];
                for index in (0..count).rev() {
                    inline.push(Work::Visit(task.child(
                        Step::MapValue(index),
                        value,
                        TaskTags::Ready(tags.clone()),
                        task.path.extend(shape, Label::MapValue),
                    )));
                    inline.push(Work::Visit(task.child(
                        Step::MapKey(index),
                        key,
                        TaskTags::Ready(tags.clone()),
                        task.path.extend(shape, Label::MapKey),
                    )));
                }
            }
            (Kind::Enum(_), node, _) => {
                if self.visitor.visit_interface(node, c, &visit) {
                    inline.push(Work::Defer(task.refocus(
                        Focus::Variant,
                        TaskTags::Ready(Rc::default()),
                        task.path.clone(),
                    )));
                }
            }
            (Kind::Unsupported, _, _) => self.visitor.visit_unsupported(&visit),
            (kind, node, _) => {
                debug!("{kind:?} does not match {node:?}, skipping");
            }
        }
        Ok(())
    }
}
