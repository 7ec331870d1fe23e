use std::collections::VecDeque;

/// Double-ended queue of pending work.
///
/// The engine pushes deferred work at the back and pops from the front, so
/// deferred pointees, variants and list growth run in the order they were
/// found.
#[derive(Debug)]
pub struct WorkQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WorkQueue<T> {
    /// An empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Queues `item` last.
    pub fn push_back(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Queues `item` first.
    pub fn push_front(&mut self, item: T) {
        self.items.push_front(item);
    }

    /// Takes the first item.
    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Takes the last item.
    pub fn pop_back(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Extend<T> for WorkQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
