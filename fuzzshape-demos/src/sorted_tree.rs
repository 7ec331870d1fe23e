//! An unbalanced binary search tree over strings, and the step type used to
//! fuzz it.

use core::cmp::Ordering;
use core::fmt;

use facet::Facet;
use fuzzshape as fuzz;

#[derive(Debug)]
struct TreeNode {
    value: String,
    smaller: Option<Box<TreeNode>>,
    larger: Option<Box<TreeNode>>,
}

/// Keeps strings sorted as they are added. Duplicates are kept.
#[derive(Debug, Default)]
pub struct SortedTree {
    size: usize,
    root: Option<Box<TreeNode>>,
}

impl SortedTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value`. Equal values go to the larger side.
    pub fn add(&mut self, value: impl Into<String>) {
        let value = value.into();
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match value.cmp(&node.value) {
                Ordering::Less => &mut node.smaller,
                Ordering::Equal | Ordering::Greater => &mut node.larger,
            };
        }
        *slot = Some(Box::new(TreeNode {
            value,
            smaller: None,
            larger: None,
        }));
        self.size += 1;
    }

    /// The smallest value, if any.
    pub fn least(&self) -> Option<&str> {
        let mut node = self.root.as_deref()?;
        while let Some(smaller) = node.smaller.as_deref() {
            node = smaller;
        }
        Some(&node.value)
    }

    /// The largest value, if any.
    pub fn greatest(&self) -> Option<&str> {
        let mut node = self.root.as_deref()?;
        while let Some(larger) = node.larger.as_deref() {
            node = larger;
        }
        Some(&node.value)
    }

    /// Number of values added.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether nothing was added yet.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl Drop for SortedTree {
    // sorted input degenerates into a list; drop it without recursing
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.smaller.take());
            pending.extend(node.larger.take());
        }
    }
}

impl fmt::Display for SortedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size: {}, least: {:?}, greatest: {:?}",
            self.size,
            self.least(),
            self.greatest()
        )
    }
}

/// One value to add, followed by the rest of the run.
#[derive(Facet, Debug, Default)]
pub struct SortedTreeFuzzStep {
    /// Added to the tree
    #[facet(fuzz::string_range = "1,256")]
    pub value: String,
    /// The following step, if the input lasted that long
    pub next_step: Option<Box<SortedTreeFuzzStep>>,
}

impl SortedTreeFuzzStep {
    /// Iterates over this step and every step after it.
    pub fn iter(&self) -> impl Iterator<Item = &SortedTreeFuzzStep> {
        core::iter::successors(Some(self), |step| step.next_step.as_deref())
    }
}
