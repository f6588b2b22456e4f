//! Lazily materialized, parent-linked view over a green tree.
//!
//! A red node is created the first time its parent is asked for the child at
//! that index. Creation races are settled by a compare-and-swap on the
//! child's slot: the first writer wins and every other candidate is dropped,
//! so all readers observe the same node.

use std::num::NonZeroUsize;
use std::ptr;

use once_cell::race::{OnceBox, OnceNonZeroUsize};
use text_size::{TextRange, TextSize};

use crate::green::GreenElement;

pub(crate) struct RedNode {
    green: GreenElement,
    parent: *const RedNode,
    index: usize,
    /// Start relative to the parent.
    start: TextSize,
    /// Absolute start plus one, computed on first request.
    absolute_start: OnceNonZeroUsize,
    children: Box<[OnceBox<RedNode>]>,
}

// SAFETY: `parent` points at the node owning the slot this node lives in.
// Nodes are boxed once, never moved, and freed only with the whole tree, so
// the pointer is valid for as long as `self` is reachable. All lazily
// written state sits behind atomic once-cells.
unsafe impl Send for RedNode {}
unsafe impl Sync for RedNode {}

impl RedNode {
    pub(crate) fn new_root(green: GreenElement) -> Box<Self> {
        Box::new(Self::new(green, ptr::null(), 0, TextSize::new(0)))
    }

    fn new(green: GreenElement, parent: *const RedNode, index: usize, start: TextSize) -> Self {
        let children = (0..green.child_count()).map(|_| OnceBox::new()).collect();
        Self { green, parent, index, start, absolute_start: OnceNonZeroUsize::new(), children }
    }

    #[inline]
    pub(crate) fn green(&self) -> &GreenElement {
        &self.green
    }

    #[inline]
    pub(crate) fn start(&self) -> TextSize {
        self.start
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<&RedNode> {
        // SAFETY: see the `Send`/`Sync` impls; a parent outlives its children.
        unsafe { self.parent.as_ref() }
    }

    pub(crate) fn absolute_start(&self) -> TextSize {
        let Some(parent) = self.parent() else {
            return self.start;
        };
        let encoded = self.absolute_start.get_or_init(|| {
            let start = parent.absolute_start() + self.start;
            NonZeroUsize::MIN.saturating_add(usize::from(start))
        });
        TextSize::new((encoded.get() - 1) as u32)
    }

    #[inline]
    pub(crate) fn child_count(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub(crate) fn child_range(&self, index: usize) -> Option<TextRange> {
        self.green.child_range(index)
    }

    pub(crate) fn child(&self, index: usize) -> Option<&RedNode> {
        let slot = self.children.get(index)?;
        Some(slot.get_or_init(|| {
            let green = self.green.child(index).expect("child slot without a green child");
            let range = self.green.child_range(index).expect("child slot without a range");
            Box::new(RedNode::new(green, self, index, range.start()))
        }))
    }

    /// Whether the child at `index` has been created already.
    #[cfg(test)]
    pub(crate) fn is_materialized(&self, index: usize) -> bool {
        self.children.get(index).is_some_and(|slot| slot.get().is_some())
    }
}
