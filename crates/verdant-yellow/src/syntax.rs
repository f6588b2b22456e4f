//! Public syntax tree API built on lazily created, parent-linked red nodes.

use std::fmt;
use std::ptr;

use text_size::{TextRange, TextSize};
use verdant_errors::{Diagnostic, Severity};
use verdant_span::{HasTextLen, SINGLE_CHAR_LEN};

use crate::SyntaxKind;
use crate::cursor::{Preorder, WalkEvent};
use crate::green::{GreenElement, GreenMultiValue};
use crate::red::RedNode;

/// Owned syntax tree for a single source text, with the diagnostics produced
/// while parsing it.
pub struct SyntaxTree {
    text: Box<str>,
    root: Box<RedNode>,
    diagnostics: Box<[Diagnostic]>,
}

impl SyntaxTree {
    /// # Panics
    ///
    /// Panics if `root` does not span exactly `text`.
    pub fn new(
        text: impl Into<Box<str>>,
        root: GreenMultiValue,
        diagnostics: impl Into<Box<[Diagnostic]>>,
    ) -> Self {
        let text = text.into();
        assert_eq!(root.text_len(), TextSize::of(&*text), "the root must span the whole text");
        Self { text, root: RedNode::new_root(root.into()), diagnostics: diagnostics.into() }
    }

    /// Returns the root syntax node, always a `MULTI_VALUE`.
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, node: &self.root }
    }

    /// Returns the root's green node.
    pub fn green(&self) -> &GreenMultiValue {
        match self.root.green() {
            GreenElement::MultiValue(root) => root,
            _ => unreachable!("the root is a multi-value"),
        }
    }

    /// Returns the full source text for this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns every diagnostic, sorted by start offset.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|diagnostic| diagnostic.severity() == Severity::Error)
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("text_len", &self.text.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish_non_exhaustive()
    }
}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    node: &'a RedNode,
}

impl<'a> SyntaxNode<'a> {
    #[inline]
    fn with(self, node: &'a RedNode) -> Self {
        Self { tree: self.tree, node }
    }

    /// Returns this node's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.node.green().kind()
    }

    /// Returns the underlying green node.
    #[inline]
    pub fn green(self) -> &'a GreenElement {
        self.node.green()
    }

    /// Returns the tree this node belongs to.
    #[inline]
    pub fn tree(self) -> &'a SyntaxTree {
        self.tree
    }

    /// Returns the parent node, or `None` for the root.
    #[inline]
    pub fn parent(self) -> Option<Self> {
        Some(self.with(self.node.parent()?))
    }

    /// Returns an iterator over this node and its ancestors.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        std::iter::successors(Some(self), |node| node.parent())
    }

    /// Returns this node's index among its parent's children.
    #[inline]
    pub fn index(self) -> usize {
        self.node.index()
    }

    #[inline]
    pub fn child_count(self) -> usize {
        self.node.child_count()
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self.child_count() == 0
    }

    /// Returns the child at `index`, creating it if needed.
    #[inline]
    pub fn child(self, index: usize) -> Option<Self> {
        Some(self.with(self.node.child(index)?))
    }

    /// Returns the range of the child at `index`, relative to this node,
    /// without creating the child.
    #[inline]
    pub fn child_range(self, index: usize) -> Option<TextRange> {
        self.node.child_range(index)
    }

    /// Iterates over all children, creating them as it goes.
    #[inline]
    pub fn children(self) -> Children<'a> {
        Children { parent: self, next: 0, end: self.child_count() }
    }

    #[inline]
    pub fn first_child(self) -> Option<Self> {
        self.child(0)
    }

    #[inline]
    pub fn last_child(self) -> Option<Self> {
        self.child(self.child_count().checked_sub(1)?)
    }

    #[inline]
    pub fn next_sibling(self) -> Option<Self> {
        self.parent()?.child(self.index() + 1)
    }

    #[inline]
    pub fn prev_sibling(self) -> Option<Self> {
        self.parent()?.child(self.index().checked_sub(1)?)
    }

    /// Returns the start of this node relative to its parent.
    #[inline]
    pub fn start(self) -> TextSize {
        self.node.start()
    }

    /// Returns the absolute start, computed once per node.
    #[inline]
    pub fn absolute_start(self) -> TextSize {
        self.node.absolute_start()
    }

    #[inline]
    pub fn text_len(self) -> TextSize {
        self.green().text_len()
    }

    /// Returns the absolute range covered by this node.
    #[inline]
    pub fn text_range(self) -> TextRange {
        TextRange::at(self.absolute_start(), self.text_len())
    }

    /// Returns the source text covered by this node.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the index of the first child containing `offset`, which is
    /// relative to this node. Empty children never contain an offset.
    pub fn child_index_at_offset(self, offset: TextSize) -> Option<usize> {
        let index = partition_children(self.node, |range| range.end() <= offset);
        let range = self.child_range(index)?;
        (range.start() <= offset).then_some(index)
    }

    /// Returns the deepest node whose range contains `offset`, relative to
    /// this node.
    pub fn node_at_offset(self, offset: TextSize) -> Option<Self> {
        if offset >= self.text_len() {
            return None;
        }
        let mut node = self;
        let mut offset = offset;
        while let Some(index) = node.child_index_at_offset(offset) {
            let child = node.child(index)?;
            offset -= child.start();
            node = child;
        }
        Some(node)
    }

    /// Iterates over every terminal node in document order, empty ones
    /// included.
    pub fn terminals(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(node) if node.is_terminal() => Some(node),
            _ => None,
        })
    }

    /// Iterates over the non-empty terminals intersecting `range`, which is
    /// relative to this node. An empty range selects the terminal starting
    /// or continuing at that position.
    pub fn terminals_in_range(self, range: TextRange) -> TerminalsInRange<'a> {
        let range =
            if range.is_empty() { TextRange::at(range.start(), SINGLE_CHAR_LEN) } else { range };
        let range = range + self.absolute_start();
        TerminalsInRange { range, root: Some(self), stack: Vec::new() }
    }

    /// Walks this subtree, entering and leaving every node.
    #[inline]
    pub fn preorder(self) -> Preorder<'a> {
        Preorder::new(self)
    }

    /// Renders the subtree one node per line, with terminal text.
    pub fn debug_dump(self) -> String {
        let mut out = String::new();
        let mut depth = 0;
        for event in self.preorder() {
            match event {
                WalkEvent::Enter(node) => {
                    out.push_str(&format!("{:indent$}{node:?}", "", indent = depth * 2));
                    if node.is_terminal() && !node.text_range().is_empty() {
                        out.push_str(&format!(" {:?}", node.text()));
                    }
                    out.push('\n');
                    depth += 1;
                }
                WalkEvent::Leave(_) => depth -= 1,
            }
        }
        out
    }
}

impl PartialEq for SyntaxNode<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.node, other.node)
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

/// Number of leading children whose range satisfies `pred`, which must hold
/// for a prefix of the children and fail for the rest.
fn partition_children(node: &RedNode, pred: impl Fn(TextRange) -> bool) -> usize {
    let (mut low, mut high) = (0, node.child_count());
    while low < high {
        let mid = low + (high - low) / 2;
        if node.child_range(mid).is_some_and(&pred) {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low
}

/// Iterator over the children of a node.
#[derive(Clone)]
pub struct Children<'a> {
    parent: SyntaxNode<'a>,
    next: usize,
    end: usize,
}

impl<'a> Iterator for Children<'a> {
    type Item = SyntaxNode<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.end {
            return None;
        }
        let child = self.parent.child(self.next);
        self.next += 1;
        child
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.next;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Children<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next == self.end {
            return None;
        }
        self.end -= 1;
        self.parent.child(self.end)
    }
}

impl ExactSizeIterator for Children<'_> {}

struct Frame<'a> {
    node: SyntaxNode<'a>,
    next: usize,
    end: usize,
}

impl<'a> Frame<'a> {
    /// Restricts the walk of `node` to children that may intersect `range`.
    fn new(node: SyntaxNode<'a>, range: TextRange) -> Self {
        let base = node.absolute_start();
        let start = range.start().checked_sub(base).unwrap_or_default();
        let end = range.end().checked_sub(base).unwrap_or_default();
        let next = partition_children(node.node, |child| child.end() <= start);
        let end = partition_children(node.node, |child| child.start() < end).max(next);
        Self { node, next, end }
    }
}

/// Depth-first iterator over terminals intersecting an absolute range.
///
/// Only the subtrees that may intersect the range are visited, so the cost
/// is proportional to the depth of the tree plus the number of results.
pub struct TerminalsInRange<'a> {
    range: TextRange,
    root: Option<SyntaxNode<'a>>,
    stack: Vec<Frame<'a>>,
}

impl TerminalsInRange<'_> {
    fn intersects(&self, range: TextRange) -> bool {
        !range.is_empty() && range.start() < self.range.end() && self.range.start() < range.end()
    }
}

impl<'a> Iterator for TerminalsInRange<'a> {
    type Item = SyntaxNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            if root.is_terminal() {
                return self.intersects(root.text_range()).then_some(root);
            }
            self.stack.push(Frame::new(root, self.range));
        }

        loop {
            let frame = self.stack.last_mut()?;
            if frame.next >= frame.end {
                self.stack.pop();
                continue;
            }
            let child = frame.node.child(frame.next)?;
            frame.next += 1;

            if !child.is_terminal() {
                self.stack.push(Frame::new(child, self.range));
            } else if self.intersects(child.text_range()) {
                return Some(child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use triomphe::Arc;

    use super::*;
    use crate::ast::{self, Node as _};
    use crate::green::{
        GreenBackground, GreenBackgroundList, GreenList, GreenStringLiteral, GreenValue,
        GreenValueWithBackground, StringSegment,
    };

    const TEXT: &str = "// c\n[true, \"a\"]";

    fn background(nodes: impl IntoIterator<Item = GreenBackground>) -> GreenBackgroundList {
        GreenBackgroundList::new(nodes)
    }

    fn item(leading: GreenBackgroundList, value: GreenValue) -> GreenMultiValue {
        GreenMultiValue::new(
            [GreenValueWithBackground::new(leading, value)],
            GreenBackgroundList::empty(),
        )
    }

    fn tree() -> SyntaxTree {
        let string = GreenStringLiteral::new(vec![StringSegment::Raw("a".into())]);
        let list = GreenList::new(
            [
                item(GreenBackgroundList::empty(), true.into()),
                item(
                    background([GreenBackground::Whitespace(1.into())]),
                    GreenValue::String(Arc::new(string)),
                ),
            ],
            false,
        );
        let root = item(
            background([GreenBackground::Comment(4.into()), GreenBackground::Whitespace(1.into())]),
            GreenValue::List(Arc::new(list)),
        );
        SyntaxTree::new(TEXT, root, [])
    }

    #[test]
    fn dump() {
        let tree = tree();
        expect![[r#"
            MULTI_VALUE@0..16
              VALUE_WITH_BACKGROUND@0..16
                BACKGROUND_LIST@0..5
                  COMMENT@0..4 "// c"
                  WHITESPACE@4..5 "\n"
                LIST@5..16
                  BRACKET_OPEN@5..6 "["
                  MULTI_VALUE@6..10
                    VALUE_WITH_BACKGROUND@6..10
                      BACKGROUND_LIST@6..6
                      BOOLEAN@6..10 "true"
                    BACKGROUND_LIST@10..10
                  COMMA@10..11 ","
                  MULTI_VALUE@11..15
                    VALUE_WITH_BACKGROUND@11..15
                      BACKGROUND_LIST@11..12
                        WHITESPACE@11..12 " "
                      STRING@12..15 "\"a\""
                    BACKGROUND_LIST@15..15
                  BRACKET_CLOSE@15..16 "]"
              BACKGROUND_LIST@16..16
        "#]]
        .assert_eq(&tree.root().debug_dump());
    }

    #[test]
    #[should_panic(expected = "the root must span the whole text")]
    fn root_must_span_text() {
        SyntaxTree::new("true ", item(GreenBackgroundList::empty(), true.into()), []);
    }

    #[test]
    fn children_are_created_lazily() {
        let tree = tree();
        let root = tree.root();
        assert!(!root.node.is_materialized(0));
        assert!(!root.node.is_materialized(1));

        let value = root.child(0).unwrap();
        assert!(root.node.is_materialized(0));
        assert!(!root.node.is_materialized(1));
        assert!(!value.node.is_materialized(1));

        assert_eq!(root.child(0), Some(value));
        assert_eq!(root.child(2), None);
        assert_eq!(root.child_range(1), Some(TextRange::empty(16.into())));
    }

    #[test]
    fn positions_and_parents() {
        let tree = tree();
        let list = tree.root().child(0).unwrap().child(1).unwrap();
        assert_eq!(list.kind(), SyntaxKind::LIST);
        assert_eq!(list.start(), TextSize::new(5));
        assert_eq!(list.text(), "[true, \"a\"]");

        let string = list.child(3).unwrap().child(0).unwrap().child(1).unwrap();
        assert_eq!(string.kind(), SyntaxKind::STRING);
        assert_eq!(string.start(), TextSize::new(1));
        assert_eq!(string.absolute_start(), TextSize::new(12));
        assert_eq!(string.text(), "\"a\"");

        let kinds = string.ancestors().map(SyntaxNode::kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [
                SyntaxKind::STRING,
                SyntaxKind::VALUE_WITH_BACKGROUND,
                SyntaxKind::MULTI_VALUE,
                SyntaxKind::LIST,
                SyntaxKind::VALUE_WITH_BACKGROUND,
                SyntaxKind::MULTI_VALUE,
            ]
        );
        assert_eq!(list.child(2).unwrap().prev_sibling(), list.child(1));
        assert_eq!(list.child(2).unwrap().next_sibling(), list.child(3));
    }

    #[test]
    fn offsets() {
        let tree = tree();
        let root = tree.root();
        assert_eq!(root.child_index_at_offset(0.into()), Some(0));
        assert_eq!(root.child_index_at_offset(16.into()), None);

        let list = root.child(0).unwrap().child(1).unwrap();
        assert_eq!(list.child_index_at_offset(5.into()), Some(2));
        assert_eq!(list.child_index_at_offset(6.into()), Some(3));

        let node = root.node_at_offset(11.into()).unwrap();
        assert_eq!(node.kind(), SyntaxKind::WHITESPACE);
        assert_eq!(root.node_at_offset(16.into()), None);
    }

    #[test]
    fn terminals_cover_the_text() {
        let tree = tree();
        let text = tree.root().terminals().map(SyntaxNode::text).collect::<String>();
        assert_eq!(text, TEXT);
    }

    #[test]
    fn terminals_in_range() {
        let tree = tree();
        let root = tree.root();
        let found = |range: TextRange| {
            root.terminals_in_range(range).map(|node| format!("{node:?}")).collect::<Vec<_>>()
        };

        expect![[r#"
            [
                "BOOLEAN@6..10",
                "COMMA@10..11",
                "WHITESPACE@11..12",
            ]
        "#]]
        .assert_debug_eq(&found(TextRange::new(7.into(), 12.into())));
        expect![[r#"
            [
                "BOOLEAN@6..10",
            ]
        "#]]
        .assert_debug_eq(&found(TextRange::empty(6.into())));
        expect![[r#"
            [
                "COMMENT@0..4",
                "WHITESPACE@4..5",
                "BRACKET_OPEN@5..6",
            ]
        "#]]
        .assert_debug_eq(&found(TextRange::up_to(6.into())));
        assert!(found(TextRange::empty(16.into())).is_empty());

        let list = root.child(0).unwrap().child(1).unwrap();
        let inner = list.terminals_in_range(TextRange::new(0.into(), 1.into())).collect::<Vec<_>>();
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].kind(), SyntaxKind::BRACKET_OPEN);
    }

    #[test]
    fn concurrent_materialization_agrees() {
        let tree = tree();
        let walk = || {
            tree.root()
                .preorder()
                .filter_map(|event| match event {
                    WalkEvent::Enter(node) => Some(node),
                    WalkEvent::Leave(_) => None,
                })
                .collect::<Vec<_>>()
        };

        let walks = std::thread::scope(|scope| {
            let handles = (0..8).map(|_| scope.spawn(walk)).collect::<Vec<_>>();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect::<Vec<_>>()
        });

        let expected = walk();
        for nodes in walks {
            assert_eq!(nodes, expected);
        }
    }

    #[test]
    fn kind_predicates_match_the_layout() {
        let tree = tree();
        let mut punctuation = 0;
        for event in tree.root().preorder() {
            let WalkEvent::Enter(node) = event else { continue };
            let kind = node.kind();
            assert_eq!(kind.is_value(), ast::Value::cast(node).is_some(), "{node:?}");
            let parent = node.parent().map(SyntaxNode::kind);
            let in_background = parent == Some(SyntaxKind::BACKGROUND_LIST);
            assert_eq!(kind.is_background(), in_background, "{node:?}");
            if kind.is_punctuation() {
                assert!(node.is_terminal() && !kind.is_value() && !kind.is_background());
                punctuation += 1;
            }
        }
        assert_eq!(punctuation, 3);
    }

    #[test]
    fn typed_views() {
        let tree = tree();
        let root = ast::MultiValue::cast(tree.root()).unwrap();
        let ast::Value::List(list) = root.value() else { panic!("expected a list") };
        assert!(list.is_closed());

        let items = list.items().map(|item| item.value()).collect::<Vec<_>>();
        let [ast::Value::Boolean(first), ast::Value::String(second)] = items[..] else {
            panic!("unexpected items: {items:?}")
        };
        assert!(first.value());
        assert_eq!(second.value(), "a");
        assert_eq!(root.trailing_background().nodes().len(), 0);
        assert_eq!(root.values().next().unwrap().background().nodes().len(), 2);
    }
}
