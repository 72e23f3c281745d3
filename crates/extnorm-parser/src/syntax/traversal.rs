//! Post-order traversal driver.
//!
//! The traversal only hands out shared access to the arena, so callbacks
//! can inspect the tree and record what to change but cannot mutate it.

use crate::parser::{NodeArena, NodeIndex};
use extnorm_common::{Diagnostic, DiagnosticMessage};

pub trait PostOrderCallback {
    /// Called before `n`'s children are visited; `false` skips the subtree.
    fn should_traverse(&mut self, _t: &NodeTraversal<'_>, _n: NodeIndex, _parent: NodeIndex) -> bool {
        true
    }

    /// Called after all of `n`'s children have been visited.
    fn visit(&mut self, t: &NodeTraversal<'_>, n: NodeIndex, parent: NodeIndex);
}

pub struct NodeTraversal<'a> {
    arena: &'a NodeArena,
}

impl<'a> NodeTraversal<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        NodeTraversal { arena }
    }

    /// Visit every node under `root` children-first, in source order.
    pub fn traverse(arena: &'a NodeArena, root: NodeIndex, callback: &mut impl PostOrderCallback) {
        NodeTraversal::new(arena).traverse_from(root, callback);
    }

    pub fn traverse_from(&self, root: NodeIndex, callback: &mut impl PostOrderCallback) {
        enum Step {
            Enter(NodeIndex, NodeIndex),
            Exit(NodeIndex, NodeIndex),
        }

        let mut stack = vec![Step::Enter(root, self.arena.parent(root))];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(n, parent) => {
                    if self.arena.get(n).is_none() || !callback.should_traverse(self, n, parent) {
                        continue;
                    }
                    stack.push(Step::Exit(n, parent));
                    for &child in self.arena.children(n).iter().rev() {
                        stack.push(Step::Enter(child, n));
                    }
                }
                Step::Exit(n, parent) => callback.visit(self, n, parent),
            }
        }
    }

    #[inline]
    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    pub fn source_name(&self) -> &'a str {
        self.arena.file_name()
    }

    /// An error diagnostic spanning `n`.
    pub fn make_error(&self, n: NodeIndex, message: &DiagnosticMessage, args: &[&str]) -> Diagnostic {
        let (start, length) = self
            .arena
            .get(n)
            .map_or((0, 0), |node| (node.pos, node.end.saturating_sub(node.pos)));
        Diagnostic::from_message(self.source_name(), start, length, message, args)
    }
}
