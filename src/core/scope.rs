//! The view a state gets of its statechart while one of its hooks runs.

use std::collections::VecDeque;

/// A transition requested by a state from inside a hook or handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    /// Name of the state to go to.
    pub target: String,
    /// Name of the tree the target lives in.
    pub tree: String,
}

/// Ordered queue of pending directives.
#[derive(Debug, Default)]
pub(crate) struct Directives {
    queue: VecDeque<Directive>,
}

impl Directives {
    pub(crate) fn push(&mut self, directive: Directive) {
        self.queue.push_back(directive);
    }

    pub(crate) fn pop(&mut self) -> Option<Directive> {
        self.queue.pop_front()
    }

    pub(crate) fn clear(&mut self) {
        self.queue.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Handed to every [`State`](crate::core::State) callback.
///
/// A state cannot borrow the statechart that owns it, so it asks for
/// transitions through its scope instead. Requests made while an action is
/// being offered run as soon as the handler returns; requests made from an
/// enter or exit hook run once the surrounding transition has completed.
/// Requests are processed first-in, first-out, and a chain of requests that
/// never settles will never return.
pub struct Scope<'a> {
    name: &'a str,
    tree: &'a str,
    directives: &'a mut Directives,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(name: &'a str, tree: &'a str, directives: &'a mut Directives) -> Self {
        Self {
            name,
            tree,
            directives,
        }
    }

    /// Name the state was registered under.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Name of the tree the state belongs to.
    pub fn tree(&self) -> &str {
        self.tree
    }

    /// Request a transition within this state's own tree.
    pub fn go_to_state(&mut self, target: impl Into<String>) {
        let tree = self.tree.to_string();
        self.go_to_state_in(target, tree);
    }

    /// Request a transition in another parallel tree.
    pub fn go_to_state_in(&mut self, target: impl Into<String>, tree: impl Into<String>) {
        self.directives.push(Directive {
            target: target.into(),
            tree: tree.into(),
        });
    }
}
