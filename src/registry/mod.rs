//! State registry: the arena of states, grouped into parallel trees.
//!
//! Every state lives in exactly one tree and is addressed by a [`StateId`].
//! Parent links are kept by name and resolved within the state's tree each
//! time they are followed, so they may be changed at any point before a
//! transition walks them.

mod error;

pub use error::RegistryError;

use crate::core::{
    Directives, HookError, Phase, Response, Scope, StateDefinition, StateId, State, TreeId, ROOT,
};
use std::collections::HashMap;
use std::fmt;

/// A registered state.
pub struct StateNode<Env> {
    name: String,
    parent: Option<String>,
    tree: TreeId,
    behavior: Box<dyn State<Env>>,
}

impl<Env> StateNode<Env> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parent, if any. `None` and `Some("root")` both mean the
    /// state sits directly under the synthetic root.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref().filter(|parent| *parent != ROOT)
    }

    pub fn tree(&self) -> TreeId {
        self.tree
    }

    /// Always `true`: nodes only exist inside a registry.
    pub fn is_registered(&self) -> bool {
        true
    }
}

impl<Env> fmt::Debug for StateNode<Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

/// One element of an ancestor chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ancestor {
    State(StateId),
    /// The synthetic top-level ancestor every chain ends with.
    Root,
}

impl Ancestor {
    pub fn state(self) -> Option<StateId> {
        match self {
            Self::State(id) => Some(id),
            Self::Root => None,
        }
    }
}

#[derive(Debug)]
struct Tree {
    name: String,
    states: HashMap<String, StateId>,
    active: Option<StateId>,
}

impl Tree {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            states: HashMap::new(),
            active: None,
        }
    }
}

/// Owns every state of one statechart instance.
pub struct Registry<Env> {
    nodes: Vec<StateNode<Env>>,
    trees: Vec<Tree>,
    tree_index: HashMap<String, TreeId>,
    default_tree: TreeId,
    /// Default tree first, then every other tree in the order it first
    /// got an active state.
    activation: Vec<TreeId>,
}

impl<Env> Registry<Env> {
    /// Create a registry holding a single, empty default tree.
    pub fn new(default_tree: &str) -> Self {
        let mut registry = Self {
            nodes: Vec::new(),
            trees: Vec::new(),
            tree_index: HashMap::new(),
            default_tree: TreeId(0),
            activation: Vec::new(),
        };
        registry.default_tree = registry.ensure_tree(default_tree);
        registry.activation.push(registry.default_tree);
        registry
    }

    pub fn default_tree(&self) -> TreeId {
        self.default_tree
    }

    pub fn tree_id(&self, name: &str) -> Option<TreeId> {
        self.tree_index.get(name).copied()
    }

    pub fn tree_name(&self, tree: TreeId) -> Option<&str> {
        self.trees.get(tree.0).map(|t| t.name.as_str())
    }

    /// Trees in creation order; the default tree comes first.
    pub fn trees(&self) -> impl Iterator<Item = TreeId> + '_ {
        (0..self.trees.len()).map(TreeId)
    }

    /// Number of registered states across all trees.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Register a state built from `definition` under `name`.
    ///
    /// The tree is `tree` if given, else the tree the definition declares,
    /// else the default tree. Trees are created on first use. On
    /// `DuplicateState` the registry is left untouched.
    pub fn register(
        &mut self,
        tree: Option<&str>,
        name: &str,
        definition: StateDefinition<Env>,
    ) -> Result<StateId, RegistryError> {
        let tree_id = match tree.or(definition.tree.as_deref()) {
            Some(tree_name) => {
                if let Some(existing) = self.tree_id(tree_name) {
                    if self.trees[existing.0].states.contains_key(name) {
                        return Err(RegistryError::DuplicateState {
                            tree: tree_name.to_string(),
                            name: name.to_string(),
                        });
                    }
                }
                self.ensure_tree(tree_name)
            }
            None => {
                let default = self.default_tree;
                if self.trees[default.0].states.contains_key(name) {
                    return Err(RegistryError::DuplicateState {
                        tree: self.trees[default.0].name.clone(),
                        name: name.to_string(),
                    });
                }
                default
            }
        };

        let id = StateId(self.nodes.len());
        self.nodes.push(StateNode {
            name: name.to_string(),
            parent: definition.parent,
            tree: tree_id,
            behavior: definition.behavior,
        });
        self.trees[tree_id.0].states.insert(name.to_string(), id);

        tracing::debug!(
            tree = %self.trees[tree_id.0].name,
            state = name,
            "registered state"
        );
        Ok(id)
    }

    /// Find a state by tree and state name.
    pub fn lookup(&self, tree: &str, name: &str) -> Option<StateId> {
        self.tree_id(tree).and_then(|id| self.resolve(id, name))
    }

    /// Find a state by name within an already-resolved tree.
    pub fn resolve(&self, tree: TreeId, name: &str) -> Option<StateId> {
        self.trees.get(tree.0)?.states.get(name).copied()
    }

    pub fn node(&self, state: StateId) -> Option<&StateNode<Env>> {
        self.nodes.get(state.0)
    }

    /// States of `tree` in registration order.
    pub fn states_in(&self, tree: TreeId) -> impl Iterator<Item = StateId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.tree == tree)
            .map(|(index, _)| StateId(index))
    }

    pub fn active(&self, tree: TreeId) -> Option<StateId> {
        self.trees.get(tree.0).and_then(|t| t.active)
    }

    /// Trees dispatch visits: the default tree, then each other tree in
    /// the order it was first entered. Trees never entered are skipped.
    pub fn activated_trees(&self) -> impl Iterator<Item = TreeId> + '_ {
        self.activation.iter().copied()
    }

    pub(crate) fn set_active(&mut self, tree: TreeId, state: StateId) {
        if let Some(t) = self.trees.get_mut(tree.0) {
            t.active = Some(state);
            if !self.activation.contains(&tree) {
                self.activation.push(tree);
            }
        }
    }

    /// Re-point a state's parent link. `None` attaches it to the root.
    pub fn set_parent(
        &mut self,
        tree: &str,
        name: &str,
        parent: Option<&str>,
    ) -> Result<StateId, RegistryError> {
        let tree_id = self.tree_id(tree).ok_or_else(|| RegistryError::UnknownTree {
            tree: tree.to_string(),
        })?;
        let id = self
            .resolve(tree_id, name)
            .ok_or_else(|| RegistryError::UnknownState {
                tree: tree.to_string(),
                name: name.to_string(),
            })?;
        self.nodes[id.0].parent = parent.map(str::to_string);
        Ok(id)
    }

    /// The chain `[state, parent, grandparent, …, Root]`.
    ///
    /// Fails with `BrokenParentLink` when a declared parent does not exist
    /// in `tree`, and with `ParentCycle` when the links loop.
    pub fn ancestor_chain(
        &self,
        tree: TreeId,
        state: StateId,
    ) -> Result<Vec<Ancestor>, RegistryError> {
        let tree_ref = self.trees.get(tree.0).ok_or_else(|| RegistryError::UnknownTree {
            tree: tree.to_string(),
        })?;
        let node = self
            .nodes
            .get(state.0)
            .filter(|node| node.tree == tree)
            .ok_or_else(|| RegistryError::UnknownState {
                tree: tree_ref.name.clone(),
                name: state.to_string(),
            })?;

        let mut chain = vec![Ancestor::State(state)];
        let mut current = node;
        while let Some(parent_name) = current.parent_name() {
            let parent = tree_ref.states.get(parent_name).copied().ok_or_else(|| {
                RegistryError::BrokenParentLink {
                    tree: tree_ref.name.clone(),
                    state: current.name.clone(),
                    parent: parent_name.to_string(),
                }
            })?;
            if chain.contains(&Ancestor::State(parent)) {
                // `parent` is where the loop closes, so it lies on it.
                return Err(RegistryError::ParentCycle {
                    tree: tree_ref.name.clone(),
                    state: self.nodes[parent.0].name.clone(),
                });
            }
            chain.push(Ancestor::State(parent));
            current = &self.nodes[parent.0];
        }
        chain.push(Ancestor::Root);
        Ok(chain)
    }

    /// The resolved parent of `state`, or `None` when it has no parent or
    /// its parent cannot be found.
    pub(crate) fn parent_of(&self, state: StateId) -> Option<StateId> {
        let node = self.nodes.get(state.0)?;
        let parent = node.parent_name()?;
        self.resolve(node.tree, parent)
    }

    pub(crate) fn offer(
        &mut self,
        state: StateId,
        action: &str,
        sender: Option<&str>,
        context: &Env,
        directives: &mut Directives,
    ) -> Response {
        let Some(node) = self.nodes.get_mut(state.0) else {
            return Response::Unhandled;
        };
        let tree = self.trees[node.tree.0].name.as_str();
        let mut scope = Scope::new(&node.name, tree, directives);
        node.behavior
            .try_to_perform(action, sender, context, &mut scope)
    }

    pub(crate) fn run_hook(
        &mut self,
        state: StateId,
        phase: Phase,
        directives: &mut Directives,
    ) -> Result<(), HookError> {
        let Some(node) = self.nodes.get_mut(state.0) else {
            return Ok(());
        };
        let tree = self.trees[node.tree.0].name.as_str();
        let mut scope = Scope::new(&node.name, tree, directives);
        match phase {
            Phase::Enter => node.behavior.enter_state(&mut scope),
            Phase::Exit => node.behavior.exit_state(&mut scope),
        }
    }

    fn ensure_tree(&mut self, name: &str) -> TreeId {
        if let Some(id) = self.tree_id(name) {
            return id;
        }
        let id = TreeId(self.trees.len());
        self.trees.push(Tree::new(name));
        self.tree_index.insert(name.to_string(), id);
        id
    }
}

impl<Env> fmt::Debug for Registry<Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("nodes", &self.nodes)
            .field("trees", &self.trees)
            .field("default_tree", &self.default_tree)
            .field("activation", &self.activation)
            .finish()
    }
}
