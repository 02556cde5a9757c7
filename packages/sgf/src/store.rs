//! Arena holding every node of a game record

use crate::{Node, NodeId};
use std::ops::{Index, IndexMut};

/// Node arena
///
/// Slots of freed nodes are recycled. A node is only freed on explicit
/// request, so a detached node keeps its handle, content and even its
/// `parent`/`next_sibling` links until it is either spliced back in or
/// released for good.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    slots: Vec<Option<Node>>,
    free: Vec<u32>,
    live: usize,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes, linked or not
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Allocate a node under `parent` without linking it into the
    /// parent's child chain
    pub fn create(&mut self, parent: Option<NodeId>) -> NodeId {
        let node = Node::with_parent(parent);
        self.live += 1;

        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(node);
                NodeId(index)
            }
            None => {
                let index = u32::try_from(self.slots.len()).expect("node arena exhausted");
                self.slots.push(Some(node));
                NodeId(index)
            }
        }
    }

    /// Splice a detached node into its parent's child chain
    ///
    /// The node goes back in front of its remembered `next_sibling`; a
    /// node without one is appended as the last child.
    pub fn link(&mut self, id: NodeId) {
        let parent = self[id].parent.expect("cannot link a root node");
        let next = self[id].next_sibling;

        match self.predecessor_of(parent, next) {
            Some(previous) => self[previous].next_sibling = Some(id),
            None => self[parent].first_child = Some(id),
        }
    }

    /// Detach a node (and its subtree) from its parent's child chain
    ///
    /// The node keeps its `next_sibling` so [`link`](Self::link) can put
    /// it back in the same place.
    pub fn unlink(&mut self, id: NodeId) {
        let parent = self[id].parent.expect("cannot unlink a root node");
        let next = self[id].next_sibling;

        match self.predecessor_of(parent, Some(id)) {
            Some(previous) => self[previous].next_sibling = next,
            None => {
                debug_assert_eq!(self[parent].first_child, Some(id), "node {id} is not linked");
                self[parent].first_child = next;
            }
        }
    }

    /// Detach the whole child chain of `parent`, returning its head
    pub fn unlink_children(&mut self, parent: NodeId) -> Option<NodeId> {
        self[parent].first_child.take()
    }

    /// Reattach a chain previously returned by
    /// [`unlink_children`](Self::unlink_children)
    pub fn link_children(&mut self, parent: NodeId, first_child: NodeId) {
        debug_assert!(self[parent].first_child.is_none(), "node {parent} already has children");
        self[parent].first_child = Some(first_child);
    }

    /// Exchange the positions of two children of the same parent
    pub fn swap_siblings(&mut self, first: NodeId, second: NodeId) {
        let parent = self[first].parent.expect("cannot reorder a root node");
        assert_eq!(self[second].parent, Some(parent), "nodes {first} and {second} are not siblings");

        let mut children: Vec<NodeId> = self.children(parent).collect();
        let a = children.iter().position(|child| *child == first).expect("node is not linked");
        let b = children.iter().position(|child| *child == second).expect("node is not linked");
        children.swap(a, b);

        self[parent].first_child = children.first().copied();
        for pair in children.windows(2) {
            self[pair[0]].next_sibling = Some(pair[1]);
        }
        if let Some(last) = children.last() {
            self[*last].next_sibling = None;
        }
    }

    /// Point `parent` at the child the cursor should follow
    pub fn set_current_variation(&mut self, parent: NodeId, child: Option<NodeId>) {
        if let Some(child) = child {
            assert_eq!(self[child].parent, Some(parent), "node {child} is not a child of {parent}");
        }
        self[parent].current_variation = child;
    }

    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            store: self,
            next: self[parent].first_child,
        }
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self[id].parent?;
        self.predecessor_of(parent, Some(id))
    }

    /// Number of edges from `ancestor` down to `descendant`, if
    /// `ancestor` lies on the path from the root to `descendant`
    pub fn depth_delta(&self, ancestor: NodeId, descendant: NodeId) -> Option<usize> {
        let mut delta = 0;
        let mut node = descendant;

        loop {
            if node == ancestor {
                return Some(delta);
            }
            node = self[node].parent?;
            delta += 1;
        }
    }

    /// `id` followed by each of its ancestors up to the root
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut node = id;
        while let Some(parent) = self[node].parent {
            path.push(parent);
            node = parent;
        }
        path
    }

    /// Release a node and everything below it
    pub fn free_subtree(&mut self, id: NodeId) {
        let first_child = match self.release(id) {
            Some(node) => node.first_child,
            None => return,
        };

        if let Some(first_child) = first_child {
            self.free_chain(first_child);
        }
    }

    /// Release a sibling chain starting at `first` with all subtrees
    ///
    /// Already released nodes are skipped.
    pub fn free_chain(&mut self, first: NodeId) {
        let mut pending = vec![first];

        while let Some(id) = pending.pop() {
            let Some(node) = self.release(id) else {
                continue;
            };
            pending.extend(node.next_sibling);
            pending.extend(node.first_child);
        }
    }

    fn release(&mut self, id: NodeId) -> Option<Node> {
        let node = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id.0);
        self.live -= 1;
        Some(node)
    }

    /// Child of `parent` linked right before `target` (`None` meaning
    /// the end of the chain), or `None` if `target` heads the chain
    fn predecessor_of(&self, parent: NodeId, target: Option<NodeId>) -> Option<NodeId> {
        let mut previous = None;
        let mut current = self[parent].first_child;

        while current != target {
            let node = current.expect("sibling not found in the parent's child chain");
            previous = Some(node);
            current = self[node].next_sibling;
        }

        previous
    }
}

impl Index<NodeId> for NodeStore {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id).unwrap_or_else(|| panic!("node {id} has been freed"))
    }
}

impl IndexMut<NodeId> for NodeStore {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.get_mut(id).unwrap_or_else(|| panic!("node {id} has been freed"))
    }
}

/// Iterator over a node's children, first child first
pub struct Children<'a> {
    store: &'a NodeStore,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.store[current].next_sibling;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_children(count: usize) -> (NodeStore, NodeId, Vec<NodeId>) {
        let mut store = NodeStore::new();
        let root = store.create(None);
        let children = (0..count)
            .map(|_| {
                let child = store.create(Some(root));
                store.link(child);
                child
            })
            .collect();
        (store, root, children)
    }

    #[test]
    fn test_link_appends_in_order() {
        let (store, root, children) = tree_with_children(3);
        assert_eq!(store.children(root).collect::<Vec<_>>(), children);
        assert_eq!(store.previous_sibling(children[2]), Some(children[1]));
        assert_eq!(store.previous_sibling(children[0]), None);
    }

    #[test]
    fn test_unlink_then_link_restores_position() {
        let (mut store, root, children) = tree_with_children(3);

        store.unlink(children[1]);
        assert_eq!(store.children(root).collect::<Vec<_>>(), vec![children[0], children[2]]);

        store.link(children[1]);
        assert_eq!(store.children(root).collect::<Vec<_>>(), children);

        store.unlink(children[0]);
        store.link(children[0]);
        assert_eq!(store.children(root).collect::<Vec<_>>(), children);
    }

    #[test]
    fn test_swap_siblings() {
        let (mut store, root, children) = tree_with_children(3);

        store.swap_siblings(children[0], children[2]);
        assert_eq!(
            store.children(root).collect::<Vec<_>>(),
            vec![children[2], children[1], children[0]]
        );

        store.swap_siblings(children[0], children[2]);
        assert_eq!(store.children(root).collect::<Vec<_>>(), children);
    }

    #[test]
    fn test_depth_delta_and_path() {
        let mut store = NodeStore::new();
        let root = store.create(None);
        let a = store.create(Some(root));
        store.link(a);
        let b = store.create(Some(a));
        store.link(b);
        let side = store.create(Some(root));
        store.link(side);

        assert_eq!(store.depth_delta(root, b), Some(2));
        assert_eq!(store.depth_delta(b, b), Some(0));
        assert_eq!(store.depth_delta(side, b), None);
        assert_eq!(store.path_to_root(b), vec![b, a, root]);
    }

    #[test]
    fn test_free_subtree_recycles_slots() {
        let mut store = NodeStore::new();
        let root = store.create(None);
        let a = store.create(Some(root));
        store.link(a);
        let b = store.create(Some(a));
        store.link(b);
        assert_eq!(store.len(), 3);

        store.unlink(a);
        store.free_subtree(a);
        assert_eq!(store.len(), 1);
        assert!(!store.contains(a));
        assert!(!store.contains(b));

        store.free_chain(a);
        assert_eq!(store.len(), 1);

        let reused = store.create(Some(root));
        assert!(reused == a || reused == b);
    }

    #[test]
    #[should_panic(expected = "is not a child of")]
    fn test_current_variation_must_be_a_child() {
        let (mut store, _, children) = tree_with_children(2);
        store.set_current_variation(children[0], Some(children[1]));
    }
}
