//! Friendship (edge) types and the adjacency structure over them

use crate::user::UserId;
use serde::Serialize;
use std::collections::HashMap;

/// One direction of an undirected friendship
///
/// A friendship between `a` and `b` is materialized as the reciprocal pair
/// `(a,b)` and `(b,a)`, one edge in each endpoint's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Friendship {
    /// Owning endpoint (the list this edge lives in)
    pub from: UserId,

    /// The befriended user
    pub to: UserId,
}

impl Friendship {
    pub fn new(from: UserId, to: UserId) -> Self {
        Self { from, to }
    }
}

/// Symmetric adjacency structure over user ids
///
/// Append-only: edges are inserted and never removed, and the graph does not
/// deduplicate. Callers check [`contains`](Self::contains) before inserting a
/// pair; inserting the same pair twice stores it twice. Existence of the
/// endpoints is not this structure's concern either - the network facade
/// checks ids against the entity store.
#[derive(Debug, Clone, Default)]
pub struct FriendshipGraph {
    adjacency: HashMap<UserId, Vec<Friendship>>,
}

impl FriendshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the reciprocal edge pair for one undirected friendship
    ///
    /// Both directed edges are appended together; there is no partial state.
    pub fn insert_pair(&mut self, a: UserId, b: UserId) {
        self.insert_directed(Friendship::new(a, b));
        self.insert_directed(Friendship::new(b, a));
    }

    /// Append a single directed edge to its owner's adjacency list
    ///
    /// Used when rebuilding the graph from persisted directed-edge records.
    pub fn insert_directed(&mut self, edge: Friendship) {
        self.adjacency.entry(edge.from).or_default().push(edge);
    }

    /// Friends of a user, in edge insertion order
    ///
    /// Empty for unknown or friendless ids.
    pub fn friends_of(&self, id: UserId) -> Vec<UserId> {
        self.edges_of(id).iter().map(|edge| edge.to).collect()
    }

    /// Whether `a`'s adjacency list holds an edge to `b`
    ///
    /// Linear in `a`'s friend count.
    pub fn contains(&self, a: UserId, b: UserId) -> bool {
        self.edges_of(a).iter().any(|edge| edge.to == b)
    }

    /// Directed edges owned by a user, empty if none
    pub fn edges_of(&self, id: UserId) -> &[Friendship] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids owning at least one directed edge
    pub fn owners(&self) -> impl Iterator<Item = UserId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}
