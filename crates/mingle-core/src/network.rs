//! The social network facade and its persistence snapshot

use crate::error::{Error, Result};
use crate::feed::{self, FeedEntry};
use crate::friendship::{Friendship, FriendshipGraph};
use crate::post::Post;
use crate::store::EntityStore;
use crate::user::{User, UserId};
use serde::Serialize;

/// Flat transfer aggregate between the engine and a storage backend
///
/// Rows only; no behavior. Produced by [`SocialNetwork::snapshot`] and
/// consumed by [`SocialNetwork::from_snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub friendships: Vec<Friendship>,
    pub posts: Vec<Post>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The in-memory social graph engine
///
/// Owns one entity store and one friendship graph and exposes the operation
/// surface a front end drives. A session owns exactly one value of this
/// type; nothing here is global.
#[derive(Debug, Clone, Default)]
pub struct SocialNetwork {
    store: EntityStore,
    graph: FriendshipGraph,
}

impl SocialNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // User Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a user under the next free id
    ///
    /// Field shape is validated here; username uniqueness is the caller's
    /// pre-check via [`username_taken`](Self::username_taken).
    pub fn create_user(&mut self, username: &str, password: &str) -> Result<&User> {
        self.store.create_user(username, password)
    }

    /// Exact-match credential check, `None` on any mismatch
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        self.store.authenticate(username, password)
    }

    /// Look up a user by id
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.store.user(id)
    }

    /// All users; iteration order is unspecified
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.store.users()
    }

    pub fn user_count(&self) -> usize {
        self.store.user_count()
    }

    /// Find a user by exact username (linear scan)
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.store.find_by_username(username)
    }

    /// Whether a username is already in use
    pub fn username_taken(&self, username: &str) -> bool {
        self.store.username_taken(username)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Friendship Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Record an undirected friendship between two users
    ///
    /// Appends both directed edges together. The pair is rejected only when
    /// BOTH ids are unknown; a single unknown endpoint is accepted and
    /// logged. Self-friendships and duplicates are likewise the caller's
    /// checks (the console session refuses the former and consults
    /// [`are_friends`](Self::are_friends) before adding).
    pub fn add_friendship(&mut self, a: UserId, b: UserId) -> Result<()> {
        self.check_endpoints(a, b)?;
        self.graph.insert_pair(a, b);
        Ok(())
    }

    /// Whether the two users are friends
    ///
    /// Scans `a`'s adjacency list; same lenient endpoint check as
    /// [`add_friendship`](Self::add_friendship).
    pub fn are_friends(&self, a: UserId, b: UserId) -> Result<bool> {
        self.check_endpoints(a, b)?;
        Ok(self.graph.contains(a, b))
    }

    fn check_endpoints(&self, a: UserId, b: UserId) -> Result<()> {
        let known_a = self.store.user(a).is_some();
        let known_b = self.store.user(b).is_some();
        if !known_a && !known_b {
            return Err(Error::UnknownEndpoints { a, b });
        }
        if !known_a || !known_b {
            // Tolerated: only a fully unknown pair is rejected.
            tracing::warn!(
                "friendship endpoint check passed with an unknown user ({}, {})",
                a,
                b
            );
        }
        Ok(())
    }

    /// Friends of a user, in friendship insertion order
    ///
    /// Never errors; an unknown id yields an empty list and a diagnostic
    /// log event.
    pub fn friends_of(&self, id: UserId) -> Vec<UserId> {
        if self.store.user(id).is_none() {
            tracing::debug!("friends queried for unknown user {}", id);
        }
        self.graph.friends_of(id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Post and Feed Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Prepend a new post to the author's list
    pub fn create_post(&mut self, author: UserId, content: &str) -> Result<()> {
        self.store.create_post(author, content)
    }

    /// Posts by one author, newest first
    pub fn posts_of(&self, author: UserId) -> &[Post] {
        self.store.posts_of(author)
    }

    pub fn post_count(&self) -> usize {
        self.store.post_count()
    }

    /// Compose the feed visible to a user (see [`feed::compose`])
    pub fn generate_feed(&self, user: UserId) -> Vec<FeedEntry> {
        if self.store.user(user).is_none() {
            tracing::debug!("feed requested for unknown user {}", user);
        }
        feed::compose(&self.store, &self.graph, user)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence Mapping
    // ─────────────────────────────────────────────────────────────────────────

    /// Flatten the network into persistable rows
    ///
    /// Deterministic: users in ascending id order; directed edges grouped by
    /// owning endpoint in ascending id order, each adjacency list in
    /// insertion order; posts grouped by author in ascending id order, each
    /// list in stored (newest-first) order.
    pub fn snapshot(&self) -> Snapshot {
        let mut users: Vec<User> = self.store.users().cloned().collect();
        users.sort_by_key(|user| user.id);

        let mut owners: Vec<UserId> = self.graph.owners().collect();
        owners.sort();
        let friendships = owners
            .iter()
            .flat_map(|owner| self.graph.edges_of(*owner).iter().copied())
            .collect();

        let mut authors: Vec<UserId> = self.store.post_authors().collect();
        authors.sort();
        let posts = authors
            .iter()
            .flat_map(|author| self.store.posts_of(*author).iter().cloned())
            .collect();

        Snapshot {
            users,
            friendships,
            posts,
        }
    }

    /// Rebuild a network from persisted rows
    ///
    /// Meant for process startup with rows fresh off a storage backend: the
    /// result replaces any previous network wholesale, and the id counter
    /// resumes past the largest restored id so ids are never reissued.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut network = Self::new();
        for user in snapshot.users {
            network.store.restore_user(user);
        }
        for edge in snapshot.friendships {
            network.graph.insert_directed(edge);
        }
        for post in snapshot.posts {
            network.store.restore_post(post);
        }
        tracing::debug!(
            "restored {} users, {} directed edges, {} posts",
            network.store.user_count(),
            network.graph.edge_count(),
            network.store.post_count()
        );
        network
    }
}
