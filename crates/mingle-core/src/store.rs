//! Entity store: canonical ownership of users and their posts

use crate::error::{Error, Result};
use crate::limits;
use crate::post::Post;
use crate::user::{User, UserId};
use std::collections::HashMap;

/// Owner of the id -> user and author -> posts mappings
///
/// Ids are allocated here, monotonically from 1. Post lists are kept newest
/// first: creating a post prepends.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    users: HashMap<UserId, User>,
    posts: HashMap<UserId, Vec<Post>>,
    next_user_id: u64,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_user_id(&mut self) -> UserId {
        self.next_user_id += 1;
        UserId(self.next_user_id)
    }

    /// Create a user under the next free id
    ///
    /// Validates field shape (lengths, no line breaks) but not username
    /// uniqueness; callers run the [`username_taken`](Self::username_taken)
    /// query before signing a name up.
    pub fn create_user(&mut self, username: &str, password: &str) -> Result<&User> {
        limits::validate_username(username)?;
        limits::validate_password(password)?;

        let id = self.allocate_user_id();
        let user = User::new(id, username, password);
        Ok(self.users.entry(id).or_insert(user))
    }

    /// Look up a user by id
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// All users; iteration order is unspecified
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.posts.is_empty()
    }

    /// Find a user by exact username (linear scan, case-sensitive)
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|user| user.username == username)
    }

    /// Whether a username is already in use (the sign-up uniqueness query)
    pub fn username_taken(&self, username: &str) -> bool {
        self.find_by_username(username).is_some()
    }

    /// Exact-match credential check
    ///
    /// Linear scan; both fields must match byte for byte.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        self.users
            .values()
            .find(|user| user.username == username && user.password == password)
    }

    /// Prepend a new post, stamped with the current local time, to the
    /// author's list
    pub fn create_post(&mut self, author: UserId, content: &str) -> Result<()> {
        if !self.users.contains_key(&author) {
            return Err(Error::UserNotFound(author));
        }
        limits::validate_post_content(content)?;

        self.posts
            .entry(author)
            .or_default()
            .insert(0, Post::new(author, content));
        Ok(())
    }

    /// Posts by one author, newest first
    ///
    /// Empty slice (not an error) for unknown or postless authors.
    pub fn posts_of(&self, author: UserId) -> &[Post] {
        self.posts.get(&author).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of posts across all authors
    pub fn post_count(&self) -> usize {
        self.posts.values().map(Vec::len).sum()
    }

    /// Authors owning at least one post
    pub(crate) fn post_authors(&self) -> impl Iterator<Item = UserId> + '_ {
        self.posts.keys().copied()
    }

    /// Insert a persisted user record, keeping the id counter ahead of it
    ///
    /// Ids are never reused, so the counter must end up at least as large as
    /// every id ever issued.
    pub(crate) fn restore_user(&mut self, user: User) {
        self.next_user_id = self.next_user_id.max(user.id.0);
        self.users.insert(user.id, user);
    }

    /// Append a persisted post, preserving its stored order and timestamp
    pub(crate) fn restore_post(&mut self, post: Post) {
        self.posts.entry(post.author).or_default().push(post);
    }
}
