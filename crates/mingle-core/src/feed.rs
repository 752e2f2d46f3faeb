//! Feed composition: a user's own posts followed by each friend's posts

use crate::friendship::FriendshipGraph;
use crate::post::Timestamp;
use crate::store::EntityStore;
use crate::user::UserId;
use serde::Serialize;

/// One feed row, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    /// Author's username
    pub author: String,

    /// When the post was created
    pub posted_at: Timestamp,

    /// Post body
    pub content: String,
}

/// Compose the feed visible to one user
///
/// Ordering is by author block: the user's own posts first (stored
/// newest-first), then each friend's posts in friendship insertion order,
/// each block newest-first. Blocks are deliberately NOT merged into one
/// global timeline. No pagination, no size limit.
pub fn compose(store: &EntityStore, graph: &FriendshipGraph, user: UserId) -> Vec<FeedEntry> {
    let mut entries = Vec::new();
    push_author_posts(store, user, &mut entries);
    for friend in graph.friends_of(user) {
        push_author_posts(store, friend, &mut entries);
    }
    entries
}

fn push_author_posts(store: &EntityStore, author: UserId, entries: &mut Vec<FeedEntry>) {
    let posts = store.posts_of(author);
    if posts.is_empty() {
        return;
    }
    let Some(user) = store.user(author) else {
        // Posts can outlive their author record when the flat stores were
        // loaded in an inconsistent state; there is no name to render.
        tracing::warn!(
            "skipping {} posts whose author (id {}) has no user record",
            posts.len(),
            author
        );
        return;
    };
    for post in posts {
        entries.push(FeedEntry {
            author: user.username.clone(),
            posted_at: post.posted_at,
            content: post.content.clone(),
        });
    }
}
