//! Flat text file storage backend
//!
//! Persists the network as three line-oriented text files inside a data
//! directory:
//!
//! - `users.txt`: three lines per user (id, username, password)
//! - `edges.txt`: one line per directed edge (`from to`)
//! - `posts.txt`: three lines per post (author id, content, timestamp)
//!
//! Saving rewrites every file wholesale; the three writes are not
//! transactional with each other. Loading reads each store independently,
//! so a missing file leaves that store empty without touching the others;
//! a malformed record fails the whole load.

use crate::error::{StorageError, StorageResult};
use crate::traits::StorageBackend;
use mingle_core::{Friendship, Post, Snapshot, Timestamp, User, UserId};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const USERS_FILE: &str = "users.txt";
pub const EDGES_FILE: &str = "edges.txt";
pub const POSTS_FILE: &str = "posts.txt";

/// Flat file storage rooted at a data directory
#[derive(Debug, Clone)]
pub struct FlatFileStorage {
    dir: PathBuf,
}

impl FlatFileStorage {
    /// Create a backend rooted at `dir`
    ///
    /// The directory itself must already exist; the store files need not.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn users_path(&self) -> PathBuf {
        self.dir.join(USERS_FILE)
    }

    pub fn edges_path(&self) -> PathBuf {
        self.dir.join(EDGES_FILE)
    }

    pub fn posts_path(&self) -> PathBuf {
        self.dir.join(POSTS_FILE)
    }

    fn load_users(&self) -> StorageResult<Vec<User>> {
        let Some(lines) = read_store(&self.users_path(), USERS_FILE)? else {
            return Ok(Vec::new());
        };
        let mut users = Vec::new();
        for (index, record) in lines.chunks(3).enumerate() {
            let line = index * 3 + 1;
            let [id, username, password] = record else {
                return Err(StorageError::malformed(
                    USERS_FILE,
                    line,
                    "expected three lines per user",
                ));
            };
            let id = parse_id(USERS_FILE, line, id)?;
            users.push(User::new(id, username.clone(), password.clone()));
        }
        Ok(users)
    }

    fn load_edges(&self) -> StorageResult<Vec<Friendship>> {
        let Some(lines) = read_store(&self.edges_path(), EDGES_FILE)? else {
            return Ok(Vec::new());
        };
        let mut edges = Vec::with_capacity(lines.len());
        for (index, text) in lines.iter().enumerate() {
            let line = index + 1;
            let mut parts = text.split_whitespace();
            let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(StorageError::malformed(
                    EDGES_FILE,
                    line,
                    "expected two ids per line",
                ));
            };
            edges.push(Friendship::new(
                parse_id(EDGES_FILE, line, from)?,
                parse_id(EDGES_FILE, line, to)?,
            ));
        }
        Ok(edges)
    }

    fn load_posts(&self) -> StorageResult<Vec<Post>> {
        let Some(lines) = read_store(&self.posts_path(), POSTS_FILE)? else {
            return Ok(Vec::new());
        };
        let mut posts = Vec::new();
        for (index, record) in lines.chunks(3).enumerate() {
            let line = index * 3 + 1;
            let [author, content, posted_at] = record else {
                return Err(StorageError::malformed(
                    POSTS_FILE,
                    line,
                    "expected three lines per post",
                ));
            };
            let author = parse_id(POSTS_FILE, line, author)?;
            let posted_at: Timestamp = posted_at.parse().map_err(|err| {
                StorageError::malformed(
                    POSTS_FILE,
                    line + 2,
                    format!("bad timestamp {posted_at:?}: {err}"),
                )
            })?;
            posts.push(Post {
                author,
                content: content.clone(),
                posted_at,
            });
        }
        Ok(posts)
    }

    fn write_users(&self, users: &[User]) -> StorageResult<()> {
        let mut out = BufWriter::new(File::create(self.users_path())?);
        for user in users {
            writeln!(out, "{}", user.id)?;
            writeln!(out, "{}", user.username)?;
            writeln!(out, "{}", user.password)?;
        }
        out.flush()?;
        Ok(())
    }

    fn write_edges(&self, edges: &[Friendship]) -> StorageResult<()> {
        let mut out = BufWriter::new(File::create(self.edges_path())?);
        for edge in edges {
            writeln!(out, "{} {}", edge.from, edge.to)?;
        }
        out.flush()?;
        Ok(())
    }

    fn write_posts(&self, posts: &[Post]) -> StorageResult<()> {
        let mut out = BufWriter::new(File::create(self.posts_path())?);
        for post in posts {
            writeln!(out, "{}", post.author)?;
            writeln!(out, "{}", post.content)?;
            writeln!(out, "{}", post.posted_at)?;
        }
        out.flush()?;
        Ok(())
    }
}

impl StorageBackend for FlatFileStorage {
    fn load(&self) -> StorageResult<Snapshot> {
        let snapshot = Snapshot {
            users: self.load_users()?,
            friendships: self.load_edges()?,
            posts: self.load_posts()?,
        };
        tracing::debug!(
            "loaded {} users, {} directed edges, {} posts from {}",
            snapshot.users.len(),
            snapshot.friendships.len(),
            snapshot.posts.len(),
            self.dir.display()
        );
        Ok(snapshot)
    }

    fn save(&mut self, snapshot: &Snapshot) -> StorageResult<()> {
        self.write_users(&snapshot.users)?;
        self.write_edges(&snapshot.friendships)?;
        self.write_posts(&snapshot.posts)?;
        tracing::debug!(
            "saved {} users, {} directed edges, {} posts to {}",
            snapshot.users.len(),
            snapshot.friendships.len(),
            snapshot.posts.len(),
            self.dir.display()
        );
        Ok(())
    }
}

/// Read a store file into lines, or `None` when the file does not exist
fn read_store(path: &Path, store: &'static str) -> StorageResult<Option<Vec<String>>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text.lines().map(str::to_owned).collect())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!("{} not found at {}; starting empty", store, path.display());
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn parse_id(store: &'static str, line: usize, text: &str) -> StorageResult<UserId> {
    text.trim()
        .parse::<u64>()
        .map(UserId)
        .map_err(|err| StorageError::malformed(store, line, format!("bad user id {text:?}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            users: vec![
                User::new(UserId(1), "alice", "password1"),
                User::new(UserId(2), "bobby", "password2"),
            ],
            friendships: vec![
                Friendship::new(UserId(1), UserId(2)),
                Friendship::new(UserId(2), UserId(1)),
            ],
            posts: vec![Post {
                author: UserId(1),
                content: "hello".to_string(),
                posted_at: "2024-03-01 12:00".parse().unwrap(),
            }],
        }
    }

    #[test]
    fn test_round_trip_preserves_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut storage = FlatFileStorage::new(dir.path());
        let snapshot = sample_snapshot();

        storage.save(&snapshot).unwrap();
        assert_eq!(storage.load().unwrap(), snapshot);
    }

    #[test]
    fn test_on_disk_format_is_three_flat_files() {
        let dir = TempDir::new().unwrap();
        let mut storage = FlatFileStorage::new(dir.path());

        storage.save(&sample_snapshot()).unwrap();

        let users = fs::read_to_string(storage.users_path()).unwrap();
        assert_eq!(users, "1\nalice\npassword1\n2\nbobby\npassword2\n");
        let edges = fs::read_to_string(storage.edges_path()).unwrap();
        assert_eq!(edges, "1 2\n2 1\n");
        let posts = fs::read_to_string(storage.posts_path()).unwrap();
        assert_eq!(posts, "1\nhello\n2024-03-01 12:00\n");
    }

    #[test]
    fn test_missing_files_load_as_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        let storage = FlatFileStorage::new(dir.path());

        let snapshot = storage.load().unwrap();
        assert_eq!(snapshot, Snapshot::new());
    }

    #[test]
    fn test_stores_load_independently_when_one_is_missing() {
        let dir = TempDir::new().unwrap();
        let mut storage = FlatFileStorage::new(dir.path());
        storage.save(&sample_snapshot()).unwrap();
        fs::remove_file(storage.users_path()).unwrap();

        let snapshot = storage.load().unwrap();
        assert!(snapshot.users.is_empty());
        assert_eq!(snapshot.friendships.len(), 2);
        assert_eq!(snapshot.posts.len(), 1);
    }

    #[test]
    fn test_truncated_user_record_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(USERS_FILE), "1\nalice\n").unwrap();

        let err = FlatFileStorage::new(dir.path()).load().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Malformed {
                store: USERS_FILE,
                line: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(USERS_FILE), "one\nalice\npassword1\n").unwrap();

        let err = FlatFileStorage::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, StorageError::Malformed { store: USERS_FILE, .. }));
    }

    #[test]
    fn test_malformed_edge_line_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(EDGES_FILE), "1 2\n3\n").unwrap();

        let err = FlatFileStorage::new(dir.path()).load().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Malformed {
                store: EDGES_FILE,
                line: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_post_timestamp_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(POSTS_FILE), "1\nhello\nnot a date\n").unwrap();

        let err = FlatFileStorage::new(dir.path()).load().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Malformed {
                store: POSTS_FILE,
                line: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let mut storage = FlatFileStorage::new(dir.path());
        storage.save(&sample_snapshot()).unwrap();

        let smaller = Snapshot {
            users: vec![User::new(UserId(1), "alice", "password1")],
            friendships: Vec::new(),
            posts: Vec::new(),
        };
        storage.save(&smaller).unwrap();

        assert_eq!(storage.load().unwrap(), smaller);
    }

    #[test]
    fn test_crlf_line_endings_are_accepted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(USERS_FILE), "1\r\nalice\r\npassword1\r\n").unwrap();

        let snapshot = FlatFileStorage::new(dir.path()).load().unwrap();
        assert_eq!(snapshot.users, vec![User::new(UserId(1), "alice", "password1")]);
    }
}
