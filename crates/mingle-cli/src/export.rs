//! JSON export of the whole network
//!
//! Serializes the snapshot rows as pretty-printed JSON. Passwords never
//! leave the process: the user type skips them during serialization.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use mingle_core::{Friendship, Post, SocialNetwork, User};
use serde::Serialize;

/// Export format version, bumped on breaking shape changes
const EXPORT_VERSION: u32 = 1;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct ExportData<'a> {
    version: u32,
    users: &'a [User],
    friendships: &'a [Friendship],
    posts: &'a [Post],
}

pub fn run(args: &ExportArgs, network: &SocialNetwork) -> Result<()> {
    let snapshot = network.snapshot();
    let data = ExportData {
        version: EXPORT_VERSION,
        users: &snapshot.users,
        friendships: &snapshot.friendships,
        posts: &snapshot.posts,
    };
    let json = serde_json::to_string_pretty(&data)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")?;
            tracing::info!("exported network to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
