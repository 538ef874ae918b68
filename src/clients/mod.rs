pub mod bsky_client;
pub mod github_client;

pub use bsky_client::{BskyClient, BskyError, RecordRef, Session};
pub use github_client::{GithubClient, GithubError};
