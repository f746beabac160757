//! # Core Traits (Ports)
//!
//! Any storage adapter must implement these traits to be wired into the
//! services. The three contracts share one shape (save, get_all, get_by_id,
//! update, delete, modify) plus their relationship-scoped queries.
//!
//! Stores know nothing about each other. Keeping foreign keys pointing at
//! live entities is the job of the service layer.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Account, AccountId, Comment, CommentId, Video, VideoId};

/// Number of videos returned by a trending query when the caller gives no limit.
pub const DEFAULT_TRENDING_LIMIT: usize = 10;

/// An entity-level change applied atomically by `modify`.
///
/// Returning an error aborts the change; the stored entity stays as it was.
pub type Mutation<T> = Box<dyn FnOnce(&mut T) -> Result<()> + Send>;

/// Persistence contract for accounts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AccountRepo: Send + Sync {
    /// Inserts or overwrites; a nil id is replaced by a fresh one.
    async fn save(&self, account: Account) -> Result<Account>;
    /// Snapshot of every account, in insertion order.
    async fn get_all(&self) -> Result<Vec<Account>>;
    async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>>;
    /// Case-insensitive exact match; the earliest inserted match wins.
    async fn get_by_username(&self, username: &str) -> Result<Option<Account>>;
    /// Fails with `NotFound` when `account.id` is not stored.
    async fn update(&self, account: Account) -> Result<Account>;
    /// Returns whether an entry was removed. Unknown ids are not an error.
    async fn delete(&self, id: AccountId) -> Result<bool>;
    async fn modify(&self, id: AccountId, change: Mutation<Account>) -> Result<Account>;
}

/// Persistence contract for videos.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait VideoRepo: Send + Sync {
    async fn save(&self, video: Video) -> Result<Video>;
    async fn get_all(&self) -> Result<Vec<Video>>;
    async fn get_by_id(&self, id: VideoId) -> Result<Option<Video>>;
    async fn get_by_account_id(&self, account_id: AccountId) -> Result<Vec<Video>>;
    /// Highest view counts first; equal counts keep insertion order.
    async fn get_most_viewed(&self, limit: usize) -> Result<Vec<Video>>;
    async fn update(&self, video: Video) -> Result<Video>;
    async fn delete(&self, id: VideoId) -> Result<bool>;
    async fn modify(&self, id: VideoId, change: Mutation<Video>) -> Result<Video>;
}

/// Persistence contract for comments.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn save(&self, comment: Comment) -> Result<Comment>;
    async fn get_all(&self) -> Result<Vec<Comment>>;
    async fn get_by_id(&self, id: CommentId) -> Result<Option<Comment>>;
    async fn get_by_video_id(&self, video_id: VideoId) -> Result<Vec<Comment>>;
    async fn get_by_author_id(&self, author_id: AccountId) -> Result<Vec<Comment>>;
    async fn update(&self, comment: Comment) -> Result<Comment>;
    async fn delete(&self, id: CommentId) -> Result<bool>;
    async fn modify(&self, id: CommentId, change: Mutation<Comment>) -> Result<Comment>;
}
