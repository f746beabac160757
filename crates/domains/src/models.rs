//! # Domain Models
//!
//! These structs represent the core entities of Vidboard.
//! We use UUID v7 for time-ordered, globally unique identification.
//!
//! Dependents carry the foreign keys (`Video::account_id`, `Comment::video_id`,
//! `Comment::author_id`). An owner's list of dependents is always a store
//! query, never a collection stored on the owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

pub type AccountId = Uuid;
pub type VideoId = Uuid;
pub type CommentId = Uuid;

/// Identity shared by every stored entity.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable kind used in error messages ("account", "video", ...)
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// Stores call this when saving an entity whose id is still nil.
    fn assign_id(&mut self, id: Uuid);
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// A user account that publishes videos and authors comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Unique across all accounts, ignoring case
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let email = email.into();
        require_text("username", &username)?;
        require_text("email", &email)?;

        Ok(Self {
            id: Uuid::now_v7(),
            username,
            email,
            created_at: Utc::now(),
        })
    }

    /// Case-insensitive exact comparison against `username`.
    pub fn has_username(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase()
    }

    pub fn rename(&mut self, username: impl Into<String>) -> Result<()> {
        let username = username.into();
        require_text("username", &username)?;
        self.username = username;
        Ok(())
    }

    pub fn change_email(&mut self, email: impl Into<String>) -> Result<()> {
        let email = email.into();
        require_text("email", &email)?;
        self.email = email;
        Ok(())
    }
}

impl Entity for Account {
    const KIND: &'static str = "account";

    fn id(&self) -> Uuid {
        self.id
    }

    fn assign_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

/// A video published by exactly one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub description: Option<String>,
    pub duration_secs: u32,
    /// Only ever grows, except through an explicit `reset_views`
    pub views: u64,
    pub published_at: DateTime<Utc>,
    /// The owning account; must exist when the video is published
    pub account_id: AccountId,
}

impl Video {
    pub fn new(
        account_id: AccountId,
        title: impl Into<String>,
        description: Option<String>,
        duration_secs: u32,
    ) -> Result<Self> {
        let title = title.into();
        require_text("video title", &title)?;

        Ok(Self {
            id: Uuid::now_v7(),
            title,
            description,
            duration_secs,
            views: 0,
            published_at: Utc::now(),
            account_id,
        })
    }

    /// Counts one more view and returns the new total.
    pub fn increment_view(&mut self) -> u64 {
        self.views = self.views.saturating_add(1);
        self.views
    }

    pub fn reset_views(&mut self) {
        self.views = 0;
    }

    pub fn retitle(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        require_text("video title", &title)?;
        self.title = title;
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }
}

impl Entity for Video {
    const KIND: &'static str = "video";

    fn id(&self) -> Uuid {
        self.id
    }

    fn assign_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

/// A comment posted by an account on a video.
///
/// `video_id` and `author_id` are lookups, not ownership: deleting a comment
/// never touches the video or the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
    pub dislikes: u64,
    pub is_edited: bool,
    pub video_id: VideoId,
    pub author_id: AccountId,
}

impl Comment {
    pub fn new(video_id: VideoId, author_id: AccountId, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        require_text("comment text", &text)?;

        Ok(Self {
            id: Uuid::now_v7(),
            text,
            created_at: Utc::now(),
            likes: 0,
            dislikes: 0,
            is_edited: false,
            video_id,
            author_id,
        })
    }

    pub fn add_like(&mut self) -> u64 {
        self.likes = self.likes.saturating_add(1);
        self.likes
    }

    pub fn add_dislike(&mut self) -> u64 {
        self.dislikes = self.dislikes.saturating_add(1);
        self.dislikes
    }

    /// Replaces the text and flags the comment as edited.
    ///
    /// Blank text is rejected and leaves the comment untouched.
    pub fn edit(&mut self, new_text: impl Into<String>) -> Result<()> {
        let new_text = new_text.into();
        require_text("comment text", &new_text)?;
        self.text = new_text;
        self.is_edited = true;
        Ok(())
    }
}

impl Entity for Comment {
    const KIND: &'static str = "comment";

    fn id(&self) -> Uuid {
        self.id
    }

    fn assign_id(&mut self, id: Uuid) {
        self.id = id;
    }
}
