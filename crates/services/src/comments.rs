//! Comment use cases.
//!
//! A comment is linked to its video and author by the foreign keys it
//! carries, so posting one is a single store write once both references
//! have been resolved.

use std::sync::Arc;

use domains::{
    AccountId, AccountRepo, AppError, Comment, CommentId, CommentRepo, Result, VideoId, VideoRepo,
};

use crate::Repos;

#[derive(Debug, Clone)]
pub struct NewComment {
    pub video_id: VideoId,
    pub author_id: AccountId,
    pub text: String,
}

pub struct CommentService {
    accounts: Arc<dyn AccountRepo>,
    videos: Arc<dyn VideoRepo>,
    comments: Arc<dyn CommentRepo>,
}

impl CommentService {
    pub fn new(repos: Repos) -> Self {
        Self {
            accounts: repos.accounts,
            videos: repos.videos,
            comments: repos.comments,
        }
    }

    /// Posts a comment on a video.
    ///
    /// Fails with `ReferenceNotFound` if the video or the author cannot be
    /// resolved and with `ValidationError` on blank text. Nothing is stored
    /// on failure.
    pub async fn post(&self, request: NewComment) -> Result<Comment> {
        let Some(video) = self.videos.get_by_id(request.video_id).await? else {
            tracing::warn!(video_id = %request.video_id, "comment rejected: unknown video");
            return Err(AppError::reference_not_found("video", request.video_id));
        };
        let Some(author) = self.accounts.get_by_id(request.author_id).await? else {
            tracing::warn!(author_id = %request.author_id, "comment rejected: unknown account");
            return Err(AppError::reference_not_found("account", request.author_id));
        };

        let comment = Comment::new(video.id, author.id, request.text)?;
        let comment = self.comments.save(comment).await?;

        tracing::info!(
            comment_id = %comment.id,
            video_title = %video.title,
            username = %author.username,
            "comment posted"
        );
        Ok(comment)
    }

    pub async fn list(&self) -> Result<Vec<Comment>> {
        self.comments.get_all().await
    }

    pub async fn get(&self, id: CommentId) -> Result<Option<Comment>> {
        self.comments.get_by_id(id).await
    }

    pub async fn list_by_video(&self, video_id: VideoId) -> Result<Vec<Comment>> {
        self.comments.get_by_video_id(video_id).await
    }

    pub async fn list_by_author(&self, author_id: AccountId) -> Result<Vec<Comment>> {
        self.comments.get_by_author_id(author_id).await
    }

    pub async fn edit(&self, id: CommentId, text: impl Into<String>) -> Result<Comment> {
        let text = text.into();
        self.comments
            .modify(id, Box::new(move |comment: &mut Comment| comment.edit(text)))
            .await
    }

    /// Returns the new like count.
    pub async fn like(&self, id: CommentId) -> Result<u64> {
        let comment = self
            .comments
            .modify(
                id,
                Box::new(|comment: &mut Comment| {
                    comment.add_like();
                    Ok(())
                }),
            )
            .await?;
        Ok(comment.likes)
    }

    /// Returns the new dislike count.
    pub async fn dislike(&self, id: CommentId) -> Result<u64> {
        let comment = self
            .comments
            .modify(
                id,
                Box::new(|comment: &mut Comment| {
                    comment.add_dislike();
                    Ok(())
                }),
            )
            .await?;
        Ok(comment.dislikes)
    }

    /// Deleting a comment never touches its video or author.
    pub async fn delete(&self, id: CommentId) -> Result<bool> {
        self.comments.delete(id).await
    }
}
