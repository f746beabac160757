//! Video use cases.

use std::sync::Arc;

use domains::{
    AccountId, AccountRepo, AppError, Comment, CommentRepo, Mutation, Result, Video, VideoId,
    VideoRepo,
};
use serde::Serialize;

use crate::cascade;
use crate::Repos;

#[derive(Debug, Clone)]
pub struct NewVideo {
    pub account_id: AccountId,
    pub title: String,
    pub description: Option<String>,
    pub duration_secs: u32,
}

/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct VideoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A video with the comments posted on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoDetails {
    pub video: Video,
    pub comments: Vec<Comment>,
}

pub struct VideoService {
    accounts: Arc<dyn AccountRepo>,
    videos: Arc<dyn VideoRepo>,
    comments: Arc<dyn CommentRepo>,
    trending_limit: usize,
}

impl VideoService {
    pub fn new(repos: Repos, trending_limit: usize) -> Self {
        Self {
            accounts: repos.accounts,
            videos: repos.videos,
            comments: repos.comments,
            trending_limit,
        }
    }

    /// Publishes a video owned by `request.account_id`.
    ///
    /// The owner must already exist; otherwise nothing is stored and
    /// `ReferenceNotFound` is returned.
    pub async fn publish(&self, request: NewVideo) -> Result<Video> {
        let Some(owner) = self.accounts.get_by_id(request.account_id).await? else {
            tracing::warn!(account_id = %request.account_id, "publish rejected: unknown account");
            return Err(AppError::reference_not_found("account", request.account_id));
        };

        let video = Video::new(
            owner.id,
            request.title,
            request.description,
            request.duration_secs,
        )?;
        let video = self.videos.save(video).await?;

        tracing::info!(
            video_id = %video.id,
            title = %video.title,
            username = %owner.username,
            "video published"
        );
        Ok(video)
    }

    pub async fn list(&self) -> Result<Vec<Video>> {
        self.videos.get_all().await
    }

    pub async fn get(&self, id: VideoId) -> Result<Option<Video>> {
        self.videos.get_by_id(id).await
    }

    pub async fn list_by_account(&self, account_id: AccountId) -> Result<Vec<Video>> {
        self.videos.get_by_account_id(account_id).await
    }

    /// Most viewed videos; `None` falls back to the configured limit.
    pub async fn trending(&self, limit: Option<usize>) -> Result<Vec<Video>> {
        self.videos
            .get_most_viewed(limit.unwrap_or(self.trending_limit))
            .await
    }

    /// Counts one view and returns the new total.
    pub async fn record_view(&self, id: VideoId) -> Result<u64> {
        let video = self
            .videos
            .modify(
                id,
                Box::new(|video: &mut Video| {
                    video.increment_view();
                    Ok(())
                }),
            )
            .await?;
        Ok(video.views)
    }

    pub async fn reset_views(&self, id: VideoId) -> Result<Video> {
        let video = self
            .videos
            .modify(
                id,
                Box::new(|video: &mut Video| {
                    video.reset_views();
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(video_id = %id, "view counter reset");
        Ok(video)
    }

    pub async fn update(&self, id: VideoId, changes: VideoChanges) -> Result<Video> {
        let change: Mutation<Video> = Box::new(move |video: &mut Video| {
            if let Some(title) = changes.title {
                video.retitle(title)?;
            }
            if let Some(description) = changes.description {
                video.set_description(Some(description));
            }
            Ok(())
        });
        self.videos.modify(id, change).await
    }

    /// Removes the video and every comment on it, including comments left
    /// behind by an earlier delete. Returns `false` if nothing was removed.
    pub async fn delete(&self, id: VideoId) -> Result<bool> {
        let purged = cascade::purge_video(self.videos.as_ref(), self.comments.as_ref(), id).await?;
        if purged.is_empty() {
            return Ok(false);
        }

        tracing::warn!(
            video_id = %id,
            video_found = purged.videos > 0,
            comments = purged.comments,
            "video deleted with comments"
        );
        Ok(true)
    }

    pub async fn details(&self, id: VideoId) -> Result<Option<VideoDetails>> {
        let Some(video) = self.videos.get_by_id(id).await? else {
            return Ok(None);
        };
        let comments = self.comments.get_by_video_id(id).await?;
        Ok(Some(VideoDetails { video, comments }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{Account, MockAccountRepo, MockVideoRepo};
    use storage_adapters::{InMemoryAccountRepo, InMemoryCommentRepo, InMemoryVideoRepo};
    use uuid::Uuid;

    fn in_memory() -> Repos {
        Repos {
            accounts: Arc::new(InMemoryAccountRepo::new()),
            videos: Arc::new(InMemoryVideoRepo::new()),
            comments: Arc::new(InMemoryCommentRepo::new()),
        }
    }

    fn new_video(account_id: AccountId, title: &str) -> NewVideo {
        NewVideo {
            account_id,
            title: title.into(),
            description: None,
            duration_secs: 42,
        }
    }

    #[tokio::test]
    async fn test_publish_with_unknown_account_stores_nothing() {
        let mut accounts = MockAccountRepo::new();
        accounts.expect_get_by_id().returning(|_| Ok(None));
        let mut videos = MockVideoRepo::new();
        videos.expect_save().never();

        let repos = Repos {
            accounts: Arc::new(accounts),
            videos: Arc::new(videos),
            comments: Arc::new(InMemoryCommentRepo::new()),
        };
        let service = VideoService::new(repos, 10);

        let err = service.publish(new_video(Uuid::now_v7(), "orphan")).await.unwrap_err();
        assert!(matches!(err, AppError::ReferenceNotFound(kind, _) if kind == "account"));
    }

    #[tokio::test]
    async fn test_trending_uses_configured_default() {
        let repos = in_memory();
        let owner = repos
            .accounts
            .save(Account::new("rafa", "r@example.com").unwrap())
            .await
            .unwrap();
        let service = VideoService::new(repos, 2);
        for title in ["one", "two", "three"] {
            service.publish(new_video(owner.id, title)).await.unwrap();
        }

        assert_eq!(service.trending(None).await.unwrap().len(), 2);
        assert_eq!(service.trending(Some(3)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_fields_left_out() {
        let repos = in_memory();
        let owner = repos
            .accounts
            .save(Account::new("bia", "b@example.com").unwrap())
            .await
            .unwrap();
        let service = VideoService::new(repos, 10);
        let video = service
            .publish(NewVideo {
                description: Some("original".into()),
                ..new_video(owner.id, "Draft")
            })
            .await
            .unwrap();

        let updated = service
            .update(
                video.id,
                VideoChanges {
                    title: Some("Final".into()),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.description.as_deref(), Some("original"));
    }

    #[tokio::test]
    async fn test_record_view_on_unknown_video_is_not_found() {
        let service = VideoService::new(in_memory(), 10);
        let err = service.record_view(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_, _)));
    }
}
