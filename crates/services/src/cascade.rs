//! Cascading deletes shared by the account and video services.

use domains::{AccountId, CommentRepo, Result, VideoId, VideoRepo};

/// What a cascading delete removed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Purged {
    pub videos: usize,
    pub comments: usize,
}

impl Purged {
    pub fn is_empty(&self) -> bool {
        self.videos == 0 && self.comments == 0
    }
}

/// Deletes a video and every comment posted on it.
///
/// Comments are purged by foreign key even when the video row is already
/// gone, so a comment saved after its video was deleted is still reachable.
pub(crate) async fn purge_video(
    videos: &dyn VideoRepo,
    comments: &dyn CommentRepo,
    id: VideoId,
) -> Result<Purged> {
    let mut purged = Purged::default();
    for comment in comments.get_by_video_id(id).await? {
        if comments.delete(comment.id).await? {
            purged.comments += 1;
        }
    }
    if videos.delete(id).await? {
        purged.videos += 1;
    }
    Ok(purged)
}

/// Deletes everything that depends on an account: its videos (with their
/// comments) and the comments it authored elsewhere. The account itself is
/// left to the caller.
pub(crate) async fn purge_account_dependents(
    videos: &dyn VideoRepo,
    comments: &dyn CommentRepo,
    account_id: AccountId,
) -> Result<Purged> {
    let mut purged = Purged::default();

    for video in videos.get_by_account_id(account_id).await? {
        let p = purge_video(videos, comments, video.id).await?;
        purged.videos += p.videos;
        purged.comments += p.comments;
    }
    for comment in comments.get_by_author_id(account_id).await? {
        if comments.delete(comment.id).await? {
            purged.comments += 1;
        }
    }
    Ok(purged)
}
