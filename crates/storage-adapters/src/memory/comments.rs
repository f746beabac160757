use async_trait::async_trait;
use domains::{AccountId, Comment, CommentId, CommentRepo, Mutation, Result, VideoId};

use super::table::Table;

pub struct InMemoryCommentRepo {
    table: Table<Comment>,
}

impl InMemoryCommentRepo {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryCommentRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentRepo for InMemoryCommentRepo {
    async fn save(&self, comment: Comment) -> Result<Comment> {
        let comment = self.table.upsert(comment);
        tracing::debug!(
            comment_id = %comment.id,
            video_id = %comment.video_id,
            author_id = %comment.author_id,
            "comment saved"
        );
        Ok(comment)
    }

    async fn get_all(&self) -> Result<Vec<Comment>> {
        Ok(self.table.snapshot())
    }

    async fn get_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
        Ok(self.table.get(id))
    }

    async fn get_by_video_id(&self, video_id: VideoId) -> Result<Vec<Comment>> {
        Ok(self.table.select(|comment| comment.video_id == video_id))
    }

    async fn get_by_author_id(&self, author_id: AccountId) -> Result<Vec<Comment>> {
        Ok(self.table.select(|comment| comment.author_id == author_id))
    }

    async fn update(&self, comment: Comment) -> Result<Comment> {
        let comment = self.table.replace(comment)?;
        tracing::debug!(comment_id = %comment.id, "comment updated");
        Ok(comment)
    }

    async fn delete(&self, id: CommentId) -> Result<bool> {
        let removed = self.table.remove(id);
        tracing::debug!(comment_id = %id, removed, "comment delete");
        Ok(removed)
    }

    async fn modify(&self, id: CommentId, change: Mutation<Comment>) -> Result<Comment> {
        self.table.apply(id, change)
    }
}
