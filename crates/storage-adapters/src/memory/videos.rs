use async_trait::async_trait;
use domains::{AccountId, Mutation, Result, Video, VideoId, VideoRepo};

use super::table::Table;

pub struct InMemoryVideoRepo {
    table: Table<Video>,
}

impl InMemoryVideoRepo {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryVideoRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoRepo for InMemoryVideoRepo {
    async fn save(&self, video: Video) -> Result<Video> {
        let video = self.table.upsert(video);
        tracing::debug!(video_id = %video.id, account_id = %video.account_id, "video saved");
        Ok(video)
    }

    async fn get_all(&self) -> Result<Vec<Video>> {
        Ok(self.table.snapshot())
    }

    async fn get_by_id(&self, id: VideoId) -> Result<Option<Video>> {
        Ok(self.table.get(id))
    }

    async fn get_by_account_id(&self, account_id: AccountId) -> Result<Vec<Video>> {
        Ok(self.table.select(|video| video.account_id == account_id))
    }

    async fn get_most_viewed(&self, limit: usize) -> Result<Vec<Video>> {
        // The snapshot is in insertion order and sort_by is stable.
        let mut videos = self.table.snapshot();
        videos.sort_by(|a, b| b.views.cmp(&a.views));
        videos.truncate(limit);
        Ok(videos)
    }

    async fn update(&self, video: Video) -> Result<Video> {
        let video = self.table.replace(video)?;
        tracing::debug!(video_id = %video.id, "video updated");
        Ok(video)
    }

    async fn delete(&self, id: VideoId) -> Result<bool> {
        let removed = self.table.remove(id);
        tracing::debug!(video_id = %id, removed, "video delete");
        Ok(removed)
    }

    async fn modify(&self, id: VideoId, change: Mutation<Video>) -> Result<Video> {
        self.table.apply(id, change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::AppError;
    use std::sync::Arc;
    use uuid::Uuid;

    async fn seed(repo: &InMemoryVideoRepo, owner: AccountId, title: &str, views: u64) -> Video {
        let mut video = Video::new(owner, title, None, 60).unwrap();
        video.views = views;
        repo.save(video).await.unwrap()
    }

    #[tokio::test]
    async fn test_most_viewed_orders_and_truncates() {
        let repo = InMemoryVideoRepo::new();
        let owner = Uuid::now_v7();
        for (title, views) in [("a", 10), ("b", 5), ("c", 20), ("d", 5), ("e", 1)] {
            seed(&repo, owner, title, views).await;
        }

        let top: Vec<(String, u64)> = repo
            .get_most_viewed(3)
            .await
            .unwrap()
            .into_iter()
            .map(|v| (v.title, v.views))
            .collect();
        assert_eq!(
            top,
            vec![("c".into(), 20), ("a".into(), 10), ("b".into(), 5)]
        );

        assert!(repo.get_most_viewed(0).await.unwrap().is_empty());
        assert_eq!(repo.get_most_viewed(50).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_get_by_account_id_filters_owner() {
        let repo = InMemoryVideoRepo::new();
        let (alice, bob) = (Uuid::now_v7(), Uuid::now_v7());
        seed(&repo, alice, "a1", 0).await;
        seed(&repo, bob, "b1", 0).await;
        seed(&repo, alice, "a2", 0).await;

        let titles: Vec<String> = repo
            .get_by_account_id(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.title)
            .collect();
        assert_eq!(titles, vec!["a1", "a2"]);
        assert!(repo.get_by_account_id(Uuid::now_v7()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_modify_unknown_video_fails() {
        let repo = InMemoryVideoRepo::new();
        let err = repo
            .modify(Uuid::now_v7(), Box::new(|v: &mut Video| {
                v.increment_view();
                Ok(())
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(kind, _) if kind == "video"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_views_are_not_lost() {
        let repo = Arc::new(InMemoryVideoRepo::new());
        let video_id = seed(&repo, Uuid::now_v7(), "viral", 0).await.id;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                for _ in 0..50 {
                    repo.modify(video_id, Box::new(|v: &mut Video| {
                        v.increment_view();
                        Ok(())
                    }))
                    .await
                    .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.get_by_id(video_id).await.unwrap().unwrap().views, 400);
    }
}
