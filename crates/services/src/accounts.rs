//! Account use cases: registration, profile edits, cascading removal.

use std::sync::Arc;

use domains::{
    Account, AccountId, AccountRepo, AppError, Comment, CommentRepo, Mutation, Result, Video,
    VideoRepo,
};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::cascade;
use crate::Repos;

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
}

/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// An account together with the videos it published and the comments it wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountOverview {
    pub account: Account,
    pub videos: Vec<Video>,
    pub comments: Vec<Comment>,
}

pub struct AccountService {
    accounts: Arc<dyn AccountRepo>,
    videos: Arc<dyn VideoRepo>,
    comments: Arc<dyn CommentRepo>,
    /// Serializes the username check with the write that follows it
    usernames: Mutex<()>,
}

impl AccountService {
    pub fn new(repos: Repos) -> Self {
        Self {
            accounts: repos.accounts,
            videos: repos.videos,
            comments: repos.comments,
            usernames: Mutex::new(()),
        }
    }

    /// Creates an account. Fails with `Conflict` if the username is taken,
    /// ignoring case.
    pub async fn register(&self, request: NewAccount) -> Result<Account> {
        let account = Account::new(request.username, request.email)?;

        let _guard = self.usernames.lock().await;
        self.ensure_username_free(&account.username, None).await?;
        let account = self.accounts.save(account).await?;

        tracing::info!(account_id = %account.id, username = %account.username, "account registered");
        Ok(account)
    }

    pub async fn list(&self) -> Result<Vec<Account>> {
        self.accounts.get_all().await
    }

    pub async fn get(&self, id: AccountId) -> Result<Option<Account>> {
        self.accounts.get_by_id(id).await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.accounts.get_by_username(username).await
    }

    pub async fn update(&self, id: AccountId, changes: AccountChanges) -> Result<Account> {
        let _guard = self.usernames.lock().await;
        if let Some(username) = &changes.username {
            self.ensure_username_free(username, Some(id)).await?;
        }

        let change: Mutation<Account> = Box::new(move |account: &mut Account| {
            if let Some(username) = changes.username {
                account.rename(username)?;
            }
            if let Some(email) = changes.email {
                account.change_email(email)?;
            }
            Ok(())
        });
        self.accounts.modify(id, change).await
    }

    /// Removes the account, its videos, the comments on those videos and the
    /// comments it authored. Dependents are purged even if the account row is
    /// already gone. Returns `false` if nothing was removed.
    pub async fn delete(&self, id: AccountId) -> Result<bool> {
        let purged =
            cascade::purge_account_dependents(self.videos.as_ref(), self.comments.as_ref(), id)
                .await?;
        let removed = self.accounts.delete(id).await?;
        if !removed && purged.is_empty() {
            return Ok(false);
        }

        tracing::warn!(
            account_id = %id,
            videos = purged.videos,
            comments = purged.comments,
            account_found = removed,
            "account deleted with dependents"
        );
        Ok(true)
    }

    pub async fn overview(&self, id: AccountId) -> Result<Option<AccountOverview>> {
        let Some(account) = self.accounts.get_by_id(id).await? else {
            return Ok(None);
        };
        let videos = self.videos.get_by_account_id(id).await?;
        let comments = self.comments.get_by_author_id(id).await?;

        Ok(Some(AccountOverview {
            account,
            videos,
            comments,
        }))
    }

    async fn ensure_username_free(&self, username: &str, owner: Option<AccountId>) -> Result<()> {
        match self.accounts.get_by_username(username).await? {
            Some(existing) if Some(existing.id) != owner => {
                tracing::warn!(username, "username already taken");
                Err(AppError::Conflict(format!(
                    "username '{}' is already taken",
                    existing.username
                )))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::MockAccountRepo;
    use storage_adapters::{InMemoryAccountRepo, InMemoryCommentRepo, InMemoryVideoRepo};

    fn repos_with(accounts: Arc<dyn AccountRepo>) -> Repos {
        Repos {
            accounts,
            videos: Arc::new(InMemoryVideoRepo::new()),
            comments: Arc::new(InMemoryCommentRepo::new()),
        }
    }

    fn new_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.into(),
            email: format!("{username}@example.com"),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_username_differing_only_in_case() {
        let service = AccountService::new(repos_with(Arc::new(InMemoryAccountRepo::new())));
        service.register(new_account("Maria")).await.unwrap();

        let err = service.register(new_account("mARIA")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_does_not_save_when_username_taken() {
        let mut repo = MockAccountRepo::new();
        let taken = Account::new("joao", "j@example.com").unwrap();
        repo.expect_get_by_username()
            .returning(move |_| Ok(Some(taken.clone())));
        repo.expect_save().never();

        let service = AccountService::new(repos_with(Arc::new(repo)));
        let err = service.register(new_account("JOAO")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_allows_own_username_in_new_case() {
        let service = AccountService::new(repos_with(Arc::new(InMemoryAccountRepo::new())));
        let account = service.register(new_account("pedro")).await.unwrap();

        let updated = service
            .update(
                account.id,
                AccountChanges {
                    username: Some("Pedro".into()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "Pedro");
        assert_eq!(updated.email, "pedro@example.com");
    }

    #[tokio::test]
    async fn test_update_rejects_blank_email_and_keeps_account() {
        let service = AccountService::new(repos_with(Arc::new(InMemoryAccountRepo::new())));
        let account = service.register(new_account("lia")).await.unwrap();

        let err = service
            .update(
                account.id,
                AccountChanges {
                    username: Some("lia2".into()),
                    email: Some("  ".into()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(service.get(account.id).await.unwrap(), Some(account));
    }

    #[tokio::test]
    async fn test_delete_unknown_account_is_noop() {
        let service = AccountService::new(repos_with(Arc::new(InMemoryAccountRepo::new())));
        assert!(!service.delete(uuid::Uuid::now_v7()).await.unwrap());
    }
}
