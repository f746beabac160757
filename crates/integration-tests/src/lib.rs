//! Shared fixtures for the integration tests.
//!
//! Every fixture builds fresh in-memory stores, so tests never share state.

use std::sync::Arc;

use domains::{Account, Video};
use services::{NewAccount, NewVideo, Repos, ServiceOptions, Services};
use storage_adapters::{InMemoryAccountRepo, InMemoryCommentRepo, InMemoryVideoRepo};

/// Services plus direct handles on the stores behind them.
pub struct TestApp {
    pub repos: Repos,
    pub services: Services,
}

impl TestApp {
    pub fn new() -> Self {
        let repos = Repos {
            accounts: Arc::new(InMemoryAccountRepo::new()),
            videos: Arc::new(InMemoryVideoRepo::new()),
            comments: Arc::new(InMemoryCommentRepo::new()),
        };
        let services = Services::new(repos.clone(), ServiceOptions::default());
        Self { repos, services }
    }

    pub async fn account(&self, username: &str) -> Account {
        self.services
            .accounts
            .register(NewAccount {
                username: username.into(),
                email: format!("{}@example.com", username.to_lowercase()),
            })
            .await
            .expect("register account")
    }

    pub async fn video(&self, owner: &Account, title: &str) -> Video {
        self.services
            .videos
            .publish(NewVideo {
                account_id: owner.id,
                title: title.into(),
                description: None,
                duration_secs: 120,
            })
            .await
            .expect("publish video")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
