//! # services
//!
//! Use-case layer sitting between an outer adapter (HTTP, CLI, seeders) and
//! the repository ports. Every write that links two entities goes through
//! here: references are resolved before a dependent is saved, usernames are
//! kept unique ignoring case, and deletes cascade to dependents.

pub mod accounts;
mod cascade;
pub mod comments;
pub mod videos;

use std::sync::Arc;

use domains::{AccountRepo, CommentRepo, VideoRepo, DEFAULT_TRENDING_LIMIT};

pub use accounts::{AccountChanges, AccountOverview, AccountService, NewAccount};
pub use comments::{CommentService, NewComment};
pub use videos::{NewVideo, VideoChanges, VideoDetails, VideoService};

/// Store handles injected into every service.
#[derive(Clone)]
pub struct Repos {
    pub accounts: Arc<dyn AccountRepo>,
    pub videos: Arc<dyn VideoRepo>,
    pub comments: Arc<dyn CommentRepo>,
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceOptions {
    /// Used by `VideoService::trending` when no limit is given
    pub trending_limit: usize,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

/// All use-case services sharing one set of stores.
pub struct Services {
    pub accounts: AccountService,
    pub videos: VideoService,
    pub comments: CommentService,
}

impl Services {
    pub fn new(repos: Repos, options: ServiceOptions) -> Self {
        Self {
            accounts: AccountService::new(repos.clone()),
            videos: VideoService::new(repos.clone(), options.trending_limit),
            comments: CommentService::new(repos),
        }
    }
}
