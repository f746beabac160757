//! # Vidboard seed
//!
//! Assembles the stores and services, fills them with a small demo catalog
//! and logs what a trending query returns. Useful as a smoke test of the
//! wiring an HTTP adapter would do.

use std::sync::Arc;

use anyhow::Context;
use configs::{EnvFile, LogSettings, Settings};
use services::{NewAccount, NewComment, NewVideo, Repos, ServiceOptions, Services};
use storage_adapters::{InMemoryAccountRepo, InMemoryCommentRepo, InMemoryVideoRepo};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = EnvFile::load();
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings.log);
    env_file.log();

    // 1. Stores, one instance each for the life of the process
    let repos = Repos {
        accounts: Arc::new(InMemoryAccountRepo::new()),
        videos: Arc::new(InMemoryVideoRepo::new()),
        comments: Arc::new(InMemoryCommentRepo::new()),
    };

    // 2. Services over the shared stores
    let services = Services::new(
        repos,
        ServiceOptions {
            trending_limit: settings.catalog.trending_limit,
        },
    );

    if !settings.seed.enabled {
        tracing::info!("seeding disabled, nothing to do");
        return Ok(());
    }

    seed_catalog(&services).await.context("seeding demo catalog")?;

    for (rank, video) in services.videos.trending(None).await?.iter().enumerate() {
        tracing::info!(rank = rank + 1, title = %video.title, views = video.views, "trending");
    }
    Ok(())
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn seed_catalog(services: &Services) -> domains::Result<()> {
    let ana = services
        .accounts
        .register(NewAccount {
            username: "ana".into(),
            email: "ana@example.com".into(),
        })
        .await?;
    let bruno = services
        .accounts
        .register(NewAccount {
            username: "bruno".into(),
            email: "bruno@example.com".into(),
        })
        .await?;

    let catalog = [
        (&ana, "Rust ownership in ten minutes", 600, 12),
        (&ana, "Async without tears", 900, 30),
        (&bruno, "Cooking with a borrow checker", 420, 7),
    ];

    for (owner, title, duration_secs, views) in catalog {
        let video = services
            .videos
            .publish(NewVideo {
                account_id: owner.id,
                title: title.into(),
                description: None,
                duration_secs,
            })
            .await?;
        for _ in 0..views {
            services.videos.record_view(video.id).await?;
        }

        let comment = services
            .comments
            .post(NewComment {
                video_id: video.id,
                author_id: bruno.id,
                text: format!("Great video about {}", title.to_lowercase()),
            })
            .await?;
        services.comments.like(comment.id).await?;
    }

    tracing::info!(
        accounts = services.accounts.list().await?.len(),
        videos = services.videos.list().await?.len(),
        comments = services.comments.list().await?.len(),
        "demo catalog seeded"
    );
    Ok(())
}
