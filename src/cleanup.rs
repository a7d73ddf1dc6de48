use std::{sync::Arc, time::Duration};

use tokio::time;
use tracing::{debug, info};

use crate::{
    config::CleanupConfig,
    store::{InMemorySessionStore, SessionId},
};

pub async fn start_cleanup_task(store: Arc<InMemorySessionStore>, config: CleanupConfig) {
    let mut interval = time::interval(config.interval.max(Duration::from_secs(1)));

    info!(
        "Started session cleanup task: checking every {:?}, inactive timeout: {:?}, finished retention: {:?}",
        config.interval, config.inactive_timeout, config.finished_retention
    );

    loop {
        interval.tick().await;
        cleanup_sessions(&store, &config);
    }
}

/// Drops finished sessions past their retention and any session idle past the
/// inactivity timeout.
pub fn cleanup_sessions(store: &InMemorySessionStore, config: &CleanupConfig) -> Vec<SessionId> {
    let removed = store.sweep(|session| {
        session.should_cleanup(config.inactive_timeout, config.finished_retention)
    });

    if removed.is_empty() {
        debug!("No sessions to clean up, {} live", store.len());
    } else {
        info!("Cleaned up {} stale sessions", removed.len());
    }

    removed
}
