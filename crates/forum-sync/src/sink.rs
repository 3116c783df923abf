//! Background dispatch of profile changes to the orchestrator.
//!
//! `user_data_changed` only enqueues; a worker task receives changes and runs
//! one sync task per change, so the reporting caller never waits on the forum.

use std::sync::Arc;

use changefeed_core::{users::NoOpUserDataSync, UserDataSyncService, UserProfileChange};
use log::{error, info, warn};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use crate::client::ForumClient;
use crate::config::ForumSyncConfig;
use crate::error::Result;
use crate::orchestrator::SyncOrchestrator;

/// [`UserDataSyncService`] that forwards changes to a background worker.
pub struct ForumSyncSink {
    tx: mpsc::UnboundedSender<UserProfileChange>,
    worker: JoinHandle<()>,
}

impl ForumSyncSink {
    /// Spawns the worker on the current tokio runtime.
    ///
    /// Must be called from within a runtime.
    pub fn start(orchestrator: Arc<SyncOrchestrator>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(sync_worker(rx, orchestrator));
        info!("Forum sync service initialized");
        Self { tx, worker }
    }

    /// Stops accepting changes and waits for queued and running attempts.
    pub async fn shutdown(self) {
        let Self { tx, worker } = self;
        drop(tx);
        if let Err(err) = worker.await {
            error!("Forum sync worker terminated abnormally: {}", err);
        }
    }
}

impl UserDataSyncService for ForumSyncSink {
    fn user_data_changed(&self, change: UserProfileChange) {
        if let Err(err) = self.tx.send(change) {
            warn!(
                "Forum sync worker is not running, dropping change for user {}",
                err.0.user_id
            );
        }
    }
}

async fn sync_worker(
    mut rx: mpsc::UnboundedReceiver<UserProfileChange>,
    orchestrator: Arc<SyncOrchestrator>,
) {
    info!("Forum sync worker started");
    let mut in_flight = JoinSet::new();

    while let Some(change) = rx.recv().await {
        let orchestrator = orchestrator.clone();
        in_flight.spawn(async move { orchestrator.sync_user(&change).await });

        // Reap finished attempts so the set does not grow unbounded.
        while let Some(finished) = in_flight.try_join_next() {
            if let Err(err) = finished {
                error!("Forum sync task panicked: {}", err);
            }
        }
    }

    while let Some(finished) = in_flight.join_next().await {
        if let Err(err) = finished {
            error!("Forum sync task panicked: {}", err);
        }
    }
    info!("Forum sync worker shutting down");
}

/// Builds the profile sync service for this process.
///
/// With a configuration, returns a started [`ForumSyncSink`]; without one the
/// subsystem stays inert and a [`NoOpUserDataSync`] is returned.
pub fn build_user_data_sync(
    config: Option<&ForumSyncConfig>,
) -> Result<Arc<dyn UserDataSyncService>> {
    match config {
        Some(config) => {
            let client = ForumClient::new(config)?;
            let orchestrator = Arc::new(SyncOrchestrator::with_client(client));
            info!("Forum sync enabled for {}", config.base_url);
            Ok(Arc::new(ForumSyncSink::start(orchestrator)))
        }
        None => {
            info!("Forum sync disabled: no master token configured");
            Ok(Arc::new(NoOpUserDataSync))
        }
    }
}
