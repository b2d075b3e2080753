//! Change notification for live dashboards.
//!
//! Every committed mutation of an entry bumps a monotonically increasing
//! version held by [`ChangeNotifier`] and wakes the subscribers through a
//! broadcast channel. A dashboard stream remembers the last version it sent
//! (its watermark) and only pushes a fresh [`DashboardData`] snapshot when the
//! version has moved past it. The stream also wakes up every poll interval, so
//! a subscriber that lagged behind the channel still catches up, and an idle
//! tick writes a keep-alive comment which lets the server notice closed
//! connections.

use crate::db::{entries, Store};
use crate::error::AppError;
use actix_web::web::Bytes;
use common::model::dashboard::DashboardData;
use futures_util::stream::{self, Stream};
use log::{debug, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

const CHANNEL_CAPACITY: usize = 16;

/// Shared, clonable change counter plus wake-up channel.
#[derive(Clone)]
pub struct ChangeNotifier {
    version: Arc<AtomicU64>,
    tx: broadcast::Sender<u64>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            version: Arc::new(AtomicU64::new(0)),
            tx,
        }
    }

    /// Current change version.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Records a change and wakes subscribers. Call after the write committed.
    pub fn notify(&self) -> u64 {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        // No receivers is fine: nobody is watching the dashboard.
        let _ = self.tx.send(version);
        debug!("Dashboard change version is now {}", version);
        version
    }

    pub fn subscribe(&self) -> broadcast::Receiver<u64> {
        self.tx.subscribe()
    }
}

/// Formats one server-sent event carrying a dashboard snapshot.
pub fn dashboard_event(data: &DashboardData) -> Result<Bytes, AppError> {
    let json = serde_json::to_string(data).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Bytes::from(format!("data: {}\n\n", json)))
}

struct Watch {
    store: Store,
    notifier: ChangeNotifier,
    rx: broadcast::Receiver<u64>,
    watermark: u64,
    interval: Duration,
}

/// Event stream of dashboard snapshots, one per observed change.
///
/// No snapshot is sent on connect; clients fetch `GET /api/dashboard` first
/// and then follow this stream.
pub fn dashboard_events(
    store: Store,
    notifier: ChangeNotifier,
    interval: Duration,
) -> impl Stream<Item = Result<Bytes, AppError>> {
    let watch = Watch {
        rx: notifier.subscribe(),
        watermark: notifier.version(),
        store,
        notifier,
        interval,
    };

    stream::unfold(Some(watch), |state| async move {
        let mut watch = state?;
        loop {
            let woke_by_change = tokio::select! {
                received = watch.rx.recv() => match received {
                    Ok(_) => true,
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("Dashboard subscriber skipped {} notifications", skipped);
                        true
                    }
                    Err(RecvError::Closed) => return None,
                },
                _ = tokio::time::sleep(watch.interval) => false,
            };

            let current = watch.notifier.version();
            if current == watch.watermark {
                if woke_by_change {
                    continue;
                }
                let keep_alive = Bytes::from_static(b": keep-alive\n\n");
                return Some((Ok(keep_alive), Some(watch)));
            }

            watch.watermark = current;
            return match watch.store.read(entries::dashboard) {
                Ok(data) => Some((dashboard_event(&data), Some(watch))),
                Err(e) => {
                    warn!("Failed to compute dashboard for subscriber: {}", e);
                    Some((Err(e), None))
                }
            };
        }
    })
}
