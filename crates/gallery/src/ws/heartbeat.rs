use std::sync::Arc;
use std::time::Duration;

use crate::ws::manager::WsManager;

/// Interval between heartbeat pings (in seconds).
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Spawn a background task that pings open gallery pages so idle proxies
/// keep their sockets alive. Abort the returned handle to stop it.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));
        // The first tick completes immediately; nobody is connected yet.
        interval.tick().await;

        loop {
            interval.tick().await;
            let viewers = ws_manager.ping_all().await;
            if viewers > 0 {
                tracing::debug!(viewers, "Pinged gallery viewers");
            }
        }
    })
}
