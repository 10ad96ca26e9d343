use std::{io::ErrorKind, time::Duration};

use tokio::{fs, time};
use tracing::{info, warn};

use crate::state::MediaLog;

/// Evict the oldest uploads every `every` while their total exceeds `cap`.
pub async fn task(log: MediaLog, cap: u64, every: Duration) {
    let mut tick = time::interval(every);
    loop {
        tick.tick().await;
        let freed = sweep(&log, cap).await;
        if freed > 0 {
            info!(freed, cap, "upload store trimmed");
        }
    }
}

/// One eviction pass. Returns the bytes released.
pub async fn sweep(log: &MediaLog, cap: u64) -> u64 {
    let used: u64 = log.read().await.iter().map(|m| m.size).sum();
    if used <= cap { return 0; }

    let mut lg = log.write().await;
    let mut space = used;
    while space > cap {
        let Some(old) = lg.pop_front() else { break };
        match fs::remove_file(&old.path).await {
            Ok(()) => space -= old.size,
            // already gone, so it no longer takes space
            Err(e) if e.kind() == ErrorKind::NotFound => space -= old.size,
            Err(e) => {
                // keep it queued for the next pass; never skip ahead to newer files
                warn!(path = %old.path.display(), error = %e, "could not evict upload");
                lg.push_front(old);
                break;
            }
        }
    }
    used - space
}
