//! Burst coalescing for change notifications.
//!
//! A single consumer owns the pending deadline. Each incoming event pushes
//! the deadline to `now + delay`; once the deadline passes with no further
//! events the action runs once.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{sleep_until, Instant};

/// Run `action` once per burst of events, `delay` after the burst's last event.
///
/// Returns when `shutdown` fires, or when the event channel closes and no
/// reload is pending.
pub async fn debounce<F, Fut>(
    mut events: mpsc::UnboundedReceiver<()>,
    delay: Duration,
    mut shutdown: broadcast::Receiver<()>,
    mut action: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut pending: Option<Instant> = None;
    let mut events_open = true;

    loop {
        if !events_open && pending.is_none() {
            tracing::debug!("Change event source closed, debouncer exiting");
            break;
        }

        let deadline = pending;
        tokio::select! {
            event = events.recv(), if events_open => match event {
                Some(()) => {
                    pending = Some(Instant::now() + delay);
                }
                None => events_open = false,
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                pending = None;
                action().await;
            }
            _ = shutdown.recv() => {
                tracing::debug!("Debouncer received shutdown signal, exiting loop");
                break;
            }
        }
    }
}
