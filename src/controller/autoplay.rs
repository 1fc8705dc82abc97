//! Continuation worker fed by queue notices
//!
//! Listens for the approaching-end and queue-ended notices and tops the
//! queue up with backend suggestions so playback keeps going. Fetch
//! failures are logged and dropped; the next notice retries naturally.

use super::{PlayerController, QueueNotice};

/// How many continuation tracks one notice fetches.
const CONTINUATION_LIMIT: usize = 5;

pub fn start_autoplay_worker(controller: PlayerController) {
    tokio::spawn(async move {
        let mut notices = controller.subscribe().await;
        tracing::info!("Autoplay worker started");

        while let Some(notice) = notices.recv().await {
            match notice {
                QueueNotice::ApproachingEnd(track) => {
                    tracing::debug!(track_id = %track.id, "Prefetching continuations");
                    match controller.model.backend.similar(&track, CONTINUATION_LIMIT).await {
                        Ok(suggestions) if !suggestions.is_empty() => {
                            let count = suggestions.len();
                            controller.model.extend_queue(suggestions).await;
                            controller.refresh_queue_if_visible().await;
                            tracing::info!(count, "Queue extended with continuations");
                        }
                        Ok(_) => tracing::debug!(track_id = %track.id, "No continuations found"),
                        Err(e) => {
                            tracing::warn!(track_id = %track.id, error = %e, "Continuation fetch failed");
                        }
                    }
                }
                QueueNotice::QueueEnded(track) => {
                    // The prefetch either never fired (very short track) or
                    // came back empty; try once more and resume directly.
                    match controller.model.backend.similar(&track, CONTINUATION_LIMIT).await {
                        Ok(mut suggestions) if !suggestions.is_empty() => {
                            let first = suggestions.remove(0);
                            controller.append_and_play(first).await;
                            controller.model.extend_queue(suggestions).await;
                            controller.refresh_queue_if_visible().await;
                        }
                        Ok(_) => tracing::debug!(track_id = %track.id, "Nothing to continue with"),
                        Err(e) => {
                            tracing::warn!(track_id = %track.id, error = %e, "Continuation fetch failed");
                        }
                    }
                }
            }
        }
        tracing::debug!("Autoplay worker shutting down");
    });
}
