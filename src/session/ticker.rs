//! 1 Hz driver for a shared session engine.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::session::engine::{SessionEngine, TickEvent};

/// Spawn a task that ticks `engine` once per second and forwards events.
///
/// The task exits when the session completes, when the engine is stopped
/// (an `Idle` tick), or when the receiver goes away. Missed intervals are
/// delivered in a burst, so logical session time never drops a second.
pub fn spawn_session_ticker(
    engine: Arc<Mutex<SessionEngine>>,
    events: mpsc::Sender<TickEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick completes immediately; the countdown starts one
        // second after spawn.
        interval.tick().await;

        loop {
            interval.tick().await;
            let event = {
                let mut engine = engine.lock().unwrap_or_else(|e| e.into_inner());
                engine.tick()
            };

            match event {
                TickEvent::Idle => break,
                TickEvent::Completed => {
                    let _ = events.send(TickEvent::Completed).await;
                    break;
                }
                event => {
                    if events.send(event).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}
