//! Integration test for a ticker-driven breathing session under paused
//! tokio time — the full 65 seconds of a 4-7-8 run elapse instantly.

use std::sync::{Arc, Mutex};

use easemind::app::App;
use easemind::features::exercise::ExerciseOps;
use easemind::session::{SessionEngine, SessionPattern, TickEvent, spawn_session_ticker};
use easemind::store::{MemoryBackend, StorageBackend};

#[tokio::test(start_paused = true)]
async fn ticker_driven_session_completes_and_records_the_exercise() {
    let backend = Arc::new(MemoryBackend::new());
    let app = App::init(Arc::clone(&backend) as Arc<dyn StorageBackend>).await;

    let pattern = SessionPattern::four_seven_eight();
    let expected_seconds = pattern.total_seconds();

    let mut engine = SessionEngine::new(pattern);
    engine.start();
    let engine = Arc::new(Mutex::new(engine));

    let (tx, mut rx) = tokio::sync::mpsc::channel(32);
    let ticker = spawn_session_ticker(Arc::clone(&engine), tx);

    let mut ticks = 0u32;
    let mut phase_starts = Vec::new();
    let mut completions = 0;
    while let Some(event) = rx.recv().await {
        ticks += 1;
        match event {
            TickEvent::PhaseStarted { phase_index, cycle } => {
                phase_starts.push((phase_index, cycle));
            }
            TickEvent::Completed => {
                completions += 1;
                app.exercises.mark_completed("5");
            }
            _ => {}
        }
    }
    ticker.await.unwrap();

    assert_eq!(completions, 1);
    assert_eq!(ticks, expected_seconds);
    assert!(!engine.lock().unwrap().running());

    // hold/exhale/rest then inhale again — rest (index 3) starts twice,
    // never in the final cycle.
    let rest_starts: Vec<_> = phase_starts.iter().filter(|(p, _)| *p == 3).collect();
    assert_eq!(rest_starts.len(), 2);
    assert!(rest_starts.iter().all(|(_, cycle)| *cycle < 2));

    assert!(app.exercises.is_completed("5"));
}

#[tokio::test(start_paused = true)]
async fn stopping_mid_session_never_signals_completion() {
    let mut engine = SessionEngine::new(SessionPattern::four_seven_eight());
    engine.start();
    let engine = Arc::new(Mutex::new(engine));

    let (tx, mut rx) = tokio::sync::mpsc::channel(32);
    let ticker = spawn_session_ticker(Arc::clone(&engine), tx);

    // Let a few seconds elapse, then abandon.
    for _ in 0..3 {
        let event = rx.recv().await.unwrap();
        assert_ne!(event, TickEvent::Completed);
    }
    engine.lock().unwrap().stop();

    // Drain before joining: the ticker may be parked on a full channel.
    while let Some(event) = rx.recv().await {
        assert_ne!(event, TickEvent::Completed);
    }
    ticker.await.unwrap();
    assert!(!engine.lock().unwrap().running());
}
