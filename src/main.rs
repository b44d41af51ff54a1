use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, BufReader};

use easemind::app::App;
use easemind::assistant::AssistantService;
use easemind::config::AppConfig;
use easemind::features::exercise::ExerciseOps;
use easemind::features::journal::{JournalOps, Mood};
use easemind::remote::{CannedResponder, HuggingFaceResponder, Responder};
use easemind::session::{SessionEngine, SessionPattern, TickEvent, spawn_session_ticker};
use easemind::store::{LibSqlBackend, MemoryBackend, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    // Initialize tracing; keep the appender guard alive for the process.
    let _log_guard = match config.log_dir {
        Some(ref dir) => {
            let appender = tracing_appender::rolling::daily(dir, "easemind.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_target(false)
                .init();
            None
        }
    };

    // Storage failure is never fatal: fall back to an in-memory session.
    let backend: Arc<dyn StorageBackend> = match LibSqlBackend::new_local(&config.db_path).await
    {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            tracing::warn!("storage unavailable ({e}); running in-memory");
            Arc::new(MemoryBackend::new())
        }
    };

    let app = App::init(backend).await;

    let (responder, responder_label): (Arc<dyn Responder>, &str) = match config.hf_api_key {
        Some(key) => (
            Arc::new(HuggingFaceResponder::new(&config.hf_model, key)),
            "hugging face",
        ),
        None => (
            Arc::new(CannedResponder::with_delay(config.canned_delay)),
            "canned (set HUGGING_FACE_API_KEY for live responses)",
        ),
    };
    let assistant = AssistantService::new(Arc::clone(&app.chat), responder);

    eprintln!("🌿 easemind v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Storage: {}", config.db_path.display());
    eprintln!("   Responder: {responder_label}");
    eprintln!("   Commands: /breathe, /journal <text>, /quit\n");

    assistant.greet_if_empty();
    if let Some(last) = app.chat.snapshot().messages.last() {
        println!("{}\n", last.content);
    }

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    eprint!("> ");
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim().to_string();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }

        match line.as_str() {
            "/quit" => break,
            "/breathe" => {
                run_breathing_session(&app).await;
            }
            _ if line.starts_with("/journal") => {
                let text = line.trim_start_matches("/journal").trim();
                if text.is_empty() {
                    println!("Usage: /journal <what's on your mind>");
                } else {
                    app.journal.add_entry(Mood::Okay, text, Vec::new());
                    println!("Saved. {} entries in your journal.", app.journal.snapshot().entries.len());
                }
            }
            _ => {
                let reply = assistant.send(line.as_str()).await;
                println!("\n{reply}\n");
            }
        }
        eprint!("> ");
    }

    app.flush_all().await;
    Ok(())
}

/// Run one 4-7-8 breathing session on the live ticker, printing each
/// phase, and record the completion.
async fn run_breathing_session(app: &App) {
    let pattern = SessionPattern::four_seven_eight();
    println!("\n{} — {} cycles. Press nothing; just breathe.", pattern.name, pattern.total_cycles);

    let mut engine = SessionEngine::new(pattern);
    engine.start();
    println!("  {} ({}s)", engine.phase().instruction, engine.phase().seconds);

    let engine = Arc::new(Mutex::new(engine));
    let (tx, mut rx) = tokio::sync::mpsc::channel(16);
    let ticker = spawn_session_ticker(Arc::clone(&engine), tx);

    while let Some(event) = rx.recv().await {
        match event {
            TickEvent::PhaseStarted { .. } => {
                let engine = engine.lock().unwrap_or_else(|e| e.into_inner());
                println!("  {} ({}s)", engine.phase().instruction, engine.phase().seconds);
            }
            TickEvent::Completed => {
                println!("Session complete. Well done.\n");
                // "5" is the 4-7-8 exercise in the built-in catalog.
                app.exercises.mark_completed("5");
            }
            _ => {}
        }
    }
    let _ = ticker.await;
}
