mod auth;
mod controller;
mod engine;
mod error;
mod logging;
mod model;
mod view;

use std::collections::HashSet;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use controller::{PlayerController, start_autoplay_worker};
use engine::ClockEngine;
use model::{AppModel, BackendClient, LibraryStore, SessionStore};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Tunewave Starting ===");

    let store = SessionStore::default();
    let backend = BackendClient::from_env();

    // Step 1: Resolve the session user (stored record, env handle, or none)
    let user = auth::establish_session(&store, &backend).await;

    // Step 2: Load the local library and bind it to the session
    let library = LibraryStore::new(backend.clone(), store.clone());
    library.set_user(user.clone()).await;

    let model = Arc::new(AppModel::new(backend, library, store));
    model.set_user_name(user.map(|u| u.display_name)).await;

    // Step 3: Start the playback engine and wire up the controller
    let (engine_handle, engine_events) = ClockEngine::spawn();
    let controller = PlayerController::new(model.clone(), engine_handle);
    controller.start_engine_event_listener(engine_events);
    start_autoplay_worker(controller.clone());

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Tunewave shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: PlayerController,
) -> io::Result<()> {
    loop {
        // Auto-clear old errors (after 5 seconds)
        model.auto_clear_old_errors().await;

        let playback = model.playback_snapshot().await;
        let ui_state = model.get_ui_state().await;
        let content_state = model.get_content_state().await;
        let should_quit = model.should_quit().await;

        let liked_ids: HashSet<String> =
            model.library.liked().await.into_iter().map(|t| t.id).collect();

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &playback, &ui_state, &content_state, &liked_ids);
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            let _ = controller.handle_key_event(key).await;
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
