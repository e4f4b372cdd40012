use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config::{ConfigStore, Settings};
use crate::logging;
use crate::playback::{PlaybackController, RodioEngine};

mod actions;
mod event_loop;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_problem) = Settings::load_or_default();

    let log_dir = settings.log_directory();
    let _log_guard = match logging::init(&log_dir, &settings.log.filter) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("mellomaniac: logging disabled ({}): {e}", log_dir.display());
            None
        }
    };
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
    if let Some(ref problem) = settings_problem {
        tracing::warn!(%problem, "using default settings");
    }

    let store = ConfigStore::new(settings.store.config_file.clone());

    let engine = RodioEngine::spawn().map_err(|e| {
        tracing::error!(error = %e, "audio engine failed to start");
        e
    })?;
    let mut controller = PlaybackController::new(engine);
    let changes = controller.subscribe();

    let mut app = App::new(Vec::new());
    actions::restore_library(&store, &settings.library, &mut app);
    match settings_problem {
        Some(problem) if app.status_message.is_none() => {
            app.set_status(format!("{problem} (using defaults)"));
        }
        _ => {}
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle(settings.ui.window_title.as_str())
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = {
        let mut state = event_loop::EventLoopState::default();
        let mut ctx = event_loop::Context {
            settings: &settings,
            store: &store,
            app: &mut app,
            controller: &mut controller,
        };
        event_loop::run(&mut terminal, &mut ctx, &changes, &mut state)
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.shutdown();
    tracing::info!("stopped");

    run_result
}
