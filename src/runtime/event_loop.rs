use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Position;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config::{ConfigStore, Settings};
use crate::playback::{PlaybackChange, PlaybackController, PlaybackEngine};
use crate::runtime::actions;
use crate::ui::{self, Areas};

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// A left-button press started on the slider and has not been released.
    pub dragging_slider: bool,
    /// Regions of the last drawn frame, for mouse hit-testing.
    pub areas: Option<Areas>,
}

/// Everything the handlers need besides the event itself.
pub struct Context<'a, E: PlaybackEngine> {
    pub settings: &'a Settings,
    pub store: &'a ConfigStore,
    pub app: &'a mut App,
    pub controller: &'a mut PlaybackController<E>,
}

/// Main terminal event loop: drains playback changes, draws, and dispatches
/// input. Returns `Ok(())` when the user quits.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ctx: &mut Context<'_, E>,
    changes: &Receiver<PlaybackChange>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Engine callbacks are delivered here, on the UI thread.
        ctx.controller.pump();
        for change in changes.try_iter() {
            ctx.app.apply_change(&change);
        }

        let mut areas = None;
        {
            let app: &App = &*ctx.app;
            let settings = ctx.settings;
            terminal.draw(|f| {
                areas = Some(ui::draw(f, app, &settings.ui, &settings.controls));
            })?;
        }
        state.areas = areas;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, ctx, state) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, ctx, state),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Returns `true` when the user asked to quit.
pub fn handle_key_event<E: PlaybackEngine>(
    key: KeyEvent,
    ctx: &mut Context<'_, E>,
    state: &mut EventLoopState,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if ctx.app.prompt.is_some() {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => {
                ctx.app.take_prompt();
            }
            KeyCode::Enter => {
                actions::submit_prompt(ctx.store, &ctx.settings.library, ctx.app);
            }
            KeyCode::Backspace => ctx.app.prompt_pop(),
            KeyCode::Char(c) => {
                if !c.is_control() {
                    ctx.app.prompt_push(c);
                }
            }
            _ => {}
        }
        return false;
    }

    let seek_secs = ctx.settings.controls.seek_seconds.min(i64::MAX as u64) as i64;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('o') => {
            state.pending_gg = false;
            ctx.app.open_prompt();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                ctx.app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            ctx.app.select_last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            ctx.app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            ctx.app.prev();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            if ctx.app.has_tracks() {
                let selected = ctx.app.selected;
                actions::play_index(selected, ctx.app, ctx.controller);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            state.pending_gg = false;
            ctx.controller.toggle();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            state.pending_gg = false;
            actions::seek_by(ctx.controller, seek_secs);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            state.pending_gg = false;
            actions::seek_by(ctx.controller, -seek_secs);
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}

pub fn handle_mouse_event<E: PlaybackEngine>(
    mouse: MouseEvent,
    ctx: &mut Context<'_, E>,
    state: &mut EventLoopState,
) {
    // The directory prompt is modal.
    if ctx.app.prompt.is_some() {
        return;
    }
    let Some(areas) = state.areas else {
        return;
    };
    let pos = Position::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if areas.slider.contains(pos) {
                state.dragging_slider = true;
                let max = ctx.app.now_playing.slider_max;
                ctx.controller.seek(ui::slider_value_at(areas.slider, mouse.column, max));
            } else if let Some(index) = ui::list_index_at(&areas, ctx.app, pos) {
                actions::play_index(index, ctx.app, ctx.controller);
            } else if areas.button.contains(pos) {
                ctx.controller.toggle();
            } else if areas.dir_button.is_some_and(|r| r.contains(pos)) {
                ctx.app.open_prompt();
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if state.dragging_slider => {
            let max = ctx.app.now_playing.slider_max;
            ctx.controller.seek(ui::slider_value_at(areas.slider, mouse.column, max));
        }
        MouseEventKind::Up(MouseButton::Left) => state.dragging_slider = false,
        MouseEventKind::ScrollDown => ctx.app.next(),
        MouseEventKind::ScrollUp => ctx.app.prev(),
        _ => {}
    }
}
