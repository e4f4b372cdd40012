//! UI rendering helpers for the terminal user interface.
//!
//! `draw` renders the window with `ratatui` and returns the [`Areas`] it
//! used, so the runtime can map mouse clicks back onto widgets.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Modifier, Style},
    widgets::{
        Block, Borders, Clear, LineGauge, List, ListItem, ListState, Padding, Paragraph, Wrap,
    },
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map: BTreeMap<&'static str, &'static str> = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play selected song");
    map.insert("space/p", "play/pause");
    // h/l is filled dynamically from config.
    map.insert("o", "music directory");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_seconds: u64) -> String {
    let order = ["j/k", "enter", "space/p", "h/l", "gg/G", "o", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "h/l" {
                Some(format!("[h/l] seek -/+{}s", seek_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Screen regions of the last drawn frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub now_playing: Rect,
    pub song: Rect,
    pub elapsed: Rect,
    pub slider: Rect,
    pub total: Rect,
    pub cover: Rect,
    pub list: Rect,
    pub list_inner: Rect,
    pub button: Rect,
    pub dir_button: Option<Rect>,
    pub footer: Rect,
}

/// Split `area` into the window's regions.
pub fn layout(area: Rect, show_dir_button: bool) -> Areas {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Min(3),
        Constraint::Length(3),
    ];
    if show_dir_button {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(4));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let now_playing = chunks[1];
    let np_inner = now_playing.inner(Margin::new(1, 1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(np_inner);
    let progress = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(8), Constraint::Min(1), Constraint::Length(8)])
        .split(rows[1]);

    let list = chunks[2];
    let (dir_button, footer) = if show_dir_button {
        (Some(chunks[4]), chunks[5])
    } else {
        (None, chunks[4])
    };

    Areas {
        header: chunks[0],
        now_playing,
        song: rows[0],
        elapsed: progress[0],
        slider: progress[1],
        total: progress[2],
        cover: rows[2],
        list,
        list_inner: list.inner(Margin::new(1, 1)),
        button: chunks[3],
        dir_button,
        footer,
    }
}

/// Visible slice `[start, end)` of a list of `total` rows in `height` lines,
/// keeping `selected` centered when possible.
pub fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Track index under `pos`, if it lands on a list row.
pub fn list_index_at(areas: &Areas, app: &App, pos: Position) -> Option<usize> {
    let inner = areas.list_inner;
    if !inner.contains(pos) {
        return None;
    }
    let (start, end) = visible_window(app.tracks.len(), inner.height as usize, app.selected);
    let idx = start + (pos.y - inner.y) as usize;
    (idx < end).then_some(idx)
}

/// Slider value for `column`, clamped to the slider's extent.
pub fn slider_value_at(slider: Rect, column: u16, max: u64) -> u64 {
    if slider.width <= 1 {
        return 0;
    }
    let offset = column.saturating_sub(slider.x).min(slider.width - 1);
    let fraction = offset as f64 / (slider.width - 1) as f64;
    (fraction * max as f64).round() as u64
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the entire UI into `frame` and return the regions used.
pub fn draw(frame: &mut Frame, app: &App, ui: &UiSettings, controls: &ControlsSettings) -> Areas {
    let areas = layout(frame.area(), app.first_run);
    let np = &app.now_playing;

    // Header
    let header = Paragraph::new(ui.window_title.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" mellomaniac ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, areas.header);

    // Now playing
    frame.render_widget(Block::bordered().title(" now playing "), areas.now_playing);
    frame.render_widget(
        Paragraph::new(np.song_label.as_str()).alignment(Alignment::Center),
        areas.song,
    );
    frame.render_widget(
        Paragraph::new(np.elapsed_label.as_str()).alignment(Alignment::Center),
        areas.elapsed,
    );
    frame.render_widget(
        LineGauge::default()
            .ratio(np.ratio())
            .label("")
            .filled_style(Style::default().add_modifier(Modifier::BOLD)),
        areas.slider,
    );
    frame.render_widget(
        Paragraph::new(np.total_label.as_str()).alignment(Alignment::Center),
        areas.total,
    );
    if ui.show_cover_art {
        let cover = np.cover_art_text().unwrap_or_else(|| "no cover art".to_string());
        frame.render_widget(
            Paragraph::new(cover)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM)),
            areas.cover,
        );
    }

    // Track list. Only build ListItems for the visible window.
    {
        let total = app.tracks.len();
        let (start, end) = visible_window(total, areas.list_inner.height as usize, app.selected);

        let visible_items: Vec<ListItem> = app.tracks[start..end]
            .iter()
            .map(|t| ListItem::new(t.display_name.as_str()))
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(app.selected.saturating_sub(start)));
        }
        frame.render_stateful_widget(list, areas.list, &mut state);
    }

    // Buttons
    let button = Paragraph::new(format!("[ {} ]", np.button_label))
        .alignment(Alignment::Center)
        .block(Block::bordered());
    frame.render_widget(button, areas.button);

    if let Some(rect) = areas.dir_button {
        let dir_button = Paragraph::new(format!("[ {} ]", ui.select_directory_label))
            .alignment(Alignment::Center)
            .block(Block::bordered());
        frame.render_widget(dir_button, rect);
    }

    // Footer; the title doubles as the status line.
    let footer_title = match (&app.status_message, &np.error) {
        (Some(msg), _) | (None, Some(msg)) => format!(" {} ", msg),
        (None, None) => " controls ".to_string(),
    };
    let footer = Paragraph::new(controls_text(controls.seek_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(footer_title)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, areas.footer);

    // Directory prompt overlay
    if let Some(ref prompt) = app.prompt {
        let popup = centered_rect_sized(64, 3, frame.area());
        frame.render_widget(Clear, popup);
        let input = Paragraph::new(format!("{}_", prompt.input)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" music directory (enter: choose, esc: cancel) "),
        );
        frame.render_widget(input, popup);
    }

    areas
}
