#![allow(dead_code)]

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use weather_backdrop::{
    app::{events::AppEvent, settings::RuntimeSettings, state::AppState},
    domain::Condition,
    ui::{self, theme::ColorCapability},
};

pub const SEED: u64 = 2024;

pub fn ready_state(condition: Condition, columns: u16, rows: u16) -> AppState {
    let mut state = AppState::new(
        RuntimeSettings::default(),
        condition,
        ColorCapability::TrueColor,
        Some(SEED),
        columns,
        rows,
    );
    state.handle_event(AppEvent::Bootstrap);
    state
}

pub fn draw(state: &AppState, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal
        .draw(|frame| ui::render(frame, state))
        .expect("draw");
    terminal.backend().buffer().clone()
}

pub fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol().to_string())
        .collect()
}
