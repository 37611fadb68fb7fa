mod common;

use common::{draw, ready_state, row_text};
use ratatui::style::Color;
use weather_backdrop::{app::events::AppEvent, domain::Condition};

fn red_channel(color: Color) -> u32 {
    match color {
        Color::Rgb(r, _, _) => u32::from(r),
        other => panic!("expected rgb color, got {other:?}"),
    }
}

#[test]
fn mounted_backdrop_fills_every_cell_with_half_blocks() {
    let mut state = ready_state(Condition::Rain, 60, 20);
    state.handle_event(AppEvent::TickFrame);
    let buffer = draw(&state, 60, 20);
    for y in 0..20 {
        assert_eq!(row_text(&buffer, y), "▀".repeat(60), "row {y}");
    }
}

#[test]
fn clear_sky_gradient_brightens_towards_the_bottom() {
    let mut state = ready_state(Condition::Clear, 80, 24);
    state.handle_event(AppEvent::TickFrame);
    let buffer = draw(&state, 80, 24);

    let top: u32 = (0..80_u16).map(|x| red_channel(buffer[(x, 0_u16)].fg)).sum();
    let bottom: u32 = (0..80_u16).map(|x| red_channel(buffer[(x, 23_u16)].bg)).sum();
    assert!(top < bottom, "top {top} bottom {bottom}");
}

#[test]
fn unavailable_surface_renders_nothing() {
    let mut state = ready_state(Condition::Snow, 0, 0);
    state.handle_event(AppEvent::TickFrame);
    assert!(state.backdrop.is_none());

    let buffer = draw(&state, 20, 5);
    for y in 0..5 {
        assert_eq!(row_text(&buffer, y), " ".repeat(20));
    }
}

#[test]
fn label_shows_active_condition() {
    let mut state = ready_state(Condition::Thunderstorm, 40, 10);
    state.show_label = true;
    state.handle_event(AppEvent::TickFrame);
    let buffer = draw(&state, 40, 10);
    assert!(row_text(&buffer, 0).contains(" thunderstorm "));
    assert_eq!(row_text(&buffer, 1), "▀".repeat(40));
}

#[test]
fn same_seed_renders_identical_frames() {
    let mut first = ready_state(Condition::Snow, 50, 16);
    let mut second = ready_state(Condition::Snow, 50, 16);
    for _ in 0..5 {
        first.handle_event(AppEvent::TickFrame);
        second.handle_event(AppEvent::TickFrame);
    }
    assert_eq!(draw(&first, 50, 16), draw(&second, 50, 16));
}

#[test]
fn switching_condition_changes_the_palette() {
    let mut state = ready_state(Condition::Clear, 30, 10);
    state.handle_event(AppEvent::TickFrame);
    let before = draw(&state, 30, 10);

    state.set_condition(Condition::Thunderstorm);
    state.handle_event(AppEvent::TickFrame);
    let after = draw(&state, 30, 10);

    let darkest = |buffer: &ratatui::buffer::Buffer| red_channel(buffer[(0_u16, 9_u16)].bg);
    assert!(darkest(&after) < darkest(&before));
}
