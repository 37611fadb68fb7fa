pub mod backdrop;
pub mod canvas;
pub mod clouds;
pub mod particles;
pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::app::state::AppState;

/// Draws the whole viewport. Without a mounted backdrop the frame is left
/// empty.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    if state.backdrop.is_none() {
        return;
    }

    frame.render_widget(
        widgets::backdrop::BackdropView {
            canvas: &state.canvas,
            capability: state.capability,
        },
        area,
    );

    if state.show_label {
        render_condition_badge(frame, area, state);
    }
}

fn render_condition_badge(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = format!(" {} ", state.condition.name());
    let width = u16::try_from(text.chars().count())
        .unwrap_or(u16::MAX)
        .min(area.width);
    if width == 0 || area.height == 0 {
        return;
    }
    let badge_area = Rect {
        x: area.right().saturating_sub(width + 1),
        y: area.y,
        width,
        height: 1,
    };
    let badge = Paragraph::new(Line::from(text)).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(badge, badge_area);
}
