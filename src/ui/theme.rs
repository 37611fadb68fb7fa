#![allow(clippy::cast_possible_truncation)]

use ratatui::style::Color;

use crate::{cli::ColorArg, domain::Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

/// Picks the richest color model the terminal advertises, honoring the
/// `--color` policy and `NO_COLOR`.
pub fn detect_color_capability(mode: ColorArg) -> ColorCapability {
    let term = std::env::var("TERM").ok();
    let colorterm = std::env::var("COLORTERM").ok();
    let no_color = std::env::var("NO_COLOR").ok();
    capability_from_env(
        mode,
        term.as_deref(),
        colorterm.as_deref(),
        no_color.as_deref(),
    )
}

fn capability_from_env(
    mode: ColorArg,
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> ColorCapability {
    let term = term.unwrap_or_default().to_ascii_lowercase();
    let colorterm = colorterm.unwrap_or_default().to_ascii_lowercase();
    let no_color = no_color.is_some_and(|value| !value.is_empty());

    let forced_basic = match mode {
        ColorArg::Never => true,
        ColorArg::Auto => no_color || term == "dumb",
        ColorArg::Always => false,
    };
    if forced_basic {
        return ColorCapability::Basic16;
    }

    if truecolor_hint(&colorterm) || truecolor_hint(&term) {
        ColorCapability::TrueColor
    } else if term.contains("256color") {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

fn truecolor_hint(value: &str) -> bool {
    value.contains("truecolor") || value.contains("24bit") || value.ends_with("direct")
}

/// Channel values of the xterm 6x6x6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// xterm defaults for the sixteen named colors.
const BASIC16: [(Color, Rgb); 16] = [
    (Color::Black, (0, 0, 0)),
    (Color::Red, (205, 0, 0)),
    (Color::Green, (0, 205, 0)),
    (Color::Yellow, (205, 205, 0)),
    (Color::Blue, (0, 0, 238)),
    (Color::Magenta, (205, 0, 205)),
    (Color::Cyan, (0, 205, 205)),
    (Color::Gray, (229, 229, 229)),
    (Color::DarkGray, (127, 127, 127)),
    (Color::LightRed, (255, 0, 0)),
    (Color::LightGreen, (0, 255, 0)),
    (Color::LightYellow, (255, 255, 0)),
    (Color::LightBlue, (92, 92, 255)),
    (Color::LightMagenta, (255, 0, 255)),
    (Color::LightCyan, (0, 255, 255)),
    (Color::White, (255, 255, 255)),
];

/// Maps a raster pixel to the closest color the terminal can show.
#[must_use]
pub fn rgb_color(rgb: Rgb, capability: ColorCapability) -> Color {
    match capability {
        ColorCapability::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
        ColorCapability::Xterm256 => xterm256(rgb),
        ColorCapability::Basic16 => BASIC16
            .iter()
            .min_by_key(|(_, candidate)| distance(rgb, *candidate))
            .map_or(Color::White, |(color, _)| *color),
    }
}

/// Nearest entry of the color cube or the 24-step gray ramp, whichever is
/// closer.
fn xterm256(rgb: Rgb) -> Color {
    let [r, g, b] = [rgb.0, rgb.1, rgb.2].map(nearest_level);
    let cube = (CUBE_LEVELS[r], CUBE_LEVELS[g], CUBE_LEVELS[b]);
    let cube_index = 16 + 36 * r + 6 * g + b;

    let mean = (u16::from(rgb.0) + u16::from(rgb.1) + u16::from(rgb.2)) / 3;
    let step = (mean.saturating_sub(3) / 10).min(23);
    let level = (8 + 10 * step) as u8;

    if distance(rgb, (level, level, level)) < distance(rgb, cube) {
        Color::Indexed(232 + step as u8)
    } else {
        Color::Indexed(cube_index as u8)
    }
}

fn nearest_level(value: u8) -> usize {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, level)| level.abs_diff(value))
        .map_or(0, |(index, _)| index)
}

fn distance(a: Rgb, b: Rgb) -> u32 {
    let d = |x: u8, y: u8| u32::from(x.abs_diff(y)).pow(2);
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truecolor_passes_rgb_through() {
        assert_eq!(
            rgb_color((74, 144, 226), ColorCapability::TrueColor),
            Color::Rgb(74, 144, 226)
        );
    }

    #[test]
    fn xterm256_uses_cube_corners_for_black_and_white() {
        assert_eq!(
            rgb_color((255, 255, 255), ColorCapability::Xterm256),
            Color::Indexed(231)
        );
        assert_eq!(
            rgb_color((0, 0, 0), ColorCapability::Xterm256),
            Color::Indexed(16)
        );
    }

    #[test]
    fn xterm256_picks_nearest_cube_entry_for_sky_blue() {
        assert_eq!(
            rgb_color((0x4A, 0x90, 0xE2), ColorCapability::Xterm256),
            Color::Indexed(68)
        );
    }

    #[test]
    fn xterm256_prefers_gray_ramp_for_neutral_tones() {
        assert_eq!(
            rgb_color((128, 128, 128), ColorCapability::Xterm256),
            Color::Indexed(244)
        );
    }

    #[test]
    fn basic16_keeps_sky_snow_and_storm_apart() {
        let clear = rgb_color((0x4A, 0x90, 0xE2), ColorCapability::Basic16);
        let snow = rgb_color((0xEC, 0xF0, 0xF1), ColorCapability::Basic16);
        let storm = rgb_color((0x1C, 0x28, 0x33), ColorCapability::Basic16);
        assert_eq!(clear, Color::LightBlue);
        assert_eq!(snow, Color::Gray);
        assert_eq!(storm, Color::Black);
    }

    #[test]
    fn never_forces_basic16_even_on_truecolor_terminals() {
        assert_eq!(
            capability_from_env(ColorArg::Never, Some("xterm-256color"), Some("truecolor"), None),
            ColorCapability::Basic16
        );
    }

    #[test]
    fn auto_respects_no_color_and_dumb_terminals() {
        assert_eq!(
            capability_from_env(ColorArg::Auto, Some("xterm-256color"), None, Some("1")),
            ColorCapability::Basic16
        );
        assert_eq!(
            capability_from_env(ColorArg::Auto, Some("dumb"), None, None),
            ColorCapability::Basic16
        );
    }

    #[test]
    fn auto_detects_truecolor_and_256_color_hints() {
        assert_eq!(
            capability_from_env(ColorArg::Auto, Some("xterm"), Some("24bit"), None),
            ColorCapability::TrueColor
        );
        assert_eq!(
            capability_from_env(ColorArg::Auto, Some("screen-256color"), None, Some("")),
            ColorCapability::Xterm256
        );
        assert_eq!(
            capability_from_env(ColorArg::Auto, Some("xterm"), None, None),
            ColorCapability::Basic16
        );
    }

    #[test]
    fn always_ignores_no_color() {
        assert_eq!(
            capability_from_env(ColorArg::Always, Some("xterm-256color"), None, Some("1")),
            ColorCapability::Xterm256
        );
    }
}
