use ratatui::style::Color;

/// Catppuccin Mocha color palette.
///
/// Values are hex RGB strings in the `#RRGGBB` format.
pub mod colors {
    pub const RED: &str = "#f38ba8";
    pub const PEACH: &str = "#fab387";
    pub const YELLOW: &str = "#f9e2af";
    pub const GREEN: &str = "#a6e3a1";
    pub const BLUE: &str = "#89b4fa";
    pub const MAUVE: &str = "#cba6f7";
    pub const LAVENDER: &str = "#b4befe";

    pub const SURFACE0: &str = "#313244";
    pub const SURFACE1: &str = "#45475a";
    pub const OVERLAY1: &str = "#7f849c";

    pub const SUBTEXT0: &str = "#a6adc8";
    pub const TEXT: &str = "#cdd6f4";

    pub const BASE: &str = "#1e1e2e";
    pub const MANTLE: &str = "#181825";
}

fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Convert a palette entry to a ratatui color. Falls back to `Reset` on bad input.
pub fn color(hex: &str) -> Color {
    match parse_hex_rgb(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Reset,
    }
}

/// Colors used by the directory screen
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub focus: Color,
    pub active: Color,
    pub inactive: Color,
    pub error: Color,
    pub warn: Color,
    pub selection: Color,
}

impl Theme {
    pub fn mocha() -> Self {
        Self {
            background: color(colors::BASE),
            surface: color(colors::MANTLE),
            text: color(colors::TEXT),
            muted: color(colors::SUBTEXT0),
            accent: color(colors::BLUE),
            border: color(colors::SURFACE1),
            focus: color(colors::MAUVE),
            active: color(colors::GREEN),
            inactive: color(colors::OVERLAY1),
            error: color(colors::RED),
            warn: color(colors::PEACH),
            selection: color(colors::SURFACE0),
        }
    }

    /// Terminal default colors, for `--no-color`
    pub fn plain() -> Self {
        Self {
            background: Color::Reset,
            surface: Color::Reset,
            text: Color::Reset,
            muted: Color::Reset,
            accent: Color::Reset,
            border: Color::Reset,
            focus: Color::Reset,
            active: Color::Reset,
            inactive: Color::Reset,
            error: Color::Reset,
            warn: Color::Reset,
            selection: Color::Reset,
        }
    }
}
