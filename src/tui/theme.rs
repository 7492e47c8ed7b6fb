use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{Status, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub selection_bg: Color,
    /// Drop marker and ghost accent
    pub drop_marker: Color,
    pub ghost_bg: Color,
    /// Chip colors per status
    pub status_colors: HashMap<Status, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let status_colors = Status::ALL
            .into_iter()
            .filter_map(|status| Some((status, parse_hex_color(status.default_color())?)))
            .collect();

        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xD3, 0x2F, 0x2F),
            green: Color::Rgb(0x38, 0x8E, 0x3C),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            drop_marker: Color::Rgb(0x40, 0xE0, 0xD0),
            ghost_bg: Color::Rgb(0x2A, 0x1F, 0x4F),
            status_colors,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        // Apply color overrides from [ui.colors]
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "green" => theme.green = color,
                    "selection_bg" => theme.selection_bg = color,
                    "drop_marker" => theme.drop_marker = color,
                    "ghost_bg" => theme.ghost_bg = color,
                    _ => {}
                }
            }
        }

        // Apply chip overrides from [ui.status_colors]
        for (key, value) in &ui.status_colors {
            if let (Some(status), Some(color)) = (Status::parse(key), parse_hex_color(value)) {
                theme.status_colors.insert(status, color);
            }
        }

        theme
    }

    /// Chip background for a status, falling back to text color
    pub fn status_color(&self, status: Status) -> Color {
        self.status_colors.get(&status).copied().unwrap_or(self.text)
    }

    /// Readable text color on top of the status chip
    pub fn chip_fg(&self, status: Status) -> Color {
        contrast_fg(self.status_color(status))
    }
}

/// Black on light backgrounds, white on dark ones
pub fn contrast_fg(bg: Color) -> Color {
    match bg {
        Color::Rgb(r, g, b) => {
            let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
            if luma > 150_000 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
    }

    #[test]
    fn test_default_theme_has_every_status() {
        let theme = Theme::default();
        assert_eq!(theme.status_colors.len(), Status::ALL.len());
        assert_eq!(
            theme.status_color(Status::Review),
            Color::Rgb(0xD3, 0x2F, 0x2F)
        );
        assert_eq!(
            theme.status_color(Status::Escalation),
            Color::Rgb(0xFF, 0xA5, 0x00)
        );
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.status_colors.insert("decision".into(), "#112233".into());
        ui.status_colors.insert("bogus".into(), "#112233".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(
            theme.status_color(Status::Decision),
            Color::Rgb(0x11, 0x22, 0x33)
        );
        // Unchanged defaults still present
        assert_eq!(theme.text, Color::Rgb(0xB0, 0xAA, 0xFF));
    }

    #[test]
    fn test_chip_contrast() {
        let theme = Theme::default();
        // pale yellow and orange chips need dark text
        assert_eq!(theme.chip_fg(Status::Help), Color::Black);
        assert_eq!(theme.chip_fg(Status::Escalation), Color::Black);
        // deep blue and purple need light text
        assert_eq!(theme.chip_fg(Status::Approval), Color::White);
        assert_eq!(theme.chip_fg(Status::Alignment), Color::White);
    }
}
