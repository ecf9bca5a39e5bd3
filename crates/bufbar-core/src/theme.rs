//! Colour palette for the buffer line
//!
//! The bar only distinguishes a handful of roles: the selected element,
//! everything else, pick letters, badges, group labels and truncation
//! markers. Palettes can be loaded from the `[theme]` table of the
//! configuration file or constructed programmatically.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Named colour palette
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BarTheme {
    /// Theme display name
    pub name: String,
    /// Colour roles
    pub colors: BarColors,
}

/// Colours for each role in the bar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BarColors {
    /// Bar background behind unselected elements
    #[serde(with = "color_serde")]
    pub fill: Color,
    /// Text of unselected elements
    #[serde(with = "color_serde")]
    pub foreground: Color,
    /// Background of the selected element
    #[serde(with = "color_serde")]
    pub selected_background: Color,
    /// Text of the selected element
    #[serde(with = "color_serde")]
    pub selected_foreground: Color,
    /// Pick-mode letters
    #[serde(with = "color_serde")]
    pub pick: Color,
    /// Modified indicator
    #[serde(with = "color_serde")]
    pub modified: Color,
    /// Diagnostics badge
    #[serde(with = "color_serde")]
    pub diagnostics: Color,
    /// Group labels
    #[serde(with = "color_serde")]
    pub group: Color,
    /// Separators and truncation markers
    #[serde(with = "color_serde")]
    pub muted: Color,
}

/// Serde adapter storing colours as ratatui colour strings
/// (`"blue"`, `"#89b4fa"`, `"42"`).
mod color_serde {
    use ratatui::style::Color;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&color.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(|_| serde::de::Error::custom(format!("unknown color: {s}")))
    }
}

impl BarTheme {
    /// Creates the default dark theme
    pub fn dark() -> Self {
        BarTheme {
            name: "Dark".to_string(),
            colors: BarColors::default(),
        }
    }

    /// Creates a light theme
    pub fn light() -> Self {
        BarTheme {
            name: "Light".to_string(),
            colors: BarColors {
                fill: Color::Rgb(220, 224, 232),               // Catppuccin latte crust
                foreground: Color::Rgb(92, 95, 119),           // Catppuccin latte subtext1
                selected_background: Color::Rgb(239, 241, 245), // Catppuccin latte base
                selected_foreground: Color::Rgb(76, 79, 105),  // Catppuccin latte text
                pick: Color::Rgb(210, 15, 57),                 // Catppuccin latte red
                modified: Color::Rgb(64, 160, 43),             // Catppuccin latte green
                diagnostics: Color::Rgb(223, 142, 29),         // Catppuccin latte yellow
                group: Color::Rgb(30, 102, 245),               // Catppuccin latte blue
                muted: Color::Rgb(140, 143, 161),              // Catppuccin latte overlay1
            },
        }
    }

    /// Style of an element label.
    #[must_use]
    pub fn element(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.colors.selected_foreground)
                .bg(self.colors.selected_background)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.colors.foreground)
                .bg(self.colors.fill)
        }
    }

    /// Style of a separator; it takes the selected background when it
    /// touches the selected element.
    #[must_use]
    pub fn separator(&self, touches_selected: bool) -> Style {
        let bg = if touches_selected {
            self.colors.selected_background
        } else {
            self.colors.fill
        };
        Style::default().fg(self.colors.muted).bg(bg)
    }

    /// Style of a pick letter.
    #[must_use]
    pub fn pick(&self, selected: bool) -> Style {
        self.element(selected)
            .fg(self.colors.pick)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC)
    }

    /// Style of the modified indicator.
    #[must_use]
    pub fn modified(&self, selected: bool) -> Style {
        self.element(selected).fg(self.colors.modified)
    }

    /// Style of the diagnostics badge.
    #[must_use]
    pub fn diagnostics(&self, selected: bool) -> Style {
        self.element(selected).fg(self.colors.diagnostics)
    }

    /// Style of a group label.
    #[must_use]
    pub fn group(&self) -> Style {
        Style::default()
            .fg(self.colors.group)
            .bg(self.colors.fill)
            .add_modifier(Modifier::BOLD)
    }

    /// Style of the truncation markers.
    #[must_use]
    pub fn marker(&self) -> Style {
        Style::default().fg(self.colors.muted).bg(self.colors.fill)
    }

    /// Style of the empty part of the bar.
    #[must_use]
    pub fn fill(&self) -> Style {
        Style::default().bg(self.colors.fill)
    }
}

impl Default for BarTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Default for BarColors {
    fn default() -> Self {
        BarColors {
            fill: Color::Rgb(24, 24, 37),                   // Catppuccin mantle
            foreground: Color::Rgb(147, 153, 178),          // Catppuccin subtext1
            selected_background: Color::Rgb(30, 30, 46),    // Catppuccin base
            selected_foreground: Color::Rgb(205, 214, 244), // Catppuccin text
            pick: Color::Rgb(243, 139, 168),                // Catppuccin red
            modified: Color::Rgb(166, 227, 161),            // Catppuccin green
            diagnostics: Color::Rgb(249, 226, 175),         // Catppuccin yellow
            group: Color::Rgb(137, 180, 250),               // Catppuccin blue
            muted: Color::Rgb(88, 91, 112),                 // Catppuccin surface2
        }
    }
}
