use ratatui::style::Color;

/// Persisted theme choice. The palette itself lives in [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Dark,
    Light,
}

impl ThemeKind {
    pub fn toggled(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }

    /// Stored string form under the "theme" key.
    pub fn as_stored(self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }

    /// Anything but a recognized "light" falls back to dark.
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some("light") => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    pub fn palette(self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::midnight(),
            ThemeKind::Light => Theme::paper(),
        }
    }
}

/// Palette used by the draw functions.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub anchor: Color,
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::midnight()
    }
}

impl Theme {
    /// Dark palette.
    pub fn midnight() -> Self {
        Self {
            background: Color::Rgb(26, 27, 38), // #1A1B26 Stormy Dark
            text: Color::Rgb(169, 177, 214),    // #A9B1D6 Light Blue
            anchor: Color::Rgb(247, 118, 142),  // #F7768E Coral Red
            dimmed: Color::Rgb(100, 110, 150),  // #646E96 Dimmed Blue
        }
    }

    /// Light palette.
    pub fn paper() -> Self {
        Self {
            background: Color::Rgb(250, 248, 240), // #FAF8F0 Warm Paper
            text: Color::Rgb(56, 58, 66),          // #383A42 Ink
            anchor: Color::Rgb(202, 18, 67),       // #CA1243 Carmine
            dimmed: Color::Rgb(160, 161, 167),     // #A0A1A7 Pencil Grey
        }
    }
}
