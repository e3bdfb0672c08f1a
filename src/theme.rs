use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub value: String,
}

/// Colour roles the presentation layer paints with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub header: Color,
    pub card: Color,
    pub button: Color,
    pub text: Color,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Nord,
    Dracula,
    Solarized,
    Forest,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Light,
        Theme::Dark,
        Theme::Nord,
        Theme::Dracula,
        Theme::Solarized,
        Theme::Forest,
    ];

    /// Light or dark depending on the terminal background, dark if unknown.
    pub fn system_default() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }

    /// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); the last field is
    /// the background colour index.
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let background = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());

        match background {
            Some(7) | Some(9..=15) => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::Rgb(250, 250, 250),
                header: Color::Rgb(40, 40, 40),
                card: Color::Rgb(229, 231, 235),
                button: Color::Rgb(209, 213, 219),
                text: Color::Rgb(75, 85, 99),
            },
            Theme::Dark => Palette {
                background: Color::Rgb(24, 24, 27),
                header: Color::Rgb(244, 244, 245),
                card: Color::Rgb(39, 39, 42),
                button: Color::Rgb(63, 63, 70),
                text: Color::Rgb(161, 161, 170),
            },
            Theme::Nord => Palette {
                background: Color::Rgb(46, 52, 64),
                header: Color::Rgb(136, 192, 208),
                card: Color::Rgb(59, 66, 82),
                button: Color::Rgb(76, 86, 106),
                text: Color::Rgb(216, 222, 233),
            },
            Theme::Dracula => Palette {
                background: Color::Rgb(40, 42, 54),
                header: Color::Rgb(255, 121, 198),
                card: Color::Rgb(68, 71, 90),
                button: Color::Rgb(98, 114, 164),
                text: Color::Rgb(248, 248, 242),
            },
            Theme::Solarized => Palette {
                background: Color::Rgb(0, 43, 54),
                header: Color::Rgb(181, 137, 0),
                card: Color::Rgb(7, 54, 66),
                button: Color::Rgb(88, 110, 117),
                text: Color::Rgb(147, 161, 161),
            },
            Theme::Forest => Palette {
                background: Color::Rgb(27, 38, 32),
                header: Color::Rgb(163, 190, 140),
                card: Color::Rgb(38, 54, 45),
                button: Color::Rgb(62, 84, 70),
                text: Color::Rgb(214, 222, 201),
            },
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownName {
                kind: "theme",
                value: s.to_owned(),
            })
    }
}

/// Terminals cannot switch typefaces, so each font maps to a text style.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Font {
    #[default]
    Ubuntu,
    #[strum(serialize = "Fira Code")]
    FiraCode,
    Merriweather,
    Lexend,
}

impl Font {
    pub const ALL: [Font; 4] = [Font::Ubuntu, Font::FiraCode, Font::Merriweather, Font::Lexend];

    pub fn modifier(&self) -> Modifier {
        match self {
            Font::Ubuntu => Modifier::empty(),
            Font::FiraCode => Modifier::BOLD,
            Font::Merriweather => Modifier::ITALIC,
            Font::Lexend => Modifier::BOLD | Modifier::ITALIC,
        }
    }

    pub fn style(&self) -> Style {
        Style::default().add_modifier(self.modifier())
    }
}

impl FromStr for Font {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Font::ALL
            .into_iter()
            .find(|f| f.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownName {
                kind: "font",
                value: s.to_owned(),
            })
    }
}
