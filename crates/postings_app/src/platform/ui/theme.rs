use clap::ValueEnum;
use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// Light/dark display preference. Owned by the session and handed to the
/// renderer; nothing in the core reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                heading: Color::White,
                title: Color::Cyan,
                excerpt: Color::Grey,
                link: Color::Blue,
                muted: Color::DarkGrey,
                success: Color::Green,
                error: Color::Red,
            },
            Theme::Light => Palette {
                heading: Color::Black,
                title: Color::DarkBlue,
                excerpt: Color::DarkGrey,
                link: Color::DarkCyan,
                muted: Color::Grey,
                success: Color::DarkGreen,
                error: Color::DarkRed,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub heading: Color,
    pub title: Color,
    pub excerpt: Color,
    pub link: Color,
    pub muted: Color,
    pub success: Color,
    pub error: Color,
}
