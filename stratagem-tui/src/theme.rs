//! Neon theme tokens for the trainer.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (sequence being entered)
//! - **Positive**: Neon green (matched stratagem)
//! - **Negative**: Hot pink (rejected sequence)
//! - **Warning**: Neon orange (status warnings)
//! - **Muted**: Steel blue (hints, borders)

use ratatui::style::{Color, Modifier, Style};

use stratagem_core::InteractionState;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub fn neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Color of the sequence line: cyan while capturing, green on a match,
    /// pink while a rejected sequence flashes.
    pub fn sequence_color(&self, state: InteractionState) -> Color {
        match state {
            InteractionState::Capturing => self.accent,
            InteractionState::ShowingMatch => self.positive,
            InteractionState::ShowingFailure => self.negative,
        }
    }
}

// Style helpers used by the ui module.

pub fn sequence(state: InteractionState) -> Style {
    Style::default()
        .fg(Theme::default().sequence_color(state))
        .add_modifier(Modifier::BOLD)
}

pub fn name() -> Style {
    Style::default()
        .fg(Theme::default().text_primary)
        .add_modifier(Modifier::BOLD)
}

pub fn icon_border() -> Style {
    Style::default().fg(Theme::default().positive)
}

pub fn frame_border() -> Style {
    Style::default().fg(Theme::default().muted)
}

pub fn accent() -> Style {
    Style::default().fg(Theme::default().accent)
}

pub fn warning() -> Style {
    Style::default().fg(Theme::default().warning)
}

pub fn muted() -> Style {
    Style::default().fg(Theme::default().muted)
}
