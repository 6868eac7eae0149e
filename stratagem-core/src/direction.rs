//! Direction symbols and the raw input primitives they are classified from.

use std::fmt;

/// A discrete direction symbol.
///
/// `None` means "no gesture detected". It is produced by the classifier for
/// noise and unmapped keys and must never reach a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    None,
    Left,
    Up,
    Down,
    Right,
}

impl Direction {
    /// The four symbols that can appear in a code.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Down,
        Direction::Right,
    ];

    /// Canonical single-character code used to build lookup keys.
    pub fn code(self) -> Option<char> {
        match self {
            Direction::None => None,
            Direction::Left => Some('L'),
            Direction::Up => Some('U'),
            Direction::Down => Some('D'),
            Direction::Right => Some('R'),
        }
    }

    /// Arrow glyph shown on screen.
    pub fn glyph(self) -> &'static str {
        match self {
            Direction::None => "",
            Direction::Left => "\u{2B05}",
            Direction::Up => "\u{2B06}",
            Direction::Down => "\u{2B07}",
            Direction::Right => "\u{2B95}",
        }
    }

    /// Parse one character of a dictionary code.
    ///
    /// Accepts the canonical letters (any case) and the arrow glyphs found in
    /// hand-written dictionaries.
    pub fn from_code_char(c: char) -> Option<Direction> {
        match c {
            'L' | 'l' | '\u{2B05}' | '\u{2190}' => Some(Direction::Left),
            'U' | 'u' | '\u{2B06}' | '\u{2191}' => Some(Direction::Up),
            'D' | 'd' | '\u{2B07}' | '\u{2193}' => Some(Direction::Down),
            'R' | 'r' | '\u{2B95}' | '\u{2192}' | '\u{27A1}' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn is_none(self) -> bool {
        self == Direction::None
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::None => "NONE",
            Direction::Left => "LEFT",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Right => "RIGHT",
        };
        f.write_str(label)
    }
}

/// Render a canonical code string (`"UDL"`) as arrow glyphs.
///
/// Characters that are not direction codes are passed through unchanged.
pub fn code_to_glyphs(code: &str) -> String {
    code.chars()
        .map(|c| match Direction::from_code_char(c) {
            Some(d) => d.glyph().to_string(),
            None => c.to_string(),
        })
        .collect()
}

/// A pointer position in screen space. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A normalized keyboard key, independent of any terminal or window backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Up,
    Down,
    Right,
    Escape,
    Char(char),
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_has_no_code() {
        assert_eq!(Direction::None.code(), None);
        assert!(Direction::None.is_none());
    }

    #[test]
    fn cardinal_codes_are_distinct_letters() {
        let codes: Vec<char> = Direction::CARDINALS
            .iter()
            .filter_map(|d| d.code())
            .collect();
        assert_eq!(codes, vec!['L', 'U', 'D', 'R']);
    }

    #[test]
    fn code_chars_roundtrip_through_glyphs() {
        for d in Direction::CARDINALS {
            let glyph = d.glyph().chars().next().unwrap();
            assert_eq!(Direction::from_code_char(glyph), Some(d));
            assert_eq!(Direction::from_code_char(d.code().unwrap()), Some(d));
        }
    }

    #[test]
    fn plain_arrows_and_lowercase_are_accepted() {
        assert_eq!(Direction::from_code_char('\u{2190}'), Some(Direction::Left));
        assert_eq!(Direction::from_code_char('\u{27A1}'), Some(Direction::Right));
        assert_eq!(Direction::from_code_char('u'), Some(Direction::Up));
        assert_eq!(Direction::from_code_char('x'), None);
    }

    #[test]
    fn glyph_rendering() {
        assert_eq!(code_to_glyphs("UD"), "\u{2B06}\u{2B07}");
        assert_eq!(code_to_glyphs(""), "");
    }
}
