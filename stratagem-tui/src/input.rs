//! Terminal input mapping: crossterm events → core input events.
//!
//! Mouse cells are scaled to pixels so the swipe threshold keeps its meaning.
//! Arrow keys report release through the keyboard enhancement protocol when
//! the terminal supports it; otherwise every press is delivered as a full
//! down+up pair.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use stratagem_core::{InputEvent, Key, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMapper {
    cell_width_px: f64,
    cell_height_px: f64,
    release_events: bool,
}

impl InputMapper {
    pub fn new(cell_width_px: f64, cell_height_px: f64, release_events: bool) -> Self {
        Self {
            cell_width_px,
            cell_height_px,
            release_events,
        }
    }

    /// Map one terminal event. Most events map to nothing; a key press
    /// without release reporting maps to two.
    pub fn map(&self, event: &Event) -> Vec<InputEvent> {
        match event {
            Event::Key(key) => self.map_key(key),
            Event::Mouse(mouse) => self.map_mouse(mouse).into_iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Centre of a cell, in pixels.
    pub fn cell_to_point(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.cell_width_px,
            (f64::from(row) + 0.5) * self.cell_height_px,
        )
    }

    fn map_key(&self, key: &KeyEvent) -> Vec<InputEvent> {
        if is_quit(key) {
            return match key.kind {
                KeyEventKind::Press => vec![InputEvent::Quit],
                _ => Vec::new(),
            };
        }

        let Some(arrow) = arrow_key(key.code) else {
            return Vec::new();
        };
        match (key.kind, self.release_events) {
            (KeyEventKind::Press, true) => vec![InputEvent::KeyDown(arrow)],
            (KeyEventKind::Release, true) => vec![InputEvent::KeyUp(arrow)],
            (KeyEventKind::Press, false) => {
                vec![InputEvent::KeyDown(arrow), InputEvent::KeyUp(arrow)]
            }
            // Auto-repeat would append the same symbol over and over.
            (KeyEventKind::Repeat, _) | (KeyEventKind::Release, false) => Vec::new(),
        }
    }

    fn map_mouse(&self, mouse: &MouseEvent) -> Option<InputEvent> {
        let point = self.cell_to_point(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::GestureStart(point)),
            MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::GestureEnd(point)),
            _ => None,
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn arrow_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Right => Some(Key::Right),
        _ => None,
    }
}
