//! Retained drawing surface: the core's [`Renderer`], read back by the UI.
//!
//! The machine asks for drawables and clears them by handle. Layout happens
//! later in `ui::draw`, which looks items up by role.

use std::collections::BTreeMap;

use stratagem_core::{Drawable, Renderer, TextStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Text { text: String, style: TextStyle },
    Icon(String),
}

#[derive(Debug, Default)]
pub struct Canvas {
    next_id: u64,
    items: BTreeMap<Drawable, Item>,
    dirty: bool,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    /// Newest text drawn in the given role.
    pub fn text(&self, style: TextStyle) -> Option<&str> {
        self.items.values().rev().find_map(|item| match item {
            Item::Text { text, style: s } if *s == style => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn icon(&self) -> Option<&str> {
        self.items.values().rev().find_map(|item| match item {
            Item::Icon(icon) => Some(icon.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Force a redraw on the next tick (resize, status change).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// True once per presented frame.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn insert(&mut self, item: Item) -> Drawable {
        self.next_id += 1;
        let id = Drawable(self.next_id);
        self.items.insert(id, item);
        id
    }
}

impl Renderer for Canvas {
    fn render_text(&mut self, text: &str, style: TextStyle) -> Drawable {
        self.insert(Item::Text {
            text: text.to_string(),
            style,
        })
    }

    fn render_icon(&mut self, icon: &str) -> Drawable {
        self.insert(Item::Icon(icon.to_string()))
    }

    fn clear_region(&mut self, drawable: Drawable) {
        if self.items.remove(&drawable).is_none() {
            tracing::debug!(?drawable, "clear of unknown drawable");
        }
    }

    fn present_frame(&mut self) {
        self.dirty = true;
    }
}
