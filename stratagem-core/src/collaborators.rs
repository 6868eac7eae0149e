//! Interfaces the core calls into: drawing and sound.
//!
//! The core never lays anything out. It asks the renderer for drawables,
//! keeps the opaque handles it gets back, and hands them back to be cleared.

/// Opaque handle to something the renderer has drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Drawable(pub u64);

/// Semantic text role. Placement, font and color belong to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    /// The in-progress (or just completed) direction sequence.
    Sequence,
    /// A matched stratagem's name.
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Keystroke,
    Success,
    Failure,
}

pub trait Renderer {
    fn render_text(&mut self, text: &str, style: TextStyle) -> Drawable;
    fn render_icon(&mut self, icon: &str) -> Drawable;
    fn clear_region(&mut self, drawable: Drawable);
    fn present_frame(&mut self);
}

/// Fire-and-forget sound output.
pub trait AudioSink {
    fn play(&mut self, sound: SoundId);
}

/// Audio sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _sound: SoundId) {}
}
