//! Application state: single-owner, main-thread only.
//!
//! Terminal events come in through [`AppState::handle_event`]; the event loop
//! in the core does the rest and draws into the [`Canvas`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use stratagem_core::{
    AppConfig, AudioSink, EventLoop, Flow, InteractionMachine, InteractionState,
    StratagemDictionary,
};

use crate::canvas::Canvas;
use crate::input::InputMapper;

/// Upper bound on how long the main loop sleeps waiting for input.
pub const TICK: Duration = Duration::from_millis(50);

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

pub struct AppState {
    pub event_loop: EventLoop,
    pub canvas: Canvas,
    pub audio: Box<dyn AudioSink>,
    pub mapper: InputMapper,
    pub dictionary_path: PathBuf,
    pub dictionary_len: usize,
    pub status_message: Option<(String, StatusLevel)>,
    pub running: bool,
}

impl AppState {
    pub fn new(
        dictionary: Arc<StratagemDictionary>,
        config: &AppConfig,
        audio: Box<dyn AudioSink>,
        release_events: bool,
        now: Instant,
    ) -> Self {
        let dictionary_len = dictionary.len();
        let machine = InteractionMachine::new(dictionary, config.interaction());
        let mapper = InputMapper::new(
            config.gesture.cell_width_px,
            config.gesture.cell_height_px,
            release_events,
        );
        Self {
            event_loop: EventLoop::new(machine, now),
            canvas: Canvas::new(),
            audio,
            mapper,
            dictionary_path: config.dictionary.clone(),
            dictionary_len,
            status_message: None,
            running: true,
        }
    }

    /// Feed one terminal event, then run the loop.
    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        if let Event::Resize(..) = event {
            self.canvas.invalidate();
        }
        for input in self.mapper.map(event) {
            self.event_loop.push(input);
        }
        self.tick(now);
    }

    /// Fire due timers and dispatch anything queued.
    pub fn tick(&mut self, now: Instant) {
        let flow = self
            .event_loop
            .pump(now, &mut self.canvas, self.audio.as_mut());
        if flow == Flow::Quit {
            self.running = false;
        }
    }

    /// How long to wait for input before the next tick.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.event_loop.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(TICK),
            None => TICK,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.event_loop.machine().state()
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.set_message(msg.into(), StatusLevel::Info);
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.set_message(msg.into(), StatusLevel::Warning);
    }

    fn set_message(&mut self, msg: String, level: StatusLevel) {
        self.status_message = Some((msg, level));
        self.canvas.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    };
    use stratagem_core::{Silent, TextStyle};

    fn app(release_events: bool, now: Instant) -> AppState {
        let dict = StratagemDictionary::from_entries([
            ("UDRLU", "Reinforce", "reinforce.svg"),
            ("RRU", "Orbital Precision Strike", "ops.svg"),
        ])
        .unwrap();
        AppState::new(
            Arc::new(dict),
            &AppConfig::default(),
            Box::new(Silent),
            release_events,
            now,
        )
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn arrow_keys_compose_a_match() {
        let now = Instant::now();
        let mut app = app(false, now);
        for code in [KeyCode::Right, KeyCode::Right, KeyCode::Up] {
            app.handle_event(&press(code), now);
        }
        assert_eq!(app.state(), InteractionState::ShowingMatch);
        assert_eq!(
            app.canvas.text(TextStyle::Name),
            Some("Orbital Precision Strike")
        );
        assert_eq!(app.canvas.icon(), Some("ops.svg"));

        app.tick(now + Duration::from_millis(1600));
        assert_eq!(app.state(), InteractionState::Capturing);
        assert!(app.canvas.is_empty());
    }

    #[test]
    fn key_release_appends_when_reported() {
        let now = Instant::now();
        let mut app = app(true, now);
        app.handle_event(&press(KeyCode::Up), now);
        assert!(app.event_loop.machine().composer().is_empty());
        app.handle_event(&release(KeyCode::Up), now);
        assert_eq!(
            app.event_loop.machine().composer().current_sequence_string(),
            "U"
        );
    }

    #[test]
    fn mouse_drag_is_a_swipe() {
        let now = Instant::now();
        let mut app = app(false, now);
        // Ten cells right at 10px per cell is 100px.
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), now);
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 20, 5), now);
        assert_eq!(
            app.event_loop.machine().composer().current_sequence_string(),
            "R"
        );

        // Two cells is below the 60px threshold.
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), now);
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 12, 5), now);
        assert_eq!(
            app.event_loop.machine().composer().current_sequence_string(),
            "R"
        );
    }

    #[test]
    fn quit_key_stops_running() {
        let now = Instant::now();
        let mut app = app(false, now);
        assert!(app.running);
        app.handle_event(&press(KeyCode::Char('q')), now);
        assert!(!app.running);
    }

    #[test]
    fn poll_timeout_is_capped_by_dwell() {
        let now = Instant::now();
        let mut app = app(false, now);
        assert_eq!(app.poll_timeout(now), TICK);

        // Down is not a prefix of any code: 200ms failure dwell.
        app.handle_event(&press(KeyCode::Down), now);
        assert_eq!(app.state(), InteractionState::ShowingFailure);
        assert_eq!(app.poll_timeout(now), TICK);
        assert_eq!(
            app.poll_timeout(now + Duration::from_millis(180)),
            Duration::from_millis(20)
        );
        assert_eq!(
            app.poll_timeout(now + Duration::from_secs(1)),
            Duration::ZERO
        );
    }

    #[test]
    fn status_messages_force_redraw() {
        let now = Instant::now();
        let mut app = app(false, now);
        app.canvas.take_dirty();
        app.set_warning("keys act on press");
        assert_eq!(
            app.status_message,
            Some(("keys act on press".to_string(), StatusLevel::Warning))
        );
        assert!(app.canvas.take_dirty());
    }
}
