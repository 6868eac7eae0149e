//! Interaction state machine: capture, show match, flash failure.
//!
//! Transitions:
//! - Capturing → Capturing on an ambiguous sequence
//! - Capturing → ShowingMatch on a match (dwell timer scheduled)
//! - Capturing → ShowingFailure on a failure (short dwell timer scheduled)
//! - ShowingMatch / ShowingFailure → Capturing on dwell expiry or on a new press
//!
//! Every reset bumps the epoch. Dwell timers carry the epoch they were
//! scheduled in, so a timer that fires after an early reset no longer matches
//! and is dropped instead of clearing a newer sequence.

use std::sync::Arc;
use std::time::Duration;

use crate::classifier::{self, DEFAULT_MIN_DISTANCE};
use crate::collaborators::{AudioSink, Drawable, Renderer, SoundId, TextStyle};
use crate::composer::SequenceComposer;
use crate::dictionary::{Lookup, StratagemDictionary, StratagemEntry};
use crate::direction::{Direction, Key, Point};
use crate::timer::{DwellKind, DwellTimer, Scheduler, TimerHandle};

/// Normalized input from the front-end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    GestureStart(Point),
    GestureEnd(Point),
    KeyDown(Key),
    KeyUp(Key),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Capturing,
    ShowingMatch,
    ShowingFailure,
}

impl InteractionState {
    pub fn label(self) -> &'static str {
        match self {
            InteractionState::Capturing => "capturing",
            InteractionState::ShowingMatch => "match",
            InteractionState::ShowingFailure => "rejected",
        }
    }
}

/// Whether the event loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Tunables for gesture recognition and dwell times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    /// Shortest swipe, in pixels, that counts as a gesture.
    pub min_swipe_distance: f64,
    /// How long a matched stratagem stays on screen.
    pub match_dwell: Duration,
    /// How long a rejected sequence flashes before it is cleared.
    pub failure_dwell: Duration,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_swipe_distance: DEFAULT_MIN_DISTANCE,
            match_dwell: Duration::from_millis(1600),
            failure_dwell: Duration::from_millis(200),
        }
    }
}

/// Collaborators borrowed for the duration of one event.
pub struct Collaborators<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub audio: &'a mut dyn AudioSink,
    pub scheduler: &'a mut dyn Scheduler,
}

/// Drawables currently on screen.
#[derive(Debug, Default)]
struct Display {
    sequence: Option<Drawable>,
    name: Option<Drawable>,
    icon: Option<Drawable>,
}

pub struct InteractionMachine {
    config: InteractionConfig,
    composer: SequenceComposer,
    state: InteractionState,
    epoch: u64,
    pending: Option<TimerHandle>,
    gesture_origin: Option<Point>,
    display: Display,
    last_match: Option<StratagemEntry>,
}

impl InteractionMachine {
    pub fn new(dictionary: Arc<StratagemDictionary>, config: InteractionConfig) -> Self {
        Self {
            config,
            composer: SequenceComposer::new(dictionary),
            state: InteractionState::Capturing,
            epoch: 0,
            pending: None,
            gesture_origin: None,
            display: Display::default(),
            last_match: None,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Number of resets so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn composer(&self) -> &SequenceComposer {
        &self.composer
    }

    /// Most recent match, kept after its display is cleared.
    pub fn last_match(&self) -> Option<&StratagemEntry> {
        self.last_match.as_ref()
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Handle one input event.
    pub fn handle_input(&mut self, event: InputEvent, io: &mut Collaborators<'_>) -> Flow {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => {
                self.abort(io);
                return Flow::Quit;
            }
            InputEvent::GestureStart(position) => {
                self.on_press(io);
                self.gesture_origin = Some(position);
            }
            InputEvent::GestureEnd(position) => {
                // A release without a recorded press is ignored.
                if let Some(origin) = self.gesture_origin.take() {
                    let direction = classifier::classify_vector(
                        origin,
                        position,
                        self.config.min_swipe_distance,
                    );
                    self.on_direction(direction, io);
                }
            }
            InputEvent::KeyDown(_) => self.on_press(io),
            InputEvent::KeyUp(key) => {
                let direction = classifier::classify_key(key);
                self.on_direction(direction, io);
            }
        }
        Flow::Continue
    }

    /// Handle a fired dwell timer. Timers from an older epoch, or aimed at a
    /// state that is no longer active, are ignored.
    pub fn handle_timer(&mut self, timer: DwellTimer, io: &mut Collaborators<'_>) {
        if timer.epoch != self.epoch {
            tracing::debug!(
                timer_epoch = timer.epoch,
                epoch = self.epoch,
                "dropping stale dwell timer"
            );
            return;
        }
        match (self.state, timer.kind) {
            (InteractionState::ShowingMatch, DwellKind::Match)
            | (InteractionState::ShowingFailure, DwellKind::Failure) => {
                self.pending = None;
                tracing::debug!(from = self.state.label(), "dwell expired");
                self.clear_and_reset(io);
            }
            (state, kind) => {
                tracing::debug!(
                    state = state.label(),
                    ?kind,
                    "dwell timer does not target current state"
                );
            }
        }
    }

    /// A gesture or key press. Ends a match/failure display early.
    fn on_press(&mut self, io: &mut Collaborators<'_>) {
        if self.state == InteractionState::Capturing {
            return;
        }
        if let Some(handle) = self.pending.take() {
            io.scheduler.cancel(handle);
        }
        tracing::debug!(from = self.state.label(), "early reset");
        self.clear_and_reset(io);
    }

    fn on_direction(&mut self, direction: Direction, io: &mut Collaborators<'_>) {
        if self.state != InteractionState::Capturing || direction.is_none() {
            return;
        }
        if let Err(err) = self.composer.append(direction) {
            tracing::error!(%err, "sequence append rejected");
            return;
        }

        let text = self.composer.display_string();
        self.replace_sequence(&text, io);

        let matched = match self.composer.check() {
            Lookup::Matched(entry) => Some(entry.clone()),
            Lookup::Failed => None,
            Lookup::Ambiguous => {
                io.audio.play(SoundId::Keystroke);
                io.renderer.present_frame();
                return;
            }
        };

        match matched {
            Some(entry) => {
                tracing::debug!(code = entry.code(), name = entry.name(), "stratagem matched");
                self.display.name = Some(io.renderer.render_text(entry.name(), TextStyle::Name));
                self.display.icon = Some(io.renderer.render_icon(entry.icon()));
                io.audio.play(SoundId::Success);
                self.schedule(DwellKind::Match, self.config.match_dwell, io);
                self.state = InteractionState::ShowingMatch;
                self.last_match = Some(entry);
            }
            None => {
                tracing::debug!(sequence = %text, "sequence rejected");
                io.audio.play(SoundId::Failure);
                self.schedule(DwellKind::Failure, self.config.failure_dwell, io);
                self.state = InteractionState::ShowingFailure;
            }
        }
        io.renderer.present_frame();
    }

    fn schedule(&mut self, kind: DwellKind, delay: Duration, io: &mut Collaborators<'_>) {
        let timer = DwellTimer {
            kind,
            epoch: self.epoch,
        };
        self.pending = Some(io.scheduler.schedule_once(delay, timer));
    }

    fn replace_sequence(&mut self, text: &str, io: &mut Collaborators<'_>) {
        if let Some(old) = self.display.sequence.take() {
            io.renderer.clear_region(old);
        }
        self.display.sequence = Some(io.renderer.render_text(text, TextStyle::Sequence));
    }

    fn clear_and_reset(&mut self, io: &mut Collaborators<'_>) {
        let Display {
            sequence,
            name,
            icon,
        } = std::mem::take(&mut self.display);
        for drawable in [sequence, name, icon].into_iter().flatten() {
            io.renderer.clear_region(drawable);
        }
        self.composer.reset();
        self.epoch += 1;
        self.state = InteractionState::Capturing;
        io.renderer.present_frame();
    }

    fn abort(&mut self, io: &mut Collaborators<'_>) {
        if let Some(handle) = self.pending.take() {
            io.scheduler.cancel(handle);
        }
        tracing::info!(state = self.state.label(), "interaction aborted");
    }
}
