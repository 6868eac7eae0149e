//! Stratagem Core: gesture classification and code matching.
//!
//! This crate contains everything with real logic in the trainer:
//! - Direction symbols and the swipe/key classifier
//! - The immutable stratagem dictionary and its prefix lookup
//! - The sequence composer (append, check, reset)
//! - The interaction state machine with epoch-tagged dwell timers
//! - A single-threaded event loop and logical timer queue
//! - TOML configuration
//!
//! Drawing and sound are reached through the [`Renderer`] and [`AudioSink`]
//! traits; the crate never touches a terminal or a window.

pub mod classifier;
pub mod collaborators;
pub mod composer;
pub mod config;
pub mod dictionary;
pub mod direction;
pub mod event_loop;
pub mod machine;
pub mod timer;

pub use classifier::{classify_key, classify_vector, DEFAULT_MIN_DISTANCE};
pub use collaborators::{AudioSink, Drawable, Renderer, Silent, SoundId, TextStyle};
pub use composer::{ComposeError, SequenceComposer};
pub use config::{AppConfig, ConfigError};
pub use dictionary::{DictionaryLoadError, Lookup, StratagemDictionary, StratagemEntry};
pub use direction::{code_to_glyphs, Direction, Key, Point};
pub use event_loop::{Event, EventLoop};
pub use machine::{
    Collaborators, Flow, InputEvent, InteractionConfig, InteractionMachine, InteractionState,
};
pub use timer::{DwellKind, DwellTimer, Scheduler, TimerHandle, TimerQueue};
