//! Sequence composer: accumulates direction symbols and resolves them.
//!
//! A composer owns the in-progress sequence and shares the dictionary. After
//! each append the caller runs [`SequenceComposer::check`]; a match or a
//! failure consumes the sequence, an ambiguous result keeps it so the next
//! symbol extends it.

use std::sync::Arc;

use thiserror::Error;

use crate::dictionary::{Lookup, StratagemDictionary};
use crate::direction::Direction;

/// Errors from composing a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// `Direction::None` was appended. Callers filter it before appending.
    #[error("cannot append {0} to a sequence")]
    InvalidSymbol(Direction),
}

pub struct SequenceComposer {
    dictionary: Arc<StratagemDictionary>,
    sequence: Vec<Direction>,
}

impl SequenceComposer {
    pub fn new(dictionary: Arc<StratagemDictionary>) -> Self {
        Self {
            dictionary,
            sequence: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.sequence.clear();
    }

    /// Append a symbol. Duplicates are allowed; `None` is rejected and the
    /// sequence is left untouched.
    pub fn append(&mut self, direction: Direction) -> Result<(), ComposeError> {
        if direction.is_none() {
            return Err(ComposeError::InvalidSymbol(direction));
        }
        self.sequence.push(direction);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Canonical lookup key, e.g. `"UDL"`.
    pub fn current_sequence_string(&self) -> String {
        self.sequence.iter().filter_map(|d| d.code()).collect()
    }

    /// The sequence as arrow glyphs, for display.
    pub fn display_string(&self) -> String {
        self.sequence.iter().map(|d| d.glyph()).collect()
    }

    /// Classify the current sequence. `Matched` and `Failed` reset the
    /// composer; `Ambiguous` keeps the sequence.
    pub fn check(&mut self) -> Lookup<'_> {
        let outcome = self.dictionary.lookup_class(&self.sequence);
        if !matches!(outcome, Lookup::Ambiguous) {
            self.sequence.clear();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::{Down, Left, Right, Up};

    fn composer() -> SequenceComposer {
        let dict = StratagemDictionary::from_entries([
            ("UD", "Reinforce", "a.svg"),
            ("UDL", "Resupply", "b.svg"),
        ])
        .unwrap();
        SequenceComposer::new(Arc::new(dict))
    }

    #[test]
    fn starts_empty() {
        let c = composer();
        assert!(c.is_empty());
        assert_eq!(c.current_sequence_string(), "");
    }

    #[test]
    fn append_none_is_rejected() {
        let mut c = composer();
        c.append(Up).unwrap();
        assert_eq!(
            c.append(Direction::None),
            Err(ComposeError::InvalidSymbol(Direction::None))
        );
        assert_eq!(c.current_sequence_string(), "U");
    }

    #[test]
    fn ambiguous_keeps_sequence() {
        let mut c = composer();
        c.append(Up).unwrap();
        assert_eq!(c.check(), Lookup::Ambiguous);
        assert_eq!(c.current_sequence_string(), "U");
        assert_eq!(c.display_string(), "\u{2B06}");
    }

    #[test]
    fn ambiguity_beats_exact_match() {
        let mut c = composer();
        c.append(Up).unwrap();
        assert_eq!(c.check(), Lookup::Ambiguous);
        c.append(Down).unwrap();
        assert_eq!(c.check(), Lookup::Ambiguous);
        assert_eq!(c.current_sequence_string(), "UD");
        c.append(Left).unwrap();
        match c.check() {
            Lookup::Matched(entry) => assert_eq!(entry.name(), "Resupply"),
            other => panic!("expected match, got {other:?}"),
        }
        assert!(c.is_empty());
    }

    #[test]
    fn failure_consumes_sequence() {
        let mut c = composer();
        c.append(Right).unwrap();
        assert_eq!(c.check(), Lookup::Failed);
        assert!(c.is_empty());
    }

    #[test]
    fn failure_after_valid_prefix() {
        let mut c = composer();
        c.append(Up).unwrap();
        assert_eq!(c.check(), Lookup::Ambiguous);
        c.append(Up).unwrap();
        assert_eq!(c.check(), Lookup::Failed);
        assert_eq!(c.current_sequence_string(), "");
    }

    #[test]
    fn reset_empties() {
        let mut c = composer();
        c.append(Up).unwrap();
        c.append(Down).unwrap();
        c.reset();
        assert_eq!(c.len(), 0);
    }
}
