//! Terminal bell as the audio sink.
//!
//! Success and failure ring the bell; keystrokes stay quiet so a long code
//! is not a wall of beeps.

use std::io::Write;

use stratagem_core::{AudioSink, SoundId};

const BEL: &[u8] = b"\x07";

pub struct Bell<W: Write> {
    out: W,
    enabled: bool,
    rung: usize,
    failed: bool,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self {
            out,
            enabled,
            rung: 0,
            failed: false,
        }
    }

    /// Times the bell has been rung.
    pub fn rung(&self) -> usize {
        self.rung
    }

    fn ring(&mut self) {
        let result = self.out.write_all(BEL).and_then(|()| self.out.flush());
        match result {
            Ok(()) => self.rung += 1,
            // Sound is fire-and-forget; report the first failure only.
            Err(err) if !self.failed => {
                self.failed = true;
                tracing::warn!(%err, "terminal bell unavailable");
            }
            Err(_) => {}
        }
    }
}

impl<W: Write> AudioSink for Bell<W> {
    fn play(&mut self, sound: SoundId) {
        tracing::trace!(?sound, "play");
        if !self.enabled {
            return;
        }
        match sound {
            SoundId::Success | SoundId::Failure => self.ring(),
            SoundId::Keystroke => {}
        }
    }
}
