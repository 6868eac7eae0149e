//! Single-threaded event loop.
//!
//! Input and fired timers share one FIFO queue. [`EventLoop::pump`] moves
//! expired timers to the back of the queue, then dispatches everything queued
//! in order. Nothing blocks: the front-end decides how long to wait between
//! pumps, typically until [`EventLoop::next_deadline`] or the next input.

use std::collections::VecDeque;
use std::time::Instant;

use crate::collaborators::{AudioSink, Renderer};
use crate::machine::{Collaborators, Flow, InputEvent, InteractionMachine};
use crate::timer::{DwellTimer, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Input(InputEvent),
    Timer(DwellTimer),
}

pub struct EventLoop {
    machine: InteractionMachine,
    timers: TimerQueue,
    queue: VecDeque<Event>,
}

impl EventLoop {
    pub fn new(machine: InteractionMachine, now: Instant) -> Self {
        Self {
            machine,
            timers: TimerQueue::new(now),
            queue: VecDeque::new(),
        }
    }

    /// Queue an input event for the next pump.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(Event::Input(event));
    }

    /// Enqueue expired timers, then dispatch the whole queue.
    ///
    /// Returns `Flow::Quit` as soon as an event asks to quit; anything still
    /// queued behind it is discarded.
    pub fn pump(
        &mut self,
        now: Instant,
        renderer: &mut dyn Renderer,
        audio: &mut dyn AudioSink,
    ) -> Flow {
        for (_, timer) in self.timers.expire(now) {
            self.queue.push_back(Event::Timer(timer));
        }

        while let Some(event) = self.queue.pop_front() {
            let mut io = Collaborators {
                renderer: &mut *renderer,
                audio: &mut *audio,
                scheduler: &mut self.timers,
            };
            let flow = match event {
                Event::Input(input) => self.machine.handle_input(input, &mut io),
                Event::Timer(timer) => {
                    self.machine.handle_timer(timer, &mut io);
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                self.queue.clear();
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn machine(&self) -> &InteractionMachine {
        &self.machine
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}
