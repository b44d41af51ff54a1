//! Timed phase engine — a bounded cyclic countdown for guided sessions.
//!
//! The engine is pure state: it never reads the clock. Each `tick()` call
//! advances logical time by exactly one second, so a caller that falls
//! behind real time catches up by calling `tick()` once per missed second.

use serde::Serialize;

use crate::session::phase::{Phase, SessionPattern};

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// The engine is not running; the tick was a no-op.
    Idle,
    /// One second elapsed inside the current phase.
    Counting { seconds_remaining: u32 },
    /// The countdown moved into a new phase.
    PhaseStarted { phase_index: usize, cycle: u32 },
    /// The session finished. Emitted exactly once per `start()`.
    Completed,
}

/// Host-facing view of the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    pub running: bool,
    pub phase_index: usize,
    pub seconds_remaining: u32,
    pub cycles_completed: u32,
}

/// Finite state machine driving one guided session.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    pattern: SessionPattern,
    running: bool,
    phase_index: usize,
    seconds_remaining: u32,
    cycles_completed: u32,
}

impl SessionEngine {
    /// Patterns are expected to have at least one phase; an empty pattern
    /// never starts.
    pub fn new(pattern: SessionPattern) -> Self {
        Self {
            pattern,
            running: false,
            phase_index: 0,
            seconds_remaining: 0,
            cycles_completed: 0,
        }
    }

    pub fn pattern(&self) -> &SessionPattern {
        &self.pattern
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> &Phase {
        &self.pattern.phases[self.phase_index]
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            running: self.running,
            phase_index: self.phase_index,
            seconds_remaining: self.seconds_remaining,
            cycles_completed: self.cycles_completed,
        }
    }

    /// Begin (or restart) the session at the first phase of cycle 0.
    pub fn start(&mut self) {
        if self.pattern.phases.is_empty() {
            return;
        }
        self.running = true;
        self.phase_index = 0;
        self.seconds_remaining = self.pattern.phases[0].seconds;
        self.cycles_completed = 0;
    }

    /// Abandon the session without signaling completion.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance logical time by one second.
    ///
    /// The caller is responsible for scheduling this at 1 Hz; the engine
    /// never skips a phase regardless of how irregularly it is called.
    pub fn tick(&mut self) -> TickEvent {
        if !self.running {
            return TickEvent::Idle;
        }

        if self.seconds_remaining > 1 {
            self.seconds_remaining -= 1;
            return TickEvent::Counting {
                seconds_remaining: self.seconds_remaining,
            };
        }

        // Current phase just spent its final second.
        self.advance_phase()
    }

    fn advance_phase(&mut self) -> TickEvent {
        let next_index = self.phase_index + 1;
        let on_final_cycle = self.cycles_completed + 1 == self.pattern.total_cycles;

        if on_final_cycle && next_index >= self.pattern.final_cycle_len() {
            // `running` drops here and `tick` no-ops until the next
            // `start()`, so completion cannot fire twice per session.
            self.running = false;
            self.seconds_remaining = 0;
            return TickEvent::Completed;
        }

        if next_index >= self.pattern.phases.len() {
            self.cycles_completed += 1;
            self.phase_index = 0;
        } else {
            self.phase_index = next_index;
        }
        self.seconds_remaining = self.pattern.phases[self.phase_index].seconds;

        TickEvent::PhaseStarted {
            phase_index: self.phase_index,
            cycle: self.cycles_completed,
        }
    }
}
