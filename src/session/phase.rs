//! Phases and patterns for timed guided sessions.

/// One named, timed segment of a session cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub label: &'static str,
    pub seconds: u32,
    /// Instruction shown while the phase runs.
    pub instruction: &'static str,
}

impl Phase {
    pub const fn new(label: &'static str, seconds: u32, instruction: &'static str) -> Self {
        Self {
            label,
            seconds,
            instruction,
        }
    }
}

/// A fixed cyclic phase sequence with a bounded cycle count.
///
/// `trailing_rest` phases are omitted on the final cycle, so a pattern
/// ending in a rest segment completes on its last active phase instead of
/// idling through one more rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPattern {
    pub name: &'static str,
    pub phases: Vec<Phase>,
    pub total_cycles: u32,
    /// Number of trailing phases skipped on the final cycle.
    pub trailing_rest: usize,
}

impl SessionPattern {
    /// The 4-7-8 breathing pattern: inhale 4s, hold 7s, exhale 8s, rest 4s,
    /// three cycles, no rest after the final exhale.
    pub fn four_seven_eight() -> Self {
        Self {
            name: "4-7-8 Breathing",
            phases: vec![
                Phase::new("inhale", 4, "Breathe in slowly"),
                Phase::new("hold", 7, "Hold your breath"),
                Phase::new("exhale", 8, "Breathe out slowly"),
                Phase::new("rest", 4, "Rest"),
            ],
            total_cycles: 3,
            trailing_rest: 1,
        }
    }

    /// Number of phases that run during the final cycle.
    pub fn final_cycle_len(&self) -> usize {
        self.phases.len().saturating_sub(self.trailing_rest).max(1)
    }

    /// Total ticks from start to completion.
    pub fn total_seconds(&self) -> u32 {
        let full_cycle: u32 = self.phases.iter().map(|p| p.seconds).sum();
        let final_cycle: u32 = self.phases[..self.final_cycle_len()]
            .iter()
            .map(|p| p.seconds)
            .sum();
        full_cycle * (self.total_cycles.saturating_sub(1)) + final_cycle
    }
}
