use tracing::debug;

use crate::{helpers::in_range, timing::Timing};

/// What the typewriter is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Revealing one more segment every typing interval.
    Typing,
    /// Fully typed, waiting until the deadline (milliseconds).
    Pausing { until: u64 },
    /// Removing one segment every typing interval.
    Deleting,
}

impl Phase {
    /// Whether the blinking caret is drawn in this phase.
    pub fn shows_caret(&self) -> bool {
        !matches!(self, Phase::Deleting)
    }
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Nothing changed.
    Idle,
    /// One more segment revealed.
    Typed,
    /// Last segment revealed; holding until `until`.
    Paused { until: u64 },
    /// Pause elapsed; deletion begins on the next interval.
    Resumed,
    /// One segment removed.
    Deleted,
    /// Snippet fully removed and the next one selected.
    Switched { index: usize },
}

impl Step {
    /// Whether the displayed output may differ after this step.
    pub fn changed(&self) -> bool {
        *self != Step::Idle
    }
}

/// Mutable state of one running typewriter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CycleState {
    pub(crate) index: usize,
    pub(crate) cursor: usize,
    pub(crate) phase: Phase,
    pub(crate) last_update: u64,
}

impl Default for CycleState {
    fn default() -> Self {
        Self {
            index: 0,
            cursor: 0,
            phase: Phase::Typing,
            last_update: 0,
        }
    }
}

impl CycleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the active snippet in the deck.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Count of revealed segments of the active snippet.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_deleting(&self) -> bool {
        self.phase == Phase::Deleting
    }

    pub fn pause_deadline(&self) -> Option<u64> {
        match self.phase {
            Phase::Pausing { until } => Some(until),
            _ => None,
        }
    }

    /// Advances the machine to time `now` (milliseconds since the start
    /// of the animation).
    ///
    /// `segments` is the segment count of the active snippet and
    /// `snippets` the deck size. The cursor moves by at most one segment
    /// per call no matter how much time has passed.
    pub fn tick(&mut self, now: u64, segments: usize, snippets: usize, timing: &Timing) -> Step {
        self.cursor = in_range(self.cursor, 0, segments);
        let due = now.saturating_sub(self.last_update) >= timing.typing_interval;
        match self.phase {
            Phase::Pausing { until } => {
                if now < until {
                    return Step::Idle;
                }
                self.phase = Phase::Deleting;
                self.last_update = now;
                debug!(snippet = self.index, now, "pause over, deleting");
                Step::Resumed
            }
            Phase::Typing => {
                if !due {
                    return Step::Idle;
                }
                self.last_update = now;
                if self.cursor < segments {
                    self.cursor += 1;
                }
                if self.cursor < segments {
                    return Step::Typed;
                }
                let until = now.saturating_add(timing.pause_duration);
                self.phase = Phase::Pausing { until };
                debug!(snippet = self.index, now, until, "snippet typed, pausing");
                Step::Paused { until }
            }
            Phase::Deleting => {
                if !due {
                    return Step::Idle;
                }
                self.last_update = now;
                self.cursor = self.cursor.saturating_sub(1);
                if self.cursor > 0 {
                    return Step::Deleted;
                }
                self.index = (self.index + 1) % snippets.max(1);
                self.phase = Phase::Typing;
                debug!(snippet = self.index, now, "switched snippet");
                Step::Switched { index: self.index }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(state: &mut CycleState, from: u64, to: u64, segments: usize, snippets: usize) -> Vec<Step> {
        let timing = Timing::default();
        let mut steps = Vec::new();
        let mut now = from;
        while now <= to {
            let step = state.tick(now, segments, snippets, &timing);
            if step.changed() {
                steps.push(step);
            }
            now += 100;
        }
        steps
    }

    #[test]
    fn initial_state() {
        let s = CycleState::new();
        assert_eq!(s.index(), 0);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.phase(), Phase::Typing);
        assert_eq!(s.pause_deadline(), None);
    }

    #[test]
    fn worked_example_two_snippets_three_segments() {
        let timing = Timing::default();
        let mut s = CycleState::new();

        assert_eq!(s.tick(0, 3, 2, &timing), Step::Idle);
        assert_eq!(s.tick(100, 3, 2, &timing), Step::Typed);
        assert_eq!(s.tick(200, 3, 2, &timing), Step::Typed);
        assert_eq!(s.tick(300, 3, 2, &timing), Step::Paused { until: 2300 });
        assert_eq!(s.cursor(), 3);
        assert_eq!(s.pause_deadline(), Some(2300));

        assert_eq!(s.tick(2299, 3, 2, &timing), Step::Idle);
        assert_eq!(s.tick(2300, 3, 2, &timing), Step::Resumed);
        assert!(s.is_deleting());
        assert_eq!(s.pause_deadline(), None);

        assert_eq!(s.tick(2400, 3, 2, &timing), Step::Deleted);
        assert_eq!(s.tick(2500, 3, 2, &timing), Step::Deleted);
        assert_eq!(s.tick(2600, 3, 2, &timing), Step::Switched { index: 1 });
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.index(), 1);
        assert_eq!(s.phase(), Phase::Typing);
    }

    #[test]
    fn no_catch_up_after_long_gap() {
        let timing = Timing::default();
        let mut s = CycleState::new();
        assert_eq!(s.tick(10_000, 5, 1, &timing), Step::Typed);
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.tick(10_050, 5, 1, &timing), Step::Idle);
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn cursor_stays_in_bounds_and_is_monotone_per_phase() {
        let timing = Timing {
            typing_interval: 16,
            pause_duration: 40,
        };
        let mut s = CycleState::new();
        let mut prev = s.clone();
        for frame in 0..2000u64 {
            let segments = if s.index() % 2 == 0 { 4 } else { 7 };
            s.tick(frame * 7, segments, 3, &timing);
            assert!(s.cursor() <= segments);
            assert!(!(s.is_deleting() && s.pause_deadline().is_some()));
            if prev.phase() == Phase::Typing && s.phase() == Phase::Typing && prev.index() == s.index() {
                assert!(s.cursor() >= prev.cursor());
            }
            if prev.is_deleting() && s.is_deleting() {
                assert!(s.cursor() <= prev.cursor());
            }
            prev = s.clone();
        }
    }

    #[test]
    fn full_cycle_advances_index_modulo() {
        let mut s = CycleState::new();
        let steps = run(&mut s, 0, 2600, 3, 2);
        assert_eq!(steps.last(), Some(&Step::Switched { index: 1 }));

        let steps = run(&mut s, 2700, 5200, 3, 2);
        assert_eq!(steps.last(), Some(&Step::Switched { index: 0 }));
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn single_snippet_deck_restarts_itself() {
        let mut s = CycleState::new();
        let steps = run(&mut s, 0, 2600, 3, 1);
        assert_eq!(steps.last(), Some(&Step::Switched { index: 0 }));
    }

    #[test]
    fn cursor_clamped_when_snippet_shrinks() {
        let timing = Timing::default();
        let mut s = CycleState {
            index: 0,
            cursor: 9,
            phase: Phase::Deleting,
            last_update: 0,
        };
        assert_eq!(s.tick(100, 2, 2, &timing), Step::Deleted);
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn caret_visibility_by_phase() {
        assert!(Phase::Typing.shows_caret());
        assert!(Phase::Pausing { until: 5 }.shows_caret());
        assert!(!Phase::Deleting.shows_caret());
    }
}
