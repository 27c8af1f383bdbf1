use std::{
    fmt,
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::ClosestMatch;

/// Receives notifications around alignments, template loads and searches.
///
/// Every method defaults to a no-op so implementations only override what they need.
pub trait AlignmentObserver: Send + Sync {
    fn on_alignment_start(&self) {}
    fn on_alignment_end(&self, _cost: f32) {}
    fn on_load_start(&self) {}
    fn on_load_end(&self) {}
    fn on_search_start(&self) {}
    fn on_search_end(&self, _result: &ClosestMatch) {}
}

/// Observer that ignores every notification.
pub struct NoopObserver;
impl AlignmentObserver for NoopObserver {}

#[derive(Default)]
struct Stopwatch {
    started_at: Option<Instant>,
    elapsed: Duration,
    calls: usize,
}
impl Stopwatch {
    fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }
    fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.elapsed += started_at.elapsed();
            self.calls += 1;
        }
    }
}

#[derive(Default)]
struct TimerState {
    matching: Stopwatch,
    loading: Stopwatch,
    total: Stopwatch,
}

/// Accumulates wall time and call counts for alignments, template loads and searches.
pub struct MatchTimer {
    state: Mutex<TimerState>,
}
impl MatchTimer {
    pub fn new() -> Self {
        MatchTimer {
            state: Mutex::new(TimerState::default()),
        }
    }
    pub fn summary(&self) -> TimingSummary {
        self.with_state(|state| TimingSummary {
            matching_time: state.matching.elapsed,
            matching_calls: state.matching.calls,
            loading_time: state.loading.elapsed,
            loading_calls: state.loading.calls,
            total_time: state.total.elapsed,
            searches: state.total.calls,
        })
    }
    pub fn reset(&self) {
        self.with_state(|state| *state = TimerState::default());
    }
    fn with_state<R>(&self, f: impl FnOnce(&mut TimerState) -> R) -> R {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut state)
    }
}
impl Default for MatchTimer {
    fn default() -> Self {
        Self::new()
    }
}
impl AlignmentObserver for MatchTimer {
    fn on_alignment_start(&self) {
        self.with_state(|state| state.matching.start());
    }
    fn on_alignment_end(&self, _cost: f32) {
        self.with_state(|state| state.matching.stop());
    }
    fn on_load_start(&self) {
        self.with_state(|state| state.loading.start());
    }
    fn on_load_end(&self) {
        self.with_state(|state| state.loading.stop());
    }
    fn on_search_start(&self) {
        self.with_state(|state| state.total.start());
    }
    fn on_search_end(&self, _result: &ClosestMatch) {
        self.with_state(|state| state.total.stop());
    }
}

/// Snapshot of the times collected by a [`MatchTimer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSummary {
    pub matching_time: Duration,
    pub matching_calls: usize,
    pub loading_time: Duration,
    pub loading_calls: usize,
    pub total_time: Duration,
    pub searches: usize,
}
impl TimingSummary {
    /// Mean time spent per alignment, zero when nothing was aligned.
    pub fn average_matching_time(&self) -> Duration {
        if self.matching_calls == 0 {
            Duration::ZERO
        } else {
            self.matching_time / self.matching_calls as u32
        }
    }
}
impl fmt::Display for TimingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Matching: {:.3}s ({} calls, {:.3}ms avg)",
            self.matching_time.as_secs_f64(),
            self.matching_calls,
            self.average_matching_time().as_secs_f64() * 1000.
        )?;
        writeln!(
            f,
            "Loading: {:.3}s ({} calls)",
            self.loading_time.as_secs_f64(),
            self.loading_calls
        )?;
        write!(
            f,
            "Total: {:.3}s ({} searches)",
            self.total_time.as_secs_f64(),
            self.searches
        )
    }
}
