//! Progress reporting and cooperative cancellation
//!
//! Long-running operations accept a [`FilterHooks`] bundle. Progress is a
//! fraction in `[0, 1]`; reports are serialised so a sink never sees two
//! calls at once and never sees the value go backwards. Cancellation is a
//! flag polled before each tile.

use crate::{FilterError, FilterResult};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Receiver of progress fractions.
pub trait ProgressSink: Sync {
    /// Called with the completed fraction of the whole operation.
    fn report(&self, fraction: f64);
}

impl<F> ProgressSink for F
where
    F: Fn(f64) + Sync,
{
    fn report(&self, fraction: f64) {
        self(fraction)
    }
}

/// Optional progress sink and cancellation flag for one operation.
#[derive(Clone, Copy, Default)]
pub struct FilterHooks<'a> {
    /// Receives progress fractions
    pub progress: Option<&'a dyn ProgressSink>,
    /// Polled before each tile; raising it aborts the operation
    pub cancel: Option<&'a AtomicBool>,
}

impl std::fmt::Debug for FilterHooks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterHooks")
            .field("progress", &self.progress.is_some())
            .field("cancel", &self.cancel)
            .finish()
    }
}

impl<'a> FilterHooks<'a> {
    /// No progress, no cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a progress sink.
    pub fn with_progress(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Attach a cancellation flag.
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// `Err(Cancelled)` once the flag is raised.
    pub(crate) fn check_cancelled(&self) -> FilterResult<()> {
        match self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(FilterError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Maps completed units of one stage onto a sub-range of the overall
/// progress and forwards them to the sink.
pub(crate) struct ProgressReporter<'a> {
    sink: Option<&'a dyn ProgressSink>,
    start: f64,
    end: f64,
    total: u64,
    /// Units completed so far and the last fraction reported
    state: Mutex<(u64, f64)>,
}

impl<'a> ProgressReporter<'a> {
    /// Reporter for `total` units covering `[start, end]`, clamped to
    /// `[0, 1]`.
    pub(crate) fn new(hooks: &FilterHooks<'a>, start: f64, end: f64, total: u64) -> Self {
        let start = start.clamp(0.0, 1.0);
        Self {
            sink: hooks.progress,
            start,
            end: end.clamp(start, 1.0),
            total: total.max(1),
            state: Mutex::new((0, start)),
        }
    }

    fn fraction(&self, done: u64) -> f64 {
        if done >= self.total {
            self.end
        } else {
            self.start + (self.end - self.start) * (done as f64 / self.total as f64)
        }
    }

    /// Record `units` more completed units.
    pub(crate) fn advance(&self, units: u64) {
        let Some(sink) = self.sink else {
            return;
        };
        // A poisoned lock only means another reporter panicked mid-report.
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.0 = (state.0 + units).min(self.total);
        let fraction = self.fraction(state.0);
        if fraction > state.1 {
            state.1 = fraction;
            sink.report(fraction);
        }
    }

    /// Report the end of the sub-range regardless of units seen.
    pub(crate) fn finish(&self) {
        let Some(sink) = self.sink else {
            return;
        };
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.0 = self.total;
        if self.end > state.1 {
            state.1 = self.end;
            sink.report(self.end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_maps_into_sub_range() {
        let seen = Mutex::new(Vec::new());
        let sink = |f: f64| seen.lock().unwrap().push(f);
        let hooks = FilterHooks::new().with_progress(&sink);
        let reporter = ProgressReporter::new(&hooks, 0.5, 0.75, 4);
        reporter.advance(1);
        reporter.advance(2);
        reporter.advance(5);
        reporter.finish();
        assert_eq!(*seen.lock().unwrap(), vec![0.5625, 0.6875, 0.75]);
    }

    #[test]
    fn test_reporter_without_sink_is_silent() {
        let hooks = FilterHooks::new();
        let reporter = ProgressReporter::new(&hooks, 0.0, 1.0, 0);
        reporter.advance(3);
        reporter.finish();
    }

    #[test]
    fn test_cancel_flag() {
        let flag = AtomicBool::new(false);
        let hooks = FilterHooks::new().with_cancel(&flag);
        assert!(hooks.check_cancelled().is_ok());
        flag.store(true, Ordering::Relaxed);
        assert!(matches!(hooks.check_cancelled(), Err(FilterError::Cancelled)));
        assert!(FilterHooks::new().check_cancelled().is_ok());
    }
}
