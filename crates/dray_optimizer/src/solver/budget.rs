use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use jiff::{SignedDuration, Timestamp};

/// How much search effort a request is allowed to spend.
///
/// An iteration budget makes a run reproducible: the same problem with the
/// same budget walks through the same checkpoints regardless of machine load.
#[derive(Clone, Debug)]
pub enum SearchBudget {
    Duration(SignedDuration),
    Iterations(usize),
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget::Duration(SignedDuration::from_secs(5))
    }
}

/// Cooperative cancellation flag shared between the caller and a running
/// search. Tripping it stops the search at the next checkpoint.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> StopSignal {
        StopSignal::default()
    }

    pub fn trip(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_tripped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct BudgetTracker {
    started: Timestamp,
    budget: SearchBudget,
    ticks: usize,
    stop_signal: Option<StopSignal>,
}

impl BudgetTracker {
    pub fn new(budget: SearchBudget, stop_signal: Option<StopSignal>) -> Self {
        BudgetTracker {
            started: Timestamp::now(),
            budget,
            ticks: 0,
            stop_signal,
        }
    }

    /// Consumes one tick of the budget. Returns false once the budget is
    /// exhausted or the stop signal was tripped. Search loops call this
    /// between construction steps and between improvement iterations, and
    /// never abandon work mid-step.
    pub fn checkpoint(&mut self) -> bool {
        if let Some(signal) = &self.stop_signal
            && signal.is_tripped()
        {
            return false;
        }

        self.ticks += 1;

        match self.budget {
            SearchBudget::Iterations(max_ticks) => self.ticks <= max_ticks,
            SearchBudget::Duration(max_duration) => {
                Timestamp::now().duration_since(self.started) <= max_duration
            }
        }
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn elapsed(&self) -> SignedDuration {
        Timestamp::now().duration_since(self.started)
    }
}
