use jiff::SignedDuration;

/// The planning day. Windows and vehicle availability default to it.
pub const PLANNING_HORIZON: SignedDuration = SignedDuration::from_hours(24);

/// A service window expressed as offsets from the shared day start.
/// Arriving before `start` means waiting until it opens; arriving after
/// `end` is infeasible. Callers guarantee `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start: SignedDuration,
    end: SignedDuration,
}

impl TimeWindow {
    pub const fn new(start: SignedDuration, end: SignedDuration) -> Self {
        TimeWindow { start, end }
    }

    pub fn full_horizon() -> Self {
        TimeWindow {
            start: SignedDuration::ZERO,
            end: PLANNING_HORIZON,
        }
    }

    pub fn start(&self) -> SignedDuration {
        self.start
    }

    pub fn end(&self) -> SignedDuration {
        self.end
    }

    /// An arrival is admissible as long as it does not overshoot the end
    /// of the window; early arrivals wait.
    pub fn admits(&self, arrival: SignedDuration) -> bool {
        arrival <= self.end
    }

    /// When service can begin for the given arrival: immediately, or once
    /// the window opens.
    pub fn service_start(&self, arrival: SignedDuration) -> SignedDuration {
        arrival.max(self.start)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::full_horizon()
    }
}
