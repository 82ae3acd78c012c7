use super::link::LinkResult;

/// Result of checking a single target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Number of links the checker reported
    pub total: usize,
    /// Number of dead links among them
    pub dead: usize,
    /// `true` if there were dead links or the checker failed
    pub failed: bool,
}

impl RunOutcome {
    /// Summarize the results of a successful checker invocation.
    ///
    /// Only dead links fail a run; ignored links and links the checker could
    /// not evaluate do not.
    #[must_use]
    pub fn from_results(results: &[LinkResult]) -> Self {
        let dead = results.iter().filter(|r| r.is_dead()).count();
        Self {
            total: results.len(),
            dead,
            failed: dead > 0,
        }
    }

    /// Outcome of a run that did not produce any results
    #[must_use]
    pub const fn failure() -> Self {
        Self {
            total: 0,
            dead: 0,
            failed: true,
        }
    }
}

/// Aggregate of all runs of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchResult {
    /// Number of runs recorded so far
    pub runs: usize,
    /// Number of failed runs
    pub failures: usize,
}

impl BatchResult {
    /// Start an empty batch
    #[must_use]
    pub const fn new() -> Self {
        Self {
            runs: 0,
            failures: 0,
        }
    }

    /// Record the outcome of one run
    pub fn record(&mut self, outcome: &RunOutcome) {
        self.runs += 1;
        if outcome.failed {
            self.failures += 1;
        }
    }

    /// `true` iff no recorded run failed
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.failures == 0
    }
}

impl Default for BatchResult {
    fn default() -> Self {
        Self::new()
    }
}
