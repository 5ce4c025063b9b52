use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

/// Counters describing how a solve spent its budget.
#[serde_as]
#[derive(Clone, Debug, Default, Serialize, JsonSchema)]
pub struct SearchStatistics {
    pub construction_insertions: usize,
    pub improvement_iterations: usize,
    pub moves_applied: usize,
    #[serde_as(as = "DisplayFromStr")]
    pub elapsed: SignedDuration,
}
