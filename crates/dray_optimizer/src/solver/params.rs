use crate::solver::budget::{SearchBudget, StopSignal};

#[derive(Clone, Debug, Default)]
pub struct SolverParams {
    pub budget: SearchBudget,
    pub stop_signal: Option<StopSignal>,
}
