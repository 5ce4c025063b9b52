use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    problem::routing_problem::RoutingProblem,
    solver::{
        budget::BudgetTracker, construction, feasibility::FeasibilityModel, ls::local_search,
        solution::working_solution::WorkingSolution, statistics::SearchStatistics,
    },
};

/// The budget or stop signal expired while stops were still awaiting
/// construction. Not a request failure: the engine answers it by running
/// the greedy fallback.
#[derive(Debug, Error)]
#[error("search budget exhausted before a complete solution was constructed")]
pub struct SearchIncomplete;

/// A search procedure the engine can drive. Implementations own the whole
/// attempt between the analytic feasibility precheck and result assembly,
/// so a constraint solver or a metaheuristic can stand in for the shipped
/// local search without touching either side.
pub trait SearchStrategy {
    fn attempt(
        &self,
        problem: &Arc<RoutingProblem>,
        tracker: &mut BudgetTracker,
        statistics: &mut SearchStatistics,
    ) -> Result<WorkingSolution, SearchIncomplete>;
}

/// Cheapest-insertion construction followed by best-improvement local
/// search, both metered by the shared budget tracker.
pub struct LocalSearchStrategy;

impl SearchStrategy for LocalSearchStrategy {
    #[instrument(skip_all, level = "debug")]
    fn attempt(
        &self,
        problem: &Arc<RoutingProblem>,
        tracker: &mut BudgetTracker,
        statistics: &mut SearchStatistics,
    ) -> Result<WorkingSolution, SearchIncomplete> {
        let mut solution = WorkingSolution::new(Arc::clone(problem));
        let model = FeasibilityModel::new(problem.as_ref());

        if !construction::construct(&mut solution, &model, tracker, statistics) {
            return Err(SearchIncomplete);
        }

        debug!(
            distance = solution.total_distance().value(),
            "construction complete, improving"
        );

        local_search::improve(&mut solution, &model, tracker, statistics);

        Ok(solution)
    }
}
