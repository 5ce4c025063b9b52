use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    error::OptimizeError,
    plan::{RoutePlan, SolverMode},
    problem::routing_problem::RoutingProblem,
    solver::{
        baseline::baseline_distance,
        budget::BudgetTracker,
        fallback::greedy_fallback,
        params::SolverParams,
        search::{LocalSearchStrategy, SearchStrategy},
        statistics::SearchStatistics,
    },
};

/// One optimization request, end to end: analytic feasibility precheck,
/// baseline reference, search attempt, fallback when the search cannot
/// finish, result assembly.
///
/// An `Optimizer` owns no cross-request state; construct one per request.
pub struct Optimizer {
    params: SolverParams,
    strategy: Box<dyn SearchStrategy + Send + Sync>,
}

impl Optimizer {
    pub fn new(params: SolverParams) -> Self {
        Optimizer::with_strategy(params, Box::new(LocalSearchStrategy))
    }

    pub fn with_strategy(
        params: SolverParams,
        strategy: Box<dyn SearchStrategy + Send + Sync>,
    ) -> Self {
        Optimizer { params, strategy }
    }

    #[instrument(skip_all, level = "debug")]
    pub fn solve(&self, problem: &Arc<RoutingProblem>) -> Result<RoutePlan, OptimizeError> {
        precheck(problem)?;

        let baseline = baseline_distance(problem);
        debug!(baseline_meters = baseline.value(), "baseline computed");

        let mut statistics = SearchStatistics::default();
        let mut tracker = BudgetTracker::new(
            self.params.budget.clone(),
            self.params.stop_signal.clone(),
        );

        let (solution, mode, note) =
            match self.strategy.attempt(problem, &mut tracker, &mut statistics) {
                Ok(solution) => (solution, SolverMode::Search, None),
                Err(incomplete) => {
                    info!(%incomplete, "falling back to greedy routing");

                    let solution = greedy_fallback(problem);
                    let note =
                        "search budget exhausted; routes come from the greedy fallback".to_owned();

                    (solution, SolverMode::Fallback, Some(note))
                }
            };

        statistics.elapsed = tracker.elapsed();

        debug!(
            ?mode,
            distance = solution.total_distance().value(),
            unassigned = solution.num_unassigned(),
            "solve finished"
        );

        Ok(RoutePlan::assemble(
            problem, &solution, baseline, mode, note, statistics,
        ))
    }
}

/// Proves infeasibility analytically before any search effort is spent:
/// a stop set no assignment can serve fails fast with the shortfall.
fn precheck(problem: &RoutingProblem) -> Result<(), OptimizeError> {
    if problem.num_stops() == 0 {
        return Ok(());
    }

    let fleet = problem.fleet();
    let demand = problem.total_demand();

    if fleet.is_empty() {
        return Err(OptimizeError::Infeasible {
            demand,
            capacity: 0.0,
            shortfall: demand,
        });
    }

    let capacity = fleet.total_capacity();
    if demand > capacity {
        return Err(OptimizeError::Infeasible {
            demand,
            capacity,
            shortfall: demand - capacity,
        });
    }

    // A single oversized stop is just as hopeless as an oversized total.
    let max_stop_demand = problem.max_stop_demand();
    let max_capacity = fleet.max_capacity();
    if max_stop_demand > max_capacity {
        return Err(OptimizeError::Infeasible {
            demand: max_stop_demand,
            capacity: max_capacity,
            shortfall: max_stop_demand - max_capacity,
        });
    }

    Ok(())
}
