use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, instrument};

use crate::solver::{
    budget::BudgetTracker,
    feasibility::FeasibilityModel,
    ls::{operator::LocalSearchMove, relocate::RelocateOperator, swap::SwapOperator},
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    statistics::SearchStatistics,
};

/// A move must buy at least this much distance to be applied; ties and
/// floating-point noise are not improvements.
const IMPROVEMENT_THRESHOLD: f64 = -1e-6;

/// Best-improvement local search over relocate and swap.
///
/// Every iteration enumerates all candidate moves over all route pairs,
/// evaluates them in parallel, and applies the single best strictly
/// improving one. Stops at a local optimum or when the budget runs out,
/// whichever comes first.
#[instrument(skip_all, level = "debug")]
pub fn improve(
    solution: &mut WorkingSolution,
    model: &FeasibilityModel,
    tracker: &mut BudgetTracker,
    statistics: &mut SearchStatistics,
) {
    loop {
        if !tracker.checkpoint() {
            debug!("improvement stopped by the budget");
            return;
        }

        statistics.improvement_iterations += 1;

        let moves = generate_moves(solution);

        let best = moves
            .par_iter()
            .filter_map(|candidate| {
                candidate
                    .evaluate(solution, model)
                    .map(|delta| (delta, candidate))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.rank().cmp(&b.1.rank())));

        match best {
            Some((delta, best_move)) if delta < IMPROVEMENT_THRESHOLD => {
                debug!(
                    operator = best_move.operator_name(),
                    delta, "applying improving move"
                );

                best_move.apply(solution);
                statistics.moves_applied += 1;
            }
            _ => {
                debug!(
                    iterations = statistics.improvement_iterations,
                    "local optimum reached"
                );
                return;
            }
        }
    }
}

fn generate_moves(solution: &WorkingSolution) -> Vec<LocalSearchMove> {
    let num_routes = solution.routes().len();
    let mut moves = Vec::new();

    for r1 in (0..num_routes).map(RouteIdx::new) {
        for r2 in (0..num_routes).map(RouteIdx::new) {
            RelocateOperator::generate_moves(solution, (r1, r2), |op| {
                moves.push(LocalSearchMove::Relocate(op));
            });

            SwapOperator::generate_moves(solution, (r1, r2), |op| {
                moves.push(LocalSearchMove::Swap(op));
            });
        }
    }

    moves
}
