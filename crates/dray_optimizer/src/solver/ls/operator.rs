use crate::{
    problem::stop::StopIdx,
    solver::{
        feasibility::FeasibilityModel,
        ls::{relocate::RelocateOperator, swap::SwapOperator},
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// A route's would-be stop sequence after a move.
pub struct RouteEdit {
    pub route_id: RouteIdx,
    pub stop_ids: Vec<StopIdx>,
}

pub trait LocalSearchOperator {
    /// The sequences the move would leave behind, one per touched route,
    /// computed against the current solution without mutating it.
    fn edits(&self, solution: &WorkingSolution) -> Vec<RouteEdit>;
}

#[derive(Clone, Debug)]
pub enum LocalSearchMove {
    Relocate(RelocateOperator),
    Swap(SwapOperator),
}

impl LocalSearchMove {
    pub fn operator_name(&self) -> &'static str {
        match self {
            LocalSearchMove::Relocate(_) => "Relocate",
            LocalSearchMove::Swap(_) => "Swap",
        }
    }

    fn edits(&self, solution: &WorkingSolution) -> Vec<RouteEdit> {
        match self {
            LocalSearchMove::Relocate(op) => op.edits(solution),
            LocalSearchMove::Swap(op) => op.edits(solution),
        }
    }

    /// Distance change in meters when every touched route stays feasible,
    /// `None` otherwise. Feasibility goes through the shared model, never a
    /// re-derived check.
    pub fn evaluate(&self, solution: &WorkingSolution, model: &FeasibilityModel) -> Option<f64> {
        let mut delta = 0.0;

        for edit in self.edits(solution) {
            let route = solution.route(edit.route_id);
            let schedule = model.simulate(route.vehicle_id(), &edit.stop_ids)?;

            delta += schedule.distance.value() - route.distance().value();
        }

        Some(delta)
    }

    pub fn apply(&self, solution: &mut WorkingSolution) {
        for edit in self.edits(solution) {
            solution.replace_stops(edit.route_id, edit.stop_ids);
        }
    }

    /// Total order over moves with equal deltas, so a parallel scan always
    /// settles on the same winner.
    pub fn rank(&self) -> (u8, usize, usize, usize, usize) {
        match self {
            LocalSearchMove::Relocate(op) => (
                0,
                op.from_route_id.get(),
                op.to_route_id.get(),
                op.from,
                op.to,
            ),
            LocalSearchMove::Swap(op) => (
                1,
                op.first_route_id.get(),
                op.second_route_id.get(),
                op.first,
                op.second,
            ),
        }
    }
}
