use crate::solver::{
    ls::operator::{LocalSearchOperator, RouteEdit},
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

/// **Swap**
///
/// Exchanges the stop at position `first` in `first_route_id` with the stop
/// at position `second` in `second_route_id`. Always between two distinct
/// routes; within one route a relocate covers the same ground.
///
/// ```text
/// BEFORE:
///    R1: ... (A) -> [first] -> (B) ...
///    R2: ... (X) -> [second] -> (Y) ...
///
/// AFTER:
///    R1: ... (A) -> [second] -> (B) ...
///    R2: ... (X) -> [first] -> (Y) ...
/// ```
#[derive(Clone, Debug)]
pub struct SwapOperator {
    pub first_route_id: RouteIdx,
    pub second_route_id: RouteIdx,
    pub first: usize,
    pub second: usize,
}

impl SwapOperator {
    /// Only the `r1 > r2` half of the pair grid generates swaps; the other
    /// half would produce the mirror image of every move.
    pub fn generate_moves(
        solution: &WorkingSolution,
        (r1, r2): (RouteIdx, RouteIdx),
        mut consumer: impl FnMut(SwapOperator),
    ) {
        if r1 <= r2 {
            return;
        }

        let first_len = solution.route(r1).len();
        let second_len = solution.route(r2).len();

        for first in 0..first_len {
            for second in 0..second_len {
                consumer(SwapOperator {
                    first_route_id: r1,
                    second_route_id: r2,
                    first,
                    second,
                });
            }
        }
    }
}

impl LocalSearchOperator for SwapOperator {
    fn edits(&self, solution: &WorkingSolution) -> Vec<RouteEdit> {
        let mut first_ids = solution.route(self.first_route_id).stop_ids().to_vec();
        let mut second_ids = solution.route(self.second_route_id).stop_ids().to_vec();

        std::mem::swap(
            &mut first_ids[self.first],
            &mut second_ids[self.second],
        );

        vec![
            RouteEdit {
                route_id: self.first_route_id,
                stop_ids: first_ids,
            },
            RouteEdit {
                route_id: self.second_route_id,
                stop_ids: second_ids,
            },
        ]
    }
}
