use crate::solver::{
    ls::operator::{LocalSearchOperator, RouteEdit},
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

/// **Relocate**
///
/// Moves the stop at position `from` in `from_route_id` to position `to` in
/// `to_route_id`. The routes may be the same; moving into an empty route is
/// how the search shifts work onto an idle vehicle.
///
/// ```text
/// BEFORE:
///    R1: ... (A) -> [from] -> (B) ...
///    R2: ... (X) -> (Y) ...
///
/// AFTER:
///    R1: ... (A) -> (B) ...
///    R2: ... (X) -> [from] -> (Y) ...
/// ```
#[derive(Clone, Debug)]
pub struct RelocateOperator {
    pub from_route_id: RouteIdx,
    pub to_route_id: RouteIdx,
    pub from: usize,

    /// Position in the target sequence. Within a single route this indexes
    /// the sequence after the stop was taken out.
    pub to: usize,
}

impl RelocateOperator {
    pub fn generate_moves(
        solution: &WorkingSolution,
        (from_route_id, to_route_id): (RouteIdx, RouteIdx),
        mut consumer: impl FnMut(RelocateOperator),
    ) {
        let source_len = solution.route(from_route_id).len();

        if from_route_id == to_route_id {
            for from in 0..source_len {
                for to in 0..source_len {
                    if to == from {
                        continue;
                    }

                    consumer(RelocateOperator {
                        from_route_id,
                        to_route_id,
                        from,
                        to,
                    });
                }
            }
        } else {
            let target_len = solution.route(to_route_id).len();

            for from in 0..source_len {
                for to in 0..=target_len {
                    consumer(RelocateOperator {
                        from_route_id,
                        to_route_id,
                        from,
                        to,
                    });
                }
            }
        }
    }
}

impl LocalSearchOperator for RelocateOperator {
    fn edits(&self, solution: &WorkingSolution) -> Vec<RouteEdit> {
        let mut from_ids = solution.route(self.from_route_id).stop_ids().to_vec();
        let stop_id = from_ids.remove(self.from);

        if self.from_route_id == self.to_route_id {
            from_ids.insert(self.to, stop_id);

            vec![RouteEdit {
                route_id: self.from_route_id,
                stop_ids: from_ids,
            }]
        } else {
            let mut to_ids = solution.route(self.to_route_id).stop_ids().to_vec();
            to_ids.insert(self.to, stop_id);

            vec![
                RouteEdit {
                    route_id: self.from_route_id,
                    stop_ids: from_ids,
                },
                RouteEdit {
                    route_id: self.to_route_id,
                    stop_ids: to_ids,
                },
            ]
        }
    }
}
