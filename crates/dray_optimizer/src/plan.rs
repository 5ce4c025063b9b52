use dray_matrix::Meters;
use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    problem::routing_problem::RoutingProblem,
    solver::{
        solution::{route::WorkingRoute, working_solution::WorkingSolution},
        statistics::SearchStatistics,
    },
};

/// Which router produced the plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SolverMode {
    Search,
    Fallback,
}

/// One visit on a planned route.
#[serde_as]
#[derive(Clone, Debug, Serialize, JsonSchema)]
pub struct PlannedStop {
    pub id: u64,
    pub label: String,

    /// Simulated arrival, minutes since the start of the planning day.
    pub arrival_minutes: f64,

    /// Time spent waiting for the window to open.
    #[serde_as(as = "DisplayFromStr")]
    pub wait: SignedDuration,

    /// Cumulative demand delivered once this stop is done.
    pub load_after: f64,
}

#[serde_as]
#[derive(Clone, Debug, Serialize, JsonSchema)]
pub struct PlannedRoute {
    pub vehicle_id: u64,
    pub stops: Vec<PlannedStop>,

    /// Driven distance including the return leg to the depot.
    pub distance: Meters,

    #[serde_as(as = "DisplayFromStr")]
    pub duration: SignedDuration,
}

impl PlannedRoute {
    fn from_route(problem: &RoutingProblem, route: &WorkingRoute) -> Self {
        let stops = route
            .stop_ids()
            .iter()
            .enumerate()
            .map(|(position, &stop_id)| {
                let stop = problem.stop(stop_id);

                PlannedStop {
                    id: stop.external_id(),
                    label: stop.label().to_owned(),
                    arrival_minutes: route.arrival(position).as_secs_f64() / 60.0,
                    wait: route.wait(position),
                    load_after: route.load_after(position),
                }
            })
            .collect();

        PlannedRoute {
            vehicle_id: route.vehicle(problem).external_id(),
            stops,
            distance: route.distance(),
            duration: route.duration(),
        }
    }
}

/// The assembled result of one optimization request. Immutable once built;
/// arrival times and loads are the ones the feasibility model simulated,
/// never a re-derivation.
#[serde_as]
#[derive(Clone, Debug, Serialize, JsonSchema)]
pub struct RoutePlan {
    /// One entry per fleet vehicle, in fleet order, possibly without stops.
    pub routes: Vec<PlannedRoute>,

    pub total_distance: Meters,

    #[serde_as(as = "DisplayFromStr")]
    pub total_duration: SignedDuration,

    pub baseline_distance: Meters,

    /// Fractional distance saved against the baseline; `None` when the
    /// baseline is zero and the fraction is meaningless.
    pub savings: Option<f64>,

    /// External ids of stops no route serves, ascending. Empty when every
    /// stop was placed.
    pub unassigned: Vec<u64>,

    pub mode: SolverMode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    pub statistics: SearchStatistics,
}

impl RoutePlan {
    pub(crate) fn assemble(
        problem: &RoutingProblem,
        solution: &WorkingSolution,
        baseline_distance: Meters,
        mode: SolverMode,
        note: Option<String>,
        statistics: SearchStatistics,
    ) -> RoutePlan {
        let routes = solution
            .routes()
            .iter()
            .map(|route| PlannedRoute::from_route(problem, route))
            .collect();

        let total_distance = solution.total_distance();

        let savings = if baseline_distance.is_zero() {
            None
        } else {
            Some((baseline_distance - total_distance) / baseline_distance)
        };

        let mut unassigned: Vec<u64> = solution
            .unassigned_stops()
            .iter()
            .map(|&stop_id| problem.stop(stop_id).external_id())
            .collect();
        unassigned.sort_unstable();

        RoutePlan {
            routes,
            total_distance,
            total_duration: solution.total_duration(),
            baseline_distance,
            savings,
            unassigned,
            mode,
            note,
            statistics,
        }
    }
}
