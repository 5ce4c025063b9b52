use fxhash::FxHashSet;
use jiff::SignedDuration;
use tracing::{debug, instrument};

use crate::{
    error::{InputError, OptimizeError},
    json::types::{JsonBudget, JsonClockTime, JsonOptimizeRequest},
    problem::{
        fleet::Fleet,
        location::Location,
        routing_problem::{RoutingProblem, RoutingProblemBuilder},
        stop::StopBuilder,
        time_window::TimeWindow,
        vehicle::VehicleBuilder,
    },
    solver::{budget::SearchBudget, params::SolverParams},
};
use dray_matrix::Kmh;

/// Requests above this many stops are refused outright; the search space
/// beyond it is not worth a synchronous request.
pub const MAX_STOPS: usize = 500;

/// Speeds below this make worst-case travel times overflow a duration.
const MIN_SPEED_KMH: f64 = 0.001;

/// Turns a boundary request into a routing problem and solver parameters.
/// All demand, window and id validation lives here; coordinates get their
/// own check when the travel matrix is built.
#[instrument(skip_all, level = "debug")]
pub fn build_problem(
    request: &JsonOptimizeRequest,
) -> Result<(RoutingProblem, SolverParams), OptimizeError> {
    if request.stops.len() > MAX_STOPS {
        return Err(InputError::TooManyStops {
            count: request.stops.len(),
            maximum: MAX_STOPS,
        }
        .into());
    }

    let depot_window = build_window(
        request.depot.window_start.as_ref(),
        request.depot.window_end.as_ref(),
    )?
    .map_or(Ok(None), |window| {
        if window.start() > window.end() {
            Err(InputError::ReversedDepotWindow)
        } else {
            Ok(Some(window))
        }
    })?;

    let mut locations = vec![Location::from_lat_lon(request.depot.lat, request.depot.lng)];
    let mut stops = Vec::with_capacity(request.stops.len());
    let mut seen_stop_ids = FxHashSet::default();

    for (index, stop) in request.stops.iter().enumerate() {
        if !seen_stop_ids.insert(stop.id) {
            return Err(InputError::DuplicateStopId { id: stop.id }.into());
        }

        let demand = stop.demand.unwrap_or(0.0);
        if demand.is_nan() || demand < 0.0 {
            return Err(InputError::InvalidDemand {
                id: stop.id,
                demand,
            }
            .into());
        }

        // NaN and overflow fall out of try_from; only the sign needs its
        // own check.
        let service_minutes = stop.service_minutes.unwrap_or(0.0);
        if service_minutes < 0.0 {
            return Err(InputError::InvalidServiceDuration {
                id: stop.id,
                minutes: service_minutes,
            }
            .into());
        }
        let service_duration = SignedDuration::try_from_secs_f64(service_minutes * 60.0).map_err(
            |_| InputError::InvalidServiceDuration {
                id: stop.id,
                minutes: service_minutes,
            },
        )?;

        locations.push(Location::from_lat_lon(stop.lat, stop.lng));

        let mut builder = StopBuilder::default();
        builder.set_stop_id(stop.id);
        builder.set_location_id(index + 1);
        builder.set_demand(demand);
        builder.set_service_duration(service_duration);

        if let Some(label) = &stop.label {
            builder.set_label(label.clone());
        }

        if let Some(window) = build_window(stop.tw_start.as_ref(), stop.tw_end.as_ref())? {
            if window.start() > window.end() {
                return Err(InputError::ReversedTimeWindow { id: stop.id }.into());
            }

            builder.set_time_window(window);
        }

        stops.push(builder.build());
    }

    let mut vehicles = Vec::with_capacity(request.vehicles.len());
    let mut seen_vehicle_ids = FxHashSet::default();

    for vehicle in &request.vehicles {
        if !seen_vehicle_ids.insert(vehicle.id) {
            return Err(InputError::DuplicateVehicleId { id: vehicle.id }.into());
        }

        if vehicle.capacity.is_nan() || vehicle.capacity < 0.0 {
            return Err(InputError::InvalidCapacity {
                id: vehicle.id,
                capacity: vehicle.capacity,
            }
            .into());
        }

        let mut builder = VehicleBuilder::default();
        builder.set_vehicle_id(vehicle.id);
        builder.set_capacity(vehicle.capacity);

        let availability = build_window(vehicle.window_start.as_ref(), vehicle.window_end.as_ref())?;
        match availability {
            Some(window) => {
                if window.start() > window.end() {
                    return Err(InputError::ReversedAvailabilityWindow { id: vehicle.id }.into());
                }

                builder.set_availability(window);
            }
            None => {
                if let Some(window) = depot_window {
                    builder.set_availability(window);
                }
            }
        }

        vehicles.push(builder.build());
    }

    let mut builder = RoutingProblemBuilder::default();
    builder.set_locations(locations);
    builder.set_stops(stops);
    builder.set_fleet(Fleet::new(vehicles));

    if let Some(speed) = request.speed_kmh {
        if !speed.is_finite() || speed < MIN_SPEED_KMH {
            return Err(InputError::InvalidSpeed { speed }.into());
        }

        builder.set_speed(Kmh::new(speed));
    }

    let problem = builder.build()?;

    let params = SolverParams {
        budget: match &request.budget {
            Some(JsonBudget::Seconds(seconds)) => SearchBudget::Duration(
                SignedDuration::try_from_secs_f64(*seconds)
                    .map_err(|_| InputError::InvalidBudget { seconds: *seconds })?,
            ),
            Some(JsonBudget::Iterations(iterations)) => SearchBudget::Iterations(*iterations),
            None => SearchBudget::default(),
        },
        stop_signal: None,
    };

    debug!(
        stops = problem.num_stops(),
        vehicles = problem.fleet().len(),
        "built routing problem from request"
    );

    Ok((problem, params))
}

/// A window with either bound present; missing bounds fall back to the
/// start or end of the planning horizon.
fn build_window(
    start: Option<&JsonClockTime>,
    end: Option<&JsonClockTime>,
) -> Result<Option<TimeWindow>, InputError> {
    if start.is_none() && end.is_none() {
        return Ok(None);
    }

    let full = TimeWindow::full_horizon();
    let start = start.map(JsonClockTime::to_offset).transpose()?;
    let end = end.map(JsonClockTime::to_offset).transpose()?;

    Ok(Some(TimeWindow::new(
        start.unwrap_or(full.start()),
        end.unwrap_or(full.end()),
    )))
}
