use thiserror::Error;

use dray_matrix::InvalidCoordinate;

/// A request-level violation of the input contract. Coordinates are not
/// covered here, they get their own error from the matrix build.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("too many stops: {count} exceeds the limit of {maximum}")]
    TooManyStops { count: usize, maximum: usize },

    #[error("duplicate stop id {id}")]
    DuplicateStopId { id: u64 },

    #[error("duplicate vehicle id {id}")]
    DuplicateVehicleId { id: u64 },

    #[error("stop {id} has invalid demand {demand}")]
    InvalidDemand { id: u64, demand: f64 },

    #[error("stop {id} has a time window ending before it starts")]
    ReversedTimeWindow { id: u64 },

    #[error("stop {id} has invalid service duration {minutes} minutes")]
    InvalidServiceDuration { id: u64, minutes: f64 },

    #[error("vehicle {id} has invalid capacity {capacity}")]
    InvalidCapacity { id: u64, capacity: f64 },

    #[error("vehicle {id} has an availability window ending before it starts")]
    ReversedAvailabilityWindow { id: u64 },

    #[error("depot window ends before it starts")]
    ReversedDepotWindow,

    #[error("invalid average speed {speed} km/h")]
    InvalidSpeed { speed: f64 },

    #[error("invalid search budget of {seconds} seconds")]
    InvalidBudget { seconds: f64 },

    #[error("cannot parse clock time {value:?}, expected HH:MM")]
    BadClockTime { value: String },
}

/// Fatal request outcomes. Anything recoverable (a search that runs out of
/// budget) is absorbed by the fallback and never surfaces here.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("demand {demand} exceeds available capacity {capacity} (short by {shortfall})")]
    Infeasible {
        demand: f64,
        capacity: f64,
        shortfall: f64,
    },
}
