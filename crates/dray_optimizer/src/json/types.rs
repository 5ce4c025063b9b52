use jiff::SignedDuration;
use jiff::civil::Time;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::InputError;

/// One optimization request as the surrounding application hands it over.
/// The application owns HTTP and file parsing; this type only describes
/// the in-memory boundary record.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "OptimizeRequest")]
pub struct JsonOptimizeRequest {
    pub depot: JsonDepot,
    pub stops: Vec<JsonStop>,
    pub vehicles: Vec<JsonVehicle>,

    /// Average travel speed; the engine default applies when absent.
    pub speed_kmh: Option<f64>,

    pub budget: Option<JsonBudget>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Depot")]
pub struct JsonDepot {
    pub lat: f64,
    pub lng: f64,

    /// Depot opening window. Becomes the default availability window of
    /// every vehicle that does not carry its own.
    pub window_start: Option<JsonClockTime>,
    pub window_end: Option<JsonClockTime>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Stop")]
pub struct JsonStop {
    pub id: u64,
    pub lat: f64,
    pub lng: f64,
    pub label: Option<String>,
    pub demand: Option<f64>,
    pub tw_start: Option<JsonClockTime>,
    pub tw_end: Option<JsonClockTime>,
    pub service_minutes: Option<f64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Vehicle")]
pub struct JsonVehicle {
    pub id: u64,
    pub capacity: f64,
    pub window_start: Option<JsonClockTime>,
    pub window_end: Option<JsonClockTime>,
}

/// A time of day, either as minutes since midnight or as an "HH:MM" clock
/// string.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum JsonClockTime {
    Minutes(f64),
    Clock(String),
}

impl JsonClockTime {
    /// Offset from the planning day's start.
    pub fn to_offset(&self) -> Result<SignedDuration, InputError> {
        match self {
            // try_from rejects NaN, infinities and values too large for a
            // duration, so a finite but absurd number cannot panic here.
            JsonClockTime::Minutes(minutes) => SignedDuration::try_from_secs_f64(minutes * 60.0)
                .map_err(|_| InputError::BadClockTime {
                    value: minutes.to_string(),
                }),
            JsonClockTime::Clock(value) => {
                let time: Time = value.parse().map_err(|_| InputError::BadClockTime {
                    value: value.clone(),
                })?;

                Ok(Time::midnight().duration_until(time))
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum JsonBudget {
    Seconds(f64),
    Iterations(usize),
}
