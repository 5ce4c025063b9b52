use jiff::SignedDuration;

use crate::{define_index_newtype, problem::location::LocationIdx, problem::time_window::TimeWindow};

define_index_newtype!(StopIdx, Stop);

/// A delivery to make: where, how much, and when service is permitted.
#[derive(Debug, Clone)]
pub struct Stop {
    external_id: u64,
    label: String,
    location_id: LocationIdx,
    demand: f64,
    time_window: TimeWindow,
    service_duration: SignedDuration,
}

impl Stop {
    pub fn external_id(&self) -> u64 {
        self.external_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn location_id(&self) -> LocationIdx {
        self.location_id
    }

    pub fn demand(&self) -> f64 {
        self.demand
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn service_duration(&self) -> SignedDuration {
        self.service_duration
    }
}

#[derive(Default)]
pub struct StopBuilder {
    external_id: Option<u64>,
    label: Option<String>,
    location_id: Option<usize>,
    demand: Option<f64>,
    time_window: Option<TimeWindow>,
    service_duration: Option<SignedDuration>,
}

impl StopBuilder {
    pub fn set_stop_id(&mut self, external_id: u64) -> &mut StopBuilder {
        self.external_id = Some(external_id);
        self
    }

    pub fn set_label(&mut self, label: String) -> &mut StopBuilder {
        self.label = Some(label);
        self
    }

    pub fn set_location_id(&mut self, location_id: usize) -> &mut StopBuilder {
        self.location_id = Some(location_id);
        self
    }

    pub fn set_demand(&mut self, demand: f64) -> &mut StopBuilder {
        self.demand = Some(demand);
        self
    }

    pub fn set_time_window(&mut self, time_window: TimeWindow) -> &mut StopBuilder {
        self.time_window = Some(time_window);
        self
    }

    pub fn set_service_duration(&mut self, service_duration: SignedDuration) -> &mut StopBuilder {
        self.service_duration = Some(service_duration);
        self
    }

    pub fn build(self) -> Stop {
        Stop {
            external_id: self.external_id.expect("Stop ID is required"),
            label: self.label.unwrap_or_default(),
            location_id: self
                .location_id
                .expect("Location ID is required")
                .into(),
            demand: self.demand.unwrap_or(0.0),
            time_window: self.time_window.unwrap_or_default(),
            service_duration: self.service_duration.unwrap_or(SignedDuration::ZERO),
        }
    }
}
