use schemars::schema_for;

use crate::{json::types::JsonOptimizeRequest, plan::RoutePlan};

pub fn request_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(JsonOptimizeRequest))
}

pub fn plan_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(RoutePlan))
}
