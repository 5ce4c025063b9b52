pub mod baseline;
pub mod budget;
pub mod construction;
pub mod engine;
pub mod fallback;
pub mod feasibility;
pub mod insertion;
pub mod ls;
pub mod params;
pub mod search;
pub mod solution;
pub mod statistics;
