pub mod request_builder;
pub mod schema;
pub mod types;
