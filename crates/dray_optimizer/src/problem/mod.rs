pub mod fleet;
pub mod location;
pub mod routing_problem;
pub mod stop;
pub mod stop_index;
pub mod time_window;
pub mod vehicle;
