pub mod calculate;
pub mod config;
pub mod model;
