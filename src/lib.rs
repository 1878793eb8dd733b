pub mod config;
pub mod domain;
pub mod form;
pub mod gateway;
mod routes;
mod startup;
pub mod telemetry;
mod util;

pub use startup::run;
