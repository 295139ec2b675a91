//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the service.
//!
//! # Tasks
//! - Cache housekeeping: drops stale trending entries once per TTL
//! - Event simulator: writes synthetic views and clicks near article locations

mod housekeeping;
mod simulator;

pub use housekeeping::spawn_housekeeping_task;
pub use simulator::{spawn_event_simulator, EventSimulator, SimulationSettings};
