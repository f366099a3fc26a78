//! External collaborators: the traffic simulation and the route generator.

use std::path::{Path, PathBuf};

use tl_core::{TlResult, VehicleObservation};

/// A microscopic traffic simulation the loop can drive.
///
/// Every call is synchronous; an `Err` ends the episode.  Implementations
/// report failures as [`TlError::Simulation`][tl_core::TlError::Simulation].
pub trait TrafficSim {
    /// Start a fresh run on `route_file`.
    fn reset(&mut self, route_file: &Path) -> TlResult<()>;

    /// Advance `steps` simulation steps.
    fn step(&mut self, steps: u32) -> TlResult<()>;

    /// Ids of every vehicle currently in the network.
    fn vehicle_ids(&self) -> TlResult<Vec<String>>;

    /// Distance travelled along the current lane, in metres.
    fn vehicle_lane_position(&self, id: &str) -> TlResult<f64>;

    fn vehicle_speed(&self, id: &str) -> TlResult<f64>;

    fn vehicle_lane_id(&self, id: &str) -> TlResult<String>;

    fn vehicle_road_id(&self, id: &str) -> TlResult<String>;

    /// Seconds the vehicle has spent waiting so far.
    fn accumulated_waiting_time(&self, id: &str) -> TlResult<f64>;

    /// Vehicles halted on edge `edge` in the last step.
    fn halting_count(&self, edge: &str) -> TlResult<u32>;

    /// Show phase `code` at traffic light `junction`.
    fn set_phase(&mut self, junction: &str, code: u32) -> TlResult<()>;

    fn close(&mut self) -> TlResult<()>;
}

/// Produces a vehicle-arrival schedule for one episode.
///
/// The same seed must yield the same schedule.
pub trait RouteSource {
    fn generate(&mut self, seed: u64) -> TlResult<PathBuf>;
}

/// Snapshot every vehicle the simulation reports.
pub fn observe<S: TrafficSim + ?Sized>(sim: &S) -> TlResult<Vec<VehicleObservation>> {
    sim.vehicle_ids()?
        .into_iter()
        .map(|id| {
            Ok(VehicleObservation {
                lane_position: sim.vehicle_lane_position(&id)?,
                speed:         sim.vehicle_speed(&id)?,
                lane_id:       sim.vehicle_lane_id(&id)?,
                road_id:       sim.vehicle_road_id(&id)?,
                waiting_time:  sim.accumulated_waiting_time(&id)?,
                id,
            })
        })
        .collect()
}
