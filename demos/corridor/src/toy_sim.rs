//! `CorridorSim`, a small two-junction queue simulation.
//!
//! Each incoming road is a 750 m lane bundle ending at a stop line.
//! Vehicles drive at a fixed free speed, keep a fixed gap to their leader
//! and stop at the line unless their movement is green.  Vehicles crossing
//! the line leave the network.  It is enough to give the control loop
//! queues and waiting times to react to; it is not a traffic model.

use std::collections::HashMap;
use std::path::Path;

use tl_core::{TlError, TlResult};
use tl_sim::TrafficSim;

use crate::routes::Arrival;

const ROAD_LENGTH: f64 = 750.0;
const STOP_LINE:   f64 = ROAD_LENGTH - 1.0;
const FREE_SPEED:  f64 = 13.9;
const GAP:         f64 = 7.5;
const HALT_SPEED:  f64 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    NorthSouth,
    EastWest,
}

/// Incoming road → (traffic light, axis).
const APPROACHES: [(&str, &str, Axis); 8] = [
    ("W2TL", "TL", Axis::EastWest),
    ("N2TL", "TL", Axis::NorthSouth),
    ("E2TL", "TL", Axis::EastWest),
    ("S2TL", "TL", Axis::NorthSouth),
    ("-E0", "DE", Axis::EastWest),
    ("-E3", "DE", Axis::NorthSouth),
    ("-E4", "DE", Axis::NorthSouth),
    ("TL2E", "DE", Axis::EastWest),
];

#[derive(Clone, Debug)]
struct ToyVehicle {
    id:      String,
    road:    String,
    lane:    u8,
    pos:     f64,
    speed:   f64,
    waiting: f64,
}

#[derive(Default)]
pub struct CorridorSim {
    pending:  Vec<Arrival>,
    next:     usize,
    vehicles: Vec<ToyVehicle>,
    phases:   HashMap<String, u32>,
    step:     u64,
}

impl CorridorSim {
    pub fn new() -> Self {
        Self::default()
    }

    fn vehicle(&self, id: &str) -> TlResult<&ToyVehicle> {
        self.vehicles
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| TlError::Simulation(format!("vehicle {id} is not in the network")))
    }

    /// Whether lane `lane` of `road` may cross its stop line.
    fn is_green(&self, road: &str, lane: u8) -> bool {
        let Some(&(_, light, axis)) = APPROACHES.iter().find(|(r, _, _)| *r == road) else {
            return false;
        };
        let Some(&code) = self.phases.get(light) else {
            return false;
        };
        if code % 2 == 1 {
            return false;
        }
        let left = lane == 3;
        let wanted = match (axis, left) {
            (Axis::NorthSouth, false) => 0,
            (Axis::NorthSouth, true) => 1,
            (Axis::EastWest, false) => 2,
            (Axis::EastWest, true) => 3,
        };
        code / 2 == wanted
    }

    fn spawn(&mut self) {
        while let Some(a) = self.pending.get(self.next).filter(|a| a.depart <= self.step) {
            self.vehicles.push(ToyVehicle {
                id:      a.id.clone(),
                road:    a.road.clone(),
                lane:    a.lane,
                pos:     0.0,
                speed:   FREE_SPEED,
                waiting: 0.0,
            });
            self.next += 1;
        }
    }

    fn drive(&mut self) {
        // Group by lane, front vehicle first.
        self.vehicles.sort_by(|a, b| {
            (&a.road, a.lane)
                .cmp(&(&b.road, b.lane))
                .then(b.pos.total_cmp(&a.pos))
        });

        let mut limit = f64::INFINITY;
        for i in 0..self.vehicles.len() {
            let (road, lane) = (self.vehicles[i].road.as_str(), self.vehicles[i].lane);
            let lane_start = i == 0 || {
                let prev = &self.vehicles[i - 1];
                (prev.road.as_str(), prev.lane) != (road, lane)
            };
            if lane_start {
                limit = if self.is_green(road, lane) { f64::INFINITY } else { STOP_LINE };
            }
            let v = &mut self.vehicles[i];
            let new_pos = (v.pos + FREE_SPEED).min(limit).max(v.pos);
            v.speed = new_pos - v.pos;
            v.pos = new_pos;
            if v.speed < HALT_SPEED {
                v.waiting += 1.0;
            }
            limit = v.pos - GAP;
        }
        self.vehicles.retain(|v| v.pos < ROAD_LENGTH);
    }
}

impl TrafficSim for CorridorSim {
    fn reset(&mut self, route_file: &Path) -> TlResult<()> {
        let json = std::fs::read_to_string(route_file)?;
        let mut pending: Vec<Arrival> = serde_json::from_str(&json)
            .map_err(|e| TlError::Simulation(format!("{}: {e}", route_file.display())))?;
        pending.sort_by_key(|a| a.depart);
        *self = CorridorSim { pending, ..CorridorSim::default() };
        Ok(())
    }

    fn step(&mut self, steps: u32) -> TlResult<()> {
        for _ in 0..steps {
            self.spawn();
            self.drive();
            self.step += 1;
        }
        Ok(())
    }

    fn vehicle_ids(&self) -> TlResult<Vec<String>> {
        Ok(self.vehicles.iter().map(|v| v.id.clone()).collect())
    }

    fn vehicle_lane_position(&self, id: &str) -> TlResult<f64> {
        Ok(self.vehicle(id)?.pos)
    }

    fn vehicle_speed(&self, id: &str) -> TlResult<f64> {
        Ok(self.vehicle(id)?.speed)
    }

    fn vehicle_lane_id(&self, id: &str) -> TlResult<String> {
        let v = self.vehicle(id)?;
        Ok(format!("{}_{}", v.road, v.lane))
    }

    fn vehicle_road_id(&self, id: &str) -> TlResult<String> {
        Ok(self.vehicle(id)?.road.clone())
    }

    fn accumulated_waiting_time(&self, id: &str) -> TlResult<f64> {
        Ok(self.vehicle(id)?.waiting)
    }

    fn halting_count(&self, edge: &str) -> TlResult<u32> {
        Ok(self
            .vehicles
            .iter()
            .filter(|v| v.road == edge && v.speed < HALT_SPEED)
            .count() as u32)
    }

    fn set_phase(&mut self, junction: &str, code: u32) -> TlResult<()> {
        if !APPROACHES.iter().any(|(_, light, _)| *light == junction) {
            return Err(TlError::Simulation(format!("no traffic light {junction}")));
        }
        self.phases.insert(junction.to_owned(), code);
        Ok(())
    }

    fn close(&mut self) -> TlResult<()> {
        self.vehicles.clear();
        self.pending.clear();
        self.next = 0;
        Ok(())
    }
}
