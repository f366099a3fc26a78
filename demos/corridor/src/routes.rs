//! Seeded vehicle-arrival schedules.
//!
//! Departure times follow a Weibull(shape 2) curve stretched over the
//! episode, so traffic builds up, peaks and fades.  Three quarters of the
//! vehicles go straight (lanes `_0`..`_2`), the rest use the left-turn lane.

use std::path::PathBuf;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use tl_core::{TlError, TlResult};
use tl_sim::RouteSource;

/// One scheduled vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arrival {
    pub id:     String,
    /// Simulation step at which the vehicle enters its road.
    pub depart: u64,
    pub road:   String,
    pub lane:   u8,
}

const WEIBULL_SHAPE: f64 = 2.0;
const STRAIGHT_SHARE: f64 = 0.75;

/// Writes `routes_<seed>.json` files into `dir`.
pub struct SeededRoutes {
    pub dir:       PathBuf,
    pub roads:     Vec<String>,
    pub vehicles:  usize,
    pub max_steps: u64,
}

impl SeededRoutes {
    /// The schedule for `seed`, sorted by departure.
    pub fn schedule(&self, seed: u64) -> Vec<Arrival> {
        let mut rng = SmallRng::seed_from_u64(seed);
        if self.roads.is_empty() {
            return Vec::new();
        }

        // Inverse-CDF Weibull samples, min-max scaled onto 0..max_steps.
        let mut timings: Vec<f64> = (0..self.vehicles)
            .map(|_| {
                let u: f64 = rng.r#gen();
                (-(1.0 - u).ln()).powf(1.0 / WEIBULL_SHAPE)
            })
            .collect();
        timings.sort_by(f64::total_cmp);
        let min = timings.first().copied().unwrap_or(0.0);
        let max = timings.last().copied().unwrap_or(0.0);
        let span = (max - min).max(f64::EPSILON);
        let last_step = self.max_steps.saturating_sub(1) as f64;

        timings
            .into_iter()
            .enumerate()
            .map(|(i, t)| {
                let road = &self.roads[rng.gen_range(0..self.roads.len())];
                let lane = if rng.r#gen::<f64>() < STRAIGHT_SHARE { rng.gen_range(0..3) } else { 3 };
                Arrival {
                    id:     format!("veh_{i}"),
                    depart: ((t - min) / span * last_step).round() as u64,
                    road:   road.clone(),
                    lane,
                }
            })
            .collect()
    }
}

impl RouteSource for SeededRoutes {
    fn generate(&mut self, seed: u64) -> TlResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("routes_{seed}.json"));
        let json = serde_json::to_string(&self.schedule(seed))
            .map_err(|e| TlError::Simulation(format!("route serialisation: {e}")))?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}
