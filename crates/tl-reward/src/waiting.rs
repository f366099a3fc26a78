//! `WaitingTimeTable` — one agent's view of accumulated waiting time.

use rustc_hash::FxHashMap;

use tl_core::{AgentLayout, VehicleObservation};

/// Last observed accumulated waiting time of every vehicle currently on one
/// agent's incoming roads.
///
/// Owned by one episode: the orchestrator creates a fresh table per agent at
/// episode start, so no state leaks between episodes.
#[derive(Clone, Debug, Default)]
pub struct WaitingTimeTable {
    waits: FxHashMap<String, f64>,
}

impl WaitingTimeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the table from a full vehicle snapshot and return the new
    /// total.
    ///
    /// Vehicles on one of `layout`'s roads have their entry set; every
    /// other entry (vehicle crossed the junction or left the network) is
    /// removed.  The total is re-summed from the remaining entries.
    pub fn update<'a>(
        &mut self,
        layout:   &AgentLayout,
        vehicles: impl IntoIterator<Item = &'a VehicleObservation>,
    ) -> f64 {
        let mut seen: FxHashMap<String, f64> = FxHashMap::default();
        for v in vehicles {
            if layout.tracks_road(&v.road_id) {
                seen.insert(v.id.clone(), v.waiting_time);
            }
        }
        self.waits = seen;
        self.total()
    }

    /// Sum of every tracked vehicle's accumulated wait, in seconds.
    pub fn total(&self) -> f64 {
        self.waits.values().sum()
    }

    pub fn get(&self, vehicle: &str) -> Option<f64> {
        self.waits.get(vehicle).copied()
    }

    pub fn len(&self) -> usize {
        self.waits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waits.is_empty()
    }

    pub fn clear(&mut self) {
        self.waits.clear();
    }
}
