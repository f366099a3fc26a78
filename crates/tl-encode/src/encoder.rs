//! `StateEncoder` — one agent's occupancy-vector builder.

use tl_core::{AgentLayout, State, VehicleObservation};
use tracing::trace;

use crate::{DistanceTable, split_lane_id};

/// Builds the [`State`] an agent decides on.
///
/// Holds only configuration; [`encode`][Self::encode] is a pure function of
/// its input, so encoding the same snapshot twice yields the same vector.
#[derive(Clone, Debug)]
pub struct StateEncoder {
    layout:      AgentLayout,
    num_states:  usize,
    road_length: f64,
}

impl StateEncoder {
    pub fn new(layout: AgentLayout, num_states: usize, road_length: f64) -> Self {
        Self { layout, num_states, road_length }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn layout(&self) -> &AgentLayout {
        &self.layout
    }

    /// Occupancy vector for `vehicles`.  Vehicles on roads this agent does not
    /// observe are ignored.
    pub fn encode<'a>(&self, vehicles: impl IntoIterator<Item = &'a VehicleObservation>) -> State {
        let mut state = State::empty(self.num_states);
        for vehicle in vehicles {
            if let Some(cell) = self.cell_index(vehicle) {
                state.occupy(cell);
            }
        }
        state
    }

    /// State index for one vehicle, or `None` if it is not a tracked vehicle.
    pub fn cell_index(&self, vehicle: &VehicleObservation) -> Option<usize> {
        let (road, lane) = split_lane_id(&vehicle.lane_id)?;
        let approach = self.layout.approach(road)?;
        let group = approach.lane_group(lane)? as usize;

        let lane_pos = self.road_length - vehicle.lane_position;
        let Some(distance) = DistanceTable::for_approach(approach).cell(lane_pos) else {
            trace!(vehicle = %vehicle.id, lane_pos, "position outside distance table");
            return None;
        };

        let cell = if group == 0 {
            distance as usize
        } else {
            group * tl_core::layout::CELLS_PER_GROUP + distance as usize
        };
        (cell < self.num_states).then_some(cell)
    }
}
