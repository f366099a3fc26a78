//! Per-vehicle observation snapshot shared by state encoding and reward
//! accounting.

/// What the control loop reads about one vehicle at a decision point.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleObservation {
    pub id:            String,
    /// Edge the vehicle is on, e.g. `"N2TL"`.
    pub road_id:       String,
    /// Lane the vehicle is on, `"<road>_<index>"`.
    pub lane_id:       String,
    /// Metres travelled along the lane from its start.
    pub lane_position: f64,
    /// Metres per second.
    pub speed:         f64,
    /// Accumulated waiting time in seconds.
    pub waiting_time:  f64,
}
