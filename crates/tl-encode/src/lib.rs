//! `tl-encode` — turns raw vehicle observations into occupancy [`State`]s.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`distance`]    | `DistanceTable` (wide / tight bucket edges)                |
//! | [`lanes`]       | `split_lane_id`                                            |
//! | [`encoder`]     | `StateEncoder`                                             |
//!
//! # Cell index
//!
//! ```text
//! lane_pos      = road_length - raw_position      (0 = at the stop line)
//! distance_cell = DistanceTable::cell(lane_pos)   (0..=9)
//! cell          = lane_group * 10 + distance_cell
//! ```
//!
//! Vehicles on lanes without a lane group, or with a position outside the
//! distance table, are skipped.  Cells `>= num_states` are never written.
//!
//! [`State`]: tl_core::State

pub mod distance;
pub mod encoder;
pub mod lanes;


pub use distance::DistanceTable;
pub use encoder::StateEncoder;
pub use lanes::split_lane_id;
