//! Distance-to-stop-line bucket tables.
//!
//! Cells are half-open `[lower, upper)` except the last, which is closed so
//! a vehicle exactly at the far end of a 750 m road still lands in cell 9.
//!
//! ```text
//! cell    0   1   2   3    4    5    6    7    8    9
//! tight  <7 <14 <21 <28  <40  <60 <100 <160 <400 ≤750
//! wide   <7 <20 <40 <100 <200 <400 <600 <700 <730 ≤750
//! ```

use tl_core::Approach;

/// Upper edges of cells `0..=8` (exclusive) and cell 9 (inclusive).
const TIGHT_EDGES: [f64; 10] = [7.0, 14.0, 21.0, 28.0, 40.0, 60.0, 100.0, 160.0, 400.0, 750.0];
const WIDE_EDGES: [f64; 10] = [7.0, 20.0, 40.0, 100.0, 200.0, 400.0, 600.0, 700.0, 730.0, 750.0];

/// Which bucket table discretises a road.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DistanceTable {
    /// Ordinary approach roads: fine resolution near the stop line.
    Tight,
    /// The road linking the two junctions.
    Wide,
}

impl DistanceTable {
    pub fn for_approach(approach: &Approach) -> Self {
        if approach.through_road { DistanceTable::Wide } else { DistanceTable::Tight }
    }

    fn edges(self) -> &'static [f64; 10] {
        match self {
            DistanceTable::Tight => &TIGHT_EDGES,
            DistanceTable::Wide => &WIDE_EDGES,
        }
    }

    /// Distance cell `0..=9` for a vehicle `lane_pos` metres from the stop
    /// line, or `None` when the position is negative, beyond the last edge or
    /// not a number.
    pub fn cell(self, lane_pos: f64) -> Option<u8> {
        if lane_pos.is_nan() || lane_pos < 0.0 {
            return None;
        }
        let edges = self.edges();
        let last = edges.len() - 1;
        if let Some(i) = edges[..last].iter().position(|&edge| lane_pos < edge) {
            return Some(i as u8);
        }
        (lane_pos <= edges[last]).then_some(last as u8)
    }
}
