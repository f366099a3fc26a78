//! Road layout: which junctions exist, which incoming roads each agent
//! observes, and how those roads' lanes map onto lane groups.
//!
//! # Lane groups
//!
//! Every incoming road contributes two lane groups:
//!
//! ```text
//! <road>_0, <road>_1, <road>_2  → group_base       (through / right lanes)
//! <road>_3                      → group_base + 1   (left-turn-only lane)
//! ```
//!
//! A single junction therefore uses groups `0..8`.  When one agent observes
//! both junctions through a shared state vector, the second junction's roads
//! are shifted to groups `8..16`.
//!
//! # Through road
//!
//! In the two-junction layouts, the road that links the junctions (`E2TL`
//! into `TL`, `TL2E` into `DE`) is much longer than the others and is
//! discretised with a wider distance table (see `tl-encode`).  A lone
//! junction has no through road.

use crate::{AgentId, JunctionId, PerAgent};

/// Distance cells per lane group.
pub const CELLS_PER_GROUP: usize = 10;

/// Local green phases per junction (NS, NS-left, EW, EW-left).
pub const ACTIONS_PER_JUNCTION: usize = 4;

pub const JUNCTION_TL: &str = "TL";
pub const JUNCTION_DE: &str = "DE";

/// Incoming roads of junction `TL`, in lane-group order, flagged when they
/// link to the other junction.
const TL_ROADS: [(&str, bool); 4] = [("W2TL", false), ("N2TL", false), ("E2TL", true), ("S2TL", false)];

/// Incoming roads of junction `DE`, in lane-group order.
const DE_ROADS: [(&str, bool); 4] = [("-E0", false), ("-E3", false), ("-E4", false), ("TL2E", true)];

// ── LayoutKind ────────────────────────────────────────────────────────────────

/// The three supported network configurations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayoutKind {
    /// One junction, one agent.
    Single,
    /// Two junctions, one agent (and one value model) per junction.
    DualIndependent,
    /// Two junctions driven by one agent with a shared state and action space.
    DualShared,
}

// ── Approach ──────────────────────────────────────────────────────────────────

/// One incoming road as seen by one agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Approach {
    /// Road (edge) id, e.g. `"N2TL"`.
    pub road:         String,
    /// Junction this road feeds.
    pub junction:     JunctionId,
    /// `true` for the road linking the two junctions; always `false` in
    /// the single-junction layout.
    pub through_road: bool,
    /// Lane group of lanes `0..=2`; lane `3` uses `group_base + 1`.
    pub group_base:   u8,
}

impl Approach {
    /// Lane group for lane `lane_index` of this road, or `None` for lanes
    /// the state encoding does not track.
    #[inline]
    pub fn lane_group(&self, lane_index: u8) -> Option<u8> {
        match lane_index {
            0..=2 => Some(self.group_base),
            3 => Some(self.group_base + 1),
            _ => None,
        }
    }
}

// ── Junction ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Junction {
    pub id:   JunctionId,
    /// Traffic-light id understood by the simulation (`"TL"`, `"DE"`).
    pub name: String,
}

// ── AgentLayout ───────────────────────────────────────────────────────────────

/// Everything one agent observes and controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentLayout {
    pub agent:      AgentId,
    /// Incoming roads observed by this agent (state, waiting time, queues).
    pub approaches: Vec<Approach>,
    /// Junctions controlled by this agent, in action-offset order.
    pub junctions:  Vec<JunctionId>,
}

impl AgentLayout {
    /// Road ids, in lane-group order.
    pub fn roads(&self) -> impl Iterator<Item = &str> + '_ {
        self.approaches.iter().map(|a| a.road.as_str())
    }

    pub fn tracks_road(&self, road: &str) -> bool {
        self.approaches.iter().any(|a| a.road == road)
    }

    pub fn approach(&self, road: &str) -> Option<&Approach> {
        self.approaches.iter().find(|a| a.road == road)
    }

    /// Lane groups this agent's state covers.
    pub fn lane_group_count(&self) -> usize {
        self.approaches.len() * 2
    }

    /// Smallest state length that can hold every lane group.
    pub fn states_required(&self) -> usize {
        self.lane_group_count() * CELLS_PER_GROUP
    }

    /// Size of this agent's action space.
    pub fn actions_required(&self) -> usize {
        self.junctions.len() * ACTIONS_PER_JUNCTION
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// The resolved layout for a [`LayoutKind`].
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub kind:      LayoutKind,
    pub junctions: Vec<Junction>,
    pub agents:    PerAgent<AgentLayout>,
}

impl Layout {
    pub fn new(kind: LayoutKind) -> Self {
        let tl = JunctionId(0);
        let de = JunctionId(1);

        let junctions = match kind {
            LayoutKind::Single => vec![Junction { id: tl, name: JUNCTION_TL.into() }],
            LayoutKind::DualIndependent | LayoutKind::DualShared => vec![
                Junction { id: tl, name: JUNCTION_TL.into() },
                Junction { id: de, name: JUNCTION_DE.into() },
            ],
        };

        let agents = match kind {
            LayoutKind::Single => PerAgent::from_vec(vec![AgentLayout {
                agent:      AgentId::FIRST,
                approaches: approaches(&TL_ROADS, tl, 0, false),
                junctions:  vec![tl],
            }]),
            LayoutKind::DualIndependent => PerAgent::from_vec(vec![
                AgentLayout {
                    agent:      AgentId::FIRST,
                    approaches: approaches(&TL_ROADS, tl, 0, true),
                    junctions:  vec![tl],
                },
                AgentLayout {
                    agent:      AgentId::SECOND,
                    approaches: approaches(&DE_ROADS, de, 0, true),
                    junctions:  vec![de],
                },
            ]),
            LayoutKind::DualShared => {
                let mut all = approaches(&TL_ROADS, tl, 0, true);
                all.extend(approaches(&DE_ROADS, de, 8, true));
                PerAgent::from_vec(vec![AgentLayout {
                    agent:      AgentId::FIRST,
                    approaches: all,
                    junctions:  vec![tl, de],
                }])
            }
        };

        Self { kind, junctions, agents }
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// # Panics
    /// Panics if `agent` is not part of this layout.
    pub fn agent(&self, agent: AgentId) -> &AgentLayout {
        &self.agents[agent]
    }

    pub fn junction_name(&self, junction: JunctionId) -> Option<&str> {
        self.junctions.get(junction.index()).map(|j| j.name.as_str())
    }

    /// Every incoming road of every junction, each listed once.
    pub fn all_roads(&self) -> Vec<&str> {
        let mut roads: Vec<&str> = Vec::new();
        for agent in self.agents.values() {
            for road in agent.roads() {
                if !roads.contains(&road) {
                    roads.push(road);
                }
            }
        }
        roads
    }
}

/// `linked` is `false` when the junction stands alone; no road then counts
/// as a through road.
fn approaches(roads: &[(&str, bool)], junction: JunctionId, first_group: u8, linked: bool) -> Vec<Approach> {
    roads
        .iter()
        .enumerate()
        .map(|(i, &(road, links))| Approach {
            road: road.to_owned(),
            junction,
            through_road: linked && links,
            group_base: first_group + 2 * i as u8,
        })
        .collect()
}
