//! Strongly typed identifier wrappers.
//!
//! `JunctionId` and `Action` are zero-based and cast straight to `usize` for
//! table lookups.  `AgentId` is one-based (`1` or `2`) because that is how
//! agents are named in configuration files and reports; use
//! [`AgentId::index`] to get the zero-based storage slot.

use std::fmt;

/// Generate a zero-based typed index wrapper around a primitive integer.
macro_rules! typed_index {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a table index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_index! {
    /// Index of a signalised junction in the layout (`0` = `TL`, `1` = `DE`).
    pub struct JunctionId(u8);
}

typed_index! {
    /// A discrete action chosen by an agent's policy.
    ///
    /// In single-junction action spaces this is the local phase index
    /// `0..4`.  In the shared two-junction space, `4..8` address the second
    /// junction.
    pub struct Action(u16);
}

// ── AgentId ───────────────────────────────────────────────────────────────────

/// Identifier of a learning agent: `1` or `2`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u8);

impl AgentId {
    pub const FIRST: AgentId = AgentId(1);
    pub const SECOND: AgentId = AgentId(2);

    /// Zero-based storage slot for this agent.
    ///
    /// # Panics
    /// Panics in debug mode for `AgentId(0)`, which is never a valid agent.
    #[inline(always)]
    pub fn index(self) -> usize {
        debug_assert!(self.0 >= 1, "agent ids start at 1");
        self.0 as usize - 1
    }

    /// The agent stored at zero-based `slot`.
    #[inline(always)]
    pub fn from_index(slot: usize) -> AgentId {
        AgentId(slot as u8 + 1)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent {}", self.0)
    }
}
