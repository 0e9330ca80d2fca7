use core::fmt;

use serde::{Deserialize, Serialize};

use mtt_core_bond::NonNegativeF64;

/// Stable identity of a node inside a coloured tree.
///
/// Indices stay valid across topology changes since nodes are only relinked,
/// never created or destroyed, while a chain is running.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "#{}", self.0)
    }
}

/// A discrete trait value (deme / type) drawn from a fixed alphabet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Colour(u32);

impl Colour {
    #[must_use]
    pub const fn new(colour: u32) -> Self {
        Self(colour)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "colour {}", self.0)
    }
}

/// A migration event on a branch: at `time` the lineage switches to `colour`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangeEvent {
    time: NonNegativeF64,
    colour: Colour,
}

impl ChangeEvent {
    #[must_use]
    pub fn new(time: NonNegativeF64, colour: Colour) -> Self {
        Self { time, colour }
    }

    #[must_use]
    pub fn time(&self) -> NonNegativeF64 {
        self.time
    }

    #[must_use]
    pub fn colour(&self) -> Colour {
        self.colour
    }
}
