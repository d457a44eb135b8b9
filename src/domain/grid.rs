// Grid domain model - Grafana's 24-column coordinate space
use serde::{Deserialize, Serialize};

/// Width of the dashboard canvas in grid units.
pub const CANVAS_WIDTH: u32 = 24;

/// Height of a group header row.
pub const GROUP_HEADER_HEIGHT: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridPos {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// A position with only the size set, as produced by panel builders.
    pub fn sized(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn overlaps_horizontally(&self, other: &GridPos) -> bool {
        self.x < other.right() && other.x < self.right()
    }
}
