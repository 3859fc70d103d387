use pathgrid_core::{Coord, Walls};
use pathgrid_search::Membership;

/// Read-only snapshot of one cell, as a renderer needs it each frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellView {
    pub coord: Coord,
    pub blocked: bool,
    pub walls: Walls,
    pub membership: Membership,
    /// Whether the cell lies on the reconstructed path.
    pub on_path: bool,
}
