//! Grid cell coordinates.
//!
//! The world model (tile solidity, bounds, who stands where) lives outside
//! this workspace.  `Cell` is only the shared coordinate vocabulary that the
//! position store and movement policies speak.

/// Offsets of the four orthogonal neighbours, in N, E, S, W order.
const DIRS4: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Offsets of all eight neighbours, clockwise from N.
const DIRS8: [(i32, i32); 8] = [
    (0, -1), (1, -1), (1, 0), (1, 1),
    (0, 1), (-1, 1), (-1, 0), (-1, -1),
];

/// An integer grid coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonally adjacent cells (N, E, S, W).
    pub fn neighbours4(self) -> impl Iterator<Item = Cell> {
        DIRS4.into_iter().map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// All eight adjacent cells, clockwise from N.
    pub fn neighbours8(self) -> impl Iterator<Item = Cell> {
        DIRS8.into_iter().map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Chebyshev (king-move) distance.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Manhattan distance.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if `self` lies inside a `width × height` rectangle anchored at
    /// the origin.
    #[inline]
    pub fn within(self, width: i32, height: i32) -> bool {
        (0..width).contains(&self.x) && (0..height).contains(&self.y)
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
