//! Grid geometry: facing directions, offset vectors and tile coordinates.

use serde::{Deserialize, Serialize};

use crate::entities::IslandId;

/// The eight compass directions an actor can face.
///
/// The grid's y axis grows southwards, so `North` steps to `y - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Every direction, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The unit offset of one step in this direction.
    pub const fn vector(self) -> DirectionVector {
        let (dx, dy) = match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        };
        DirectionVector { dx, dy }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

/// Immutable `{dx, dy}` offset for a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectionVector {
    pub dx: i32,
    pub dy: i32,
}

/// A tile coordinate. `z` selects the layer (surface, cave).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// One step in `direction`, on the same layer.
    ///
    /// `None` when the step leaves the `i32` coordinate range.
    pub fn step(self, direction: Direction) -> Option<Point> {
        let v = direction.vector();
        Some(Point::new(
            self.x.checked_add(v.dx)?,
            self.y.checked_add(v.dy)?,
            self.z,
        ))
    }

    /// The tile one step behind an actor that stood here facing `direction`.
    ///
    /// Computed as `self - vector(direction)` on the same layer, or `None`
    /// when that leaves the coordinate range.
    pub fn behind(self, direction: Direction) -> Option<Point> {
        let v = direction.vector();
        Some(Point::new(
            self.x.checked_sub(v.dx)?,
            self.y.checked_sub(v.dy)?,
            self.z,
        ))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A coordinate scoped to the island that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    pub island: IslandId,
    pub point: Point,
}

impl TileRef {
    pub fn new(island: IslandId, point: Point) -> Self {
        Self { island, point }
    }
}

impl std::fmt::Display for TileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.point, self.island)
    }
}
