//! Axial hex-grid geometry for the pointy-top board.
//!
//! Coordinates are [`hexx::Hex`] values read as axial `(q, r)` (`x` is `q`,
//! `y` is `r`). Pixel positions are screen-space [`Vec2`]s with `y` pointing
//! down. Projection, rounding and corners go through a pointy [`HexLayout`];
//! the neighbor table and ring walk keep their own fixed order.

use bevy::math::Vec2;
use hexx::{Hex, HexLayout, HexOrientation, shapes};

/// One of the six pointy-top neighbor directions.
///
/// The discriminant is the direction index used throughout the game, so
/// `Direction::East as usize == 0` and opposite directions differ by three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `(+1, 0)`
    East = 0,
    /// `(+1, -1)`
    NorthEast = 1,
    /// `(0, -1)`
    NorthWest = 2,
    /// `(-1, 0)`
    West = 3,
    /// `(-1, +1)`
    SouthWest = 4,
    /// `(0, +1)`
    SouthEast = 5,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Self; 6] = [
        Self::East,
        Self::NorthEast,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Direction index in `0..6`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for an index, wrapping modulo six.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// The direction pointing back the way this one came.
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Axial offset of one step in this direction.
    pub fn offset(self) -> Hex {
        let (q, r) = AXIAL_OFFSETS[self.index()];
        Hex::new(q, r)
    }
}

const AXIAL_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Canonical printable key for a hex, formatted `"q,r"`.
pub fn hex_key(hex: Hex) -> String {
    format!("{},{}", hex.x, hex.y)
}

/// Pointy layout centred on the origin with hexes of circumradius `size`.
///
/// hexx's pointy matrix puts positive `r` at positive `y`, which is already
/// screen-down, so the scale is not flipped.
pub fn layout(size: f32) -> HexLayout {
    HexLayout {
        orientation: HexOrientation::Pointy,
        origin: Vec2::ZERO,
        scale: Vec2::splat(size),
    }
}

/// Pointy-top projection of a hex centre.
///
/// `x = size·(√3·q + √3/2·r)`, `y = size·(3/2·r)`.
pub fn hex_to_pixel(hex: Hex, size: f32) -> Vec2 {
    layout(size).hex_to_world_pos(hex)
}

/// Inverse projection, rounded to the nearest hex.
pub fn pixel_to_hex(pixel: Vec2, size: f32) -> Hex {
    layout(size).world_pos_to_hex(pixel)
}

/// Neighbor of `hex` in direction index `direction` (taken modulo six).
///
/// Index order is East, NE, NW, West, SW, SE.
pub fn hex_neighbor(hex: Hex, direction: usize) -> Hex {
    let offset = Direction::from_index(direction).offset();
    Hex::new(hex.x + offset.x, hex.y + offset.y)
}

/// Hex distance `(|Δq| + |Δq+Δr| + |Δr|) / 2`.
pub fn hex_distance(a: Hex, b: Hex) -> u32 {
    a.distance_to(b).unsigned_abs()
}

/// Whether `hex` lies within `radius` steps of the origin.
pub fn in_bounds(hex: Hex, radius: u32) -> bool {
    hex_distance(Hex::ZERO, hex) <= radius
}

/// The `6·radius` hexes exactly `radius` steps from `center`.
///
/// Starts `radius` steps out along SW and walks the six directions in index
/// order. Radius zero yields just `center`.
pub fn hex_ring(center: Hex, radius: u32) -> Vec<Hex> {
    if radius == 0 {
        return vec![center];
    }
    let steps = radius as i32;
    let sw = Direction::SouthWest.offset();
    let mut hex = Hex::new(center.x + sw.x * steps, center.y + sw.y * steps);
    let mut ring = Vec::with_capacity(6 * radius as usize);
    for direction in Direction::ALL {
        for _ in 0..radius {
            ring.push(hex);
            hex = hex_neighbor(hex, direction.index());
        }
    }
    ring
}

/// Every hex within `radius` steps of `center`, `3·r·(r+1)+1` in total.
pub fn hexes_in_range(center: Hex, radius: u32) -> Vec<Hex> {
    shapes::hexagon(center, radius).collect()
}

/// Six corner points around a pixel centre, first at −30°, 60° apart.
pub fn hex_corners(center: Vec2, size: f32) -> [Vec2; 6] {
    layout(size).center_aligned_hex_corners().map(|c| center + c)
}
