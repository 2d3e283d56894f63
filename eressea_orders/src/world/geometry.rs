//! Hex map geometry
//!
//! Regions sit on a hex grid addressed by `(x, y)`; `z` selects the plane.
//! The six neighbours of a region are reached through the offsets of
//! [`Direction`].

use crate::grammar::OrderKey;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub z: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }

    pub const fn translate(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z,
        }
    }

    /// Hex distance on the same plane
    pub fn distance(self, other: Coordinate) -> u32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = -dx - dy;
        ((dx.abs() + dy.abs() + dz.abs()) / 2) as u32
    }
}

/// Coordinates as written in orders: `x y`
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "sw")]
    SouthWest,
    #[serde(rename = "w")]
    West,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
    ];

    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::NorthWest => (-1, 1),
            Direction::NorthEast => (0, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
        }
    }

    pub const fn key(self) -> OrderKey {
        match self {
            Direction::NorthWest => OrderKey::NorthWest,
            Direction::NorthEast => OrderKey::NorthEast,
            Direction::East => OrderKey::East,
            Direction::SouthEast => OrderKey::SouthEast,
            Direction::SouthWest => OrderKey::SouthWest,
            Direction::West => OrderKey::West,
        }
    }

    pub const fn from_key(key: OrderKey) -> Option<Direction> {
        match key {
            OrderKey::NorthWest => Some(Direction::NorthWest),
            OrderKey::NorthEast => Some(Direction::NorthEast),
            OrderKey::East => Some(Direction::East),
            OrderKey::SouthEast => Some(Direction::SouthEast),
            OrderKey::SouthWest => Some(Direction::SouthWest),
            OrderKey::West => Some(Direction::West),
            _ => None,
        }
    }
}
