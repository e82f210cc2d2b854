//! Robot state and direction arithmetic on the grid.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RobotError;

/// A grid cell. `x` grows to the EAST, `y` grows to the NORTH.
pub type Position = IVec2;

/// Compass heading of the robot.
///
/// The variants are cyclically ordered: turning left steps one index back,
/// turning right steps one index forward (modulo 4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four headings in rotation order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Position of this heading in the 4-cycle (`NORTH = 0`).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Heading at `index`, wrapping around the cycle.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Rotates 90 degrees counter-clockwise.
    pub fn left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Rotates 90 degrees clockwise.
    pub fn right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The opposite heading.
    pub fn reverse(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Unit step taken by a `MOVE` while facing this way.
    pub fn forward(self) -> IVec2 {
        match self {
            Direction::North => IVec2::Y,
            Direction::East => IVec2::X,
            Direction::South => IVec2::NEG_Y,
            Direction::West => IVec2::NEG_X,
        }
    }

    /// Text token used by the command language.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::East => "EAST",
            Direction::South => "SOUTH",
            Direction::West => "WEST",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = RobotError;

    /// Tokens are matched exactly (`"EAST"`, not `"east"`), as the command language is upper-case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| RobotError::InvalidDirectionToken(s.to_string()))
    }
}

/// Snapshot of the robot handed to observers and reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Position,
    pub direction: Direction,
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.position.x, self.position.y, self.direction)
    }
}

/// The state owned by a [`RobotStateMachine`](crate::RobotStateMachine).
///
/// Until the first successful `PLACE`, `position` and `direction` are `None` and
/// `placed` is false. Once placed, the robot never becomes unplaced again.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotState {
    /// Current cell, absent before placement.
    pub position: Option<Position>,

    /// Current heading, absent before placement.
    pub direction: Option<Direction>,

    /// Whether a `PLACE` has ever succeeded.
    pub placed: bool,

    /// Zero-based index of the command currently being processed.
    pub step_counter: usize,
}

impl RobotState {
    /// Returns the current pose, or `None` while unplaced.
    pub fn pose(&self) -> Option<Pose> {
        match (self.placed, self.position, self.direction) {
            (true, Some(position), Some(direction)) => Some(Pose {
                position,
                direction,
            }),
            _ => None,
        }
    }
}
