//! Error types for the robot, the command parser and the route pipeline.

use crate::state::Position;

/// A command the state machine refused to apply.
///
/// None of these are fatal: the robot stays where it was and the caller decides
/// whether to surface the diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RobotError {
    #[error("target cell {x},{y} is outside the table")]
    OutOfBounds { x: i32, y: i32 },
    #[error("unrecognised direction token {0:?}")]
    InvalidDirectionToken(String),
    #[error("{command} ignored: the robot has not been placed yet")]
    SequenceViolation { command: String },
}

/// Failure to turn a line of text into a [`Command`](crate::Command).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("malformed PLACE arguments {0:?}, expected x,y,DIRECTION")]
    MalformedPlace(String),
    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(String),
    #[error(transparent)]
    InvalidDirection(#[from] RobotError),
}

/// A route the compiler cannot translate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route has no waypoints")]
    EmptyRoute,
    #[error("waypoint {index}: step {from} -> {to} is not a single axis-aligned move")]
    InvalidRouteStep {
        index: usize,
        from: Position,
        to: Position,
    },
}

/// A route solver could not produce a tour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("start cell {0} is blocked or outside the grid")]
    StartBlocked(Position),
    #[error("grid has no free cells")]
    NoFreeCells,
    #[error("unsupported grid: {0}")]
    Unsupported(String),
}

/// Failure to load a [`RobotConfig`](crate::RobotConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid grid {length}x{width}: both dimensions must be at least 1")]
    InvalidGrid { length: u32, width: u32 },
    #[error("invalid grid {length}x{width}: dimensions may not exceed {max}", max = i32::MAX)]
    GridTooLarge { length: u32, width: u32 },
}
