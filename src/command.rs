//! The primitive instruction set and its text form.
//!
//! Commands are written one per line:
//!
//! ```text
//! PLACE 1,2,EAST
//! MOVE
//! LEFT
//! RIGHT
//! REPORT
//! ```

use crate::error::ParseError;
use crate::state::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One primitive robot instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Put the robot on the table at `(x, y)` facing `direction`.
    Place { x: i32, y: i32, direction: Direction },
    /// Advance one cell in the facing direction.
    Move,
    /// Rotate 90 degrees counter-clockwise.
    Left,
    /// Rotate 90 degrees clockwise.
    Right,
    /// Announce the current pose.
    Report,
}

impl Command {
    /// Keyword used in text and diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Place { .. } => "PLACE",
            Command::Move => "MOVE",
            Command::Left => "LEFT",
            Command::Right => "RIGHT",
            Command::Report => "REPORT",
        }
    }

    /// Parses the bare argument form of a placement, `x,y,DIRECTION`.
    pub fn parse_place_args(args: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let [x, y, direction] = parts.as_slice() else {
            return Err(ParseError::MalformedPlace(args.to_string()));
        };
        let x = x
            .parse()
            .map_err(|_| ParseError::InvalidCoordinate(x.to_string()))?;
        let y = y
            .parse()
            .map_err(|_| ParseError::InvalidCoordinate(y.to_string()))?;
        let direction = direction.parse()?;
        Ok(Command::Place { x, y, direction })
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        if let Some(args) = line.strip_prefix("PLACE ") {
            return Self::parse_place_args(args);
        }
        match line {
            "MOVE" => Ok(Command::Move),
            "LEFT" => Ok(Command::Left),
            "RIGHT" => Ok(Command::Right),
            "REPORT" => Ok(Command::Report),
            "PLACE" => Err(ParseError::MalformedPlace(String::new())),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Place { x, y, direction } => write!(f, "PLACE {x},{y},{direction}"),
            other => f.write_str(other.keyword()),
        }
    }
}

/// Parses a multi-line script.
///
/// Blank lines and lines starting with `#` are skipped. Each entry keeps its 1-based
/// line number and trimmed source text so callers can point at the offending line.
pub fn parse_script(text: &str) -> Vec<(usize, &str, Result<Command, ParseError>)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| (line_no, line, line.parse()))
        .collect()
}
