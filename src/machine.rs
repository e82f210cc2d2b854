//! The robot state machine: applies one command at a time against a bounded table.
//!
//! The entry point is [`RobotStateMachine`]. Configure it with a [`RobotConfig`],
//! optionally attach a [`StateObserver`], then feed it commands through
//! [`RobotStateMachine::apply`] or a whole list through [`RobotStateMachine::run`].

use crate::command::{Command, parse_script};
use crate::error::{ConfigError, ParseError, RobotError};
use crate::observer::StateObserver;
use crate::state::{Direction, Pose, Position, RobotState};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for the table and the route compiler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Number of columns (valid `x` is `0..length`).
    pub length: u32,
    /// Number of rows (valid `y` is `0..width`).
    pub width: u32,
    /// Heading the route compiler places the robot with.
    pub initial_direction: Direction,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            length: 5,
            width: 5,
            initial_direction: Direction::East,
        }
    }
}

impl RobotConfig {
    pub fn with_grid(length: u32, width: u32) -> Self {
        Self {
            length,
            width,
            ..Default::default()
        }
    }

    /// Rejects tables the robot could never be placed on, and tables whose far
    /// edge has no `i32` coordinate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.length == 0 || self.width == 0 {
            return Err(ConfigError::InvalidGrid {
                length: self.length,
                width: self.width,
            });
        }
        if self.length > i32::MAX as u32 || self.width > i32::MAX as u32 {
            return Err(ConfigError::GridTooLarge {
                length: self.length,
                width: self.width,
            });
        }
        Ok(())
    }

    /// Whether `cell` lies on the table.
    pub fn contains(&self, cell: Position) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.length && (cell.y as u32) < self.width
    }
}

/// What happened to a single command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The state changed (or a turn was applied).
    Applied,
    /// A `REPORT` produced the current pose.
    Reported(Pose),
    /// The command was a no-op; the state is unchanged.
    Ignored(RobotError),
}

/// Why a scripted line did not take effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    Rejected(RobotError),
    Unparsed(ParseError),
}

/// A non-fatal event raised while running a command list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based position of the command in the stream.
    pub step: usize,
    /// The command (or raw line) that was ignored.
    pub command: String,
    pub kind: DiagnosticKind,
}

/// Everything a run produced besides the state change itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reports: Vec<Pose>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Holds the robot's state and applies commands with grid-bound validation.
///
/// The machine never enters an invalid state: every rejected command leaves the
/// state exactly as it was. Observers are notified after each committed change.
pub struct RobotStateMachine<O = ()> {
    config: RobotConfig,
    state: RobotState,
    observer: O,
}

impl RobotStateMachine {
    /// Creates an unplaced robot on a `config.length x config.width` table.
    pub fn new(config: RobotConfig) -> Self {
        Self::with_observer(config, ())
    }
}

impl Default for RobotStateMachine {
    fn default() -> Self {
        Self::new(RobotConfig::default())
    }
}

impl<O: StateObserver> RobotStateMachine<O> {
    /// Creates an unplaced robot that reports every state change to `observer`.
    pub fn with_observer(config: RobotConfig, observer: O) -> Self {
        Self {
            config,
            state: RobotState::default(),
            observer,
        }
    }

    /// Builds a fresh, unplaced machine on a table of a different size, keeping the observer.
    pub fn resized(self, length: u32, width: u32) -> Self {
        let config = RobotConfig {
            length,
            width,
            ..self.config
        };
        Self::with_observer(config, self.observer)
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    pub fn state(&self) -> &RobotState {
        &self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn is_placed(&self) -> bool {
        self.state.placed
    }

    /// Puts the robot at `(x, y)` facing `direction`.
    ///
    /// This is the only command accepted before the robot is placed. An off-table
    /// target is rejected and leaves the robot where it was (or unplaced).
    pub fn place(&mut self, x: i32, y: i32, direction: Direction) -> Result<(), RobotError> {
        let cell = Position::new(x, y);
        if !self.config.contains(cell) {
            return Err(RobotError::OutOfBounds { x, y });
        }
        self.state.position = Some(cell);
        self.state.direction = Some(direction);
        self.state.placed = true;
        debug!(x, y, %direction, "placed");
        self.notify();
        Ok(())
    }

    /// Like [`place`](Self::place), but takes the heading as a text token.
    pub fn place_token(&mut self, x: i32, y: i32, token: &str) -> Result<(), RobotError> {
        let direction = token.parse()?;
        self.place(x, y, direction)
    }

    /// Steps one cell forward. Moving off the table is a no-op.
    pub fn move_forward(&mut self) -> Result<(), RobotError> {
        let pose = self.require_pose("MOVE")?;
        let step = pose.direction.forward();
        let target = pose
            .position
            .x
            .checked_add(step.x)
            .zip(pose.position.y.checked_add(step.y))
            .map(|(x, y)| Position::new(x, y))
            .filter(|&cell| self.config.contains(cell));
        let Some(target) = target else {
            return Err(RobotError::OutOfBounds {
                x: pose.position.x.saturating_add(step.x),
                y: pose.position.y.saturating_add(step.y),
            });
        };
        self.state.position = Some(target);
        debug!(from = %pose.position, to = %target, "moved");
        self.notify();
        Ok(())
    }

    pub fn turn_left(&mut self) -> Result<(), RobotError> {
        let pose = self.require_pose("LEFT")?;
        self.turn(pose.direction, pose.direction.left());
        Ok(())
    }

    pub fn turn_right(&mut self) -> Result<(), RobotError> {
        let pose = self.require_pose("RIGHT")?;
        self.turn(pose.direction, pose.direction.right());
        Ok(())
    }

    /// Current pose, or `None` before the first successful placement.
    pub fn report(&self) -> Option<Pose> {
        self.state.pose()
    }

    /// Applies one command and advances the step counter.
    ///
    /// Rejections are logged as warnings and returned as [`Outcome::Ignored`].
    pub fn apply(&mut self, command: Command) -> Outcome {
        let result = match command {
            Command::Place { x, y, direction } => self.place(x, y, direction).map(|_| None),
            _ if !self.state.placed => Err(RobotError::SequenceViolation {
                command: command.keyword().to_string(),
            }),
            Command::Move => self.move_forward().map(|_| None),
            Command::Left => self.turn_left().map(|_| None),
            Command::Right => self.turn_right().map(|_| None),
            Command::Report => Ok(self.report()),
        };

        let step = self.state.step_counter + 1;
        self.state.step_counter += 1;

        match result {
            Ok(Some(pose)) => Outcome::Reported(pose),
            Ok(None) => Outcome::Applied,
            Err(err) => {
                warn!(step, command = %command, "ignoring command: {err}");
                Outcome::Ignored(err)
            }
        }
    }

    /// Applies every command in order and collects reports and diagnostics.
    pub fn run<I>(&mut self, commands: I) -> RunSummary
    where
        I: IntoIterator<Item = Command>,
    {
        let mut summary = RunSummary::default();
        for command in commands {
            let step = self.state.step_counter + 1;
            self.record(&mut summary, step, command);
        }
        summary
    }

    /// Parses and runs a text script, one command per line.
    ///
    /// Lines that fail to parse still count as a step and are reported as diagnostics.
    /// A `PLACE` with an unknown heading is reported as a rejected placement.
    pub fn run_script(&mut self, text: &str) -> RunSummary {
        let mut summary = RunSummary::default();
        for (line_no, raw, parsed) in parse_script(text) {
            let step = self.state.step_counter + 1;
            match parsed {
                Ok(command) => self.record(&mut summary, step, command),
                Err(err) => {
                    self.state.step_counter += 1;
                    warn!(step, line = line_no, "ignoring unparsable command {raw:?}: {err}");
                    let kind = match err {
                        ParseError::InvalidDirection(rejected) => {
                            DiagnosticKind::Rejected(rejected)
                        }
                        other => DiagnosticKind::Unparsed(other),
                    };
                    summary.diagnostics.push(Diagnostic {
                        step,
                        command: raw.to_string(),
                        kind,
                    });
                }
            }
        }
        summary
    }

    fn record(&mut self, summary: &mut RunSummary, step: usize, command: Command) {
        match self.apply(command) {
            Outcome::Applied => {}
            Outcome::Reported(pose) => summary.reports.push(pose),
            Outcome::Ignored(err) => summary.diagnostics.push(Diagnostic {
                step,
                command: command.to_string(),
                kind: DiagnosticKind::Rejected(err),
            }),
        }
    }

    fn require_pose(&self, command: &str) -> Result<Pose, RobotError> {
        self.state
            .pose()
            .ok_or_else(|| RobotError::SequenceViolation {
                command: command.to_string(),
            })
    }

    fn turn(&mut self, from: Direction, to: Direction) {
        self.state.direction = Some(to);
        debug!(%from, %to, "turned");
        self.notify();
    }

    fn notify(&mut self) {
        self.observer.on_state_changed(&self.state);
    }
}

impl StateObserver for () {
    fn on_state_changed(&mut self, _state: &RobotState) {}
}
