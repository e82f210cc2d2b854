//! Translates a route of grid cells into the command stream that drives the robot along it.
//!
//! Each step between consecutive waypoints is classified against the robot's current
//! heading and emitted with the fewest turns possible:
//!
//! | delta vs. heading | commands               |
//! |-------------------|------------------------|
//! | forward           | `MOVE`                 |
//! | right of heading  | `RIGHT MOVE`           |
//! | left of heading   | `LEFT MOVE`            |
//! | behind            | `LEFT LEFT MOVE`       |
//!
//! Anything else (diagonal, longer than one cell, or standing still) aborts the whole
//! compilation, since a guessed command would desynchronise the robot from the route.

use crate::command::Command;
use crate::error::RouteError;
use crate::route::Route;
use crate::state::{Direction, Position};
use glam::IVec2;
use tracing::{debug, error};

/// How one route step is reached from the current heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepPlan {
    Forward,
    TurnRight,
    TurnLeft,
    TurnAround,
}

impl StepPlan {
    /// Classifies the step `from -> to` for a robot facing `heading`.
    ///
    /// Returns `None` when the two cells are not orthogonal neighbours, including
    /// cells so far apart that their offset does not fit in an `i32`.
    pub fn classify(heading: Direction, from: Position, to: Position) -> Option<Self> {
        let delta = IVec2::new(to.x.checked_sub(from.x)?, to.y.checked_sub(from.y)?);
        if delta == heading.forward() {
            Some(StepPlan::Forward)
        } else if delta == heading.right().forward() {
            Some(StepPlan::TurnRight)
        } else if delta == heading.left().forward() {
            Some(StepPlan::TurnLeft)
        } else if delta == heading.reverse().forward() {
            Some(StepPlan::TurnAround)
        } else {
            None
        }
    }

    /// Turn commands preceding the `MOVE`.
    pub fn turns(self) -> &'static [Command] {
        match self {
            StepPlan::Forward => &[],
            StepPlan::TurnRight => &[Command::Right],
            StepPlan::TurnLeft => &[Command::Left],
            StepPlan::TurnAround => &[Command::Left, Command::Left],
        }
    }

    /// Heading after the turns have been applied.
    pub fn heading_after(self, heading: Direction) -> Direction {
        match self {
            StepPlan::Forward => heading,
            StepPlan::TurnRight => heading.right(),
            StepPlan::TurnLeft => heading.left(),
            StepPlan::TurnAround => heading.reverse(),
        }
    }
}

/// Output of a successful compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledRoute {
    pub commands: Vec<Command>,
    /// Heading the robot ends with after replaying `commands`.
    pub final_direction: Direction,
    /// Cell the robot ends on.
    pub final_position: Position,
}

/// Stateless compiler from routes to command streams.
#[derive(Clone, Copy, Debug)]
pub struct RouteCompiler {
    initial_direction: Direction,
}

impl Default for RouteCompiler {
    fn default() -> Self {
        Self::new(Direction::East)
    }
}

impl RouteCompiler {
    /// A compiler that places the robot facing `initial_direction`.
    pub fn new(initial_direction: Direction) -> Self {
        Self { initial_direction }
    }

    pub fn initial_direction(&self) -> Direction {
        self.initial_direction
    }

    /// Compiles `route` into `PLACE` followed by turns and moves, one `MOVE` per step.
    ///
    /// The output is fully determined by the route and the initial heading.
    pub fn compile(&self, route: &Route) -> Result<CompiledRoute, RouteError> {
        let cells = route.cells();
        let start = route.start();

        let mut heading = self.initial_direction;
        let mut commands = Vec::with_capacity(cells.len() * 2);
        commands.push(Command::Place {
            x: start.x,
            y: start.y,
            direction: heading,
        });

        for (i, pair) in cells.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            let Some(plan) = StepPlan::classify(heading, from, to) else {
                error!(index = i + 1, %from, %to, "route step is not a unit move");
                return Err(RouteError::InvalidRouteStep {
                    index: i + 1,
                    from,
                    to,
                });
            };
            commands.extend_from_slice(plan.turns());
            commands.push(Command::Move);
            heading = plan.heading_after(heading);
        }

        let final_position = route.end();
        debug!(
            waypoints = cells.len(),
            commands = commands.len(),
            %final_position,
            %heading,
            "compiled route"
        );

        Ok(CompiledRoute {
            commands,
            final_direction: heading,
            final_position,
        })
    }
}

/// Compiles `route` starting with `initial_direction`; see [`RouteCompiler::compile`].
pub fn compile_route(
    route: &Route,
    initial_direction: Direction,
) -> Result<Vec<Command>, RouteError> {
    RouteCompiler::new(initial_direction)
        .compile(route)
        .map(|compiled| compiled.commands)
}
