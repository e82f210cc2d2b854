//! Routes, occupancy grids and the solver seam that turns one into the other.
//!
//! Choosing *which* cells to visit is delegated to a [`RouteSolver`]. The rest of the
//! crate only ever sees the resulting [`Route`].

use crate::error::{RouteError, SolveError};
use crate::state::Position;
use serde::{Deserialize, Serialize};

/// An ordered, non-empty list of cells to visit. Index 0 is where the robot starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct Route {
    cells: Vec<Position>,
}

impl Route {
    /// A route consisting of the start cell only.
    pub fn new(start: Position) -> Self {
        Self { cells: vec![start] }
    }

    /// Builds a route from `(x, y)` pairs.
    pub fn from_points(points: &[(i32, i32)]) -> Result<Self, RouteError> {
        Self::try_from(
            points
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect::<Vec<_>>(),
        )
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn start(&self) -> Position {
        self.cells[0]
    }

    pub fn end(&self) -> Position {
        self.cells[self.cells.len() - 1]
    }

    pub fn waypoint_count(&self) -> usize {
        self.cells.len()
    }

    /// Appends `cell` unless it repeats the last waypoint.
    pub fn push(&mut self, cell: Position) {
        if self.end() != cell {
            self.cells.push(cell);
        }
    }
}

impl TryFrom<Vec<Position>> for Route {
    type Error = RouteError;

    fn try_from(cells: Vec<Position>) -> Result<Self, Self::Error> {
        if cells.is_empty() {
            return Err(RouteError::EmptyRoute);
        }
        Ok(Self { cells })
    }
}

impl From<Route> for Vec<Position> {
    fn from(route: Route) -> Self {
        route.cells
    }
}

/// Free/blocked map of the table plus the cell a tour starts from.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    length: i32,
    width: i32,
    blocked: Vec<bool>,
    start: Position,
}

impl OccupancyGrid {
    /// An all-free grid of `length` columns and `width` rows, starting at the origin.
    ///
    /// Dimensions are capped at `i32::MAX` so every cell stays addressable.
    pub fn new(length: u32, width: u32) -> Self {
        let length = i32::try_from(length).unwrap_or(i32::MAX);
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        Self {
            length,
            width,
            blocked: vec![false; length as usize * width as usize],
            start: Position::ZERO,
        }
    }

    /// Builds a grid from rows of markers, `rows[y][x]`.
    ///
    /// Negative values are blocked cells, zero is free, and the first positive value
    /// marks the start. Without a positive marker the start is the origin. Rows shorter
    /// than the first one are padded with free cells.
    pub fn from_rows(rows: &[Vec<i32>]) -> Self {
        let width = rows.len() as u32;
        let length = rows.first().map_or(0, |row| row.len()) as u32;
        let mut grid = Self::new(length, width);
        let mut start = None;
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate().take(length as usize) {
                let cell = Position::new(x as i32, y as i32);
                if value < 0 {
                    grid.set_blocked(cell, true);
                } else if value > 0 && start.is_none() {
                    start = Some(cell);
                }
            }
        }
        grid.start = start.unwrap_or(Position::ZERO);
        grid
    }

    pub fn with_start(mut self, start: Position) -> Self {
        self.start = start;
        self
    }

    pub fn length(&self) -> u32 {
        self.length as u32
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn set_blocked(&mut self, cell: Position, blocked: bool) {
        if let Some(idx) = self.idx(cell) {
            self.blocked[idx] = blocked;
        }
    }

    /// Off-grid cells count as blocked.
    pub fn is_blocked(&self, cell: Position) -> bool {
        self.idx(cell).map(|idx| self.blocked[idx]).unwrap_or(true)
    }

    pub fn in_bounds(&self, cell: Position) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.length && cell.y < self.width
    }

    /// Every free cell in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width)
            .flat_map(move |y| (0..self.length).map(move |x| Position::new(x, y)))
            .filter(move |&cell| !self.is_blocked(cell))
    }

    fn idx(&self, cell: Position) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(cell.y as usize * self.length as usize + cell.x as usize)
    }
}

/// Produces a tour over the free cells of a grid.
///
/// Implementations may be anything from a hand-written sweep to an external
/// combinatorial optimiser; callers only depend on the returned [`Route`].
pub trait RouteSolver {
    fn solve(&self, grid: &OccupancyGrid) -> Result<Route, SolveError>;
}

/// Boustrophedon sweep for obstacle-free grids.
///
/// From the start cell it heads west to column 0, then south to row 0, then sweeps
/// the rows alternately east and west. Every cell is covered; cells on the approach
/// are visited twice.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerpentineSolver;

impl RouteSolver for SerpentineSolver {
    fn solve(&self, grid: &OccupancyGrid) -> Result<Route, SolveError> {
        if grid.free_cells().next().is_none() {
            return Err(SolveError::NoFreeCells);
        }
        let start = grid.start();
        if grid.is_blocked(start) {
            return Err(SolveError::StartBlocked(start));
        }
        if grid.free_cells().count() != grid.length() as usize * grid.width() as usize {
            return Err(SolveError::Unsupported(
                "serpentine sweep requires a grid without blocked cells".to_string(),
            ));
        }

        let mut route = Route::new(start);
        for x in (0..start.x).rev() {
            route.push(Position::new(x, start.y));
        }
        for y in (0..start.y).rev() {
            route.push(Position::new(0, y));
        }

        let length = grid.length() as i32;
        for y in 0..grid.width() as i32 {
            if y % 2 == 0 {
                (0..length).for_each(|x| route.push(Position::new(x, y)));
            } else {
                (0..length).rev().for_each(|x| route.push(Position::new(x, y)));
            }
        }
        Ok(route)
    }
}
