//! # grid-robot
//!
//! A discrete robot on a bounded rectangular table, and a compiler that turns a route of
//! grid cells into the `PLACE` / `MOVE` / `LEFT` / `RIGHT` stream that drives it there.
//!
//! The [`RobotStateMachine`] owns position, heading and placement, and applies one
//! [`Command`] at a time without ever leaving the table. The [`RouteCompiler`] is a pure
//! function from a [`Route`] and a starting heading to a command list with the fewest
//! turns per step. Which cells a route visits is decided by a pluggable [`RouteSolver`].

pub mod command;
pub mod compiler;
pub mod config;
pub mod error;
pub mod machine;
pub mod observer;
pub mod route;
pub mod state;
pub mod symbols;

pub use command::*;
pub use compiler::*;
pub use config::*;
pub use error::*;
pub use machine::*;
pub use observer::*;
pub use route::*;
pub use state::*;
pub use symbols::*;
