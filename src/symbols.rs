//! Reads a [`symbios`] symbol string as a robot command stream.
//!
//! Register symbol-to-operation mappings via [`SymbolInterpreter::set_op`] or
//! [`SymbolInterpreter::populate_standard_symbols`], then call
//! [`SymbolInterpreter::commands`] with a [`symbios::SymbiosState`]. This lets an
//! L-system grammar generate patrol patterns that the state machine replays.

use crate::command::Command;
use crate::state::Direction;
use symbios::{SymbiosState, SymbolTable};
use tracing::warn;

/// What a symbol means to the robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolOp {
    /// `PLACE`. Params: `(x, y, direction_index)` with `NORTH = 0` clockwise.
    /// Missing params default to `(0, 0, EAST)`.
    Place,
    Move,
    Left,
    Right,
    Report,
    /// Symbol has no registered meaning.
    Ignore,
}

/// Maps symbol IDs to robot commands.
#[derive(Clone, Debug, Default)]
pub struct SymbolInterpreter {
    op_map: Vec<SymbolOp>,
}

impl SymbolInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire symbol-to-operation map (builder pattern).
    ///
    /// `map` is indexed by symbol ID; IDs past its end are [`SymbolOp::Ignore`].
    pub fn with_map(mut self, map: Vec<SymbolOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns `op` to `sym_id`, growing the map with [`SymbolOp::Ignore`] as needed.
    pub fn set_op(&mut self, sym_id: u16, op: SymbolOp) {
        let idx = sym_id as usize;
        if idx >= self.op_map.len() {
            self.op_map.resize(idx + 1, SymbolOp::Ignore);
        }
        self.op_map[idx] = op;
    }

    /// Registers the command keywords and the usual turtle shorthands.
    ///
    /// Symbols missing from `interner` are skipped.
    pub fn populate_standard_symbols(&mut self, interner: &SymbolTable) {
        let mappings = [
            ("PLACE", SymbolOp::Place),
            ("MOVE", SymbolOp::Move),
            ("LEFT", SymbolOp::Left),
            ("RIGHT", SymbolOp::Right),
            ("REPORT", SymbolOp::Report),
            // Turtle shorthand: F/f step, + counter-clockwise, - clockwise.
            ("F", SymbolOp::Move),
            ("f", SymbolOp::Move),
            ("+", SymbolOp::Left),
            ("-", SymbolOp::Right),
        ];

        for (sym, op) in mappings {
            if let Some(id) = interner.resolve_id(sym) {
                self.set_op(id, op);
            }
        }
    }

    /// Walks `state` in order and returns the commands it spells.
    ///
    /// Unmapped symbols are skipped. A `PLACE` whose direction param is not one of
    /// `0..=3` is dropped with a warning.
    pub fn commands(&self, state: &SymbiosState) -> Vec<Command> {
        let mut out = Vec::with_capacity(state.len());
        for i in 0..state.len() {
            let view = match state.get_view(i) {
                Some(v) => v,
                None => break,
            };

            let op = self
                .op_map
                .get(view.sym as usize)
                .unwrap_or(&SymbolOp::Ignore);

            let p = |idx: usize, def: f64| -> f64 {
                view.params.get(idx).map(|&x| x as f64).unwrap_or(def)
            };

            let command = match op {
                SymbolOp::Place => {
                    let x = p(0, 0.0).round() as i32;
                    let y = p(1, 0.0).round() as i32;
                    let index = p(2, Direction::East.index() as f64);
                    if !(0.0..4.0).contains(&index) || index.fract() != 0.0 {
                        warn!(symbol = i, index, "dropping PLACE with invalid direction index");
                        continue;
                    }
                    Command::Place {
                        x,
                        y,
                        direction: Direction::from_index(index as usize),
                    }
                }
                SymbolOp::Move => Command::Move,
                SymbolOp::Left => Command::Left,
                SymbolOp::Right => Command::Right,
                SymbolOp::Report => Command::Report,
                SymbolOp::Ignore => continue,
            };
            out.push(command);
        }
        out
    }
}
