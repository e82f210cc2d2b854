//! Hooks for components that watch the robot without owning it (renderers, tracers).

use crate::state::{Pose, Position, RobotState};

/// Receives the robot state after every committed mutation.
///
/// Called after a successful `PLACE`, `MOVE`, `LEFT` or `RIGHT`. Ignored commands
/// and `REPORT` do not notify.
pub trait StateObserver {
    fn on_state_changed(&mut self, state: &RobotState);
}

/// Records every pose the robot passes through.
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    poses: Vec<Pose>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Distinct consecutive cells visited, collapsing turns in place.
    pub fn cells(&self) -> Vec<Position> {
        let mut out: Vec<Position> = Vec::with_capacity(self.poses.len());
        for pose in &self.poses {
            if out.last() != Some(&pose.position) {
                out.push(pose.position);
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.poses.clear();
    }
}

impl StateObserver for TraceRecorder {
    fn on_state_changed(&mut self, state: &RobotState) {
        if let Some(pose) = state.pose() {
            self.poses.push(pose);
        }
    }
}
