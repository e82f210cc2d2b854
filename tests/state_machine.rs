use grid_robot::{
    Command, DiagnosticKind, Direction, Outcome, ParseError, Pose, Position, RobotConfig,
    RobotError, RobotState, RobotStateMachine, StateObserver, TraceRecorder,
};

fn placed_at(x: i32, y: i32, direction: Direction) -> RobotStateMachine {
    let mut robot = RobotStateMachine::default();
    robot.place(x, y, direction).expect("placement should be on the table");
    robot
}

#[test]
fn test_place_then_report_round_trips_every_cell() {
    let config = RobotConfig::with_grid(4, 3);
    for x in 0..4 {
        for y in 0..3 {
            for direction in Direction::ALL {
                let mut robot = RobotStateMachine::new(config.clone());
                robot.place(x, y, direction).unwrap();
                assert_eq!(
                    robot.report(),
                    Some(Pose {
                        position: Position::new(x, y),
                        direction,
                    })
                );
            }
        }
    }
}

#[test]
fn test_out_of_bounds_place_leaves_state_unchanged() {
    let mut robot = RobotStateMachine::default();
    for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 5), (7, 9)] {
        let before = robot.state().clone();
        assert_eq!(
            robot.place(x, y, Direction::North),
            Err(RobotError::OutOfBounds { x, y })
        );
        assert_eq!(robot.state(), &before);
        assert_eq!(robot.report(), None);
    }

    let mut robot = placed_at(2, 2, Direction::South);
    let before = robot.report();
    assert!(robot.place(5, 5, Direction::West).is_err());
    assert_eq!(robot.report(), before);
    assert!(robot.is_placed());
}

#[test]
fn test_replacing_updates_pose() {
    let mut robot = placed_at(0, 0, Direction::North);
    robot.place(3, 1, Direction::West).unwrap();
    assert_eq!(
        robot.report(),
        Some(Pose {
            position: Position::new(3, 1),
            direction: Direction::West,
        })
    );
}

#[test]
fn test_invalid_direction_token_is_rejected() {
    let mut robot = RobotStateMachine::default();
    assert_eq!(
        robot.place_token(1, 1, "UP"),
        Err(RobotError::InvalidDirectionToken("UP".to_string()))
    );
    assert!(!robot.is_placed());

    robot.place_token(1, 1, "SOUTH").unwrap();
    assert_eq!(robot.state().direction, Some(Direction::South));
}

#[test]
fn test_left_and_right_are_inverse() {
    for direction in Direction::ALL {
        let mut robot = placed_at(1, 1, direction);
        robot.turn_left().unwrap();
        robot.turn_right().unwrap();
        assert_eq!(robot.state().direction, Some(direction));

        robot.turn_right().unwrap();
        robot.turn_left().unwrap();
        assert_eq!(robot.state().direction, Some(direction));
    }
}

#[test]
fn test_four_turns_make_a_full_cycle() {
    for direction in Direction::ALL {
        let mut robot = placed_at(1, 1, direction);
        for _ in 0..4 {
            robot.turn_left().unwrap();
        }
        assert_eq!(robot.state().direction, Some(direction));

        for _ in 0..4 {
            robot.turn_right().unwrap();
        }
        assert_eq!(robot.state().direction, Some(direction));
    }
}

#[test]
fn test_turns_before_place_are_sequence_violations() {
    let mut robot = RobotStateMachine::default();
    assert!(matches!(
        robot.turn_left(),
        Err(RobotError::SequenceViolation { .. })
    ));
    assert!(matches!(
        robot.turn_right(),
        Err(RobotError::SequenceViolation { .. })
    ));
    assert_eq!(robot.state(), &RobotState::default());
}

#[test]
fn test_moving_off_any_edge_is_a_no_op() {
    let edges = [
        (2, 4, Direction::North),
        (4, 2, Direction::East),
        (2, 0, Direction::South),
        (0, 2, Direction::West),
    ];
    for (x, y, direction) in edges {
        let mut robot = placed_at(x, y, direction);
        let before = robot.report();
        assert!(matches!(
            robot.move_forward(),
            Err(RobotError::OutOfBounds { .. })
        ));
        assert_eq!(robot.report(), before);
    }
}

#[test]
fn test_moving_past_the_last_i32_column_is_a_no_op() {
    // Built without validation, so the table reaches past i32::MAX.
    let mut robot = RobotStateMachine::new(RobotConfig::with_grid(u32::MAX, 1));
    robot.place(i32::MAX, 0, Direction::East).unwrap();

    assert_eq!(
        robot.apply(Command::Move),
        Outcome::Ignored(RobotError::OutOfBounds { x: i32::MAX, y: 0 })
    );
    assert_eq!(
        robot.report(),
        Some(Pose {
            position: Position::new(i32::MAX, 0),
            direction: Direction::East,
        })
    );
}

#[test]
fn test_move_follows_heading() {
    let cases = [
        (Direction::North, Position::new(2, 3)),
        (Direction::East, Position::new(3, 2)),
        (Direction::South, Position::new(2, 1)),
        (Direction::West, Position::new(1, 2)),
    ];
    for (direction, expected) in cases {
        let mut robot = placed_at(2, 2, direction);
        robot.move_forward().unwrap();
        assert_eq!(robot.state().position, Some(expected));
    }
}

#[test]
fn test_diagnostics_carry_one_based_steps() {
    let mut robot = RobotStateMachine::default();
    let summary = robot.run([
        Command::Move,
        Command::Place {
            x: 0,
            y: 0,
            direction: Direction::South,
        },
        Command::Move,
        Command::Report,
    ]);

    let steps: Vec<usize> = summary.diagnostics.iter().map(|d| d.step).collect();
    assert_eq!(steps, vec![1, 3]);
    assert_eq!(summary.diagnostics[1].command, "MOVE");
    assert_eq!(robot.state().step_counter, 4);
    assert_eq!(summary.reports.len(), 1);
}

#[test]
fn test_script_reports_unparsable_lines_and_keeps_going() {
    let mut robot = RobotStateMachine::default();
    let script = "\
# comment lines are skipped
PLACE 1,1,UP
JUMP
PLACE 1,1,NORTH

MOVE
REPORT
";
    let summary = robot.run_script(script);

    assert_eq!(summary.diagnostics.len(), 2);
    assert_eq!(summary.diagnostics[0].step, 1);
    assert_eq!(
        summary.diagnostics[0].kind,
        DiagnosticKind::Rejected(RobotError::InvalidDirectionToken("UP".to_string()))
    );
    assert_eq!(summary.diagnostics[1].command, "JUMP");
    assert_eq!(
        summary.diagnostics[1].kind,
        DiagnosticKind::Unparsed(ParseError::UnknownCommand("JUMP".to_string()))
    );
    assert_eq!(
        summary.reports,
        vec![Pose {
            position: Position::new(1, 2),
            direction: Direction::North,
        }]
    );
}

#[derive(Default)]
struct CountingObserver {
    calls: usize,
}

impl StateObserver for CountingObserver {
    fn on_state_changed(&mut self, state: &RobotState) {
        assert!(state.placed, "observers only see placed states");
        self.calls += 1;
    }
}

#[test]
fn test_observer_sees_only_committed_changes() {
    let mut robot =
        RobotStateMachine::with_observer(RobotConfig::default(), CountingObserver::default());
    robot.run([
        Command::Move,
        Command::Place {
            x: 4,
            y: 4,
            direction: Direction::North,
        },
        Command::Move,
        Command::Left,
        Command::Move,
        Command::Report,
        Command::Right,
    ]);

    // PLACE, LEFT, MOVE, RIGHT: the first MOVE is unplaced and the second hits the edge.
    assert_eq!(robot.observer().calls, 4);
}

#[test]
fn test_trace_recorder_collects_poses_and_cells() {
    let mut robot = RobotStateMachine::with_observer(RobotConfig::default(), TraceRecorder::new());
    robot.run([
        Command::Place {
            x: 0,
            y: 0,
            direction: Direction::East,
        },
        Command::Move,
        Command::Left,
        Command::Move,
    ]);

    let trace = robot.into_observer();
    assert_eq!(trace.poses().len(), 4);
    assert_eq!(
        trace.cells(),
        vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)]
    );
}

#[test]
fn test_resized_machine_starts_unplaced() {
    let mut robot = placed_at(4, 4, Direction::North);
    assert_eq!(
        robot.apply(Command::Report),
        Outcome::Reported(Pose {
            position: Position::new(4, 4),
            direction: Direction::North,
        })
    );

    let mut robot = robot.resized(10, 2);
    assert!(!robot.is_placed());
    assert_eq!(robot.config().length, 10);
    assert_eq!(robot.config().width, 2);
    assert!(robot.place(9, 1, Direction::East).is_ok());
    assert!(robot.place(9, 2, Direction::East).is_err());
}
