//! Command-line front end for the grid robot.
//!
//! ```text
//! grid-robot run "PLACE 1,2,EAST" MOVE MOVE LEFT MOVE REPORT
//! grid-robot run -f commands.txt
//! grid-robot explore --x 2 --y 3
//! grid-robot compile route.yaml -o output.txt
//! ```

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use grid_robot::{
    OccupancyGrid, Position, RobotConfig, RobotStateMachine, Route, RouteCompiler, RouteSolver,
    RunSummary, SerpentineSolver, TraceRecorder, load_config,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid-robot")]
#[command(author, version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML file with table size and compiler heading
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Table length (columns), overrides the config file
    #[arg(long, global = true)]
    length: Option<u32>,

    /// Table width (rows), overrides the config file
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print reports and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command stream through the robot
    Run {
        /// Commands, one per argument (e.g. "PLACE 0,0,NORTH" MOVE REPORT)
        commands: Vec<String>,

        /// Read commands from a file, one per line
        #[arg(short, long, conflicts_with = "commands")]
        file: Option<PathBuf>,
    },

    /// Sweep every cell of the table from a start cell and print the command stream
    Explore {
        #[arg(long, default_value_t = 0)]
        x: i32,

        #[arg(long, default_value_t = 0)]
        y: i32,
    },

    /// Compile a route file (YAML list of [x, y] cells) into commands
    Compile {
        route: PathBuf,

        /// Write commands here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RobotConfig::default(),
    };
    if let Some(length) = cli.length {
        config.length = length;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    config.validate()?;

    match cli.command {
        Commands::Run { commands, file } => run(config, commands, file),
        Commands::Explore { x, y } => explore(config, Position::new(x, y)),
        Commands::Compile { route, output } => compile(config, route, output),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(config: RobotConfig, commands: Vec<String>, file: Option<PathBuf>) -> Result<()> {
    let script = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read commands from {}", path.display()))?,
        None if commands.is_empty() => {
            bail!("no commands given; pass them as arguments or with -f FILE")
        }
        None => commands.join("\n"),
    };

    let mut robot = RobotStateMachine::new(config);
    let summary = robot.run_script(&script);
    print_reports(&summary);
    Ok(())
}

fn explore(config: RobotConfig, start: Position) -> Result<()> {
    let grid = OccupancyGrid::new(config.length, config.width).with_start(start);
    let route = SerpentineSolver
        .solve(&grid)
        .with_context(|| format!("cannot plan a sweep from {start}"))?;
    let compiled = RouteCompiler::new(config.initial_direction).compile(&route)?;

    let mut robot = RobotStateMachine::with_observer(config, TraceRecorder::new());
    let summary = robot.run(compiled.commands.iter().copied());
    if !summary.diagnostics.is_empty() {
        bail!(
            "replay diverged from the route: {} command(s) ignored",
            summary.diagnostics.len()
        );
    }

    for command in &compiled.commands {
        println!("{command}");
    }
    let visited = robot.observer().cells().len();
    info!(
        waypoints = route.waypoint_count(),
        visited,
        commands = compiled.commands.len(),
        "explored table"
    );
    if let Some(pose) = robot.report() {
        info!("final pose {pose}");
    }
    Ok(())
}

fn compile(config: RobotConfig, route_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let text = std::fs::read_to_string(&route_path)
        .with_context(|| format!("failed to read route from {}", route_path.display()))?;
    let route: Route = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse route {}", route_path.display()))?;

    let compiled = RouteCompiler::new(config.initial_direction).compile(&route)?;
    let mut rendered = String::new();
    for command in &compiled.commands {
        rendered.push_str(&command.to_string());
        rendered.push('\n');
    }

    match output {
        Some(path) => std::fs::write(&path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn print_reports(summary: &RunSummary) {
    for pose in &summary.reports {
        println!("{} {} {}", pose.position.x, pose.position.y, pose.direction);
    }
}
