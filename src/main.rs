use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use trackdelta_align::{align_all, Channel, GridConfig, GridResolution, GridSpan};
use trackdelta_io::{
    DirectoryStore, DriverCode, ReportName, ReportWriter, SessionCode, SessionConfig, SessionKey,
    SessionStore,
};
use trackdelta_laps::{GearMap, LapTimeComparison, Laps, QualifyingResult};

#[derive(Parser)]
#[command(name = "trackdelta")]
#[command(about = "Distance-aligned lap telemetry comparison and session charts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

/// Which session to load and which drivers to compare.
#[derive(Args, Debug, Clone)]
struct SessionArgs {
    /// Root directory of the session export store
    #[arg(long)]
    data_dir: PathBuf,

    /// Championship year
    #[arg(long, default_value_t = SessionConfig::DEFAULT_YEAR)]
    year: u16,

    /// Event name, e.g. "Monza" or "Abu Dhabi"
    #[arg(long, default_value = SessionConfig::DEFAULT_EVENT)]
    event: String,

    /// Session code: R, Q, S, SQ, FP1, FP2 or FP3
    #[arg(long, default_value = "R")]
    session: String,

    /// First driver code (defaults to the first driver in code order)
    #[arg(long)]
    driver1: Option<String>,

    /// Second driver code (defaults to the second driver in code order)
    #[arg(long)]
    driver2: Option<String>,
}

/// Where to write artifacts.
#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Report name for output files (must match [a-zA-Z0-9_-]+)
    #[arg(long)]
    report: String,

    /// Output directory for result files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

/// Distance grid and channel selection for telemetry alignment.
#[derive(Args, Debug, Clone)]
struct GridArgs {
    /// Number of grid points
    #[arg(long, conflicts_with = "spacing")]
    points: Option<usize>,

    /// Grid spacing in metres (the lap end is always included)
    #[arg(long)]
    spacing: Option<f64>,

    /// Grid extent: "intersection" (overlap of all laps) or "union"
    #[arg(long, default_value = "intersection")]
    span: String,

    /// Comma-separated channels, e.g. "speed,throttle,gear" (default: all)
    #[arg(long, value_delimiter = ',')]
    channels: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Align the two drivers' fastest-lap telemetry on a shared distance grid
    Telemetry {
        #[command(flatten)]
        session: SessionArgs,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Lap-time evolution of the two drivers over the session
    Laps {
        #[command(flatten)]
        session: SessionArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Rank every driver's fastest lap against pole
    Qualifying {
        #[command(flatten)]
        session: SessionArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Track outline of the session's fastest lap coloured by gear
    GearMap {
        #[command(flatten)]
        session: SessionArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Produce all four artifacts
    Report {
        #[command(flatten)]
        session: SessionArgs,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        grid: GridArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct TelemetryOutput {
    session: String,
    drivers: Vec<String>,
    n_points: usize,
    distance_start: f64,
    distance_end: f64,
    channels: Vec<&'static str>,
    path: PathBuf,
}

#[derive(Serialize)]
struct LapsOutput {
    session: String,
    drivers: Vec<DriverLapsOutput>,
    path: PathBuf,
}

#[derive(Serialize)]
struct DriverLapsOutput {
    driver: String,
    n_laps: usize,
    n_timed: usize,
    fastest: Option<String>,
}

#[derive(Serialize)]
struct QualifyingOutput {
    session: String,
    title: String,
    n_drivers: usize,
    pole: String,
    pole_time: String,
    path: PathBuf,
}

#[derive(Serialize)]
struct GearMapOutput {
    session: String,
    driver: String,
    lap_time: String,
    n_segments: usize,
    path: PathBuf,
}

#[derive(Serialize)]
struct ReportOutput {
    telemetry: TelemetryOutput,
    laps: LapsOutput,
    qualifying: QualifyingOutput,
    gear_map: GearMapOutput,
}

fn parse_span(s: &str) -> Result<GridSpan> {
    match s.trim().to_ascii_lowercase().as_str() {
        "intersection" => Ok(GridSpan::Intersection),
        "union" => Ok(GridSpan::Union),
        other => anyhow::bail!("unknown grid span: {other} (expected intersection or union)"),
    }
}

fn build_grid_config(args: &GridArgs) -> Result<GridConfig> {
    let resolution = match (args.points, args.spacing) {
        (_, Some(spacing)) => GridResolution::Spacing(spacing),
        (Some(points), None) => GridResolution::Points(points),
        (None, None) => GridResolution::Points(GridConfig::DEFAULT_POINTS),
    };
    Ok(GridConfig::new()
        .with_resolution(resolution)
        .with_span(parse_span(&args.span)?))
}

fn parse_channels(names: &[String]) -> Result<Vec<Channel>> {
    names
        .iter()
        .map(|n| n.parse::<Channel>().context("invalid --channels entry"))
        .collect()
}

fn build_session_config(args: &SessionArgs, grid: Option<&GridArgs>) -> Result<SessionConfig> {
    let session: SessionCode = args.session.parse()?;
    let mut config = SessionConfig::new()
        .with_year(args.year)
        .with_event(args.event.clone())
        .with_session(session);
    if let Some(code) = &args.driver1 {
        config = config.with_driver1(DriverCode::new(code)?);
    }
    if let Some(code) = &args.driver2 {
        config = config.with_driver2(DriverCode::new(code)?);
    }
    if let Some(grid) = grid {
        config = config
            .with_grid(build_grid_config(grid)?)
            .with_channels(parse_channels(&grid.channels)?);
    }
    Ok(config)
}

/// Session data shared by every command: the open store and the session laps.
///
/// The store is closed when the session is dropped, on success and error alike.
struct Session<S: SessionStore = DirectoryStore> {
    store: S,
    config: SessionConfig,
    key: SessionKey,
    laps: Laps,
}

impl Session {
    fn open(args: &SessionArgs, grid: Option<&GridArgs>) -> Result<Self> {
        let config = build_session_config(args, grid)?;
        Self::load(DirectoryStore::new(&args.data_dir), config)
    }
}

impl<S: SessionStore> Session<S> {
    fn load(mut store: S, config: SessionConfig) -> Result<Self> {
        store.open().context("failed to open session store")?;
        let key = config.key();
        let mut session = Self {
            store,
            config,
            key,
            laps: Laps::default(),
        };
        session.laps = session
            .store
            .load_laps(&session.key)
            .with_context(|| format!("failed to load laps for {}", session.key))?;
        info!(session = %session.key, n_laps = session.laps.len(), "session loaded");
        Ok(session)
    }

    fn drivers(&self) -> Result<(DriverCode, DriverCode)> {
        let available = self
            .laps
            .drivers()
            .into_iter()
            .map(DriverCode::new)
            .collect::<Result<Vec<_>, _>>()
            .context("invalid driver code in lap table")?;
        Ok(self.config.resolve_drivers(&available)?)
    }
}

impl<S: SessionStore> Drop for Session<S> {
    fn drop(&mut self) {
        self.store.close();
    }
}

fn run_telemetry(session: &Session, writer: &ReportWriter) -> Result<TelemetryOutput> {
    let (d1, d2) = session.drivers()?;
    let mut series = Vec::with_capacity(2);
    for driver in [&d1, &d2] {
        let s = session
            .store
            .load_telemetry(&session.key, driver)
            .with_context(|| format!("failed to load telemetry for {driver}"))?;
        series.push(s);
    }

    let frame = align_all(&series, session.config.channels(), session.config.grid())
        .context("telemetry alignment failed")?;
    let path = writer.write_telemetry(&frame)?;

    Ok(TelemetryOutput {
        session: session.key.to_string(),
        drivers: vec![d1.to_string(), d2.to_string()],
        n_points: frame.n_points(),
        distance_start: frame.grid().start(),
        distance_end: frame.grid().end(),
        channels: session.config.channels().iter().map(|c| c.as_str()).collect(),
        path,
    })
}

fn run_laps(session: &Session, writer: &ReportWriter) -> Result<LapsOutput> {
    let (d1, d2) = session.drivers()?;
    let requested: Vec<&str> = if d1 == d2 {
        vec![d1.as_str()]
    } else {
        vec![d1.as_str(), d2.as_str()]
    };

    let comparison =
        LapTimeComparison::new(&session.laps, &requested).context("lap-time comparison failed")?;
    let path = writer.write_lap_times(&comparison)?;

    Ok(LapsOutput {
        session: session.key.to_string(),
        drivers: comparison
            .traces
            .iter()
            .map(|t| DriverLapsOutput {
                driver: t.driver.clone(),
                n_laps: t.points.len(),
                n_timed: t.n_timed(),
                fastest: t.fastest().map(|(_, lt)| lt.to_string()),
            })
            .collect(),
        path,
    })
}

fn run_qualifying(session: &Session, writer: &ReportWriter) -> Result<QualifyingOutput> {
    let result = QualifyingResult::from_laps(&session.laps).context("no valid fastest laps")?;
    let path = writer.write_qualifying(&result, session.config.event(), session.config.year())?;

    let pole = result.pole();
    Ok(QualifyingOutput {
        session: session.key.to_string(),
        title: result.headline(session.config.event(), session.config.year()),
        n_drivers: result.entries().len(),
        pole: pole.driver.clone(),
        pole_time: pole.lap_time.to_string(),
        path,
    })
}

fn run_gear_map(session: &Session, writer: &ReportWriter) -> Result<GearMapOutput> {
    let (fastest, lap_time) = session
        .laps
        .pick_fastest()
        .and_then(|lap| lap.lap_time.map(|t| (lap, t)))
        .context("session has no timed lap")?;
    let driver = DriverCode::new(&fastest.driver)?;

    let positions = session
        .store
        .load_positions(&session.key, &driver)
        .with_context(|| format!("failed to load positions for {driver}"))?;
    let map = GearMap::from_positions(&positions).context("gear map failed")?;
    let path = writer.write_gear_map(&map, driver.as_str(), lap_time)?;

    Ok(GearMapOutput {
        session: session.key.to_string(),
        driver: driver.to_string(),
        lap_time: lap_time.to_string(),
        n_segments: map.segments().len(),
        path,
    })
}

fn open_writer(output: &OutputArgs) -> Result<ReportWriter> {
    let report = ReportName::new(output.report.clone())?;
    ReportWriter::new(&output.output_dir, report).context("failed to prepare output directory")
}

fn print_json<T: Serialize>(output: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Telemetry {
            session,
            output,
            grid,
        } => {
            let session = Session::open(&session, Some(&grid))?;
            let writer = open_writer(&output)?;
            print_json(&run_telemetry(&session, &writer)?)?;
        }

        Command::Laps { session, output } => {
            let session = Session::open(&session, None)?;
            let writer = open_writer(&output)?;
            print_json(&run_laps(&session, &writer)?)?;
        }

        Command::Qualifying { session, output } => {
            let session = Session::open(&session, None)?;
            let writer = open_writer(&output)?;
            print_json(&run_qualifying(&session, &writer)?)?;
        }

        Command::GearMap { session, output } => {
            let session = Session::open(&session, None)?;
            let writer = open_writer(&output)?;
            print_json(&run_gear_map(&session, &writer)?)?;
        }

        Command::Report {
            session,
            output,
            grid,
        } => {
            let session = Session::open(&session, Some(&grid))?;
            let writer = open_writer(&output)?;
            let report = ReportOutput {
                telemetry: run_telemetry(&session, &writer)?,
                laps: run_laps(&session, &writer)?,
                qualifying: run_qualifying(&session, &writer)?,
                gear_map: run_gear_map(&session, &writer)?,
            };
            info!(session = %session.key, "report complete");
            print_json(&report)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use trackdelta_align::TelemetrySeries;
    use trackdelta_io::IoError;
    use trackdelta_laps::{LapRecord, LapTime, PositionSample};

    /// Store that records whether it is open and can fail its lap load.
    struct RecordingStore {
        open: Rc<Cell<bool>>,
        fail_laps: bool,
    }

    impl SessionStore for RecordingStore {
        fn open(&mut self) -> Result<(), IoError> {
            self.open.set(true);
            Ok(())
        }

        fn close(&mut self) {
            self.open.set(false);
        }

        fn load_laps(&self, key: &SessionKey) -> Result<Laps, IoError> {
            if self.fail_laps {
                return Err(IoError::SessionNotFound {
                    path: PathBuf::from(key.dir_name()),
                });
            }
            Ok(Laps::new(vec![LapRecord {
                driver: "VER".to_string(),
                team: None,
                lap_number: 1,
                lap_time: LapTime::from_seconds(81.0),
            }]))
        }

        fn load_telemetry(
            &self,
            _key: &SessionKey,
            _driver: &DriverCode,
        ) -> Result<TelemetrySeries, IoError> {
            Err(IoError::StoreNotOpen)
        }

        fn load_positions(
            &self,
            _key: &SessionKey,
            _driver: &DriverCode,
        ) -> Result<Vec<PositionSample>, IoError> {
            Err(IoError::StoreNotOpen)
        }
    }

    fn recording_store(fail_laps: bool) -> (Rc<Cell<bool>>, RecordingStore) {
        let open = Rc::new(Cell::new(false));
        let store = RecordingStore {
            open: Rc::clone(&open),
            fail_laps,
        };
        (open, store)
    }

    #[test]
    fn store_closed_when_session_dropped() {
        let (open, store) = recording_store(false);
        let session = Session::load(store, SessionConfig::new()).unwrap();
        assert!(open.get());
        assert_eq!(session.laps.len(), 1);
        drop(session);
        assert!(!open.get());
    }

    #[test]
    fn store_closed_when_lap_load_fails() {
        let (open, store) = recording_store(true);
        let result = Session::load(store, SessionConfig::new());
        assert!(result.is_err());
        assert!(!open.get());
    }

    #[test]
    fn span_parsing_ignores_case() {
        assert_eq!(parse_span("Union").unwrap(), GridSpan::Union);
        assert_eq!(parse_span("INTERSECTION").unwrap(), GridSpan::Intersection);
        assert_eq!(parse_span(" union ").unwrap(), GridSpan::Union);
        assert!(parse_span("middle").is_err());
    }
}
