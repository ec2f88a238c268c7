//! Host subcommands: simulation loop, catalog statistics and conjunction analysis

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use orbitwatch::analysis::{AnalysisOutcome, ConjunctionAnalysisClient, WirePosition};
use orbitwatch::config::{AnalysisConfig, SimulationConfig};
use orbitwatch::data::{
    build_catalog, load_catalog, world_manifest, CatalogFilter, CatalogStore, ObjectClass,
    OrbitType, RiskLevel,
};
use orbitwatch::propagation::{ObjectState, OrbitPropagator, PropagationWorker, Snapshot, Ticker};
use orbitwatch::risk::{sort_by_risk, RiskClassifier};
use orbitwatch::stats::{Stats, StatsAggregator};

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Catalog manifest (JSON, optionally .gz); defaults to the built-in world catalog
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Seed for jittered attributes and unassigned risk levels
    #[arg(long)]
    pub seed: Option<u64>,
}

impl CatalogArgs {
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
        }
        if let Some(seed) = self.seed {
            config.risk_seed = seed;
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
    /// Number of ticks to run
    #[arg(long, default_value_t = 100)]
    pub ticks: u64,
    /// Drive ticks from the wall clock instead of computing them back to back
    #[arg(long)]
    pub realtime: bool,
    /// Tick period in milliseconds when running in real time
    #[arg(long)]
    pub tick_ms: Option<u64>,
    /// Number of highest-risk objects to include in the report
    #[arg(long, default_value_t = 10)]
    pub sample: usize,
    /// Write the final report as JSON here
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
    /// Case-insensitive name or origin substring
    #[arg(long)]
    pub query: Option<String>,
    /// Only count debris
    #[arg(long, conflicts_with = "satellites_only")]
    pub debris_only: bool,
    /// Only count satellites
    #[arg(long)]
    pub satellites_only: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
    /// Tick to propagate to before analysis
    #[arg(long, default_value_t = 0)]
    pub tick: u64,
    /// Maximum number of satellites to submit, highest risk first
    #[arg(long, default_value_t = 25)]
    pub limit: usize,
    /// Also submit debris positions
    #[arg(long)]
    pub include_debris: bool,
    /// Service endpoint (overrides ORBITWATCH_ANALYSIS_URL)
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Bearer key (overrides ORBITWATCH_ANALYSIS_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
    /// Request timeout in seconds (overrides ORBITWATCH_ANALYSIS_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl AnalyzeArgs {
    fn analysis_config(&self) -> AnalysisConfig {
        self.apply(AnalysisConfig::from_env())
    }

    /// Command-line flags take precedence over `config`
    fn apply(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs.max(1);
        }
        config.include_debris |= self.include_debris;
        config
    }
}

#[derive(Debug, Serialize)]
struct PositionRecord {
    id: String,
    name: String,
    orbit_type: OrbitType,
    risk_level: RiskLevel,
    position: WirePosition,
}

impl From<&ObjectState> for PositionRecord {
    fn from(state: &ObjectState) -> Self {
        Self {
            id: state.object.id.clone(),
            name: state.object.name.clone(),
            orbit_type: state.object.orbit_type,
            risk_level: state.object.risk_level,
            position: state.position.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    generated_at: String,
    tick: u64,
    stats: Stats,
    highest_risk: Vec<PositionRecord>,
}

#[derive(Debug, Serialize)]
struct AnalysisReport<'a> {
    generated_at: String,
    tick: u64,
    submitted_objects: usize,
    submitted_debris: usize,
    outcome: &'a AnalysisOutcome,
}

fn open_catalog(config: &SimulationConfig) -> Result<CatalogStore> {
    let classifier = RiskClassifier::new(config.risk_seed);
    let catalog = match &config.catalog_path {
        Some(path) => load_catalog(path, &classifier)
            .with_context(|| format!("Failed to load catalog {:?}", path))?,
        None => {
            log::info!("Using built-in world catalog (seed {})", config.risk_seed);
            build_catalog(world_manifest(config.risk_seed), &classifier)
        }
    };

    if catalog.is_empty() {
        return Err(anyhow!("catalog contains no valid objects"));
    }
    Ok(catalog)
}

fn progress_bar(len: u64) -> Result<ProgressBar> {
    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::with_template(
            "{elapsed_precise} {bar:40.cyan/blue} {pos}/{len} ticks {per_sec} ETA {eta_precise}",
        )?
        .progress_chars("##-"),
    );
    Ok(progress)
}

pub fn run_simulation(args: SimulateArgs) -> Result<()> {
    if args.ticks == 0 {
        return Err(anyhow!("ticks must be > 0"));
    }

    let mut config = SimulationConfig::default();
    args.catalog.apply(&mut config);
    if let Some(ms) = args.tick_ms {
        config.tick_period_ms = ms;
    }

    let catalog = Arc::new(open_catalog(&config)?);
    let propagator = OrbitPropagator::new(Arc::clone(&catalog));
    let progress = progress_bar(args.ticks)?;

    log::info!(
        "Simulating {} objects for {} ticks{}",
        catalog.len(),
        args.ticks,
        if args.realtime {
            format!(" at {:?} per tick", config.tick_period())
        } else {
            String::new()
        }
    );

    let last = if args.realtime {
        let (ticker, ticks) = Ticker::spawn(config.tick_period(), 0);
        let (worker, snapshots) = PropagationWorker::spawn(propagator, ticks);

        let mut last: Option<Snapshot> = None;
        for snapshot in snapshots.iter().take(args.ticks as usize) {
            last = Some(snapshot);
            progress.inc(1);
        }
        ticker.stop();
        worker.join();
        last
    } else {
        let mut last: Option<Snapshot> = None;
        for tick in 0..args.ticks {
            last = Some(propagator.propagate_all(tick));
            progress.inc(1);
        }
        last
    };
    progress.finish_and_clear();

    let snapshot = last.ok_or_else(|| anyhow!("no snapshot was produced"))?;
    let stats = StatsAggregator::default().aggregate(snapshot.objects());
    let highest_risk: Vec<PositionRecord> = sort_by_risk(snapshot.states())
        .iter()
        .take(args.sample)
        .map(PositionRecord::from)
        .collect();

    let report = SimulationReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        tick: snapshot.tick,
        stats,
        highest_risk,
    };
    print_summary(&report.stats);

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {:?}", path))?;
            serde_json::to_writer_pretty(file, &report)?;
            log::info!("Wrote simulation report to {:?}", path);
        }
        None => println!("{}", serde_json::to_string_pretty(&report.highest_risk)?),
    }
    Ok(())
}

pub fn run_stats(args: StatsArgs) -> Result<()> {
    let mut config = SimulationConfig::default();
    args.catalog.apply(&mut config);
    let catalog = open_catalog(&config)?;

    let mut filter = if args.debris_only {
        CatalogFilter::debris()
    } else if args.satellites_only {
        CatalogFilter::satellites()
    } else {
        CatalogFilter::default()
    };
    filter.query = args.query.clone().unwrap_or_default();

    let selected = filter.apply(catalog.all());
    log::info!("{} of {} objects match the filter", selected.len(), catalog.len());

    let stats = StatsAggregator::default().aggregate(selected.into_iter().map(|o| o.as_ref()));
    print_summary(&stats);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let mut sim_config = SimulationConfig::default();
    args.catalog.apply(&mut sim_config);
    let analysis_config = args.analysis_config();

    let catalog = Arc::new(open_catalog(&sim_config)?);
    let snapshot = OrbitPropagator::new(catalog).propagate_all(args.tick);

    let satellites: Vec<ObjectState> = sort_by_risk(snapshot.states())
        .into_iter()
        .filter(|s| s.object.class == ObjectClass::Satellite)
        .take(args.limit)
        .collect();
    let debris: Vec<ObjectState> = if analysis_config.include_debris {
        snapshot
            .states()
            .iter()
            .filter(|s| s.object.is_debris())
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    let client = ConjunctionAnalysisClient::from_config(&analysis_config)?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let debris_arg = analysis_config.include_debris.then_some(debris.as_slice());
    let outcome = runtime.block_on(client.analyze(&satellites, debris_arg))?;

    let report = AnalysisReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        tick: snapshot.tick,
        submitted_objects: satellites.len(),
        submitted_debris: debris.len(),
        outcome: &outcome,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_summary(stats: &Stats) {
    println!(
        "{} objects | LEO {} MEO {} GEO {} HEO {} | safe {} warning {} critical {} | debris {} (high {}) | alerts {}",
        stats.total,
        stats.by_orbit.leo,
        stats.by_orbit.meo,
        stats.by_orbit.geo,
        stats.by_orbit.heo,
        stats.by_risk.safe,
        stats.by_risk.warning,
        stats.by_risk.critical,
        stats.debris.total,
        stats.debris.high,
        stats.active_alerts,
    );
}
