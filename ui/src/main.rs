mod analytics;
mod app;
mod report;
mod theme;

use app::ResultsViewer;
use clap::Parser;
use egui::ViewportBuilder;
use ssq_core::{Session, SimulationConfig, StopCondition};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Discrete-event simulator of a single-server (M/M/1) queue.
#[derive(Parser, Debug)]
#[command(name = "ssq", version, about)]
struct Args {
    /// JSON run configuration; the flags below override its fields
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Mean customer arrivals per unit time (lambda)
    #[arg(long)]
    arrival_rate: Option<f64>,

    /// Mean service completions per unit time (mu)
    #[arg(long)]
    service_rate: Option<f64>,

    /// Stop at this simulated time
    #[arg(long, conflicts_with_all = ["events", "customers"])]
    time: Option<f64>,

    /// Stop after this many dispatched events
    #[arg(long, conflicts_with = "customers")]
    events: Option<u64>,

    /// Stop once this many customers have entered service
    #[arg(long)]
    customers: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Simulated time between metric samples
    #[arg(long)]
    sample_interval: Option<f64>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Skip the results window
    #[arg(long)]
    no_viewer: bool,
}

impl Args {
    fn build_config(&self) -> ssq_core::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(rate) = self.arrival_rate {
            config.arrival_rate = rate;
        }
        if let Some(rate) = self.service_rate {
            config.service_rate = rate;
        }
        if let Some(t) = self.time {
            config.stop = StopCondition::Time(t);
        }
        if let Some(n) = self.events {
            config.stop = StopCondition::Events(n);
        }
        if let Some(n) = self.customers {
            config.stop = StopCondition::Customers(n);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(interval) = self.sample_interval {
            config.sample_interval = interval;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.build_config()?;

    let mut session = Session::new(config)?;
    let report = session.run();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render(&report));
    }

    if args.no_viewer {
        return Ok(());
    }

    log::info!("opening results viewer");
    let viewer = ResultsViewer::new(report, session.metrics());
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([1300.0, 900.0])
            .with_title("SSQ Simulation"),
        ..Default::default()
    };
    eframe::run_native(
        "SSQ Simulation",
        options,
        Box::new(move |_cc| Ok(Box::new(viewer))),
    )?;
    Ok(())
}
