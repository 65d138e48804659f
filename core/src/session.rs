use crate::analytics::{MetricsCollector, Mm1Theory};
use crate::components::{Client, Server};
use crate::config::{SimulationConfig, StopCondition};
use crate::engine::{EventType, Simulation};
use crate::error::Result;
use crate::random::{SeededVariates, VariateSource};
use crate::statistics::Statistics;
use crate::traits::NodeId;
use log::{debug, info};
use rand::random;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Instant;

pub const CLIENT_ID: NodeId = 1;
pub const SERVER_ID: NodeId = 2;

const PROGRESS_EVERY: u64 = 1_000_000;

/// Everything a caller needs to render the outcome of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub stop: StopCondition,
    /// `None` for runs driven by caller-supplied variate sources.
    pub seed: Option<u64>,
    pub total_time: f64,
    pub events: u64,
    pub customers_served: u64,
    pub customers_waiting: usize,
    pub average_wait: f64,
    pub p50_wait: f64,
    pub p99_wait: f64,
    pub average_queue_length: f64,
    pub average_customers_in_system: f64,
    pub utilization: f64,
    pub throughput: f64,
    pub theory: Option<Mm1Theory>,
    pub wall_seconds: f64,
    pub events_per_second: f64,
}

/// One simulation run: the engine plus the client/server pair and the
/// statistics they feed, driven until the configured stop condition.
pub struct Session {
    config: SimulationConfig,
    seed: Option<u64>,
    sim: Simulation,
    stats: Rc<RefCell<Statistics>>,
    server: Rc<RefCell<Server>>,
    metrics: MetricsCollector,
    wall_seconds: f64,
}

impl Session {
    /// Builds a seeded session. The client and the server draw from
    /// independent streams split from the one seed.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(random);
        let (arrivals, services) = SeededVariates::split(seed);
        Ok(Self::assemble(
            config,
            Some(seed),
            Box::new(arrivals),
            Box::new(services),
            Statistics::new(),
        ))
    }

    /// Builds a session around caller-supplied variate sources and statistics.
    /// `config.seed` is only carried into the report.
    pub fn with_sources(
        config: SimulationConfig,
        arrivals: Box<dyn VariateSource>,
        services: Box<dyn VariateSource>,
        stats: Statistics,
    ) -> Result<Self> {
        config.validate()?;
        let seed = config.seed;
        Ok(Self::assemble(config, seed, arrivals, services, stats))
    }

    fn assemble(
        config: SimulationConfig,
        seed: Option<u64>,
        arrivals: Box<dyn VariateSource>,
        services: Box<dyn VariateSource>,
        stats: Statistics,
    ) -> Self {
        let stats = Rc::new(RefCell::new(stats));
        let server = Rc::new(RefCell::new(Server::new(
            SERVER_ID,
            config.service_rate,
            Rc::clone(&stats),
            services,
        )));
        let client = Client::new(config.arrival_rate, Rc::clone(&server), arrivals);

        let mut sim = Simulation::new();
        sim.add_component(SERVER_ID, Box::new(Rc::clone(&server)));
        sim.add_component(CLIENT_ID, Box::new(client));
        sim.schedule(0.0, CLIENT_ID, EventType::Arrival);

        debug!(
            "session wired: client {} -> server {}, lambda={}, mu={}, seed={:?}",
            CLIENT_ID, SERVER_ID, config.arrival_rate, config.service_rate, seed
        );

        let metrics = MetricsCollector::new(config.sample_interval, config.max_samples);
        Self {
            config,
            seed,
            sim,
            stats,
            server,
            metrics,
            wall_seconds: 0.0,
        }
    }

    pub fn should_continue(&self) -> bool {
        if !self.sim.has_next_event() {
            return false;
        }
        match self.config.stop {
            StopCondition::Time(horizon) => self.sim.peek_next_time() < horizon,
            StopCondition::Events(max) => self.sim.event_count() < max,
            StopCondition::Customers(max) => self.stats.borrow().served_customers() < max,
        }
    }

    /// Dispatches one event and samples metrics. Returns `false` once the
    /// stop condition holds.
    pub fn step(&mut self) -> bool {
        if !self.should_continue() {
            return false;
        }
        self.sim.run_step();
        let now = self.sim.now();
        if self.metrics.should_sample(now) {
            self.metrics.update(now, &self.stats.borrow());
        }
        if self.sim.event_count() % PROGRESS_EVERY == 0 {
            debug!("{} events, t={:.2}", self.sim.event_count(), now);
        }
        true
    }

    pub fn run(&mut self) -> Report {
        info!(
            "running M/M/1: lambda={:.4} mu={:.4} rho={:.4} stop={:?} seed={:?}",
            self.config.arrival_rate,
            self.config.service_rate,
            self.config.traffic_intensity(),
            self.config.stop,
            self.seed
        );
        let start = Instant::now();
        while self.step() {}
        self.wall_seconds += start.elapsed().as_secs_f64();

        let report = self.report();
        info!(
            "finished at t={:.2} after {} events ({:.0} events/s)",
            report.total_time, report.events, report.events_per_second
        );
        report
    }

    pub fn report(&self) -> Report {
        let stats = self.stats.borrow();
        let total_time = self.sim.now();
        let events = self.sim.event_count();
        Report {
            arrival_rate: self.config.arrival_rate,
            service_rate: self.config.service_rate,
            stop: self.config.stop,
            seed: self.seed,
            total_time,
            events,
            customers_served: stats.served_customers(),
            customers_waiting: self.server.borrow().queue_len(),
            average_wait: stats.average_wait_time(),
            p50_wait: stats.wait_percentile(50.0),
            p99_wait: stats.wait_percentile(99.0),
            average_queue_length: stats.average_queue_length(total_time),
            average_customers_in_system: stats.average_customers_in_system(total_time),
            utilization: stats.utilization(total_time),
            throughput: stats.throughput(total_time),
            theory: Mm1Theory::new(self.config.arrival_rate, self.config.service_rate),
            wall_seconds: self.wall_seconds,
            events_per_second: if self.wall_seconds > 0.0 {
                events as f64 / self.wall_seconds
            } else {
                0.0
            },
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn stats(&self) -> Ref<'_, Statistics> {
        self.stats.borrow()
    }

    pub fn server(&self) -> Ref<'_, Server> {
        self.server.borrow()
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }
}
