pub mod analytics;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod random;
pub mod session;
pub mod statistics;
pub mod traits;

pub use analytics::{MetricPoint, MetricsCollector, Mm1Theory};
pub use components::{Client, Server};
pub use config::{SimulationConfig, StopCondition};
pub use engine::{Event, EventQueue, EventType, Scheduler, Simulation};
pub use error::{Error, Result};
pub use random::{ScriptedVariates, SeededVariates, VariateSource};
pub use session::{Report, Session, CLIENT_ID, SERVER_ID};
pub use statistics::Statistics;
pub use traits::{Component, NodeId};
