use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// When a run ends. The run also ends if the event queue drains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopCondition {
    /// Stop before dispatching anything at or past this simulated time.
    Time(f64),
    /// Stop after this many dispatched events.
    Events(u64),
    /// Stop once this many customers have entered service.
    Customers(u64),
}

impl Default for StopCondition {
    fn default() -> Self {
        StopCondition::Time(10_000_000.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub stop: StopCondition,
    /// `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
    /// Simulated time between two metric samples.
    pub sample_interval: f64,
    pub max_samples: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 0.8,
            service_rate: 1.0,
            stop: StopCondition::default(),
            seed: None,
            sample_interval: 10_000.0,
            max_samples: 2_000,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Traffic intensity rho = lambda / mu.
    pub fn traffic_intensity(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    pub fn validate(&self) -> Result<()> {
        positive("arrival_rate", self.arrival_rate)?;
        positive("service_rate", self.service_rate)?;
        positive("sample_interval", self.sample_interval)?;
        match self.stop {
            StopCondition::Time(t) => positive("stop.time", t)?,
            StopCondition::Events(0) => {
                return Err(Error::invalid("stop.events", 0, "must be at least 1"))
            }
            StopCondition::Customers(0) => {
                return Err(Error::invalid("stop.customers", 0, "must be at least 1"))
            }
            _ => {}
        }
        if self.max_samples == 0 {
            return Err(Error::invalid("max_samples", 0, "must be at least 1"));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(name, value, "must be finite and positive"))
    }
}
