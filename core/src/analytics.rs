use crate::statistics::Statistics;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct MetricPoint {
    pub sim_time: f64,
    pub queue_length: usize,
    pub mean_wait: f64,
    pub utilization: f64,
    pub served: u64,
    pub customers_in_system: usize,
    pub throughput: f64,
}

/// Samples the running statistics on a simulated-time grid.
///
/// A sample is taken on the first update at or after the next grid point;
/// the grid then moves on by exactly one interval, so a long gap between
/// events is caught up one sample per update. When the history outgrows
/// `max_points`, every other sample is dropped (the newest is kept) and the
/// interval doubles, so the history always spans the whole run.
pub struct MetricsCollector {
    pub history: VecDeque<MetricPoint>,
    pub max_points: usize,
    sample_interval: f64,
    next_sample_time: f64,
}

impl MetricsCollector {
    pub fn new(sample_interval: f64, max_points: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max_points.min(4096)),
            max_points,
            sample_interval,
            next_sample_time: 0.0,
        }
    }

    #[inline]
    pub fn should_sample(&self, now: f64) -> bool {
        now >= self.next_sample_time
    }

    /// Returns whether a point was recorded.
    pub fn update(&mut self, now: f64, stats: &Statistics) -> bool {
        if !self.should_sample(now) {
            return false;
        }

        let grid_point = self.next_sample_time;
        self.history.push_back(MetricPoint {
            sim_time: now,
            queue_length: stats.current_queue_length(),
            mean_wait: stats.average_wait_time(),
            utilization: stats.instantaneous_utilization(now),
            served: stats.served_customers(),
            customers_in_system: stats.current_customers_in_system(),
            throughput: stats.throughput(now),
        });

        if self.history.len() > self.max_points {
            self.thin();
        }

        self.next_sample_time = grid_point + self.sample_interval;
        true
    }

    pub fn sample_interval(&self) -> f64 {
        self.sample_interval
    }

    fn thin(&mut self) {
        let newest = self.history.len() - 1;
        let mut index = 0;
        self.history.retain(|_| {
            let keep = (newest - index) % 2 == 0;
            index += 1;
            keep
        });
        self.sample_interval *= 2.0;
    }

    pub fn series(&self, field: impl Fn(&MetricPoint) -> f64) -> Vec<[f64; 2]> {
        self.history.iter().map(|p| [p.sim_time, field(p)]).collect()
    }
}

/// Closed-form steady-state values of an M/M/1 queue.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Mm1Theory {
    pub rho: f64,
    /// Expected wait in queue, Wq = rho / (mu - lambda)
    pub wait: f64,
    /// Expected queue length, Lq = rho^2 / (1 - rho)
    pub queue_length: f64,
    /// Expected customers in system, L = rho / (1 - rho)
    pub customers_in_system: f64,
    pub utilization: f64,
    pub throughput: f64,
}

impl Mm1Theory {
    /// `None` when rho >= 1: the queue has no steady state.
    pub fn new(arrival_rate: f64, service_rate: f64) -> Option<Self> {
        let rho = arrival_rate / service_rate;
        if rho.is_nan() || rho >= 1.0 {
            return None;
        }
        Some(Self {
            rho,
            wait: rho / (service_rate - arrival_rate),
            queue_length: rho * rho / (1.0 - rho),
            customers_in_system: rho / (1.0 - rho),
            utilization: rho,
            throughput: arrival_rate,
        })
    }
}
