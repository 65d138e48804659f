use hdrhistogram::Histogram;

/// Wait times are kept in the histogram at this many steps per time unit.
pub const WAIT_RESOLUTION: f64 = 1_000.0;

/// Running sums for the queue metrics.
///
/// All `record_*` calls must arrive in non-decreasing simulated time. The
/// area integrals are only exact under that ordering and there is no way to
/// repair them afterwards.
#[derive(Debug, Clone)]
pub struct Statistics {
    /// Sum of all customer wait times
    total_wait_time: f64,

    /// Customers whose service has been committed
    served_customers: u64,

    /// Service time committed so far
    total_busy_time: f64,

    /// Timestamp of the last queue length change
    last_event_time: f64,

    /// Integral of queue length over time up to `last_event_time`
    area_under_q: f64,

    last_queue_length: usize,

    last_system_time: f64,
    area_under_system: f64,
    last_in_system: usize,

    wait_histogram: Histogram<u64>,

    queue_trace: Option<Vec<(f64, usize)>>,
}

impl Statistics {
    pub fn new() -> Self {
        Self {
            total_wait_time: 0.0,
            served_customers: 0,
            total_busy_time: 0.0,
            last_event_time: 0.0,
            area_under_q: 0.0,
            last_queue_length: 0,
            last_system_time: 0.0,
            area_under_system: 0.0,
            last_in_system: 0,
            wait_histogram: Histogram::new(3).expect("3 significant figures is a valid precision"),
            queue_trace: None,
        }
    }

    /// Also keeps every `(time, length)` passed to `record_queue_change`.
    pub fn with_queue_trace(mut self) -> Self {
        self.queue_trace = Some(Vec::new());
        self
    }

    /// Integrates the old length up to `time`, then switches to `queue_length`.
    #[inline]
    pub fn record_queue_change(&mut self, time: f64, queue_length: usize) {
        debug_assert!(
            time >= self.last_event_time,
            "queue change at {time} precedes previous change at {}",
            self.last_event_time
        );
        self.area_under_q += self.last_queue_length as f64 * (time - self.last_event_time);
        self.last_event_time = time;
        self.last_queue_length = queue_length;
        if let Some(trace) = self.queue_trace.as_mut() {
            trace.push((time, queue_length));
        }
    }

    /// Same integration as the queue, for backlog plus the customer in service.
    #[inline]
    pub fn record_system_change(&mut self, time: f64, in_system: usize) {
        debug_assert!(time >= self.last_system_time);
        self.area_under_system += self.last_in_system as f64 * (time - self.last_system_time);
        self.last_system_time = time;
        self.last_in_system = in_system;
    }

    #[inline]
    pub fn record_service_start(&mut self, wait_time: f64) {
        self.total_wait_time += wait_time;
        self.wait_histogram
            .saturating_record((wait_time.max(0.0) * WAIT_RESOLUTION) as u64);
    }

    #[inline]
    pub fn record_service_end(&mut self, service_duration: f64) {
        self.served_customers += 1;
        self.total_busy_time += service_duration;
    }

    pub fn average_wait_time(&self) -> f64 {
        if self.served_customers == 0 {
            0.0
        } else {
            self.total_wait_time / self.served_customers as f64
        }
    }

    pub fn average_queue_length(&self, total_time: f64) -> f64 {
        if total_time == 0.0 {
            0.0
        } else {
            self.area_under_q / total_time
        }
    }

    pub fn utilization(&self, total_time: f64) -> f64 {
        if total_time == 0.0 {
            0.0
        } else {
            self.total_busy_time / total_time
        }
    }

    pub fn average_customers_in_system(&self, total_time: f64) -> f64 {
        if total_time == 0.0 {
            0.0
        } else {
            self.area_under_system / total_time
        }
    }

    pub fn throughput(&self, total_time: f64) -> f64 {
        if total_time == 0.0 {
            0.0
        } else {
            self.served_customers as f64 / total_time
        }
    }

    /// Busy time committed so far relative to `current_time`. Can exceed 1
    /// briefly because service time is booked when service starts.
    pub fn instantaneous_utilization(&self, current_time: f64) -> f64 {
        self.utilization(current_time)
    }

    /// Wait time at percentile `p` (0..=100), 0 if nobody was served.
    pub fn wait_percentile(&self, p: f64) -> f64 {
        if self.wait_histogram.len() == 0 {
            return 0.0;
        }
        self.wait_histogram.value_at_percentile(p) as f64 / WAIT_RESOLUTION
    }

    pub fn served_customers(&self) -> u64 {
        self.served_customers
    }

    pub fn total_wait_time(&self) -> f64 {
        self.total_wait_time
    }

    pub fn total_busy_time(&self) -> f64 {
        self.total_busy_time
    }

    pub fn area_under_queue_length(&self) -> f64 {
        self.area_under_q
    }

    pub fn last_event_time(&self) -> f64 {
        self.last_event_time
    }

    pub fn current_queue_length(&self) -> usize {
        self.last_queue_length
    }

    pub fn current_customers_in_system(&self) -> usize {
        self.last_in_system
    }

    pub fn queue_trace(&self) -> Option<&[(f64, usize)]> {
        self.queue_trace.as_deref()
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}
