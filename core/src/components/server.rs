use crate::engine::{Event, EventType, Scheduler};
use crate::random::VariateSource;
use crate::statistics::Statistics;
use crate::traits::{Component, NodeId};
use log::debug;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Single server with an unbounded FIFO backlog.
///
/// A customer leaves `queue` only when its service starts, so the backlog
/// never includes the customer in service. Served count and busy time are
/// booked for the full service duration at the moment service starts.
pub struct Server {
    node_id: NodeId,
    /// Service rate (mu)
    service_rate: f64,
    queue: VecDeque<f64>,
    busy: bool,
    stats: Rc<RefCell<Statistics>>,
    variates: Box<dyn VariateSource>,
    received: u64,
}

impl Server {
    pub fn new(
        node_id: NodeId,
        service_rate: f64,
        stats: Rc<RefCell<Statistics>>,
        variates: Box<dyn VariateSource>,
    ) -> Self {
        debug_assert!(service_rate > 0.0, "service rate must be positive");
        Self {
            node_id,
            service_rate,
            queue: VecDeque::new(),
            busy: false,
            stats,
            variates,
            received: 0,
        }
    }

    /// Enqueues a customer arriving now and starts service if idle.
    pub fn receive_customer(&mut self, scheduler: &mut Scheduler<'_>) {
        let now = scheduler.now();
        self.received += 1;
        self.queue.push_back(now);
        {
            let mut stats = self.stats.borrow_mut();
            stats.record_queue_change(now, self.queue.len());
            stats.record_system_change(now, self.customers_in_system());
        }
        if !self.busy {
            self.start_service(scheduler);
        }
    }

    /// Takes the oldest waiting customer into service. Does nothing when the
    /// backlog is empty.
    pub fn start_service(&mut self, scheduler: &mut Scheduler<'_>) {
        let Some(arrival_time) = self.queue.pop_front() else {
            return;
        };
        let now = scheduler.now();
        self.busy = true;

        let service_time = self.variates.exponential(self.service_rate);
        {
            let mut stats = self.stats.borrow_mut();
            stats.record_queue_change(now, self.queue.len());
            stats.record_system_change(now, self.customers_in_system());
            stats.record_service_start(now - arrival_time);
            stats.record_service_end(service_time);
        }

        scheduler.schedule(now + service_time, self.node_id, EventType::Departure);
    }

    fn handle_departure(&mut self, scheduler: &mut Scheduler<'_>) {
        self.busy = false;
        self.stats
            .borrow_mut()
            .record_system_change(scheduler.now(), self.customers_in_system());
        if !self.queue.is_empty() {
            self.start_service(scheduler);
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn customers_in_system(&self) -> usize {
        self.queue.len() + usize::from(self.busy)
    }

    /// Customers handed to this server so far.
    pub fn received(&self) -> u64 {
        self.received
    }
}

impl Component for Server {
    fn on_event(&mut self, event: Event, scheduler: &mut Scheduler<'_>) {
        match event.event_type() {
            EventType::Departure => self.handle_departure(scheduler),
            other => debug!("server {} ignores {:?}", self.node_id, other),
        }
    }

    fn kind(&self) -> &'static str {
        "Server"
    }
}
