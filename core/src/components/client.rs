use crate::components::server::Server;
use crate::engine::{Event, EventType, Scheduler};
use crate::random::VariateSource;
use crate::traits::Component;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Open-loop Poisson source feeding one server.
///
/// Every `Arrival` it receives hands a customer to the server and books the
/// next `Arrival` for itself, so the stream only ends when the driver stops.
pub struct Client {
    /// Arrival rate (lambda)
    arrival_rate: f64,
    target: Rc<RefCell<Server>>,
    variates: Box<dyn VariateSource>,
}

impl Client {
    pub fn new(
        arrival_rate: f64,
        target: Rc<RefCell<Server>>,
        variates: Box<dyn VariateSource>,
    ) -> Self {
        debug_assert!(arrival_rate > 0.0, "arrival rate must be positive");
        Self {
            arrival_rate,
            target,
            variates,
        }
    }
}

impl Component for Client {
    fn on_event(&mut self, event: Event, scheduler: &mut Scheduler<'_>) {
        match event.event_type() {
            EventType::Arrival => {
                self.target.borrow_mut().receive_customer(scheduler);

                let interval = self.variates.exponential(self.arrival_rate);
                scheduler.schedule_in(interval, event.node_id(), EventType::Arrival);
            }
            other => debug!("client {} ignores {:?}", event.node_id(), other),
        }
    }

    fn kind(&self) -> &'static str {
        "Client"
    }
}
