use crate::engine::{Event, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;

pub type NodeId = u32;

/// An entity the engine can dispatch events to.
///
/// Handlers run to completion. They see the engine only through the
/// `Scheduler` passed in for the duration of the call.
pub trait Component {
    fn on_event(&mut self, event: Event, scheduler: &mut Scheduler<'_>);
    fn kind(&self) -> &'static str;
}

/// Lets a component be registered with the engine while other entities keep
/// a handle to it (the client delivers customers straight to the server).
impl<C: Component + ?Sized> Component for Rc<RefCell<C>> {
    fn on_event(&mut self, event: Event, scheduler: &mut Scheduler<'_>) {
        self.borrow_mut().on_event(event, scheduler);
    }

    fn kind(&self) -> &'static str {
        self.borrow().kind()
    }
}
