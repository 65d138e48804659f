use crate::traits::{Component, NodeId};
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Arrival,
    Departure,
}

/// A scheduled dispatch. Only the engine creates events, so they are
/// read-only once queued.
#[derive(Debug, Clone, Copy)]
pub struct Event {
    time: f64,
    seq: u64,
    node_id: NodeId,
    event_type: EventType,
}

impl Event {
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Event {}
impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-heap of pending events, FIFO among equal times.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Event>>,
    next_seq: u64,
}

impl EventQueue {
    pub fn push(&mut self, time: f64, node_id: NodeId, event_type: EventType) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Event {
            time,
            seq,
            node_id,
            event_type,
        }));
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(event)| event)
    }

    pub fn peek_time(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(event)| event.time)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// What a handler gets to see of the engine while it runs: the clock and
/// the ability to schedule follow-up events.
pub struct Scheduler<'a> {
    now: f64,
    queue: &'a mut EventQueue,
}

impl Scheduler<'_> {
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedules at an absolute time. Times before `now` are a caller bug.
    pub fn schedule(&mut self, time: f64, node_id: NodeId, event_type: EventType) {
        debug_assert!(
            time >= self.now,
            "{event_type:?} for node {node_id} scheduled at {time}, clock is at {}",
            self.now
        );
        self.queue.push(time, node_id, event_type);
    }

    pub fn schedule_in(&mut self, delay: f64, node_id: NodeId, event_type: EventType) {
        self.schedule(self.now + delay, node_id, event_type);
    }
}

/// Time-ordered dispatcher. It never looks inside events beyond their target
/// and has no horizon of its own; the caller decides when to stop stepping.
pub struct Simulation {
    time: f64,
    components: HashMap<NodeId, Box<dyn Component>>,
    queue: EventQueue,
    event_count: u64,
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            components: HashMap::new(),
            queue: EventQueue::default(),
            event_count: 0,
        }
    }

    pub fn add_component(&mut self, id: NodeId, component: Box<dyn Component>) {
        self.components.insert(id, component);
    }

    /// Queues an event. `time` should not be earlier than `now()`; this is
    /// checked in debug builds only.
    pub fn schedule(&mut self, time: f64, node_id: NodeId, event_type: EventType) {
        debug_assert!(time >= self.time, "event scheduled in the past: {time} < {}", self.time);
        self.queue.push(time, node_id, event_type);
    }

    pub fn has_next_event(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Earliest pending time, or `f64::INFINITY` when nothing is pending.
    pub fn peek_next_time(&self) -> f64 {
        self.queue.peek_time().unwrap_or(f64::INFINITY)
    }

    /// Dispatches the earliest event. Returns `false` if the queue was empty.
    pub fn run_step(&mut self) -> bool {
        let Some(event) = self.queue.pop() else {
            return false;
        };
        debug_assert!(event.time >= self.time);
        self.time = event.time;
        self.event_count += 1;

        if let Some(comp) = self.components.get_mut(&event.node_id) {
            trace!(
                "t={:.6} #{} {:?} -> {} {}",
                event.time,
                self.event_count,
                event.event_type,
                comp.kind(),
                event.node_id
            );
            let mut scheduler = Scheduler {
                now: self.time,
                queue: &mut self.queue,
            };
            comp.on_event(event, &mut scheduler);
        } else {
            warn!("dropping {:?} for unknown node {}", event.event_type, event.node_id);
        }
        true
    }

    pub fn now(&self) -> f64 {
        self.time
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Kind of the component registered under `id`, if any.
    pub fn component_kind(&self, id: NodeId) -> Option<&'static str> {
        self.components.get(&id).map(|comp| comp.kind())
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
