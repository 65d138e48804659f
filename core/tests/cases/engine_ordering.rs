use crate::common::Recorder;
use ssq_core::{EventType, Simulation};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_clock_follows_dispatched_event() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut sim = Simulation::new();

    // Follow-up delays cycle 0.0, 0.5, 1.0 so that some children land on
    // exactly the parent's time.
    let mut n = 0u32;
    let mut recorder = Recorder::new(Rc::clone(&log));
    recorder.follow_up = Box::new(move |_| {
        n += 1;
        (n < 200).then(|| f64::from(n % 3) * 0.5)
    });
    sim.add_component(1, Box::new(recorder));
    sim.schedule(0.0, 1, EventType::Arrival);
    sim.schedule(0.25, 1, EventType::Arrival);

    let mut last = sim.now();
    while sim.run_step() {
        let (_, event_time, seen_now) = *log.borrow().last().unwrap();
        assert_eq!(sim.now(), event_time, "clock must equal the dispatched event time");
        assert_eq!(seen_now, event_time, "handler must see the advanced clock");
        assert!(sim.now() >= last, "clock went backwards: {} -> {}", last, sim.now());
        last = sim.now();
    }
    assert_eq!(sim.event_count() as usize, log.borrow().len());
}

#[test]
fn test_equal_times_dispatch_in_schedule_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut sim = Simulation::new();
    for id in 1..=5 {
        sim.add_component(id, Box::new(Recorder::new(Rc::clone(&log))));
    }
    for id in [4, 2, 5, 1, 3] {
        sim.schedule(1.0, id, EventType::Departure);
    }
    sim.schedule(0.5, 5, EventType::Arrival);

    while sim.run_step() {}

    let order: Vec<u32> = log.borrow().iter().map(|(id, _, _)| *id).collect();
    assert_eq!(order, vec![5, 4, 2, 5, 1, 3]);
}

#[test]
fn test_peek_and_step() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut sim = Simulation::new();
    sim.add_component(1, Box::new(Recorder::new(Rc::clone(&log))));
    assert_eq!(sim.component_kind(1), Some("Recorder"));
    sim.schedule(3.0, 1, EventType::Arrival);
    sim.schedule(1.0, 1, EventType::Arrival);

    assert!(sim.has_next_event());
    assert_eq!(sim.peek_next_time(), 1.0);
    assert_eq!(sim.now(), 0.0, "peeking must not move the clock");

    assert!(sim.run_step());
    assert_eq!(sim.now(), 1.0);
    assert_eq!(sim.peek_next_time(), 3.0);
    assert_eq!(sim.event_count(), 1);
    assert_eq!(sim.pending_events(), 1);

    assert!(sim.run_step());
    assert!(!sim.has_next_event());
    assert!(sim.peek_next_time().is_infinite());
    assert!(!sim.run_step(), "stepping an empty engine is a no-op");
    assert_eq!(sim.now(), 3.0);
    assert_eq!(sim.event_count(), 2);
}

#[test]
fn test_event_for_unknown_node_is_counted_and_dropped() {
    let mut sim = Simulation::new();
    sim.schedule(2.0, 99, EventType::Arrival);
    assert_eq!(sim.component_kind(99), None);
    assert!(sim.run_step());
    assert_eq!(sim.now(), 2.0);
    assert_eq!(sim.event_count(), 1);
    assert!(!sim.has_next_event());
}
