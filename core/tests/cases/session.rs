use ssq_core::{
    Error, ScriptedVariates, Session, SimulationConfig, Statistics, StopCondition, CLIENT_ID,
    SERVER_ID,
};

fn config(stop: StopCondition) -> SimulationConfig {
    SimulationConfig {
        arrival_rate: 0.5,
        service_rate: 1.0,
        stop,
        seed: Some(42),
        sample_interval: 100.0,
        ..Default::default()
    }
}

#[test]
fn test_stop_after_event_count() {
    let mut s = Session::new(config(StopCondition::Events(1_000))).unwrap();
    let report = s.run();
    assert_eq!(report.events, 1_000);
    assert_eq!(s.simulation().event_count(), 1_000);
}

#[test]
fn test_stop_after_customers() {
    let mut s = Session::new(config(StopCondition::Customers(500))).unwrap();
    let report = s.run();
    assert_eq!(report.customers_served, 500);
}

#[test]
fn test_stop_at_time_horizon() {
    let mut s = Session::new(config(StopCondition::Time(10_000.0))).unwrap();
    let report = s.run();
    assert!(report.total_time < 10_000.0);
    assert!(s.simulation().peek_next_time() >= 10_000.0);
    assert!(!s.should_continue());
    assert!(!s.step(), "a finished session stays finished");

    let samples = s.metrics().history.len();
    assert!((90..=101).contains(&samples), "expected ~100 samples, got {}", samples);
    let times: Vec<f64> = s.metrics().history.iter().map(|p| p.sim_time).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_metric_history_spans_whole_run_when_capped() {
    let mut cfg = config(StopCondition::Time(10_000.0));
    cfg.max_samples = 10;
    let mut s = Session::new(cfg).unwrap();
    s.run();

    let history = &s.metrics().history;
    assert!(history.len() <= 10, "history grew to {}", history.len());
    let first = history.front().map(|p| p.sim_time).unwrap();
    let last = history.back().map(|p| p.sim_time).unwrap();
    assert_eq!(first, 0.0, "the start of the run must survive thinning");
    assert!(last > 5_000.0, "the end of the run must be sampled, got t={}", last);
    assert!(s.metrics().sample_interval() > 100.0, "interval should have widened");
}

#[test]
fn test_session_conserves_customers() {
    let mut s = Session::new(config(StopCondition::Events(5_000))).unwrap();
    let report = s.run();

    let server = s.server();
    assert_eq!(server.received(), report.customers_served + report.customers_waiting as u64);
    assert_eq!(s.stats().served_customers(), report.customers_served);
    assert_eq!(s.stats().current_customers_in_system(), server.customers_in_system());
    assert_eq!(s.simulation().component_kind(CLIENT_ID), Some("Client"));
    assert_eq!(s.simulation().component_kind(SERVER_ID), Some("Server"));
}

#[test]
fn test_scripted_session_reports_no_seed() {
    let mut cfg = config(StopCondition::Customers(2));
    cfg.seed = None;
    let mut s = Session::with_sources(
        cfg,
        Box::new(ScriptedVariates::once(vec![1.0])),
        Box::new(ScriptedVariates::repeating(vec![0.5])),
        Statistics::new(),
    )
    .unwrap();
    let report = s.run();

    assert_eq!(report.seed, None);
    assert_eq!(report.customers_served, 2);
    assert_eq!(report.average_wait, 0.0);
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["seed"].is_null());
}

#[test]
fn test_stable_queue_approaches_theory() {
    let mut s = Session::new(config(StopCondition::Customers(200_000))).unwrap();
    let report = s.run();
    let theory = report.theory.expect("rho = 0.5 has a steady state");

    let rel = |measured: f64, expected: f64| (measured - expected).abs() / expected;
    assert!(rel(report.average_wait, theory.wait) < 0.1, "wait {} vs {}", report.average_wait, theory.wait);
    assert!(
        rel(report.average_queue_length, theory.queue_length) < 0.1,
        "queue {} vs {}",
        report.average_queue_length,
        theory.queue_length
    );
    assert!((report.utilization - theory.utilization).abs() < 0.02);
    assert!((report.throughput - theory.throughput).abs() < 0.02);
    assert!(report.p50_wait <= report.p99_wait);
}

#[test]
fn test_report_serializes() {
    let mut s = Session::new(config(StopCondition::Events(100))).unwrap();
    let report = s.run();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["events"], 100);
    assert_eq!(json["seed"], 42);
    assert_eq!(json["stop"]["events"], 100);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = Session::new(config(StopCondition::Time(-1.0))).err().unwrap();
    assert!(matches!(err, Error::InvalidParameter { name: "stop.time", .. }), "{err}");
    assert!(
        Session::new(config(StopCondition::Time(f64::INFINITY))).is_err(),
        "an unbounded horizon would never stop"
    );

    let mut cfg = config(StopCondition::Events(10));
    cfg.arrival_rate = 0.0;
    assert!(Session::new(cfg).is_err());
}

#[test]
fn test_config_round_trips_through_file() {
    let path = std::env::temp_dir().join(format!("ssq-config-{}.json", std::process::id()));
    let cfg = config(StopCondition::Customers(7));
    std::fs::write(&path, cfg.to_json().unwrap()).unwrap();

    let loaded = SimulationConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded.stop, StopCondition::Customers(7));
    assert_eq!(loaded.seed, Some(42));

    let missing = SimulationConfig::load(path.with_extension("missing"));
    assert!(matches!(missing, Err(Error::Io(_))));
}
