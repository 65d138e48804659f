use crate::common::TestHarness;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_mean_wait_times_served_is_total_wait() {
    for seed in [1, 2, 3] {
        let mut h = TestHarness::new_with_seed(seed, 0.9, 1.0);
        h.start();
        h.run_until(20_000.0);

        let stats = h.stats();
        let served = stats.served_customers() as f64;
        assert!(served > 0.0);
        assert!(
            close(served * stats.average_wait_time(), stats.total_wait_time()),
            "seed {}: {} * {} != {}",
            seed,
            served,
            stats.average_wait_time(),
            stats.total_wait_time()
        );
    }
}

#[test]
fn test_area_matches_reconstructed_step_function() {
    let mut h = TestHarness::new_with_seed(17, 0.95, 1.0).with_queue_trace();
    h.start();
    h.run_until(10_000.0);

    let stats = h.stats();
    let trace = stats.queue_trace().unwrap();
    assert!(trace.len() > 1000);

    let mut area = 0.0;
    let (mut t_prev, mut len_prev) = (0.0, 0usize);
    for &(t, len) in trace {
        assert!(t >= t_prev, "queue changes must be recorded in time order");
        area += len_prev as f64 * (t - t_prev);
        t_prev = t;
        len_prev = len;
    }

    assert!(close(area, stats.area_under_queue_length()));
    assert_eq!(stats.last_event_time(), t_prev);
    assert_eq!(stats.current_queue_length(), len_prev);
    assert_eq!(len_prev, h.server().queue_len());
}

#[test]
fn test_every_customer_is_served_once_or_still_waiting() {
    for (seed, lambda, mu) in [(5, 0.5, 1.0), (6, 1.2, 1.0), (7, 1.0, 1.0)] {
        let mut h = TestHarness::new_with_seed(seed, lambda, mu);
        h.start();
        h.run_until(5_000.0);

        let server = h.server();
        let stats = h.stats();
        assert_eq!(
            server.received(),
            stats.served_customers() + server.queue_len() as u64,
            "seed {seed}: received = served + waiting"
        );
    }
}

#[test]
fn test_customers_in_system_tracks_queue_plus_server() {
    let mut h = TestHarness::new_with_seed(11, 0.7, 1.0);
    h.start();
    h.run_until(50_000.0);

    let now = h.sim.now();
    let stats = h.stats();
    let in_queue = stats.average_queue_length(now);
    let in_system = stats.average_customers_in_system(now);
    assert_eq!(stats.current_customers_in_system(), h.server().customers_in_system());
    // L = Lq + fraction of time busy
    assert!(in_system > in_queue);
    assert!((in_system - in_queue - 0.7).abs() < 0.05, "L - Lq = {}", in_system - in_queue);
}
