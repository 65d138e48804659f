use ssq_core::{Report, StopCondition};

fn stop_label(stop: &StopCondition) -> String {
    match stop {
        StopCondition::Time(t) => format!("time {t}"),
        StopCondition::Events(n) => format!("{n} events"),
        StopCondition::Customers(n) => format!("{n} customers"),
    }
}

pub fn seed_label(seed: Option<u64>) -> String {
    seed.map_or_else(|| "scripted".to_owned(), |s| s.to_string())
}

/// Console rendering of a finished run.
pub fn render(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("=== M/M/1 simulation ===\n");
    out.push_str(&format!(
        "arrival rate (lambda): {:.4}\nservice rate (mu):     {:.4}\nstop:                  {}\nseed:                  {}\n\n",
        report.arrival_rate,
        report.service_rate,
        stop_label(&report.stop),
        seed_label(report.seed)
    ));

    out.push_str("--- results ---\n");
    out.push_str(&format!("simulated time:         {:.2}\n", report.total_time));
    out.push_str(&format!("events:                 {}\n", report.events));
    out.push_str(&format!("customers served:       {}\n", report.customers_served));
    out.push_str(&format!("customers waiting:      {}\n", report.customers_waiting));
    out.push_str(&format!("average wait:           {:.4}\n", report.average_wait));
    out.push_str(&format!(
        "wait p50 / p99:         {:.3} / {:.3}\n",
        report.p50_wait, report.p99_wait
    ));
    out.push_str(&format!("average queue length:   {:.4}\n", report.average_queue_length));
    out.push_str(&format!(
        "average in system:      {:.4}\n",
        report.average_customers_in_system
    ));
    out.push_str(&format!("utilization:            {:.4}\n", report.utilization));
    out.push_str(&format!("throughput:             {:.4}\n\n", report.throughput));

    match &report.theory {
        Some(t) => {
            out.push_str(&format!("--- M/M/1 steady state (rho = {:.4}) ---\n", t.rho));
            out.push_str(&format!("wait in queue:          {:.4}\n", t.wait));
            out.push_str(&format!("queue length:           {:.4}\n", t.queue_length));
            out.push_str(&format!("customers in system:    {:.4}\n", t.customers_in_system));
            out.push_str(&format!("utilization:            {:.4}\n\n", t.utilization));
        }
        None => out.push_str("--- no steady state: rho >= 1, the queue grows without bound ---\n\n"),
    }

    out.push_str(&format!(
        "wall time {:.3}s, {:.0} events/s\n",
        report.wall_seconds, report.events_per_second
    ));
    out
}
