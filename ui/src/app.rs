use crate::analytics::{PlotState, SeriesPlot, StatTile};
use crate::report::seed_label;
use crate::theme::*;
use eframe::egui;
use ssq_core::{MetricPoint, MetricsCollector, Report};

struct Series {
    id: &'static str,
    title: &'static str,
    color: egui::Color32,
    points: Vec<[f64; 2]>,
    state: PlotState,
}

impl Series {
    fn new(
        id: &'static str,
        title: &'static str,
        color: egui::Color32,
        metrics: &MetricsCollector,
        field: impl Fn(&MetricPoint) -> f64,
    ) -> Self {
        Self {
            id,
            title,
            color,
            points: metrics.series(field),
            state: PlotState::default(),
        }
    }
}

/// Read-only viewer of a finished run: headline numbers on top, the sampled
/// time series below in a 3x2 grid.
pub struct ResultsViewer {
    report: Report,
    series: Vec<Series>,
}

impl ResultsViewer {
    pub fn new(report: Report, metrics: &MetricsCollector) -> Self {
        let series = vec![
            Series::new("queue_length", "Queue Length", COLOR_ACCENT, metrics, |p| {
                p.queue_length as f64
            }),
            Series::new("mean_wait", "Average Wait Time", COLOR_WARN, metrics, |p| p.mean_wait),
            Series::new("utilization", "Server Utilization", COLOR_SUCCESS, metrics, |p| {
                p.utilization
            }),
            Series::new("served", "Customers Served", COLOR_PURPLE, metrics, |p| p.served as f64),
            Series::new("in_system", "Customers in System", COLOR_ORANGE, metrics, |p| {
                p.customers_in_system as f64
            }),
            Series::new("throughput", "Throughput", COLOR_TEAL, metrics, |p| p.throughput),
        ];
        Self { report, series }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        let r = &self.report;
        let theory = r.theory.as_ref();

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(format!("λ={:.3}  μ={:.3}", r.arrival_rate, r.service_rate))
                        .strong()
                        .color(COLOR_TEXT),
                );
                ui.label(
                    egui::RichText::new(format!(
                        "t={:.1}  {} events  seed {}",
                        r.total_time,
                        r.events,
                        seed_label(r.seed)
                    ))
                    .small()
                    .color(COLOR_TEXT_DIM),
                );
                if theory.is_none() {
                    ui.label(
                        egui::RichText::new("ρ ≥ 1: no steady state")
                            .small()
                            .color(COLOR_CRITICAL),
                    );
                }
            });
            ui.add_space(12.0);

            ui.add(
                StatTile::new("AVG WAIT", format!("{:.4}", r.average_wait), COLOR_WARN)
                    .reference(theory.map(|t| format!("theory {:.4}", t.wait))),
            );
            ui.add_space(8.0);
            ui.add(
                StatTile::new("AVG QUEUE", format!("{:.4}", r.average_queue_length), COLOR_ACCENT)
                    .reference(theory.map(|t| format!("theory {:.4}", t.queue_length))),
            );
            ui.add_space(8.0);
            ui.add(
                StatTile::new("UTILIZATION", format!("{:.4}", r.utilization), COLOR_SUCCESS)
                    .reference(theory.map(|t| format!("theory {:.4}", t.utilization))),
            );
            ui.add_space(8.0);
            ui.add(
                StatTile::new("THROUGHPUT", format!("{:.4}", r.throughput), COLOR_TEAL)
                    .reference(theory.map(|t| format!("theory {:.4}", t.throughput))),
            );
            ui.add_space(8.0);
            ui.add(
                StatTile::new("SERVED", r.customers_served.to_string(), COLOR_PURPLE)
                    .reference(Some(format!("{} waiting", r.customers_waiting))),
            );
        });
    }

    fn render_grid(&mut self, ui: &mut egui::Ui) {
        let column_width = (ui.available_width() - 20.0) / 2.0;
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("series_grid")
                .num_columns(2)
                .spacing([10.0, 10.0])
                .min_col_width(column_width)
                .show(ui, |ui| {
                    for (i, s) in self.series.iter_mut().enumerate() {
                        ui.add(
                            SeriesPlot::new(s.id, s.title, s.color, &s.points, &mut s.state)
                                .width(column_width - 20.0),
                        );
                        if i % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });
        });
    }
}

impl eframe::App for ResultsViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("run_summary")
            .frame(egui::Frame::none().fill(COLOR_PANEL).inner_margin(12.0))
            .show(ctx, |ui| {
                self.render_header(ui);
            });
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(COLOR_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                self.render_grid(ui);
            });
    }
}
