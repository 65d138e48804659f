use crate::theme::*;
use eframe::egui;
use egui_plot::{Corner, Legend, Line, Plot, PlotBounds, PlotPoints};

const ZOOM_IN: f64 = 0.4;
const ZOOM_OUT: f64 = 0.6;

/// Pending view changes for one chart, applied on the next frame.
#[derive(Clone, Default)]
pub struct PlotState {
    reset_bounds: bool,
    target_bounds: Option<PlotBounds>,
}

impl PlotState {
    /// Keeps the centre and scales each half-extent by `factor`.
    fn zoom(&mut self, current: PlotBounds, factor: f64) {
        let min = current.min();
        let max = current.max();
        let center = [(min[0] + max[0]) / 2.0, (min[1] + max[1]) / 2.0];
        let half = [(max[0] - min[0]) * factor, (max[1] - min[1]) * factor];
        self.target_bounds = Some(PlotBounds::from_min_max(
            [center[0] - half[0], center[1] - half[1]],
            [center[0] + half[0], center[1] + half[1]],
        ));
    }

    fn reset(&mut self) {
        self.reset_bounds = true;
        self.target_bounds = None;
    }

    fn take_target_bounds(&mut self) -> Option<PlotBounds> {
        self.target_bounds.take()
    }

    fn take_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset_bounds)
    }
}

/// A framed line chart of one sampled series with zoom controls.
pub struct SeriesPlot<'a> {
    id: &'a str,
    title: &'a str,
    color: egui::Color32,
    points: &'a [[f64; 2]],
    state: &'a mut PlotState,
    width: Option<f32>,
    height: f32,
}

impl<'a> SeriesPlot<'a> {
    pub fn new(
        id: &'a str,
        title: &'a str,
        color: egui::Color32,
        points: &'a [[f64; 2]],
        state: &'a mut PlotState,
    ) -> Self {
        Self {
            id,
            title,
            color,
            points,
            state,
            width: None,
            height: 240.0,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}

impl egui::Widget for SeriesPlot<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let SeriesPlot {
            id,
            title,
            color,
            points,
            state,
            width,
            height,
        } = self;

        egui::Frame::none()
            .fill(COLOR_PANEL)
            .stroke(egui::Stroke::new(1.0, COLOR_STROKE))
            .rounding(5.0)
            .inner_margin(egui::Margin::same(10.0))
            .show(ui, |ui| {
                let (mut zoom_in, mut zoom_out, mut reset) = (false, false, false);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(title).strong().color(COLOR_TEXT));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        reset = ui.small_button("Reset").clicked();
                        zoom_out = ui.small_button("-").clicked();
                        zoom_in = ui.small_button("+").clicked();
                    });
                });

                if points.is_empty() {
                    ui.allocate_ui(egui::vec2(width.unwrap_or(ui.available_width()), height), |ui| {
                        ui.centered_and_justified(|ui| {
                            ui.label(egui::RichText::new("NO SAMPLES").small().color(COLOR_TEXT_DIM));
                        });
                    });
                    return;
                }

                let mut plot = Plot::new(id)
                    .legend(Legend::default().position(Corner::LeftTop))
                    .height(height)
                    .allow_zoom(true)
                    .allow_drag(true)
                    .allow_scroll(true);
                if let Some(width) = width {
                    plot = plot.width(width);
                }
                if state.take_reset() {
                    plot = plot.auto_bounds(egui::Vec2b::TRUE);
                }

                let response = plot.show(ui, |plot_ui| {
                    if let Some(bounds) = state.take_target_bounds() {
                        plot_ui.set_plot_bounds(bounds);
                    }
                    plot_ui.line(
                        Line::new(PlotPoints::from(points.to_vec()))
                            .color(color)
                            .name(title),
                    );
                    plot_ui.plot_bounds()
                });

                let bounds = response.inner;
                if zoom_in {
                    state.zoom(bounds, ZOOM_IN);
                } else if zoom_out {
                    state.zoom(bounds, ZOOM_OUT);
                } else if reset {
                    state.reset();
                }
                if zoom_in || zoom_out || reset {
                    ui.ctx().request_repaint();
                }
            })
            .response
    }
}

/// Headline number with its steady-state reference, if there is one.
pub struct StatTile {
    label: &'static str,
    value_text: String,
    reference_text: Option<String>,
    color: egui::Color32,
    size: egui::Vec2,
}

impl StatTile {
    pub fn new(label: &'static str, value_text: String, color: egui::Color32) -> Self {
        Self {
            label,
            value_text,
            reference_text: None,
            color,
            size: egui::vec2(150.0, 45.0),
        }
    }

    pub fn reference(mut self, text: Option<String>) -> Self {
        self.reference_text = text;
        self
    }
}

impl egui::Widget for StatTile {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(self.size, egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 2.0, egui::Color32::from_black_alpha(40));
            painter.rect_stroke(rect, 2.0, egui::Stroke::new(1.0, egui::Color32::from_gray(60)));

            painter.text(
                rect.left_top() + egui::vec2(8.0, 4.0),
                egui::Align2::LEFT_TOP,
                self.label,
                egui::FontId::proportional(10.0),
                COLOR_TEXT_DIM,
            );
            painter.text(
                rect.right_top() + egui::vec2(-8.0, 4.0),
                egui::Align2::RIGHT_TOP,
                &self.value_text,
                egui::FontId::proportional(13.0),
                self.color,
            );
            let reference = self.reference_text.unwrap_or_else(|| "no steady state".to_owned());
            painter.text(
                rect.right_bottom() + egui::vec2(-8.0, -4.0),
                egui::Align2::RIGHT_BOTTOM,
                reference,
                egui::FontId::proportional(10.0),
                COLOR_TEXT_DIM,
            );
        }

        response
    }
}
