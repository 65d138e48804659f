use eframe::egui;

pub const COLOR_BG: egui::Color32 = egui::Color32::from_rgb(43, 48, 59);
pub const COLOR_PANEL: egui::Color32 = egui::Color32::from_rgb(59, 66, 82);
pub const COLOR_STROKE: egui::Color32 = egui::Color32::from_rgb(76, 86, 106);
pub const COLOR_ACCENT: egui::Color32 = egui::Color32::from_rgb(136, 192, 208);
pub const COLOR_TEXT: egui::Color32 = egui::Color32::from_rgb(229, 233, 240);
pub const COLOR_TEXT_DIM: egui::Color32 = egui::Color32::from_rgb(144, 155, 175);
pub const COLOR_WARN: egui::Color32 = egui::Color32::from_rgb(235, 203, 139);
pub const COLOR_CRITICAL: egui::Color32 = egui::Color32::from_rgb(191, 97, 106);
pub const COLOR_SUCCESS: egui::Color32 = egui::Color32::from_rgb(163, 190, 140);
pub const COLOR_PURPLE: egui::Color32 = egui::Color32::from_rgb(180, 142, 173);
pub const COLOR_ORANGE: egui::Color32 = egui::Color32::from_rgb(208, 135, 112);
pub const COLOR_TEAL: egui::Color32 = egui::Color32::from_rgb(143, 188, 187);
