use super::{BatchUploaderApp, APP_TITLE};
use eframe::egui::{self, Color32, RichText, Stroke};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
const ERROR_RED: Color32 = Color32::from_rgb(220, 50, 50);

impl BatchUploaderApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading(APP_TITLE);
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Upload files for processing and download the result")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);
                self.render_drop_zone(ui);

                if !self.state.status_message.is_empty() {
                    ui.add_space(15.0);
                    let color = if self.state.status_message.starts_with("Error:") {
                        ERROR_RED
                    } else {
                        ACCENT
                    };
                    ui.colored_label(color, &self.state.status_message);
                }

                if let Some(summary) = &self.state.selection_summary {
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new(summary)
                            .small()
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                }

                self.render_progress(ui);
                ui.add_space(20.0);
            });
        });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let (stroke, fill) = if self.state.dragging {
            (Stroke::new(2.0, ACCENT), ACCENT.gamma_multiply(0.1))
        } else {
            (
                Stroke::new(2.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
                Color32::TRANSPARENT,
            )
        };

        egui::Frame::none()
            .stroke(stroke)
            .fill(fill)
            .rounding(8.0)
            .inner_margin(32.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("⬆").size(40.0).color(Color32::GRAY));
                    ui.add_space(10.0);

                    let button = egui::Button::new("📁 Select Files").min_size(egui::vec2(160.0, 36.0));
                    if ui.add_enabled(!self.state.uploading, button).clicked() {
                        if let Some(paths) = FileDialog::new().pick_files() {
                            self.submit_paths(paths);
                        }
                    }

                    ui.add_space(15.0);
                    ui.label("Drag and drop or click to upload");
                    ui.add_space(5.0);
                    ui.label("Upload a ZIP OR a CSV file + images (PDF, JPG, JPEG, PNG)");
                });
            });
    }

    fn render_progress(&self, ui: &mut egui::Ui) {
        for (file_name, percent) in self.state.progress.iter() {
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.label(file_name);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{}%", percent));
                });
            });
            ui.add(
                egui::ProgressBar::new(f32::from(percent) / 100.0)
                    .fill(ACCENT)
                    .desired_width(ui.available_width()),
            );
        }
    }
}
