use crate::catalog;
use crate::model::Rgba;
use eframe::egui;
use std::time::Duration;

use super::FormApp;

impl eframe::App for FormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_workers();
        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // a release anywhere finishes every open stroke
        if self.recorder.is_drawing() && !ctx.input(|i| i.pointer.any_down()) {
            self.recorder.end();
        }

        egui::TopBottomPanel::bottom("save_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Pen Color:");
                let mut color = self.pen.color.to_color32();
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    self.set_pen_color(Rgba::from_color32(color));
                }
                ui.separator();
                let saving = self.pending_save.is_some();
                if ui
                    .add_enabled(!saving, egui::Button::new("Save Form"))
                    .clicked()
                {
                    self.save();
                }
            });
            if let Some(status) = &self.status {
                ui.label(status.as_str());
            }
            ui.small(format!("Your User ID is: {}", self.user_id_label()));
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .drag_to_scroll(false)
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Midterm Clinical Site Contact Form");
                        ui.label(
                            "Please fill out this form and use the space provided to add notes with your pen or stylus.",
                        );
                    });
                    ui.add_space(12.0);
                    for section in catalog::sections() {
                        ui.separator();
                        ui.label(egui::RichText::new(section.title).size(18.0).strong());
                        ui.add_space(8.0);
                        for index in section.questions {
                            self.question_row(ui, index);
                            ui.add_space(12.0);
                        }
                    }
                });
        });
    }
}
