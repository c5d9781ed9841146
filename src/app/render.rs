use crate::annotation::{PointerSample, map_to_surface};
use crate::catalog::{self, InputKind, Question};
use crate::model::{Point, RectF};
use eframe::egui;

use super::FormApp;

const SELECT_PLACEHOLDER: &str = "Select an option";

impl FormApp {
    pub(super) fn question_row(&mut self, ui: &mut egui::Ui, index: usize) {
        let Some(question) = self.questions.get(index).cloned() else {
            return;
        };
        let key = catalog::surface_key(question.id);
        ui.columns(2, |cols| {
            self.question_input(&mut cols[0], &question);
            self.annotation_canvas(&mut cols[1], &key);
        });
    }

    fn question_input(&mut self, ui: &mut egui::Ui, q: &Question) {
        ui.label(egui::RichText::new(q.label).strong());
        if let Some(sublabel) = q.sublabel {
            ui.label(egui::RichText::new(sublabel).small().weak());
        }

        match q.kind {
            InputKind::Text => {
                let mut value = self.form.text(q.id).to_string();
                let edit = egui::TextEdit::singleline(&mut value).desired_width(f32::INFINITY);
                if ui.add(edit).changed() {
                    self.form.set(q.id, value);
                }
            }
            InputKind::Textarea { rows } => {
                let mut value = self.form.text(q.id).to_string();
                let edit = egui::TextEdit::multiline(&mut value)
                    .desired_rows(rows)
                    .desired_width(f32::INFINITY);
                if ui.add(edit).changed() {
                    self.form.set(q.id, value);
                }
            }
            InputKind::Radio => {
                let current = self.form.text(q.id).to_string();
                for option in &q.options {
                    if ui.radio(current == *option, option.as_str()).clicked() {
                        self.form.set(q.id, option.clone());
                    }
                }
            }
            InputKind::Checkbox => {
                for option in &q.options {
                    let mut checked = self.form.get(q.id).is_some_and(|v| v.contains(option));
                    if ui.checkbox(&mut checked, option.as_str()).changed() {
                        self.form.toggle_in_set(q.id, option, checked);
                    }
                }
            }
            InputKind::Select => {
                let current = self.form.text(q.id).to_string();
                let shown = if current.is_empty() {
                    SELECT_PLACEHOLDER.to_string()
                } else {
                    current.clone()
                };
                let mut chosen = None;
                egui::ComboBox::from_id_salt(q.id)
                    .selected_text(shown)
                    .show_ui(ui, |ui| {
                        if ui.selectable_label(current.is_empty(), SELECT_PLACEHOLDER).clicked() {
                            chosen = Some(String::new());
                        }
                        for option in &q.options {
                            if ui.selectable_label(current == *option, option.as_str()).clicked() {
                                chosen = Some(option.clone());
                            }
                        }
                    });
                if let Some(value) = chosen {
                    self.form.set(q.id, value);
                }
            }
        }
    }

    fn annotation_canvas(&mut self, ui: &mut egui::Ui, key: &str) {
        let desired = egui::vec2(ui.available_width(), self.canvas_height);
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::drag());
        let size = (
            rect.width().round().max(0.0) as u32,
            rect.height().round().max(0.0) as u32,
        );
        self.surfaces.dimension(key, size, self.pen);

        let bounds = RectF::from_rect(rect);
        if response.drag_started() || response.dragged() {
            let sample = pointer_sample(ui.ctx(), &response);
            if let Some(local) = map_to_surface(&sample, bounds) {
                let inside = local.x >= 0.0
                    && local.y >= 0.0
                    && local.x <= bounds.width()
                    && local.y <= bounds.height();
                if response.drag_started() {
                    self.recorder.begin(&self.surfaces, key, local);
                } else if inside {
                    self.recorder.extend(&mut self.surfaces, key, local);
                } else {
                    // leaving the canvas ends the stroke
                    self.recorder.end_surface(key);
                }
            }
        }
        if response.drag_stopped() {
            self.recorder.end_surface(key);
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 8.0, egui::Color32::WHITE);
        if let Some(texture) = self.surface_texture(ui.ctx(), key) {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture, rect, uv, egui::Color32::WHITE);
        }
        painter.rect_stroke(
            rect,
            8.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(200)),
            egui::StrokeKind::Inside,
        );
        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }

        if ui
            .small_button(egui::RichText::new("Clear Notes").color(egui::Color32::from_rgb(220, 60, 60)))
            .clicked()
        {
            self.recorder.end_surface(key);
            self.surfaces.clear(key);
        }
    }

    /// Texture showing the surface's current pixels, re-uploaded only when
    /// the surface revision moved.
    fn surface_texture(&mut self, ctx: &egui::Context, key: &str) -> Option<egui::TextureId> {
        let surface = self.surfaces.get(key)?;
        if !surface.is_dimensioned() {
            return None;
        }
        let revision = surface.revision();
        if let Some((texture, seen)) = self.textures.get(key) {
            if *seen == revision {
                return Some(texture.id());
            }
        }

        let (w, h) = surface.size();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [w as usize, h as usize],
            surface.pixmap().pixels(),
        );
        let options = egui::TextureOptions::NEAREST;
        let id = match self.textures.get_mut(key) {
            Some((texture, seen)) => {
                texture.set(image, options);
                *seen = revision;
                texture.id()
            }
            None => {
                let texture = ctx.load_texture(key, image, options);
                let id = texture.id();
                self.textures.insert(key.to_string(), (texture, revision));
                id
            }
        };
        Some(id)
    }
}

/// Pointer position plus any touch points reported this frame.
fn pointer_sample(ctx: &egui::Context, response: &egui::Response) -> PointerSample {
    let touches: Vec<Point> = ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|e| match e {
                egui::Event::Touch { pos, phase, .. }
                    if !matches!(phase, egui::TouchPhase::End | egui::TouchPhase::Cancel) =>
                {
                    Some(Point::from_pos2(*pos))
                }
                _ => None,
            })
            .collect()
    });
    PointerSample {
        pointer: response.interact_pointer_pos().map(Point::from_pos2),
        touches,
    }
}
