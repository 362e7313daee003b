// ui.rs - Controls and board painting

use eframe::egui;
use egui::{Color32, Stroke};
use life_core::PATTERNS;

use crate::app::LifeApp;
use crate::geometry::BoardGeometry;

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_ticks();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                if ui.button("⏭ Next generation").clicked() {
                    let result = self.sim.step();
                    self.report("step", result);
                }

                if ui.button("⏹ Clear").clicked() {
                    self.sim.clear_all();
                }

                if ui.button("🎲 Randomize").clicked() {
                    self.sim.randomize_all();
                }

                let running = self.sim.is_running();
                if ui.add_enabled(!running, egui::Button::new("▶ Simulate")).clicked() {
                    let result = self.sim.start(self.fps);
                    self.report("start", result);
                }

                if ui.add_enabled(running, egui::Button::new("⏸ Pause")).clicked() {
                    self.sim.stop();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.sim.generation_count()));
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Speed:");
                if ui
                    .add(egui::Slider::new(&mut self.fps, 1.0..=60.0).suffix(" fps"))
                    .changed()
                {
                    let result = self.sim.set_rate(self.fps);
                    self.report("set rate", result);
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    let result = self.sim.apply_pattern(PATTERNS[self.selected_pattern].name);
                    self.report("apply pattern", result);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            ui.label("Click cells to toggle them. Simulate runs continuously, Pause stops it.");

            ui.separator();

            let grid = self.sim.grid();
            let geometry = BoardGeometry::new(ui.cursor().min, grid.width(), grid.height());
            let (response, painter) =
                ui.allocate_painter(geometry.total_size(), egui::Sense::click());

            painter.rect_filled(response.rect, 0.0, Color32::GRAY);

            for (x, y, state) in grid.cells() {
                let rect = geometry.cell_rect(x, y);
                let color = if state.is_alive() { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, color);
                painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
            }

            if response.clicked() {
                if let Some((x, y)) = response
                    .interact_pointer_pos()
                    .and_then(|pos| geometry.cell_at(pos))
                {
                    let result = self.sim.toggle(x, y).map(|_| ());
                    self.report("toggle", result);
                }
            }

            ui.separator();

            let population = self.sim.population();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", population.live));
                ui.label(format!("Dead cells: {}", population.dead()));
                ui.label(format!("Population: {:.1}%", population.percent()));
            });
        });
    }
}
