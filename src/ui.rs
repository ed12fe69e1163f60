// ui.rs - egui presentation layer; translates widget events into controller
// calls and paints a read-only snapshot of the grid

use std::time::Instant;

use eframe::egui;
use egui::{Color32, Rect, Sense, Stroke, Vec2};

use crate::LifeApp;
use crate::grid::{COLS, ROWS};
use crate::patterns::PRESET_NAMES;
use crate::sim::Speed;

const CELL_SIZE: f32 = 14.0;
const CELL_SPACING: f32 = 0.5;

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pump the tick scheduler from the frame loop.
        if self.sim.poll(Instant::now()) {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Game of Life on a Torus");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.sim.is_running() { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.sim.toggle_running(Instant::now());
                }

                if ui.button("⏹ Clear").clicked() {
                    self.sim.clear();
                    self.selected_preset = 0;
                }

                if ui.button("🎲 Random").clicked() {
                    self.sim.randomize();
                    self.selected_preset = 0;
                }

                ui.separator();

                // Preset dropdown; selecting an entry loads it immediately
                ui.label("Preset:");
                let mut chosen = None;
                egui::ComboBox::from_id_source("preset_selector")
                    .selected_text(PRESET_NAMES[self.selected_preset])
                    .show_ui(ui, |ui| {
                        for (i, name) in PRESET_NAMES.iter().enumerate() {
                            if ui
                                .selectable_value(&mut self.selected_preset, i, *name)
                                .clicked()
                            {
                                chosen = Some(*name);
                            }
                        }
                    });
                if let Some(name) = chosen {
                    self.sim.load_preset(name);
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.sim.generation()));
            });

            ui.separator();

            // Speed control
            ui.horizontal(|ui| {
                ui.label("Speed:");
                for speed in Speed::ALL {
                    if ui.radio(self.sim.speed() == speed, speed.label()).clicked() {
                        self.sim.set_speed(speed);
                    }
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            ui.label("Click cells to toggle them alive/dead while paused. Edges wrap around.");

            ui.separator();

            // Draw the grid
            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (CELL_SIZE + CELL_SPACING) * COLS as f32 - CELL_SPACING,
                (CELL_SIZE + CELL_SPACING) * ROWS as f32 - CELL_SPACING,
            );

            let (response, painter) = ui.allocate_painter(total_size, Sense::click());

            painter.rect_filled(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Color32::BLACK,
            );

            for row in 0..ROWS {
                for col in 0..COLS {
                    let x = start_pos.x + col as f32 * (CELL_SIZE + CELL_SPACING);
                    let y = start_pos.y + row as f32 * (CELL_SIZE + CELL_SPACING);

                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(CELL_SIZE));

                    let cell_color = if self.sim.grid().get(row, col) {
                        self.live_color
                    } else {
                        self.dead_color
                    };

                    painter.rect_filled(rect, 1.0, cell_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));

                    // Clicks only land while idle; the controller rejects
                    // edits while running either way.
                    if response.clicked() {
                        if let Some(pos) = response.interact_pointer_pos() {
                            if rect.contains(pos) {
                                self.sim.toggle_cell(row, col);
                            }
                        }
                    }
                }
            }

            ui.separator();

            // Statistics
            let live_cells = self.sim.grid().live_count();
            let total_cells = ROWS * COLS;
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {live_cells}"));
                ui.label(format!("Dead cells: {}", total_cells - live_cells));
                ui.label(format!(
                    "Population: {:.1}%",
                    (live_cells as f32 / total_cells as f32) * 100.0
                ));
            });
        });

        // Keep the frame loop ticking while running
        if self.sim.is_running() {
            ctx.request_repaint();
        }
    }
}
