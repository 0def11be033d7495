// ui.rs - egui projection of the board plus the control row

use std::time::Duration;

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};

use crate::app::LifeViewer;
use crate::board::CellVisual;

const BOX_SIZE: f32 = 12.0;
const SPACING: f32 = 0.5;

fn cell_color(visual: CellVisual) -> Color32 {
    match visual {
        CellVisual::On => Color32::from_rgb(0, 200, 0),
        CellVisual::PreviouslyAlive => Color32::from_rgb(90, 110, 45),
        CellVisual::Off => Color32::from_rgb(40, 40, 40),
    }
}

impl eframe::App for LifeViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_frame();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Remote Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.scheduler.is_running() {
                    "⏸ Stop"
                } else {
                    "▶ Start"
                };
                if ui.button(button_text).clicked() {
                    self.toggle_running();
                }

                if ui.button("Advance").clicked() {
                    self.request_advance();
                }

                if ui.button("Reset").clicked() {
                    self.request_reset();
                }

                if ui.button("🎲 Randomize").clicked() {
                    self.request_randomize();
                }

                ui.separator();

                ui.label("Width:");
                ui.add(egui::TextEdit::singleline(&mut self.width_input).desired_width(36.0));
                ui.label("Height:");
                ui.add(egui::TextEdit::singleline(&mut self.height_input).desired_width(36.0));
                if ui.button("New Board").clicked() {
                    self.request_new_board();
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label(format!("Generations: {}", self.board.generations()));
                ui.separator();
                ui.label(format!("Live Cells: {}", self.board.live_cells()));
            });

            ui.separator();

            if let Some(dims) = self.board.dimensions() {
                // x runs over width (rows), y over height (columns); this is
                // the same orientation the linear cell ids use.
                let rows = dims.width;
                let cols = dims.height;

                let start_pos = ui.cursor().min;
                let total_size = Vec2::new(
                    (BOX_SIZE + SPACING) * cols as f32 - SPACING,
                    (BOX_SIZE + SPACING) * rows as f32 - SPACING,
                );

                let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

                painter.rect_filled(
                    Rect::from_min_size(start_pos, total_size),
                    0.0,
                    Color32::BLACK,
                );

                let click_pos = if response.clicked() {
                    response.interact_pointer_pos()
                } else {
                    None
                };
                let mut clicked_cell = None;

                for x in 0..rows {
                    for y in 0..cols {
                        let id = dims.index(x, y);

                        let px = start_pos.x + y as f32 * (BOX_SIZE + SPACING);
                        let py = start_pos.y + x as f32 * (BOX_SIZE + SPACING);
                        let rect =
                            Rect::from_min_size(egui::pos2(px, py), Vec2::splat(BOX_SIZE));

                        painter.rect_filled(rect, 1.0, cell_color(self.cell_visual(id)));
                        painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));

                        if let Some(pos) = click_pos {
                            if rect.contains(pos) {
                                clicked_cell = Some(id);
                            }
                        }
                    }
                }

                if let Some(id) = clicked_cell {
                    self.toggle_cell(id);
                }
            } else {
                ui.label("Waiting for the first board from the server…");
            }
        });

        if self.scheduler.is_running() {
            ctx.request_repaint();
        } else {
            // Keep draining the outcome channel while requests are in flight.
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
