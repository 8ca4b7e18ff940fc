// ui.rs - Controls, board drawing and mouse editing

use std::time::{SystemTime, UNIX_EPOCH};

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use tokio::sync::broadcast::error::TryRecvError;
use tracing::warn;

use conway::{interval_for_rate, lock_board, pattern_file, patterns, RunnerEvent, PATTERNS};
use conway::config::{MAX_STEPS_PER_SECOND, MIN_STEPS_PER_SECOND};

use crate::LifeView;

const CELL_SIZE: f32 = 8.0;

impl LifeView {
    /// Apply runner notifications. Returns true if the board changed.
    fn drain_events(&mut self) -> bool {
        let mut updated = false;
        loop {
            match self.events.try_recv() {
                Ok(RunnerEvent::Started) => self.is_running = true,
                Ok(RunnerEvent::Stopped) => self.is_running = false,
                Ok(RunnerEvent::Updated { .. }) => updated = true,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "viewer fell behind runner events");
                    updated = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return updated,
            }
        }
    }

    fn load_pattern(&mut self) {
        self.runner.stop();
        let result = pattern_file::load(&self.pattern_path, &mut lock_board(&self.board));
        self.status = match result {
            Ok(()) => Some(format!("Loaded {}", self.pattern_path)),
            Err(err) => Some(format!("Load failed: {err}")),
        };
    }

    fn save_pattern(&mut self) {
        self.runner.stop();
        let result = pattern_file::save(&self.pattern_path, &lock_board(&self.board));
        self.status = match result {
            Ok(()) => Some(format!("Saved {}", self.pattern_path)),
            Err(err) => Some(format!("Save failed: {err}")),
        };
    }
}

impl eframe::App for LifeView {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.drain_events() {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Stop" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    if self.runner.is_running() {
                        self.runner.stop();
                    } else {
                        self.runner.start();
                    }
                }

                if ui.button("⏹ Clear").clicked() {
                    self.runner.stop();
                    lock_board(&self.board).clear();
                }

                if ui.button("🎲 Random").clicked() {
                    self.runner.stop();
                    let seed = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .map(|d| d.as_nanos() as u64)
                        .unwrap_or_default();
                    patterns::fill_random(&mut lock_board(&self.board), seed);
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
                    self.runner.stop();
                    PATTERNS[self.selected_pattern].place_centered(&mut lock_board(&self.board));
                }
            });

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let slider = egui::Slider::new(
                    &mut self.steps_per_second,
                    MIN_STEPS_PER_SECOND..=MAX_STEPS_PER_SECOND,
                )
                .suffix(" steps/s");
                if ui.add(slider).changed() {
                    self.runner.set_tick_interval(interval_for_rate(self.steps_per_second));
                }

                ui.separator();

                ui.label("File:");
                ui.text_edit_singleline(&mut self.pattern_path);
                if ui.button("Load").clicked() {
                    self.load_pattern();
                }
                if ui.button("Save").clicked() {
                    self.save_pattern();
                }
            });

            if let Some(status) = &self.status {
                ui.colored_label(Color32::DARK_GRAY, status);
            }

            ui.separator();

            // Copy out so the runner is never blocked on drawing
            let board = lock_board(&self.board).clone();
            let (cols, rows) = (board.width(), board.height());

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(cols as f32 * CELL_SIZE, rows as f32 * CELL_SIZE);
            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click_and_drag());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, self.dead_color);

            for y in 0..rows {
                for x in 0..cols {
                    if board.cell(x as i64, y as i64) {
                        let rect = Rect::from_min_size(
                            egui::pos2(
                                start_pos.x + x as f32 * CELL_SIZE,
                                start_pos.y + y as f32 * CELL_SIZE,
                            ),
                            Vec2::splat(CELL_SIZE),
                        );
                        painter.rect_filled(rect, 0.0, self.live_color);
                    }
                }
            }

            // Grid lines
            let grid = Stroke::new(0.5, Color32::GRAY);
            for y in 0..=rows {
                let py = start_pos.y + y as f32 * CELL_SIZE;
                painter.line_segment([egui::pos2(start_pos.x, py), egui::pos2(start_pos.x + total_size.x, py)], grid);
            }
            for x in 0..=cols {
                let px = start_pos.x + x as f32 * CELL_SIZE;
                painter.line_segment([egui::pos2(px, start_pos.y), egui::pos2(px, start_pos.y + total_size.y)], grid);
            }

            // Left button paints live cells, right button paints dead ones
            let (primary, secondary) = ctx.input(|i| (i.pointer.primary_down(), i.pointer.secondary_down()));
            if primary || secondary {
                if let Some(pos) = response.interact_pointer_pos() {
                    let x = ((pos.x - start_pos.x) / CELL_SIZE).floor() as i64;
                    let y = ((pos.y - start_pos.y) / CELL_SIZE).floor() as i64;
                    if x >= 0 && y >= 0 && (x as usize) < cols && (y as usize) < rows {
                        lock_board(&self.board).set_cell(x, y, primary);
                    }
                }
            }

            ui.separator();

            ui.horizontal(|ui| {
                ui.label(format!("Generation: {}", board.generation()));
                ui.label(format!("Live cells: {}", board.population()));
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.color_edit_button_srgba(&mut self.dead_color);
            });
        });

        // Keep polling runner events while the simulation runs
        if self.is_running {
            ctx.request_repaint_after(self.runner.tick_interval());
        }
    }
}
