use eframe::egui;
use snake_common::games::snake::{Cell, Direction, RenderSnapshot};

use crate::command_sender::CommandSender;

const HEAD_GLYPH: &str = "🐸";
const BODY_GLYPH: &str = "🟩";
const FRUIT_GLYPHS: [&str; 4] = ["🍎", "🍌", "🍇", "🍉"];
const POWER_UP_GLYPH: &str = "⭐";
const POISON_GLYPH: &str = "☠";

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x1e, 0x1e, 0x1e);
const POWER_UP_FRAME: egui::Color32 = egui::Color32::from_rgb(0xff, 0xd7, 0x00);
const MIN_CELL_PX: f32 = 6.0;

const KEY_BINDINGS: [(egui::Key, &str); 8] = [
    (egui::Key::ArrowUp, "ArrowUp"),
    (egui::Key::ArrowDown, "ArrowDown"),
    (egui::Key::ArrowLeft, "ArrowLeft"),
    (egui::Key::ArrowRight, "ArrowRight"),
    (egui::Key::W, "w"),
    (egui::Key::S, "s"),
    (egui::Key::A, "a"),
    (egui::Key::D, "d"),
];

/// The fruit glyph cycles with the score.
pub fn fruit_glyph(score: u32) -> &'static str {
    FRUIT_GLYPHS[score as usize % FRUIT_GLYPHS.len()]
}

pub struct SnakeGameUi {
    viewport_cell_size: Option<u32>,
    last_viewport: Option<(u32, u32)>,
    swipe: egui::Vec2,
}

impl SnakeGameUi {
    /// `viewport_cell_size` is set when the grid follows the window size.
    pub fn new(viewport_cell_size: Option<u32>) -> Self {
        Self {
            viewport_cell_size,
            last_viewport: None,
            swipe: egui::Vec2::ZERO,
        }
    }

    pub fn render_game(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        snapshot: Option<&RenderSnapshot>,
        command_sender: &CommandSender,
    ) {
        self.handle_keyboard(ctx, command_sender);

        let available = ui.available_size() - egui::vec2(0.0, 140.0);
        self.report_viewport(available, command_sender);

        let Some(state) = snapshot else {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        };

        let cell_px = self.cell_px(available, state);
        let canvas = egui::vec2(
            cell_px * state.grid_width as f32,
            cell_px * state.grid_height as f32,
        );

        ui.vertical_centered(|ui| {
            let (response, painter) = ui.allocate_painter(canvas, egui::Sense::drag());
            self.handle_swipe(&response, command_sender);

            let rect = response.rect;
            painter.rect_filled(rect, 0.0, BACKGROUND);
            if state.power_up_active {
                painter.rect_stroke(
                    rect,
                    0.0,
                    egui::Stroke::new(2.0, POWER_UP_FRAME),
                    egui::StrokeKind::Inside,
                );
            }

            let draw = |glyph: &str, cell: Cell| {
                let pos = rect.min + egui::vec2(cell.x as f32 * cell_px, cell.y as f32 * cell_px);
                painter.text(
                    pos,
                    egui::Align2::LEFT_TOP,
                    glyph,
                    egui::FontId::proportional(cell_px),
                    egui::Color32::WHITE,
                );
            };

            draw(fruit_glyph(state.score), state.food);
            draw(POWER_UP_GLYPH, state.power_up);
            draw(POISON_GLYPH, state.poison);
            for (i, segment) in state.snake.iter().enumerate() {
                draw(if i == 0 { HEAD_GLYPH } else { BODY_GLYPH }, *segment);
            }

            ui.add_space(6.0);
            let mut status = format!("Score: {}", state.score);
            if state.power_up_active {
                status.push_str(&format!("   {} {}", POWER_UP_GLYPH, state.power_up_ticks_remaining));
            }
            ui.label(egui::RichText::new(status).size(16.0));
        });

        ui.add_space(6.0);
        self.render_direction_buttons(ui, command_sender);
    }

    fn cell_px(&self, available: egui::Vec2, state: &RenderSnapshot) -> f32 {
        if let Some(size) = self.viewport_cell_size {
            return size as f32;
        }
        let by_width = available.x / state.grid_width.max(1) as f32;
        let by_height = available.y / state.grid_height.max(1) as f32;
        by_width.min(by_height).floor().max(MIN_CELL_PX)
    }

    fn report_viewport(&mut self, available: egui::Vec2, command_sender: &CommandSender) {
        if self.viewport_cell_size.is_none() {
            return;
        }
        let viewport = (available.x.max(0.0) as u32, available.y.max(0.0) as u32);
        if self.last_viewport != Some(viewport) {
            command_sender.resize_viewport(viewport.0, viewport.1);
            self.last_viewport = Some(viewport);
        }
    }

    fn handle_keyboard(&self, ctx: &egui::Context, command_sender: &CommandSender) {
        let pressed = ctx.input(|i| {
            KEY_BINDINGS
                .iter()
                .find(|(key, _)| i.key_pressed(*key))
                .map(|(_, name)| *name)
        });

        if let Some(direction) = pressed.and_then(Direction::from_key_name) {
            command_sender.turn(direction);
        }
    }

    fn handle_swipe(&mut self, response: &egui::Response, command_sender: &CommandSender) {
        if response.drag_started() {
            self.swipe = egui::Vec2::ZERO;
        }
        if response.dragged() {
            self.swipe += response.drag_delta();
        }
        if response.drag_stopped() {
            if let Some(direction) = Direction::from_swipe(self.swipe.x, self.swipe.y) {
                command_sender.turn(direction);
            }
            self.swipe = egui::Vec2::ZERO;
        }
    }

    fn render_direction_buttons(&self, ui: &mut egui::Ui, command_sender: &CommandSender) {
        let button = |ui: &mut egui::Ui, label: &str, name: &str| {
            if ui
                .add_sized([44.0, 32.0], egui::Button::new(label))
                .clicked()
                && let Some(direction) = Direction::from_button(name)
            {
                command_sender.turn(direction);
            }
        };

        ui.vertical_centered(|ui| {
            button(ui, "⬆", "up");
            ui.horizontal(|ui| {
                let offset = (ui.available_width() - 3.0 * 52.0) / 2.0;
                ui.add_space(offset.max(0.0));
                button(ui, "⬅", "left");
                button(ui, "⬇", "down");
                button(ui, "➡", "right");
            });
        });
    }
}
