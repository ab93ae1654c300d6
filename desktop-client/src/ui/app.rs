use eframe::egui;
use snake_common::games::snake::{
    DeathReason, GridMode, MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, TickInterval,
};
use snake_common::{log, log_warn};

use super::game::SnakeGameUi;
use crate::audio::AudioPlayer;
use crate::command_sender::CommandSender;
use crate::config::{ClientConfigManager, Config};
use crate::state::SharedState;

fn describe_death(reason: DeathReason) -> &'static str {
    match reason {
        DeathReason::WallCollision => "Hit the wall",
        DeathReason::SelfCollision => "Bit its own tail",
    }
}

/// Enter and Escape belong to the speed field while it is being edited.
fn dialog_key_dismisses(speed_field_active: bool, enter: bool, escape: bool) -> bool {
    !speed_field_active && (enter || escape)
}

pub struct SnakeApp {
    shared_state: SharedState,
    command_sender: CommandSender,
    config_manager: ClientConfigManager,
    audio: AudioPlayer,
    game_ui: SnakeGameUi,
    tick_interval_ms: u64,
    tick_interval_input: String,
    tick_interval_error: Option<String>,
    speed_field_active: bool,
    volume: f32,
    sound_enabled: bool,
    shutdown_sent: bool,
}

impl SnakeApp {
    pub fn new(
        shared_state: SharedState,
        command_sender: CommandSender,
        config_manager: ClientConfigManager,
        audio: AudioPlayer,
        config: &Config,
    ) -> Self {
        let viewport_cell_size = match config.game.grid {
            GridMode::Viewport { cell_size } => Some(cell_size),
            GridMode::Fixed { .. } => None,
        };

        Self {
            shared_state,
            command_sender,
            config_manager,
            audio,
            game_ui: SnakeGameUi::new(viewport_cell_size),
            tick_interval_ms: config.game.tick_interval_ms,
            tick_interval_input: config.game.tick_interval_ms.to_string(),
            tick_interval_error: None,
            speed_field_active: false,
            volume: config.audio.volume,
            sound_enabled: config.audio.enabled,
            shutdown_sent: false,
        }
    }

    fn persist(&self, what: &str, change: impl FnOnce(&mut Config)) {
        if let Err(e) = self.config_manager.update(change) {
            log_warn!("Failed to save {}: {}", what, e);
        }
    }

    fn apply_tick_interval(&mut self, interval: TickInterval) {
        let ms = interval.as_millis();
        self.tick_interval_ms = ms;
        self.tick_interval_input = ms.to_string();
        self.tick_interval_error = None;
        self.command_sender.set_tick_interval(ms);
        self.persist("tick interval", |c| c.game.tick_interval_ms = ms);
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Speed:");
            let slider = ui.add(
                egui::Slider::new(
                    &mut self.tick_interval_ms,
                    MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS,
                )
                .suffix(" ms"),
            );
            if slider.drag_stopped() || (slider.changed() && !slider.dragged()) {
                match TickInterval::from_millis(self.tick_interval_ms) {
                    Ok(interval) => self.apply_tick_interval(interval),
                    Err(e) => self.tick_interval_error = Some(e),
                }
            }

            let input = ui.add(
                egui::TextEdit::singleline(&mut self.tick_interval_input).desired_width(50.0),
            );
            self.speed_field_active = input.has_focus() || input.lost_focus();
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if submitted || ui.button("Set").clicked() {
                match TickInterval::parse(&self.tick_interval_input) {
                    Ok(interval) => self.apply_tick_interval(interval),
                    Err(e) => self.tick_interval_error = Some(e),
                }
            }
        });

        if let Some(error) = &self.tick_interval_error {
            ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error);
        }

        ui.horizontal(|ui| {
            if ui.checkbox(&mut self.sound_enabled, "Sound").changed() {
                let enabled = self.sound_enabled;
                self.audio.set_enabled(enabled);
                self.persist("sound setting", |c| c.audio.enabled = enabled);
            }

            ui.label("Volume:");
            let slider = ui.add_enabled(
                self.sound_enabled,
                egui::Slider::new(&mut self.volume, 0.0..=1.0).fixed_decimals(2),
            );
            if slider.changed()
                && let Err(e) = self.audio.set_volume(self.volume)
            {
                log_warn!("Volume rejected: {}", e);
            }
            if slider.drag_stopped() || (slider.changed() && !slider.dragged()) {
                let volume = self.volume;
                self.persist("volume", |c| c.audio.volume = volume);
            }
        });
    }

    fn render_game_over_window(&self, ctx: &egui::Context) {
        let Some(notice) = self.shared_state.game_over() else {
            return;
        };

        egui::Window::new("Game Over")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("Game Over! Score: {}", notice.info.final_score))
                        .size(20.0)
                        .strong(),
                );
                ui.label(format!(
                    "{} at length {} ({})",
                    describe_death(notice.info.reason),
                    notice.info.length,
                    notice.at.format("%H:%M:%S")
                ));
                ui.label(format!("Best score: {}", self.shared_state.best_score()));
                ui.add_space(8.0);
                let key_dismiss = ctx.input(|i| {
                    dialog_key_dismisses(
                        self.speed_field_active,
                        i.key_pressed(egui::Key::Enter),
                        i.key_pressed(egui::Key::Escape),
                    )
                });
                if ui.button("OK").clicked() || key_dismiss {
                    self.shared_state.dismiss_game_over();
                    self.command_sender.resume();
                }
            });
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if ctx.input(|i| i.viewport().close_requested()) && !self.shutdown_sent {
            log!("Window closed, stopping session");
            self.command_sender.shutdown();
            self.shutdown_sent = true;
        }

        let snapshot = self.shared_state.snapshot();
        let title = match &snapshot {
            Some(s) => format!("Emoji Snake - Score: {}", s.score),
            None => "Emoji Snake".to_string(),
        };
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_controls(ui);
            ui.label(format!(
                "Best: {}   Deaths: {}",
                self.shared_state.best_score(),
                self.shared_state.deaths()
            ));
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.game_ui
                .render_game(ui, ctx, snapshot.as_ref(), &self.command_sender);
        });

        self.render_game_over_window(ctx);
    }
}
