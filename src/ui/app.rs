//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::game_state::{GameConfig, GameResult, GameState};
use super::theme::*;
use crate::board::BOARD_PRESETS;
use crate::{Difficulty, Stone};

/// Which screen is showing
enum Screen {
    /// Pre-game setup: board size, difficulty, who starts
    Setup,
    /// A game in progress
    Playing(Box<GameState>),
}

/// Main Gomoku application
pub struct GomokuApp {
    screen: Screen,
    config: GameConfig,
    board_view: BoardView,
    show_debug: bool,
}

impl Default for GomokuApp {
    fn default() -> Self {
        Self {
            screen: Screen::Setup,
            config: GameConfig::default(),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }
}

impl GomokuApp {
    /// Create a new app starting on the setup screen
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Render the pre-game setup screen
    fn render_setup(&mut self, ctx: &Context) {
        let mut start = false;

        CentralPanel::default()
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(40.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GOMOKU").size(40.0).strong().color(TEXT_PRIMARY));
                    ui.label(RichText::new("five in a row").size(14.0).color(TEXT_MUTED));
                    ui.add_space(24.0);

                    Self::card_frame().show(ui, |ui| {
                        ui.set_width(360.0);
                        ui.label(RichText::new("HOW TO PLAY").size(10.0).color(TEXT_MUTED));
                        ui.add_space(6.0);
                        ui.label(
                            RichText::new(
                                "Players alternate placing stones; five in a row \
                                 along any line wins. Black always moves first.",
                            )
                            .size(13.0)
                            .color(TEXT_SECONDARY),
                        );
                    });

                    ui.add_space(16.0);

                    Self::card_frame().show(ui, |ui| {
                        ui.set_width(360.0);
                        ui.label(RichText::new("NEW GAME").size(10.0).color(TEXT_MUTED));
                        ui.add_space(10.0);

                        egui::Grid::new("setup_grid")
                            .num_columns(2)
                            .spacing([24.0, 12.0])
                            .show(ui, |ui| {
                                ui.label(RichText::new("Board size").color(TEXT_SECONDARY));
                                egui::ComboBox::from_id_salt("board_size")
                                    .selected_text(format!(
                                        "{} × {}",
                                        self.config.board_size, self.config.board_size
                                    ))
                                    .show_ui(ui, |ui| {
                                        for size in BOARD_PRESETS {
                                            ui.selectable_value(
                                                &mut self.config.board_size,
                                                size,
                                                format!("{} × {}", size, size),
                                            );
                                        }
                                    });
                                ui.end_row();

                                ui.label(RichText::new("Difficulty").color(TEXT_SECONDARY));
                                egui::ComboBox::from_id_salt("difficulty")
                                    .selected_text(self.config.difficulty.label())
                                    .show_ui(ui, |ui| {
                                        for difficulty in Difficulty::ALL {
                                            ui.selectable_value(
                                                &mut self.config.difficulty,
                                                difficulty,
                                                difficulty.label(),
                                            );
                                        }
                                    });
                                ui.end_row();

                                ui.label(RichText::new("First move").color(TEXT_SECONDARY));
                                egui::ComboBox::from_id_salt("first_move")
                                    .selected_text(if self.config.ai_first { "AI" } else { "Player" })
                                    .show_ui(ui, |ui| {
                                        ui.selectable_value(&mut self.config.ai_first, false, "Player");
                                        ui.selectable_value(&mut self.config.ai_first, true, "AI");
                                    });
                                ui.end_row();
                            });
                    });

                    ui.add_space(24.0);

                    if ui
                        .add_sized(Vec2::new(200.0, 44.0), egui::Button::new(
                            RichText::new("Start Game").size(16.0).strong(),
                        ))
                        .clicked()
                    {
                        start = true;
                    }
                });
            });

        if start {
            self.screen = Screen::Playing(Box::new(GameState::new(self.config)));
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) -> bool {
        let mut back_to_setup = false;

        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game…").clicked() {
                        back_to_setup = true;
                        ui.close_menu();
                    }
                    if ui.button("Restart").clicked() {
                        if let Screen::Playing(state) = &mut self.screen {
                            state.restart();
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Screen::Playing(state) = &self.screen {
                        let color = if state.human_color == Stone::Black { "Black" } else { "White" };
                        ui.label(format!(
                            "You: {} · {} · {}×{}",
                            color,
                            state.config.difficulty.label(),
                            state.config.board_size,
                            state.config.board_size
                        ));
                    }
                });
            });
        });

        back_to_setup
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(state: &mut GameState, show_debug: bool, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);

                Self::render_turn_card(state, ui);
                ui.add_space(10.0);

                Self::render_timer_card(state, ui);
                ui.add_space(10.0);

                Self::render_actions_card(state, ui);

                if show_debug {
                    ui.add_space(10.0);
                    Self::render_debug_card(state, ui);
                }

                if let Some(result) = state.game_over {
                    ui.add_space(10.0);
                    Self::render_game_over_card(ui, &result);
                }

                if let Some(msg) = state.message.clone() {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, &msg);
                }
            });
    }

    /// Render turn indicator card
    fn render_turn_card(state: &GameState, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let is_black = state.current_turn == Stone::Black;
            let (stone_char, color_name, accent) = if is_black {
                ("●", "BLACK", egui::Color32::from_rgb(70, 70, 75))
            } else {
                ("○", "WHITE", egui::Color32::from_rgb(220, 220, 225))
            };

            ui.horizontal(|ui| {
                let stone_color = if is_black {
                    TEXT_PRIMARY
                } else {
                    egui::Color32::from_rgb(30, 30, 35)
                };

                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    stone_char,
                    egui::FontId::proportional(28.0),
                    stone_color,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(color_name).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if state.is_ai_thinking() {
                        ("AI thinking…", TIMER_WARNING)
                    } else if state.game_over.is_some() {
                        ("Game over", WIN_HIGHLIGHT)
                    } else if state.is_human_turn() {
                        ("Your turn", TIMER_NORMAL)
                    } else {
                        ("AI to move", TEXT_SECONDARY)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    /// Render timer card
    fn render_timer_card(state: &GameState, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 1.0 {
                    TIMER_NORMAL
                } else if secs < 5.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{:.2}s", secs)).size(28.0).strong().color(color));
            } else {
                let elapsed = state.move_timer.elapsed();
                ui.label(
                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                        .size(24.0)
                        .color(TEXT_PRIMARY),
                );
            }

            if let Some(ai_time) = state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Render actions card
    fn render_actions_card(state: &mut GameState, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Hint").clicked() {
                    state.request_hint();
                }
                if ui.button("Undo").clicked() {
                    state.undo();
                }
                if ui.button("Restart").clicked() {
                    state.restart();
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", state.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    /// Render debug card with the last AI search stats
    fn render_debug_card(state: &GameState, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                if let Some(result) = &state.last_ai_result {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new(format!("{:?}", result.search_type))
                                    .size(11.0)
                                    .strong()
                                    .color(TIMER_NORMAL),
                            );
                            ui.label(
                                RichText::new(format!("Score: {:.4}", result.score))
                                    .size(10.0)
                                    .color(TEXT_SECONDARY),
                            );
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                            ui.vertical(|ui| {
                                ui.label(
                                    RichText::new(format!("{}ms", result.time_ms))
                                        .size(10.0)
                                        .color(TEXT_SECONDARY),
                                );
                                ui.label(
                                    RichText::new(format!("{} nodes", result.nodes))
                                        .size(10.0)
                                        .color(TEXT_MUTED),
                                );
                            });
                        });
                    });

                    if let Some(pos) = result.best_move {
                        let col = (b'A' + pos.col) as char;
                        let row = state.board.size() - pos.row as usize;
                        ui.add_space(4.0);
                        ui.label(
                            RichText::new(format!("→ {}{}", col, row))
                                .size(12.0)
                                .strong()
                                .color(WIN_HIGHLIGHT),
                        );
                    }
                } else {
                    ui.label(RichText::new("Waiting for AI…").size(10.0).color(TEXT_MUTED));
                }
            });
    }

    /// Render game over card
    fn render_game_over_card(ui: &mut egui::Ui, result: &GameResult) {
        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("GAME OVER")
                            .size(12.0)
                            .color(egui::Color32::from_rgb(180, 255, 180)),
                    );
                    ui.add_space(8.0);

                    match result.winner {
                        Some(winner) => {
                            let (symbol, name) = if winner == Stone::Black {
                                ("●", "BLACK")
                            } else {
                                ("○", "WHITE")
                            };
                            ui.horizontal(|ui| {
                                ui.add_space(ui.available_width() / 2.0 - 60.0);
                                ui.label(RichText::new(symbol).size(32.0).color(TEXT_PRIMARY));
                                ui.add_space(8.0);
                                ui.vertical(|ui| {
                                    ui.label(RichText::new(name).size(18.0).strong().color(TEXT_PRIMARY));
                                    ui.label(RichText::new("WINS!").size(14.0).color(WIN_HIGHLIGHT));
                                });
                            });
                            ui.add_space(4.0);
                            ui.label(RichText::new("by 5-in-a-row").size(11.0).color(TEXT_SECONDARY));
                        }
                        None => {
                            ui.label(RichText::new("DRAW").size(18.0).strong().color(TEXT_PRIMARY));
                            ui.label(RichText::new("the board is full").size(11.0).color(TEXT_SECONDARY));
                        }
                    }
                });
            });
    }

    /// Render status message card
    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(state: &mut GameState, board_view: &mut BoardView, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let winning_line = state.game_over.as_ref().and_then(|r| r.winning_line);

            let clicked = board_view.show(
                ui,
                &state.board,
                state.current_turn,
                state.last_move,
                state.suggested_move,
                winning_line,
                state.game_over.is_some(),
            );

            if let Some(pos) = clicked {
                if let Err(msg) = state.try_place_stone(pos) {
                    state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let mut toggle_debug = false;
        ctx.input(|i| {
            if i.key_pressed(egui::Key::D) {
                toggle_debug = true;
            }
            if let Screen::Playing(state) = &mut self.screen {
                if i.key_pressed(egui::Key::H) {
                    state.request_hint();
                }
                if i.key_pressed(egui::Key::U) {
                    state.undo();
                }
                if i.key_pressed(egui::Key::N) {
                    state.restart();
                }
            }
        });
        if toggle_debug {
            self.show_debug = !self.show_debug;
        }
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if matches!(self.screen, Screen::Setup) {
            self.render_setup(ctx);
            return;
        }

        self.handle_input(ctx);

        if self.render_menu_bar(ctx) {
            self.screen = Screen::Setup;
            return;
        }

        let show_debug = self.show_debug;
        if let Screen::Playing(state) = &mut self.screen {
            state.check_ai_result();

            if state.is_ai_turn() && !state.is_ai_thinking() && state.game_over.is_none() {
                state.start_ai_thinking();
            }

            Self::render_side_panel(state, show_debug, ctx);
            Self::render_board(state, &mut self.board_view, ctx);

            if state.is_ai_thinking() {
                ctx.request_repaint();
            }
        }
    }
}
