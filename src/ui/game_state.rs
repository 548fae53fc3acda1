//! Game state management for the Gomoku GUI

use crate::{Board, Difficulty, Engine, MoveResult, Pos, Stone};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::{Duration, Instant};

/// Pre-game configuration chosen on the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub difficulty: Difficulty,
    /// When true the AI plays Black and opens the game
    pub ai_first: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 15,
            difficulty: Difficulty::Normal,
            ai_first: false,
        }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// Winning side, or `None` for a drawn (full) board
    pub winner: Option<Stone>,
    pub winning_line: Option<[Pos; 5]>,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub config: GameConfig,
    pub human_color: Stone,
    pub ai_color: Stone,
    pub current_turn: Stone,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Stone)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        // Black always moves first; the AI takes Black when it opens
        let ai_color = if config.ai_first { Stone::Black } else { Stone::White };

        let mut state = Self {
            board: Board::new(config.board_size),
            config,
            human_color: ai_color.opponent(),
            ai_color,
            current_turn: Stone::Black,
            game_over: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
        };

        // Classic opening: an AI playing Black takes the center without
        // searching.
        if config.ai_first {
            let center = state.board.center();
            state.execute_move(center);
        }

        state
    }

    /// Start over with the same configuration
    pub fn restart(&mut self) {
        *self = GameState::new(self.config);
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        self.current_turn == self.human_color
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        self.current_turn == self.ai_color
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a stone for the human at the given position
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        if !self.execute_move(pos) {
            return Err("That cell is occupied".to_string());
        }
        Ok(())
    }

    /// Apply a move for the side to move (human or AI).
    ///
    /// Returns false when the placement is rejected by the board.
    fn execute_move(&mut self, pos: Pos) -> bool {
        let color = self.current_turn;
        if !self.board.place(pos, color) {
            return false;
        }

        self.move_history.push((pos, color));
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.move_timer.stop();
        self.message = None;

        if self.board.last_move_wins() {
            self.game_over = Some(GameResult {
                winner: Some(color),
                winning_line: self.find_winning_line(pos, color),
            });
            return true;
        }
        if self.board.is_full() {
            self.game_over = Some(GameResult {
                winner: None,
                winning_line: None,
            });
            return true;
        }

        self.current_turn = color.opponent();
        self.move_timer.start();
        true
    }

    /// Find five winning stones through `pos` for highlighting
    fn find_winning_line(&self, pos: Pos, color: Stone) -> Option<[Pos; 5]> {
        let directions: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        for (dr, dc) in directions {
            let mut line = Vec::new();

            // Walk backwards to the start of the run (pos included)
            let mut r = i32::from(pos.row);
            let mut c = i32::from(pos.col);
            while self.board.in_bounds(r, c) && self.board.get(Pos::new(r as u8, c as u8)) == color {
                line.insert(0, Pos::new(r as u8, c as u8));
                r -= dr;
                c -= dc;
            }

            // Then forwards past pos
            r = i32::from(pos.row) + dr;
            c = i32::from(pos.col) + dc;
            while self.board.in_bounds(r, c) && self.board.get(Pos::new(r as u8, c as u8)) == color {
                line.push(Pos::new(r as u8, c as u8));
                r += dr;
                c += dc;
            }

            if line.len() >= 5 {
                return Some([line[0], line[1], line[2], line[3], line[4]]);
            }
        }

        None
    }

    /// Kick off the AI move on a background thread.
    ///
    /// The engine itself is synchronous; the thread plus channel keeps the
    /// UI repainting while it runs.
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }

        let board = self.board.clone();
        let color = self.ai_color;
        let difficulty = self.config.difficulty;

        let (tx, rx) = channel();

        thread::spawn(move || {
            let engine = Engine::new(difficulty);
            let result = engine.get_move_with_stats(&board, color, difficulty.base_depth());
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Poll for a finished AI move and apply it
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(std::sync::mpsc::TryRecvError::Empty) => None,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.move_timer.set_ai_time(elapsed);

            if let Some(pos) = move_result.best_move {
                self.last_ai_result = Some(move_result);
                self.execute_move(pos);
            } else {
                // No move only happens on a full board
                self.last_ai_result = Some(move_result);
                self.game_over = Some(GameResult {
                    winner: None,
                    winning_line: None,
                });
            }
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Compute a hint for the human side (quick shallow search)
    pub fn request_hint(&mut self) {
        if self.game_over.is_some() || self.is_ai_thinking() || !self.is_human_turn() {
            return;
        }

        let engine = Engine::new(Difficulty::Normal);
        let result = engine.get_move_with_stats(&self.board, self.current_turn, 3);
        self.suggested_move = result.best_move;
    }

    /// Undo the last human/AI move pair
    pub fn undo(&mut self) {
        if self.is_ai_thinking() {
            return;
        }

        // Keep the AI's forced opening stone in place
        let floor = usize::from(self.config.ai_first);
        if self.move_history.len() <= floor {
            return;
        }

        let undo_count = if self.move_history.len() >= floor + 2 { 2 } else { 1 };
        let moves_to_keep = self.move_history.len() - undo_count;
        let moves: Vec<_> = self.move_history[..moves_to_keep].to_vec();

        self.board = Board::new(self.config.board_size);
        self.current_turn = Stone::Black;
        self.game_over = None;
        self.last_move = None;
        self.suggested_move = None;
        self.move_history.clear();

        for (pos, color) in moves {
            self.board.place(pos, color);
            self.move_history.push((pos, color));
            self.last_move = Some(pos);
            self.current_turn = color.opponent();
        }

        self.move_timer.start();
    }
}
