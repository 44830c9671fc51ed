//! Game state module - the progression controller
//!
//! This module ties together all core components: board, pieces, rotation,
//! collision, scoring and the tick scheduler. It owns every piece of game
//! state and is the only thing that mutates it.
//!
//! # Phases
//!
//! `Falling -> Locking -> Clearing -> Spawning -> Falling`, with `GameOver`
//! absorbing. Locking, clearing and spawning run to completion inside the
//! operation that triggered them, so between operations the phase is always
//! `Falling` or `GameOver`. `paused` is a separate flag.
//!
//! # Lives
//!
//! A life is lost when a piece comes to rest with a filled cell at row 0 or
//! above, or when a freshly spawned piece overlaps the stack with a filled
//! cell at row 0 or above. The same "any filled cell at row <= 0" rule is used
//! for both. Losing the last life ends the game and disables the fall timer.

use std::sync::Arc;

use thiserror::Error;

use crate::board::Board;
use crate::collision::collides;
use crate::pieces::{tetromino, Piece, Shape, MAX_SHAPE_SIDE};
use crate::rng::PieceGenerator;
use crate::rotation::kick_rotate;
use crate::scheduler::TickScheduler;
use crate::scoring::{apply_line_clear, fall_interval_for_level};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Game setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub initial_lives: u32,
    pub empty_color: ColorTag,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            initial_lives: INITIAL_LIVES,
            empty_color: Arc::from(DEFAULT_EMPTY_COLOR),
            seed: 1,
        }
    }
}

/// Rejected game setups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Every catalog shape, in every rotation, must fit inside the board
    #[error("a {width}x{height} board is smaller than the {min}x{min} minimum")]
    BoardTooSmall { width: u8, height: u8, min: u8 },
    #[error("a game needs at least one life")]
    NoLives,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = MAX_SHAPE_SIDE as u8;
        if self.width < min || self.height < min {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min,
            });
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }
}

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Locking,
    /// Carries the number of rows the lock removed
    Clearing(u32),
    Spawning,
    GameOver,
}

/// Active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    /// Top-left of the shape's bounding box
    pub position: Position,
    pub piece: Piece,
    /// Set once the piece has come to rest and is being settled
    pub just_locked: bool,
}

impl ActivePiece {
    /// Place a piece at the spawn position: horizontally centered, top row
    pub fn spawn(piece: Piece, board_width: u8) -> Self {
        let x = board_width as i32 / 2 - piece.shape.cols() as i32 / 2;
        Self {
            position: Position::new(x, 0),
            piece,
            just_locked: false,
        }
    }

    /// Place a piece at an explicit position
    pub fn at(piece: Piece, position: Position) -> Self {
        Self {
            position,
            piece,
            just_locked: false,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.piece.shape
    }

    pub fn collides(&self, board: &Board, displacement: Position) -> bool {
        collides(&self.piece.shape, self.position, board, displacement)
    }

    /// Any filled cell at board row 0 or above
    pub fn touches_top(&self) -> bool {
        self.cells().any(|cell| cell.y <= 0)
    }

    /// Absolute board coordinates of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let origin = self.position;
        self.piece
            .shape
            .filled_cells()
            .into_iter()
            .map(move |(cx, cy)| origin.offset(cx, cy))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: ActivePiece,
    next: Piece,
    generator: PieceGenerator,
    phase: Phase,
    score: u32,
    level: u32,
    lines: u32,
    lives: u32,
    game_over: bool,
    paused: bool,
    /// None while paused or over
    fall_interval_ms: Option<u32>,
    scheduler: TickScheduler,
    /// Pending events (consumed by observers)
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game: empty board, first piece falling, lookahead drawn
    pub fn try_new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = PieceGenerator::new(config.seed);
        Ok(Self::fresh(config, generator))
    }

    /// Like [`try_new`](Self::try_new), for configurations known to be valid
    ///
    /// Panics if `config` fails validation.
    pub fn new(config: GameConfig) -> Self {
        match Self::try_new(config) {
            Ok(state) => state,
            Err(err) => panic!("invalid game config: {}", err),
        }
    }

    /// Create a new game with default settings and the given RNG seed
    pub fn with_seed(seed: u32) -> Self {
        Self::new(GameConfig {
            seed,
            ..GameConfig::default()
        })
    }

    /// Start from a prepared position
    ///
    /// The board's dimensions and empty color replace those in `config`.
    /// Panics if the resulting config fails validation.
    pub fn staged(config: GameConfig, board: Board, active: ActivePiece, next: PieceKind) -> Self {
        let config = GameConfig {
            width: board.width(),
            height: board.height(),
            empty_color: board.empty_color().clone(),
            ..config
        };
        let mut state = Self::new(config);
        state.board = board;
        state.active = active;
        state.next = tetromino(next);
        state
    }

    /// Continue from a given level and line count
    pub fn with_progress(mut self, level: u32, lines: u32) -> Self {
        self.level = level.max(INITIAL_LEVEL);
        self.lines = lines;
        if !self.paused && !self.game_over {
            self.fall_interval_ms = Some(fall_interval_for_level(self.level));
            self.scheduler.sync(self.fall_interval_ms);
        }
        self
    }

    fn fresh(config: GameConfig, mut generator: PieceGenerator) -> Self {
        let board = Board::new(config.width, config.height, config.empty_color.clone());
        let active = ActivePiece::spawn(generator.random_piece(), config.width);
        let next = generator.random_piece();
        let interval = Some(fall_interval_for_level(INITIAL_LEVEL));

        Self {
            lives: config.initial_lives,
            config,
            board,
            active,
            next,
            generator,
            phase: Phase::Falling,
            score: 0,
            level: INITIAL_LEVEL,
            lines: 0,
            game_over: false,
            paused: false,
            fall_interval_ms: interval,
            scheduler: TickScheduler::new(interval),
            events: Vec::new(),
        }
    }

    /// Reinitialize everything to start-of-game values
    ///
    /// The piece stream continues from the current RNG state, so a restart
    /// does not replay the previous game. A theme change is a reset with the
    /// theme's empty color.
    pub fn reset(&mut self, empty_color: ColorTag) {
        let config = GameConfig {
            empty_color,
            ..self.config.clone()
        };
        let generator = self.generator.clone();
        let mut scheduler = self.scheduler.clone();
        *self = Self::fresh(config, generator);

        // Same timer, new generation: observers restart even at an unchanged interval
        scheduler.restart(self.fall_interval_ms);
        self.scheduler = scheduler;
        self.events.push(GameEvent::Reset);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn fall_interval_ms(&self) -> Option<u32> {
        self.fall_interval_ms
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    /// Take and clear the pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn accepts_input(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Shift the active piece one column (`dir` is -1 or +1)
    pub fn move_player(&mut self, dir: i32) -> bool {
        let dx = dir.signum();
        if !self.accepts_input() || dx == 0 {
            return false;
        }
        if self.active.collides(&self.board, Position::new(dx, 0)) {
            return false;
        }
        self.active.position.x += dx;
        true
    }

    /// Rotate the active piece with wall kicks; a rejected rotation changes nothing
    pub fn rotate_player(&mut self, direction: RotateDirection) -> bool {
        if !self.accepts_input() {
            return false;
        }
        match kick_rotate(self.active.shape(), self.active.position, &self.board, direction) {
            Some((shape, position)) => {
                self.active.piece.shape = shape;
                self.active.position = position;
                true
            }
            None => false,
        }
    }

    /// Drop the active piece as far as it goes and settle it there
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }

        // Find how far we can drop
        let mut drop_distance = 0;
        while !self.active.collides(&self.board, Position::new(0, drop_distance + 1)) {
            drop_distance += 1;
        }
        self.active.position.y += drop_distance;

        self.settle();
        true
    }

    /// One automatic fall step
    ///
    /// Moves the piece down a row, or settles it when it cannot descend.
    pub fn tick(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }

        if !self.active.collides(&self.board, Position::new(0, 1)) {
            self.active.position.y += 1;
            return true;
        }

        self.settle();
        true
    }

    /// Feed elapsed wall-clock time; runs every tick that came due
    ///
    /// The timer is re-synced with the current fall interval before each tick,
    /// so a level-up or game over inside the window takes effect immediately.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let mut budget = elapsed_ms;
        let mut fired = 0;
        loop {
            self.scheduler.sync(self.fall_interval_ms);
            if !self.scheduler.poll(&mut budget) {
                break;
            }
            self.tick();
            fired += 1;
        }
        fired
    }

    /// Pause or resume; ignored once the game is over
    pub fn set_paused(&mut self, paused: bool) -> bool {
        if self.game_over || self.paused == paused {
            return false;
        }

        self.paused = paused;
        if paused {
            self.fall_interval_ms = None;
            self.events.push(GameEvent::Paused);
        } else {
            self.fall_interval_ms = Some(fall_interval_for_level(self.level));
            self.events.push(GameEvent::Resumed);
        }
        self.scheduler.sync(self.fall_interval_ms);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused)
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_player(-1),
            GameAction::MoveRight => self.move_player(1),
            GameAction::RotateCw => self.rotate_player(RotateDirection::Clockwise),
            GameAction::RotateCcw => self.rotate_player(RotateDirection::CounterClockwise),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                let color = self.config.empty_color.clone();
                self.reset(color);
                true
            }
        }
    }

    /// The piece cannot descend: lose a life at the top, otherwise lock it
    fn settle(&mut self) {
        self.active.just_locked = true;

        if self.active.touches_top() {
            // Discard the piece without merging it
            self.lose_life(LifeLossCause::NearTopLock);
            if !self.game_over {
                self.promote_next();
            }
            return;
        }

        self.phase = Phase::Locking;
        self.run_phases();
    }

    fn run_phases(&mut self) {
        loop {
            match self.phase {
                Phase::Locking => {
                    let cleared = self.lock_active();
                    self.phase = Phase::Clearing(cleared);
                }
                Phase::Clearing(cleared) => {
                    self.apply_clear(cleared);
                    self.phase = Phase::Spawning;
                }
                Phase::Spawning => self.spawn_next(),
                Phase::Falling | Phase::GameOver => break,
            }
        }
    }

    fn lock_active(&mut self) -> u32 {
        let active = &self.active;
        match self
            .board
            .lock_piece(&active.piece.shape, active.position, &active.piece.color)
        {
            Ok(cleared) => cleared as u32,
            // Pieces touching the top never get here, so the piece is on the board
            Err(err) => panic!("failed to lock {:?} piece: {}", active.piece.kind, err),
        }
    }

    fn apply_clear(&mut self, cleared: u32) {
        let result = apply_line_clear(cleared, self.level, self.lines);
        self.score = self.score.saturating_add(result.score_gained);
        self.lines = result.total_lines;

        self.events.push(GameEvent::PieceLocked {
            kind: self.active.piece.kind,
            lines_cleared: cleared,
            score_gained: result.score_gained,
        });

        if result.leveled_up {
            self.level = result.level;
            let interval = fall_interval_for_level(self.level);
            self.fall_interval_ms = Some(interval);
            self.scheduler.sync(self.fall_interval_ms);
            self.events.push(GameEvent::LevelUp {
                level: self.level,
                fall_interval_ms: interval,
            });
        }
    }

    /// Lookahead becomes active; a new lookahead is drawn
    fn promote_next(&mut self) {
        let piece = std::mem::replace(&mut self.next, self.generator.random_piece());
        self.active = ActivePiece::spawn(piece, self.config.width);
        self.phase = Phase::Falling;
    }

    fn spawn_next(&mut self) {
        self.promote_next();

        if self.active.collides(&self.board, Position::ZERO) && self.active.touches_top() {
            self.lose_life(LifeLossCause::SpawnCollision);
            if self.game_over {
                return;
            }
            // Fresh piece instead of the spent lookahead; not re-checked this cycle
            self.active = ActivePiece::spawn(self.generator.random_piece(), self.config.width);
            self.next = self.generator.random_piece();
        }
    }

    fn lose_life(&mut self, cause: LifeLossCause) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost {
            lives_left: self.lives,
            cause,
        });
        if self.lives == 0 {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.game_over = true;
        self.phase = Phase::GameOver;
        self.fall_interval_ms = None;
        self.scheduler.cancel();
        self.events.push(GameEvent::GameOver {
            score: self.score,
            level: self.level,
            lines: self.lines,
        });
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
