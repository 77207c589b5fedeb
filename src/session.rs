//! Game session: score, level clock, waiting queue and level progression
//!
//! The simulation only knows about one level at a time. `Session` owns the
//! collaborators a level ticks against and moves through the configured
//! levels as they are cleared.

use std::collections::VecDeque;

use anyhow::{Result, bail};
use glam::{IVec2, Vec2};

use crate::config::{GameConfig, LevelConfig, ScoreTable};
use crate::consts::*;
use crate::sim::ball::Ball;
use crate::sim::color::ColorId;
use crate::sim::line::PlayerLine;
use crate::sim::scene::Scene;
use crate::sim::services::{LevelTimer, ScoreSink, WaitingQueue};
use crate::sim::state::{EndReason, Level, SimEvent};

/// Running score, priced with the current level's table
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    pub score: i64,
    pub table: ScoreTable,
}

impl Scoreboard {
    pub fn new(table: ScoreTable) -> Self {
        Self { score: 0, table }
    }
}

impl ScoreSink for Scoreboard {
    fn increase(&mut self, color: ColorId) {
        self.score += self.table.increase_for(color) as i64;
    }

    fn decrease(&mut self, color: ColorId) {
        self.score -= self.table.decrease_for(color) as i64;
    }

    fn add_bonus(&mut self, points: u32) {
        self.score += points as i64;
    }
}

/// Balls waiting in the top bar, spawned front first
#[derive(Debug, Clone, Default)]
pub struct WaitingBalls {
    balls: VecDeque<Ball>,
}

impl WaitingBalls {
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> + '_ {
        self.balls.iter()
    }

    pub fn clear(&mut self) {
        self.balls.clear();
    }

    fn slot(index: usize) -> IVec2 {
        IVec2::new(QUEUE_SLOT_X + QUEUE_SLOT_SPACING * index as i32, QUEUE_SLOT_Y)
    }
}

impl WaitingQueue for WaitingBalls {
    fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    fn push(&mut self, mut ball: Ball) {
        ball.reset_radius();
        ball.active = false;
        ball.pos = Self::slot(self.balls.len());
        self.balls.push_back(ball);
    }

    fn pop(&mut self) -> Option<Ball> {
        let ball = self.balls.pop_front()?;
        for (i, waiting) in self.balls.iter_mut().enumerate() {
            waiting.pos = Self::slot(i);
        }
        Some(ball)
    }
}

/// Level countdown driven by simulation ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTimer {
    total_secs: u32,
    ticks: u64,
}

impl FrameTimer {
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            ticks: 0,
        }
    }

    pub fn tick(&mut self) {
        self.ticks += 1;
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.ticks / FPS as u64
    }
}

impl LevelTimer for FrameTimer {
    fn has_expired(&self) -> bool {
        self.elapsed_secs() > self.total_secs as u64
    }

    fn remaining_secs(&self) -> u32 {
        (self.total_secs as u64).saturating_sub(self.elapsed_secs()) as u32
    }
}

/// Level `index` with its config, seeded from the session seed
fn build_level(
    config: &GameConfig,
    scenes: &[Scene],
    seed: u64,
    index: usize,
) -> Option<(LevelConfig, Level)> {
    let level_config = config.level(index)?.clone();
    let scene = scenes.get(index)?;
    Some((level_config, Level::from_scene(scene, seed ^ index as u64)))
}

/// A whole game from the first configured level to the last
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    scenes: Vec<Scene>,
    seed: u64,
    level_index: usize,
    level: Level,
    scores: Scoreboard,
    waiting: WaitingBalls,
    timer: FrameTimer,
    spawn_interval_ticks: u32,
    spawn_countdown: u32,
    paused: bool,
    game_over: bool,
}

impl Session {
    /// Start a game at the first level. `scenes` must hold one scene per
    /// configured level.
    pub fn new(config: GameConfig, scenes: Vec<Scene>, seed: u64) -> Result<Self> {
        if config.levels.is_empty() {
            bail!("config has no levels");
        }
        if scenes.len() != config.levels.len() {
            bail!(
                "{} scenes for {} configured levels",
                scenes.len(),
                config.levels.len()
            );
        }

        let Some((level_config, level)) = build_level(&config, &scenes, seed, 0) else {
            bail!("first level could not be built");
        };

        let mut session = Self {
            config,
            scenes,
            seed,
            level_index: 0,
            level,
            scores: Scoreboard::default(),
            waiting: WaitingBalls::default(),
            timer: FrameTimer::default(),
            spawn_interval_ticks: 0,
            spawn_countdown: 0,
            paused: false,
            game_over: false,
        };
        session.enter_level(0, &level_config);
        Ok(session)
    }

    fn load_level(&mut self, index: usize) {
        match build_level(&self.config, &self.scenes, self.seed, index) {
            Some((level_config, level)) => {
                self.level = level;
                self.enter_level(index, &level_config);
            }
            None => self.game_over = true,
        }
    }

    /// Reset the per-level collaborators around a freshly built `self.level`
    fn enter_level(&mut self, index: usize, level_config: &LevelConfig) {
        self.level_index = index;
        self.scores.table = self.config.score_table(index);
        self.timer = FrameTimer::new(level_config.time);
        self.spawn_interval_ticks = level_config.spawn_interval.saturating_mul(FPS).max(1);
        self.spawn_countdown = self.spawn_interval_ticks;
        self.paused = false;

        self.waiting.clear();
        for color in level_config.ball_colors() {
            let ball = self.level.queue_ball(color);
            self.waiting.push(ball);
        }
        if let Some(ball) = self.waiting.pop() {
            self.level.spawn_ball(ball);
        }

        log::info!(
            "Level {} loaded ({}s, {} balls queued)",
            index + 1,
            level_config.time,
            level_config.balls.len()
        );
    }

    /// Run one frame
    pub fn update(&mut self) -> Vec<SimEvent> {
        if self.paused || self.game_over {
            return Vec::new();
        }

        if self.level.is_running() {
            self.timer.tick();
        }

        let events = self
            .level
            .update(&mut self.scores, &mut self.waiting, &self.timer);

        if self.level.is_running() {
            self.run_spawn_countdown();
        } else if self.level.end_reason() == Some(EndReason::Normal) && self.level.bonus_drained() {
            self.advance_level();
        }

        events
    }

    fn run_spawn_countdown(&mut self) {
        self.spawn_countdown = self.spawn_countdown.saturating_sub(1);
        if self.spawn_countdown > 0 {
            return;
        }
        if let Some(ball) = self.waiting.pop() {
            self.level.spawn_ball(ball);
        }
        self.spawn_countdown = self.spawn_interval_ticks;
    }

    fn advance_level(&mut self) {
        let next = self.level_index + 1;
        if next >= self.config.num_levels() {
            self.game_over = true;
            log::info!("Game over, final score {}", self.scores.score);
        } else {
            self.load_level(next);
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.game_over {
            return;
        }
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Reload the current level from scratch with the score reset
    pub fn restart_level(&mut self) {
        self.scores.score = 0;
        self.game_over = false;
        self.load_level(self.level_index);
    }

    pub fn restart_game(&mut self) {
        self.scores.score = 0;
        self.game_over = false;
        self.load_level(0);
    }

    fn accepts_pointer(&self, y: f32) -> bool {
        !self.game_over && y > TOP_BAR as f32
    }

    /// Start a new ink line at the pointer
    pub fn begin_line(&mut self, x: f32, y: f32) -> bool {
        if !self.accepts_pointer(y) {
            return false;
        }
        self.level
            .lines
            .push(PlayerLine::from_points([Vec2::new(x, y)]));
        true
    }

    /// Append the pointer position to the line being drawn
    pub fn extend_line(&mut self, x: f32, y: f32) -> bool {
        if !self.accepts_pointer(y) {
            return false;
        }
        match self.level.lines.last_mut() {
            Some(line) => {
                line.push_point(Vec2::new(x, y));
                true
            }
            None => self.begin_line(x, y),
        }
    }

    /// Delete the newest line passing near the pointer
    pub fn remove_line_at(&mut self, x: f32, y: f32) -> bool {
        if !self.accepts_pointer(y) {
            return false;
        }
        let point = Vec2::new(x, y);
        match self.level.lines.iter().rposition(|line| line.is_near(point)) {
            Some(index) => {
                self.level.lines.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn score(&self) -> i64 {
        self.scores.score
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn waiting(&self) -> &WaitingBalls {
        &self.waiting
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}
