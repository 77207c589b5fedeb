//! Level state and core simulation types
//!
//! A `Level` owns everything the per-tick physics mutates: the active balls,
//! the colliders, the player's lines, and the level's seeded RNG.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::accel::AccelTile;
use super::ball::Ball;
use super::color::ColorId;
use super::hole::Hole;
use super::line::PlayerLine;
use super::perimeter::PerimeterTile;
use super::scene::{Scene, SceneEntity};
use super::wall::Wall;
use crate::consts::*;

/// Why a level ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Every ball was dealt with before the clock ran out
    Normal,
    /// The level timer expired with balls still outstanding
    TimeUp,
}

/// Current phase of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    Running,
    /// Terminal; physics stops and the time bonus drains
    Ended(EndReason),
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A colored wall repainted a ball (its sprite needs reloading)
    BallRecolored { id: u32, color: ColorId },
    BallCaptured { id: u32, color: ColorId },
    /// Wrong hole; the ball went to the waiting queue or straight back in
    BallRejected { id: u32, color: ColorId },
    /// A rejected ball was put straight back into play (queue was empty)
    BallRespawned { id: u32 },
    /// A ball bounced off the line at this index, which is now empty
    LineCleared { index: usize },
    LevelEnded { reason: EndReason },
}

/// One level in play
#[derive(Debug, Clone)]
pub struct Level {
    /// Seed the level RNG was built from
    pub seed: u64,
    rng: Pcg32,
    /// Active balls (in play, not yet captured)
    pub balls: Vec<Ball>,
    pub walls: Vec<Wall>,
    pub holes: Vec<Hole>,
    pub accel_tiles: Vec<AccelTile>,
    pub lines: Vec<PlayerLine>,
    pub spawners: Vec<IVec2>,
    pub phase: LevelPhase,
    /// Seconds of bonus banked at a normal end, paid out over later ticks
    pub time_bonus: u32,
    /// Edge-walking tiles shown while the bonus drains
    pub perimeter_tiles: Vec<PerimeterTile>,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl Level {
    /// Build a level from a scene; pre-placed balls start in play
    pub fn from_scene(scene: &Scene, seed: u64) -> Self {
        let mut level = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            balls: Vec::new(),
            walls: Vec::new(),
            holes: Vec::new(),
            accel_tiles: Vec::new(),
            lines: Vec::new(),
            spawners: Vec::new(),
            phase: LevelPhase::Running,
            time_bonus: 0,
            perimeter_tiles: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        };

        for entity in &scene.entities {
            match *entity {
                SceneEntity::Wall { pos, color } => level.walls.push(Wall::new(pos, color)),
                SceneEntity::Hole { pos, color } => level.holes.push(Hole::new(pos, color)),
                SceneEntity::Spawner { pos } => level.spawners.push(pos),
                SceneEntity::AccelTile { pos, direction } => {
                    level.accel_tiles.push(AccelTile::new(pos, direction))
                }
                SceneEntity::Ball { pos, color } => {
                    let mut ball = level.mint_ball(pos, color);
                    ball.active = true;
                    level.balls.push(ball);
                }
            }
        }

        log::info!(
            "Level built: {} walls, {} holes, {} accel tiles, {} spawners, {} balls",
            level.walls.len(),
            level.holes.len(),
            level.accel_tiles.len(),
            level.spawners.len(),
            level.balls.len()
        );

        level
    }

    /// Allocate a new ball ID
    fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn mint_ball(&mut self, pos: IVec2, color: ColorId) -> Ball {
        let id = self.next_ball_id();
        Ball::new(id, pos, color, BALL_RADIUS, &mut self.rng)
    }

    /// Mint an inactive ball destined for the waiting queue
    pub fn queue_ball(&mut self, color: ColorId) -> Ball {
        self.mint_ball(IVec2::ZERO, color)
    }

    /// Put a ball into play at a random spawner and return its id
    ///
    /// With no spawners the ball starts wherever it currently is.
    pub fn spawn_ball(&mut self, mut ball: Ball) -> u32 {
        let pos = if self.spawners.is_empty() {
            ball.pos
        } else {
            self.spawners[self.rng.random_range(0..self.spawners.len())]
        };
        ball.dispatch(pos, &mut self.rng);
        let id = ball.id;
        log::debug!("ball {} (color {}) spawned at {:?}", id, ball.color, pos);
        self.balls.push(ball);
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == LevelPhase::Running
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            LevelPhase::Running => None,
            LevelPhase::Ended(reason) => Some(reason),
        }
    }

    /// Transition into `Ended` exactly once; returns false if already ended
    ///
    /// A normal end banks the remaining seconds as bonus, a time-up end banks
    /// nothing.
    pub fn end(&mut self, reason: EndReason, remaining_secs: u32) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = LevelPhase::Ended(reason);
        self.time_bonus = match reason {
            EndReason::Normal => remaining_secs,
            EndReason::TimeUp => 0,
        };
        if self.time_bonus > 0 {
            self.perimeter_tiles = PerimeterTile::corner_pair().to_vec();
        }
        log::info!("Level ended ({:?}), time bonus {}", reason, self.time_bonus);
        true
    }

    /// True once the level has ended and its bonus countdown is exhausted
    pub fn bonus_drained(&self) -> bool {
        !self.is_running() && self.time_bonus == 0
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::accel::Direction;

    fn scene() -> Scene {
        Scene::new(vec![
            SceneEntity::Wall {
                pos: IVec2::new(0, 64),
                color: 0,
            },
            SceneEntity::Hole {
                pos: IVec2::new(64, 64),
                color: 2,
            },
            SceneEntity::Spawner {
                pos: IVec2::new(128, 128),
            },
            SceneEntity::Spawner {
                pos: IVec2::new(256, 256),
            },
            SceneEntity::Ball {
                pos: IVec2::new(96, 96),
                color: 1,
            },
            SceneEntity::AccelTile {
                pos: IVec2::new(32, 96),
                direction: Direction::Left,
            },
        ])
    }

    #[test]
    fn test_from_scene() {
        let level = Level::from_scene(&scene(), 7);
        assert_eq!(level.walls.len(), 1);
        assert_eq!(level.holes.len(), 1);
        assert_eq!(level.spawners.len(), 2);
        assert_eq!(level.accel_tiles.len(), 1);
        assert_eq!(level.balls.len(), 1);
        assert!(level.balls[0].active);
        assert_eq!(level.phase, LevelPhase::Running);
    }

    #[test]
    fn test_spawn_ball_uses_a_spawner() {
        let mut level = Level::from_scene(&scene(), 7);
        let ball = level.queue_ball(3);
        assert!(!ball.active);
        let id = level.spawn_ball(ball);
        let spawned = level.ball(id).unwrap();
        assert!(spawned.active);
        assert!(level.spawners.contains(&spawned.pos));
    }

    #[test]
    fn test_spawn_without_spawners_keeps_position() {
        let mut level = Level::from_scene(&Scene::default(), 1);
        let mut ball = level.queue_ball(1);
        ball.pos = IVec2::new(40, 50);
        let id = level.spawn_ball(ball);
        assert_eq!(level.ball(id).unwrap().pos, IVec2::new(40, 50));
    }

    #[test]
    fn test_ball_ids_are_unique() {
        let mut level = Level::from_scene(&scene(), 7);
        let a = level.queue_ball(1);
        let b = level.queue_ball(1);
        assert_ne!(a.id, b.id);
        assert_ne!(a.id, level.balls[0].id);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut level = Level::from_scene(&Scene::default(), 1);
        assert!(level.end(EndReason::Normal, 42));
        assert_eq!(level.time_bonus, 42);
        assert_eq!(level.perimeter_tiles.len(), 2);
        assert!(!level.end(EndReason::TimeUp, 0));
        assert_eq!(level.end_reason(), Some(EndReason::Normal));
        assert_eq!(level.time_bonus, 42);
    }

    #[test]
    fn test_time_up_banks_nothing() {
        let mut level = Level::from_scene(&Scene::default(), 1);
        level.end(EndReason::TimeUp, 30);
        assert_eq!(level.time_bonus, 0);
        assert!(level.perimeter_tiles.is_empty());
        assert!(level.bonus_drained());
    }
}
