//! Inkball - colored balls, capture holes and player-drawn ink lines
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball kinematics, colliders, level tick)
//! - `config`: JSON game configuration and per-level score tables
//! - `layout`: Level layout text -> static scene description
//! - `session`: Game driver owning score, timer, waiting queue and level progression

pub mod config;
pub mod layout;
pub mod session;
pub mod sim;

pub use config::{GameConfig, LevelConfig, ScoreTable};
pub use layout::{load_scenes, parse_layout};
pub use sim::{Scene, SceneEntity};
pub use session::Session;

/// Game configuration constants
pub mod consts {
    /// Ticks per second (the frame rate the update loop is driven at)
    pub const FPS: u32 = 30;

    /// Board dimensions (pixels)
    pub const CELL_SIZE: i32 = 32;
    pub const TOP_BAR: i32 = 64;
    pub const BOARD_WIDTH: i32 = 576;
    pub const BOARD_HEIGHT: i32 = 640;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    /// Per-axis speed a ball is dispatched with (sign is random)
    pub const BALL_SPEED: f32 = 2.0;

    /// Hole footprint (2x2 cells)
    pub const HOLE_SIZE: i32 = 64;
    /// Distance from hole center at which balls start being pulled in
    pub const ATTRACTION_RADIUS: f32 = 32.0;
    /// Distance from hole center at which a ball is captured or rejected
    pub const CAPTURE_RADIUS: f32 = 15.0;
    pub const ATTRACTION_FACTOR: f32 = 0.005;

    /// Acceleration tile tuning
    pub const ACCEL_AMOUNT: f32 = 0.5;
    pub const ACCEL_MAX_SPEED: f32 = 5.0;
    pub const ACCEL_MIN_SPEED: f32 = 0.0;

    /// Debounce thresholds (calls between resolutions)
    pub const WALL_DEBOUNCE: u32 = 10;
    pub const ACCEL_DEBOUNCE: u32 = 10;
    pub const LINE_DEBOUNCE: u32 = 5;

    /// Pointer must be this close to a line segment to delete it
    pub const LINE_DELETE_DISTANCE: f32 = 15.0;

    /// Waiting-queue display slots (top bar)
    pub const QUEUE_SLOT_X: i32 = 20;
    pub const QUEUE_SLOT_SPACING: i32 = 30;
    pub const QUEUE_SLOT_Y: i32 = 30;
}

/// Convert a grid cell (column, row) to its top-left board position
#[inline]
pub fn cell_to_board(col: i32, row: i32) -> glam::IVec2 {
    glam::IVec2::new(col * consts::CELL_SIZE, row * consts::CELL_SIZE + consts::TOP_BAR)
}
