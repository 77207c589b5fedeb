//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must be pure and deterministic:
//! - One call per frame tick, no wall-clock reads
//! - Seeded RNG only (one per level)
//! - Stable iteration order (ball order, then collider order)
//! - No rendering or platform dependencies

pub mod accel;
pub mod ball;
pub mod collision;
pub mod color;
pub mod debounce;
pub mod hole;
pub mod line;
pub mod perimeter;
pub mod scene;
pub mod services;
pub mod state;
pub mod tick;
pub mod wall;

pub use accel::{AccelTile, Direction};
pub use ball::Ball;
pub use collision::{CollisionResult, ball_box_collision, distance_to_segment, reflect_velocity};
pub use color::ColorId;
pub use debounce::Debounce;
pub use hole::{Capture, Hole};
pub use line::PlayerLine;
pub use perimeter::{Heading, PerimeterTile};
pub use scene::{Scene, SceneEntity};
pub use services::{LevelTimer, ScoreSink, WaitingQueue};
pub use state::{EndReason, Level, LevelPhase, SimEvent};
pub use tick::tick;
pub use wall::{Wall, WallHit};
