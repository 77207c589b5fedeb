//! Static scene description a level is built from

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::accel::Direction;
use super::color::ColorId;

/// One placed entity, positioned at the top-left of its cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneEntity {
    Wall { pos: IVec2, color: ColorId },
    Hole { pos: IVec2, color: ColorId },
    Spawner { pos: IVec2 },
    /// Ball already in play when the level starts
    Ball { pos: IVec2, color: ColorId },
    AccelTile { pos: IVec2, direction: Direction },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub entities: Vec<SceneEntity>,
}

impl Scene {
    pub fn new(entities: Vec<SceneEntity>) -> Self {
        Self { entities }
    }

    pub fn push(&mut self, entity: SceneEntity) {
        self.entities.push(entity);
    }

    pub fn spawners(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.entities.iter().filter_map(|e| match e {
            SceneEntity::Spawner { pos } => Some(*pos),
            _ => None,
        })
    }
}
