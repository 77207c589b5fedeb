//! Level layout text -> scene description
//!
//! One text row per board row, one character per cell:
//! - `X` grey wall, `1`-`4` colored wall
//! - `S` spawner
//! - `H<d>` hole of color d (0-4), spans the next cell too
//! - `B<d>` ball of color d already in play
//! - `A<d>` acceleration tile (0 up, 1 down, 2 left, 3 right)
//! - anything else is open floor

use std::path::Path;

use anyhow::{Context, Result};

use crate::cell_to_board;
use crate::config::GameConfig;
use crate::sim::accel::Direction;
use crate::sim::color::{COLOR_COUNT, ColorId};
use crate::sim::scene::{Scene, SceneEntity};

/// Parse layout text into a scene. Unrecognized or incomplete cells are
/// treated as floor.
pub fn parse_layout(text: &str) -> Scene {
    let mut scene = Scene::default();

    for (row, line) in text.lines().enumerate() {
        let cells: Vec<char> = line.chars().collect();
        let mut col = 0;
        while col < cells.len() {
            let pos = cell_to_board(col as i32, row as i32);
            let digit = cells.get(col + 1).and_then(|c| c.to_digit(10));

            match cells[col] {
                'X' => scene.push(SceneEntity::Wall { pos, color: 0 }),
                c @ '1'..='4' => scene.push(SceneEntity::Wall {
                    pos,
                    color: c.to_digit(10).unwrap_or(0) as ColorId,
                }),
                'S' => scene.push(SceneEntity::Spawner { pos }),
                'H' => {
                    if let Some(d) = digit.filter(|d| (*d as usize) < COLOR_COUNT) {
                        scene.push(SceneEntity::Hole {
                            pos,
                            color: d as ColorId,
                        });
                        col += 1;
                    }
                }
                'B' => {
                    if let Some(d) = digit {
                        scene.push(SceneEntity::Ball {
                            pos,
                            color: d as ColorId,
                        });
                        col += 1;
                    }
                }
                'A' => {
                    if let Some(d) = digit {
                        // Unknown digits fall back to up
                        let direction = Direction::from_digit(d).unwrap_or(Direction::Up);
                        scene.push(SceneEntity::AccelTile { pos, direction });
                        col += 1;
                    }
                }
                _ => {}
            }
            col += 1;
        }
    }

    scene
}

/// Read and parse every level's layout file, relative to `base_dir`
pub fn load_scenes(config: &GameConfig, base_dir: impl AsRef<Path>) -> Result<Vec<Scene>> {
    let base_dir = base_dir.as_ref();
    config
        .levels
        .iter()
        .map(|level| {
            let path = base_dir.join(&level.layout);
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read layout {}", path.display()))?;
            Ok(parse_layout(&text))
        })
        .collect()
}
