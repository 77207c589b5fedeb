//! End-of-level tiles that walk the board edge while the time bonus drains

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Heading along the board edge; turns clockwise at each corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Right,
    Down,
    Left,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerimeterTile {
    pub pos: IVec2,
    pub heading: Heading,
}

impl PerimeterTile {
    pub fn new(pos: IVec2) -> Self {
        Self {
            pos,
            heading: Heading::Right,
        }
    }

    /// The pair placed at a normal level end: top-left and bottom-right corners
    pub fn corner_pair() -> [Self; 2] {
        [
            Self::new(IVec2::new(0, TOP_BAR)),
            Self::new(IVec2::new(BOARD_WIDTH - CELL_SIZE, BOARD_HEIGHT - CELL_SIZE)),
        ]
    }

    /// Move one cell, clamping to the edge and turning at corners
    pub fn step(&mut self) {
        let max_x = BOARD_WIDTH - CELL_SIZE;
        let max_y = BOARD_HEIGHT - CELL_SIZE;
        match self.heading {
            Heading::Right => {
                self.pos.x += CELL_SIZE;
                if self.pos.x >= max_x {
                    self.pos.x = max_x;
                    self.heading = Heading::Down;
                }
            }
            Heading::Down => {
                self.pos.y += CELL_SIZE;
                if self.pos.y >= max_y {
                    self.pos.y = max_y;
                    self.heading = Heading::Left;
                }
            }
            Heading::Left => {
                self.pos.x -= CELL_SIZE;
                if self.pos.x <= 0 {
                    self.pos.x = 0;
                    self.heading = Heading::Up;
                }
            }
            Heading::Up => {
                self.pos.y -= CELL_SIZE;
                if self.pos.y <= TOP_BAR {
                    self.pos.y = TOP_BAR;
                    self.heading = Heading::Right;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_clockwise_around_the_board() {
        let mut tile = PerimeterTile::new(IVec2::new(0, TOP_BAR));
        let cols = (BOARD_WIDTH / CELL_SIZE - 1) as usize;
        let rows = ((BOARD_HEIGHT - TOP_BAR) / CELL_SIZE - 1) as usize;

        for _ in 0..cols {
            tile.step();
        }
        assert_eq!(tile.pos, IVec2::new(BOARD_WIDTH - CELL_SIZE, TOP_BAR));
        assert_eq!(tile.heading, Heading::Down);

        for _ in 0..rows + cols + rows {
            tile.step();
        }
        assert_eq!(tile.pos, IVec2::new(0, TOP_BAR));
        assert_eq!(tile.heading, Heading::Right);
    }

    #[test]
    fn test_bottom_right_tile_turns_down_then_left() {
        let [_, mut tile] = PerimeterTile::corner_pair();
        tile.step();
        // Already at the right edge: clamps and turns
        assert_eq!(tile.heading, Heading::Down);
        tile.step();
        assert_eq!(tile.heading, Heading::Left);
        tile.step();
        assert_eq!(tile.pos, IVec2::new(BOARD_WIDTH - 2 * CELL_SIZE, BOARD_HEIGHT - CELL_SIZE));
    }
}
