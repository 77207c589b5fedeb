//! Game configuration
//!
//! Loaded from a JSON document: the level list plus per-color score values.
//!
//! ```json
//! {
//!   "levels": [
//!     { "layout": "level1.txt", "time": 120, "spawn_interval": 10,
//!       "balls": ["blue", "green"],
//!       "score_increase_from_hole_capture_modifier": 1.0,
//!       "score_decrease_from_wrong_hole_modifier": 1.0 }
//!   ],
//!   "score_increase_from_hole_capture": { "grey": 70, "blue": 50, ... },
//!   "score_decrease_from_wrong_hole": { "grey": 0, "blue": 25, ... }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::sim::color::{self, COLOR_COUNT, ColorId};

fn default_modifier() -> f64 {
    1.0
}

/// Settings for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Layout file, relative to the config file's directory
    pub layout: String,
    /// Countdown length in seconds
    pub time: u32,
    /// Seconds between spawns from the waiting queue
    pub spawn_interval: u32,
    /// Colors of the balls queued at level start, in spawn order
    pub balls: Vec<String>,
    #[serde(default = "default_modifier")]
    pub score_increase_from_hole_capture_modifier: f64,
    #[serde(default = "default_modifier")]
    pub score_decrease_from_wrong_hole_modifier: f64,
}

impl LevelConfig {
    /// Queued ball colors as ids (names were validated at load)
    pub fn ball_colors(&self) -> Vec<ColorId> {
        self.balls.iter().filter_map(|n| color::from_name(n)).collect()
    }
}

/// Whole-game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub levels: Vec<LevelConfig>,
    pub score_increase_from_hole_capture: BTreeMap<String, i32>,
    pub score_decrease_from_wrong_hole: BTreeMap<String, i32>,
}

impl GameConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(json).context("Failed to parse game config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::info!("Loaded config with {} levels", config.levels.len());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (table_name, table) in [
            ("score_increase_from_hole_capture", &self.score_increase_from_hole_capture),
            ("score_decrease_from_wrong_hole", &self.score_decrease_from_wrong_hole),
        ] {
            for id in 0..COLOR_COUNT as ColorId {
                let name = color::name(id).unwrap_or("unknown");
                if !table.contains_key(name) {
                    bail!("{} is missing an entry for {}", table_name, name);
                }
            }
        }

        for (i, level) in self.levels.iter().enumerate() {
            if let Some(bad) = level.balls.iter().find(|n| color::from_name(n).is_none()) {
                bail!("level {} has unknown ball color {:?}", i, bad);
            }
        }
        Ok(())
    }

    pub fn level(&self, index: usize) -> Option<&LevelConfig> {
        self.levels.get(index)
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Score deltas for a level, with that level's modifiers applied
    pub fn score_table(&self, level_index: usize) -> ScoreTable {
        let (inc_mod, dec_mod) = self
            .level(level_index)
            .map(|l| {
                (
                    l.score_increase_from_hole_capture_modifier,
                    l.score_decrease_from_wrong_hole_modifier,
                )
            })
            .unwrap_or((1.0, 1.0));

        let scaled = |table: &BTreeMap<String, i32>, modifier: f64| {
            let mut out = [0; COLOR_COUNT];
            for (id, slot) in out.iter_mut().enumerate() {
                let base = color::name(id as ColorId)
                    .and_then(|n| table.get(n))
                    .copied()
                    .unwrap_or(0);
                *slot = (base as f64 * modifier) as i32;
            }
            out
        };

        ScoreTable {
            increase: scaled(&self.score_increase_from_hole_capture, inc_mod),
            decrease: scaled(&self.score_decrease_from_wrong_hole, dec_mod),
        }
    }
}

/// Per-color score deltas for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreTable {
    pub increase: [i32; COLOR_COUNT],
    pub decrease: [i32; COLOR_COUNT],
}

impl ScoreTable {
    /// Points for a correct capture; colors outside the table score nothing
    pub fn increase_for(&self, color: ColorId) -> i32 {
        self.increase.get(color as usize).copied().unwrap_or(0)
    }

    /// Points lost for a wrong hole; colors outside the table cost nothing
    pub fn decrease_for(&self, color: ColorId) -> i32 {
        self.decrease.get(color as usize).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "levels": [
            {
                "layout": "level1.txt",
                "time": 120,
                "spawn_interval": 10,
                "balls": ["blue", "green", "Orange"],
                "score_increase_from_hole_capture_modifier": 1.5,
                "score_decrease_from_wrong_hole_modifier": 0.5
            },
            {
                "layout": "level2.txt",
                "time": 60,
                "spawn_interval": 5,
                "balls": ["grey"]
            }
        ],
        "score_increase_from_hole_capture": {
            "grey": 70, "blue": 50, "green": 50, "orange": 50, "yellow": 100
        },
        "score_decrease_from_wrong_hole": {
            "grey": 0, "blue": 25, "green": 25, "orange": 25, "yellow": 100
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let config = GameConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.num_levels(), 2);
        assert_eq!(config.levels[0].ball_colors(), vec![1, 2, 3]);
        // Missing modifiers default to 1.0
        assert_eq!(config.levels[1].score_increase_from_hole_capture_modifier, 1.0);
    }

    #[test]
    fn test_score_table_applies_modifiers() {
        let config = GameConfig::from_json(SAMPLE).unwrap();
        let table = config.score_table(0);
        assert_eq!(table.increase, [105, 75, 75, 75, 150]);
        // 25 * 0.5 truncates to 12
        assert_eq!(table.decrease, [0, 12, 12, 12, 50]);

        let table = config.score_table(1);
        assert_eq!(table.increase_for(4), 100);
        assert_eq!(table.decrease_for(1), 25);
        assert_eq!(table.increase_for(9), 0);
    }

    #[test]
    fn test_missing_color_is_an_error() {
        let json = SAMPLE.replace(r#""grey": 70"#, r#""gray": 70"#);
        assert!(GameConfig::from_json(&json).is_err());
    }

    #[test]
    fn test_unknown_ball_color_is_an_error() {
        let json = SAMPLE.replace(r#"["grey"]"#, r#"["magenta"]"#);
        let err = GameConfig::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("magenta"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(GameConfig::from_json("{ not json").is_err());
    }
}
