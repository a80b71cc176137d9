//! Generation settings
//!
//! Every tunable of the placement loop lives in [`GenConfig`]. Missing
//! fields in a JSON file fall back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dungeon::RoomShape;
use crate::error::ConfigError;
use crate::{
    DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_PREFAB, ELLIPSE_EPSILON, MAX_ROOMS, MAX_TRIES,
    MIN_ROOM_DIM, RECT_MAX_HEI, RECT_MAX_WID, RECT_MIN_HEI, RECT_MIN_WID,
};

/// One row of the shape table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeWeight {
    pub shape: RoomShape,
    pub weight: u32,
}

impl ShapeWeight {
    pub const fn new(shape: RoomShape, weight: u32) -> Self {
        Self { shape, weight }
    }
}

/// Default shape table, in draw order
pub const DEFAULT_SHAPE_WEIGHTS: [ShapeWeight; 5] = [
    ShapeWeight::new(RoomShape::FullRect, 50),
    ShapeWeight::new(RoomShape::FullEllipse, 15),
    ShapeWeight::new(RoomShape::Prefab, 10),
    ShapeWeight::new(RoomShape::LShaped, 50),
    ShapeWeight::new(RoomShape::Donut, 50),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    pub map_width: usize,
    pub map_height: usize,
    /// Target room count
    pub max_rooms: usize,
    /// Rejected proposals tolerated before stopping early
    pub max_tries: usize,
    pub room_min_width: usize,
    pub room_max_width: usize,
    pub room_min_height: usize,
    pub room_max_height: usize,
    pub shape_weights: Vec<ShapeWeight>,
    pub ellipse_epsilon: f64,
    /// Prefab resource ids; one is picked per prefab room
    pub prefabs: Vec<String>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            max_rooms: MAX_ROOMS,
            max_tries: MAX_TRIES,
            room_min_width: RECT_MIN_WID,
            room_max_width: RECT_MAX_WID,
            room_min_height: RECT_MIN_HEI,
            room_max_height: RECT_MAX_HEI,
            shape_weights: DEFAULT_SHAPE_WEIGHTS.to_vec(),
            ellipse_epsilon: ELLIPSE_EPSILON,
            prefabs: vec![DEFAULT_PREFAB.to_string()],
        }
    }
}

impl GenConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GenConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Shape table as `(shape, weight)` pairs for [`crate::dungeon::weighted_choice`]
    pub fn shape_table(&self) -> Vec<(RoomShape, u32)> {
        self.shape_weights
            .iter()
            .map(|sw| (sw.shape, sw.weight))
            .collect()
    }

    /// Check the settings can drive the placement loop
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.map_width == 0 || self.map_height == 0 {
            return invalid(format!(
                "map must not be empty, got {}x{}",
                self.map_width, self.map_height
            ));
        }
        if self.map_width > u32::MAX as usize || self.map_height > u32::MAX as usize {
            return invalid("map dimensions out of range".to_string());
        }
        if self.room_min_width < MIN_ROOM_DIM || self.room_min_height < MIN_ROOM_DIM {
            return invalid(format!("room minimum size must be at least {MIN_ROOM_DIM}"));
        }
        if self.room_min_width > self.room_max_width {
            return invalid(format!(
                "room_min_width {} exceeds room_max_width {}",
                self.room_min_width, self.room_max_width
            ));
        }
        if self.room_min_height > self.room_max_height {
            return invalid(format!(
                "room_min_height {} exceeds room_max_height {}",
                self.room_min_height, self.room_max_height
            ));
        }
        if self.room_max_width + 1 > self.map_width || self.room_max_height + 1 > self.map_height
        {
            return invalid(format!(
                "rooms up to {}x{} do not fit a {}x{} map",
                self.room_max_width, self.room_max_height, self.map_width, self.map_height
            ));
        }
        if self.shape_weights.iter().all(|sw| sw.weight == 0) {
            return invalid("shape weights must have a positive total".to_string());
        }
        let wants_prefabs = self
            .shape_weights
            .iter()
            .any(|sw| sw.shape == RoomShape::Prefab && sw.weight > 0);
        if wants_prefabs && self.prefabs.is_empty() {
            return invalid("prefab rooms are weighted but no prefabs are listed".to_string());
        }
        if !(0.0..1.0).contains(&self.ellipse_epsilon) {
            return invalid(format!(
                "ellipse_epsilon must be in [0, 1), got {}",
                self.ellipse_epsilon
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GenConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.shape_table()[0], (RoomShape::FullRect, 50));
        assert_eq!(config.shape_table().iter().map(|&(_, w)| w).sum::<u32>(), 175);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GenConfig::from_json_str(r#"{"max_rooms": 5, "map_width": 60}"#).unwrap();
        assert_eq!(config.max_rooms, 5);
        assert_eq!(config.map_width, 60);
        assert_eq!(config.map_height, DEFAULT_MAP_HEIGHT);
        assert_eq!(config.prefabs, vec!["room.txt".to_string()]);
    }

    #[test]
    fn test_shape_table_from_json() {
        let config = GenConfig::from_json_str(
            r#"{"shape_weights": [{"shape": "donut", "weight": 3}, {"shape": "l_shaped", "weight": 1}]}"#,
        )
        .unwrap();
        assert_eq!(
            config.shape_table(),
            vec![(RoomShape::Donut, 3), (RoomShape::LShaped, 1)]
        );
    }

    #[test]
    fn test_invalid_configs() {
        let cases = [
            r#"{"map_width": 0}"#,
            r#"{"room_min_width": 12, "room_max_width": 11}"#,
            r#"{"room_min_height": 2}"#,
            r#"{"map_height": 18}"#,
            r#"{"shape_weights": [{"shape": "donut", "weight": 0}]}"#,
            r#"{"prefabs": []}"#,
            r#"{"ellipse_epsilon": 1.5}"#,
        ];
        for case in cases {
            assert!(
                matches!(GenConfig::from_json_str(case), Err(ConfigError::Invalid(_))),
                "{case} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            GenConfig::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GenConfig::from_json_str(r#"{"shape_weights": [{"shape": "hexagon", "weight": 1}]}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_prefab_free_table_needs_no_prefabs() {
        let config = GenConfig::from_json_str(
            r#"{"prefabs": [], "shape_weights": [{"shape": "full_rect", "weight": 1}]}"#,
        )
        .unwrap();
        assert!(config.prefabs.is_empty());
    }
}
