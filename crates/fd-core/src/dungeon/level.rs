//! Level generation: the room placement loop
//!
//! Rooms are proposed at random positions, sizes and shapes. Each proposal
//! is rasterized, checked against the blueprint and merged on success. A
//! rejected proposal costs one try; when the try budget runs out the level
//! keeps whatever rooms it has.

use std::collections::BTreeMap;

use fd_rng::RandomSource;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::prefab::PrefabLoader;
use super::shape::weighted_choice;
use super::{Blueprint, Room, RoomShape, TileGrid};
use crate::config::GenConfig;
use crate::error::RoomError;

/// How a placement run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The target room count was reached
    Complete,
    /// The try budget ran out first; the level is partially populated
    Exhausted,
}

/// Summary of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub rooms_placed: usize,
    pub tries: usize,
    pub outcome: Outcome,
    pub shape_counts: BTreeMap<RoomShape, usize>,
}

/// A generated level: blueprint, tiles, and the rooms in acceptance order
#[derive(Debug, Clone)]
pub struct Level {
    pub width: usize,
    pub height: usize,
    blueprint: Blueprint,
    tiles: TileGrid,
    rooms: Vec<Room>,
}

impl Level {
    /// Create an empty level; every tile starts blocked
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            blueprint: Blueprint::new(width, height),
            tiles: TileGrid::new(width, height),
            rooms: Vec::new(),
        }
    }

    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Index of the room whose floor covers `(x, y)`
    pub fn room_at(&self, x: usize, y: usize) -> Option<usize> {
        self.rooms.iter().position(|r| r.has_floor_at(x, y))
    }

    /// Propose one room
    ///
    /// Returns `Ok(true)` if the room was merged, `Ok(false)` on collision,
    /// and an error if the room could not be built at all.
    #[allow(clippy::too_many_arguments)]
    pub fn add_room<R: RandomSource + ?Sized>(
        &mut self,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        shape: RoomShape,
        config: &GenConfig,
        rng: &mut R,
        prefabs: &dyn PrefabLoader,
    ) -> Result<bool, RoomError> {
        let mut room = Room::new(x, y, w, h, self.width, self.height)?;
        room.design(shape, config, rng, prefabs)?;

        if !self.blueprint.try_add(&room) {
            return Ok(false);
        }
        debug!(
            "placed {} room #{} at ({}, {}) size {}x{}",
            room.shape,
            self.rooms.len(),
            room.x,
            room.y,
            room.width,
            room.height
        );
        self.rooms.push(room);
        Ok(true)
    }

    /// Run the placement loop, then build the tile grid
    pub fn generate<R: RandomSource + ?Sized>(
        &mut self,
        config: &GenConfig,
        rng: &mut R,
        prefabs: &dyn PrefabLoader,
    ) -> GenerationReport {
        let table = config.shape_table();
        let mut tries = 0;

        while self.rooms.len() < config.max_rooms {
            if tries >= config.max_tries {
                warn!(
                    "maximum tries reached: placed {} of {} rooms",
                    self.rooms.len(),
                    config.max_rooms
                );
                break;
            }

            let x = rng.randint(0, self.width as u32) as usize;
            let y = rng.randint(0, self.height as u32) as usize;
            let w = rng.randint(config.room_min_width as u32, config.room_max_width as u32) as usize;
            let h = rng.randint(config.room_min_height as u32, config.room_max_height as u32) as usize;
            let shape = weighted_choice(&table, rng).unwrap_or(RoomShape::FullRect);

            match self.add_room(x, y, w, h, shape, config, rng, prefabs) {
                Ok(true) => {}
                Ok(false) => {
                    tries += 1;
                    debug!("{shape} room at ({x}, {y}) collided (try {tries})");
                }
                Err(e) => {
                    tries += 1;
                    debug!("{shape} room at ({x}, {y}) rejected: {e} (try {tries})");
                }
            }
        }

        self.construct();

        let outcome = if self.rooms.len() >= config.max_rooms {
            Outcome::Complete
        } else {
            Outcome::Exhausted
        };
        let mut shape_counts = BTreeMap::new();
        for room in &self.rooms {
            *shape_counts.entry(room.shape).or_insert(0) += 1;
        }
        info!(
            "generated {}x{} level: {} rooms, {} tries",
            self.width,
            self.height,
            self.rooms.len(),
            tries
        );

        GenerationReport {
            rooms_placed: self.rooms.len(),
            tries,
            outcome,
            shape_counts,
        }
    }

    /// Rebuild the tile grid from the blueprint
    pub fn construct(&mut self) {
        self.tiles = TileGrid::from_blueprint(self.blueprint.grid());
    }
}

/// Generate a level sized by the configuration
pub fn generate_level<R: RandomSource + ?Sized>(
    config: &GenConfig,
    rng: &mut R,
    prefabs: &dyn PrefabLoader,
) -> (Level, GenerationReport) {
    let mut level = Level::new(config.map_width, config.map_height);
    let report = level.generate(config, rng, prefabs);
    (level, report)
}
