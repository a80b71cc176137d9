//! fd-core: dungeon level generation for From Darkness
//!
//! Rooms of varied shapes are rasterized into local masks, walled in by
//! dilation, checked against a shared blueprint and merged into it. The
//! finished blueprint is turned into a tile grid for a renderer.
//!
//! This crate does no terminal I/O. Randomness comes in through
//! [`fd_rng::RandomSource`] and prefab rooms through [`dungeon::PrefabLoader`].

pub mod config;
pub mod dungeon;
pub mod error;

mod consts;

pub use config::{GenConfig, ShapeWeight};
pub use consts::*;
pub use error::{ConfigError, PrefabError, RoomError};
