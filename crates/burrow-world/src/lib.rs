//! World sizing, generator settings, noise context, and overworld field input.
#![forbid(unsafe_code)]

pub mod chunk_coord;
pub mod fields;
pub mod noise;
pub mod settings;

pub use chunk_coord::ChunkCoord;
pub use fields::{FieldCell, OverworldMap};
pub use noise::NoiseCtx;
pub use settings::{CHUNK_SIZE, GenConfig, GenSettings, SettingsError, load_settings_from_path};
