//! The multi-pass world generator: terrain, sunlight, ore, ruins, caves, liquids, life.
#![forbid(unsafe_code)]

pub mod caves;
pub mod ctx;
pub mod life;
pub mod liquid;
pub mod ore;
pub mod pipeline;
pub mod rng;
pub mod ruins;
pub mod terrain;

use thiserror::Error;

pub use ctx::{GenStats, GenWorld};
pub use ore::{OreCluster, OreVein};
pub use pipeline::{GeneratedWorld, Stage, generate_chunk, run_full_generation, stages};
pub use ruins::RuinFootprint;

/// A deferred entity-spawn request. Generation never creates entities
/// inline; the embedding simulation drains this list once the pass is done.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    pub entity: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub scale: Option<f32>,
}

/// Fatal configuration problems. Local placement failures (an aborted cave
/// carve, a footprint with no ground, an out-of-bounds vein step) are not
/// errors and never surface here.
#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Settings(#[from] burrow_world::SettingsError),
    #[error("overworld map references biome index {0} but only {1} biomes are registered")]
    UnknownBiome(u16, usize),
    #[error("voxel type table is missing required type '{0}'")]
    MissingVoxelType(&'static str),
}
