//! Voxel-type, biome, and decoration tables: immutable lookup data for generation.
#![forbid(unsafe_code)]

pub mod biome;
pub mod config;
pub mod decoration;
pub mod registry;
pub mod types;

pub use biome::{Biome, BiomeId, BiomeRegistry, FaunaSpawn, FloraSpawn, GrassDecal, StratumLayer};
pub use decoration::DecorationCatalog;
pub use registry::{Registry, VoxelTypeRegistry};
pub use types::{DecorId, EMPTY, OreSpawn, VoxelId, VoxelType};
