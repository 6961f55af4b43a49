pub type VoxelId = u16;
pub type DecorId = u16;

/// Sentinel voxel type: air / empty space.
pub const EMPTY: VoxelId = 0;

/// Ore placement metadata carried by voxel types that spawn as deposits.
#[derive(Clone, Debug)]
pub struct OreSpawn {
    pub clusters: bool,
    pub veins: bool,
    /// Inverse abundance in 0..1; rarer types get fewer placement events.
    pub rarity: f32,
    pub min_height: i32,
    pub max_height: i32,
    pub cluster_size: f32,
    pub vein_length: f32,
    /// Per-candidate-voxel Bernoulli probability during stamping.
    pub probability: f32,
    /// Allow painting over surface/soil cells.
    pub on_surface: bool,
}

#[derive(Clone, Debug)]
pub struct VoxelType {
    pub id: VoxelId,
    pub name: String,
    pub transparent: bool,
    pub flammable: bool,
    pub ore: Option<OreSpawn>,
}
