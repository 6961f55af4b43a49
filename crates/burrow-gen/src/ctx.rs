use burrow_chunk::VoxelGrid;
use burrow_registry::{BiomeId, Registry};
use burrow_world::{GenSettings, NoiseCtx, OverworldMap};
use hashbrown::HashMap;

use crate::SpawnRequest;

/// Everything a pipeline stage reads and writes. The lookup tables and the
/// overworld fields stay borrowed and immutable; the grid, spawn queue,
/// population ledger and counters are the mutable state threaded through
/// the stage list.
pub struct GenWorld<'a> {
    pub settings: &'a GenSettings,
    pub fields: &'a OverworldMap,
    pub reg: &'a Registry,
    pub noise: NoiseCtx,
    pub grid: VoxelGrid,
    pub spawns: Vec<SpawnRequest>,
    /// Running spawn counts keyed by (biome, fauna-table index).
    pub populations: HashMap<(BiomeId, usize), u32>,
    pub stats: GenStats,
}

impl<'a> GenWorld<'a> {
    pub fn new(settings: &'a GenSettings, fields: &'a OverworldMap, reg: &'a Registry) -> Self {
        Self {
            settings,
            fields,
            reg,
            noise: NoiseCtx::new(settings),
            grid: VoxelGrid::new(settings.chunks_x, settings.chunks_y, settings.chunks_z),
            spawns: Vec::new(),
            populations: HashMap::new(),
            stats: GenStats::default(),
        }
    }
}

/// Per-stage counters, logged after each run. The placement passes are
/// stochastic, so these are the cheapest way to see what a seed produced.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenStats {
    pub terrain_columns: u64,
    pub cave_cells_carved: u64,
    pub cave_aborts: u64,
    pub ore_events: u64,
    pub ore_voxels: u64,
    pub ruins_stamped: u64,
    pub ruin_doors: u64,
    pub water_cells: u64,
    pub ice_cells: u64,
    pub lava_cells: u64,
    pub fauna_spawns: u64,
    pub flora_spawns: u64,
}
