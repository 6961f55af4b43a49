//! Stage ordering and the public generation entry points.

use std::time::Instant;

use burrow_chunk::{ChunkBuf, VoxelGrid};
use burrow_registry::Registry;
use burrow_world::{ChunkCoord, GenSettings, NoiseCtx, OverworldMap};

use crate::ctx::{GenStats, GenWorld};
use crate::{GenError, SpawnRequest, caves, life, liquid, ore, ruins, terrain};

/// One pipeline stage: a human-readable label (fed to the progress callback)
/// and the pass it runs.
pub struct Stage {
    pub label: &'static str,
    pub run: fn(&mut GenWorld<'_>),
}

/// The dependency-ordered stage list. Terrain precedes everything; sunlight
/// precedes carving (the breach guard reads `SUNLIT`) and liquids; ore and
/// ruins read terrain across chunk boundaries; liquids run after carving so
/// cave voids stay dry unless they sit under the lava line; life reads the
/// final surface.
pub fn stages() -> Vec<Stage> {
    vec![
        Stage {
            label: "painting terrain",
            run: terrain::build_terrain,
        },
        Stage {
            label: "propagating sunlight",
            run: sunlight,
        },
        Stage {
            label: "seeding ore deposits",
            run: ore::place_deposits,
        },
        Stage {
            label: "stamping ruins",
            run: ruins::stamp_ruins,
        },
        Stage {
            label: "carving caves",
            run: caves::carve_caves,
        },
        Stage {
            label: "filling liquids",
            run: liquid::fill_liquids,
        },
        Stage {
            label: "seeding surface life",
            run: life::seed_surface_life,
        },
    ]
}

fn sunlight(gw: &mut GenWorld<'_>) {
    burrow_light::propagate_sunlight(&mut gw.grid, &gw.reg.voxels);
}

/// Everything generation hands back: the populated grid, the deferred spawn
/// queue for the simulation to drain, and the pass counters.
pub struct GeneratedWorld {
    pub grid: VoxelGrid,
    pub spawns: Vec<SpawnRequest>,
    pub stats: GenStats,
}

/// Orchestrator entry point. Either the whole volume generates or a
/// configuration error is reported before any work starts; there is no
/// partial-success mode.
pub fn run_full_generation(
    settings: &GenSettings,
    fields: &OverworldMap,
    reg: &Registry,
    progress: &mut dyn FnMut(&str),
) -> Result<GeneratedWorld, GenError> {
    validate(settings, fields, reg)?;
    let mut gw = GenWorld::new(settings, fields, reg);
    for stage in stages() {
        progress(stage.label);
        let t0 = Instant::now();
        (stage.run)(&mut gw);
        log::info!("{} in {:.1?}", stage.label, t0.elapsed());
    }
    log::info!("generation stats: {:?}", gw.stats);
    Ok(GeneratedWorld {
        grid: gw.grid,
        spawns: gw.spawns,
        stats: gw.stats,
    })
}

fn validate(
    settings: &GenSettings,
    fields: &OverworldMap,
    reg: &Registry,
) -> Result<(), GenError> {
    settings.validate()?;
    let biome_count = reg.biomes.biomes.len();
    for cell in fields.cells() {
        if cell.biome as usize >= biome_count {
            return Err(GenError::UnknownBiome(cell.biome, biome_count));
        }
    }
    if reg.voxels.id_by_name("bedrock").is_none() {
        return Err(GenError::MissingVoxelType("bedrock"));
    }
    let needs_ice = reg.biomes.biomes.iter().any(|b| b.surface_ice);
    if needs_ice && reg.voxels.id_by_name("ice").is_none() {
        return Err(GenError::MissingVoxelType("ice"));
    }
    Ok(())
}

/// Terrain plus chunk-local sunlight for one chunk: a pure function of
/// (coordinate, settings, fields, registry). The cross-chunk passes (ore,
/// ruins, caves, liquids, life) belong to `run_full_generation`.
pub fn generate_chunk(
    coord: ChunkCoord,
    settings: &GenSettings,
    fields: &OverworldMap,
    reg: &Registry,
) -> Result<ChunkBuf, GenError> {
    validate(settings, fields, reg)?;
    let noise = NoiseCtx::new(settings);
    let mut buf = ChunkBuf::new(coord);
    terrain::build_chunk_terrain(&mut buf, settings, fields, reg, &noise);
    burrow_light::propagate_chunk(&mut buf, &reg.voxels);
    Ok(buf)
}
