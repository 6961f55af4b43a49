//! Column terrain pass: strata, soil, shoreline, and grass decoration.

use burrow_chunk::{ChunkBuf, Voxel};
use burrow_registry::{Biome, DecorId, EMPTY, Registry, VoxelId};
use burrow_world::{CHUNK_SIZE, GenSettings, NoiseCtx, OverworldMap};
use rayon::prelude::*;

use crate::ctx::GenWorld;

/// Paint every chunk's terrain. Each chunk is a pure function of its
/// coordinate, so the volume is processed in parallel.
pub fn build_terrain(gw: &mut GenWorld<'_>) {
    let settings = gw.settings;
    let fields = gw.fields;
    let reg = gw.reg;
    let noise = &gw.noise;
    gw.grid
        .chunks_mut()
        .par_iter_mut()
        .for_each(|chunk| build_chunk_terrain(chunk, settings, fields, reg, noise));
    gw.stats.terrain_columns =
        (settings.chunks_x * settings.chunks_z * CHUNK_SIZE * CHUNK_SIZE) as u64;
}

pub fn build_chunk_terrain(
    chunk: &mut ChunkBuf,
    settings: &GenSettings,
    fields: &OverworldMap,
    reg: &Registry,
    noise: &NoiseCtx,
) {
    let bedrock = reg.voxels.id_by_name("bedrock").unwrap_or(EMPTY);
    let world_height = settings.world_height() as i32;
    let top = world_height as f32 - 2.0;
    let base_x = chunk.coord.cx * chunk.sx as i32;
    let base_y = chunk.coord.cy * chunk.sy as i32;
    let base_z = chunk.coord.cz * chunk.sz as i32;
    for lz in 0..chunk.sz {
        for lx in 0..chunk.sx {
            let wx = base_x + lx as i32;
            let wz = base_z + lz as i32;
            let h01 = fields.height_at(wx, wz);
            let Some(biome) = reg.biomes.get(fields.biome_at(wx, wz)) else {
                // Biome indices are validated before generation starts.
                continue;
            };
            let surface_y = ((h01 * top).round() as i32).clamp(1, world_height - 2);
            // Small deterministic wobble keeps strata boundaries from being flat planes.
            let perturb = ((wx as f32).sin() + (wz as f32).cos()).round() as i32;
            let stone_h = (surface_y - biome.soil_depth - perturb).clamp(1, surface_y);
            let grass = surface_grass(noise, biome, wx, wz);
            for ly in 0..chunk.sy {
                let wy = base_y + ly as i32;
                let v = column_voxel(settings, biome, bedrock, h01, surface_y, stone_h, grass, wy);
                chunk.set_local(lx, ly, lz, v);
            }
        }
    }
}

fn column_voxel(
    settings: &GenSettings,
    biome: &Biome,
    bedrock: VoxelId,
    h01: f32,
    surface_y: i32,
    stone_h: i32,
    grass: DecorId,
    wy: i32,
) -> Voxel {
    if wy == 0 {
        return Voxel::solid(bedrock);
    }
    if stone_h > 1 && wy <= stone_h {
        return Voxel::solid(stratum_material(biome, stone_h - wy));
    }
    if (wy == surface_y || wy == stone_h) && h01 > settings.sea_level {
        let mut v = Voxel::solid(biome.soil);
        v.grass = grass;
        return v;
    }
    if wy > surface_y {
        return Voxel::AIR;
    }
    if h01 <= settings.sea_level {
        return Voxel::solid(biome.shore);
    }
    Voxel::solid(biome.soil)
}

/// Subsurface layer whose cumulative depth band contains `depth_into`
/// (distance below the stone line). Columns deeper than the table reuse the
/// last layer.
fn stratum_material(biome: &Biome, depth_into: i32) -> VoxelId {
    let mut cum = 0;
    for layer in &biome.layers {
        cum += layer.depth;
        if depth_into < cum {
            return layer.material;
        }
    }
    biome.layers.last().map(|l| l.material).unwrap_or(biome.soil)
}

fn surface_grass(noise: &NoiseCtx, biome: &Biome, wx: i32, wz: i32) -> DecorId {
    let Some(decal) = &biome.grass else {
        return 0;
    };
    if decal.clumped {
        let n = noise.smooth3(
            wx as f32 / decal.clump_size,
            biome.id as f32 * 7.3,
            wz as f32 / decal.clump_size,
        );
        if n < decal.clump_threshold {
            return 0;
        }
    }
    decal.decoration
}

#[cfg(test)]
mod tests {
    use super::*;

    fn biome_with_layers() -> Biome {
        Biome {
            id: 0,
            name: "test".into(),
            soil: 3,
            shore: 4,
            soil_depth: 3,
            layers: vec![
                burrow_registry::StratumLayer {
                    material: 2,
                    depth: 5,
                },
                burrow_registry::StratumLayer {
                    material: 1,
                    depth: 4,
                },
            ],
            ruin_wall: 2,
            ruin_floor: 2,
            grass: None,
            water_is_lava: false,
            surface_ice: false,
            fauna: Vec::new(),
            flora: Vec::new(),
        }
    }

    #[test]
    fn strata_bands_accumulate_and_saturate() {
        let b = biome_with_layers();
        assert_eq!(stratum_material(&b, 0), 2);
        assert_eq!(stratum_material(&b, 4), 2);
        assert_eq!(stratum_material(&b, 5), 1);
        assert_eq!(stratum_material(&b, 8), 1);
        // Beyond the table the deepest layer repeats.
        assert_eq!(stratum_material(&b, 100), 1);
    }

    #[test]
    fn bedrock_always_wins_row_zero() {
        let b = biome_with_layers();
        let s = GenSettings::default();
        let v = column_voxel(&s, &b, 9, 0.5, 20, 10, 0, 0);
        assert_eq!(v.id, 9);
    }

    #[test]
    fn shore_below_sea_level_soil_above() {
        let b = biome_with_layers();
        let s = GenSettings::default();
        // Column under sea level: the non-stratum band paints shore.
        let shore = column_voxel(&s, &b, 9, 0.05, 4, 1, 0, 3);
        assert_eq!(shore.id, b.shore);
        // Above sea level the same band falls back to soil.
        let soil = column_voxel(&s, &b, 9, 0.5, 20, 1, 0, 10);
        assert_eq!(soil.id, b.soil);
    }
}
