//! Life seeding: per-biome fauna and flora rolls for surfaces and cave interiors.

use burrow_registry::Biome;

use crate::SpawnRequest;
use crate::ctx::GenWorld;
use crate::rng::{CAVE_LIFE_SALT, LIFE_SALT, rand01_3};

/// Roll every surface column against its biome's spawn tables.
pub fn seed_surface_life(gw: &mut GenWorld<'_>) {
    let size_x = gw.grid.size_x() as i32;
    let size_z = gw.grid.size_z() as i32;
    for wz in 0..size_z {
        for wx in 0..size_x {
            seed_column(gw, wx, wz);
        }
    }
}

fn seed_column(gw: &mut GenWorld<'_>, wx: i32, wz: i32) {
    let Some(surf_y) = gw.grid.top_solid_y(wx, wz) else {
        return;
    };
    if surf_y == 0 || surf_y > gw.settings.life_max_y {
        return;
    }
    // Nothing spawns under standing liquid.
    if let Some(above) = gw.grid.get(wx, surf_y + 1, wz) {
        if above.level > 0 {
            return;
        }
    }
    let reg = gw.reg;
    let Some(biome) = reg.biomes.get(gw.fields.biome_at(wx, wz)) else {
        return;
    };
    roll_fauna(gw, biome, wx, surf_y, wz, LIFE_SALT);
    let Some(surf) = gw.grid.get(wx, surf_y, wz) else {
        return;
    };
    if surf.id == biome.soil && surf.grass != 0 {
        roll_flora(gw, biome, wx, surf_y, wz, LIFE_SALT, true);
    }
}

/// Cave-interior seeding invoked by the carver: same tables, substituting
/// the cave (or, below the hell line, hell) biome.
pub(crate) fn seed_cave_life(gw: &mut GenWorld<'_>, x: i32, floor_y: i32, z: i32) {
    let name = if floor_y < gw.settings.hell_level_y {
        "hell"
    } else {
        "cave"
    };
    let reg = gw.reg;
    let Some(biome) = reg.biomes.by_name(name) else {
        return;
    };
    roll_fauna(gw, biome, x, floor_y, z, CAVE_LIFE_SALT);
    roll_flora(gw, biome, x, floor_y, z, CAVE_LIFE_SALT, false);
}

fn roll_fauna(gw: &mut GenWorld<'_>, biome: &Biome, x: i32, y: i32, z: i32, salt: u32) {
    let seed = (gw.settings.seed as u32) ^ salt;
    for (i, f) in biome.fauna.iter().enumerate() {
        let entry_seed = seed.wrapping_add(i as u32 * 0x9E37_79B9);
        if rand01_3(x, y, z, entry_seed) >= f.probability {
            continue;
        }
        let count = gw.populations.entry((biome.id, i)).or_insert(0);
        if *count >= f.cap {
            continue;
        }
        *count += 1;
        let sr = rand01_3(x, y, z, entry_seed ^ 0x00A5_51E5);
        let scale = f.size_min + sr * (f.size_max - f.size_min);
        gw.spawns.push(SpawnRequest {
            entity: f.entity.clone(),
            x,
            y,
            z,
            scale: Some(scale),
        });
        gw.stats.fauna_spawns += 1;
        break;
    }
}

fn roll_flora(
    gw: &mut GenWorld<'_>,
    biome: &Biome,
    x: i32,
    y: i32,
    z: i32,
    salt: u32,
    restamp_soil: bool,
) {
    let seed = (gw.settings.seed as u32) ^ salt;
    for (i, p) in biome.flora.iter().enumerate() {
        // Vegetation grows in clumps: gate on the smooth field first.
        let offset = biome.id as f32 * 13.0 + i as f32 * 17.0;
        let n = gw
            .noise
            .smooth3(x as f32 / p.clump_size, offset, z as f32 / p.clump_size);
        if n < p.clump_threshold {
            continue;
        }
        let entry_seed = seed
            .wrapping_add(0xC0FF_EE15)
            .wrapping_add(i as u32 * 0x9E37_79B9);
        if rand01_3(x, y, z, entry_seed) >= p.probability {
            continue;
        }
        if restamp_soil {
            let soil = biome.soil;
            gw.grid.update(x, y, z, |v| v.paint(soil));
        }
        let vr = rand01_3(x, y, z, entry_seed ^ 0x00F1_0A7A);
        let scale = p.size_mean + p.size_var * (vr * 2.0 - 1.0);
        gw.spawns.push(SpawnRequest {
            entity: p.entity.clone(),
            x,
            y,
            z,
            scale: Some(scale),
        });
        gw.stats.flora_spawns += 1;
        break;
    }
}
