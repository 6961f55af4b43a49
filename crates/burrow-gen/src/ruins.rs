//! Ruin stamping: noise-triggered footprints with decayed walls and door gaps.

use burrow_registry::Biome;
use burrow_world::CHUNK_SIZE;
use rand::Rng;

use crate::ctx::GenWorld;
use crate::rng::{RUIN_SALT, chunk_key, subseeded};

/// Transient footprint request, consumed immediately by the stamp.
#[derive(Clone, Debug)]
pub struct RuinFootprint {
    pub x0: i32,
    pub z0: i32,
    pub width: i32,
    pub depth: i32,
    pub wall_height: i32,
    pub y_offset: i32,
    /// Door flags per cardinal wall: north (-z), south (+z), west (-x), east (+x).
    pub doors: [bool; 4],
}

pub fn stamp_ruins(gw: &mut GenWorld<'_>) {
    let settings = gw.settings;
    for cz in 0..settings.chunks_z as i32 {
        for cx in 0..settings.chunks_x as i32 {
            stamp_chunk(gw, cx, cz);
        }
    }
}

fn stamp_chunk(gw: &mut GenWorld<'_>, cx: i32, cz: i32) {
    let settings = gw.settings;
    let base_x = cx * CHUNK_SIZE as i32;
    let base_z = cz * CHUNK_SIZE as i32;
    // Sparse trigger: most chunks roll a ridged magnitude above the rate.
    let n = gw.noise.ridged2(base_x as f32, base_z as f32);
    if n.abs() > settings.ruins_rate {
        return;
    }
    let mut rng = subseeded(settings.seed, RUIN_SALT, chunk_key(cx, cz));
    let width = rng.gen_range(4..=16);
    let depth = rng.gen_range(4..=16);
    let wall_height = rng.gen_range(2..=6);
    let y_offset = rng.gen_range(-4..=2);
    let x0 = base_x + rng.gen_range(0..(CHUNK_SIZE as i32 - width).max(1));
    let z0 = base_z + rng.gen_range(0..(CHUNK_SIZE as i32 - depth).max(1));
    let doors = [
        rng.gen_bool(0.5),
        rng.gen_bool(0.5),
        rng.gen_bool(0.5),
        rng.gen_bool(0.5),
    ];
    let fp = RuinFootprint {
        x0,
        z0,
        width,
        depth,
        wall_height,
        y_offset,
        doors,
    };
    let reg = gw.reg;
    let Some(biome) = reg.biomes.get(gw.fields.biome_at(x0, z0)) else {
        return;
    };
    if stamp_footprint(gw, &fp, biome) {
        gw.stats.ruins_stamped += 1;
    }
}

/// Paint one footprint into the grid. Returns false when no cell under the
/// footprint had any ground to build on (silently skipped, not an error).
pub fn stamp_footprint(gw: &mut GenWorld<'_>, fp: &RuinFootprint, biome: &Biome) -> bool {
    let mut sum = 0i64;
    let mut samples = 0i64;
    for dz in 0..fp.depth {
        for dx in 0..fp.width {
            if let Some(h) = gw.grid.top_solid_y(fp.x0 + dx, fp.z0 + dz) {
                sum += h as i64;
                samples += 1;
            }
        }
    }
    if samples == 0 {
        return false;
    }
    let avg_h = (sum as f32 / samples as f32).round() as i32;
    let world_height = gw.grid.height() as i32;
    let base_y = (avg_h + fp.y_offset).clamp(1, world_height - 2);
    let mut doors_cut = 0u64;
    for dz in 0..fp.depth {
        for dx in 0..fp.width {
            let x = fp.x0 + dx;
            let z = fp.z0 + dz;
            // Patchy decay keeps ruins from stamping as solid prisms.
            let decay = (gw.noise.smooth2(x as f32 * 0.05, z as f32 * 0.05) + 1.0) * 0.5;
            if decay > 0.7 {
                continue;
            }
            let edge = dx == 0 || dz == 0 || dx == fp.width - 1 || dz == fp.depth - 1;
            if edge {
                gw.grid.update(x, base_y, z, |v| v.paint(biome.ruin_wall));
            } else if gw
                .grid
                .get(x, base_y, z)
                .map(|v| v.is_empty())
                .unwrap_or(false)
            {
                // Interior cells only fill voids; the edge ring always paints.
                gw.grid.update(x, base_y, z, |v| v.paint(biome.ruin_floor));
            }
            fill_to_ground(gw, x, base_y, z);
            if edge {
                let wall_cells = (fp.wall_height as f32 * (1.0 - decay)).round() as i32;
                let door = door_wall(fp, dx, dz)
                    .map(|w| fp.doors[w])
                    .unwrap_or(false);
                if door && wall_cells >= 3 {
                    doors_cut += 1;
                }
                for i in 1..=wall_cells {
                    if door && i <= 3 {
                        // Doors are a 3-cell-tall gap left unpainted.
                        continue;
                    }
                    gw.grid.update(x, base_y + i, z, |v| v.paint(biome.ruin_wall));
                }
            }
        }
    }
    gw.stats.ruin_doors += doors_cut;
    true
}

/// Mid-span cell of a cardinal wall, if this footprint cell is one.
fn door_wall(fp: &RuinFootprint, dx: i32, dz: i32) -> Option<usize> {
    let mid_x = fp.width / 2;
    let mid_z = fp.depth / 2;
    if dz == 0 && dx == mid_x {
        return Some(0);
    }
    if dz == fp.depth - 1 && dx == mid_x {
        return Some(1);
    }
    if dx == 0 && dz == mid_z {
        return Some(2);
    }
    if dx == fp.width - 1 && dz == mid_z {
        return Some(3);
    }
    None
}

/// Back-fill the gap between the footprint base and the terrain below with
/// the ground's own material so the ruin never floats.
fn fill_to_ground(gw: &mut GenWorld<'_>, x: i32, base_y: i32, z: i32) {
    let mut ground = None;
    let mut y = base_y - 1;
    while y >= 0 {
        match gw.grid.get(x, y, z) {
            Some(v) if !v.is_empty() => {
                ground = Some((y, v.id));
                break;
            }
            Some(_) => y -= 1,
            None => return,
        }
    }
    let Some((gy, id)) = ground else {
        return;
    };
    for fy in (gy + 1)..base_y {
        gw.grid.update(x, fy, z, |v| v.paint(id));
    }
}
