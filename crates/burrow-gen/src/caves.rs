//! Cave carving driven by the ridged field, with a no-surface-breach guard.

use crate::ctx::GenWorld;
use crate::life;

/// Carve cave voids at each configured depth band. Must run after sunlight:
/// the validity check reads `SUNLIT` to keep caves from opening onto the sky.
pub fn carve_caves(gw: &mut GenWorld<'_>) {
    if gw.settings.cave_levels.is_empty() {
        return;
    }
    let size_x = gw.grid.size_x() as i32;
    let size_z = gw.grid.size_z() as i32;
    for wz in 0..size_z {
        for wx in 0..size_x {
            carve_column(gw, wx, wz);
        }
    }
}

fn carve_column(gw: &mut GenWorld<'_>, wx: i32, wz: i32) {
    let settings = gw.settings;
    let Some(top) = gw.grid.top_solid_y(wx, wz) else {
        return;
    };
    let last_freq = settings.cave_frequencies.last().copied().unwrap_or(1.0);
    for (bi, &band_y) in settings.cave_levels.iter().enumerate() {
        if band_y <= 0 || band_y >= top {
            continue;
        }
        let freq = settings
            .cave_frequencies
            .get(bi)
            .copied()
            .unwrap_or(last_freq);
        let s = settings.cave_noise_scale * freq;
        let (nx, ny, nz) = (wx as f32 * s, band_y as f32 * s * 3.0, wz as f32 * s);
        let n = gw.noise.ridged3(nx, ny, nz);
        if n.abs() <= settings.cave_size {
            continue;
        }
        let hn = gw.noise.smooth3(nx, ny, nz);
        let cave_height = ((hn + 2.0).round() as i32).clamp(1, 3);
        let mut aborted = false;
        for i in 0..cave_height {
            let wy = band_y - i;
            if !can_carve(gw, wx, wy, wz) {
                // Best-effort: cells carved before the abort stay carved.
                gw.stats.cave_aborts += 1;
                aborted = true;
                break;
            }
            gw.grid.update(wx, wy, wz, |v| v.carve());
            gw.stats.cave_cells_carved += 1;
        }
        if aborted {
            continue;
        }
        // Denser pockets below the lava line get their own ecosystem.
        if n.abs() > settings.cave_size * 1.8 && band_y < settings.lava_level_y {
            let floor_y = band_y - cave_height + 1;
            life::seed_cave_life(gw, wx, floor_y, wz);
        }
    }
}

/// A cell may be carved only when its full 26-neighborhood is inside the
/// grid and none of it is already sunlit.
fn can_carve(gw: &GenWorld<'_>, x: i32, y: i32, z: i32) -> bool {
    for dy in -1..=1 {
        for dz in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }
                match gw.grid.get(x + dx, y + dy, z + dz) {
                    None => return false,
                    Some(nv) if nv.sunlit() => return false,
                    Some(_) => {}
                }
            }
        }
    }
    true
}
