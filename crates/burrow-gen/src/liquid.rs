//! Standing liquids: sea-level water/ice fill plus the permanent lava floor.

use burrow_chunk::Liquid;
use burrow_registry::EMPTY;

use crate::ctx::GenWorld;

pub fn fill_liquids(gw: &mut GenWorld<'_>) {
    let settings = gw.settings;
    let reg = gw.reg;
    let sea_y = settings.sea_level_y();
    let ice = reg.voxels.id_by_name("ice").unwrap_or(EMPTY);
    let size_x = gw.grid.size_x() as i32;
    let size_z = gw.grid.size_z() as i32;
    for wz in 0..size_z {
        for wx in 0..size_x {
            let Some(biome) = reg.biomes.get(gw.fields.biome_at(wx, wz)) else {
                continue;
            };
            let kind = if biome.water_is_lava {
                Liquid::Lava
            } else {
                Liquid::Water
            };
            // Open, sky-reachable space up to sea level holds water.
            for wy in 0..=sea_y {
                let Some(v) = gw.grid.get(wx, wy, wz) else {
                    break;
                };
                if !v.is_empty() || !v.sunlit() || v.level > 0 {
                    continue;
                }
                if biome.surface_ice && wy == sea_y && ice != EMPTY {
                    gw.grid.update(wx, wy, wz, |c| c.paint(ice));
                    gw.stats.ice_cells += 1;
                } else {
                    gw.grid.update(wx, wy, wz, |c| c.fill_liquid(kind));
                    match kind {
                        Liquid::Lava => gw.stats.lava_cells += 1,
                        _ => gw.stats.water_cells += 1,
                    }
                }
            }
            // Magma floor: every open cell below the lava line fills,
            // sunlit or not.
            for wy in 0..settings.lava_level_y {
                let Some(v) = gw.grid.get(wx, wy, wz) else {
                    break;
                };
                if v.is_empty() && v.level == 0 {
                    gw.grid.update(wx, wy, wz, |c| c.fill_liquid(Liquid::Lava));
                    gw.stats.lava_cells += 1;
                }
            }
        }
    }
}
