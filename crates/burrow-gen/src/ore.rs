//! Ore deposit placement: oriented ellipsoidal clusters and random-walk veins.

use burrow_geom::{Vec3, rotate_yaw_inv};
use burrow_registry::{OreSpawn, VoxelId};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::ctx::GenWorld;
use crate::rng::{ORE_SALT, subseeded};

/// Transient cluster request: an oriented ellipsoid consumed by one stamp.
#[derive(Clone, Debug)]
pub struct OreCluster {
    pub center: Vec3,
    pub radii: Vec3,
    pub yaw_deg: f32,
    pub type_id: VoxelId,
}

/// Transient vein request: a start point and walk length.
#[derive(Clone, Debug)]
pub struct OreVein {
    pub start: Vec3,
    pub length: i32,
    pub type_id: VoxelId,
}

/// Run every registered deposit-spawning type's placement events. Types are
/// visited in ascending id with a per-type sub-seeded RNG, so the pass is
/// reproducible regardless of what the rest of the pipeline did.
pub fn place_deposits(gw: &mut GenWorld<'_>) {
    let reg = gw.reg;
    for ty in &reg.voxels.voxels {
        let Some(ore) = ty.ore.as_ref() else {
            continue;
        };
        if !ore.clusters && !ore.veins {
            continue;
        }
        let mut rng = subseeded(gw.settings.seed, ORE_SALT, ty.id as u64);
        let lo = (75.0 * (1.0 - ore.rarity)).round() as i32;
        let hi = (100.0 * (1.0 - ore.rarity)).round() as i32;
        let events = if hi <= 0 { 0 } else { rng.gen_range(lo.max(0)..=hi) };
        for _ in 0..events {
            gw.stats.ore_events += 1;
            let pick_cluster = match (ore.clusters, ore.veins) {
                (true, false) => true,
                (false, true) => false,
                _ => rng.gen_bool(0.5),
            };
            if pick_cluster {
                if let Some(cluster) = make_cluster(gw, ty.id, ore, &mut rng) {
                    stamp_cluster(gw, &cluster, ore, &mut rng);
                }
            } else if let Some(vein) = make_vein(gw, ty.id, ore, &mut rng) {
                walk_vein(gw, &vein, ore, &mut rng);
            }
        }
    }
}

/// The type's legal vertical band clipped to the world interior; `None`
/// (an impossible band) silently skips the event.
fn height_band(gw: &GenWorld<'_>, ore: &OreSpawn) -> Option<(i32, i32)> {
    let lo = ore.min_height.max(1);
    let hi = ore.max_height.min(gw.grid.height() as i32 - 2);
    (lo <= hi).then_some((lo, hi))
}

fn make_cluster(
    gw: &GenWorld<'_>,
    type_id: VoxelId,
    ore: &OreSpawn,
    rng: &mut ChaCha8Rng,
) -> Option<OreCluster> {
    let (lo, hi) = height_band(gw, ore)?;
    let cs = ore.cluster_size.max(0.5);
    let radii = Vec3::new(
        rng.gen_range(0.25 * cs..=cs),
        rng.gen_range(0.25 * cs..=cs),
        rng.gen_range(0.25 * cs..=cs),
    );
    let yaw_deg = rng.gen_range(0.0..360.0);
    let center = Vec3::new(
        rng.gen_range(0.0..gw.grid.size_x() as f32),
        rng.gen_range(lo as f32..=hi as f32),
        rng.gen_range(0.0..gw.grid.size_z() as f32),
    );
    Some(OreCluster {
        center,
        radii,
        yaw_deg,
        type_id,
    })
}

fn stamp_cluster(
    gw: &mut GenWorld<'_>,
    cluster: &OreCluster,
    ore: &OreSpawn,
    rng: &mut ChaCha8Rng,
) {
    let r = cluster.radii.x.max(cluster.radii.y).max(cluster.radii.z);
    let x0 = (cluster.center.x - r).floor() as i32;
    let x1 = (cluster.center.x + r).ceil() as i32;
    let y0 = (cluster.center.y - r).floor() as i32;
    let y1 = (cluster.center.y + r).ceil() as i32;
    let z0 = (cluster.center.z - r).floor() as i32;
    let z1 = (cluster.center.z + r).ceil() as i32;
    for y in y0..=y1 {
        for z in z0..=z1 {
            for x in x0..=x1 {
                let pos = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5);
                let local = rotate_yaw_inv(pos - cluster.center, cluster.yaw_deg);
                let d = (local.x / cluster.radii.x).powi(2)
                    + (local.y / cluster.radii.y).powi(2)
                    + (local.z / cluster.radii.z).powi(2);
                if d > 1.0 {
                    continue;
                }
                // One draw per in-ellipsoid candidate, valid or not, keeps
                // the stream aligned with the geometry.
                if rng.r#gen::<f32>() >= ore.probability {
                    continue;
                }
                if gw.grid.get(x, y, z).is_none() {
                    continue;
                }
                if !ore.on_surface && is_surface_or_soil(gw, x, y, z) {
                    continue;
                }
                if gw.grid.update(x, y, z, |v| v.paint(cluster.type_id)) {
                    gw.stats.ore_voxels += 1;
                }
            }
        }
    }
}

fn make_vein(
    gw: &GenWorld<'_>,
    type_id: VoxelId,
    ore: &OreSpawn,
    rng: &mut ChaCha8Rng,
) -> Option<OreVein> {
    let (lo, hi) = height_band(gw, ore)?;
    let vl = ore.vein_length.max(1.0);
    let length = rng.gen_range(0.75 * vl..=1.25 * vl).round() as i32;
    let start = Vec3::new(
        rng.gen_range(0.0..gw.grid.size_x() as f32),
        rng.gen_range(lo as f32..=hi as f32),
        rng.gen_range(0.0..gw.grid.size_z() as f32),
    );
    Some(OreVein {
        start,
        length,
        type_id,
    })
}

fn walk_vein(gw: &mut GenWorld<'_>, vein: &OreVein, ore: &OreSpawn, rng: &mut ChaCha8Rng) {
    let Some((lo, hi)) = height_band(gw, ore) else {
        return;
    };
    // Fixed per-vein bias plus small per-step wobble, renormalized each step.
    let bias = random_dir(rng);
    let mut pos = vein.start;
    for _ in 0..vein.length {
        let dir = (bias + random_dir(rng) * 0.4).normalized();
        pos += dir;
        let step = rng.r#gen::<f32>();
        let (x, y, z) = (
            pos.x.floor() as i32,
            pos.y.floor() as i32,
            pos.z.floor() as i32,
        );
        let Some(v) = gw.grid.get(x, y, z) else {
            continue;
        };
        // Veins replace existing solid material, never air.
        if v.is_empty() {
            continue;
        }
        if y < lo || y > hi {
            continue;
        }
        if !ore.on_surface && is_surface_or_soil(gw, x, y, z) {
            continue;
        }
        if step >= ore.probability {
            continue;
        }
        if gw.grid.update(x, y, z, |c| c.paint(vein.type_id)) {
            gw.stats.ore_voxels += 1;
        }
    }
}

fn random_dir(rng: &mut ChaCha8Rng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let len = v.length();
        if len > 1e-3 && len <= 1.0 {
            return v / len;
        }
    }
}

/// Surface/soil exclusion: the column's top solid voxel, or a cell whose
/// current material is the local biome's soil.
fn is_surface_or_soil(gw: &GenWorld<'_>, x: i32, y: i32, z: i32) -> bool {
    if gw.grid.top_solid_y(x, z) == Some(y) {
        return true;
    }
    let Some(v) = gw.grid.get(x, y, z) else {
        return false;
    };
    let reg = gw.reg;
    reg.biomes
        .get(gw.fields.biome_at(x, z))
        .map(|b| b.soil == v.id)
        .unwrap_or(false)
}
