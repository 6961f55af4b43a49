use burrow_chunk::{Liquid, VoxelGrid};
use burrow_gen::ruins::stamp_footprint;
use burrow_gen::{GenError, GenWorld, RuinFootprint, generate_chunk, run_full_generation};
use burrow_registry::Registry;
use burrow_world::{ChunkCoord, FieldCell, GenSettings, NoiseCtx, OverworldMap};

const VOXELS: &str = r#"
[[voxels]]
name = "empty"
transparent = true

[[voxels]]
name = "bedrock"

[[voxels]]
name = "stone"

[[voxels]]
name = "gravel"

[[voxels]]
name = "soil"

[[voxels]]
name = "sand"

[[voxels]]
name = "ice"

[[voxels]]
name = "ruin_brick"

[[voxels]]
name = "ruin_slab"
"#;

const ORE_VOXELS: &str = r#"
[[voxels]]
name = "glimmer_ore"
ore = { clusters = true, veins = true, rarity = 0.0, min_height = 1, max_height = 1000, cluster_size = 3.0, vein_length = 10.0, probability = 1.0, on_surface = true }
"#;

const BIOMES: &str = r#"
[[biomes]]
name = "grassland"
soil = "soil"
shore = "sand"
soil_depth = 3
layers = [
    { material = "stone", depth = 10 },
    { material = "gravel", depth = 20 },
]
ruin_wall = "ruin_brick"
ruin_floor = "ruin_slab"
grass = { decoration = "meadow_grass" }
"#;

const LIFE_BIOMES: &str = r#"
[[biomes]]
name = "grassland"
soil = "soil"
shore = "sand"
soil_depth = 3
layers = [{ material = "stone", depth = 30 }]
grass = { decoration = "meadow_grass" }
fauna = [{ entity = "deer", probability = 1.0, cap = 3, size_min = 0.8, size_max = 1.2 }]
flora = [{ entity = "bracken", probability = 1.0, size_mean = 1.0, size_var = 0.25, clump_size = 8.0, clump_threshold = -1.0 }]
"#;

const DECORATIONS: &str = r#"
[decorations]
meadow_grass = ["assets/decals/meadow_grass.png"]
"#;

fn registry() -> Registry {
    Registry::from_toml_strs(VOXELS, BIOMES, DECORATIONS).unwrap()
}

fn registry_with(extra_voxels: &str, biomes: &str) -> Registry {
    let voxels = format!("{VOXELS}\n{extra_voxels}");
    Registry::from_toml_strs(&voxels, biomes, DECORATIONS).unwrap()
}

/// Uniform-biome map whose height ramps west-to-east across the field.
fn ramp_map(settings: &GenSettings) -> OverworldMap {
    let cells = settings.world_size_x().div_ceil(8).max(2);
    let depth = settings.world_size_z().div_ceil(8).max(2);
    OverworldMap::from_fn(cells, depth, 8.0, |cx, _cz| FieldCell {
        biome: 0,
        height: cx as f32 / (cells - 1) as f32,
        temperature: 0.5,
        rainfall: 0.5,
    })
}

fn flat_map(settings: &GenSettings, height: f32) -> OverworldMap {
    let cells = settings.world_size_x().div_ceil(8).max(2);
    let depth = settings.world_size_z().div_ceil(8).max(2);
    OverworldMap::from_fn(cells, depth, 8.0, |_, _| FieldCell {
        biome: 0,
        height,
        temperature: 0.5,
        rainfall: 0.5,
    })
}

/// Seed 42, 2x1x2 chunks, no caves/ore/ruins: the calm-world scenario.
fn calm_settings() -> GenSettings {
    let mut s = GenSettings::default();
    s.seed = 42;
    s.chunks_x = 2;
    s.chunks_y = 1;
    s.chunks_z = 2;
    s.sea_level = 0.18;
    s.cave_levels = Vec::new();
    s.ruins_rate = -1.0;
    s
}

fn grids_equal(a: &VoxelGrid, b: &VoxelGrid) -> bool {
    for y in 0..a.height() as i32 {
        for z in 0..a.size_z() as i32 {
            for x in 0..a.size_x() as i32 {
                if a.get(x, y, z) != b.get(x, y, z) {
                    return false;
                }
            }
        }
    }
    true
}

#[test]
fn calm_grassland_world_matches_expectations() {
    let settings = calm_settings();
    let reg = registry();
    let map = ramp_map(&settings);
    let world = run_full_generation(&settings, &map, &reg, &mut |_| {}).unwrap();

    let bedrock = reg.voxels.id_by_name("bedrock").unwrap();
    let soil = reg.voxels.id_by_name("soil").unwrap();
    let ruin_wall = reg.voxels.id_by_name("ruin_brick").unwrap();
    let ruin_floor = reg.voxels.id_by_name("ruin_slab").unwrap();

    assert_eq!(world.stats.cave_cells_carved, 0);
    assert_eq!(world.stats.ruins_stamped, 0);
    assert_eq!(world.stats.ore_events, 0);
    assert!(world.stats.water_cells > 0, "the low side of the ramp floods");

    let mut soil_tops = 0;
    for z in 0..world.grid.size_z() as i32 {
        for x in 0..world.grid.size_x() as i32 {
            assert_eq!(world.grid.get(x, 0, z).unwrap().id, bedrock);
            let top = world.grid.top_solid_y(x, z).unwrap();
            let surf = world.grid.get(x, top, z).unwrap();
            assert_ne!(surf.id, ruin_wall);
            assert_ne!(surf.id, ruin_floor);
            if surf.id == soil {
                soil_tops += 1;
                assert_ne!(surf.grass, 0, "grassland soil carries its decal");
            }
        }
    }
    assert!(soil_tops > 0, "the high side of the ramp is dry soil");
}

#[test]
fn generation_is_deterministic() {
    // Every stochastic pass enabled, so the grid actually exercises the seed.
    let mut settings = calm_settings();
    settings.chunks_y = 2;
    settings.cave_levels = vec![8, 14, 20];
    settings.cave_size = 0.3;
    settings.ruins_rate = 0.4;
    let reg = registry_with(ORE_VOXELS, BIOMES);
    let map = ramp_map(&settings);
    let a = run_full_generation(&settings, &map, &reg, &mut |_| {}).unwrap();
    let b = run_full_generation(&settings, &map, &reg, &mut |_| {}).unwrap();
    assert!(grids_equal(&a.grid, &b.grid));
    assert_eq!(a.spawns, b.spawns);

    let mut other = settings.clone();
    other.seed = 43;
    let c = run_full_generation(&other, &map, &reg, &mut |_| {}).unwrap();
    assert!(!grids_equal(&a.grid, &c.grid), "a different seed must diverge");
}

#[test]
fn sunlight_is_an_exact_top_down_prefix() {
    let settings = calm_settings();
    let reg = registry();
    let map = ramp_map(&settings);
    let world = run_full_generation(&settings, &map, &reg, &mut |_| {}).unwrap();
    for z in 0..world.grid.size_z() as i32 {
        for x in 0..world.grid.size_x() as i32 {
            let mut below_first_opaque = false;
            for y in (0..world.grid.height() as i32).rev() {
                let v = world.grid.get(x, y, z).unwrap();
                if below_first_opaque {
                    assert!(!v.sunlit());
                } else {
                    assert!(v.sunlit() && v.explored());
                    if reg.voxels.is_opaque(v.id) {
                        below_first_opaque = true;
                    }
                }
            }
        }
    }
}

#[test]
fn strata_bands_are_monotonic_with_depth() {
    let settings = calm_settings();
    let reg = registry();
    let map = flat_map(&settings, 0.8);
    let world = run_full_generation(&settings, &map, &reg, &mut |_| {}).unwrap();
    let stone = reg.voxels.id_by_name("stone").unwrap();
    let gravel = reg.voxels.id_by_name("gravel").unwrap();
    let band = |id| match id {
        id if id == stone => Some(0),
        id if id == gravel => Some(1),
        _ => None,
    };
    for z in 0..world.grid.size_z() as i32 {
        for x in 0..world.grid.size_x() as i32 {
            let mut last = 0;
            // Walk downward through the strata; the band index may only grow.
            for y in (1..world.grid.height() as i32).rev() {
                if let Some(b) = band(world.grid.get(x, y, z).unwrap().id) {
                    assert!(b >= last, "column ({x},{z}) regressed at y={y}");
                    last = b;
                }
            }
        }
    }
}

#[test]
fn rarity_zero_ore_lands_75_to_100_events() {
    let mut settings = calm_settings();
    settings.chunks_y = 2;
    let reg = registry_with(ORE_VOXELS, BIOMES);
    let map = flat_map(&settings, 0.6);
    let world = run_full_generation(&settings, &map, &reg, &mut |_| {}).unwrap();
    assert!(
        (75..=100).contains(&world.stats.ore_events),
        "events = {}",
        world.stats.ore_events
    );
    let ore_id = reg.voxels.id_by_name("glimmer_ore").unwrap();
    let mut placed = 0u64;
    for y in 0..world.grid.height() as i32 {
        for z in 0..world.grid.size_z() as i32 {
            for x in 0..world.grid.size_x() as i32 {
                if world.grid.get(x, y, z).unwrap().id == ore_id {
                    placed += 1;
                }
            }
        }
    }
    assert!(placed > 0, "an abundant type must appear somewhere");
    // Overlapping deposits repaint cells, so the counter is an upper bound.
    assert!(placed <= world.stats.ore_voxels);
}

#[test]
fn forced_ruins_stamp_every_chunk() {
    let mut settings = calm_settings();
    settings.chunks_x = 4;
    settings.chunks_z = 4;
    settings.ruins_rate = 1.1; // |ridged| <= 1, so every chunk triggers
    let reg = registry();
    let map = flat_map(&settings, 0.6);
    let world = run_full_generation(&settings, &map, &reg, &mut |_| {}).unwrap();
    assert_eq!(world.stats.ruins_stamped, 16);
    let wall = reg.voxels.id_by_name("ruin_brick").unwrap();
    let mut walls = 0u64;
    for y in 0..world.grid.height() as i32 {
        for z in 0..world.grid.size_z() as i32 {
            for x in 0..world.grid.size_x() as i32 {
                if world.grid.get(x, y, z).unwrap().id == wall {
                    walls += 1;
                }
            }
        }
    }
    assert!(walls > 0);
}

#[test]
fn footprint_stamps_ring_floor_and_door_gap() {
    let settings = calm_settings();
    let reg = registry();
    let map = flat_map(&settings, 0.5);
    let mut gw = GenWorld::new(&settings, &map, &reg);

    let bedrock = reg.voxels.id_by_name("bedrock").unwrap();
    let stone = reg.voxels.id_by_name("stone").unwrap();
    for z in 0..gw.grid.size_z() as i32 {
        for x in 0..gw.grid.size_x() as i32 {
            gw.grid.set(x, 0, z, burrow_chunk::Voxel::solid(bedrock));
            for y in 1..=10 {
                gw.grid.set(x, y, z, burrow_chunk::Voxel::solid(stone));
            }
        }
    }

    // Find a low-decay window so no cell of the footprint is skipped and
    // every wall keeps at least 3 cells of height.
    let noise = NoiseCtx::new(&settings);
    let decay_at = |x: i32, z: i32| (noise.smooth2(x as f32 * 0.05, z as f32 * 0.05) + 1.0) * 0.5;
    let mut origin = None;
    'scan: for z0 in 0..(gw.grid.size_z() as i32 - 8) {
        for x0 in 0..(gw.grid.size_x() as i32 - 8) {
            if (0..8).all(|dz| (0..8).all(|dx| decay_at(x0 + dx, z0 + dz) <= 0.55)) {
                origin = Some((x0, z0));
                break 'scan;
            }
        }
    }
    let Some((x0, z0)) = origin else {
        // The smooth field left no calm window in this volume; nothing to assert.
        return;
    };

    let fp = RuinFootprint {
        x0,
        z0,
        width: 8,
        depth: 8,
        wall_height: 6,
        y_offset: 1,
        doors: [true, false, false, false],
    };
    let biome = reg.biomes.by_name("grassland").unwrap();
    assert!(stamp_footprint(&mut gw, &fp, biome));

    let wall = reg.voxels.id_by_name("ruin_brick").unwrap();
    let floor = reg.voxels.id_by_name("ruin_slab").unwrap();
    let base_y = 11; // flat ground at 10 plus the footprint's offset
    for dz in 0..8 {
        for dx in 0..8 {
            let (x, z) = (x0 + dx, z0 + dz);
            let edge = dx == 0 || dz == 0 || dx == 7 || dz == 7;
            let v = gw.grid.get(x, base_y, z).unwrap();
            if edge {
                assert_eq!(v.id, wall, "edge ring at ({dx},{dz})");
            } else {
                assert_eq!(v.id, floor, "interior at ({dx},{dz})");
            }
        }
    }
    // North wall mid-span: a 3-cell-tall unpainted gap.
    let door_x = x0 + 4;
    for y in (base_y + 1)..=(base_y + 3) {
        assert!(gw.grid.get(door_x, y, z0).unwrap().is_empty(), "door at y={y}");
    }
    // The neighboring wall cell still extrudes.
    assert_eq!(gw.grid.get(door_x - 1, base_y + 1, z0).unwrap().id, wall);
    assert_eq!(gw.stats.ruin_doors, 1);
}

#[test]
fn population_caps_bound_spawn_requests() {
    let mut settings = calm_settings();
    settings.chunks_x = 1;
    settings.chunks_z = 1;
    let reg = registry_with("", LIFE_BIOMES);
    let map = flat_map(&settings, 0.6);
    let world = run_full_generation(&settings, &map, &reg, &mut |_| {}).unwrap();
    let deer = world
        .spawns
        .iter()
        .filter(|s| s.entity == "deer")
        .count() as u64;
    assert_eq!(deer, 3, "probability 1.0 saturates the cap exactly");
    assert_eq!(world.stats.fauna_spawns, 3);
    assert!(world.stats.flora_spawns > 0);
    for s in world.spawns.iter().filter(|s| s.entity == "deer") {
        let scale = s.scale.unwrap();
        assert!((0.8..=1.2).contains(&scale));
    }
}

#[test]
fn carved_caves_never_touch_sunlit_cells() {
    let mut settings = calm_settings();
    settings.chunks_y = 2;
    settings.cave_levels = vec![8, 14, 20, 26, 34];
    settings.cave_size = 0.3;
    let reg = registry();
    let map = flat_map(&settings, 0.7);
    let world = run_full_generation(&settings, &map, &reg, &mut |_| {}).unwrap();
    assert!(world.stats.cave_cells_carved > 0, "lenient threshold carves");
    for y in 0..world.grid.height() as i32 {
        for z in 0..world.grid.size_z() as i32 {
            for x in 0..world.grid.size_x() as i32 {
                let v = world.grid.get(x, y, z).unwrap();
                // Interior voids are exactly the empty unlit cells.
                if !(v.is_empty() && !v.sunlit()) {
                    continue;
                }
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        for dx in -1..=1 {
                            if let Some(n) = world.grid.get(x + dx, y + dy, z + dz) {
                                assert!(
                                    !n.sunlit(),
                                    "carved cell ({x},{y},{z}) neighbors the sky"
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn liquid_implies_empty_and_bounded_height() {
    let mut settings = calm_settings();
    settings.chunks_y = 2;
    settings.cave_levels = vec![8, 14, 20];
    settings.cave_size = 0.3;
    let reg = registry();
    let map = ramp_map(&settings);
    let world = run_full_generation(&settings, &map, &reg, &mut |_| {}).unwrap();
    let bound = settings.sea_level_y().max(settings.lava_level_y);
    for y in 0..world.grid.height() as i32 {
        for z in 0..world.grid.size_z() as i32 {
            for x in 0..world.grid.size_x() as i32 {
                let v = world.grid.get(x, y, z).unwrap();
                if v.level > 0 {
                    assert!(v.is_empty(), "liquid in a solid voxel at ({x},{y},{z})");
                    assert_ne!(v.liquid, Liquid::None);
                    assert!(y <= bound, "liquid above both thresholds at y={y}");
                } else {
                    assert_eq!(v.liquid, Liquid::None);
                }
            }
        }
    }
}

#[test]
fn generate_chunk_is_reproducible() {
    let settings = calm_settings();
    let reg = registry();
    let map = ramp_map(&settings);
    let coord = ChunkCoord::new(1, 0, 1);
    let a = generate_chunk(coord, &settings, &map, &reg).unwrap();
    let b = generate_chunk(coord, &settings, &map, &reg).unwrap();
    assert_eq!(a.voxels, b.voxels);
    let bedrock = reg.voxels.id_by_name("bedrock").unwrap();
    assert_eq!(a.get_local(0, 0, 0).id, bedrock);
}

#[test]
fn configuration_errors_fail_before_any_work() {
    let reg = registry();
    let mut bad = calm_settings();
    bad.chunks_x = 0;
    let map = ramp_map(&calm_settings());
    assert!(matches!(
        run_full_generation(&bad, &map, &reg, &mut |_| {}),
        Err(GenError::Settings(_))
    ));

    let settings = calm_settings();
    let mut rogue = flat_map(&settings, 0.5);
    rogue.set_cell(
        0,
        0,
        FieldCell {
            biome: 99,
            height: 0.5,
            temperature: 0.5,
            rainfall: 0.5,
        },
    );
    assert!(matches!(
        run_full_generation(&settings, &rogue, &reg, &mut |_| {}),
        Err(GenError::UnknownBiome(99, _))
    ));

    let no_bedrock = Registry::from_toml_strs(
        r#"
[[voxels]]
name = "empty"
transparent = true

[[voxels]]
name = "soil"
"#,
        r#"
[[biomes]]
name = "bare"
soil = "soil"
"#,
        DECORATIONS,
    )
    .unwrap();
    let map = flat_map(&settings, 0.5);
    assert!(matches!(
        run_full_generation(&settings, &map, &no_bedrock, &mut |_| {}),
        Err(GenError::MissingVoxelType("bedrock"))
    ));
}

#[test]
fn progress_callback_sees_every_stage_label() {
    let settings = calm_settings();
    let reg = registry();
    let map = flat_map(&settings, 0.5);
    let mut labels = Vec::new();
    run_full_generation(&settings, &map, &reg, &mut |l| labels.push(l.to_string())).unwrap();
    assert_eq!(labels.len(), burrow_gen::stages().len());
    assert_eq!(labels.first().map(String::as_str), Some("painting terrain"));
    assert_eq!(
        labels.last().map(String::as_str),
        Some("seeding surface life")
    );
}
