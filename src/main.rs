use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use fastnoise_lite::{FastNoiseLite, NoiseType};

use burrow_chunk::Liquid;
use burrow_gen::{GeneratedWorld, run_full_generation};
use burrow_registry::{BiomeId, Registry};
use burrow_world::{FieldCell, GenSettings, OverworldMap, load_settings_from_path};

#[derive(Parser, Debug)]
#[command(name = "burrow", about = "Generate a voxel colony world from a seed")]
struct Args {
    /// World seed (overrides the settings file)
    #[arg(long)]
    seed: Option<i32>,
    /// Horizontal extent in chunks (overrides the settings file)
    #[arg(long)]
    chunks: Option<usize>,
    /// Worldgen settings TOML
    #[arg(long, default_value = "assets/worldgen.toml")]
    settings: PathBuf,
    /// Voxel type table
    #[arg(long, default_value = "assets/voxels.toml")]
    voxels: PathBuf,
    /// Biome table
    #[arg(long, default_value = "assets/biomes.toml")]
    biomes: PathBuf,
    /// Decoration catalog
    #[arg(long, default_value = "assets/decorations.toml")]
    decorations: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = load_settings_from_path(&args.settings)?;
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(chunks) = args.chunks {
        settings.chunks_x = chunks;
        settings.chunks_z = chunks;
    }
    settings.validate()?;
    let reg = Registry::load_from_paths(&args.voxels, &args.biomes, &args.decorations)?;
    let fields = demo_overworld(&settings, &reg);

    log::info!(
        "generating {}x{}x{} chunks ({}x{}x{} voxels) with seed {}",
        settings.chunks_x,
        settings.chunks_y,
        settings.chunks_z,
        settings.world_size_x(),
        settings.world_height(),
        settings.world_size_z(),
        settings.seed
    );
    let t0 = Instant::now();
    let world = run_full_generation(&settings, &fields, &reg, &mut |stage| {
        log::info!("stage: {stage}");
    })?;
    log::info!("world ready in {:.1?}", t0.elapsed());
    log_summary(&world, &reg);
    Ok(())
}

/// Stand-in for the overworld map generator (an external collaborator):
/// fill the biome/height/temperature/rainfall fields from 2D noise so the
/// binary has something to chew on.
fn demo_overworld(settings: &GenSettings, reg: &Registry) -> OverworldMap {
    let cell = settings.field_cell_size;
    let width = (settings.world_size_x() as f32 / cell).ceil() as usize + 1;
    let depth = (settings.world_size_z() as f32 / cell).ceil() as usize + 1;

    let mut height = FastNoiseLite::with_seed(settings.seed ^ 0x0F1E_17D5);
    height.set_noise_type(Some(NoiseType::OpenSimplex2));
    height.set_frequency(Some(0.015));
    let mut climate = FastNoiseLite::with_seed(settings.seed ^ 0x007E_A231);
    climate.set_noise_type(Some(NoiseType::OpenSimplex2));
    climate.set_frequency(Some(0.004));

    // Interior biomes exist only for cave seeding; never paint them on the map.
    let surface: Vec<BiomeId> = reg
        .biomes
        .biomes
        .iter()
        .filter(|b| b.name != "cave" && b.name != "hell")
        .map(|b| b.id)
        .collect();

    OverworldMap::from_fn(width, depth, cell, |cx, cz| {
        let (x, z) = (cx as f32 * cell, cz as f32 * cell);
        let h = ((height.get_noise_2d(x, z) + 1.0) * 0.5).clamp(0.0, 1.0);
        let t = ((climate.get_noise_2d(x, z) + 1.0) * 0.5).clamp(0.0, 1.0);
        let r = ((climate.get_noise_2d(x + 517.0, z - 211.0) + 1.0) * 0.5).clamp(0.0, 1.0);
        let biome = if surface.is_empty() {
            0
        } else {
            let idx = ((t * surface.len() as f32) as usize).min(surface.len() - 1);
            surface[idx]
        };
        FieldCell {
            biome,
            height: h,
            temperature: t,
            rainfall: r,
        }
    })
}

fn log_summary(world: &GeneratedWorld, reg: &Registry) {
    let mut counts = vec![0u64; reg.voxels.voxels.len()];
    let (mut water, mut lava) = (0u64, 0u64);
    for chunk in world.grid.chunks() {
        for v in &chunk.voxels {
            if let Some(slot) = counts.get_mut(v.id as usize) {
                *slot += 1;
            }
            match v.liquid {
                Liquid::Water => water += 1,
                Liquid::Lava => lava += 1,
                Liquid::None => {}
            }
        }
    }
    let mut ranked: Vec<(u64, &str)> = counts
        .iter()
        .zip(&reg.voxels.voxels)
        .filter(|(c, t)| **c > 0 && t.id != burrow_registry::EMPTY)
        .map(|(c, t)| (*c, t.name.as_str()))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    for (count, name) in ranked.iter().take(8) {
        log::info!("  {name}: {count} voxels");
    }
    log::info!("  water: {water} cells, lava: {lava} cells");
    log::info!(
        "  {} entity spawn requests queued for the simulation",
        world.spawns.len()
    );
}
