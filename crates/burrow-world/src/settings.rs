use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Chunks are cubes of this many voxels per axis.
pub const CHUNK_SIZE: usize = 32;

#[derive(Clone, Debug, Deserialize)]
pub struct GenConfig {
    #[serde(default = "d_seed")]
    pub seed: i32,
    #[serde(default)]
    pub volume: Volume,
    #[serde(default)]
    pub water: WaterCfg,
    #[serde(default)]
    pub caves: CavesCfg,
    #[serde(default)]
    pub ruins: RuinsCfg,
    #[serde(default)]
    pub life: LifeCfg,
    #[serde(default)]
    pub fields: FieldsCfg,
    #[serde(default)]
    pub smooth_noise: NoiseCfg,
    #[serde(default = "d_ridged_noise")]
    pub ridged_noise: NoiseCfg,
}

fn d_seed() -> i32 {
    1337
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            seed: d_seed(),
            volume: Volume::default(),
            water: WaterCfg::default(),
            caves: CavesCfg::default(),
            ruins: RuinsCfg::default(),
            life: LifeCfg::default(),
            fields: FieldsCfg::default(),
            smooth_noise: NoiseCfg::default(),
            ridged_noise: d_ridged_noise(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Volume {
    #[serde(default = "d_chunks_x")]
    pub chunks_x: usize,
    #[serde(default = "d_chunks_y")]
    pub chunks_y: usize,
    #[serde(default = "d_chunks_x")]
    pub chunks_z: usize,
}
fn d_chunks_x() -> usize {
    4
}
fn d_chunks_y() -> usize {
    2
}
impl Default for Volume {
    fn default() -> Self {
        Self {
            chunks_x: d_chunks_x(),
            chunks_y: d_chunks_y(),
            chunks_z: d_chunks_x(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WaterCfg {
    #[serde(default = "d_sea_level")]
    pub sea_level: f32,
    #[serde(default = "d_lava_level")]
    pub lava_level_y: i32,
}
fn d_sea_level() -> f32 {
    0.18
}
fn d_lava_level() -> i32 {
    6
}
impl Default for WaterCfg {
    fn default() -> Self {
        Self {
            sea_level: d_sea_level(),
            lava_level_y: d_lava_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CavesCfg {
    #[serde(default = "d_cave_levels")]
    pub levels: Vec<i32>,
    #[serde(default = "d_cave_frequencies")]
    pub frequencies: Vec<f32>,
    #[serde(default = "d_cave_noise_scale")]
    pub noise_scale: f32,
    #[serde(default = "d_cave_size")]
    pub size: f32,
    #[serde(default = "d_hell_level")]
    pub hell_level_y: i32,
}
fn d_cave_levels() -> Vec<i32> {
    vec![8, 14, 20, 26, 34]
}
fn d_cave_frequencies() -> Vec<f32> {
    vec![1.0, 0.85, 0.7]
}
fn d_cave_noise_scale() -> f32 {
    0.08
}
fn d_cave_size() -> f32 {
    0.65
}
fn d_hell_level() -> i32 {
    12
}
impl Default for CavesCfg {
    fn default() -> Self {
        Self {
            levels: d_cave_levels(),
            frequencies: d_cave_frequencies(),
            noise_scale: d_cave_noise_scale(),
            size: d_cave_size(),
            hell_level_y: d_hell_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuinsCfg {
    #[serde(default = "d_ruins_rate")]
    pub rate: f32,
}
fn d_ruins_rate() -> f32 {
    0.05
}
impl Default for RuinsCfg {
    fn default() -> Self {
        Self {
            rate: d_ruins_rate(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LifeCfg {
    #[serde(default = "d_life_max_y")]
    pub max_y: i32,
}
fn d_life_max_y() -> i32 {
    60
}
impl Default for LifeCfg {
    fn default() -> Self {
        Self {
            max_y: d_life_max_y(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct FieldsCfg {
    #[serde(default = "d_cell_size")]
    pub cell_size: f32,
}
fn d_cell_size() -> f32 {
    8.0
}
impl Default for FieldsCfg {
    fn default() -> Self {
        Self {
            cell_size: d_cell_size(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NoiseCfg {
    #[serde(default = "d_noise_freq")]
    pub frequency: f32,
    #[serde(default = "d_noise_octaves")]
    pub octaves: i32,
}
fn d_noise_freq() -> f32 {
    0.02
}
fn d_noise_octaves() -> i32 {
    4
}
fn d_ridged_noise() -> NoiseCfg {
    NoiseCfg {
        frequency: 0.05,
        octaves: 3,
    }
}
impl Default for NoiseCfg {
    fn default() -> Self {
        Self {
            frequency: d_noise_freq(),
            octaves: d_noise_octaves(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("world extent must be positive on every axis (got {0}x{1}x{2} chunks)")]
    EmptyVolume(usize, usize, usize),
    #[error("sea level must lie within 0..=1 (got {0})")]
    SeaLevel(f32),
    #[error("cave levels configured but the cave frequency table is empty")]
    NoCaveFrequencies,
    #[error("cave band at y={0} lies outside the world height {1}")]
    CaveBandOutOfRange(i32, i32),
    #[error("cave size threshold must be positive (got {0})")]
    CaveSize(f32),
    #[error("overworld field cell size must be positive (got {0})")]
    FieldCellSize(f32),
}

// Flattened params used in tight loops (snapshot of config).
#[derive(Clone, Debug)]
pub struct GenSettings {
    pub seed: i32,
    pub chunks_x: usize,
    pub chunks_y: usize,
    pub chunks_z: usize,
    pub sea_level: f32,
    pub lava_level_y: i32,
    pub cave_levels: Vec<i32>,
    pub cave_frequencies: Vec<f32>,
    pub cave_noise_scale: f32,
    pub cave_size: f32,
    pub hell_level_y: i32,
    pub ruins_rate: f32,
    pub life_max_y: i32,
    pub field_cell_size: f32,
    pub smooth_frequency: f32,
    pub smooth_octaves: i32,
    pub ridged_frequency: f32,
    pub ridged_octaves: i32,
}

impl GenSettings {
    pub fn from_config(cfg: &GenConfig) -> Self {
        Self {
            seed: cfg.seed,
            chunks_x: cfg.volume.chunks_x,
            chunks_y: cfg.volume.chunks_y,
            chunks_z: cfg.volume.chunks_z,
            sea_level: cfg.water.sea_level,
            lava_level_y: cfg.water.lava_level_y,
            cave_levels: cfg.caves.levels.clone(),
            cave_frequencies: cfg.caves.frequencies.clone(),
            cave_noise_scale: cfg.caves.noise_scale,
            cave_size: cfg.caves.size,
            hell_level_y: cfg.caves.hell_level_y,
            ruins_rate: cfg.ruins.rate,
            life_max_y: cfg.life.max_y,
            field_cell_size: cfg.fields.cell_size,
            smooth_frequency: cfg.smooth_noise.frequency,
            smooth_octaves: cfg.smooth_noise.octaves,
            ridged_frequency: cfg.ridged_noise.frequency,
            ridged_octaves: cfg.ridged_noise.octaves,
        }
    }

    pub fn default() -> Self {
        Self::from_config(&GenConfig::default())
    }

    #[inline]
    pub fn world_size_x(&self) -> usize {
        self.chunks_x * CHUNK_SIZE
    }

    #[inline]
    pub fn world_size_z(&self) -> usize {
        self.chunks_z * CHUNK_SIZE
    }

    #[inline]
    pub fn world_height(&self) -> usize {
        self.chunks_y * CHUNK_SIZE
    }

    /// Sea level in voxel rows. Heights normalize against `world_height - 2`
    /// so the bottom bedrock row and the topmost row stay out of play.
    #[inline]
    pub fn sea_level_y(&self) -> i32 {
        (self.sea_level * (self.world_height() as f32 - 2.0)).round() as i32
    }

    /// Fatal configuration check; generation must not start when this fails.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.chunks_x == 0 || self.chunks_y == 0 || self.chunks_z == 0 {
            return Err(SettingsError::EmptyVolume(
                self.chunks_x,
                self.chunks_y,
                self.chunks_z,
            ));
        }
        if !(0.0..=1.0).contains(&self.sea_level) {
            return Err(SettingsError::SeaLevel(self.sea_level));
        }
        if !self.cave_levels.is_empty() && self.cave_frequencies.is_empty() {
            return Err(SettingsError::NoCaveFrequencies);
        }
        let world_height = self.world_height() as i32;
        for &band in &self.cave_levels {
            if band <= 0 || band >= world_height {
                return Err(SettingsError::CaveBandOutOfRange(band, world_height));
            }
        }
        if self.cave_size <= 0.0 {
            return Err(SettingsError::CaveSize(self.cave_size));
        }
        if self.field_cell_size <= 0.0 {
            return Err(SettingsError::FieldCellSize(self.field_cell_size));
        }
        Ok(())
    }
}

pub fn load_settings_from_path(path: &Path) -> Result<GenSettings, Box<dyn std::error::Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: GenConfig = toml::from_str(&s)?;
    let settings = GenSettings::from_config(&cfg);
    settings.validate()?;
    Ok(settings)
}
