use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize)]
pub struct VoxelsConfig {
    pub voxels: Vec<VoxelDef>,
}

#[derive(Deserialize)]
pub struct VoxelDef {
    pub name: String,
    pub id: Option<u16>,
    pub transparent: Option<bool>,
    pub flammable: Option<bool>,
    pub ore: Option<OreDef>,
}

#[derive(Deserialize)]
pub struct OreDef {
    #[serde(default)]
    pub clusters: bool,
    #[serde(default)]
    pub veins: bool,
    #[serde(default)]
    pub rarity: f32,
    #[serde(default)]
    pub min_height: i32,
    #[serde(default = "d_max_height")]
    pub max_height: i32,
    #[serde(default = "d_cluster_size")]
    pub cluster_size: f32,
    #[serde(default = "d_vein_length")]
    pub vein_length: f32,
    #[serde(default = "d_probability")]
    pub probability: f32,
    #[serde(default)]
    pub on_surface: bool,
}

fn d_max_height() -> i32 {
    i32::MAX
}
fn d_cluster_size() -> f32 {
    4.0
}
fn d_vein_length() -> f32 {
    12.0
}
fn d_probability() -> f32 {
    0.6
}

#[derive(Deserialize)]
pub struct BiomesConfig {
    pub biomes: Vec<BiomeDef>,
}

#[derive(Deserialize)]
pub struct BiomeDef {
    pub name: String,
    pub soil: String,
    #[serde(default)]
    pub shore: Option<String>,
    #[serde(default = "d_soil_depth")]
    pub soil_depth: i32,
    #[serde(default)]
    pub layers: Vec<LayerDef>,
    #[serde(default)]
    pub ruin_wall: Option<String>,
    #[serde(default)]
    pub ruin_floor: Option<String>,
    #[serde(default)]
    pub grass: Option<GrassDef>,
    #[serde(default)]
    pub water_is_lava: bool,
    #[serde(default)]
    pub surface_ice: bool,
    #[serde(default)]
    pub fauna: Vec<FaunaDef>,
    #[serde(default)]
    pub flora: Vec<FloraDef>,
}

fn d_soil_depth() -> i32 {
    3
}

#[derive(Deserialize)]
pub struct LayerDef {
    pub material: String,
    pub depth: i32,
}

#[derive(Deserialize)]
pub struct GrassDef {
    pub decoration: String,
    #[serde(default)]
    pub clumped: bool,
    #[serde(default = "d_clump_size")]
    pub clump_size: f32,
    #[serde(default)]
    pub clump_threshold: f32,
}

fn d_clump_size() -> f32 {
    8.0
}

#[derive(Deserialize)]
pub struct FaunaDef {
    pub entity: String,
    pub probability: f32,
    #[serde(default = "d_cap")]
    pub cap: u32,
    #[serde(default = "d_size_min")]
    pub size_min: f32,
    #[serde(default = "d_size_max")]
    pub size_max: f32,
}

fn d_cap() -> u32 {
    8
}
fn d_size_min() -> f32 {
    1.0
}
fn d_size_max() -> f32 {
    1.0
}

#[derive(Deserialize)]
pub struct FloraDef {
    pub entity: String,
    pub probability: f32,
    #[serde(default = "d_size_mean")]
    pub size_mean: f32,
    #[serde(default)]
    pub size_var: f32,
    #[serde(default = "d_clump_size")]
    pub clump_size: f32,
    #[serde(default)]
    pub clump_threshold: f32,
}

fn d_size_mean() -> f32 {
    1.0
}

#[derive(Deserialize)]
pub struct DecorationsConfig {
    pub decorations: HashMap<String, DecorationEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum DecorationEntry {
    // Simple: decoration = ["assets/decals/foo.png", ...]
    Sprites(Vec<String>),
    // Detailed: decoration = { sprites = ["..."], render_tag = "billboard" }
    Detail {
        sprites: Vec<String>,
        render_tag: Option<String>,
    },
}
