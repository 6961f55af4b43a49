use std::collections::HashMap;
use std::error::Error;

use super::config::{BiomeDef, BiomesConfig};
use super::decoration::DecorationCatalog;
use super::registry::VoxelTypeRegistry;
use super::types::{DecorId, VoxelId};

pub type BiomeId = u16;

#[derive(Clone, Debug)]
pub struct StratumLayer {
    pub material: VoxelId,
    pub depth: i32,
}

#[derive(Clone, Debug)]
pub struct GrassDecal {
    pub decoration: DecorId,
    pub clumped: bool,
    pub clump_size: f32,
    pub clump_threshold: f32,
}

#[derive(Clone, Debug)]
pub struct FaunaSpawn {
    pub entity: String,
    pub probability: f32,
    pub cap: u32,
    pub size_min: f32,
    pub size_max: f32,
}

#[derive(Clone, Debug)]
pub struct FloraSpawn {
    pub entity: String,
    pub probability: f32,
    pub size_mean: f32,
    pub size_var: f32,
    pub clump_size: f32,
    pub clump_threshold: f32,
}

#[derive(Clone, Debug)]
pub struct Biome {
    pub id: BiomeId,
    pub name: String,
    pub soil: VoxelId,
    pub shore: VoxelId,
    pub soil_depth: i32,
    /// Subsurface strata from the stone line downward; depths are per-layer
    /// and accumulate. Columns deeper than the table reuse the last layer.
    pub layers: Vec<StratumLayer>,
    pub ruin_wall: VoxelId,
    pub ruin_floor: VoxelId,
    pub grass: Option<GrassDecal>,
    pub water_is_lava: bool,
    pub surface_ice: bool,
    pub fauna: Vec<FaunaSpawn>,
    pub flora: Vec<FloraSpawn>,
}

#[derive(Default, Clone, Debug)]
pub struct BiomeRegistry {
    pub biomes: Vec<Biome>,
    pub by_name: HashMap<String, BiomeId>,
}

impl BiomeRegistry {
    #[inline]
    pub fn get(&self, id: BiomeId) -> Option<&Biome> {
        self.biomes.get(id as usize)
    }

    pub fn by_name(&self, name: &str) -> Option<&Biome> {
        self.by_name.get(name).and_then(|id| self.get(*id))
    }

    pub fn from_config(
        cfg: BiomesConfig,
        voxels: &VoxelTypeRegistry,
        decorations: &DecorationCatalog,
    ) -> Result<Self, Box<dyn Error>> {
        let mut reg = BiomeRegistry {
            biomes: Vec::new(),
            by_name: HashMap::new(),
        };
        for def in cfg.biomes.into_iter() {
            let id = reg.biomes.len() as BiomeId;
            let biome = compile_biome(id, def, voxels, decorations)?;
            if reg.by_name.insert(biome.name.clone(), id).is_some() {
                return Err(format!("duplicate biome name '{}'", biome.name).into());
            }
            reg.biomes.push(biome);
        }
        if reg.biomes.is_empty() {
            return Err("biome table is empty".into());
        }
        Ok(reg)
    }
}

fn compile_biome(
    id: BiomeId,
    def: BiomeDef,
    voxels: &VoxelTypeRegistry,
    decorations: &DecorationCatalog,
) -> Result<Biome, Box<dyn Error>> {
    let resolve = |name: &str| -> Result<VoxelId, Box<dyn Error>> {
        voxels
            .id_by_name(name)
            .ok_or_else(|| format!("biome '{}' references unknown voxel '{}'", def.name, name).into())
    };
    let soil = resolve(&def.soil)?;
    let shore = match def.shore.as_deref() {
        Some(name) => resolve(name)?,
        None => soil,
    };
    let ruin_wall = match def.ruin_wall.as_deref() {
        Some(name) => resolve(name)?,
        None => soil,
    };
    let ruin_floor = match def.ruin_floor.as_deref() {
        Some(name) => resolve(name)?,
        None => ruin_wall,
    };
    let mut layers = Vec::with_capacity(def.layers.len());
    for layer in &def.layers {
        if layer.depth <= 0 {
            return Err(format!(
                "biome '{}' stratum '{}' has non-positive depth",
                def.name, layer.material
            )
            .into());
        }
        layers.push(StratumLayer {
            material: resolve(&layer.material)?,
            depth: layer.depth,
        });
    }
    let grass = match def.grass {
        Some(g) => {
            let decoration = decorations.get_id(&g.decoration).ok_or_else(|| {
                format!(
                    "biome '{}' references unknown decoration '{}'",
                    def.name, g.decoration
                )
            })?;
            Some(GrassDecal {
                decoration,
                clumped: g.clumped,
                clump_size: g.clump_size.max(0.0001),
                clump_threshold: g.clump_threshold,
            })
        }
        None => None,
    };
    Ok(Biome {
        id,
        name: def.name,
        soil,
        shore,
        soil_depth: def.soil_depth.max(0),
        layers,
        ruin_wall,
        ruin_floor,
        grass,
        water_is_lava: def.water_is_lava,
        surface_ice: def.surface_ice,
        fauna: def
            .fauna
            .into_iter()
            .map(|f| FaunaSpawn {
                entity: f.entity,
                probability: f.probability.clamp(0.0, 1.0),
                cap: f.cap,
                size_min: f.size_min,
                size_max: f.size_max.max(f.size_min),
            })
            .collect(),
        flora: def
            .flora
            .into_iter()
            .map(|f| FloraSpawn {
                entity: f.entity,
                probability: f.probability.clamp(0.0, 1.0),
                size_mean: f.size_mean,
                size_var: f.size_var.abs(),
                clump_size: f.clump_size.max(0.0001),
                clump_threshold: f.clump_threshold,
            })
            .collect(),
    })
}
