use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::biome::BiomeRegistry;
use super::config::{BiomesConfig, VoxelsConfig};
use super::decoration::DecorationCatalog;
use super::types::{EMPTY, OreSpawn, VoxelId, VoxelType};

#[derive(Default, Clone, Debug)]
pub struct VoxelTypeRegistry {
    pub voxels: Vec<VoxelType>,
    pub by_name: HashMap<String, VoxelId>,
}

impl VoxelTypeRegistry {
    #[inline]
    pub fn get(&self, id: VoxelId) -> Option<&VoxelType> {
        self.voxels.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<VoxelId> {
        self.by_name.get(name).copied()
    }

    /// Opaque = not air and not flagged transparent. Unknown ids read as air.
    #[inline]
    pub fn is_opaque(&self, id: VoxelId) -> bool {
        id != EMPTY && self.get(id).map(|t| !t.transparent).unwrap_or(false)
    }

    pub fn from_config(cfg: VoxelsConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = VoxelTypeRegistry {
            voxels: Vec::new(),
            by_name: HashMap::new(),
        };
        for def in cfg.voxels.into_iter() {
            let id = def.id.unwrap_or(reg.voxels.len() as u16);
            if id as usize != reg.voxels.len() {
                return Err(format!(
                    "voxel type '{}' declares id {} but slot {} is next",
                    def.name,
                    id,
                    reg.voxels.len()
                )
                .into());
            }
            let ore = def.ore.map(|o| OreSpawn {
                clusters: o.clusters,
                veins: o.veins,
                rarity: o.rarity.clamp(0.0, 1.0),
                min_height: o.min_height,
                max_height: o.max_height,
                cluster_size: o.cluster_size,
                vein_length: o.vein_length,
                probability: o.probability.clamp(0.0, 1.0),
                on_surface: o.on_surface,
            });
            let ty = VoxelType {
                id,
                name: def.name,
                transparent: def.transparent.unwrap_or(false),
                flammable: def.flammable.unwrap_or(false),
                ore,
            };
            if reg.by_name.insert(ty.name.clone(), id).is_some() {
                return Err(format!("duplicate voxel type name '{}'", ty.name).into());
            }
            reg.voxels.push(ty);
        }
        match reg.get(EMPTY) {
            Some(t) if t.transparent => {}
            _ => return Err("voxel table must start with a transparent empty type at id 0".into()),
        }
        Ok(reg)
    }
}

/// Bundle of every lookup table the generator consumes. Built once before
/// generation starts and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Registry {
    pub voxels: VoxelTypeRegistry,
    pub biomes: BiomeRegistry,
    pub decorations: DecorationCatalog,
}

impl Registry {
    pub fn from_toml_strs(
        voxels_toml: &str,
        biomes_toml: &str,
        decorations_toml: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let voxels_cfg: VoxelsConfig = toml::from_str(voxels_toml)?;
        let biomes_cfg: BiomesConfig = toml::from_str(biomes_toml)?;
        let voxels = VoxelTypeRegistry::from_config(voxels_cfg)?;
        let decorations = DecorationCatalog::from_toml_str(decorations_toml)?;
        let biomes = BiomeRegistry::from_config(biomes_cfg, &voxels, &decorations)?;
        Ok(Registry {
            voxels,
            biomes,
            decorations,
        })
    }

    pub fn load_from_paths(
        voxels_path: impl AsRef<Path>,
        biomes_path: impl AsRef<Path>,
        decorations_path: impl AsRef<Path>,
    ) -> Result<Self, Box<dyn Error>> {
        let voxels_toml = fs::read_to_string(voxels_path)?;
        let biomes_toml = fs::read_to_string(biomes_path)?;
        let decorations_toml = fs::read_to_string(decorations_path)?;
        Self::from_toml_strs(&voxels_toml, &biomes_toml, &decorations_toml)
    }
}
