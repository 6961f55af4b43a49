use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use super::config::{DecorationEntry, DecorationsConfig};
use super::types::DecorId;

#[derive(Clone, Debug)]
pub struct Decoration {
    #[allow(dead_code)]
    pub id: DecorId,
    pub key: String,
    pub sprite_candidates: Vec<PathBuf>,
    pub render_tag: Option<String>,
}

#[derive(Clone, Debug)]
pub struct DecorationCatalog {
    pub decorations: Vec<Decoration>,
    pub by_key: HashMap<String, DecorId>,
}

impl DecorationCatalog {
    pub fn new() -> Self {
        // Id 0 is the "no decoration" sentinel.
        Self {
            decorations: vec![Decoration {
                id: 0,
                key: String::new(),
                sprite_candidates: Vec::new(),
                render_tag: None,
            }],
            by_key: HashMap::new(),
        }
    }

    pub fn get_id(&self, key: &str) -> Option<DecorId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: DecorId) -> Option<&Decoration> {
        self.decorations.get(id as usize)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: DecorationsConfig = toml::from_str(toml_str)?;
        let mut catalog = DecorationCatalog::new();
        let mut entries: Vec<(String, DecorationEntry)> = cfg.decorations.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so DecorId assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let (sprites, render_tag) = match entry {
                DecorationEntry::Sprites(v) => (v, None),
                DecorationEntry::Detail {
                    sprites,
                    render_tag,
                } => (sprites, render_tag),
            };
            let id = catalog.decorations.len() as DecorId;
            catalog.by_key.insert(key.clone(), id);
            catalog.decorations.push(Decoration {
                id,
                key,
                sprite_candidates: sprites.into_iter().map(PathBuf::from).collect(),
                render_tag,
            });
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
