use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    models: HashMap<String, String>,
    slices: HashMap<String, SliceEntry>,
}

/// A slice fixture is either a bare config path or a config plus the model it mounts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SliceEntry {
    Path(String),
    WithModel { config: String, model: String },
}

impl SliceEntry {
    fn config(&self) -> &str {
        match self {
            SliceEntry::Path(path) => path,
            SliceEntry::WithModel { config, .. } => config,
        }
    }

    fn model(&self) -> Option<&str> {
        match self {
            SliceEntry::Path(_) => None,
            SliceEntry::WithModel { model, .. } => Some(model),
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Model descriptors (`ModelDesc` JSON).
pub mod models {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.models.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.models, "model", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.models, "model", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.models, "model", name)?;
        Ok(resolve_path(rel))
    }
}

/// Slice configurations (hero, carousel, scroll experience).
pub mod slices {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.slices.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.slices, "slice", name)?;
        read_to_string(entry.config())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.slices, "slice", name)?;
        super::load_json(entry.config())
    }

    /// JSON of the model paired with this slice, if any.
    pub fn model_json(name: &str) -> Result<Option<String>> {
        let entry = lookup(&MANIFEST.slices, "slice", name)?;
        match entry.model() {
            Some(model) => super::models::json(model).map(Some),
            None => Ok(None),
        }
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.slices, "slice", name)?;
        Ok(resolve_path(entry.config()))
    }
}
