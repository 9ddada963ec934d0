//! # Stage Files
//!
//! A stage is described by one TOML file, loaded and validated once at
//! startup:
//!
//! ```toml
//! [region]
//! min = [-10.0, -10.0]
//! max = [10.0, 10.0]
//!
//! [[templates]]
//! kind = "Hamon"
//! prototype = "bullets/hamon"
//! max_count = 3
//!
//! [[locations]]
//! name = "top"
//! position = [0.0, 8.0]
//!
//! [[spawners]]
//! name = "opening"
//! looping = false
//!
//! [[spawners.entries]]
//! kind = "Hamon"
//! cooldown_secs = 1.0
//! location_name = "top"
//! ```
//!
//! Every entry needs exactly one target: `position`, `location` (index) or
//! `location_name`. Names are resolved to indices here; a raw index is kept
//! as written and checked by the pool when the entry fires.

use std::path::Path;

use barrage_core::{
    ConfigError, ConfigResult, InstanceTemplate, SpawnLocations, TemplateRegistry,
};
use barrage_shared::{BulletKind, Vec2};
use barrage_spawner::{cooldown_from_secs, SpawnEntry, SpawnTarget, SpawnerConfig};
use serde::Deserialize;

use crate::region::Region;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StageFile {
    #[serde(default)]
    region: Option<RegionSection>,
    #[serde(default)]
    templates: Vec<TemplateSection>,
    #[serde(default)]
    locations: Vec<LocationSection>,
    #[serde(default)]
    spawners: Vec<SpawnerSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionSection {
    min: Vec2,
    max: Vec2,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateSection {
    kind: BulletKind,
    #[serde(default)]
    prototype: Option<String>,
    max_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocationSection {
    name: String,
    position: Vec2,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpawnerSection {
    name: String,
    #[serde(default)]
    looping: bool,
    #[serde(default)]
    entries: Vec<EntrySection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntrySection {
    kind: BulletKind,
    cooldown_secs: f64,
    #[serde(default)]
    position: Option<Vec2>,
    #[serde(default)]
    location: Option<usize>,
    #[serde(default)]
    location_name: Option<String>,
}

/// A validated stage.
#[derive(Clone, Debug)]
pub struct StageConfig {
    /// Templates to pre-warm.
    pub registry: TemplateRegistry,
    /// Named spawn points.
    pub locations: SpawnLocations,
    /// Spawn sequences, in file order.
    pub spawners: Vec<SpawnerConfig>,
    /// Play area. Bullets outside it are released.
    pub region: Option<Region>,
}

impl StageConfig {
    /// Parses and validates a stage.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys, otherwise
    /// the first validation failure.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let file: StageFile =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_file_sections(file)
    }

    /// Reads and validates a stage file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    fn from_file_sections(file: StageFile) -> ConfigResult<Self> {
        let mut registry = TemplateRegistry::new();
        for template in file.templates {
            let prototype = template
                .prototype
                .ok_or(ConfigError::MissingPrototype(template.kind))?;
            registry.register(InstanceTemplate::new(
                template.kind,
                prototype,
                template.max_count,
            ))?;
        }

        let locations: SpawnLocations = file
            .locations
            .into_iter()
            .map(|l| (l.name, l.position))
            .collect();

        let spawners = file
            .spawners
            .into_iter()
            .map(|s| build_spawner(s, &registry, &locations))
            .collect::<ConfigResult<Vec<_>>>()?;

        let region = file.region.map(|r| Region::new(r.min, r.max));

        tracing::debug!(
            templates = registry.len(),
            locations = locations.len(),
            spawners = spawners.len(),
            "stage loaded"
        );

        Ok(Self {
            registry,
            locations,
            spawners,
            region,
        })
    }

    /// Looks up a spawner by name.
    #[must_use]
    pub fn spawner(&self, name: &str) -> Option<&SpawnerConfig> {
        self.spawners.iter().find(|s| s.name() == name)
    }
}

fn build_spawner(
    section: SpawnerSection,
    registry: &TemplateRegistry,
    locations: &SpawnLocations,
) -> ConfigResult<SpawnerConfig> {
    let mut entries = Vec::with_capacity(section.entries.len());
    for (index, entry) in section.entries.into_iter().enumerate() {
        if !registry.contains(entry.kind) {
            return Err(ConfigError::MissingTemplate(entry.kind));
        }
        let cooldown = cooldown_from_secs(index, entry.cooldown_secs)?;
        let target = resolve_target(&section.name, index, &entry, locations)?;
        entries.push(SpawnEntry::new(entry.kind, cooldown, target));
    }
    SpawnerConfig::new(section.name, entries, section.looping)
}

fn resolve_target(
    spawner: &str,
    index: usize,
    entry: &EntrySection,
    locations: &SpawnLocations,
) -> ConfigResult<SpawnTarget> {
    match (entry.position, entry.location, entry.location_name.as_deref()) {
        (Some(position), None, None) => Ok(SpawnTarget::Position(position)),
        (None, Some(location), None) => {
            if location >= locations.len() {
                tracing::warn!(
                    spawner,
                    entry = index,
                    location,
                    available = locations.len(),
                    "spawn entry points past the location list; it will be skipped"
                );
            }
            Ok(SpawnTarget::Location(location))
        }
        (None, None, Some(name)) => locations
            .index_of(name)
            .map(SpawnTarget::Location)
            .ok_or_else(|| ConfigError::UnknownLocation(name.to_string())),
        (None, None, None) => Err(ConfigError::InvalidTarget(format!(
            "{spawner} entry {index} has no position, location or location_name"
        ))),
        _ => Err(ConfigError::InvalidTarget(format!(
            "{spawner} entry {index} sets more than one target"
        ))),
    }
}

/// Kinds that appear in at least one spawner of `config`.
#[must_use]
pub fn kinds_in_use(config: &StageConfig) -> Vec<BulletKind> {
    let mut used = [false; BulletKind::COUNT];
    for spawner in &config.spawners {
        for entry in spawner.entries() {
            used[entry.kind.index()] = true;
        }
    }
    BulletKind::ALL
        .into_iter()
        .filter(|k| used[k.index()])
        .collect()
}
