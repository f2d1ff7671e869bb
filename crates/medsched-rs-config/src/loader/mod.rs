//! Layered configuration loader.
//!
//! Reads the system, user, cwd, and runtime `medsched.json5` layers, checks
//! each one against the schema, deep-merges them in precedence order, and
//! decodes the result into a validated `MedschedConfig`.

mod schema;


use crate::{ConfigError, MedschedConfig};
use directories::UserDirs;
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name looked up in every discovered layer.
const DEFAULT_CONFIG_FILE: &str = "medsched.json5";
/// Directory under the user's home holding the user layer.
const DEFAULT_CONFIG_DIR: &str = ".medsched";
/// System layer location, only consulted on Unix.
const SYSTEM_CONFIG_PATH: &str = "/etc/medsched/medsched.json5";

/// Effective config plus the layers that produced it.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: MedschedConfig,
    /// Layers that contributed, lowest precedence first.
    pub layers: Vec<ConfigLayer>,
}

/// Where a config layer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// Machine-wide defaults.
    System,
    /// The operator's home directory.
    User,
    /// The directory the desk was started from.
    Cwd,
    /// Files named on the command line; applied last.
    Runtime,
}

impl ConfigLayerSource {
    fn label(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Cwd => "cwd",
            Self::Runtime => "runtime",
        }
    }
}

/// A config layer that was found and applied.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    /// Layer origin.
    pub source: ConfigLayerSource,
    /// File the layer was read from.
    pub path: PathBuf,
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.source.label(), self.path.display())
    }
}

/// Where to look for layers and which runtime overrides to apply.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Directory searched for the cwd layer.
    pub cwd: PathBuf,
    /// System layer; `/etc/medsched/medsched.json5` on Unix, none elsewhere.
    pub system_config_path: Option<PathBuf>,
    /// User layer; `~/.medsched/medsched.json5` when a home directory exists.
    pub user_config_path: Option<PathBuf>,
    /// Runtime layers, each of which must exist.
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    /// Options with the standard system and user locations for `cwd`.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            system_config_path: cfg!(unix).then(|| PathBuf::from(SYSTEM_CONFIG_PATH)),
            user_config_path: UserDirs::new().map(|dirs| {
                dirs.home_dir()
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILE)
            }),
            runtime_paths: Vec::new(),
        }
    }

    /// Append a runtime layer applied after every discovered one.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl MedschedConfig {
    /// Load one config file on its own, without layering.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let layer = ConfigLayer {
            source: ConfigLayerSource::Runtime,
            path: path.as_ref().to_path_buf(),
        };
        info!("loading config from {layer}");
        config_from_value(read_layer(layer)?.value)
    }

    /// Load one config from JSON5 text, without layering.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents).map_err(|source| ConfigError::Syntax {
            layer: "inline config".to_string(),
            source,
        })?;
        schema::validate_layer_schema(&value, "config")?;
        config_from_value(value)
    }

    /// Load the layer stack described by `options`.
    ///
    /// Precedence (low -> high): system, user, cwd, runtime. Missing
    /// discovered layers are skipped, missing runtime layers are an error, and
    /// a file reached through two discovered locations is applied once.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let cwd = canonical_or_missing(&options.cwd)?;
        debug!("resolved cwd for config load: {}", cwd.display());

        let discovered = [
            (ConfigLayerSource::System, options.system_config_path),
            (ConfigLayerSource::User, options.user_config_path),
            (ConfigLayerSource::Cwd, Some(cwd.join(DEFAULT_CONFIG_FILE))),
        ];
        let runtime = options
            .runtime_paths
            .into_iter()
            .map(|path| (ConfigLayerSource::Runtime, Some(path)));

        let mut merged = Value::Object(serde_json::Map::new());
        let mut layers = Vec::new();
        let mut seen = HashSet::new();
        for (source, path) in discovered.into_iter().chain(runtime) {
            let Some(path) = path else {
                continue;
            };
            let required = source == ConfigLayerSource::Runtime;
            let loaded = match read_layer(ConfigLayer { source, path }) {
                Ok(loaded) => loaded,
                Err(ConfigError::Unreadable {
                    source: ref error, ..
                }) if !required && error.kind() == io::ErrorKind::NotFound => {
                    debug!("no {} config layer", source.label());
                    continue;
                }
                Err(err) => return Err(err),
            };
            let identity = loaded
                .meta
                .path
                .canonicalize()
                .unwrap_or_else(|_| loaded.meta.path.clone());
            if !required && !seen.insert(identity) {
                debug!("skipping {} (already applied)", loaded.meta);
                continue;
            }
            overlay(&mut merged, loaded.value);
            layers.push(loaded.meta);
        }

        let config = config_from_value(merged)?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Check the ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (self.ui.title.trim().is_empty(), "ui.title", "not be blank"),
            (self.ui.status_history == 0, "ui.status_history", "be at least 1"),
            (self.ui.poll_interval_ms == 0, "ui.poll_interval_ms", "be at least 1"),
            (
                self.reminders.title.trim().is_empty(),
                "reminders.title",
                "not be blank",
            ),
        ];
        match checks.into_iter().find(|(failed, _, _)| *failed) {
            Some((_, key, requirement)) => Err(ConfigError::OutOfRange { key, requirement }),
            None => Ok(()),
        }
    }
}

/// A layer read from disk and checked against the schema.
#[derive(Debug, Clone)]
struct LoadedLayer {
    meta: ConfigLayer,
    value: Value,
}

/// Read one layer from disk and check it against the schema.
fn read_layer(meta: ConfigLayer) -> Result<LoadedLayer, ConfigError> {
    let contents = match fs::read_to_string(&meta.path) {
        Ok(contents) => contents,
        Err(source) => {
            return Err(ConfigError::Unreadable {
                path: meta.path,
                source,
            });
        }
    };
    let label = meta.to_string();
    let value: Value = json5::from_str(&contents).map_err(|source| ConfigError::Syntax {
        layer: label.clone(),
        source,
    })?;
    schema::validate_layer_schema(&value, &label)?;
    debug!("read config layer {label}");
    Ok(LoadedLayer { meta, value })
}

/// Canonicalize `path`, keeping it as given when it does not exist yet.
fn canonical_or_missing(path: &Path) -> Result<PathBuf, ConfigError> {
    match path.canonicalize() {
        Ok(path) => Ok(path),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(source) => Err(ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Deep-merge `layer` into `base`: objects merge key by key, anything else
/// replaces what was there.
fn overlay(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base), Value::Object(layer)) => {
            for (key, value) in layer {
                overlay(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

fn config_from_value(value: Value) -> Result<MedschedConfig, ConfigError> {
    let config: MedschedConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
