//! XML configuration support.
//! - Loads optional settings from the file given with `--config` (quick_xml + serde).
//! - Settings from the file sit between built-in defaults and CLI flags.
//!
//! Example:
//! <config>
//!   <log_level>info</log_level>
//!   <log_file>/tmp/find-replace.log</log_file>
//!   <jobs>4</jobs>
//!   <on_collision>skip</on_collision>
//!   <ignore>.hg</ignore>
//!   <ignore>node_modules</ignore>
//! </config>
//!
//! Notes:
//! - Unknown XML fields are rejected to surface misconfigurations early.
//! - FIND/REPLACE are never read from the file; they are always positional.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::{CollisionPolicy, Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "json")]
    json: Option<bool>,
    #[serde(rename = "jobs", default, deserialize_with = "de_usize_trimmed_opt")]
    jobs: Option<usize>,
    #[serde(rename = "on_collision")]
    on_collision: Option<String>,
    #[serde(rename = "ignore", default)]
    ignore: Vec<String>,
}

// Custom deserializer that trims surrounding whitespace for optional usize
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<usize>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Settings loaded from an XML file, already parsed into program types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileConfig {
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub json: Option<bool>,
    pub jobs: Option<usize>,
    pub on_collision: Option<CollisionPolicy>,
    pub ignore: Vec<String>,
}

impl FileConfig {
    /// Overlay the file's settings onto `cfg`. CLI overrides are applied afterwards.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(l) = &self.log_level {
            cfg.log_level = l.clone();
        }
        if let Some(f) = &self.log_file {
            cfg.log_file = Some(f.clone());
        }
        if let Some(j) = self.json {
            cfg.json = j;
        }
        if self.jobs.is_some() {
            cfg.jobs = self.jobs;
        }
        if let Some(p) = self.on_collision {
            cfg.on_collision = p;
        }
        for name in &self.ignore {
            cfg.ignore(name.as_str());
        }
    }
}

/// Read and parse the XML config at `path`.
pub fn load_config_from_xml(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config file '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&content)
        .with_context(|| format!("parse config file '{}'", path.display()))?;

    let log_level = match parsed.log_level.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => match LogLevel::parse(s) {
            Some(l) => Some(l),
            None => bail!("invalid <log_level> '{}' in {}", s, path.display()),
        },
    };
    let on_collision = match parsed.on_collision.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => match CollisionPolicy::parse(s) {
            Some(p) => Some(p),
            None => bail!("invalid <on_collision> '{}' in {}", s, path.display()),
        },
    };
    let log_file = parsed.log_file.as_deref().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() { None } else { Some(PathBuf::from(trimmed)) }
    });
    let ignore = parsed
        .ignore
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let cfg = FileConfig {
        log_level,
        log_file,
        json: parsed.json,
        jobs: parsed.jobs,
        on_collision,
        ignore,
    };
    debug!(path = %path.display(), ?cfg, "loaded config file");
    Ok(cfg)
}
