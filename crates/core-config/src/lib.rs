//! Configuration loading and parsing.
//!
//! Parses `granit.toml` (or an override path provided by the binary). Every
//! field has a default, so a missing file, a missing section, or a file that
//! fails to parse all yield a usable `Config`. Unknown fields are ignored to
//! allow forward evolution without immediate warnings.
//!
//! ```toml
//! [editor]
//! indent_with_tabs = true
//! indent_width = 4
//! auto_close = true
//!
//! [history]
//! max_depth = 0
//!
//! [platform]
//! override = "mac"
//! ```

use anyhow::Result;
use core_events::Platform;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "granit.toml";
pub const INDENT_WIDTH_MIN: usize = 1;
pub const INDENT_WIDTH_MAX: usize = 16;

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_indent_with_tabs")]
    pub indent_with_tabs: bool,
    #[serde(default = "EditorConfig::default_indent_width")]
    /// Raw value as written; any integer parses and is clamped on read.
    pub indent_width: i64,
    #[serde(default = "EditorConfig::default_auto_close")]
    pub auto_close: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent_with_tabs: Self::default_indent_with_tabs(),
            indent_width: Self::default_indent_width(),
            auto_close: Self::default_auto_close(),
        }
    }
}

impl EditorConfig {
    const fn default_indent_with_tabs() -> bool {
        true
    }
    const fn default_indent_width() -> i64 {
        4
    }
    const fn default_auto_close() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct HistoryConfig {
    /// 0 keeps every undo entry.
    #[serde(default)]
    pub max_depth: usize,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlatformConfig {
    #[serde(default, rename = "override")]
    pub override_tag: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("granit").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let cfg = Config {
                raw: Some(content),
                file,
            };
            let raw = cfg.file.editor.indent_width;
            let effective = cfg.indent_width();
            if usize::try_from(raw).ok() != Some(effective) {
                info!(target: "config", raw, effective, "indent_width_clamped");
            }
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Indent width in columns, clamped to `INDENT_WIDTH_MIN..=INDENT_WIDTH_MAX`.
    pub fn indent_width(&self) -> usize {
        let raw = self.file.editor.indent_width;
        if raw < 1 {
            return INDENT_WIDTH_MIN;
        }
        usize::try_from(raw)
            .unwrap_or(INDENT_WIDTH_MAX)
            .clamp(INDENT_WIDTH_MIN, INDENT_WIDTH_MAX)
    }

    pub fn max_history(&self) -> usize {
        self.file.history.max_depth
    }

    /// Platform tag for keybinding lookup: the configured override when it is
    /// a valid tag, otherwise the host classification.
    pub fn platform(&self) -> Platform {
        match self.file.platform.override_tag.as_deref() {
            Some(tag) => match tag.parse::<Platform>() {
                Ok(p) => {
                    info!(target: "config", platform = %p, "platform_override");
                    p
                }
                Err(e) => {
                    warn!(target: "config", error = %e, "platform_override_ignored");
                    Platform::host()
                }
            },
            None => Platform::host(),
        }
    }
}
