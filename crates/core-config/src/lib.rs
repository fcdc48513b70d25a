//! Configuration loading and parsing.
//!
//! Reads `oxhex.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [view]
//! columns = 16   # bytes per row
//! hex = true     # hex panel initially visible
//! ascii = true   # ascii panel initially visible
//!
//! [terminal]
//! probe = true   # cursor-position probe when the size query fails
//! fallback_cols = 80
//! fallback_rows = 25
//! ```
//!
//! Every field is optional. A missing file yields defaults; a file that does
//! not parse also yields defaults, with the error logged under the `config`
//! target. Unknown fields are ignored.

use anyhow::Result;
use core_model::{PanelSet, TermSize};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    #[serde(default = "ViewConfig::default_columns")]
    pub columns: u32,
    #[serde(default = "default_true")]
    pub hex: bool,
    #[serde(default = "default_true")]
    pub ascii: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            columns: Self::default_columns(),
            hex: true,
            ascii: true,
        }
    }
}

impl ViewConfig {
    const fn default_columns() -> u32 {
        16
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    #[serde(default = "default_true")]
    pub probe: bool,
    #[serde(default = "TerminalConfig::default_cols")]
    pub fallback_cols: u16,
    #[serde(default = "TerminalConfig::default_rows")]
    pub fallback_rows: u16,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            probe: true,
            fallback_cols: Self::default_cols(),
            fallback_rows: Self::default_rows(),
        }
    }
}

impl TerminalConfig {
    const fn default_cols() -> u16 {
        80
    }
    const fn default_rows() -> u16 {
        25
    }
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: `oxhex.toml` in the working directory, then the
/// platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("oxhex.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxhex").join("oxhex.toml");
    }
    PathBuf::from("oxhex.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Bytes per row, at least 1.
    pub fn columns(&self) -> u32 {
        self.file.view.columns.max(1)
    }

    /// Panels visible at startup.
    pub fn panels(&self) -> PanelSet {
        let mut set = PanelSet::empty();
        set.set(PanelSet::HEX, self.file.view.hex);
        set.set(PanelSet::ASCII, self.file.view.ascii);
        set
    }

    pub fn probe(&self) -> bool {
        self.file.terminal.probe
    }

    /// Size assumed when the terminal cannot tell us, clamped to the minimum
    /// usable terminal.
    pub fn fallback_size(&self) -> TermSize {
        TermSize::new(
            self.file.terminal.fallback_cols,
            self.file.terminal.fallback_rows,
        )
        .sanitized()
    }
}
