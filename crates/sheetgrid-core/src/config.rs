//! Grid configuration.
//!
//! Settings live in a TOML file, by default `<config dir>/sheetgrid/config.toml`:
//!
//! ```toml
//! [grid]
//! rows = 20
//! cols = 10
//! click_to_edit = "double-click"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;

use crate::error::{Result, SheetgridError};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// Largest grid (rows * cols) a config may ask for.
pub use sheetgrid_engine::engine::MAX_CELLS;

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 5;

/// What clicking an already-selected cell does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClickToEdit {
    /// A second click on the selected cell starts editing it.
    #[default]
    Reclick,
    /// Only a double-click (or Enter) starts editing.
    DoubleClick,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub click_to_edit: ClickToEdit,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            click_to_edit: ClickToEdit::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub grid: GridConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> std::result::Result<Config, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and validate a config file.
    pub fn load_file(path: &Path) -> Result<Config> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(SheetgridError::Config {
                path: path.display().to_string(),
                message: format!(
                    "file too large ({} bytes, max {})",
                    meta.len(),
                    MAX_CONFIG_FILE_BYTES
                ),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = Config::from_toml_str(&content).map_err(|e| SheetgridError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, rows: Option<usize>, cols: Option<usize>) -> Config {
        if let Some(rows) = rows {
            self.grid.rows = rows;
        }
        if let Some(cols) = cols {
            self.grid.cols = cols;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let GridConfig { rows, cols, .. } = self.grid;
        let invalid = |reason: &'static str| SheetgridError::InvalidDimensions { rows, cols, reason };
        if rows == 0 || cols == 0 {
            return Err(invalid("rows and cols must be at least 1"));
        }
        match rows.checked_mul(cols) {
            Some(cells) if cells <= MAX_CELLS => Ok(()),
            _ => Err(invalid("grid exceeds the cell limit")),
        }
    }
}

/// Default config file location.
pub fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sheetgrid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Load configuration, falling back to defaults.
///
/// `config_file` overrides the default location. A missing default file is
/// not an error; every other problem is reported as a warning and the
/// defaults are used.
pub fn load_config(config_file: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let path = config_file.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = path else {
        return (Config::default(), warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    match Config::load_file(&path) {
        Ok(config) => {
            debug!("loaded config from {}: {:?}", path.display(), config);
            (config, warnings)
        }
        Err(err) => {
            warnings.push(format!("Ignoring {}: {}", path.display(), err));
            (Config::default(), warnings)
        }
    }
}
