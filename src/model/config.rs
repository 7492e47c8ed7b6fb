use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// State file holding every project. Defaults to `<data_dir>/agenda/agenda.json`.
    #[serde(default)]
    pub state_file: Option<PathBuf>,
    /// Directory for backup and export files written from the TUI.
    /// Defaults to the working directory.
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragConfig {
    /// Pointer distance (in pointer units) before a press becomes a drag
    #[serde(default = "default_threshold")]
    pub threshold: u32,
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig {
            threshold: default_threshold(),
        }
    }
}

/// Pointer units per terminal cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerConfig {
    #[serde(default = "default_cell_width")]
    pub cell_width: u32,
    #[serde(default = "default_cell_height")]
    pub cell_height: u32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        PointerConfig {
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Chip colour overrides keyed by status (e.g. `review = "#AA0000"`)
    #[serde(default)]
    pub status_colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
            status_colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file. Defaults to `<data_dir>/agenda/agenda.log`.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> u32 {
    5
}

fn default_cell_width() -> u32 {
    8
}

fn default_cell_height() -> u32 {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.drag.threshold, 5);
        assert_eq!(config.pointer.cell_width, 8);
        assert_eq!(config.pointer.cell_height, 16);
        assert!(config.ui.show_key_hints);
        assert_eq!(config.log.level, "info");
        assert!(config.storage.state_file.is_none());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config: Config = toml::from_str(
            r##"
[drag]
threshold = 3

[ui.status_colors]
review = "#AA0000"
"##,
        )
        .unwrap();
        assert_eq!(config.drag.threshold, 3);
        assert_eq!(config.pointer.cell_height, 16);
        assert_eq!(config.ui.status_colors.get("review").unwrap(), "#AA0000");
        assert!(config.ui.show_key_hints);
    }
}
