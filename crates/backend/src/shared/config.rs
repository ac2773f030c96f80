use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub template: TemplateConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ImportConfig {
    /// How many row errors an outcome keeps in detail
    pub error_detail_limit: usize,
    /// Records returned by a preview-mode import
    pub preview_row_limit: usize,
    /// Errors shown to the user by a preview-mode import
    pub preview_error_limit: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            error_detail_limit: 100,
            preview_row_limit: 20,
            preview_error_limit: 20,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TemplateConfig {
    /// First row index that receives generated records
    pub data_start_row: u32,
    /// Template type looked up in the registry (PARTNER / STANDARD)
    pub template_type: String,
    pub max_upload_bytes: u64,
    /// Optional JSON file overriding the embedded template schema
    pub schema_path: Option<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            data_start_row: 7,
            template_type: "PARTNER".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            schema_path: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: "target/storage".to_string(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[import]
error_detail_limit = 100
preview_row_limit = 20
preview_error_limit = 20

[template]
data_start_row = 7
template_type = "PARTNER"
max_upload_bytes = 10485760

[storage]
root = "target/storage"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Explicit path (from the command line)
/// 2. Next to the executable (for production)
/// 3. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&contents)?);
    }

    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::debug!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Resolve a configured path: absolute paths as is, relative ones next to the executable
pub fn resolve_path(configured: &str) -> PathBuf {
    let path = Path::new(configured);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    // Fallback: use relative to current directory
    PathBuf::from(configured)
}

/// Storage root directory from configuration
pub fn get_storage_root(config: &Config) -> PathBuf {
    resolve_path(&config.storage.root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.import.error_detail_limit, 100);
        assert_eq!(config.import.preview_error_limit, 20);
        assert_eq!(config.template.data_start_row, 7);
        assert_eq!(config.template.max_upload_bytes, 10_485_760);
        assert_eq!(config.storage.root, "target/storage");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[import]\npreview_row_limit = 5\n").unwrap();
        assert_eq!(config.import.preview_row_limit, 5);
        assert_eq!(config.import.error_detail_limit, 100);
        assert_eq!(config.template.template_type, "PARTNER");
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nroot = \"/var/lib/sheets\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(get_storage_root(&config), PathBuf::from("/var/lib/sheets"));
    }
}
