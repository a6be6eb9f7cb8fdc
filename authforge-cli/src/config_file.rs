//! Plugin configuration documents on disk

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use authforge::PluginConfig;

/// Serialization format of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json`, as exported by the web builder
    Json,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension
    ///
    /// # Errors
    ///
    /// Returns an error for any extension other than `.json` or `.toml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => bail!(
                "Unsupported configuration file: '{}'. Expected a .json or .toml file",
                path.display()
            ),
        }
    }
}

/// Read a plugin configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<PluginConfig> {
    let format = ConfigFormat::from_path(path)?;
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration: {}", path.display()))?;

    let config = match format {
        ConfigFormat::Json => PluginConfig::from_json(&contents).map_err(anyhow::Error::from),
        ConfigFormat::Toml => toml::from_str(&contents).map_err(anyhow::Error::from),
    };
    config.with_context(|| format!("Failed to parse configuration: {}", path.display()))
}

/// Write a plugin configuration, creating parent directories
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized or written.
pub fn save_config(path: &Path, config: &PluginConfig) -> Result<()> {
    let contents = match ConfigFormat::from_path(path)? {
        ConfigFormat::Json => {
            let mut json = config.to_json()?;
            json.push('\n');
            json
        }
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write configuration: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use authforge::model::{Hook, SchemaTable};
    use tempfile::TempDir;

    fn sample() -> PluginConfig {
        let mut config = PluginConfig::new("birthdayPlugin");
        let mut table = SchemaTable::draft("t1", true, "f1");
        table.name = "userProfile".to_string();
        table.fields[0].name = "birthday".to_string();
        config.tables.push(table);
        config.hooks.push(Hook::draft("h1"));
        config
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")).unwrap(), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.TOML")).unwrap(), ConfigFormat::Toml);
        assert!(ConfigFormat::from_path(Path::new("a.yaml")).is_err());
        assert!(ConfigFormat::from_path(Path::new("plugin")).is_err());
    }

    #[test]
    fn test_json_and_toml_documents_load_back() {
        let dir = TempDir::new().unwrap();
        for file in ["nested/plugin.json", "plugin.toml"] {
            let path = dir.path().join(file);
            save_config(&path, &sample()).unwrap();
            assert_eq!(load_config(&path).unwrap(), sample(), "{file}");
        }
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"name\": ").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
