//! Tool settings
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Defaults
//! 2. User config: `~/.config/authforge/config.toml`
//! 3. Local config: `./authforge.toml`
//! 4. Environment variables prefixed with `AUTHFORGE_`
//!
//! Command-line flags are applied on top by each command.

use std::path::{Path, PathBuf};

use authforge::codegen::LiteralPolicy;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// File name of the project-local settings file
pub const LOCAL_SETTINGS_FILE: &str = "authforge.toml";

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthforgeSettings {
    /// Directory generated files are written to
    pub output_dir: PathBuf,
    /// Escape or reject values that need escaping
    pub literal_policy: LiteralPolicy,
    /// Check handler bodies and matchers for balanced delimiters
    pub check_fragments: bool,
    /// Overwrite changed files without asking
    pub force: bool,
}

impl Default for AuthforgeSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            literal_policy: LiteralPolicy::Escape,
            check_fragments: false,
            force: false,
        }
    }
}

impl AuthforgeSettings {
    /// Load settings from the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file cannot be parsed or a value has
    /// the wrong type.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(
            Self::user_config_path().as_deref(),
            Path::new(LOCAL_SETTINGS_FILE),
        )
    }

    /// Load settings from explicit file locations
    ///
    /// Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file cannot be parsed or a value has
    /// the wrong type.
    pub fn load_from(user_config: Option<&Path>, local_config: &Path) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        if let Some(user_config) = user_config.filter(|path| path.exists()) {
            figment = figment.merge(Toml::file(user_config));
        }
        if local_config.exists() {
            figment = figment.merge(Toml::file(local_config));
        }

        figment = figment.merge(Env::prefixed("AUTHFORGE_").split("__").lowercase(true));

        Ok(figment.extract()?)
    }

    /// `<config dir>/authforge/config.toml`, if the platform has a config dir
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("authforge").join("config.toml"))
    }
}
