//! Print a single artifact

use std::path::PathBuf;

use anyhow::{Context, Result};
use authforge::Artifact;

use super::build_generator;
use crate::config_file::load_config;
use crate::settings::AuthforgeSettings;

/// Artifact selector on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArtifactArg {
    /// Server plugin module
    Server,
    /// Client plugin module
    Client,
    /// Server bootstrap snippet
    ServerBootstrap,
    /// Client bootstrap snippet
    ClientBootstrap,
}

impl From<ArtifactArg> for Artifact {
    fn from(arg: ArtifactArg) -> Self {
        match arg {
            ArtifactArg::Server => Self::ServerPlugin,
            ArtifactArg::Client => Self::ClientPlugin,
            ArtifactArg::ServerBootstrap => Self::ServerBootstrap,
            ArtifactArg::ClientBootstrap => Self::ClientBootstrap,
        }
    }
}

/// Print one artifact to stdout, ignoring the output flags
#[derive(Debug, Clone)]
pub struct ShowCommand {
    /// Configuration document
    pub config: PathBuf,
    /// Which artifact to print
    pub artifact: ArtifactArg,
}

impl ShowCommand {
    /// Render the artifact
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or generated.
    pub fn render(&self, settings: &AuthforgeSettings) -> Result<String> {
        let config = load_config(&self.config)?;
        let generator = build_generator(settings.literal_policy, settings.check_fragments)?;

        let source = match Artifact::from(self.artifact) {
            Artifact::ServerPlugin => generator.server_plugin(&config),
            Artifact::ClientPlugin => generator.client_plugin(&config),
            Artifact::ServerBootstrap => generator.server_bootstrap(&config),
            Artifact::ClientBootstrap => generator.client_bootstrap(&config),
        };
        source.with_context(|| format!("Failed to generate plugin from {}", self.config.display()))
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or generated.
    pub fn execute(&self, settings: &AuthforgeSettings) -> Result<()> {
        print!("{}", self.render(settings)?);
        Ok(())
    }
}
