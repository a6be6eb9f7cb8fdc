//! CLI command implementations

pub mod generate;
pub mod init;
pub mod show;

pub use generate::{FileOutcome, FileStatus, GenerateCommand};
pub use init::InitCommand;
pub use show::{ArtifactArg, ShowCommand};

use anyhow::{Context, Result};
use authforge::codegen::LiteralPolicy;
use authforge::validate::BalancedDelimiters;
use authforge::{GenerateOptions, PluginGenerator};

/// Build a generator for the effective settings
fn build_generator(literal_policy: LiteralPolicy, check_fragments: bool) -> Result<PluginGenerator> {
    let generator = PluginGenerator::new()
        .context("Failed to compile module templates")?
        .with_options(GenerateOptions { literal_policy });

    Ok(if check_fragments {
        generator.with_checker(BalancedDelimiters)
    } else {
        generator
    })
}
