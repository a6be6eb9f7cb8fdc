//! Plugin generation command

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use authforge::codegen::LiteralPolicy;
use authforge::GeneratedFile;
use console::style;
use dialoguer::Confirm;
use similar::{ChangeTag, TextDiff};
use tracing::{debug, info};

use super::build_generator;
use crate::config_file::load_config;
use crate::settings::AuthforgeSettings;

/// What happened to one generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Written to a new path
    Created,
    /// Existing file replaced
    Updated,
    /// Existing file already had this content
    Unchanged,
    /// Changed, but not written (dry run or declined)
    Skipped,
}

/// Outcome for one generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Full path of the file
    pub path: PathBuf,
    /// What happened to it
    pub status: FileStatus,
}

/// Generate plugin sources from a configuration document
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    /// Configuration document (`.json` or `.toml`)
    pub config: PathBuf,
    /// Output directory; falls back to the settings
    pub out: Option<PathBuf>,
    /// Show what would change without writing
    pub dry_run: bool,
    /// Overwrite changed files without asking
    pub force: bool,
    /// Reject values that would need escaping
    pub strict_literals: bool,
    /// Check fragments for balanced delimiters
    pub check_fragments: bool,
    /// Whether a user can answer prompts
    pub interactive: bool,
}

impl GenerateCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or generated,
    /// a file cannot be written, or a changed file would be overwritten
    /// without `--force` in an unattended session.
    pub fn execute(&self, settings: &AuthforgeSettings) -> Result<Vec<FileOutcome>> {
        let config = load_config(&self.config)?;
        let literal_policy = if self.strict_literals {
            LiteralPolicy::Reject
        } else {
            settings.literal_policy
        };
        let generator = build_generator(literal_policy, self.check_fragments || settings.check_fragments)?;
        let files = generator
            .selected_files(&config)
            .with_context(|| format!("Failed to generate plugin from {}", self.config.display()))?;

        if files.is_empty() {
            println!(
                "{} No outputs selected in {}",
                style("!").yellow().bold(),
                self.config.display()
            );
            return Ok(Vec::new());
        }

        let output_dir = self.out.as_ref().unwrap_or(&settings.output_dir);
        let force = self.force || settings.force;

        println!(
            "\n{} {} {}",
            style(if self.dry_run { "Checking" } else { "Generating" }).cyan().bold(),
            style(&config.name).green().bold(),
            style("...").cyan().bold()
        );

        let mut outcomes = Vec::with_capacity(files.len());
        for file in &files {
            let status = self.write_file(output_dir, file, force)?;
            let path = output_dir.join(&file.path);
            print_outcome(&path, file, status);
            outcomes.push(FileOutcome { path, status });
        }
        info!(
            written = outcomes
                .iter()
                .filter(|outcome| matches!(outcome.status, FileStatus::Created | FileStatus::Updated))
                .count(),
            total = outcomes.len(),
            "generation finished"
        );

        if !self.dry_run {
            print_next_steps(config.outputs.run_cli);
        }
        Ok(outcomes)
    }

    fn write_file(&self, output_dir: &Path, file: &GeneratedFile, force: bool) -> Result<FileStatus> {
        let full_path = output_dir.join(&file.path);

        let status = if full_path.exists() {
            let existing = fs::read_to_string(&full_path)
                .with_context(|| format!("Failed to read file: {}", full_path.display()))?;
            if existing == file.content {
                debug!(path = %full_path.display(), "unchanged");
                return Ok(FileStatus::Unchanged);
            }

            print_diff(&full_path, &existing, &file.content);
            if self.dry_run {
                return Ok(FileStatus::Skipped);
            }
            if !force && !self.confirm_overwrite(&full_path)? {
                return Ok(FileStatus::Skipped);
            }
            FileStatus::Updated
        } else {
            if self.dry_run {
                return Ok(FileStatus::Skipped);
            }
            FileStatus::Created
        };

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&full_path, &file.content)
            .with_context(|| format!("Failed to write file: {}", full_path.display()))?;

        Ok(status)
    }

    fn confirm_overwrite(&self, path: &Path) -> Result<bool> {
        if !self.interactive {
            bail!(
                "'{}' has changed. Rerun with --force to overwrite it, or --dry-run to review",
                path.display()
            );
        }

        Ok(Confirm::new()
            .with_prompt(format!("Overwrite {}?", path.display()))
            .default(false)
            .interact()?)
    }
}

fn print_outcome(path: &Path, file: &GeneratedFile, status: FileStatus) {
    let marker = match status {
        FileStatus::Created => style("✓ created").green(),
        FileStatus::Updated => style("✓ updated").green(),
        FileStatus::Unchanged => style("= unchanged").dim(),
        FileStatus::Skipped => style("- skipped").yellow(),
    };
    println!(
        "  {marker} {} ({})",
        style(path.display()).dim(),
        style(&file.description).dim()
    );
}

fn print_diff(path: &Path, old: &str, new: &str) {
    println!("\n{}", style(path.display()).bold());

    let diff = TextDiff::from_lines(old, new);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => print!("{}", style(format!("-{change}")).red()),
            ChangeTag::Insert => print!("{}", style(format!("+{change}")).green()),
            ChangeTag::Equal => print!(" {change}"),
        }
    }
    println!();
}

fn print_next_steps(run_cli: bool) {
    println!("\n{}", style("Next steps:").cyan().bold());
    if run_cli {
        println!(
            "  1. Sync the database schema: {}",
            style("npx @better-auth/cli@latest generate").yellow()
        );
        println!("  2. Update your database schema");
        println!("  3. Import and use your new plugin!");
    } else {
        println!("  1. Import and use your new plugin!");
    }
}
