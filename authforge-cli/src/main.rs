//! authforge CLI tool

use std::path::PathBuf;

use anyhow::Result;
use authforge_cli_lib::commands::{ArtifactArg, GenerateCommand, InitCommand, ShowCommand};
use authforge_cli_lib::{observability, AuthforgeSettings};
use clap::{Parser, Subcommand};
use console::Term;

#[derive(Parser)]
#[command(name = "authforge")]
#[command(version)]
#[command(about = "Generate Better Auth plugins from a declarative configuration", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a plugin configuration document
    Init {
        /// Plugin name
        name: String,
        /// Plugin description
        #[arg(long)]
        description: Option<String>,
        /// Define a new table
        #[arg(long = "new-table", value_name = "TABLE")]
        new_tables: Vec<String>,
        /// Extend a core table (user, session, account, verification)
        #[arg(long, value_name = "TABLE")]
        extend: Vec<String>,
        /// Field definition (e.g. `userProfile.birthday:date:required`)
        #[arg(long = "field", value_name = "FIELD")]
        fields: Vec<String>,
        /// Output document (.json or .toml)
        #[arg(long, default_value = "authforge-plugin.json")]
        out: PathBuf,
        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },
    /// Generate plugin sources from a configuration document
    Generate {
        /// Configuration document (.json or .toml)
        config: PathBuf,
        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,
        /// Show changes without writing
        #[arg(long)]
        dry_run: bool,
        /// Overwrite changed files without asking
        #[arg(long)]
        force: bool,
        /// Reject values that would need escaping
        #[arg(long)]
        strict_literals: bool,
        /// Check hook and middleware code for balanced delimiters
        #[arg(long)]
        check_fragments: bool,
    },
    /// Print one generated artifact to stdout
    Show {
        /// Configuration document (.json or .toml)
        config: PathBuf,
        /// Artifact to print
        #[arg(value_enum)]
        artifact: ArtifactArg,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;
    let settings = AuthforgeSettings::load()?;

    match cli.command {
        Commands::Init {
            name,
            description,
            new_tables,
            extend,
            fields,
            out,
            force,
        } => {
            let cmd = InitCommand {
                name,
                description,
                new_tables,
                extend,
                fields,
                out,
                force,
            };
            cmd.execute()?;
        }
        Commands::Generate {
            config,
            out,
            dry_run,
            force,
            strict_literals,
            check_fragments,
        } => {
            let cmd = GenerateCommand {
                config,
                out,
                dry_run,
                force,
                strict_literals,
                check_fragments,
                interactive: Term::stdout().is_term() && Term::stderr().is_term(),
            };
            cmd.execute(&settings)?;
        }
        Commands::Show { config, artifact } => {
            ShowCommand { config, artifact }.execute(&settings)?;
        }
    }

    Ok(())
}
