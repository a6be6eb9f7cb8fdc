//! Configuration scaffolding command

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use authforge::editor::{ConfigEditor, FieldPatch, IdGenerator, RandomIds, TablePatch};
use authforge::model::CoreTable;
use authforge::PluginConfig;
use console::style;

use crate::config_file::save_config;
use crate::field_spec::FieldSpec;

/// Create a plugin configuration document
#[derive(Debug, Clone)]
pub struct InitCommand {
    /// Plugin name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Tables defined by the plugin
    pub new_tables: Vec<String>,
    /// Core tables extended by the plugin
    pub extend: Vec<String>,
    /// Field definitions (`table.name:type[:modifiers]`)
    pub fields: Vec<String>,
    /// Where to write the document (`.json` or `.toml`)
    pub out: PathBuf,
    /// Overwrite an existing document
    pub force: bool,
}

impl InitCommand {
    /// Build the configuration without writing it
    ///
    /// # Errors
    ///
    /// Returns an error if a table is unknown, declared twice, or a field
    /// definition cannot be parsed.
    pub fn build(&self, ids: impl IdGenerator) -> Result<PluginConfig> {
        if self.name.trim().is_empty() {
            bail!("Plugin name cannot be empty");
        }

        let mut editor = ConfigEditor::new(self.name.trim(), ids);
        if let Some(description) = &self.description {
            editor.set_description(description.trim());
        }

        let mut tables: HashMap<String, String> = HashMap::new();
        let declared = self
            .new_tables
            .iter()
            .map(|name| (name, true))
            .chain(self.extend.iter().map(|name| (name, false)));

        for (name, is_new) in declared {
            let name = name.trim();
            if !is_new && CoreTable::from_name(name).is_none() {
                bail!(
                    "Cannot extend '{name}'. Core tables are: {}",
                    CoreTable::ALL.map(CoreTable::as_str).join(", ")
                );
            }
            if tables.contains_key(name) {
                bail!("Table '{name}' is declared more than once");
            }

            let table_id = editor.add_table(is_new);
            let draft_field = editor
                .config()
                .tables
                .last()
                .and_then(|table| table.fields.first())
                .map(|field| field.id.clone());
            if let Some(field_id) = draft_field {
                editor.remove_field(&table_id, &field_id)?;
            }
            editor.update_table(&table_id, TablePatch {
                name: Some(name.to_string()),
                ..TablePatch::default()
            })?;
            tables.insert(name.to_string(), table_id);
        }

        for definition in &self.fields {
            let spec = FieldSpec::parse(definition)?;
            let table_id = tables.get(&spec.table).ok_or_else(|| {
                anyhow!(
                    "Unknown table '{}' in field '{definition}'. Declare it with --new-table or --extend",
                    spec.table
                )
            })?;

            let field_id = editor.add_field(table_id)?;
            editor.update_field(table_id, &field_id, FieldPatch {
                name: Some(spec.name),
                field_type: Some(spec.field_type),
                required: Some(spec.required),
                unique: Some(spec.unique),
                reference: Some(spec.reference),
            })?;
        }

        Ok(editor.into_config())
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists and `force` is not set, or
    /// the configuration cannot be built or written.
    pub fn execute(&self) -> Result<()> {
        if self.out.exists() && !self.force {
            bail!(
                "'{}' already exists. Pass --force to overwrite it",
                self.out.display()
            );
        }

        let config = self.build(RandomIds)?;
        save_config(&self.out, &config)?;

        println!(
            "{} {} {}",
            style("Created").green().bold(),
            style("plugin configuration:").bold(),
            style(self.out.display()).cyan()
        );
        println!(
            "  {} table(s), {} field(s)",
            config.tables.len(),
            config.tables.iter().map(|table| table.fields.len()).sum::<usize>()
        );

        println!("\n{}", style("Next steps:").cyan().bold());
        println!("  1. Add hooks, middlewares and rate limits to {}", style(self.out.display()).yellow());
        println!(
            "  2. Generate the plugin: {}",
            style(format!("authforge generate {}", self.out.display())).yellow()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authforge::editor::SequentialIds;
    use authforge::model::{FieldType, OnDelete};

    fn command() -> InitCommand {
        InitCommand {
            name: "birthdayPlugin".to_string(),
            description: Some("Tracks birthdays".to_string()),
            new_tables: vec!["userProfile".to_string()],
            extend: vec!["user".to_string()],
            fields: vec![
                "userProfile.birthday:date:required".to_string(),
                "userProfile.ownerId:string:ref=user.id/cascade".to_string(),
                "user.nickname:string:unique".to_string(),
            ],
            out: PathBuf::from("plugin.json"),
            force: false,
        }
    }

    #[test]
    fn test_build_tables_and_fields() {
        let config = command().build(SequentialIds::new("i")).unwrap();

        assert_eq!(config.description, "Tracks birthdays");
        assert_eq!(config.tables.len(), 2);

        let profile = &config.tables[0];
        assert_eq!(profile.name, "userProfile");
        assert!(profile.is_new);
        assert_eq!(profile.fields.len(), 2);
        assert_eq!(profile.fields[0].name, "birthday");
        assert_eq!(profile.fields[0].field_type, FieldType::Date);
        assert!(profile.fields[0].required);
        assert_eq!(
            profile.fields[1].reference.as_ref().map(|reference| reference.on_delete),
            Some(OnDelete::Cascade)
        );

        let user = &config.tables[1];
        assert_eq!(user.name, "user");
        assert!(!user.is_new);
        assert!(user.fields[0].unique);
    }

    #[test]
    fn test_unknown_table_in_field() {
        let mut command = command();
        command.fields.push("session.ip:string".to_string());
        let err = command.build(SequentialIds::default()).unwrap_err();
        assert!(err.to_string().contains("Unknown table 'session'"));
    }

    #[test]
    fn test_extend_requires_core_table() {
        let mut command = command();
        command.extend = vec!["profiles".to_string()];
        command.fields.clear();
        let err = command.build(SequentialIds::default()).unwrap_err();
        assert!(err.to_string().contains("user, session, account, verification"));
    }

    #[test]
    fn test_duplicate_table() {
        let mut command = command();
        command.new_tables.push("user".to_string());
        assert!(command.build(SequentialIds::default()).is_err());
    }
}
