//! Plugin configuration data model
//!
//! A [`PluginConfig`] is an immutable snapshot describing one plugin: its
//! tables, lifecycle hooks, middlewares and rate limits. The serialized form
//! uses `camelCase` keys, so documents exported by the interactive plugin
//! builder load unchanged:
//!
//! ```json
//! {
//!   "name": "birthdayPlugin",
//!   "description": "Tracks user birthdays",
//!   "tables": [{
//!     "id": "t1", "name": "userProfile", "isNew": true, "disableMigration": false,
//!     "fields": [{ "id": "f1", "name": "birthday", "type": "date",
//!                  "required": true, "unique": false, "reference": null }]
//!   }],
//!   "hooks": [], "middlewares": [], "rateLimits": [],
//!   "generateServer": true, "generateClient": true,
//!   "addToBootstrap": false, "runCLI": false
//! }
//! ```

mod endpoint;
mod schema;

pub use endpoint::{
    Hook, HookAction, HookGuard, HookTiming, Middleware, PathType, RateLimit, SIGN_IN_ENDPOINT,
    SIGN_UP_ENDPOINT, STARTER_LOGIC,
};
pub use schema::{CoreTable, FieldReference, FieldType, OnDelete, SchemaField, SchemaTable};

use serde::{Deserialize, Serialize};

/// Which artifacts the caller wants written
///
/// These flags do not influence generation itself; they only select which
/// of the generated artifacts are returned by
/// [`crate::PluginGenerator::selected_files`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputSelection {
    /// Write the server plugin module
    pub generate_server: bool,
    /// Write the client plugin module
    pub generate_client: bool,
    /// Write the bootstrap snippets
    pub add_to_bootstrap: bool,
    /// Remind the user to sync the database schema
    #[serde(rename = "runCLI")]
    pub run_cli: bool,
}

impl Default for OutputSelection {
    fn default() -> Self {
        Self {
            generate_server: true,
            generate_client: true,
            add_to_bootstrap: false,
            run_cli: false,
        }
    }
}

/// Root configuration of a plugin
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// Human-entered plugin name
    pub name: String,
    /// Optional description, emitted as a doc comment
    #[serde(default)]
    pub description: String,
    /// Tables in declaration order
    #[serde(default)]
    pub tables: Vec<SchemaTable>,
    /// Hooks in declaration order
    #[serde(default)]
    pub hooks: Vec<Hook>,
    /// Middlewares in declaration order
    #[serde(default)]
    pub middlewares: Vec<Middleware>,
    /// Rate limits in declaration order
    #[serde(default)]
    pub rate_limits: Vec<RateLimit>,
    /// Output selection flags
    #[serde(flatten)]
    pub outputs: OutputSelection,
}

impl PluginConfig {
    /// Create an empty configuration with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or does not match
    /// the configuration shape.
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Serialize the configuration as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Tables that will be emitted
    pub fn named_tables(&self) -> impl Iterator<Item = &SchemaTable> {
        self.tables.iter().filter(|table| table.is_named())
    }

    /// Hooks that resolve to a guard and will be emitted
    pub fn active_hooks(&self) -> impl Iterator<Item = &Hook> {
        self.hooks.iter().filter(|hook| hook.guard().is_some())
    }

    /// Middlewares that carry a path and will be emitted
    pub fn routed_middlewares(&self) -> impl Iterator<Item = &Middleware> {
        self.middlewares.iter().filter(|middleware| middleware.has_path())
    }

    /// Rate limits that carry a path and will be emitted
    pub fn routed_rate_limits(&self) -> impl Iterator<Item = &RateLimit> {
        self.rate_limits.iter().filter(|limit| limit.has_path())
    }

    /// Whether the server module needs the middleware helper imports
    #[must_use]
    pub fn needs_middleware_helpers(&self) -> bool {
        self.active_hooks().next().is_some() || self.routed_middlewares().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILDER_EXPORT: &str = r#"{
        "name": "birthdayPlugin",
        "description": "",
        "tables": [{
            "id": "t1", "name": "userProfile", "isNew": true, "disableMigration": false,
            "fields": [
                { "id": "f1", "name": "birthday", "type": "date", "required": true, "unique": false, "reference": null },
                { "id": "f2", "name": "ownerId", "type": "string", "required": true, "unique": false,
                  "reference": { "model": "user", "field": "id", "onDelete": "set null" } }
            ]
        }],
        "hooks": [{ "id": "h1", "name": "", "timing": "after", "action": "custom",
                    "customPath": "/update-user", "matcher": "", "logic": "" }],
        "middlewares": [],
        "rateLimits": [{ "id": "r1", "name": "", "path": "/birthday", "pathType": "pattern",
                         "limit": 5, "window": 10 }],
        "generateServer": true, "generateClient": false, "addToBootstrap": true, "runCLI": true
    }"#;

    #[test]
    fn test_builder_export_loads() {
        let config = PluginConfig::from_json(BUILDER_EXPORT).unwrap();
        assert_eq!(config.name, "birthdayPlugin");
        assert_eq!(config.tables[0].fields[0].field_type, FieldType::Date);
        assert_eq!(
            config.tables[0].fields[1].reference.as_ref().unwrap().on_delete,
            OnDelete::SetNull
        );
        assert_eq!(config.hooks[0].timing, HookTiming::After);
        assert_eq!(config.hooks[0].action, HookAction::Custom);
        assert_eq!(config.rate_limits[0].path_type, PathType::Pattern);
        assert_eq!(config.rate_limits[0].key, None);
        assert!(!config.outputs.generate_client);
        assert!(config.outputs.run_cli);
    }

    #[test]
    fn test_json_round_trip_keeps_flag_names() {
        let config = PluginConfig::from_json(BUILDER_EXPORT).unwrap();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"runCLI\": true"));
        assert!(json.contains("\"rateLimits\""));
        assert_eq!(PluginConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_flags_use_defaults() {
        let config = PluginConfig::from_json(r#"{ "name": "x" }"#).unwrap();
        assert_eq!(config.outputs, OutputSelection::default());
        assert!(config.tables.is_empty());
    }

    #[test]
    fn test_filters_drop_drafts() {
        let mut config = PluginConfig::new("x");
        config.middlewares.push(Middleware::draft("m1"));
        config.rate_limits.push(RateLimit::draft("r1"));
        let mut hook = Hook::draft("h1");
        hook.action = HookAction::Custom;
        config.hooks.push(hook);

        assert_eq!(config.routed_middlewares().count(), 0);
        assert_eq!(config.routed_rate_limits().count(), 0);
        assert_eq!(config.active_hooks().count(), 0);
        assert!(!config.needs_middleware_helpers());

        config.hooks.push(Hook::draft("h2"));
        assert!(config.needs_middleware_helpers());
    }
}
