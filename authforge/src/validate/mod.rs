//! Pre-generation validation
//!
//! Generation never emits source it knows to be broken. [`Validator`] walks
//! a configuration in declaration order and returns the first problem it
//! finds. Draft entries (blank name or path, or a hook with nothing to match
//! on) are skipped here exactly as the emitters skip them.

mod fragment;

pub use fragment::{AcceptAll, BalancedDelimiters, Fragment, FragmentCheck, FragmentKind};

use std::collections::HashSet;

use tracing::debug;

use crate::codegen::{needs_escaping, LiteralPolicy};
use crate::error::{GenerateError, Result};
use crate::model::{
    CoreTable, Hook, HookAction, HookGuard, HookTiming, Middleware, PluginConfig, RateLimit,
    SchemaTable,
};
use crate::naming::{is_binding_name, is_identifier, PluginNames};

/// Checks a configuration before any source is built
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    policy: LiteralPolicy,
    checker: &'a dyn FragmentCheck,
}

impl<'a> Validator<'a> {
    /// Validator with the given literal policy and fragment checker
    #[must_use]
    pub const fn new(policy: LiteralPolicy, checker: &'a dyn FragmentCheck) -> Self {
        Self { policy, checker }
    }

    /// Validate `config` and return the names derived from it
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in configuration order.
    pub fn validate(&self, config: &PluginConfig) -> Result<PluginNames> {
        let names = self.plugin_names(config)?;

        let mut seen = HashSet::new();
        for table in &config.tables {
            self.table(table)?;
            if table.is_named() && !seen.insert(table.name.trim()) {
                return Err(GenerateError::duplicate_name("table", table.name.trim()));
            }
        }
        for hook in &config.hooks {
            self.hook(hook)?;
        }
        for middleware in &config.middlewares {
            self.middleware(middleware)?;
        }
        for limit in &config.rate_limits {
            self.rate_limit(limit)?;
        }

        Ok(names)
    }

    /// Validate only the plugin name and derive the names from it
    ///
    /// This is all the bootstrap snippets depend on.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or does not yield a usable
    /// symbol and import path.
    pub fn plugin_names(&self, config: &PluginConfig) -> Result<PluginNames> {
        let name = config.name.trim();
        if name.is_empty() {
            return Err(GenerateError::EmptyPluginName);
        }

        let names = PluginNames::derive(name);
        if !is_binding_name(&names.symbol) {
            return Err(GenerateError::invalid_identifier("plugin name", &names.symbol));
        }
        self.literal("plugin import path", &names.server_import_path())?;
        Ok(names)
    }

    fn table(&self, table: &SchemaTable) -> Result<()> {
        if !table.is_named() {
            debug!(table = %table.id, "skipping unnamed table");
            return Ok(());
        }

        let name = table.name.trim();
        if !table.is_new && CoreTable::from_name(name).is_none() {
            return Err(GenerateError::UnknownCoreTable {
                name: name.to_string(),
            });
        }
        if !is_identifier(name) {
            return Err(GenerateError::invalid_identifier("table name", name));
        }
        if let Some(model_name) = table.model_override() {
            self.literal(&format!("model name of table '{name}'"), model_name)?;
        }

        let mut seen = HashSet::new();
        for field in &table.fields {
            if !field.is_named() {
                debug!(table = name, field = %field.id, "skipping unnamed field");
                continue;
            }
            let field_name = field.name.trim();
            if !is_identifier(field_name) {
                return Err(GenerateError::invalid_identifier(
                    format!("field name in table '{name}'"),
                    field_name,
                ));
            }
            if !seen.insert(field_name) {
                return Err(GenerateError::duplicate_name(
                    format!("field in table '{name}'"),
                    field_name,
                ));
            }
            if let Some(reference) = &field.reference {
                let context = format!("reference of field '{name}.{field_name}'");
                self.literal(&context, &reference.model)?;
                self.literal(&context, &reference.field)?;
            }
        }
        Ok(())
    }

    fn hook(&self, hook: &Hook) -> Result<()> {
        let owner = format!("{} hook '{}'", timing_label(hook), label(&hook.name, hook.endpoint()));
        match hook.guard() {
            None => {
                debug!(hook = %hook.id, "skipping custom hook without path or matcher");
                return Ok(());
            }
            Some(HookGuard::Matcher(matcher)) => {
                self.fragment(&owner, FragmentKind::Matcher, matcher)?;
            }
            Some(HookGuard::StartsWith(endpoint)) => {
                if hook.action == HookAction::Custom {
                    self.literal(&format!("path of {owner}"), endpoint)?;
                }
            }
        }
        self.body(&owner, &hook.logic)
    }

    fn middleware(&self, middleware: &Middleware) -> Result<()> {
        if !middleware.has_path() {
            debug!(middleware = %middleware.id, "skipping middleware without path");
            return Ok(());
        }
        let owner = format!("middleware '{}'", label(&middleware.name, &middleware.path));
        self.literal(&format!("path of {owner}"), &middleware.path)?;
        self.body(&owner, &middleware.logic)
    }

    fn rate_limit(&self, limit: &RateLimit) -> Result<()> {
        if !limit.has_path() {
            debug!(rate_limit = %limit.id, "skipping rate limit without path");
            return Ok(());
        }
        let name = label(&limit.name, &limit.path);
        self.literal(&format!("path of rate limit '{name}'"), &limit.path)?;
        if let Some(key) = limit.custom_key() {
            self.literal(&format!("key of rate limit '{name}'"), key)?;
        }

        let reason = match (limit.limit, limit.window) {
            (0, _) => "limit must be greater than zero",
            (_, 0) => "window must be greater than zero",
            _ => return Ok(()),
        };
        Err(GenerateError::InvalidRateLimit {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    }

    fn body(&self, owner: &str, logic: &str) -> Result<()> {
        if logic.trim().is_empty() {
            return Ok(());
        }
        self.fragment(owner, FragmentKind::Body, logic)
    }

    fn fragment(&self, owner: &str, kind: FragmentKind, code: &str) -> Result<()> {
        self.checker
            .check(&Fragment { owner, kind, code })
            .map_err(|reason| GenerateError::RejectedFragment {
                owner: format!("{owner} {kind}"),
                reason,
            })
    }

    fn literal(&self, context: &str, value: &str) -> Result<()> {
        if self.policy == LiteralPolicy::Reject && needs_escaping(value) {
            return Err(GenerateError::unterminated_literal(context, value));
        }
        Ok(())
    }
}

const fn timing_label(hook: &Hook) -> &'static str {
    match hook.timing {
        HookTiming::Before => "before",
        HookTiming::After => "after",
    }
}

/// Display name for messages: the name, else what the entry is keyed on
fn label<'s>(name: &'s str, fallback: &'s str) -> &'s str {
    let name = name.trim();
    if name.is_empty() {
        fallback.trim()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldReference, OnDelete, SchemaField};

    fn validate(config: &PluginConfig) -> Result<PluginNames> {
        Validator::new(LiteralPolicy::Escape, &AcceptAll).validate(config)
    }

    fn strict(config: &PluginConfig) -> Result<PluginNames> {
        Validator::new(LiteralPolicy::Reject, &AcceptAll).validate(config)
    }

    fn table(name: &str, is_new: bool, fields: &[&str]) -> SchemaTable {
        SchemaTable {
            name: name.to_string(),
            fields: fields
                .iter()
                .enumerate()
                .map(|(index, field)| SchemaField {
                    name: (*field).to_string(),
                    ..SchemaField::draft(format!("f{index}"))
                })
                .collect(),
            ..SchemaTable::draft("t", is_new, "f")
        }
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(matches!(validate(&PluginConfig::new("  ")), Err(GenerateError::EmptyPluginName)));
    }

    #[test]
    fn test_symbol_must_be_identifier() {
        let err = validate(&PluginConfig::new("2fa plugin")).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::InvalidIdentifier { ref name, .. } if name == "2faPlugin"
        ));
        assert!(validate(&PluginConfig::new("default")).is_err());
        assert_eq!(validate(&PluginConfig::new("birthday plugin")).unwrap().symbol, "birthdayPlugin");
    }

    #[test]
    fn test_table_and_field_names() {
        let mut config = PluginConfig::new("p");
        config.tables.push(table("user profile", true, &["ok"]));
        assert!(matches!(
            validate(&config),
            Err(GenerateError::InvalidIdentifier { ref context, .. }) if context == "table name"
        ));

        config.tables[0] = table("userProfile", true, &["", "bad-name"]);
        assert!(matches!(
            validate(&config),
            Err(GenerateError::InvalidIdentifier { ref name, .. }) if name == "bad-name"
        ));

        config.tables[0] = table(" userProfile ", true, &["  birthday ", ""]);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_draft_table_is_skipped() {
        let mut config = PluginConfig::new("p");
        config.tables.push(table("", true, &["not an identifier"]));
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_unknown_core_table() {
        let mut config = PluginConfig::new("p");
        config.tables.push(table("users", false, &[]));
        assert!(matches!(
            validate(&config),
            Err(GenerateError::UnknownCoreTable { ref name }) if name == "users"
        ));

        config.tables[0] = table("session", false, &["ipCountry"]);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_reject_policy_flags_literals() {
        let mut config = PluginConfig::new("p");
        let mut pets = table("pet", true, &["ownerId"]);
        pets.fields[0].reference = Some(FieldReference {
            model: "us\"er".to_string(),
            field: "id".to_string(),
            on_delete: OnDelete::Cascade,
        });
        config.tables.push(pets);

        assert!(validate(&config).is_ok());
        assert!(matches!(
            strict(&config),
            Err(GenerateError::UnterminatedLiteral { ref value, .. }) if value == "us\"er"
        ));
    }

    #[test]
    fn test_reject_policy_flags_custom_hook_path() {
        let mut config = PluginConfig::new("p");
        let mut hook = Hook::draft("h1");
        hook.action = HookAction::Custom;
        hook.custom_path = "/a\\b".to_string();
        config.hooks.push(hook);
        assert!(strict(&config).is_err());

        config.hooks[0].matcher = "true".to_string();
        assert!(strict(&config).is_ok());
    }

    #[test]
    fn test_zero_rate_limit() {
        let mut config = PluginConfig::new("p");
        let mut limit = RateLimit::draft("r1");
        limit.path = "/x".to_string();
        limit.window = 0;
        config.rate_limits.push(limit);

        let err = validate(&config).unwrap_err();
        assert_eq!(err.to_string(), "rate limit '/x': window must be greater than zero");

        config.rate_limits[0].path = String::new();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_fragment_checker_is_consulted() {
        let mut config = PluginConfig::new("p");
        let mut hook = Hook::draft("h1");
        hook.name = "Welcome".to_string();
        hook.timing = HookTiming::After;
        hook.logic = "if (x) {".to_string();
        config.hooks.push(hook);

        assert!(validate(&config).is_ok());
        let err = Validator::new(LiteralPolicy::Escape, &BalancedDelimiters)
            .validate(&config)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "after hook 'Welcome' logic: '{' from line 1 is never closed"
        );
    }

    #[test]
    fn test_plugin_name_is_trimmed_before_deriving() {
        let names = validate(&PluginConfig::new("  birthday plugin \t")).unwrap();
        assert_eq!(names.symbol, "birthdayPlugin");
        assert_eq!(names.kebab, "birthday-plugin");
        assert_eq!(names.server_import_path(), "./birthday-plugin");

        let names = validate(&PluginConfig::new(" birthday")).unwrap();
        assert_eq!(names.symbol, "birthday");
        assert_eq!(names.module_dir(), "birthday-plugin");
    }

    #[test]
    fn test_duplicate_table_names() {
        let mut config = PluginConfig::new("p");
        config.tables.push(table("user", false, &["nickname"]));
        config.tables.push(table(" user ", false, &["bio"]));
        let err = validate(&config).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::DuplicateName { ref context, ref name }
                if context == "table" && name == "user"
        ));
        assert_eq!(err.to_string(), "table 'user' is declared more than once");

        config.tables[1].name = String::new();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_duplicate_field_names() {
        let mut config = PluginConfig::new("p");
        config.tables.push(table("user", false, &["nick", "bio", " nick"]));
        assert!(matches!(
            validate(&config),
            Err(GenerateError::DuplicateName { ref context, ref name })
                if context == "field in table 'user'" && name == "nick"
        ));

        config.tables[0] = table("user", false, &["nick"]);
        config.tables.push(table("session", false, &["nick"]));
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_errors_follow_configuration_order() {
        let mut config = PluginConfig::new("p");
        config.tables.push(table("first table", true, &[]));
        config.tables.push(table("users", false, &[]));
        assert!(matches!(validate(&config), Err(GenerateError::InvalidIdentifier { .. })));
    }
}
