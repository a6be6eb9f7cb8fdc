//! Copy-on-write configuration editing
//!
//! [`ConfigEditor`] is the "add / remove / update by id" surface an
//! interactive builder sits on. Every edit produces a new configuration
//! value: a snapshot taken with [`ConfigEditor::snapshot`] is never changed
//! by later edits, so generation can run against it at any time.
//!
//! ```
//! use authforge::editor::{ConfigEditor, FieldPatch, SequentialIds};
//! use authforge::model::FieldType;
//!
//! let mut editor = ConfigEditor::new("birthdayPlugin", SequentialIds::new("e"));
//! let table = editor.add_table(true);
//! let before = editor.snapshot();
//!
//! let field = editor.snapshot().tables[0].fields[0].id.clone();
//! editor
//!     .update_field(&table, &field, FieldPatch {
//!         name: Some("birthday".into()),
//!         field_type: Some(FieldType::Date),
//!         ..FieldPatch::default()
//!     })
//!     .unwrap();
//!
//! assert_eq!(before.tables[0].fields[0].name, "");
//! assert_eq!(editor.snapshot().tables[0].fields[0].name, "birthday");
//! ```

mod ids;

pub use ids::{IdGenerator, RandomIds, SequentialIds};

use std::sync::Arc;

use crate::error::{EditError, EntityKind};
use crate::model::{
    FieldReference, FieldType, Hook, HookAction, HookTiming, Middleware, OutputSelection, PathType,
    PluginConfig, RateLimit, SchemaField, SchemaTable,
};

/// Result of an editor operation
pub type EditResult<T = ()> = std::result::Result<T, EditError>;

/// Changes to a table; `None` leaves an attribute as it is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablePatch {
    /// New table name
    pub name: Option<String>,
    /// Define a new table instead of extending a core table
    pub is_new: Option<bool>,
    /// Set (`Some(Some(_))`) or clear (`Some(None)`) the model override
    #[allow(clippy::option_option)]
    pub model_name: Option<Option<String>>,
    /// Skip migrations for this table
    pub disable_migration: Option<bool>,
}

/// Changes to a field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    /// New field name
    pub name: Option<String>,
    /// New column type
    pub field_type: Option<FieldType>,
    /// Required flag
    pub required: Option<bool>,
    /// Unique flag
    pub unique: Option<bool>,
    /// Set or clear the reference
    #[allow(clippy::option_option)]
    pub reference: Option<Option<FieldReference>>,
}

/// Changes to a hook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookPatch {
    /// Display name
    pub name: Option<String>,
    /// Before or after
    pub timing: Option<HookTiming>,
    /// Lifecycle action
    pub action: Option<HookAction>,
    /// Endpoint for custom hooks
    pub custom_path: Option<String>,
    /// Guard expression
    pub matcher: Option<String>,
    /// Handler body
    pub logic: Option<String>,
}

/// Changes to a middleware
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiddlewarePatch {
    /// Display name
    pub name: Option<String>,
    /// Request path
    pub path: Option<String>,
    /// Exact or prefix match
    pub path_type: Option<PathType>,
    /// Handler body
    pub logic: Option<String>,
}

/// Changes to a rate limit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitPatch {
    /// Display name
    pub name: Option<String>,
    /// Request path
    pub path: Option<String>,
    /// Exact or prefix match
    pub path_type: Option<PathType>,
    /// Request ceiling
    pub limit: Option<u32>,
    /// Window in seconds
    pub window: Option<u32>,
    /// Set or clear the custom key
    #[allow(clippy::option_option)]
    pub key: Option<Option<String>>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl TablePatch {
    fn apply(self, table: &mut SchemaTable) {
        set(&mut table.name, self.name);
        set(&mut table.is_new, self.is_new);
        set(&mut table.model_name, self.model_name);
        set(&mut table.disable_migration, self.disable_migration);
    }
}

impl FieldPatch {
    fn apply(self, field: &mut SchemaField) {
        set(&mut field.name, self.name);
        set(&mut field.field_type, self.field_type);
        set(&mut field.required, self.required);
        set(&mut field.unique, self.unique);
        set(&mut field.reference, self.reference);
    }
}

impl HookPatch {
    fn apply(self, hook: &mut Hook) {
        set(&mut hook.name, self.name);
        set(&mut hook.timing, self.timing);
        set(&mut hook.action, self.action);
        set(&mut hook.custom_path, self.custom_path);
        set(&mut hook.matcher, self.matcher);
        set(&mut hook.logic, self.logic);
    }
}

impl MiddlewarePatch {
    fn apply(self, middleware: &mut Middleware) {
        set(&mut middleware.name, self.name);
        set(&mut middleware.path, self.path);
        set(&mut middleware.path_type, self.path_type);
        set(&mut middleware.logic, self.logic);
    }
}

impl RateLimitPatch {
    fn apply(self, limit: &mut RateLimit) {
        set(&mut limit.name, self.name);
        set(&mut limit.path, self.path);
        set(&mut limit.path_type, self.path_type);
        set(&mut limit.limit, self.limit);
        set(&mut limit.window, self.window);
        set(&mut limit.key, self.key);
    }
}

/// Entities addressed by id
trait Entity {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}

macro_rules! entity {
    ($ty:ty, $kind:expr) => {
        impl Entity for $ty {
            const KIND: EntityKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

entity!(SchemaTable, EntityKind::Table);
entity!(SchemaField, EntityKind::Field);
entity!(Hook, EntityKind::Hook);
entity!(Middleware, EntityKind::Middleware);
entity!(RateLimit, EntityKind::RateLimit);

fn find_mut<'a, T: Entity>(items: &'a mut [T], id: &str) -> EditResult<&'a mut T> {
    items
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| EditError::not_found(T::KIND, id))
}

fn remove<T: Entity>(items: &mut Vec<T>, id: &str) -> EditResult {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| EditError::not_found(T::KIND, id))?;
    items.remove(index);
    Ok(())
}

/// Edits a [`PluginConfig`] by copy-on-write
#[derive(Debug, Clone)]
pub struct ConfigEditor<G = RandomIds> {
    config: Arc<PluginConfig>,
    ids: G,
}

impl<G: IdGenerator> ConfigEditor<G> {
    /// Start from an empty configuration
    #[must_use]
    pub fn new(name: impl Into<String>, ids: G) -> Self {
        Self::from_config(PluginConfig::new(name), ids)
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn from_config(config: PluginConfig, ids: G) -> Self {
        Self {
            config: Arc::new(config),
            ids,
        }
    }

    /// The current configuration, frozen
    #[must_use]
    pub fn snapshot(&self) -> Arc<PluginConfig> {
        Arc::clone(&self.config)
    }

    /// Borrow the current configuration
    #[must_use]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Take the current configuration
    #[must_use]
    pub fn into_config(self) -> PluginConfig {
        Arc::unwrap_or_clone(self.config)
    }

    fn edit(&mut self) -> &mut PluginConfig {
        Arc::make_mut(&mut self.config)
    }

    /// Rename the plugin
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.edit().name = name.into();
    }

    /// Replace the description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.edit().description = description.into();
    }

    /// Replace the output selection
    pub fn set_outputs(&mut self, outputs: OutputSelection) {
        self.edit().outputs = outputs;
    }

    /// Append a table with one blank field and return its id
    pub fn add_table(&mut self, is_new: bool) -> String {
        let id = self.ids.next_id();
        let field_id = self.ids.next_id();
        self.edit()
            .tables
            .push(SchemaTable::draft(id.clone(), is_new, field_id));
        id
    }

    /// Remove a table
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if no table has this id.
    pub fn remove_table(&mut self, id: &str) -> EditResult {
        remove(&mut self.edit().tables, id)
    }

    /// Patch a table
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if no table has this id.
    pub fn update_table(&mut self, id: &str, patch: TablePatch) -> EditResult {
        patch.apply(find_mut(&mut self.edit().tables, id)?);
        Ok(())
    }

    /// Append a blank field to a table and return its id
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if no table has this id.
    pub fn add_field(&mut self, table_id: &str) -> EditResult<String> {
        let id = self.ids.next_id();
        find_mut(&mut self.edit().tables, table_id)?
            .fields
            .push(SchemaField::draft(id.clone()));
        Ok(id)
    }

    /// Remove a field from a table
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if the table or the field is missing.
    pub fn remove_field(&mut self, table_id: &str, field_id: &str) -> EditResult {
        remove(&mut find_mut(&mut self.edit().tables, table_id)?.fields, field_id)
    }

    /// Patch a field
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if the table or the field is missing.
    pub fn update_field(&mut self, table_id: &str, field_id: &str, patch: FieldPatch) -> EditResult {
        let table = find_mut(&mut self.edit().tables, table_id)?;
        patch.apply(find_mut(&mut table.fields, field_id)?);
        Ok(())
    }

    /// Append a default hook and return its id
    pub fn add_hook(&mut self) -> String {
        let id = self.ids.next_id();
        self.edit().hooks.push(Hook::draft(id.clone()));
        id
    }

    /// Remove a hook
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if no hook has this id.
    pub fn remove_hook(&mut self, id: &str) -> EditResult {
        remove(&mut self.edit().hooks, id)
    }

    /// Patch a hook
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if no hook has this id.
    pub fn update_hook(&mut self, id: &str, patch: HookPatch) -> EditResult {
        patch.apply(find_mut(&mut self.edit().hooks, id)?);
        Ok(())
    }

    /// Append a default middleware and return its id
    pub fn add_middleware(&mut self) -> String {
        let id = self.ids.next_id();
        self.edit().middlewares.push(Middleware::draft(id.clone()));
        id
    }

    /// Remove a middleware
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if no middleware has this id.
    pub fn remove_middleware(&mut self, id: &str) -> EditResult {
        remove(&mut self.edit().middlewares, id)
    }

    /// Patch a middleware
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if no middleware has this id.
    pub fn update_middleware(&mut self, id: &str, patch: MiddlewarePatch) -> EditResult {
        patch.apply(find_mut(&mut self.edit().middlewares, id)?);
        Ok(())
    }

    /// Append a default rate limit and return its id
    pub fn add_rate_limit(&mut self) -> String {
        let id = self.ids.next_id();
        self.edit().rate_limits.push(RateLimit::draft(id.clone()));
        id
    }

    /// Remove a rate limit
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if no rate limit has this id.
    pub fn remove_rate_limit(&mut self, id: &str) -> EditResult {
        remove(&mut self.edit().rate_limits, id)
    }

    /// Patch a rate limit
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if no rate limit has this id.
    pub fn update_rate_limit(&mut self, id: &str, patch: RateLimitPatch) -> EditResult {
        patch.apply(find_mut(&mut self.edit().rate_limits, id)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OnDelete, STARTER_LOGIC};

    fn editor() -> ConfigEditor<SequentialIds> {
        ConfigEditor::new("birthdayPlugin", SequentialIds::new("e"))
    }

    #[test]
    fn test_add_table_defaults() {
        let mut editor = editor();
        let extended = editor.add_table(false);
        let created = editor.add_table(true);

        let config = editor.config();
        assert_eq!(extended, "e1");
        assert_eq!(created, "e3");
        assert_eq!(config.tables[0].name, "user");
        assert!(!config.tables[0].is_new);
        assert_eq!(config.tables[1].name, "");
        assert_eq!(config.tables[1].fields.len(), 1);
        assert_eq!(config.tables[1].fields[0].id, "e4");
        assert_eq!(config.tables[1].fields[0].field_type, FieldType::String);
    }

    #[test]
    fn test_snapshots_are_not_changed_by_edits() {
        let mut editor = editor();
        let hook = editor.add_hook();
        let snapshot = editor.snapshot();

        editor
            .update_hook(&hook, HookPatch {
                name: Some("Welcome".to_string()),
                ..HookPatch::default()
            })
            .unwrap();
        editor.set_name("renamed");

        assert_eq!(snapshot.name, "birthdayPlugin");
        assert_eq!(snapshot.hooks[0].name, "");
        assert_eq!(snapshot.hooks[0].logic, STARTER_LOGIC);
        assert_eq!(editor.config().hooks[0].name, "Welcome");
    }

    #[test]
    fn test_patch_only_touches_given_attributes() {
        let mut editor = editor();
        let table = editor.add_table(true);
        let field = editor.add_field(&table).unwrap();
        editor
            .update_field(&table, &field, FieldPatch {
                name: Some("ownerId".to_string()),
                reference: Some(Some(FieldReference {
                    model: "user".to_string(),
                    field: "id".to_string(),
                    on_delete: OnDelete::Cascade,
                })),
                ..FieldPatch::default()
            })
            .unwrap();
        editor
            .update_field(&table, &field, FieldPatch {
                required: Some(true),
                ..FieldPatch::default()
            })
            .unwrap();

        let updated = &editor.config().tables[0].fields[1];
        assert_eq!(updated.name, "ownerId");
        assert!(updated.required);
        assert!(updated.reference.is_some());

        editor
            .update_field(&table, &field, FieldPatch {
                reference: Some(None),
                ..FieldPatch::default()
            })
            .unwrap();
        assert!(editor.config().tables[0].fields[1].reference.is_none());
    }

    #[test]
    fn test_unknown_ids_are_reported() {
        let mut editor = editor();
        assert_eq!(
            editor.remove_hook("missing"),
            Err(EditError::NotFound {
                kind: EntityKind::Hook,
                id: "missing".to_string(),
            })
        );

        let table = editor.add_table(true);
        let err = editor.remove_field(&table, "nope").unwrap_err();
        assert_eq!(err.to_string(), "no field with id 'nope'");

        let err = editor
            .update_rate_limit("r9", RateLimitPatch::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "no rate limit with id 'r9'");
        assert!(editor.add_field("nope").is_err());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut editor = editor();
        let first = editor.add_middleware();
        let second = editor.add_middleware();
        let third = editor.add_middleware();

        editor.remove_middleware(&second).unwrap();
        let ids: Vec<&str> = editor.config().middlewares.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, [first.as_str(), third.as_str()]);
    }

    #[test]
    fn test_rate_limit_patch() {
        let mut editor = editor();
        let limit = editor.add_rate_limit();
        editor
            .update_rate_limit(&limit, RateLimitPatch {
                path: Some("/api".to_string()),
                path_type: Some(PathType::Pattern),
                limit: Some(100),
                key: Some(Some("ip".to_string())),
                ..RateLimitPatch::default()
            })
            .unwrap();

        let updated = &editor.config().rate_limits[0];
        assert_eq!(updated.path, "/api");
        assert_eq!(updated.limit, 100);
        assert_eq!(updated.window, RateLimit::DEFAULT_WINDOW);
        assert_eq!(updated.custom_key(), Some("ip"));
    }

    #[test]
    fn test_into_config_while_snapshot_is_held() {
        let mut editor = editor();
        editor.set_description("Tracks birthdays");
        let snapshot = editor.snapshot();
        let config = editor.into_config();
        assert_eq!(config, *snapshot);
    }
}
