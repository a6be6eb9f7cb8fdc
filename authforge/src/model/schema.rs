//! Schema tables and fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Text column
    #[default]
    String,
    /// Numeric column
    Number,
    /// Boolean column
    Boolean,
    /// Date/time column
    Date,
}

impl FieldType {
    /// Name used in the generated schema descriptor
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }

    /// Parse a type name as written on the command line
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "string" | "text" => Some(Self::String),
            "number" | "int" | "integer" => Some(Self::Number),
            "boolean" | "bool" => Some(Self::Boolean),
            "date" | "datetime" => Some(Self::Date),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deletion policy of a field reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OnDelete {
    /// Delete referencing rows
    #[default]
    #[serde(rename = "cascade")]
    Cascade,
    /// Null out the referencing column
    #[serde(rename = "set null")]
    SetNull,
    /// Refuse the delete
    #[serde(rename = "restrict")]
    Restrict,
}

impl OnDelete {
    /// Policy name used in the generated schema descriptor
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cascade => "cascade",
            Self::SetNull => "set null",
            Self::Restrict => "restrict",
        }
    }

    /// Parse a policy name, accepting `set-null` and `set_null` spellings
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "cascade" => Some(Self::Cascade),
            "set null" => Some(Self::SetNull),
            "restrict" => Some(Self::Restrict),
            _ => None,
        }
    }
}

/// Foreign-key-like link from a field to another table's field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    /// Referenced model
    pub model: String,
    /// Referenced field on that model
    pub field: String,
    /// What happens when the referenced row is deleted
    pub on_delete: OnDelete,
}

/// A single column of a schema table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    /// Caller-assigned id, unique within the configuration
    pub id: String,
    /// Column name; blank fields are drafts and are not emitted
    pub name: String,
    /// Column type
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Whether a value is required
    #[serde(default)]
    pub required: bool,
    /// Whether values must be unique
    #[serde(default)]
    pub unique: bool,
    /// Optional reference to another table's field
    #[serde(default)]
    pub reference: Option<FieldReference>,
}

impl SchemaField {
    /// A blank field as created by "add field"
    #[must_use]
    pub fn draft(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            field_type: FieldType::String,
            required: false,
            unique: false,
            reference: None,
        }
    }

    /// Whether the field carries a name and will be emitted
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// The four tables every Better Auth installation already has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreTable {
    /// `user`
    User,
    /// `session`
    Session,
    /// `account`
    Account,
    /// `verification`
    Verification,
}

impl CoreTable {
    /// All core tables in their canonical order
    pub const ALL: [Self; 4] = [Self::User, Self::Session, Self::Account, Self::Verification];

    /// Table name as used in the schema
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Session => "session",
            Self::Account => "account",
            Self::Verification => "verification",
        }
    }

    /// Look up a core table by name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|table| table.as_str() == name)
    }
}

/// A table defined or extended by the plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaTable {
    /// Caller-assigned id, unique within the configuration
    pub id: String,
    /// Schema key of the table
    pub name: String,
    /// `true` defines a new table, `false` extends a [`CoreTable`]
    pub is_new: bool,
    /// Optional rename of the underlying model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Skip migrations for this table
    #[serde(default)]
    pub disable_migration: bool,
    /// Columns in declaration order
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

impl SchemaTable {
    /// A table as created by "add table", holding one draft field
    #[must_use]
    pub fn draft(id: impl Into<String>, is_new: bool, field_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: if is_new {
                String::new()
            } else {
                CoreTable::User.as_str().to_string()
            },
            is_new,
            model_name: None,
            disable_migration: false,
            fields: vec![SchemaField::draft(field_id)],
        }
    }

    /// Whether the table carries a name and will be emitted
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Fields that will be emitted, in declaration order
    pub fn named_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|field| field.is_named())
    }

    /// The model rename, if it is set and differs from the table name
    #[must_use]
    pub fn model_override(&self) -> Option<&str> {
        self.model_name
            .as_deref()
            .filter(|model| !model.is_empty() && *model != self.name.trim())
    }
}
