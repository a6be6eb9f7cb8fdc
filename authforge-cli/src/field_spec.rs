//! Field definitions given on the command line
//!
//! Format: `<table>.<name>:<type>[:required][:unique][:ref=<model>[.<field>][/<on-delete>]]`
//!
//! ```text
//! userProfile.birthday:date:required
//! pet.ownerId:string:required:ref=user.id/set-null
//! ```

use anyhow::{anyhow, bail, Result};
use authforge::model::{FieldReference, FieldType, OnDelete};

/// A parsed `--field` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Table the field belongs to
    pub table: String,
    /// Field name
    pub name: String,
    /// Column type
    pub field_type: FieldType,
    /// `required` modifier
    pub required: bool,
    /// `unique` modifier
    pub unique: bool,
    /// `ref=` modifier
    pub reference: Option<FieldReference>,
}

impl FieldSpec {
    /// Parse a field definition
    ///
    /// # Errors
    ///
    /// Returns an error if the table, name or type is missing, or a
    /// modifier is unknown.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split(':');
        let target = parts.next().unwrap_or_default().trim();
        let (table, name) = target.split_once('.').ok_or_else(|| {
            anyhow!("Invalid field definition: '{input}'. Expected format: table.name:type[:modifiers]")
        })?;
        let (table, name) = (table.trim(), name.trim());
        if table.is_empty() || name.is_empty() {
            bail!("Invalid field definition: '{input}'. Table and field name cannot be empty");
        }

        let type_str = parts
            .next()
            .map(str::trim)
            .filter(|type_str| !type_str.is_empty())
            .ok_or_else(|| anyhow!("Missing type in field definition: '{input}'"))?;
        let field_type = FieldType::parse(type_str).ok_or_else(|| {
            anyhow!("Unknown field type: '{type_str}'. Valid types: string, number, boolean, date")
        })?;

        let mut spec = Self {
            table: table.to_string(),
            name: name.to_string(),
            field_type,
            required: false,
            unique: false,
            reference: None,
        };

        for modifier in parts.map(str::trim) {
            match modifier.to_lowercase().as_str() {
                "required" => spec.required = true,
                "unique" => spec.unique = true,
                lowered if lowered.starts_with("ref=") => {
                    spec.reference = Some(Self::parse_reference(modifier.get(4..).unwrap_or_default())?);
                }
                _ => bail!(
                    "Unknown modifier: '{modifier}'. Valid modifiers: required, unique, ref=<model>.<field>"
                ),
            }
        }

        Ok(spec)
    }

    fn parse_reference(input: &str) -> Result<FieldReference> {
        let (target, on_delete) = match input.split_once('/') {
            Some((target, policy)) => (
                target,
                OnDelete::parse(policy.trim()).ok_or_else(|| {
                    anyhow!("Unknown on-delete policy: '{policy}'. Valid policies: cascade, set-null, restrict")
                })?,
            ),
            None => (input, OnDelete::Cascade),
        };

        let (model, field) = target.split_once('.').unwrap_or((target, "id"));
        let (model, field) = (model.trim(), field.trim());
        if model.is_empty() || field.is_empty() {
            bail!("Invalid reference: '{input}'. Expected ref=<model>.<field>");
        }

        Ok(FieldReference {
            model: model.to_string(),
            field: field.to_string(),
            on_delete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_field() {
        let spec = FieldSpec::parse("userProfile.birthday:date:required").unwrap();
        assert_eq!(spec.table, "userProfile");
        assert_eq!(spec.name, "birthday");
        assert_eq!(spec.field_type, FieldType::Date);
        assert!(spec.required);
        assert!(!spec.unique);
        assert_eq!(spec.reference, None);
    }

    #[test]
    fn test_parse_reference() {
        let spec = FieldSpec::parse("pet.ownerId:string:ref=user.id/set-null:unique").unwrap();
        assert!(spec.unique);
        assert_eq!(
            spec.reference,
            Some(FieldReference {
                model: "user".to_string(),
                field: "id".to_string(),
                on_delete: OnDelete::SetNull,
            })
        );

        let spec = FieldSpec::parse("pet.ownerId:string:ref=user").unwrap();
        let reference = spec.reference.unwrap();
        assert_eq!(reference.field, "id");
        assert_eq!(reference.on_delete, OnDelete::Cascade);
    }

    #[test]
    fn test_parse_errors() {
        assert!(FieldSpec::parse("birthday:date").is_err());
        assert!(FieldSpec::parse("profile.:date").is_err());
        assert!(FieldSpec::parse("profile.birthday").is_err());
        assert!(FieldSpec::parse("profile.birthday:timestamp").is_err());
        assert!(FieldSpec::parse("profile.birthday:date:indexed").is_err());
        assert!(FieldSpec::parse("pet.ownerId:string:ref=user.id/nullify").is_err());
        assert!(FieldSpec::parse("pet.ownerId:string:ref=").is_err());
    }
}
