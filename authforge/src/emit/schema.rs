//! Schema section: tables and their field descriptors

use crate::codegen::{Expr, ObjectLit};
use crate::model::{SchemaField, SchemaTable};

/// Render the `schema` section, or `None` when no table is emitted
///
/// Tables and fields keep their configured order. Unnamed fields are
/// dropped; a table whose fields were all dropped still renders with an
/// empty `fields` block.
#[must_use]
pub fn schema_section(tables: &[SchemaTable]) -> Option<Expr> {
    let schema = tables
        .iter()
        .filter(|table| table.is_named())
        .fold(ObjectLit::new(), |schema, table| {
            schema.prop(table.name.trim(), table_entry(table))
        });
    (!schema.is_empty()).then(|| schema.into())
}

fn table_entry(table: &SchemaTable) -> ObjectLit {
    let fields = table
        .named_fields()
        .fold(ObjectLit::new(), |fields, field| {
            fields.prop(field.name.trim(), field_descriptor(field))
        });

    ObjectLit::new()
        .prop("fields", fields)
        .prop_opt("modelName", table.model_override().map(Expr::str))
        .prop_opt(
            "disableMigration",
            table.disable_migration.then_some(Expr::Bool(true)),
        )
}

fn field_descriptor(field: &SchemaField) -> ObjectLit {
    let reference = field.reference.as_ref().map_or(Expr::Null, |reference| {
        ObjectLit::new()
            .prop("model", Expr::str(&reference.model))
            .prop("field", Expr::str(&reference.field))
            .prop("onDelete", Expr::str(reference.on_delete.as_str()))
            .into()
    });

    ObjectLit::new()
        .prop("type", Expr::str(field.field_type.as_str()))
        .prop("required", Expr::Bool(field.required))
        .prop("unique", Expr::Bool(field.unique))
        .prop("reference", reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Emitter;
    use crate::model::{FieldReference, FieldType, OnDelete};
    use pretty_assertions::assert_eq;

    fn field(id: &str, name: &str, field_type: FieldType) -> SchemaField {
        SchemaField {
            name: name.to_string(),
            field_type,
            ..SchemaField::draft(id)
        }
    }

    fn table(name: &str, fields: Vec<SchemaField>) -> SchemaTable {
        SchemaTable {
            name: name.to_string(),
            fields,
            ..SchemaTable::draft("t", true, "unused")
        }
    }

    #[test]
    fn test_empty_tables_omit_section() {
        assert_eq!(schema_section(&[]), None);
    }

    #[test]
    fn test_field_descriptor_layout() {
        let mut birthday = field("f1", "birthday", FieldType::Date);
        birthday.required = true;
        let rendered = Emitter::render(&schema_section(&[table("userProfile", vec![birthday])]).unwrap(), 2);

        assert_eq!(
            rendered,
            r#"{
      userProfile: {
        fields: {
          birthday: {
            type: "date",
            required: true,
            unique: false,
            reference: null,
          },
        },
      },
    }"#
        );
    }

    #[test]
    fn test_reference_and_table_options() {
        let mut owner = field("f1", "ownerId", FieldType::String);
        owner.reference = Some(FieldReference {
            model: "user".to_string(),
            field: "id".to_string(),
            on_delete: OnDelete::SetNull,
        });
        let mut pets = table("pet", vec![owner]);
        pets.model_name = Some("pets".to_string());
        pets.disable_migration = true;

        let rendered = Emitter::render(&schema_section(&[pets]).unwrap(), 0);
        assert!(rendered.contains(
            "reference: {\n          model: \"user\",\n          field: \"id\",\n          onDelete: \"set null\",\n        },"
        ));
        assert!(rendered.contains("modelName: \"pets\","));
        assert!(rendered.contains("disableMigration: true,"));
    }

    #[test]
    fn test_unnamed_fields_are_dropped_but_table_stays() {
        let rendered = Emitter::render(
            &schema_section(&[table("audit", vec![field("f1", "  ", FieldType::String)])]).unwrap(),
            0,
        );
        assert_eq!(rendered, "{\n  audit: {\n    fields: {},\n  },\n}");
    }

    #[test]
    fn test_order_is_preserved() {
        let tables = [
            table("alpha", vec![field("a1", "f1", FieldType::Number), field("a2", "f2", FieldType::Boolean)]),
            table("beta", vec![field("b1", "f1", FieldType::Number), field("b2", "f2", FieldType::Boolean)]),
        ];
        let rendered = Emitter::render(&schema_section(&tables).unwrap(), 0);

        let alpha = rendered.find("alpha:").unwrap();
        let beta = rendered.find("beta:").unwrap();
        assert!(alpha < beta);

        let alpha_block = &rendered[alpha..beta];
        assert!(alpha_block.find("f1:").unwrap() < alpha_block.find("f2:").unwrap());
    }
}
