use super::{
    field::{is_key_compatible, is_primary_key},
    FieldOptions, MessageOptions, ModelField, Name, Relation, Scope,
};

use gormgen_core::{descriptor::MessageDescriptor, Error, Result};
use std::collections::{HashMap, HashSet};
use std_util::str;

/// The storage binding of one ormable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Generated identifiers
    pub name: Name,

    /// Database table name
    pub table_name: String,

    /// Stored fields, in declaration order
    pub fields: Vec<ModelField>,

    pub primary_key: PrimaryKey,

    /// True if any field is a has-one, has-many or many-to-many relation.
    /// Those are only written through an explicit association replace.
    pub has_replace_relationships: bool,

    /// Go names of the relation fields, excluded from upserts
    pub omit: Vec<String>,

    /// Leading comments of the message
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Go name of the `id` field
    pub go_name: String,

    /// True when the wire field is `optional string`, so a `*string`
    pub optional: bool,
}

impl Model {
    /// Builds the model of `message`, or `None` when it is not ormable.
    pub(crate) fn from_descriptor(
        scope: &Scope<'_>,
        message: &MessageDescriptor,
    ) -> Result<Option<Model>> {
        let options = MessageOptions::resolve(message)?;

        if !options.ormable {
            log::debug!("skipping message `{}`: not ormable", message.name);
            return Ok(None);
        }

        let field_options = message
            .fields
            .iter()
            .map(|field| FieldOptions::resolve(message, field))
            .collect::<Result<Vec<_>>>()?;

        let primary_key = message
            .fields
            .iter()
            .zip(&field_options)
            .find(|(field, options)| is_primary_key(field) && !options.ignore)
            .filter(|(field, options)| is_key_compatible(field) && !options.jsonb)
            .map(|(field, _)| PrimaryKey {
                go_name: field.go_name(),
                optional: field.optional,
            })
            .ok_or_else(|| Error::missing_primary_key(&message.name))?;

        let mut fields = vec![];
        let mut shadows = HashSet::new();
        let mut join_tables = HashMap::new();
        let mut omit = vec![];
        let mut has_replace_relationships = false;

        for (field, options) in message.fields.iter().zip(&field_options) {
            if options.ignore {
                log::debug!("{}.{}: ignored", message.name, field.name);
                continue;
            }

            let mut model_field = ModelField::from_descriptor(scope, message, field, options)?;

            if let Some(belongs_to) = model_field.relation.as_ref().and_then(Relation::as_belongs_to) {
                let fk = &belongs_to.foreign_key;

                // Only stored siblings count; an ignored field never becomes a column.
                let existing = message
                    .fields
                    .iter()
                    .zip(&field_options)
                    .find(|(sibling, options)| !options.ignore && sibling.go_name() == *fk);

                match existing {
                    Some((sibling, options)) if is_key_compatible(sibling) && !options.jsonb => {}
                    Some(_) => {
                        return Err(Error::naming_collision(
                            &message.name,
                            &field.name,
                            format!(
                                "foreign key `{fk}` is already declared with an incompatible type"
                            ),
                        ));
                    }
                    None if !shadows.insert(fk.clone()) => {
                        return Err(Error::naming_collision(
                            &message.name,
                            &field.name,
                            format!("foreign key `{fk}` is already generated for another relation"),
                        ));
                    }
                    None => model_field.generate_shadow_id_field = true,
                }
            }

            let many_to_many = model_field.relation.as_ref().and_then(Relation::as_many_to_many);

            if let Some(many_to_many) = many_to_many {
                let join_table = &many_to_many.join_table;

                if let Some(other) = join_tables.insert(join_table.clone(), field.name.as_str()) {
                    return Err(Error::naming_collision(
                        &message.name,
                        &field.name,
                        format!(
                            "join table `{join_table}` is already used by `{other}`; set `join_table`"
                        ),
                    ));
                }
            }

            if let Some(relation) = &model_field.relation {
                has_replace_relationships |= relation.needs_replace();
                omit.push(model_field.go_name.clone());
            }

            fields.push(model_field);
        }

        let table_name = options
            .table
            .unwrap_or_else(|| str::table_name(&message.name));

        log::info!(
            "model `{}` -> table `{table_name}` ({} fields)",
            message.name,
            fields.len()
        );

        Ok(Some(Model {
            name: Name::new(&message.name),
            table_name,
            fields,
            primary_key,
            has_replace_relationships,
            omit,
            comments: message.comments.clone(),
        }))
    }

    pub fn field(&self, go_name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|field| field.go_name == go_name)
    }
}
