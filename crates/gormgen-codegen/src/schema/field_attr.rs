use super::RelationKind;

use gormgen_core::{
    descriptor::{FieldDescriptor, MessageDescriptor, OptionValue, Options},
    Error, Result,
};

/// Declared storage intent of a field.
///
/// Defaults that depend only on the field itself are filled in here, once.
/// Later stages read these values and never re-derive them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// Exclude the field from storage
    pub ignore: bool,

    /// At most one relationship declaration
    pub relation: Option<RelationAttr>,

    /// Per-field override of the global enum storage default
    pub enum_as_string: Option<bool>,

    /// Referential actions of the relation's foreign key constraint
    pub cascade: Cascade,

    /// Store the timestamp as text in this Go layout
    pub time_format_override: Option<String>,

    /// Store the field as a JSON document
    pub jsonb: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationAttr {
    BelongsTo(BelongsToAttr),
    HasOne(ForeignKeyAttr),
    HasMany(ForeignKeyAttr),
    ManyToMany(ManyToManyAttr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BelongsToAttr {
    /// Field on this message holding the key; `<FieldName>Id` when unset
    pub foreign_key: String,

    /// Field on the related message the key points at
    pub references: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKeyAttr {
    pub foreign_key: Option<String>,
    pub references: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManyToManyAttr {
    pub join_table: Option<String>,
    pub foreign_key: Option<String>,
    pub references: Option<String>,
    pub join_foreign_key: Option<String>,
    pub join_references: Option<String>,
}

/// `ON UPDATE` / `ON DELETE` actions, normalized to upper case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cascade {
    pub on_update: Option<String>,
    pub on_delete: Option<String>,
}

const REFERENTIAL_ACTIONS: &[&str] = &["CASCADE", "SET NULL", "SET DEFAULT", "RESTRICT", "NO ACTION"];

impl FieldOptions {
    /// Reads the field-level options.
    ///
    /// Fails when an option has the wrong type, when more than one
    /// relationship kind is declared, or when cascade actions appear on a
    /// field without a relationship.
    pub fn resolve(message: &MessageDescriptor, field: &FieldDescriptor) -> Result<FieldOptions> {
        let cx = OptionCx { message, field };
        let mut options = FieldOptions::default();

        for (key, value) in field.options.iter() {
            if let Some(kind) = RelationKind::from_option_name(key) {
                if let Some(existing) = &options.relation {
                    return Err(Error::invalid_relation(
                        &message.name,
                        &field.name,
                        format!(
                            "field declares both `{}` and `{key}`; at most one relationship is allowed",
                            existing.kind().option_name()
                        ),
                    ));
                }

                options.relation = Some(RelationAttr::from_option(&cx, kind, value)?);
                continue;
            }

            match key {
                "ignore" => options.ignore = cx.bool(key, value)?,
                "enum_as_string" => options.enum_as_string = Some(cx.bool(key, value)?),
                "jsonb" => options.jsonb = cx.bool(key, value)?,
                "time_format_override" => {
                    options.time_format_override = cx.non_empty_str(key, value)?;
                }
                "on_update" => options.cascade.on_update = cx.referential_action(key, value)?,
                "on_delete" => options.cascade.on_delete = cx.referential_action(key, value)?,
                _ => {
                    log::debug!(
                        "ignoring option `{key}` on field `{}.{}`",
                        message.name,
                        field.name
                    );
                }
            }
        }

        if !options.cascade.is_empty() && options.relation.is_none() {
            let option = if options.cascade.on_update.is_some() {
                "on_update"
            } else {
                "on_delete"
            };

            return Err(Error::invalid_option(
                &message.name,
                Some(field.name.as_str()),
                option,
                "referential actions require a relationship declaration",
            ));
        }

        Ok(options)
    }
}

impl RelationAttr {
    fn from_option(cx: &OptionCx<'_>, kind: RelationKind, value: &OptionValue) -> Result<RelationAttr> {
        let key = kind.option_name();
        let Some(nested) = value.as_message() else {
            return Err(cx.invalid(
                key,
                format!("expected message, found {}", value.type_name()),
            ));
        };

        let allowed: &[&str] = match kind {
            RelationKind::ManyToMany => &[
                "join_table",
                "foreign_key",
                "references",
                "association_foreign_key",
                "join_foreign_key",
                "join_references",
            ],
            _ => &["foreign_key", "references", "association_foreign_key"],
        };

        for (sub_key, _) in nested.iter() {
            if !allowed.contains(&sub_key) {
                return Err(cx.invalid(
                    &format!("{key}.{sub_key}"),
                    format!("unknown option; expected one of {}", allowed.join(", ")),
                ));
            }
        }

        let foreign_key = cx.sub_str(key, nested, "foreign_key")?;
        let references = match cx.sub_str(key, nested, "references")? {
            Some(references) => Some(references),
            None => cx.sub_str(key, nested, "association_foreign_key")?,
        };

        Ok(match kind {
            RelationKind::BelongsTo => RelationAttr::BelongsTo(BelongsToAttr {
                foreign_key: foreign_key.unwrap_or_else(|| format!("{}Id", cx.field.go_name())),
                references,
            }),
            RelationKind::HasOne => RelationAttr::HasOne(ForeignKeyAttr {
                foreign_key,
                references,
            }),
            RelationKind::HasMany => RelationAttr::HasMany(ForeignKeyAttr {
                foreign_key,
                references,
            }),
            RelationKind::ManyToMany => RelationAttr::ManyToMany(ManyToManyAttr {
                join_table: cx.sub_str(key, nested, "join_table")?,
                foreign_key,
                references,
                join_foreign_key: cx.sub_str(key, nested, "join_foreign_key")?,
                join_references: cx.sub_str(key, nested, "join_references")?,
            }),
        })
    }

    pub fn kind(&self) -> RelationKind {
        match self {
            RelationAttr::BelongsTo(_) => RelationKind::BelongsTo,
            RelationAttr::HasOne(_) => RelationKind::HasOne,
            RelationAttr::HasMany(_) => RelationKind::HasMany,
            RelationAttr::ManyToMany(_) => RelationKind::ManyToMany,
        }
    }
}

impl Cascade {
    pub fn is_empty(&self) -> bool {
        self.on_update.is_none() && self.on_delete.is_none()
    }
}

/// The field being resolved, for error reporting.
struct OptionCx<'a> {
    message: &'a MessageDescriptor,
    field: &'a FieldDescriptor,
}

impl OptionCx<'_> {
    fn invalid(&self, option: &str, reason: impl Into<String>) -> Error {
        Error::invalid_option(&self.message.name, Some(self.field.name.as_str()), option, reason)
    }

    fn bool(&self, key: &str, value: &OptionValue) -> Result<bool> {
        value
            .as_bool()
            .ok_or_else(|| self.invalid(key, format!("expected bool, found {}", value.type_name())))
    }

    /// Empty strings count as unset.
    fn non_empty_str(&self, key: &str, value: &OptionValue) -> Result<Option<String>> {
        let value = value.as_str().ok_or_else(|| {
            self.invalid(key, format!("expected string, found {}", value.type_name()))
        })?;

        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    fn sub_str(&self, key: &str, nested: &Options, sub_key: &str) -> Result<Option<String>> {
        match nested.get(sub_key) {
            Some(value) => self.non_empty_str(&format!("{key}.{sub_key}"), value),
            None => Ok(None),
        }
    }

    fn referential_action(&self, key: &str, value: &OptionValue) -> Result<Option<String>> {
        let Some(action) = self.non_empty_str(key, value)? else {
            return Ok(None);
        };

        let action = action.trim().to_ascii_uppercase();

        if !REFERENTIAL_ACTIONS.contains(&action.as_str()) {
            return Err(self.invalid(
                key,
                format!(
                    "unknown referential action `{action}`; expected one of {}",
                    REFERENTIAL_ACTIONS.join(", ")
                ),
            ));
        }

        Ok(Some(action))
    }
}
