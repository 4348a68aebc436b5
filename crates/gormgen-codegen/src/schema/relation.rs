use super::{
    BelongsTo, FieldOptions, HasMany, HasOne, ManyToMany, RelationAttr, Scope,
};

use gormgen_core::{
    descriptor::{FieldDescriptor, MessageDescriptor},
    Error, Result,
};

/// A resolved relationship. Every name is concrete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    BelongsTo(BelongsTo),
    HasOne(HasOne),
    HasMany(HasMany),
    ManyToMany(ManyToMany),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    BelongsTo,
    HasOne,
    HasMany,
    ManyToMany,
}

impl Relation {
    /// Resolves the relationship declared on `field`, if any.
    pub(crate) fn resolve(
        scope: &Scope<'_>,
        message: &MessageDescriptor,
        field: &FieldDescriptor,
        options: &FieldOptions,
    ) -> Result<Option<Relation>> {
        let Some(attr) = &options.relation else {
            return Ok(None);
        };

        let kind = attr.kind();
        let invalid = |reason: String| Error::invalid_relation(&message.name, &field.name, reason);

        if !field.is_message() {
            return Err(invalid(format!(
                "`{}` declared on a field of kind `{}`; relationships require a message field",
                kind.option_name(),
                field.kind
            )));
        }

        if field.is_timestamp() || field.is_struct() {
            return Err(invalid(format!(
                "`{}` declared on well-known type `{}`",
                kind.option_name(),
                field.type_name.as_deref().unwrap_or_default()
            )));
        }

        if kind.is_repeated() != field.repeated {
            let expected = if kind.is_repeated() {
                "a repeated"
            } else {
                "a singular"
            };

            return Err(invalid(format!(
                "`{}` requires {expected} field",
                kind.option_name()
            )));
        }

        let type_name = field.type_name.as_deref().unwrap_or_default();
        let Some(target) = scope.message(type_name) else {
            return Err(invalid(format!(
                "related message `{type_name}` is not declared in this file"
            )));
        };

        if !scope.is_ormable(&target.name) {
            return Err(invalid(format!(
                "related message `{}` is not ormable",
                target.name
            )));
        }

        let relation = match attr {
            RelationAttr::BelongsTo(attr) => Relation::BelongsTo(BelongsTo::new(target, attr)),
            RelationAttr::HasOne(attr) => {
                let has_one = HasOne::new(message, target, attr);
                warn_missing_foreign_key(scope, message, field, target, &has_one.foreign_key);
                Relation::HasOne(has_one)
            }
            RelationAttr::HasMany(attr) => {
                let has_many = HasMany::new(message, target, attr);
                warn_missing_foreign_key(scope, message, field, target, &has_many.foreign_key);
                Relation::HasMany(has_many)
            }
            RelationAttr::ManyToMany(attr) => {
                Relation::ManyToMany(ManyToMany::new(message, field, target, attr)?)
            }
        };

        log::debug!(
            "{}.{}: {:?} -> {}",
            message.name,
            field.name,
            kind,
            relation.target()
        );

        Ok(Some(relation))
    }

    pub fn kind(&self) -> RelationKind {
        match self {
            Relation::BelongsTo(_) => RelationKind::BelongsTo,
            Relation::HasOne(_) => RelationKind::HasOne,
            Relation::HasMany(_) => RelationKind::HasMany,
            Relation::ManyToMany(_) => RelationKind::ManyToMany,
        }
    }

    /// Name of the related message.
    pub fn target(&self) -> &str {
        match self {
            Relation::BelongsTo(rel) => &rel.target,
            Relation::HasOne(rel) => &rel.target,
            Relation::HasMany(rel) => &rel.target,
            Relation::ManyToMany(rel) => &rel.target,
        }
    }

    /// The gorm directives wiring the relation.
    pub fn tag(&self) -> String {
        match self {
            Relation::BelongsTo(rel) => rel.tag(),
            Relation::HasOne(rel) => rel.tag(),
            Relation::HasMany(rel) => rel.tag(),
            Relation::ManyToMany(rel) => rel.tag(),
        }
    }

    /// True for relations that are only written through an explicit
    /// association replace.
    pub fn needs_replace(&self) -> bool {
        self.kind().needs_replace()
    }

    pub fn as_belongs_to(&self) -> Option<&BelongsTo> {
        match self {
            Relation::BelongsTo(rel) => Some(rel),
            _ => None,
        }
    }

    pub fn as_many_to_many(&self) -> Option<&ManyToMany> {
        match self {
            Relation::ManyToMany(rel) => Some(rel),
            _ => None,
        }
    }
}

impl RelationKind {
    pub fn option_name(self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongs_to",
            RelationKind::HasOne => "has_one",
            RelationKind::HasMany => "has_many",
            RelationKind::ManyToMany => "many_to_many",
        }
    }

    pub fn from_option_name(name: &str) -> Option<RelationKind> {
        Some(match name {
            "belongs_to" => RelationKind::BelongsTo,
            "has_one" => RelationKind::HasOne,
            "has_many" => RelationKind::HasMany,
            "many_to_many" => RelationKind::ManyToMany,
            _ => return None,
        })
    }

    pub fn is_repeated(self) -> bool {
        matches!(self, RelationKind::HasMany | RelationKind::ManyToMany)
    }

    pub fn needs_replace(self) -> bool {
        !matches!(self, RelationKind::BelongsTo)
    }
}

fn warn_missing_foreign_key(
    scope: &Scope<'_>,
    message: &MessageDescriptor,
    field: &FieldDescriptor,
    target: &MessageDescriptor,
    foreign_key: &str,
) {
    if target.field_by_go_name(foreign_key).is_none() {
        warn_unless_quiet!(
            scope.config,
            "{}.{}: related message `{}` has no `{}` field; the column must exist in its table",
            message.name,
            field.name,
            target.name,
            foreign_key
        );
    }
}
