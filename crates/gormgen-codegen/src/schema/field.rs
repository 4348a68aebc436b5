use super::{project, BelongsTo, FieldOptions, FieldTy, Relation, Scope, Tag};

use gormgen_core::{
    descriptor::{FieldDescriptor, FieldKind, MessageDescriptor},
    Result,
};

/// A stored field of a [`Model`](super::Model).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelField {
    /// Proto field name
    pub name: String,

    /// Go field name, shared by the wire message and the record
    pub go_name: String,

    /// JSON name used in the record's `json` tag
    pub json_name: String,

    /// Storage projection
    pub ty: FieldTy,

    /// Go type of the record field
    pub go_type: String,

    /// `gorm` tag directives
    pub tag: Tag,

    /// Resolved relationship, if the field declares one
    pub relation: Option<Relation>,

    pub repeated: bool,

    /// Proto3 `optional` (explicit presence)
    pub optional: bool,

    /// True for the `id` field
    pub primary_key: bool,

    /// A `BelongsTo` field whose key field is missing from the message. The
    /// key is generated right before the relation field.
    pub generate_shadow_id_field: bool,

    /// Leading comments, copied onto the record field
    pub comments: Option<String>,
}

impl ModelField {
    pub(super) fn from_descriptor(
        scope: &Scope<'_>,
        message: &MessageDescriptor,
        field: &FieldDescriptor,
        options: &FieldOptions,
    ) -> Result<ModelField> {
        let relation = Relation::resolve(scope, message, field, options)?;
        let projection = project(
            scope.file,
            message,
            field,
            options,
            relation.as_ref(),
            scope.config,
        )?;

        if let (FieldTy::Message(ty), None) = (&projection.ty, &relation) {
            warn_unless_quiet!(
                scope.config,
                "{}.{}: `{}` has no relationship declared and is stored as a json document",
                message.name,
                field.name,
                ty.ident
            );
        }

        let primary_key = is_primary_key(field);
        let tag = Tag {
            primary_key,
            column: projection.column,
            relation: relation.as_ref().map(Relation::tag),
            cascade: Tag::cascade(&options.cascade),
        };

        log::debug!(
            "{}.{}: {} `{}`",
            message.name,
            field.name,
            projection.go_type,
            tag
        );

        Ok(ModelField {
            name: field.name.clone(),
            go_name: field.go_name(),
            json_name: field.json_name(),
            ty: projection.ty,
            go_type: projection.go_type,
            tag,
            relation,
            repeated: field.repeated,
            optional: field.optional,
            primary_key,
            generate_shadow_id_field: false,
            comments: field.comments.clone(),
        })
    }

    pub fn is_message(&self) -> bool {
        matches!(self.ty, FieldTy::Message(_))
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self.ty, FieldTy::Timestamp(_))
    }

    pub fn is_json(&self) -> bool {
        matches!(self.ty, FieldTy::Json(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.ty, FieldTy::Enum(_))
    }

    /// The relation whose key field must be generated alongside this one.
    pub fn shadow_id_field(&self) -> Option<&BelongsTo> {
        if !self.generate_shadow_id_field {
            return None;
        }

        self.relation.as_ref().and_then(Relation::as_belongs_to)
    }
}

/// `id`, in any case.
pub(super) fn is_primary_key(field: &FieldDescriptor) -> bool {
    field.name.eq_ignore_ascii_case("id")
}

/// A field usable as a relation key: a singular string.
pub(super) fn is_key_compatible(field: &FieldDescriptor) -> bool {
    field.kind == FieldKind::String && !field.repeated
}
