mod belongs_to;
pub use belongs_to::BelongsTo;

mod field;
pub use field::ModelField;

mod field_attr;
pub use field_attr::{
    BelongsToAttr, Cascade, FieldOptions, ForeignKeyAttr, ManyToManyAttr, RelationAttr,
};

mod file_attr;
pub use file_attr::FileOptions;

mod has_many;
pub use has_many::HasMany;

mod has_one;
pub use has_one::HasOne;

mod many_to_many;
pub use many_to_many::ManyToMany;

mod model;
pub use model::{Model, PrimaryKey};

mod model_attr;
pub use model_attr::MessageOptions;

mod name;
pub use name::Name;

mod relation;
pub use relation::{Relation, RelationKind};

mod tag;
pub use tag::Tag;

mod ty;
pub use ty::{project, EnumTy, FieldTy, JsonSource, MessageTy, Projection, TimestampTy};

use gormgen_core::{
    descriptor::{FileDescriptor, MessageDescriptor},
    Config, Result,
};

/// The resolved models of one proto file.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Path of the proto file the schema was built from
    pub source: String,

    /// Go package of the generated file
    pub package: String,

    /// Path of the generated file
    pub filename: String,

    /// Ormable messages, in declaration order
    pub models: Vec<Model>,
}

/// Read-only view of a file while its models are built.
///
/// Relationship targets are resolved by name only, so every model of a file
/// can be built independently of the others.
pub(crate) struct Scope<'a> {
    pub(crate) file: &'a FileDescriptor,
    pub(crate) config: &'a Config,

    /// Names of the file's ormable messages
    ormable: Vec<&'a str>,
}

impl Schema {
    /// Builds the schema of `file`, or `None` when it declares no ormable
    /// message.
    pub fn from_file(file: &FileDescriptor, config: &Config) -> Result<Option<Schema>> {
        let mut ormable = vec![];

        for message in &file.messages {
            if MessageOptions::resolve(message)?.ormable {
                ormable.push(message.name.as_str());
            }
        }

        if ormable.is_empty() {
            return Ok(None);
        }

        let scope = Scope {
            file,
            config,
            ormable,
        };

        let mut models = vec![];

        for message in &file.messages {
            if let Some(model) = Model::from_descriptor(&scope, message)? {
                models.push(model);
            }
        }

        Ok(Some(Schema {
            source: file.name.clone(),
            package: file.go_package_name().to_string(),
            filename: format!("{}.pb.gorm.go", file.generated_filename_prefix()),
            models,
        }))
    }

    /// True if any model declares a many-to-many relation.
    pub fn has_many_to_many(&self) -> bool {
        self.models
            .iter()
            .flat_map(|model| &model.fields)
            .any(|field| matches!(field.relation, Some(Relation::ManyToMany(_))))
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name.message == name)
    }
}

impl<'a> Scope<'a> {
    pub(crate) fn is_ormable(&self, message: &str) -> bool {
        self.ormable.contains(&message)
    }

    /// Resolves a fully qualified message type name to a message of this file.
    pub(crate) fn message(&self, type_name: &str) -> Option<&'a MessageDescriptor> {
        let ident = self.file.go_ident(type_name)?;
        self.file.message(&ident)
    }
}
