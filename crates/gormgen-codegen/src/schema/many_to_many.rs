use super::ManyToManyAttr;

use gormgen_core::{
    descriptor::{FieldDescriptor, MessageDescriptor},
    Error, Result,
};
use std_util::str;

/// Both sides are linked through a join table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManyToMany {
    /// Related message
    pub target: String,

    /// Join table name
    pub join_table: String,

    /// Field on this message identifying it in the join table
    pub foreign_key: String,

    /// Field on the related message identifying it in the join table
    pub references: String,

    /// Join table column pointing at this message
    pub join_foreign_key: String,

    /// Join table column pointing at the related message
    pub join_references: String,
}

impl ManyToMany {
    pub(super) fn new(
        owner: &MessageDescriptor,
        field: &FieldDescriptor,
        target: &MessageDescriptor,
        attr: &ManyToManyAttr,
    ) -> Result<ManyToMany> {
        let many_to_many = ManyToMany {
            target: target.name.clone(),
            join_table: attr
                .join_table
                .clone()
                .unwrap_or_else(|| join_table_name(&owner.name, &target.name)),
            foreign_key: attr.foreign_key.clone().unwrap_or_else(|| "Id".to_string()),
            references: attr.references.clone().unwrap_or_else(|| "Id".to_string()),
            join_foreign_key: attr
                .join_foreign_key
                .clone()
                .unwrap_or_else(|| format!("{}Id", owner.name)),
            join_references: attr
                .join_references
                .clone()
                .unwrap_or_else(|| format!("{}Id", target.name)),
        };

        // A self-referential relation defaults both join columns to `<Owner>Id`.
        if many_to_many.join_foreign_key == many_to_many.join_references {
            return Err(Error::naming_collision(
                &owner.name,
                &field.name,
                format!(
                    "both join table columns resolve to `{}`; set `join_foreign_key` or `join_references`",
                    many_to_many.join_references
                ),
            ));
        }

        Ok(many_to_many)
    }

    pub fn tag(&self) -> String {
        format!(
            "many2many:{};foreignKey:{};joinForeignKey:{};references:{};joinReferences:{};",
            self.join_table,
            self.foreign_key,
            self.join_foreign_key,
            self.references,
            self.join_references
        )
    }
}

/// `<owners>_<targets>`, from the message names rather than any table
/// override, so the name only changes when a message is renamed.
fn join_table_name(owner: &str, target: &str) -> String {
    format!("{}_{}", str::table_name(owner), str::table_name(target))
}
