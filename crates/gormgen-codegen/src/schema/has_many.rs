use super::ForeignKeyAttr;

use gormgen_core::descriptor::MessageDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasMany {
    /// Related message
    pub target: String,

    /// Field on the related message holding the key
    pub foreign_key: String,

    /// Field on this message the key points at
    pub references: String,
}

impl HasMany {
    pub(super) fn new(
        owner: &MessageDescriptor,
        target: &MessageDescriptor,
        attr: &ForeignKeyAttr,
    ) -> HasMany {
        HasMany {
            target: target.name.clone(),
            foreign_key: attr
                .foreign_key
                .clone()
                .unwrap_or_else(|| format!("{}Id", owner.name)),
            references: attr.references.clone().unwrap_or_else(|| "Id".to_string()),
        }
    }

    pub fn tag(&self) -> String {
        format!(
            "foreignKey:{};references:{};",
            self.foreign_key, self.references
        )
    }
}
