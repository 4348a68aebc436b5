use super::BelongsToAttr;

use gormgen_core::descriptor::MessageDescriptor;

/// The owning message holds the key: `Thing.OwnerId -> Owner.Id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BelongsTo {
    /// Related message
    pub target: String,

    /// Field on this message holding the key
    pub foreign_key: String,

    /// Field on the related message the key points at
    pub references: String,
}

impl BelongsTo {
    pub(super) fn new(target: &MessageDescriptor, attr: &BelongsToAttr) -> BelongsTo {
        BelongsTo {
            target: target.name.clone(),
            foreign_key: attr.foreign_key.clone(),
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
