use super::{FieldDescriptor, Options};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageDescriptor {
    /// Message name as declared, e.g. `User`
    pub name: String,

    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,

    /// Message-level options
    pub options: Options,

    /// Leading comments
    pub comments: Option<String>,
}

impl MessageDescriptor {
    /// Looks up a field by its Go name.
    pub fn field_by_go_name(&self, go_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.go_name() == go_name)
    }
}
