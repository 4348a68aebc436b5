use super::Cascade;

/// Primary key directive of the `id` field.
const PRIMARY_KEY: &str = "type:uuid;primaryKey;default:gen_random_uuid();";

/// The `gorm:"..."` directives of a record field.
///
/// Segments always render in the same order: primary key, column type,
/// relation wiring, then referential actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub primary_key: bool,
    pub column: Option<String>,
    pub relation: Option<String>,
    pub cascade: Option<String>,
}

impl Tag {
    pub fn is_empty(&self) -> bool {
        !self.primary_key && self.column.is_none() && self.relation.is_none() && self.cascade.is_none()
    }

    /// `constraint:OnUpdate:X,OnDelete:Y;`, omitting unset actions.
    pub fn cascade(cascade: &Cascade) -> Option<String> {
        let actions: Vec<_> = [("OnUpdate", &cascade.on_update), ("OnDelete", &cascade.on_delete)]
            .into_iter()
            .filter_map(|(name, action)| action.as_ref().map(|action| format!("{name}:{action}")))
            .collect();

        if actions.is_empty() {
            None
        } else {
            Some(format!("constraint:{};", actions.join(",")))
        }
    }
}

impl core::fmt::Display for Tag {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.primary_key {
            f.write_str(PRIMARY_KEY)?;
        }

        for segment in [&self.column, &self.relation, &self.cascade].into_iter().flatten() {
            f.write_str(segment)?;
        }

        Ok(())
    }
}
