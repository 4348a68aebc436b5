/// Go identifiers generated for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Wire message type, e.g. `Thing`
    pub message: String,

    /// Storage record type, e.g. `ThingGormModel`
    pub record: String,

    /// Slice of wire messages, e.g. `ThingProtos`
    pub protos: String,

    /// Slice of storage records, e.g. `ThingGormModels`
    pub records: String,
}

impl Name {
    pub fn new(message: &str) -> Name {
        Name {
            message: message.to_string(),
            record: record_name(message),
            protos: format!("{message}Protos"),
            records: format!("{message}GormModels"),
        }
    }
}

/// Storage record type of a message.
pub(crate) fn record_name(message: &str) -> String {
    format!("{message}GormModel")
}
