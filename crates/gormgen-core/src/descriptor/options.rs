use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Options attached to a message or field, keyed by option name.
///
/// Declaration order is preserved so that diagnostics can name the first
/// offending declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    entries: IndexMap<String, OptionValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Message(Options),
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }

    /// Adds an entry, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Options {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&Options> {
        match self {
            OptionValue::Message(value) => Some(value),
            _ => None,
        }
    }

    /// Short name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "bool",
            OptionValue::Int(_) => "int",
            OptionValue::Float(_) => "float",
            OptionValue::String(_) => "string",
            OptionValue::Message(_) => "message",
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<Options> for OptionValue {
    fn from(value: Options) -> Self {
        OptionValue::Message(value)
    }
}

impl FromIterator<(String, OptionValue)> for Options {
    fn from_iter<T: IntoIterator<Item = (String, OptionValue)>>(iter: T) -> Self {
        Options {
            entries: iter.into_iter().collect(),
        }
    }
}
