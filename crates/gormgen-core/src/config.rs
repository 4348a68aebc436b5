use crate::{Error, Result};

use serde::Deserialize;
use std::str::FromStr;

/// Per-run compiler configuration.
///
/// Passed explicitly to every resolver and projector call so the compiler can
/// be driven for several engines within one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Target database dialect
    pub engine: Engine,

    /// Store enums as integers unless a field overrides it
    pub enums_as_ints: bool,

    /// Suppress compiler warnings
    pub quiet: bool,
}

/// The relational database dialect targeted by a run.
///
/// The dialects disagree on array and enum-array column spellings and on the
/// transaction helper the generated batch operations use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Postgres,
    Cockroachdb,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            enums_as_ints: true,
            quiet: false,
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target engine
    pub fn engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Set the global enum storage default
    pub fn enums_as_ints(mut self, enums_as_ints: bool) -> Self {
        self.enums_as_ints = enums_as_ints;
        self
    }

    /// Suppress warnings
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Parses a protoc plugin parameter string on top of the defaults.
    ///
    /// The syntax is a comma separated list of `key=value` pairs or bare
    /// flags, e.g. `engine=cockroachdb,enums=string,quiet`.
    pub fn from_parameter(parameter: &str) -> Result<Config> {
        Config::default().with_parameter(parameter)
    }

    /// Applies a protoc plugin parameter string to this configuration.
    pub fn with_parameter(mut self, parameter: &str) -> Result<Config> {
        for entry in parameter.split(',').map(str::trim) {
            if entry.is_empty() {
                continue;
            }

            let (key, value) = match entry.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (entry, None),
            };

            match (key, value) {
                ("engine", Some(value)) => self.engine = value.parse()?,
                ("enums", Some(value)) if value.eq_ignore_ascii_case("string") => {
                    self.enums_as_ints = false
                }
                ("enums", Some(value)) if value.eq_ignore_ascii_case("int") => {
                    self.enums_as_ints = true
                }
                ("enums", value) => {
                    return Err(Error::invalid_config(format!(
                        "`enums` expects `int` or `string`, got `{}`",
                        value.unwrap_or_default()
                    )))
                }
                ("quiet", None) => self.quiet = true,
                ("quiet", Some(value)) => {
                    self.quiet = value.parse().map_err(|_| {
                        Error::invalid_config(format!("`quiet` expects a bool, got `{value}`"))
                    })?
                }
                (key, _) => {
                    return Err(Error::invalid_config(format!(
                        "unknown parameter `{key}`"
                    )))
                }
            }
        }

        Ok(self)
    }
}

impl Engine {
    pub fn name(self) -> &'static str {
        match self {
            Engine::Postgres => "postgres",
            Engine::Cockroachdb => "cockroachdb",
        }
    }
}

impl FromStr for Engine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Engine> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Engine::Postgres),
            "cockroachdb" | "cockroach" | "crdb" => Ok(Engine::Cockroachdb),
            _ => Err(Error::invalid_config(format!("unknown engine `{s}`"))),
        }
    }
}

impl core::fmt::Display for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new();
        assert_eq!(config.engine, Engine::Postgres);
        assert!(config.enums_as_ints);
        assert!(!config.quiet);
    }

    #[test]
    fn parameter_string() {
        let config = Config::from_parameter("engine=cockroachdb,enums=string,quiet").unwrap();
        assert_eq!(
            config,
            Config::new()
                .engine(Engine::Cockroachdb)
                .enums_as_ints(false)
                .quiet(true)
        );
    }

    #[test]
    fn empty_parameter_is_default() {
        assert_eq!(Config::from_parameter("").unwrap(), Config::default());
    }

    #[test]
    fn unknown_parameter() {
        let err = Config::from_parameter("engine=postgres,colour=blue").unwrap_err();
        assert!(err.is_invalid_config());
        assert_eq!(
            err.to_string(),
            "invalid configuration: unknown parameter `colour`"
        );
    }

    #[test]
    fn unknown_engine() {
        let err = "mysql".parse::<Engine>().unwrap_err();
        assert!(err.is_invalid_config());
    }
}
