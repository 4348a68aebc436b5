use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use gormgen_core::{Config, Engine};
use std::path::{Path, PathBuf};

/// Compiler settings shared by every command.
///
/// Layered lowest to highest: the TOML file, `--param`, then the individual
/// flags.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// TOML file with `engine`, `enums_as_ints` and `quiet` keys
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// protoc plugin parameter string, e.g. `engine=cockroachdb,enums=string`
    #[arg(short, long)]
    param: Option<String>,

    /// Target database engine
    #[arg(short, long, value_enum)]
    engine: Option<EngineArg>,

    /// Global enum storage, overridable per field
    #[arg(long, value_enum)]
    enums: Option<EnumStorage>,

    /// Suppress compiler warnings
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineArg {
    Postgres,
    Cockroachdb,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumStorage {
    Int,
    String,
}

impl ConfigArgs {
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => load(path)?,
            None => Config::default(),
        };

        if let Some(param) = &self.param {
            config = config
                .with_parameter(param)
                .with_context(|| format!("invalid --param `{param}`"))?;
        }

        if let Some(engine) = self.engine {
            config = config.engine(engine.into());
        }

        if let Some(enums) = self.enums {
            config = config.enums_as_ints(enums == EnumStorage::Int);
        }

        if self.quiet {
            config = config.quiet(true);
        }

        Ok(config)
    }
}

/// Loads a [`Config`] from a TOML file. Missing keys keep their defaults.
pub(crate) fn load(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

impl From<EngineArg> for Engine {
    fn from(engine: EngineArg) -> Engine {
        match engine {
            EngineArg::Postgres => Engine::Postgres,
            EngineArg::Cockroachdb => Engine::Cockroachdb,
        }
    }
}
