//! Compiles annotated protobuf descriptors into GORM storage bindings.
//!
//! [`compile`] resolves every ormable message of the requested files into a
//! [`schema::Model`] and renders one `.pb.gorm.go` file per proto file. Files
//! opt in through the file-level `generate` option. The first error aborts
//! the run, so either every file is produced or none is.

macro_rules! warn_unless_quiet {
    ($config:expr, $($arg:tt)+) => {
        if !$config.quiet {
            log::warn!($($arg)+);
        }
    };
}

mod expand;
pub mod schema;

pub use schema::Schema;

use gormgen_core::{descriptor::FileDescriptor, Config, DescriptorSet, Error, Result};
use schema::FileOptions;

/// A rendered source file, ready to be written by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path, relative to the output root
    pub name: String,

    /// Go source text
    pub content: String,
}

/// Builds the schema of every requested file that opts in to generation and
/// has ormable messages.
pub fn build(set: &DescriptorSet, config: &Config) -> Result<Vec<Schema>> {
    let mut schemas = vec![];

    for file in set.files_to_generate() {
        let schema =
            build_file(file, config).map_err(|err| err.context(Error::invalid_file(&file.name)))?;

        schemas.extend(schema);
    }

    Ok(schemas)
}

fn build_file(file: &FileDescriptor, config: &Config) -> Result<Option<Schema>> {
    if !FileOptions::resolve(file)?.generate {
        log::info!("skipping {}: `generate` is not set", file.name);
        return Ok(None);
    }

    log::info!("processing {}", file.name);

    let schema = Schema::from_file(file, config)?;

    if schema.is_none() {
        warn_unless_quiet!(config, "skipping {}: no ormable messages", file.name);
    }

    Ok(schema)
}

/// Compiles a descriptor set into rendered files.
pub fn compile(set: &DescriptorSet, config: &Config) -> Result<Vec<GeneratedFile>> {
    let schemas = build(set, config)?;

    Ok(schemas
        .iter()
        .map(|schema| {
            log::info!("generating {}", schema.filename);

            GeneratedFile {
                name: schema.filename.clone(),
                content: expand::file(schema, config),
            }
        })
        .collect())
}
