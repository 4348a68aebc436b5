use crate::ConfigArgs;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use gormgen_core::{Config, DescriptorSet};
use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// Descriptor set as JSON, or `-` for stdin
    input: PathBuf,

    /// Directory the generated files are written under
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Descriptor set as JSON, or `-` for stdin
    input: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,
}

impl GenerateCommand {
    pub(crate) fn config(&self) -> &ConfigArgs {
        &self.config
    }

    pub(crate) fn run(self, config: Config) -> Result<()> {
        let set = read_descriptor_set(&self.input)?;
        log::debug!("generating with {config:?}");

        println!();
        println!("  {}", style("Generate GORM Models").cyan().bold().underlined());
        println!();

        // Nothing is written unless every file compiled.
        let files = gormgen_codegen::compile(&set, &config)?;

        if files.is_empty() {
            println!(
                "  {}",
                style("No files to generate.")
                    .magenta()
                    .dim()
            );
            println!();
            return Ok(());
        }

        for file in &files {
            let path = self.out.join(&file.name);

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }

            fs::write(&path, &file.content)
                .with_context(|| format!("failed to write {}", path.display()))?;

            println!(
                "  {} {}",
                style("✓").green().bold(),
                style(format!("Wrote {}", path.display())).dim()
            );
        }

        println!();
        println!(
            "  {}",
            style(format!(
                "Generated {} file(s) for {}",
                files.len(),
                config.engine.name()
            ))
            .green()
            .bold()
        );
        println!();

        Ok(())
    }
}

impl CheckCommand {
    pub(crate) fn config(&self) -> &ConfigArgs {
        &self.config
    }

    pub(crate) fn run(self, config: Config) -> Result<()> {
        let set = read_descriptor_set(&self.input)?;
        let schemas = gormgen_codegen::build(&set, &config)?;

        println!();
        for schema in &schemas {
            println!("  {}", style(&schema.source).cyan().bold());

            for model in &schema.models {
                println!(
                    "    {} {} {}",
                    style(&model.name.record).bold(),
                    style("->").dim(),
                    model.table_name
                );
            }
        }

        let models: usize = schemas.iter().map(|schema| schema.models.len()).sum();
        println!();
        println!(
            "  {} {}",
            style("✓").green().bold(),
            style(format!("{models} model(s) in {} file(s)", schemas.len())).dim()
        );
        println!();

        Ok(())
    }
}

pub(crate) fn read_descriptor_set(input: &Path) -> Result<DescriptorSet> {
    let contents = if input == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("failed to read descriptor set from stdin")?;
        contents
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?
    };

    serde_json::from_str(&contents)
        .with_context(|| format!("failed to decode descriptor set {}", input.display()))
}
