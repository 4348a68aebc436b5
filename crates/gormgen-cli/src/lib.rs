mod config;
mod generate;

pub use config::{ConfigArgs, EngineArg, EnumStorage};
pub use generate::{CheckCommand, GenerateCommand};

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

/// Command-line front end of the gormgen compiler
#[derive(Debug, Default)]
pub struct GormgenCli;

impl GormgenCli {
    pub fn new() -> Self {
        Self
    }

    /// Parse and execute CLI commands from command-line arguments
    pub fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli)
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli)
    }

    fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Command::Generate(cmd) => {
                let config = cmd.config().resolve()?;
                init_logger(config.quiet);
                cmd.run(config)
            }
            Command::Check(cmd) => {
                let config = cmd.config().resolve()?;
                init_logger(config.quiet);
                cmd.run(config)
            }
        }
    }
}

/// `GORMGEN_LOG` filters the output; the default shows warnings, or only
/// errors when quiet.
fn init_logger(quiet: bool) {
    let default = if quiet { "error" } else { "warn" };

    // a logger may already be installed when driven from tests
    let _ = env_logger::Builder::from_env(Env::new().filter_or("GORMGEN_LOG", default))
        .format_timestamp(None)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(name = "gormgen")]
#[command(about = "gormgen - GORM storage bindings from annotated protobuf descriptors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Compile a descriptor set and write the generated files
    Generate(GenerateCommand),

    /// Compile a descriptor set and list its models without writing anything
    Check(CheckCommand),
}
