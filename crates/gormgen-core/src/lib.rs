pub mod config;
pub use config::{Config, Engine};

pub mod descriptor;
pub use descriptor::DescriptorSet;

mod error;
pub use error::Error;

/// A Result type alias that uses gormgen's [`Error`] type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
