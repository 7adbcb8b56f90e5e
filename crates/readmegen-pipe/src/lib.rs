pub mod batch;
pub mod command;
pub mod converter;

pub use batch::{convert_all, ConversionReport};
pub use command::{run_checked, run_command, RunError};
pub use converter::{CommandLineError, ConvertError, Conversion, Converter, Pandoc, PANDOC};
