pub mod commands;
pub mod error;
pub mod output;

pub use commands::{ConfigCommand, ListCommand};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, render_table, render_view};
