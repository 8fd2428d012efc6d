pub mod config;
pub mod list;

pub use config::ConfigCommand;
pub use list::ListCommand;
