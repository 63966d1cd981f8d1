#[cfg(feature = "cli")]
pub mod args;
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;
pub use cli::{FileSessionStorage, MemorySessionStorage};
pub use toml_config::AppConfig;
