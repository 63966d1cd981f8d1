pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{AppConfig, FileSessionStorage, MemorySessionStorage};

pub use core::history::AddressHistoryStore;
pub use core::lookup::AddressLookupClient;
pub use core::paginator::Paginator;
pub use core::session::{LookupSession, SubmitOutcome};
pub use domain::model::{Address, ApiResponse, LookupOutcome, ResultGroup};
pub use domain::ports::{AddressLookup, ConfigProvider, SessionStorage};
pub use utils::error::{AppError, LookupError, Result};
