pub mod address;
pub mod history;
pub mod lookup;
pub mod paginator;
pub mod postal_code;
pub mod session;

pub use crate::domain::model::{Address, LookupOutcome, ResultGroup};
pub use crate::domain::ports::{AddressLookup, ConfigProvider, SessionStorage};
pub use crate::utils::error::Result;
