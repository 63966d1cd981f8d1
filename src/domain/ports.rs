use crate::domain::model::LookupOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote address lookup. One call per invocation, never retried.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self, postal_code: &str) -> LookupOutcome;
}

/// 以 key 區分的會話儲存槽
pub trait SessionStorage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn session_dir(&self) -> Option<&str>;
    fn session_key(&self) -> &str;
}
