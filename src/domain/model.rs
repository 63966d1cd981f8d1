use crate::utils::error::LookupError;
use serde::{Deserialize, Serialize};

/// 一筆地址，欄位名稱沿用查詢服務的 JSON 格式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "address1")]
    pub line1: String,
    #[serde(rename = "address2")]
    pub line2: String,
    #[serde(rename = "address3")]
    pub line3: String,
    pub kana1: String,
    pub kana2: String,
    pub kana3: String,
    #[serde(rename = "prefcode")]
    pub region_code: String,
    #[serde(rename = "zipcode")]
    pub postal_code: String,
}

/// 同一郵遞區號的所有地址，順序與服務回傳一致
pub type ResultGroup = Vec<Address>;

/// Response body of `GET <endpoint>?zipcode=<code>`.
///
/// `status` is required and must be numeric (`200` and `200.0` are both
/// accepted); a missing `results` field and `"results": null` both decode to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: serde_json::Number,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Option<ResultGroup>,
}

impl ApiResponse {
    pub fn from_slice(body: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn is_service_ok(&self) -> bool {
        self.status.as_f64() == Some(200.0)
    }
}

/// The only unit that round-trips through session storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub addresses: Vec<ResultGroup>,
}

#[derive(Debug)]
pub enum LookupOutcome {
    Success(ResultGroup),
    NotFound(String),
    CommunicationFailure {
        message: String,
        cause: Option<LookupError>,
    },
}

pub const NOT_FOUND_MESSAGE: &str = "postal code does not exist";
pub const COMMUNICATION_FAILURE_MESSAGE: &str = "an error occurred, please try again later";

impl LookupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success(_))
    }

    /// 每種失敗只對應一則訊息；底層原因不會出現在這裡
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            LookupOutcome::Success(_) => None,
            LookupOutcome::NotFound(_) => Some(NOT_FOUND_MESSAGE),
            LookupOutcome::CommunicationFailure { .. } => Some(COMMUNICATION_FAILURE_MESSAGE),
        }
    }
}
