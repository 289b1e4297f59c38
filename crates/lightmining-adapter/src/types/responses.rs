/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Common `{code, msg, data}` wrapper around every API payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceData {
    #[serde(default)]
    pub nonce: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "userId", default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    #[serde(rename = "twName", default)]
    pub tw_name: Option<String>,
    #[serde(rename = "totalReward", default)]
    pub total_reward: Option<Decimal>,
}

impl UserInfo {
    /// Linked X/Twitter handle, ignoring blank values
    pub fn social_handle(&self) -> Option<&str> {
        self.tw_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningStatus {
    #[serde(rename = "lastMiningTime", default)]
    pub last_mining_time: Option<i64>,
}

impl MiningStatus {
    /// Last activation in unix seconds; never mined counts as zero
    pub fn last_mining_time(&self) -> i64 {
        self.last_mining_time.unwrap_or(0)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
