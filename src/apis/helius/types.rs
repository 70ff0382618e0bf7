/// Helius DAS JSON-RPC request/response types
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::apis::deser::{lenient_string, lenient_timestamp};
use crate::types::{TokenRecord, UNKNOWN_NAME, UNKNOWN_SYMBOL};

/// Interfaces the DAS API uses for fungible assets
pub const FUNGIBLE_INTERFACES: [&str; 2] = ["FungibleToken", "FungibleAsset"];

#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<P> {
    pub jsonrpc: &'static str,
    pub id: &'static str,
    pub method: &'static str,
    pub params: P,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByCreatorParams {
    pub creator_address: String,
    pub only_verified: bool,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetList {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub items: Vec<DasAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DasAsset {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub interface: Option<String>,
    #[serde(default)]
    pub content: Option<AssetContent>,
    #[serde(default)]
    pub token_info: Option<Value>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetContent {
    #[serde(default)]
    pub metadata: Option<AssetMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetMetadata {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
}

impl DasAsset {
    /// Fungible interface, or a non-empty `token_info` block
    pub fn is_fungible(&self) -> bool {
        let fungible_interface = self
            .interface
            .as_deref()
            .map(|interface| FUNGIBLE_INTERFACES.contains(&interface))
            .unwrap_or(false);

        fungible_interface || self.token_info.as_ref().map(has_content).unwrap_or(false)
    }

    pub fn to_token_record(&self) -> TokenRecord {
        let metadata = self.content.as_ref().and_then(|c| c.metadata.as_ref());
        let symbol = metadata
            .and_then(|m| m.symbol.clone())
            .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string());
        let name = metadata
            .and_then(|m| m.name.clone())
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());

        TokenRecord {
            // Kept without an id; the classifier drops addressless records
            address: self.id.clone().unwrap_or_default(),
            symbol,
            name,
            created_at: self.created_at.unwrap_or(0),
            volume: 0.0,
        }
    }
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
