use serde::{Deserialize, Deserializer, Serialize};

use crate::database::models::{Pool, PoolFields, PoolPatch, Quantity};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Response model for pool API endpoints
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PoolResponse {
    #[serde(rename = "_id")]
    pub id: String, // MongoDB ObjectId as string
    pub name: Option<String>,
    pub description: Option<String>,
    pub lock_value: Option<Quantity>,
    pub icon: Option<String>,
    pub cover_image: Option<String>,
    pub winner_description: Option<String>,
    pub reward_duration: Option<Quantity>,
    pub tx_hash: Option<String>,
    pub contract_address: Option<String>,
    pub pool_owner: String,
    pub created_at: u64,
    pub updated_at: u64,
}

impl From<Pool> for PoolResponse {
    fn from(pool: Pool) -> Self {
        let id = pool
            .id
            .map(|oid| oid.to_hex())
            .unwrap_or_else(|| "unknown".to_string());

        PoolResponse {
            id,
            name: pool.name,
            description: pool.description,
            lock_value: pool.lock_value,
            icon: pool.icon,
            cover_image: pool.cover_image,
            winner_description: pool.winner_description,
            reward_duration: pool.reward_duration,
            tx_hash: pool.tx_hash,
            contract_address: pool.contract_address,
            pool_owner: pool.pool_owner.to_hex(),
            created_at: pool.created_at,
            updated_at: pool.updated_at,
        }
    }
}

/// `{ "data": ... }` envelope shared by every endpoint except list-all
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// `{ "pool": ... }` payload of create and update
#[derive(Debug, Serialize)]
pub struct PoolPayload {
    pub pool: Option<PoolResponse>,
}

/// `{ "error": bool, "message": ... }` envelope of the list-all endpoint
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub error: bool,
    pub message: T,
}

/// Raw pagination query. Kept as strings so bad input falls back to defaults
/// instead of failing the request.
#[derive(Debug, Default)]
pub struct PaginationQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: i64,
}

impl PaginationQuery {
    /// Pick the first `page` and `limit` out of the raw query pairs.
    /// Repeated and unknown keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        PaginationQuery {
            page: first("page"),
            limit: first("limit"),
        }
    }

    pub fn resolve(&self) -> Pagination {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(DEFAULT_PAGE);

        let limit = self
            .limit
            .as_deref()
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIMIT);

        Pagination { page, limit }
    }
}

impl Pagination {
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit as u64)
    }
}

/// Request model for creating a new pool.
/// Unknown fields, including `poolOwner` and `contractAddress`, are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePoolRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub lock_value: Option<Quantity>,
    pub icon: Option<String>,
    pub cover_image: Option<String>,
    pub winner_description: Option<String>,
    pub reward_duration: Option<Quantity>,
    pub tx_hash: Option<String>,
}

impl From<CreatePoolRequest> for PoolFields {
    fn from(request: CreatePoolRequest) -> Self {
        PoolFields {
            name: request.name,
            description: request.description,
            lock_value: request.lock_value,
            icon: request.icon,
            cover_image: request.cover_image,
            winner_description: request.winner_description,
            reward_duration: request.reward_duration,
            tx_hash: request.tx_hash,
        }
    }
}

/// Mutable pool fields. Any other key is rejected; an explicit `null`
/// clears the field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PoolDetails {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub lock_value: Option<Option<Quantity>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub cover_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub winner_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub reward_duration: Option<Option<Quantity>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub tx_hash: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub contract_address: Option<Option<String>>,
}

/// Request model for updating an existing pool
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePoolRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub contract_address: Option<Option<String>>,
    #[serde(default)]
    pub pool_details: Option<PoolDetails>,
}

impl UpdatePoolRequest {
    /// Top-level `contractAddress` wins over the one in `poolDetails`
    pub fn into_patch(self) -> PoolPatch {
        let details = self.pool_details.unwrap_or_default();

        PoolPatch {
            name: details.name,
            description: details.description,
            lock_value: details.lock_value,
            icon: details.icon,
            cover_image: details.cover_image,
            winner_description: details.winner_description,
            reward_duration: details.reward_duration,
            tx_hash: details.tx_hash,
            contract_address: self.contract_address.or(details.contract_address),
        }
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`)
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
