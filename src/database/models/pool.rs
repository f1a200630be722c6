use bson::{doc, oid::ObjectId, Bson, Document};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// An amount or duration as the client sent it. Stored as-is.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Quantity {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<Quantity> for Bson {
    fn from(value: Quantity) -> Self {
        match value {
            Quantity::Integer(v) => Bson::Int64(v),
            Quantity::Float(v) => Bson::Double(v),
            Quantity::Text(v) => Bson::String(v),
        }
    }
}

/// Pool model for MongoDB
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lock_value: Option<Quantity>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub winner_description: Option<String>,
    #[serde(default)]
    pub reward_duration: Option<Quantity>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
    pub pool_owner: ObjectId,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub updated_at: u64,
}

/// Client-supplied descriptive fields of a pool
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PoolFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub lock_value: Option<Quantity>,
    pub icon: Option<String>,
    pub cover_image: Option<String>,
    pub winner_description: Option<String>,
    pub reward_duration: Option<Quantity>,
    pub tx_hash: Option<String>,
}

impl Pool {
    /// A pending pool: no contract address yet
    pub fn new(pool_owner: ObjectId, fields: PoolFields) -> Self {
        let now = Utc::now().timestamp() as u64;
        Self {
            id: None,
            name: fields.name,
            description: fields.description,
            lock_value: fields.lock_value,
            icon: fields.icon,
            cover_image: fields.cover_image,
            winner_description: fields.winner_description,
            reward_duration: fields.reward_duration,
            tx_hash: fields.tx_hash,
            contract_address: None,
            pool_owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The set of pool fields an update may touch.
///
/// Every field is tri-state: `None` leaves it unchanged, `Some(None)` writes
/// null, `Some(Some(v))` writes `v`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PoolPatch {
    pub name: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub lock_value: Option<Option<Quantity>>,
    pub icon: Option<Option<String>>,
    pub cover_image: Option<Option<String>>,
    pub winner_description: Option<Option<String>>,
    pub reward_duration: Option<Option<Quantity>>,
    pub tx_hash: Option<Option<String>>,
    pub contract_address: Option<Option<String>>,
}

fn set_field<T: Clone + Into<Bson>>(set: &mut Document, key: &str, value: &Option<Option<T>>) {
    match value {
        Some(Some(value)) => {
            set.insert(key, value.clone().into());
        }
        Some(None) => {
            set.insert(key, Bson::Null);
        }
        None => {}
    }
}

impl PoolPatch {
    /// Build the `$set` document for this patch, always including `updatedAt`
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();

        set_field(&mut set, "name", &self.name);
        set_field(&mut set, "description", &self.description);
        set_field(&mut set, "lockValue", &self.lock_value);
        set_field(&mut set, "icon", &self.icon);
        set_field(&mut set, "coverImage", &self.cover_image);
        set_field(&mut set, "winnerDescription", &self.winner_description);
        set_field(&mut set, "rewardDuration", &self.reward_duration);
        set_field(&mut set, "txHash", &self.tx_hash);
        set_field(&mut set, "contractAddress", &self.contract_address);

        set.insert("updatedAt", Utc::now().timestamp());

        doc! { "$set": set }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pool() -> Pool {
        Pool::new(
            ObjectId::new(),
            PoolFields {
                name: Some("Weekly draw".to_string()),
                description: Some("Winner takes the yield".to_string()),
                lock_value: Some(Quantity::Integer(100)),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_new_pool_is_pending() {
        let pool = sample_pool();
        assert!(pool.id.is_none());
        assert!(pool.contract_address.is_none());
        assert_eq!(pool.created_at, pool.updated_at);
    }

    #[test]
    fn test_set_document_contains_only_patched_keys() {
        let patch = PoolPatch {
            icon: Some(Some("ipfs://icon".to_string())),
            reward_duration: Some(Some(Quantity::Text("7d".to_string()))),
            lock_value: Some(Some(Quantity::Integer(250))),
            contract_address: Some(Some("0xabc".to_string())),
            ..Default::default()
        };

        let update = patch.to_set_document();
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_str("icon").unwrap(), "ipfs://icon");
        assert_eq!(set.get_str("rewardDuration").unwrap(), "7d");
        assert_eq!(set.get_i64("lockValue").unwrap(), 250);
        assert_eq!(set.get_str("contractAddress").unwrap(), "0xabc");
        assert!(set.contains_key("updatedAt"));
        assert!(!set.contains_key("name"));
        assert!(!set.contains_key("poolOwner"));
    }

    #[test]
    fn test_set_document_writes_explicit_nulls() {
        let patch = PoolPatch {
            description: Some(None),
            lock_value: Some(None),
            contract_address: Some(None),
            ..Default::default()
        };

        let update = patch.to_set_document();
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get("description"), Some(&Bson::Null));
        assert_eq!(set.get("lockValue"), Some(&Bson::Null));
        assert_eq!(set.get("contractAddress"), Some(&Bson::Null));
        assert!(!set.contains_key("name"));
    }

    #[test]
    fn test_empty_patch_only_bumps_updated_at() {
        let update = PoolPatch::default().to_set_document();
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains_key("updatedAt"));
    }

    #[test]
    fn test_pool_serializes_camel_case() {
        let pool = sample_pool();
        let document = bson::to_document(&pool).unwrap();
        assert!(document.contains_key("poolOwner"));
        assert!(document.contains_key("lockValue"));
        assert!(!document.contains_key("_id"));
        assert_eq!(document.get("contractAddress"), Some(&Bson::Null));
    }

    #[test]
    fn test_pool_round_trips_through_bson() {
        let mut pool = sample_pool();
        pool.id = Some(ObjectId::new());
        pool.reward_duration = Some(Quantity::Float(1.5));

        let document = bson::to_document(&pool).unwrap();
        let decoded: Pool = bson::from_document(document).unwrap();
        assert_eq!(decoded, pool);
    }
}
