use serde::{Deserialize, Serialize};

/// User model for MongoDB. Owned by the account service; only read here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: bson::oid::ObjectId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
