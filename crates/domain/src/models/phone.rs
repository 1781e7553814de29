//! Phone domain model.

use serde::{Deserialize, Serialize};

/// A phone number owned by exactly one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    pub phone_id: i32,
    pub number: String,
    pub client_id: i32,
}
