//! Point-in-time business state readings.
//!
//! Stock and supply levels are percentages as read from the game HUD. They
//! are stored as given; nothing here clamps them to 0-100.

use super::character::CharacterId;
use super::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Store-assigned snapshot identifier.
pub type SnapshotId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessSnapshot {
    pub id: SnapshotId,
    pub character_id: CharacterId,
    pub business_type: String,
    pub timestamp: Timestamp,
    pub stock_level: Option<i64>,
    pub supply_level: Option<i64>,
    pub stock_value: Option<i64>,
}

/// Request model for saving a business snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBusinessSnapshot {
    pub character_id: CharacterId,
    pub business_type: String,
    pub stock_level: Option<i64>,
    pub supply_level: Option<i64>,
    pub stock_value: Option<i64>,
}

impl NewBusinessSnapshot {
    pub fn new(character_id: CharacterId, business_type: impl Into<String>) -> Self {
        Self {
            character_id,
            business_type: business_type.into(),
            ..Self::default()
        }
    }
}
