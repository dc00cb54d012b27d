//! Character records.
//!
//! # Invariants
//! - At most one character has `is_active = true` at any time.
//! - New characters start inactive; only explicit activation sets the flag.

use super::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Store-assigned character identifier.
pub type CharacterId = i64;

/// A tracked game persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub created_at: Timestamp,
    pub is_active: bool,
}
