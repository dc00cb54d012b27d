//! Discrete money-change events within a session.

use super::session::SessionId;
use super::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Store-assigned earnings event identifier.
pub type EarningId = i64;

/// One discrete earnings event. `amount` is signed so debits are
/// representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earning {
    pub id: EarningId,
    pub session_id: SessionId,
    pub timestamp: Timestamp,
    pub amount: i64,
    pub source: Option<String>,
    pub balance_after: Option<i64>,
}
