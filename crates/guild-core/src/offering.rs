//! Offering — a declared (user, profession) pairing.
//!
//! The pair is unique per roster. The roster records every offering ever
//! added regardless of status; status-filtering policy belongs to the
//! matching engine, not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation state of an offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferingStatus {
  Active,
  Suspended,
}

/// "This user offers this profession."
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offering {
  pub user_id:       i64,
  pub profession_id: i64,
  pub status:        OfferingStatus,
  /// Server-assigned at insertion; never changes.
  pub added_at:      DateTime<Utc>,
}
