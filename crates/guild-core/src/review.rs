//! Review — the fundamental unit of the reputation ledger.
//!
//! A review is an immutable record of one rating at a point in time. Reviews
//! are never updated or deleted; the representative score for a pair is
//! computed at query time from the most recent record (see
//! [`crate::reputation`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable rating of a professional for one profession. A reviewer may
/// rate the same pair any number of times; history is cumulative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
  pub review_id:       Uuid,
  pub reviewer_id:     i64,
  pub professional_id: i64,
  pub profession_id:   i64,
  /// 0–5, where 0 means "no rating given".
  pub score:           u8,
  pub comment:         Option<String>,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at:     DateTime<Utc>,
}

/// Input to [`crate::store::MarketStore::record_review`].
/// `recorded_at` is always set by the store; it is not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewReview {
  pub reviewer_id:     i64,
  pub professional_id: i64,
  pub profession_id:   i64,
  pub score:           u8,
  pub comment:         Option<String>,
}

impl NewReview {
  /// Convenience constructor with no comment.
  pub fn new(
    reviewer_id: i64,
    professional_id: i64,
    profession_id: i64,
    score: u8,
  ) -> Self {
    Self {
      reviewer_id,
      professional_id,
      profession_id,
      score,
      comment: None,
    }
  }
}

/// Write-time validation policy for the ledger.
///
/// The default accepts reviews for pairs with no corresponding roster entry.
/// `RequireOffering` opts into cross-checking without changing the default
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewPolicy {
  /// Append any in-range review. Matches the historical write path.
  #[default]
  Permissive,
  /// Reject reviews whose (professional, profession) pair is not on the
  /// roster.
  RequireOffering,
}
