//! Reputation labels — the fixed ordinal scale a raw score maps onto.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of a review score. The lower bound is 0, meaning "no rating
/// given".
pub const MAX_SCORE: u8 = 5;

/// One of six fixed ordinal labels representing a 0–5 integer score.
///
/// The string forms are part of the external interface and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReputationLabel {
  None,
  Terrible,
  Bad,
  Average,
  Good,
  Excellent,
}

impl ReputationLabel {
  /// Map a stored score onto its label. The ledger rejects scores above
  /// [`MAX_SCORE`] at write time, so the clamp arm is unreachable for any
  /// score that came through `record_review`.
  pub fn from_score(score: u8) -> Self {
    match score {
      0 => Self::None,
      1 => Self::Terrible,
      2 => Self::Bad,
      3 => Self::Average,
      4 => Self::Good,
      _ => Self::Excellent,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::None => "None",
      Self::Terrible => "Terrible",
      Self::Bad => "Bad",
      Self::Average => "Average",
      Self::Good => "Good",
      Self::Excellent => "Excellent",
    }
  }
}

impl fmt::Display for ReputationLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
