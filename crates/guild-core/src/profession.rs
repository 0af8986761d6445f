//! Profession — an entry in the catalog of offerable trades.
//!
//! Professions are registered once and never deleted. The id is assigned by
//! the store at registration and is stable for the lifetime of the catalog.

use serde::{Deserialize, Serialize};

/// A catalogued trade, e.g. "Plumber" or "Electrician".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profession {
  pub profession_id: i64,
  /// Unique, non-empty. Uniqueness is a case-sensitive exact match.
  pub name:          String,
}
