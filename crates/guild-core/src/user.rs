//! User — the directory entity consumed by the matching engine.
//!
//! The engine only ever reads users; writes (registration, profile edits,
//! moderation) go through the store's directory operations and are never
//! triggered from a search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation state of a directory account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
  Active,
  /// Registered but not yet verified. Still eligible for listing.
  Unverified,
  Suspended,
}

impl AccountStatus {
  /// Whether a professional with this account status may appear in search
  /// results.
  pub fn is_listable(self) -> bool {
    matches!(self, Self::Active | Self::Unverified)
  }
}

/// A registered account. `password_hash` is an argon2 PHC string and must
/// never cross the API boundary; handlers build explicit response bodies.
#[derive(Debug, Clone)]
pub struct User {
  pub user_id:       i64,
  pub name:          String,
  /// Login identifier; unique per directory.
  pub email:         String,
  pub phone:         String,
  /// Taxpayer registration number, digits only.
  pub tax_id:        String,
  pub password_hash: String,
  pub state_uf:      String,
  pub city_id:       i64,
  pub district:      String,
  pub status:        AccountStatus,
  pub created_at:    DateTime<Utc>,
}

/// Input to registration. The store assigns id, status, and `created_at`;
/// the caller is expected to have hashed the password already.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:          String,
  pub email:         String,
  pub phone:         String,
  pub tax_id:        String,
  pub password_hash: String,
  pub state_uf:      String,
  pub city_id:       i64,
  pub district:      String,
}

/// Editable profile fields. Everything else (email, tax id, credentials) is
/// fixed after registration.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
  pub name:     String,
  pub phone:    String,
  pub state_uf: String,
  pub city_id:  i64,
  pub district: String,
}
