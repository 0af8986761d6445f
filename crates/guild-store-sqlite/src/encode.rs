//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Status enums are stored as
//! their closed-set lowercase strings. UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use guild_core::{
  offering::{Offering, OfferingStatus},
  review::Review,
  user::{AccountStatus, User},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── OfferingStatus ───────────────────────────────────────────────────────────

pub fn encode_offering_status(s: OfferingStatus) -> &'static str {
  match s {
    OfferingStatus::Active => "active",
    OfferingStatus::Suspended => "suspended",
  }
}

pub fn decode_offering_status(s: &str) -> Result<OfferingStatus> {
  match s {
    "active" => Ok(OfferingStatus::Active),
    "suspended" => Ok(OfferingStatus::Suspended),
    other => Err(Error::Decode(format!("unknown offering status: {other:?}"))),
  }
}

// ─── AccountStatus ────────────────────────────────────────────────────────────

pub fn encode_account_status(s: AccountStatus) -> &'static str {
  match s {
    AccountStatus::Active => "active",
    AccountStatus::Unverified => "unverified",
    AccountStatus::Suspended => "suspended",
  }
}

pub fn decode_account_status(s: &str) -> Result<AccountStatus> {
  match s {
    "active" => Ok(AccountStatus::Active),
    "unverified" => Ok(AccountStatus::Unverified),
    "suspended" => Ok(AccountStatus::Suspended),
    other => Err(Error::Decode(format!("unknown account status: {other:?}"))),
  }
}

// ─── Score ────────────────────────────────────────────────────────────────────

/// The schema CHECK keeps stored scores in 0..=5; anything else means the
/// file was edited out-of-band.
pub fn decode_score(raw: i64) -> Result<u8> {
  u8::try_from(raw).map_err(|_| Error::Decode(format!("score out of range: {raw}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `offerings` row.
pub struct RawOffering {
  pub user_id:       i64,
  pub profession_id: i64,
  pub status:        String,
  pub added_at:      String,
}

impl RawOffering {
  pub fn into_offering(self) -> Result<Offering> {
    Ok(Offering {
      user_id:       self.user_id,
      profession_id: self.profession_id,
      status:        decode_offering_status(&self.status)?,
      added_at:      decode_dt(&self.added_at)?,
    })
  }
}

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:       i64,
  pub name:          String,
  pub email:         String,
  pub phone:         String,
  pub tax_id:        String,
  pub password_hash: String,
  pub state_uf:      String,
  pub city_id:       i64,
  pub district:      String,
  pub status:        String,
  pub created_at:    String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:       self.user_id,
      name:          self.name,
      email:         self.email,
      phone:         self.phone,
      tax_id:        self.tax_id,
      password_hash: self.password_hash,
      state_uf:      self.state_uf,
      city_id:       self.city_id,
      district:      self.district,
      status:        decode_account_status(&self.status)?,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `reviews` row.
pub struct RawReview {
  pub review_id:       String,
  pub reviewer_id:     i64,
  pub professional_id: i64,
  pub profession_id:   i64,
  pub score:           i64,
  pub comment:         Option<String>,
  pub recorded_at:     String,
}

impl RawReview {
  pub fn into_review(self) -> Result<Review> {
    Ok(Review {
      review_id:       decode_uuid(&self.review_id)?,
      reviewer_id:     self.reviewer_id,
      professional_id: self.professional_id,
      profession_id:   self.profession_id,
      score:           decode_score(self.score)?,
      comment:         self.comment,
      recorded_at:     decode_dt(&self.recorded_at)?,
    })
  }
}
