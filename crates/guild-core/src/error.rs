//! Error taxonomy for `guild-core`.
//!
//! Conflict, not-found, and validation failures are all recoverable at the
//! caller boundary; `Storage` is the catch-all for unexpected backend
//! failures and is the only variant a caller may treat as transient.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("profession not found: {0}")]
  ProfessionNotFound(i64),

  #[error("profession name already registered: {0:?}")]
  DuplicateProfession(String),

  #[error("user {user_id} already offers profession {profession_id}")]
  AlreadyOffered { user_id: i64, profession_id: i64 },

  #[error("user {user_id} does not offer profession {profession_id}")]
  OfferingNotFound { user_id: i64, profession_id: i64 },

  #[error("review score out of range 0..=5: {0}")]
  InvalidScore(u8),

  #[error("user not found: {0}")]
  UserNotFound(i64),

  #[error("email already registered: {0:?}")]
  EmailTaken(String),

  #[error("city not found: {0}")]
  CityNotFound(i64),

  #[error("storage error: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
