//! Error type for `guild-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain-rule failure (conflict, not-found, validation). Carried
  /// unchanged so callers can classify it.
  #[error(transparent)]
  Core(#[from] guild_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A column held a value outside the closed set the schema documents.
  #[error("column decode error: {0}")]
  Decode(String),
}

/// Collapse into the core taxonomy: domain failures pass through, anything
/// backend-shaped becomes the generic (retry-safe) storage error.
impl From<Error> for guild_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Core(e) => e,
      Error::Database(e) => guild_core::Error::Storage(e.to_string()),
      Error::Uuid(e) => guild_core::Error::Storage(e.to_string()),
      Error::DateParse(e) => guild_core::Error::Storage(e),
      Error::Decode(e) => guild_core::Error::Storage(e),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
