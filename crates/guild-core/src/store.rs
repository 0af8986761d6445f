//! The `MarketStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `guild-store-sqlite`).
//! Higher layers (`guild-api`, the matching engine) depend on this
//! abstraction, not on any concrete backend.
//!
//! Write operations are each a single atomic unit; no multi-step transaction
//! spans the sections below. Reviews are append-only; the representative
//! score for a pair is computed on read and never persisted.

use std::{collections::HashMap, future::Future};

use crate::{
  location::{City, State},
  offering::{Offering, OfferingStatus},
  profession::Profession,
  review::{NewReview, Review},
  user::{AccountStatus, NewUser, ProfileUpdate, User},
};

/// Abstraction over a marketplace storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). The associated
/// error must convert into the core taxonomy ([`crate::Error`]) so callers
/// can classify failures without knowing the backend.
pub trait MarketStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Profession catalog ────────────────────────────────────────────────

  /// Register a new profession under a freshly assigned id.
  ///
  /// Fails with a duplicate-name error on a case-sensitive exact match with
  /// an existing profession.
  fn register_profession(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Profession, Self::Error>> + Send + '_;

  /// Retrieve a profession by id. Returns `None` if not found.
  fn profession(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Profession>, Self::Error>> + Send + '_;

  /// Reverse accessor: retrieve a profession by exact name.
  fn profession_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Profession>, Self::Error>> + Send + 'a;

  /// The full catalog in stable insertion (id) order.
  fn list_professions(
    &self,
  ) -> impl Future<Output = Result<Vec<Profession>, Self::Error>> + Send + '_;

  // ── Professional roster ───────────────────────────────────────────────

  /// Declare that `user_id` offers `profession_id`.
  ///
  /// Fails if the profession is absent from the catalog, or if the pair
  /// already exists. New offerings start [`OfferingStatus::Active`] with a
  /// server-assigned `added_at`.
  fn add_offering(
    &self,
    user_id: i64,
    profession_id: i64,
  ) -> impl Future<Output = Result<Offering, Self::Error>> + Send + '_;

  /// All offerings declared by one user, in insertion order. An empty list
  /// is not an error.
  fn offerings_for_user(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Offering>, Self::Error>> + Send + '_;

  /// Every user who has ever added `profession_id`, regardless of status.
  ///
  /// Status filtering is deliberately NOT done here — the allowed-status
  /// policy lives in the matching engine so it stays in one place.
  fn professionals_for_profession(
    &self,
    profession_id: i64,
  ) -> impl Future<Output = Result<Vec<Offering>, Self::Error>> + Send + '_;

  /// Moderation write: change an offering's status. Fails if the pair does
  /// not exist.
  fn set_offering_status(
    &self,
    user_id: i64,
    profession_id: i64,
    status: OfferingStatus,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reputation ledger — append-only writes ────────────────────────────

  /// Append a review. Fails only on an out-of-range score (and, under
  /// [`crate::review::ReviewPolicy::RequireOffering`], on a pair with no
  /// roster entry). Repeated reviews and self-reviews are accepted.
  fn record_review(
    &self,
    input: NewReview,
  ) -> impl Future<Output = Result<Review, Self::Error>> + Send + '_;

  // ── Reputation ledger — reads ─────────────────────────────────────────

  /// The representative score for a pair: the most recently *recorded*
  /// review's score (submission order, not an average). `None` when the
  /// pair has no reviews; callers render that as 0 / "None".
  fn latest_score(
    &self,
    professional_id: i64,
    profession_id: i64,
  ) -> impl Future<Output = Result<Option<u8>, Self::Error>> + Send + '_;

  /// Batched form of [`MarketStore::latest_score`] over many professions of
  /// one professional. Professions with no reviews are absent from the map.
  fn latest_scores(
    &self,
    professional_id: i64,
    profession_ids: Vec<i64>,
  ) -> impl Future<Output = Result<HashMap<i64, u8>, Self::Error>> + Send + '_;

  /// Full review history for a pair, oldest first.
  fn reviews_for_pair(
    &self,
    professional_id: i64,
    profession_id: i64,
  ) -> impl Future<Output = Result<Vec<Review>, Self::Error>> + Send + '_;

  // ── User directory ────────────────────────────────────────────────────

  /// Create an account. Fails if the email is taken or the city is unknown.
  /// New accounts start [`AccountStatus::Unverified`].
  fn register_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn user_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Retrieve a user by login identifier (email).
  fn user_by_login<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Overwrite the editable profile fields. Fails if the user does not
  /// exist or the new city is unknown.
  fn update_profile(
    &self,
    user_id: i64,
    changes: ProfileUpdate,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Moderation write: change an account's status.
  fn set_account_status(
    &self,
    user_id: i64,
    status: AccountStatus,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reference data ────────────────────────────────────────────────────

  /// Import a state. Idempotent: re-importing an existing uf is a no-op.
  fn add_state(
    &self,
    uf: String,
    name: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Import a city under an externally assigned id. Idempotent.
  fn add_city(
    &self,
    city_id: i64,
    uf: String,
    name: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All states, ordered by uf.
  fn list_states(
    &self,
  ) -> impl Future<Output = Result<Vec<State>, Self::Error>> + Send + '_;

  /// All cities of one state, ordered by name.
  fn cities_in_state<'a>(
    &'a self,
    uf: &'a str,
  ) -> impl Future<Output = Result<Vec<City>, Self::Error>> + Send + 'a;

  /// Retrieve a city by id. Returns `None` if not found.
  fn city(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<City>, Self::Error>> + Send + '_;
}
