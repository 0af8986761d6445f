//! The matching engine — a single-pass pipeline per search request.
//!
//! Given a profession and an optional city, the engine asks the roster for
//! every candidate, drops the ineligible ones against the user directory,
//! and enriches each survivor with contact details and its current
//! reputation label. No ranking is applied: results come back in roster
//! enumeration order, and an empty result is success.

use serde::{Deserialize, Serialize};

use crate::{
  offering::OfferingStatus,
  reputation::ReputationLabel,
  store::MarketStore,
};

/// One search result: an eligible professional enriched for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedProfessional {
  pub user_id:       i64,
  pub profession_id: i64,
  pub name:          String,
  /// Display contact — the directory phone number.
  pub contact:       String,
  pub reputation:    ReputationLabel,
}

/// One row of a professional's own profession list, enriched with the
/// catalog name and current reputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionSummary {
  pub profession_id: i64,
  pub name:          String,
  pub status:        OfferingStatus,
  pub reputation:    ReputationLabel,
}

/// Search for eligible professionals offering `profession_id`.
///
/// A candidate is dropped when the directory has no such user, when the
/// account status is not listable, or when `city_id` is given and differs
/// from the user's city. The profession id is passed to the roster
/// literally; 0 is not an error, it simply matches nothing (catalog ids
/// start at 1).
pub async fn search<S: MarketStore>(
  store: &S,
  profession_id: i64,
  city_id: Option<i64>,
) -> Result<Vec<MatchedProfessional>, S::Error> {
  let candidates = store.professionals_for_profession(profession_id).await?;

  let mut results = Vec::with_capacity(candidates.len());
  for offering in candidates {
    let Some(user) = store.user_by_id(offering.user_id).await? else {
      continue;
    };
    if !user.status.is_listable() {
      continue;
    }
    if let Some(city) = city_id
      && user.city_id != city
    {
      continue;
    }

    let score = store
      .latest_score(user.user_id, profession_id)
      .await?
      .unwrap_or(0);

    results.push(MatchedProfessional {
      user_id: user.user_id,
      profession_id,
      name: user.name,
      contact: user.phone,
      reputation: ReputationLabel::from_score(score),
    });
  }

  Ok(results)
}

/// Enrich a user's full profession list in one pass, using the batched
/// score lookup.
pub async fn profession_summary<S: MarketStore>(
  store: &S,
  user_id: i64,
) -> Result<Vec<ProfessionSummary>, S::Error> {
  let offerings = store.offerings_for_user(user_id).await?;
  let ids: Vec<i64> = offerings.iter().map(|o| o.profession_id).collect();
  let scores = store.latest_scores(user_id, ids).await?;

  let mut rows = Vec::with_capacity(offerings.len());
  for offering in offerings {
    // Offerings are validated against the catalog at insert time; a miss
    // here means out-of-band tampering and is tolerated as an empty name.
    let name = store
      .profession(offering.profession_id)
      .await?
      .map(|p| p.name)
      .unwrap_or_default();

    let score = scores.get(&offering.profession_id).copied().unwrap_or(0);

    rows.push(ProfessionSummary {
      profession_id: offering.profession_id,
      name,
      status: offering.status,
      reputation: ReputationLabel::from_score(score),
    });
  }

  Ok(rows)
}
