//! Handler for `GET /search/professionals`.
//!
//! Query params map onto the matching engine's inputs. `profession_id`
//! defaults to 0 when absent, which matches nothing — callers must supply a
//! real id for a meaningful result.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;

use guild_core::{
  matching::{self, MatchedProfessional},
  store::MarketStore,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  #[serde(default)]
  pub profession_id: i64,
  pub city_id:       Option<i64>,
}

/// `GET /search/professionals?profession_id=<id>[&city_id=<id>]`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<MatchedProfessional>>, ApiError>
where
  S: MarketStore,
{
  let results =
    matching::search(store.as_ref(), params.profession_id, params.city_id)
      .await
      .map_err(ApiError::from_store)?;
  Ok(Json(results))
}
