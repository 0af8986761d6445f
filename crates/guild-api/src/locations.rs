//! Handlers for the reference-geography endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};

use guild_core::{
  location::{City, State as GeoState},
  store::MarketStore,
};

use crate::error::ApiError;

/// `GET /locations/states`
pub async fn states<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<GeoState>>, ApiError>
where
  S: MarketStore,
{
  let states = store.list_states().await.map_err(ApiError::from_store)?;
  Ok(Json(states))
}

/// `GET /locations/cities/{uf}`
pub async fn cities<S>(
  State(store): State<Arc<S>>,
  Path(uf): Path<String>,
) -> Result<Json<Vec<City>>, ApiError>
where
  S: MarketStore,
{
  let cities = store
    .cities_in_state(&uf)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(cities))
}
